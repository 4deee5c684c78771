mod eligibility;

pub use eligibility::{evaluate_eligibility, Eligibility};
