mod get_current_verification;
mod get_verification_qr;
mod issue_verification;
mod preview_verification;
mod regenerate_verification;
mod reject_verification;
mod verify_token;

pub use get_current_verification::*;
pub use get_verification_qr::*;
pub use issue_verification::*;
pub use preview_verification::*;
pub use regenerate_verification::*;
pub use reject_verification::*;
pub use verify_token::*;
