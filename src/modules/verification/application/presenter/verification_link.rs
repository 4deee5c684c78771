use crate::verification::application::domain::entities::VerificationToken;

/// Builds `<base>/<role>/verify/<token>`, the URL embedded in every code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLinks {
    base_url: String,
    role_segment: String,
}

impl VerificationLinks {
    pub fn new(base_url: impl Into<String>, role_segment: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let role_segment = role_segment.into().trim_matches('/').to_string();
        Self {
            base_url,
            role_segment,
        }
    }

    pub fn url_for(&self, token: &VerificationToken) -> String {
        format!(
            "{}/{}/verify/{}",
            self.base_url,
            self.role_segment,
            token.as_str()
        )
    }
}
