use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 12;

/// Short SHA-256 prefix of a verification token.
/// Raw tokens are bearer credentials and must never reach the logs.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(FINGERPRINT_LEN);
    hex
}
