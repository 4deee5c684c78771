mod qr_code;
mod status_view;
mod verification_link;

pub use qr_code::{encode_svg, QrEncodeError, QrErrorCorrection};
pub use status_view::{render_status, StatusLabel, VerificationView};
pub use verification_link::VerificationLinks;

use crate::verification::application::domain::entities::VerificationToken;

/// Everything the web layer needs to show a code: its URL and its image.
#[derive(Debug, Clone)]
pub struct VerificationPresenter {
    links: VerificationLinks,
    error_correction: QrErrorCorrection,
}

impl VerificationPresenter {
    pub fn new(links: VerificationLinks, error_correction: QrErrorCorrection) -> Self {
        Self {
            links,
            error_correction,
        }
    }

    pub fn url_for(&self, token: &VerificationToken) -> String {
        self.links.url_for(token)
    }

    pub fn qr_svg(&self, token: &VerificationToken) -> Result<String, QrEncodeError> {
        encode_svg(&self.url_for(token), self.error_correction)
    }
}
