use qrcode::{render::svg, EcLevel, QrCode};
use std::str::FromStr;

/// Minimum rendered size in pixels, large enough for phone scanners.
const MIN_DIMENSION: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl QrErrorCorrection {
    fn ec_level(self) -> EcLevel {
        match self {
            QrErrorCorrection::Low => EcLevel::L,
            QrErrorCorrection::Medium => EcLevel::M,
            QrErrorCorrection::Quartile => EcLevel::Q,
            QrErrorCorrection::High => EcLevel::H,
        }
    }
}

impl FromStr for QrErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(QrErrorCorrection::Low),
            "M" => Ok(QrErrorCorrection::Medium),
            "Q" => Ok(QrErrorCorrection::Quartile),
            "H" => Ok(QrErrorCorrection::High),
            other => Err(format!("Unknown QR error correction level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrEncodeError {
    #[error("Data too long for a QR code")]
    DataTooLong,

    #[error("QR encoding failed: {0}")]
    EncodingFailed(String),
}

impl From<qrcode::types::QrError> for QrEncodeError {
    fn from(err: qrcode::types::QrError) -> Self {
        match err {
            qrcode::types::QrError::DataTooLong => QrEncodeError::DataTooLong,
            other => QrEncodeError::EncodingFailed(other.to_string()),
        }
    }
}

/// Encode `data` as an SVG QR code. Pure: the same input always yields the
/// same document.
pub fn encode_svg(data: &str, level: QrErrorCorrection) -> Result<String, QrEncodeError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), level.ec_level())?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .quiet_zone(true)
        .build())
}
