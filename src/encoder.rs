//! Payload text → populated module matrix

use crate::error::{Error, Result};
use crate::models::{ECLevel, ModuleMatrix};
use qrcode::{Color as QrColor, QrCode, Version as QrVersion};

/// Encodes payload text into a module matrix.
pub trait QrEncoder {
    /// Encode `payload` at `level`, picking the smallest version that fits.
    ///
    /// Fails with [`Error::UnencodableText`] when no supported version can hold
    /// the text.
    fn encode(&self, payload: &str, level: ECLevel) -> Result<ModuleMatrix>;
}

/// [`QrEncoder`] backed by the `qrcode` crate (Model 2 symbols only)
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, level: ECLevel) -> Result<ModuleMatrix> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())
            .map_err(|err| Error::UnencodableText(err.to_string()))?;

        let version = match code.version() {
            QrVersion::Normal(v) => u32::try_from(v)
                .map_err(|_| Error::UnencodableText(format!("unsupported version {v}")))?,
            QrVersion::Micro(v) => {
                return Err(Error::UnencodableText(format!(
                    "micro QR version M{v} is not supported"
                )));
            }
        };

        let mut matrix = ModuleMatrix::new(version)?;
        let side = matrix.side();
        if code.width() != side {
            return Err(Error::UnencodableText(format!(
                "encoder produced {} modules per side, expected {side} for version {version}",
                code.width()
            )));
        }

        for (row, colors) in code.to_colors().chunks(side).enumerate() {
            for (col, color) in colors.iter().enumerate() {
                matrix.set(row, col, matches!(color, QrColor::Dark));
            }
        }

        log::debug!(
            "encoded {} bytes at EC level {level} as version {version} ({side}x{side})",
            payload.len()
        );
        Ok(matrix)
    }
}
