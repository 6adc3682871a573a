//! ASN label content: one QR code plus the human-readable value per cell.

use ::image::{DynamicImage, Luma};
use qrcode::QrCode;

use crate::canvas::Canvas;
use crate::units::MM;
use crate::LabelError;

/// Stateful renderer for a run of sequential archive serial numbers.
pub struct AsnLabel {
    current: u32,
    digits: usize,
}

impl AsnLabel {
    pub fn new(start: u32, digits: usize) -> Self {
        Self {
            current: start,
            digits,
        }
    }

    /// Draws one label into a cell of the given size and advances the
    /// counter. The QR code spans 90% of the cell height; the value is
    /// printed next to it in 2mm Helvetica.
    pub fn render<C: Canvas>(
        &mut self,
        canvas: &mut C,
        _width: f32,
        height: f32,
    ) -> Result<(), LabelError> {
        let value = format!("ASN{:0digits$}", self.current, digits = self.digits);

        let code = QrCode::new(value.as_bytes()).map_err(|e| LabelError::Qr(e.to_string()))?;
        let qr = DynamicImage::ImageLuma8(code.render::<Luma<u8>>().build());
        canvas.image(&qr, 1.0 * MM, height * 0.05, height * 0.9);

        canvas.text(&value, 2.0 * MM, height, (height - 2.0 * MM) / 2.0);

        self.current += 1;
        Ok(())
    }
}
