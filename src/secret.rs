//! Secret QR rendering from text
//!
//! Turns an attendance URL into the bit grid that gets split into shares.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::{Result, VssError};
use crate::models::BitGrid;

/// Encode `text` as a QR symbol and rasterize it as a secret grid
///
/// Uses the smallest version that fits at ECC level M. Dark modules are 1,
/// each module is `module_px` pixels wide, and `quiet_modules` light modules
/// surround the symbol.
pub fn render_secret(text: &str, module_px: usize, quiet_modules: usize) -> Result<BitGrid> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
        .map_err(|e| VssError::QrEncode(e.to_string()))?;
    let modules = code.width();
    let colors = code.to_colors();

    let side = modules + 2 * quiet_modules;
    let symbol = BitGrid::from_fn(side, side, |x, y| {
        if x < quiet_modules || y < quiet_modules {
            return false;
        }
        let (mx, my) = (x - quiet_modules, y - quiet_modules);
        mx < modules && my < modules && colors[my * modules + mx] == Color::Dark
    });

    Ok(symbol.upscale(module_px))
}
