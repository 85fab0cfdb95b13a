//! Runtime tuning, with `VSS_*` environment overrides

use crate::models::DEFAULT_THRESHOLD;

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Knobs shared by the generation and reconstruction paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VssConfig {
    /// Binarization threshold; `intensity <= threshold` is a 1 bit
    pub threshold: u8,
    /// Pixels per share cell when writing share PNGs
    pub share_scale: u32,
    /// Pixels per QR module when rendering a secret from text
    pub module_px: u32,
    /// White margin (pixels) added around a grid before QR scanning
    pub quiet_margin: u32,
}

impl Default for VssConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            share_scale: 1,
            module_px: 8,
            quiet_margin: 8,
        }
    }
}

impl VssConfig {
    /// Defaults overridden by `VSS_THRESHOLD`, `VSS_SHARE_SCALE`,
    /// `VSS_MODULE_PX` and `VSS_QUIET_MARGIN`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            threshold: parse_env_u8("VSS_THRESHOLD", defaults.threshold),
            share_scale: parse_env_u32("VSS_SHARE_SCALE", defaults.share_scale).clamp(1, 64),
            module_px: parse_env_u32("VSS_MODULE_PX", defaults.module_px).clamp(1, 64),
            quiet_margin: parse_env_u32("VSS_QUIET_MARGIN", defaults.quiet_margin).min(256),
        }
    }
}
