//! Utility functions for image processing
//!
//! This module provides the pixel-level helpers used by the normalizer:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Threshold binarization under a polarity convention
//! - Nearest-neighbor resampling

pub mod binarization;
pub mod grayscale;
pub mod resize;
