//! Share generation and raster encoding

pub mod codec;
pub mod generator;

pub use codec::{decode_share, encode_grid, encode_share, render_gray};
pub use generator::{RandomSource, derive_session_share, generate_shares, random_grid};
