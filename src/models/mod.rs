pub mod grid;
pub mod payload;
pub mod polarity;
pub mod share;

pub use grid::BitGrid;
pub use payload::{AttendancePayload, AttendanceRecord, ClassId, IntegrityToken};
pub use polarity::{DEFAULT_THRESHOLD, Polarity, SHARE_POLARITY};
pub use share::{Share, SharePair, ShareRole};
