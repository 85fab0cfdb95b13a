use super::BitGrid;

/// Which side of the scheme a share belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareRole {
    /// Session-scoped share held by the teacher, rotated per class
    A,
    /// Student-scoped share, fixed for the lifetime of enrollment
    B,
}

impl ShareRole {
    /// Lowercase suffix used in file names (`shareA` / `shareB`)
    pub fn file_tag(&self) -> &'static str {
        match self {
            ShareRole::A => "shareA",
            ShareRole::B => "shareB",
        }
    }
}

/// A bit grid tagged with its role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Role of this share
    pub role: ShareRole,
    /// Share bits, black = 1 when rendered
    pub grid: BitGrid,
}

impl Share {
    /// Tag a grid with a role
    pub fn new(role: ShareRole, grid: BitGrid) -> Self {
        Self { role, grid }
    }
}

/// The two halves produced by one split of a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePair {
    /// Uniformly random half
    pub a: Share,
    /// `secret XOR a`
    pub b: Share,
}
