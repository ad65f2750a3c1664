//! Attachment directions and the pairing rule between them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Facing of an attachment point.
///
/// The discriminants are chosen so that two directions pair up exactly when
/// their codes sum to 3: `Up` with `Down`, `Left` with `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum AttachDirection {
    Up = 0,
    Left = 1,
    Right = 2,
    Down = 3,
}

impl AttachDirection {
    pub const ALL: [AttachDirection; 4] = [
        AttachDirection::Up,
        AttachDirection::Left,
        AttachDirection::Right,
        AttachDirection::Down,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether a point facing `self` can bond with a point facing `other`
    #[inline]
    pub const fn matches(self, other: AttachDirection) -> bool {
        self.code() + other.code() == 3
    }

    pub const fn opposite(self) -> AttachDirection {
        match self {
            AttachDirection::Up => AttachDirection::Down,
            AttachDirection::Down => AttachDirection::Up,
            AttachDirection::Left => AttachDirection::Right,
            AttachDirection::Right => AttachDirection::Left,
        }
    }
}

impl fmt::Display for AttachDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttachDirection::Up => "up",
            AttachDirection::Left => "left",
            AttachDirection::Right => "right",
            AttachDirection::Down => "down",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttachDirection::*;

    #[test]
    fn test_codes() {
        assert_eq!(Up.code(), 0);
        assert_eq!(Left.code(), 1);
        assert_eq!(Right.code(), 2);
        assert_eq!(Down.code(), 3);
    }

    #[test]
    fn test_only_opposites_match() {
        for a in AttachDirection::ALL {
            for b in AttachDirection::ALL {
                assert_eq!(a.matches(b), b == a.opposite(), "{a} vs {b}");
                assert_eq!(a.matches(b), b.matches(a), "symmetry {a} vs {b}");
            }
            assert!(!a.matches(a), "{a} must not match itself");
        }
    }

    #[test]
    fn test_cross_axis_never_matches() {
        assert!(!Up.matches(Left));
        assert!(!Up.matches(Right));
        assert!(!Down.matches(Left));
        assert!(!Down.matches(Right));
    }
}
