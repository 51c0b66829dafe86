//! 3DFACE invisible edge flags

use bitflags::bitflags;

bitflags! {
    /// Edges of a 3DFACE that are hidden (group code 70).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: i16 {
        /// First edge (corner 1 to corner 2) is invisible.
        const FIRST = 0x1;
        /// Second edge is invisible.
        const SECOND = 0x2;
        /// Third edge is invisible.
        const THIRD = 0x4;
        /// Fourth edge (corner 4 back to corner 1) is invisible.
        const FOURTH = 0x8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(InvisibleEdgeFlags::default().is_empty());
    }

    #[test]
    fn test_combined_bits() {
        let flags = InvisibleEdgeFlags::FIRST | InvisibleEdgeFlags::FOURTH;
        assert_eq!(flags.bits(), 9);
    }
}
