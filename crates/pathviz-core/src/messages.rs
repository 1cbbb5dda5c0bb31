//! Input modifiers that accompany pointer gestures.

/// Bitmask of modifiers held during a click or drag.
///
/// `SET_START` and `SET_END` are the "place start" / "place end" hold keys;
/// they take precedence over the active selection mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const SET_START: Self = Self(1 << 1);
    pub const SET_END: Self = Self(1 << 2);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Modifiers {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_masks() {
        let m = Modifiers::SHIFT | Modifiers::SET_END;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(m.contains(Modifiers::SET_END));
        assert!(!m.contains(Modifiers::SET_START));
        assert!(Modifiers::NONE.is_empty());
        assert_eq!(m & Modifiers::SHIFT, Modifiers::SHIFT);
    }
}
