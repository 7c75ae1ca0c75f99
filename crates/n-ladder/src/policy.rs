//! Per-check policy flags.

use bitflags::bitflags;

bitflags! {
    /// How a check counts toward the audit aggregates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Policy: u8 {
        /// Failing this check blocks the optimizer from declaring success,
        /// and its shortfall weighs more in the penalty.
        const MANDATORY = 0b0000_0001;
        /// Left out of the pass rate. Still penalized.
        const EXEMPT    = 0b0000_0010;
    }
}

/// Penalty weight of a mandatory check's shortfall.
pub const MANDATORY_WEIGHT: f64 = 3.0;

impl Policy {
    /// Policy attached to a catalog use name.
    #[must_use]
    pub fn for_use(name: &str) -> Self {
        match name {
            "button-label" | "focus-ring-on-bg" => Self::MANDATORY,
            "disabled-label" | "subtle-fill-edge" => Self::EXEMPT,
            _ => Self::empty(),
        }
    }

    #[must_use]
    pub fn weight(self) -> f64 {
        if self.contains(Self::MANDATORY) { MANDATORY_WEIGHT } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(Policy::for_use("button-label"), Policy::MANDATORY);
        assert_eq!(Policy::for_use("focus-ring-on-bg"), Policy::MANDATORY);
        assert_eq!(Policy::for_use("disabled-label"), Policy::EXEMPT);
        assert_eq!(Policy::for_use("subtle-fill-edge"), Policy::EXEMPT);
        assert!(Policy::for_use("link-on-bg").is_empty());
        assert!(Policy::for_use("focus-ring-on-surface").is_empty());
    }

    #[test]
    fn weights() {
        assert!((Policy::MANDATORY.weight() - 3.0).abs() < f64::EPSILON);
        assert!((Policy::EXEMPT.weight() - 1.0).abs() < f64::EPSILON);
        assert!((Policy::empty().weight() - 1.0).abs() < f64::EPSILON);
    }
}
