//! Build-time limits applied while decoding.

use crate::Error;
use core::ops::{Bound, RangeBounds};

/// Bounds the element count a length-prefixed codec accepts when decoding.
///
/// Counts are checked before anything is allocated, so a corrupt or hostile prefix cannot
/// force a large allocation.
///
/// ```
/// use weft_codec::RangeCfg;
///
/// let cfg = RangeCfg::new(1..=1024);
/// assert!(cfg.contains(500));
/// assert!(!cfg.contains(0));
/// assert!(RangeCfg::unbounded().contains(usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RangeCfg {
    /// Creates a limit from any range of counts.
    pub fn new(range: impl RangeBounds<usize>) -> Self {
        Self {
            start: range.start_bound().cloned(),
            end: range.end_bound().cloned(),
        }
    }

    /// Accepts every count.
    pub const fn unbounded() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }

    /// Accepts only `count`.
    pub const fn exact(count: usize) -> Self {
        Self {
            start: Bound::Included(count),
            end: Bound::Included(count),
        }
    }

    /// Returns true if `count` is within the limit.
    pub fn contains(&self, count: usize) -> bool {
        (self.start, self.end).contains(&count)
    }

    /// Largest count within the limit, if there is one.
    pub fn max(&self) -> Option<usize> {
        match self.end {
            Bound::Included(end) => Some(end),
            Bound::Excluded(end) => Some(end.saturating_sub(1)),
            Bound::Unbounded => None,
        }
    }

    /// Passes `count` through if it is within the limit.
    pub fn check(&self, count: usize) -> Result<usize, Error> {
        if !self.contains(count) {
            return Err(Error::InvalidLength(count));
        }
        Ok(count)
    }
}

impl RangeBounds<usize> for RangeCfg {
    fn start_bound(&self) -> Bound<&usize> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&usize> {
        self.end.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RangeCfg::unbounded(), 0, true; "unbounded zero")]
    #[test_case(RangeCfg::unbounded(), usize::MAX, true; "unbounded max")]
    #[test_case(RangeCfg::new(5..10), 4, false; "below start")]
    #[test_case(RangeCfg::new(5..10), 5, true; "inclusive start")]
    #[test_case(RangeCfg::new(5..10), 10, false; "exclusive end")]
    #[test_case(RangeCfg::new(5..=10), 10, true; "inclusive end")]
    #[test_case(RangeCfg::new(..=3), 3, true; "end only")]
    #[test_case(RangeCfg::exact(2), 2, true; "exact hit")]
    #[test_case(RangeCfg::exact(2), 3, false; "exact miss")]
    fn test_contains(cfg: RangeCfg, count: usize, expected: bool) {
        assert_eq!(cfg.contains(count), expected);
    }

    #[test]
    fn test_check() {
        let cfg = RangeCfg::new(..4);
        assert_eq!(cfg.check(3).unwrap(), 3);
        assert!(matches!(cfg.check(4), Err(Error::InvalidLength(4))));
        assert_eq!(RangeCfg::default(), RangeCfg::unbounded());
    }

    #[test_case(RangeCfg::unbounded(), None; "unbounded")]
    #[test_case(RangeCfg::new(1..), None; "start only")]
    #[test_case(RangeCfg::new(..10), Some(9); "exclusive end")]
    #[test_case(RangeCfg::new(..=10), Some(10); "inclusive end")]
    #[test_case(RangeCfg::new(..0), Some(0); "empty")]
    fn test_max(cfg: RangeCfg, expected: Option<usize>) {
        assert_eq!(cfg.max(), expected);
    }
}
