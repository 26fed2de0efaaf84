use std::ops::RangeInclusive;

use crate::errors::AlignError;

/// Restricts the DP to the cells at most `off_diagonal` positions away from the main
/// diagonal. Without a limit, every cell of the matrix is computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Band {
    off_diagonal: Option<usize>,
    len1: usize,
    len2: usize,
}

impl Band {
    /// Fails if the band can't reach the cell `(len1, len2)`.
    pub fn new(off_diagonal: Option<usize>, len1: usize, len2: usize) -> Result<Self, AlignError> {
        if let Some(off_diagonal) = off_diagonal {
            if off_diagonal < len1.abs_diff(len2) {
                return Err(AlignError::BandTooNarrow { off_diagonal, len1, len2 });
            }
        }

        Ok(Self { off_diagonal, len1, len2 })
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.off_diagonal.is_none()
    }

    /// Valid columns of DP row `row`
    #[inline]
    pub fn columns(&self, row: usize) -> RangeInclusive<usize> {
        match self.off_diagonal {
            None => 0..=self.len2,
            Some(d) => row.saturating_sub(d)..=row.saturating_add(d).min(self.len2),
        }
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row <= self.len1 && self.columns(row).contains(&col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded() {
        let band = Band::new(None, 5, 2).unwrap();

        assert!(band.is_unbounded());
        assert_eq!(band.columns(0), 0..=2);
        assert_eq!(band.columns(5), 0..=2);
    }

    #[test]
    fn test_windows() {
        let band = Band::new(Some(2), 6, 5).unwrap();

        assert_eq!(band.columns(0), 0..=2);
        assert_eq!(band.columns(1), 0..=3);
        assert_eq!(band.columns(3), 1..=5);
        assert_eq!(band.columns(6), 4..=5);
        assert!(band.contains(6, 5));
        assert!(!band.contains(0, 3));
        assert!(!band.contains(7, 5));
    }

    #[test]
    fn test_band_too_narrow() {
        let result = Band::new(Some(1), 7, 4);
        assert!(matches!(result, Err(AlignError::BandTooNarrow { off_diagonal: 1, len1: 7, len2: 4 })));

        assert!(Band::new(Some(3), 7, 4).is_ok());
        assert!(Band::new(Some(0), 4, 4).is_ok());
    }
}
