//! Two-asset price history.

use serde::Serialize;
use std::fmt;

use super::date::Date;
use crate::error::{CoreError, CoreResult};

/// One of the two legs of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Asset {
    /// First asset.
    A,
    /// Second asset.
    B,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::A => write!(f, "A"),
            Asset::B => write!(f, "B"),
        }
    }
}

/// Index-aligned daily prices of two assets.
///
/// Invariant: `dates`, `prices_a` and `prices_b` have the same length and
/// `dates` is strictly ascending. Both are checked at construction, so every
/// `PriceHistory` in circulation is aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistory {
    dates: Vec<Date>,
    prices_a: Vec<f64>,
    prices_b: Vec<f64>,
}

impl PriceHistory {
    /// Creates a validated price history.
    ///
    /// # Errors
    ///
    /// - `CoreError::InputLengthMismatch` if the three series differ in length.
    /// - `CoreError::DatesNotAscending` if a date does not follow its predecessor.
    pub fn new(dates: Vec<Date>, prices_a: Vec<f64>, prices_b: Vec<f64>) -> CoreResult<Self> {
        if prices_b.len() != prices_a.len() {
            return Err(CoreError::length_mismatch(
                "prices of asset B vs asset A",
                prices_a.len(),
                prices_b.len(),
            ));
        }
        if dates.len() != prices_a.len() {
            return Err(CoreError::length_mismatch(
                "dates vs prices",
                prices_a.len(),
                dates.len(),
            ));
        }
        if let Some(index) = dates.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(CoreError::DatesNotAscending {
                index: index + 1,
                previous: dates[index].to_string(),
                next: dates[index + 1].to_string(),
            });
        }

        Ok(Self {
            dates,
            prices_a,
            prices_b,
        })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the history holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Prices of `asset`.
    #[must_use]
    pub fn prices(&self, asset: Asset) -> &[f64] {
        match asset {
            Asset::A => &self.prices_a,
            Asset::B => &self.prices_b,
        }
    }

    /// First date, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Last date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Price sub-slices `[start, start + len)` of both assets.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::WindowOutOfRange` if the window does not fit.
    pub fn window(&self, start: usize, len: usize) -> CoreResult<PriceWindow<'_>> {
        let end = start.checked_add(len).filter(|&end| end <= self.len());
        match end {
            Some(end) => Ok(PriceWindow {
                start,
                prices_a: &self.prices_a[start..end],
                prices_b: &self.prices_b[start..end],
            }),
            None => Err(CoreError::WindowOutOfRange {
                start,
                end: start.saturating_add(len),
                len: self.len(),
            }),
        }
    }

    /// Rolling price windows of length `len`, advanced one observation at a
    /// time.
    ///
    /// Yields `self.len() - len` windows (window `i` covers `[i, i + len)`),
    /// so the final full window is not produced: every window leaves at
    /// least one later observation. Yields nothing when `len >= self.len()`.
    pub fn rolling_windows(&self, len: usize) -> impl Iterator<Item = PriceWindow<'_>> + '_ {
        let count = self.len().saturating_sub(len);
        (0..count).map_while(move |start| self.window(start, len).ok())
    }
}

/// A borrowed window of both price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceWindow<'a> {
    /// Index of the first observation in the parent history.
    pub start: usize,
    /// Prices of asset A inside the window.
    pub prices_a: &'a [f64],
    /// Prices of asset B inside the window.
    pub prices_b: &'a [f64],
}

impl PriceWindow<'_> {
    /// Number of observations in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices_a.len()
    }

    /// Returns true if the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices_a.is_empty()
    }

    /// Prices of `asset` inside the window.
    #[must_use]
    pub fn prices(&self, asset: Asset) -> &[f64] {
        match asset {
            Asset::A => self.prices_a,
            Asset::B => self.prices_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<Date> {
        (0..n)
            .map(|i| Date::from_ymd(2024, 1, 1 + i as u32).unwrap())
            .collect()
    }

    #[test]
    fn test_new_valid() {
        let history = PriceHistory::new(dates(3), vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap();
        assert_eq!(history.len(), 3);
        assert!(!history.is_empty());
        assert_eq!(history.prices(Asset::B), &[4.0, 5.0, 6.0]);
        assert_eq!(history.first_date(), Some(Date::from_ymd(2024, 1, 1).unwrap()));
        assert_eq!(history.last_date(), Some(Date::from_ymd(2024, 1, 3).unwrap()));
    }

    #[test]
    fn test_price_length_mismatch() {
        let err = PriceHistory::new(dates(3), vec![1.0, 2.0, 3.0], vec![4.0, 5.0]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InputLengthMismatch {
                what: "prices of asset B vs asset A".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_date_length_mismatch() {
        let err = PriceHistory::new(dates(2), vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap_err();
        assert!(matches!(err, CoreError::InputLengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_dates_not_ascending() {
        let mut d = dates(3);
        d.swap(1, 2);
        let err = PriceHistory::new(d, vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap_err();
        assert!(matches!(err, CoreError::DatesNotAscending { index: 2, .. }));

        let mut dup = dates(3);
        dup[2] = dup[1];
        assert!(PriceHistory::new(dup, vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).is_err());
    }

    #[test]
    fn test_window() {
        let history = PriceHistory::new(
            dates(5),
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![10.0, 20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();

        let window = history.window(1, 3).unwrap();
        assert_eq!(window.start, 1);
        assert_eq!(window.prices(Asset::A), &[2.0, 3.0, 4.0]);
        assert_eq!(window.prices(Asset::B), &[20.0, 30.0, 40.0]);

        assert!(history.window(3, 3).is_err());
        assert!(history.window(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_rolling_windows() {
        let history = PriceHistory::new(
            dates(5),
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![10.0, 20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();

        let windows: Vec<_> = history.rolling_windows(3).collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].prices_a, &[1.0, 2.0, 3.0]);
        assert_eq!(windows[1].prices_a, &[2.0, 3.0, 4.0]);
        assert_eq!(windows[1].start, 1);
        for window in &windows {
            assert_eq!(*window, history.window(window.start, 3).unwrap());
        }

        assert_eq!(history.rolling_windows(5).count(), 0);
        assert_eq!(history.rolling_windows(9).count(), 0);
    }
}
