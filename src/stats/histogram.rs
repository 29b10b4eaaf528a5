use std::ops::Range;

/// Number of bins used for the marks distribution.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// An unweighted frequency histogram over equal-width bins.
///
/// The bins span the observed value range. Every bin is half-open except the
/// last, which also counts values equal to the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins in ascending order of range.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins spanning the
    /// minimum to the maximum of `values`.
    ///
    /// When every value is the same, the range is widened by 0.5 on each
    /// side so the bins still have a width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gradebook::stats::Histogram;
    /// let histogram = Histogram::equal_width([0.0, 50.0, 100.0], 10);
    /// assert_eq!(histogram.bins.len(), 10);
    /// assert_eq!(histogram.bins[0].count, 1);
    /// assert_eq!(histogram.bins[5].count, 1);
    /// assert_eq!(histogram.bins[9].count, 1);
    /// ```
    #[must_use]
    pub fn equal_width<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();

        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: (lo + width * i as f64)..(lo + width * (i + 1) as f64),
                count: 0,
            })
            .collect::<Vec<_>>();
        // avoid drift on the upper edge
        if let Some(last) = bins.last_mut() {
            last.range.end = hi;
        }

        for v in values {
            let idx = (((v - lo) / width) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
