//! Day-over-day change of a value series.

/// Current vs. previous value of an oldest-to-newest series.
///
/// Fields are `None` when they cannot be displayed: fewer than two values, or
/// a percent change against a zero previous value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeSummary {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub absolute_delta: Option<f64>,
    pub percent_delta: Option<f64>,
}

impl ChangeSummary {
    /// Builds a summary from the last two entries of `values`.
    pub fn from_series(values: &[f64]) -> Self {
        let current = values.last().copied();
        let previous = values.len().checked_sub(2).map(|i| values[i]);

        let (absolute_delta, percent_delta) = match (current, previous) {
            (Some(current), Some(previous)) => {
                let delta = current - previous;
                let percent = if previous != 0.0 {
                    Some(delta / previous * 100.0).filter(|p| p.is_finite())
                } else {
                    None
                };
                (Some(delta).filter(|d| d.is_finite()), percent)
            }
            _ => (None, None),
        };

        ChangeSummary {
            current,
            previous,
            absolute_delta,
            percent_delta,
        }
    }

    /// True when the series moved up or stayed flat.
    pub fn is_gain(&self) -> bool {
        self.absolute_delta.is_none_or(|d| d >= 0.0)
    }
}
