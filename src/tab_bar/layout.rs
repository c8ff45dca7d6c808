//! Tab bar geometry

/// Horizontal offset of the indicator under tab `index`.
///
/// Returns `None` for an empty bar or an index outside it.
pub fn indicator_position(
    index: usize,
    tab_count: usize,
    total_width: f64,
    indicator_half_width: f64,
) -> Option<f64> {
    if tab_count == 0 || index >= tab_count {
        return None;
    }
    let tab_width = total_width / tab_count as f64;
    Some(tab_width * index as f64 + tab_width / 2.0 - indicator_half_width)
}

/// Measured bar geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub bar_width: f64,
    pub tab_count: usize,
    pub indicator_width: f64,
}

impl BarLayout {
    pub fn new(bar_width: f64, tab_count: usize, indicator_width: f64) -> Self {
        Self {
            bar_width: bar_width.max(0.0),
            tab_count,
            indicator_width: indicator_width.max(0.0),
        }
    }

    pub fn tab_width(&self) -> f64 {
        if self.tab_count == 0 {
            0.0
        } else {
            self.bar_width / self.tab_count as f64
        }
    }

    /// Left edge of slot `index`
    pub fn slot_x(&self, index: usize) -> f64 {
        self.tab_width() * index as f64
    }

    pub fn indicator_x(&self, index: usize) -> Option<f64> {
        indicator_position(index, self.tab_count, self.bar_width, self.indicator_width / 2.0)
    }
}
