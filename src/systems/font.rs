//! Grid font size as a CSS `clamp(min, slope·cqi + intercept, max)`.

use serde::Serialize;

use crate::domain::config::GridOptions;

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FontScale {
    pub min_rem: f64,
    pub slope_cqi: f64,
    pub intercept_rem: f64,
    pub max_rem: f64,
}

impl FontScale {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            min_rem: options.font_size_min,
            slope_cqi: options.font_size_slope,
            intercept_rem: options.font_size_intercept,
            max_rem: options.font_size_max,
        }
    }

    /// Scale every term by `1 + pct / 100`. The change is dropped (returns
    /// false) if the new min would fall below `floor` or the new max rise
    /// above `ceiling`.
    pub fn step(&mut self, pct: f64, floor: f64, ceiling: f64) -> bool {
        let fac = 1.0 + pct / 100.0;
        let next_min = fac * self.min_rem;
        let next_max = fac * self.max_rem;

        if next_min < floor || next_max > ceiling {
            log::debug!(
                "font step {}% ignored: {:.3}..{:.3} outside {}..{}",
                pct,
                next_min,
                next_max,
                floor,
                ceiling
            );
            return false;
        }

        self.min_rem = round3(next_min);
        self.slope_cqi = round3(fac * self.slope_cqi);
        self.intercept_rem = round3(fac * self.intercept_rem);
        self.max_rem = round3(next_max);
        true
    }

    pub fn clamp_css(&self) -> String {
        format!(
            "clamp({}rem, {}cqi + {}rem, {}rem)",
            self.min_rem, self.slope_cqi, self.intercept_rem, self.max_rem
        )
    }
}
