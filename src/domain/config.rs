//! Static configuration for the count-along grid
//!
//! Every knob the widget exposes lives here as a named constant. `GridOptions`
//! bundles them so the page can override a subset from JSON at startup:
//!
//! ```text
//! init_cell_count          initial number of cells in the grid
//! init_multiple            initial multiple to count along in
//! init_compute_columns     derive the column count from the cell count
//! init_column_count        column count used when columns are not computed
//! init_show_high_multiple  show the "highest multiple" label
//! min_speed / max_speed    bounds of the displayed speed scale
//! speed_step               speed change for the up/down buttons
//! min_interval_ms / max_interval_ms  bounds of the step interval
//! default_interval_ms      step interval after a speed reset
//! font_*                   font-size clamp parameters and step size
//! column_leeway            search radius around sqrt(cells) for exact layouts
//! max_cell_count           absolute maximum number of cells
//! max_column_input         absolute maximum user-entered column count
//! max_columns              column cap before any breakpoint signal arrives
//! ```

use serde::Deserialize;

pub const INIT_CELL_COUNT: u32 = 100;
pub const INIT_MULTIPLE: u32 = 5;
pub const INIT_COMPUTE_COLUMNS: bool = true;
// Only used when columns are not computed on initialisation
pub const INIT_COLUMN_COUNT: u32 = 10;
pub const INIT_SHOW_HIGH_MULTIPLE: bool = true;

// Speed 52 <-> 633ms, speed 50 <-> 656ms (660ms reads back as 50)
pub const DEFAULT_INTERVAL_MS: u32 = 660;
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 100;
pub const SPEED_STEP: i32 = 10;
pub const MIN_INTERVAL_MS: u32 = 100;
pub const MAX_INTERVAL_MS: u32 = 1200;

/// Default font size: clamp(0.9rem, 2.0cqi + 0.4rem, 2.0rem)
pub const FONT_SIZE_MIN: f64 = 0.9; // rem
pub const FONT_SIZE_SLOPE: f64 = 2.0; // cqi
pub const FONT_SIZE_INTERCEPT: f64 = 0.4; // rem
pub const FONT_SIZE_MAX: f64 = 2.0; // rem
pub const FONT_SIZE_STEP_PCT: f64 = 10.0;
pub const FONT_SIZE_FLOOR: f64 = 0.6; // rem
pub const FONT_SIZE_CEILING: f64 = 6.0; // rem

pub const COLUMN_LEEWAY: u32 = 6;
pub const MAX_CELL_COUNT: u32 = 4000;
pub const MAX_COLUMN_INPUT: u32 = 110;
pub const DEFAULT_MAX_COLUMNS: u32 = 12;

/// Horizontal cell padding (em), must match the stylesheet
pub const CELL_HORZ_PADDING: f64 = 0.1;
/// Slack on each side of a cell's number (em)
pub const CELL_HORZ_SLACK: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub init_cell_count: u32,
    pub init_multiple: u32,
    pub init_compute_columns: bool,
    pub init_column_count: u32,
    pub init_show_high_multiple: bool,
    pub min_speed: u32,
    pub max_speed: u32,
    pub speed_step: i32,
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
    pub default_interval_ms: u32,
    pub font_size_min: f64,
    pub font_size_slope: f64,
    pub font_size_intercept: f64,
    pub font_size_max: f64,
    pub font_size_step_pct: f64,
    pub font_size_floor: f64,
    pub font_size_ceiling: f64,
    pub column_leeway: u32,
    pub max_cell_count: u32,
    pub max_column_input: u32,
    pub max_columns: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            init_cell_count: INIT_CELL_COUNT,
            init_multiple: INIT_MULTIPLE,
            init_compute_columns: INIT_COMPUTE_COLUMNS,
            init_column_count: INIT_COLUMN_COUNT,
            init_show_high_multiple: INIT_SHOW_HIGH_MULTIPLE,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            speed_step: SPEED_STEP,
            min_interval_ms: MIN_INTERVAL_MS,
            max_interval_ms: MAX_INTERVAL_MS,
            default_interval_ms: DEFAULT_INTERVAL_MS,
            font_size_min: FONT_SIZE_MIN,
            font_size_slope: FONT_SIZE_SLOPE,
            font_size_intercept: FONT_SIZE_INTERCEPT,
            font_size_max: FONT_SIZE_MAX,
            font_size_step_pct: FONT_SIZE_STEP_PCT,
            font_size_floor: FONT_SIZE_FLOOR,
            font_size_ceiling: FONT_SIZE_CEILING,
            column_leeway: COLUMN_LEEWAY,
            max_cell_count: MAX_CELL_COUNT,
            max_column_input: MAX_COLUMN_INPUT,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl GridOptions {
    /// Parse a (possibly partial) JSON object of overrides on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let options: GridOptions = serde_json::from_str(json).map_err(|e| e.to_string())?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_speed == 0 || self.min_speed >= self.max_speed {
            return Err(format!(
                "speed bounds must satisfy 0 < min < max (got {}..{})",
                self.min_speed, self.max_speed
            ));
        }
        if self.min_interval_ms == 0 || self.min_interval_ms >= self.max_interval_ms {
            return Err(format!(
                "interval bounds must satisfy 0 < min < max (got {}..{})",
                self.min_interval_ms, self.max_interval_ms
            ));
        }
        if self.default_interval_ms < self.min_interval_ms
            || self.default_interval_ms > self.max_interval_ms
        {
            return Err(format!(
                "default interval {} is outside {}..{}",
                self.default_interval_ms, self.min_interval_ms, self.max_interval_ms
            ));
        }
        if self.max_cell_count == 0 || self.max_column_input == 0 || self.max_columns == 0 {
            return Err("cell and column caps must be positive".to_string());
        }
        if self.init_cell_count == 0 || self.init_cell_count > self.max_cell_count {
            return Err(format!(
                "initial cell count {} is outside 1..{}",
                self.init_cell_count, self.max_cell_count
            ));
        }
        if self.init_multiple == 0 || self.init_column_count == 0 {
            return Err("initial multiple and column count must be positive".to_string());
        }
        if !(self.font_size_floor > 0.0 && self.font_size_floor < self.font_size_ceiling) {
            return Err("font size floor must be positive and below the ceiling".to_string());
        }
        Ok(())
    }
}
