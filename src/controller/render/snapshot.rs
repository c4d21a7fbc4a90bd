//! Everything the view shows that is not carried by render events.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::config::{CELL_HORZ_PADDING, CELL_HORZ_SLACK};
use crate::domain::fields::{FieldError, FieldKey};
use crate::domain::state::GridState;
use crate::env::Ticker;
use crate::systems::{Cursor, SpeedSetting, ValidityMap};

use super::layout::{self, HighMultiple};
use super::{GridConfiguration, GridController};

/// Labels and enabled/visible flags for the run and configuration controls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start_label: &'static str,
    pub start_enabled: bool,
    pub pause_label: &'static str,
    pub pause_enabled: bool,
    pub pause_visible: bool,
    /// Continue is waiting for the user.
    pub pause_attention: bool,
    pub clear_enabled: bool,
    pub clear_visible: bool,
    pub config_inputs_enabled: bool,
    pub column_input_enabled: bool,
    pub settings_enabled: bool,
    pub fields_enabled: BTreeMap<FieldKey, bool>,
}

impl Controls {
    pub fn derive(state: GridState, validity: &ValidityMap, columns_are_computed: bool) -> Self {
        let all_valid = validity.all_valid();
        let running = matches!(
            state,
            GridState::Animate | GridState::Continue | GridState::Restart
        );
        let paused = state == GridState::Pause;
        let complete = state == GridState::Complete;

        let config_inputs_enabled = !running;
        let mut fields_enabled = BTreeMap::new();
        for key in FieldKey::ORDER {
            let enabled = if all_valid {
                match key {
                    FieldKey::Speed => true,
                    FieldKey::ColumnCount => config_inputs_enabled && !columns_are_computed,
                    _ => config_inputs_enabled,
                }
            } else {
                // Only the broken fields stay editable
                !validity.is_valid(key)
            };
            fields_enabled.insert(key, enabled);
        }

        Self {
            start_label: if paused || complete { "Restart" } else { "Start" },
            start_enabled: all_valid && !running,
            pause_label: if paused { "Continue" } else { "Stop" },
            pause_enabled: all_valid && (running || paused),
            pause_visible: running || paused,
            pause_attention: paused,
            clear_enabled: all_valid && (paused || complete),
            clear_visible: paused || complete,
            config_inputs_enabled: config_inputs_enabled && all_valid,
            column_input_enabled: fields_enabled
                .get(&FieldKey::ColumnCount)
                .copied()
                .unwrap_or(false),
            settings_enabled: all_valid,
            fields_enabled,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub config: GridConfiguration,
    pub state: GridState,
    pub cursor: Cursor,
    pub highlighted: Vec<u32>,
    pub validity: ValidityMap,
    pub errors: Vec<FieldError>,
    pub field_values: BTreeMap<FieldKey, String>,
    pub focus: Option<FieldKey>,
    pub controls: Controls,
    pub speed: SpeedSetting,
    pub interval_ms: u32,
    pub font_size: String,
    pub show_high_multiple: bool,
    pub high_multiple: Option<HighMultiple>,
    pub rows_label: Option<String>,
    pub template_columns: Option<String>,
    pub breakpoint_class: Option<&'static str>,
}

pub(super) fn build<T: Ticker>(grid: &GridController<T>) -> Snapshot {
    let validity = grid.validator.map();
    let config = &grid.config;
    let counts_valid =
        validity.is_valid(FieldKey::CellCount) && validity.is_valid(FieldKey::Multiple);

    let high_multiple = (grid.show_high_multiple && counts_valid)
        .then(|| layout::high_multiple_pair(config.multiple, config.cell_count));
    let rows_label = config
        .row_count
        .filter(|_| counts_valid)
        .map(layout::rows_label);
    let template_columns = config
        .column_count
        .filter(|_| config.row_count.is_some())
        .map(|columns| {
            layout::template_columns(columns, config.cell_count, CELL_HORZ_SLACK, CELL_HORZ_PADDING)
        });

    Snapshot {
        config: config.clone(),
        state: grid.anim.state,
        cursor: grid.anim.cursor,
        highlighted: grid.anim.highlights.to_vec(),
        validity: validity.clone(),
        errors: validity.errors(),
        field_values: grid.field_values.clone(),
        focus: grid.focus,
        controls: Controls::derive(grid.anim.state, validity, config.columns_are_computed),
        speed: grid.speed,
        interval_ms: grid.speed.interval_ms(),
        font_size: grid.font.clamp_css(),
        show_high_multiple: grid.show_high_multiple,
        high_multiple,
        rows_label,
        template_columns,
        breakpoint_class: grid.breakpoint.map(|bp| bp.class_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{CountRule, Validator};

    fn valid_map() -> ValidityMap {
        Validator::new().map().clone()
    }

    #[test]
    fn idle_controls_offer_start_only() {
        let controls = Controls::derive(GridState::Initialise, &valid_map(), true);
        assert_eq!(controls.start_label, "Start");
        assert!(controls.start_enabled);
        assert!(!controls.pause_visible);
        assert!(!controls.clear_visible);
        assert!(controls.config_inputs_enabled);
        assert!(!controls.column_input_enabled);
    }

    #[test]
    fn running_freezes_configuration() {
        let controls = Controls::derive(GridState::Animate, &valid_map(), false);
        assert!(!controls.start_enabled);
        assert_eq!(controls.pause_label, "Stop");
        assert!(controls.pause_enabled);
        assert!(!controls.config_inputs_enabled);
        assert!(!controls.fields_enabled[&FieldKey::CellCount]);
        assert!(controls.fields_enabled[&FieldKey::Speed]);
    }

    #[test]
    fn paused_offers_continue_restart_and_clear() {
        let controls = Controls::derive(GridState::Pause, &valid_map(), true);
        assert_eq!(controls.start_label, "Restart");
        assert_eq!(controls.pause_label, "Continue");
        assert!(controls.pause_attention);
        assert!(controls.clear_enabled);
    }

    #[test]
    fn complete_hides_pause() {
        let controls = Controls::derive(GridState::Complete, &valid_map(), true);
        assert_eq!(controls.start_label, "Restart");
        assert!(!controls.pause_enabled);
        assert!(!controls.pause_visible);
        assert!(controls.clear_visible);
    }

    #[test]
    fn invalid_field_is_the_only_editable_one() {
        let mut validator = Validator::new();
        let _ = validator.validate_count_field(FieldKey::Multiple, "abc", &CountRule::max(Some(100)));
        let controls = Controls::derive(GridState::InputErr, validator.map(), true);
        assert!(!controls.start_enabled);
        assert!(!controls.settings_enabled);
        assert!(controls.fields_enabled[&FieldKey::Multiple]);
        assert!(!controls.fields_enabled[&FieldKey::CellCount]);
        assert!(!controls.fields_enabled[&FieldKey::Speed]);
    }
}
