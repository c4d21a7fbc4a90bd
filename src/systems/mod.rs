//! Systems - the engine's behaviour, free of any host concerns
//!
//! - speed: displayed speed <-> step interval
//! - validator: counting-field checks and the validity map
//! - font: font-size clamp transforms
//! - animation: the counting state machine and highlight bookkeeping

pub mod animation;
pub mod font;
pub mod speed;
pub mod validator;

pub use animation::{AnimationEngine, AnimationState, Cursor, Highlights, Reconciled, Run, Step};
pub use font::FontScale;
pub use speed::{interval_from_speed, speed_from_interval, SpeedBounds, SpeedSetting};
pub use validator::{check_count, CountRule, ValidityMap, Validator};
