use serde::Serialize;

/// Viewport size classes, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Breakpoint {
    Tiny,
    Diminutive,
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Tiny,
        Breakpoint::Diminutive,
        Breakpoint::Small,
        Breakpoint::Medium,
        Breakpoint::Large,
    ];

    /// Minimum viewport width (px) at which this class applies.
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Tiny => 0,
            Breakpoint::Diminutive => 451,
            Breakpoint::Small => 751,
            Breakpoint::Medium => 1051,
            Breakpoint::Large => 1351,
        }
    }

    /// Column cap for computed layouts at this size.
    pub fn max_columns(self) -> u32 {
        match self {
            Breakpoint::Tiny => 6,
            Breakpoint::Diminutive => 8,
            Breakpoint::Small => 10,
            Breakpoint::Medium => 12,
            Breakpoint::Large => 25,
        }
    }

    /// CSS class the view puts on the grid element.
    pub fn class_name(self) -> &'static str {
        match self {
            Breakpoint::Tiny => "grid--tiny-1",
            Breakpoint::Diminutive => "grid--diminutive-1",
            Breakpoint::Small => "grid--small-1",
            Breakpoint::Medium => "grid--medium-1",
            Breakpoint::Large => "grid--large-1",
        }
    }

    /// Largest class whose minimum width the viewport reaches.
    pub fn from_viewport_width(width_px: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| width_px >= bp.min_width())
            .unwrap_or(Breakpoint::Tiny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_map_to_classes() {
        assert_eq!(Breakpoint::from_viewport_width(320), Breakpoint::Tiny);
        assert_eq!(Breakpoint::from_viewport_width(450), Breakpoint::Tiny);
        assert_eq!(Breakpoint::from_viewport_width(451), Breakpoint::Diminutive);
        assert_eq!(Breakpoint::from_viewport_width(1050), Breakpoint::Small);
        assert_eq!(Breakpoint::from_viewport_width(1200), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_viewport_width(2560), Breakpoint::Large);
    }

    #[test]
    fn caps_grow_with_width() {
        let caps: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.max_columns()).collect();
        assert_eq!(caps, vec![6, 8, 10, 12, 25]);
    }
}
