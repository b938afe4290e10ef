//! Pane bounds and responsive default sizes (percent of the container)

use serde::Serialize;

/// Viewports at or below this width get the compact triple.
pub const COMPACT_BREAKPOINT: u32 = 1366;

/// Allowed size range for one pane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaneBounds {
    pub min: f32,
    pub max: f32,
}

impl PaneBounds {
    pub const SIDE: PaneBounds = PaneBounds { min: 10.0, max: 26.0 };
    pub const CENTER: PaneBounds = PaneBounds { min: 40.0, max: 100.0 };

    pub fn clamp(&self, percent: f32) -> f32 {
        percent.clamp(self.min, self.max)
    }
}

/// Default sizes for left / center / right
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeTriple {
    pub left: f32,
    pub center: f32,
    pub right: f32,
}

impl SizeTriple {
    pub const COMPACT: SizeTriple = SizeTriple {
        left: 20.0,
        center: 60.0,
        right: 20.0,
    };

    pub const COMFORTABLE: SizeTriple = SizeTriple {
        left: 18.0,
        center: 64.0,
        right: 18.0,
    };

    /// Pick the triple for a viewport measured once at mount. The boundary
    /// width is compact.
    pub fn for_viewport(width: u32) -> Self {
        if width <= COMPACT_BREAKPOINT {
            Self::COMPACT
        } else {
            Self::COMFORTABLE
        }
    }
}
