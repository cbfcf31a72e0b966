//! Global zoom factor and its mapping onto surfaces.
//!
//! One factor is shared by every tab. A surface at factor `f` is scaled by
//! `f` from its top-left corner and sized to `100 / f` percent of its
//! container, so the scaled box still fills the viewport.
//!
//! # Triggers
//!
//! | Input | Action |
//! |-------|--------|
//! | Ctrl/Meta + `=` `+` `Add` | [`ZoomAction::In`] |
//! | Ctrl/Meta + `-` `_` `Subtract` | [`ZoomAction::Out`] |
//! | Ctrl/Meta + `0` | [`ZoomAction::Reset`] |
//! | Ctrl/Meta + wheel | In for negative delta, Out otherwise |

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use tracing::debug;

use crate::config::ZoomBounds;

// ============================================================================
// Constants
// ============================================================================

/// Factor restored by [`ZoomAction::Reset`].
pub const DEFAULT_ZOOM: f64 = 1.0;

// ============================================================================
// SurfaceTransform
// ============================================================================

/// Anchor point of the scale transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformOrigin {
    /// `0 0`.
    #[default]
    TopLeft,
}

impl TransformOrigin {
    /// Returns the CSS `transform-origin` value.
    #[inline]
    #[must_use]
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::TopLeft => "0 0",
        }
    }
}

/// Visual transform and compensating size for one zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    /// Scale factor.
    pub scale: f64,
    /// Width as a percentage of the container.
    pub width_percent: f64,
    /// Height as a percentage of the container.
    pub height_percent: f64,
    /// Transform anchor.
    pub origin: TransformOrigin,
}

impl SurfaceTransform {
    /// Computes the transform for a factor.
    #[must_use]
    pub fn for_factor(factor: f64) -> Self {
        let percent = (1.0 / factor) * 100.0;
        Self {
            scale: factor,
            width_percent: percent,
            height_percent: percent,
            origin: TransformOrigin::TopLeft,
        }
    }

    /// Returns the CSS `transform` value, e.g. `scale(1.5)`.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// Returns the CSS width value.
    #[must_use]
    pub fn css_width(&self) -> String {
        format!("{}%", self.width_percent)
    }

    /// Returns the CSS height value.
    #[must_use]
    pub fn css_height(&self) -> String {
        format!("{}%", self.height_percent)
    }
}

// ============================================================================
// Input
// ============================================================================

/// Zoom command derived from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    /// One step larger.
    In,
    /// One step smaller.
    Out,
    /// Back to 100%.
    Reset,
}

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Control held.
    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
    };

    /// Meta held.
    pub const META: Self = Self {
        ctrl: false,
        meta: true,
    };

    /// Returns `true` if a zoom modifier is held.
    #[inline]
    #[must_use]
    pub fn zoom_held(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Maps a key press to a zoom action.
///
/// `key` is the DOM `KeyboardEvent.key` value. Returns `None` when the
/// event is not a zoom shortcut and must keep its default behavior.
#[must_use]
pub fn action_for_key(key: &str, modifiers: Modifiers) -> Option<ZoomAction> {
    if !modifiers.zoom_held() {
        return None;
    }
    match key {
        "=" | "+" | "Add" => Some(ZoomAction::In),
        "-" | "_" | "Subtract" => Some(ZoomAction::Out),
        "0" => Some(ZoomAction::Reset),
        _ => None,
    }
}

/// Maps a wheel tick to a zoom action.
///
/// Negative `delta_y` (scrolling up) zooms in.
#[must_use]
pub fn action_for_wheel(delta_y: f64, modifiers: Modifiers) -> Option<ZoomAction> {
    if !modifiers.zoom_held() {
        return None;
    }
    if delta_y < 0.0 {
        Some(ZoomAction::In)
    } else {
        Some(ZoomAction::Out)
    }
}

// ============================================================================
// ZoomController
// ============================================================================

/// Owner of the process-wide zoom factor.
#[derive(Debug)]
pub struct ZoomController {
    /// Limits and step.
    bounds: ZoomBounds,
    /// Current factor.
    factor: Mutex<f64>,
}

impl ZoomController {
    /// Creates a controller at 100%.
    #[must_use]
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            bounds,
            factor: Mutex::new(DEFAULT_ZOOM.clamp(bounds.min, bounds.max)),
        }
    }

    /// Returns the current factor.
    #[inline]
    #[must_use]
    pub fn factor(&self) -> f64 {
        *self.factor.lock()
    }

    /// Returns the transform for the current factor.
    #[inline]
    #[must_use]
    pub fn transform(&self) -> SurfaceTransform {
        SurfaceTransform::for_factor(self.factor())
    }

    /// Clamps and stores a requested factor, returning the stored value.
    ///
    /// Non-finite requests leave the factor unchanged.
    pub fn set(&self, requested: f64) -> f64 {
        let mut factor = self.factor.lock();
        if requested.is_finite() {
            *factor = self.clamp(requested);
        }
        debug!(requested, factor = *factor, "Zoom set");
        *factor
    }

    /// Applies a zoom action, returning the stored factor.
    pub fn apply(&self, action: ZoomAction) -> f64 {
        let current = self.factor();
        let next = match action {
            ZoomAction::In => round_step(current + self.bounds.step),
            ZoomAction::Out => round_step(current - self.bounds.step),
            ZoomAction::Reset => DEFAULT_ZOOM,
        };
        self.set(next)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.bounds.min, self.bounds.max)
    }
}

/// Rounds a stepped factor to hundredths so repeated steps do not drift.
fn round_step(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
