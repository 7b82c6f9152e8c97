//! Size types and the autosize constraint model.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A width/height pair in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Create a new extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The built-in minimum extent used when no smaller bound survives
/// validation: 32x32.
pub const DEFAULT_MIN_EXTENT: Extent = Extent::new(32, 32);

/// Built-in fallback constraints, supplied at controller construction.
///
/// The minimum defaults to [`DEFAULT_MIN_EXTENT`]; the maximum is the
/// embedder's current viewport. A violated constraint axis is restored to
/// these values wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDefaults {
    /// Default minimum extent.
    pub min: Extent,
    /// Default maximum extent (viewport size).
    pub max: Extent,
}

impl SizeDefaults {
    /// Defaults for an embedder whose viewport has the given extent.
    pub fn for_viewport(viewport: Extent) -> Self {
        Self {
            min: DEFAULT_MIN_EXTENT,
            max: viewport,
        }
    }

    /// Validate that the defaults themselves satisfy `min <= max` per axis.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min.width > self.max.width || self.min.height > self.max.height {
            return Err(CoreError::InvalidDefaults {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// The min/max box currently negotiated with the guest.
///
/// Invariant: `min.width <= max.width` and `min.height <= max.height`.
/// Both bounds are unsigned, so non-negativity holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConstraints {
    /// Minimum extent the guest may report.
    pub min: Extent,
    /// Maximum extent the guest may report.
    pub max: Extent,
}

impl SizeConstraints {
    /// Start from the default box.
    pub fn from_defaults(defaults: &SizeDefaults) -> Self {
        Self {
            min: defaults.min,
            max: defaults.max,
        }
    }

    /// Restore both bounds of the width axis to the defaults.
    pub fn reset_width(&mut self, defaults: &SizeDefaults) {
        self.min.width = defaults.min.width;
        self.max.width = defaults.max.width;
    }

    /// Restore both bounds of the height axis to the defaults.
    pub fn reset_height(&mut self, defaults: &SizeDefaults) {
        self.min.height = defaults.min.height;
        self.max.height = defaults.max.height;
    }

    /// Restore any axis whose minimum exceeds its maximum to the defaults.
    ///
    /// Both bounds of the violated axis reset together; nothing is clamped.
    /// Returns true if either axis was reset.
    pub fn reset_if_invalid(&mut self, defaults: &SizeDefaults) -> bool {
        let mut reset = false;
        if self.min.height > self.max.height {
            self.reset_height(defaults);
            reset = true;
        }
        if self.min.width > self.max.width {
            self.reset_width(defaults);
            reset = true;
        }
        reset
    }
}

/// Payload of an autosize update sent to the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSizeRequest {
    /// Whether the guest should report its preferred size and resize
    /// within the box, or render at a fixed size.
    pub enable: bool,
    /// Minimum extent.
    pub min: Extent,
    /// Maximum extent.
    pub max: Extent,
}

/// The most recent size-change notification held back while autosize
/// application is suspended. Only one survives; newer tuples overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredResize {
    /// Proposed new extent.
    pub new: Extent,
    /// Extent before the change, as reported by the guest layer.
    pub old: Extent,
}
