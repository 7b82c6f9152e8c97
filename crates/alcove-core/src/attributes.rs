//! The declarative attribute surface of the host element.
//!
//! Six attributes are recognized: the autosize flag, the four size bounds,
//! and the target identity. An absent attribute and an empty string are the
//! same thing everywhere in this module.

use crate::controller::EmbeddingController;
use std::fmt;

/// Attribute names the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeName {
    /// Marker attribute; presence enables autosize.
    Autosize,
    /// Upper height bound.
    MaxHeight,
    /// Upper width bound.
    MaxWidth,
    /// Lower height bound.
    MinHeight,
    /// Lower width bound.
    MinWidth,
    /// Which remote content to load. Settable once.
    Target,
}

impl AttributeName {
    /// Every recognized attribute.
    pub const ALL: [AttributeName; 6] = [
        AttributeName::Autosize,
        AttributeName::MaxHeight,
        AttributeName::MaxWidth,
        AttributeName::MinHeight,
        AttributeName::MinWidth,
        AttributeName::Target,
    ];

    /// The five size-constraint attributes.
    pub const SIZE: [AttributeName; 5] = [
        AttributeName::Autosize,
        AttributeName::MaxHeight,
        AttributeName::MaxWidth,
        AttributeName::MinHeight,
        AttributeName::MinWidth,
    ];

    /// The attribute's name as it appears on the element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Autosize => "autosize",
            Self::MaxHeight => "maxheight",
            Self::MaxWidth => "maxwidth",
            Self::MinHeight => "minheight",
            Self::MinWidth => "minwidth",
            Self::Target => "target",
        }
    }

    /// Parse an attribute name. Unrecognized names yield `None` and are
    /// ignored by the mutation handler.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "autosize" => Some(Self::Autosize),
            "maxheight" => Some(Self::MaxHeight),
            "maxwidth" => Some(Self::MaxWidth),
            "minheight" => Some(Self::MinHeight),
            "minwidth" => Some(Self::MinWidth),
            "target" => Some(Self::Target),
            _ => None,
        }
    }

    /// Whether this is one of the five size-constraint attributes.
    pub fn is_size(&self) -> bool {
        !matches!(self, Self::Target)
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a dimension attribute value. Absent or unparsable values count as
/// zero; negative values are preserved so the caller can treat them as a
/// constraint violation and reset the axis.
pub(crate) fn parse_dimension(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// One entry of the public accessor surface: how the embedder reads a field
/// and how a write flows back through the attribute source.
pub struct Accessor {
    /// The attribute this accessor covers.
    pub name: AttributeName,
    /// Read the current in-memory value, rendered as the element would
    /// carry it. `None` means the attribute is effectively absent.
    pub read: fn(&EmbeddingController) -> Option<String>,
    /// Write through the attribute source; the resulting mutation re-enters
    /// the controller's mutation handler.
    pub write: fn(&mut EmbeddingController, &str),
}

fn read_autosize(c: &EmbeddingController) -> Option<String> {
    c.autosize_enabled().then(|| "on".to_string())
}

fn read_max_height(c: &EmbeddingController) -> Option<String> {
    Some(c.constraints().max.height.to_string())
}

fn read_max_width(c: &EmbeddingController) -> Option<String> {
    Some(c.constraints().max.width.to_string())
}

fn read_min_height(c: &EmbeddingController) -> Option<String> {
    Some(c.constraints().min.height.to_string())
}

fn read_min_width(c: &EmbeddingController) -> Option<String> {
    Some(c.constraints().min.width.to_string())
}

fn read_target(c: &EmbeddingController) -> Option<String> {
    c.target_id().map(str::to_string)
}

fn write_autosize(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::Autosize, value);
}

fn write_max_height(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::MaxHeight, value);
}

fn write_max_width(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::MaxWidth, value);
}

fn write_min_height(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::MinHeight, value);
}

fn write_min_width(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::MinWidth, value);
}

fn write_target(c: &mut EmbeddingController, value: &str) {
    c.set_attribute(AttributeName::Target, value);
}

/// The fixed accessor table for the controller's public fields. Declared
/// statically; nothing is installed or reflected at runtime.
pub const ACCESSORS: [Accessor; 6] = [
    Accessor {
        name: AttributeName::Autosize,
        read: read_autosize,
        write: write_autosize,
    },
    Accessor {
        name: AttributeName::MaxHeight,
        read: read_max_height,
        write: write_max_height,
    },
    Accessor {
        name: AttributeName::MaxWidth,
        read: read_max_width,
        write: write_max_width,
    },
    Accessor {
        name: AttributeName::MinHeight,
        read: read_min_height,
        write: write_min_height,
    },
    Accessor {
        name: AttributeName::MinWidth,
        read: read_min_width,
        write: write_min_width,
    },
    Accessor {
        name: AttributeName::Target,
        read: read_target,
        write: write_target,
    },
];

/// Look up the accessor for an attribute.
pub fn accessor(name: AttributeName) -> &'static Accessor {
    ACCESSORS
        .iter()
        .find(|a| a.name == name)
        .expect("every attribute has an accessor")
}
