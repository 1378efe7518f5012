//! Geometry primitives produced by a page source.
//!
//! Coordinates follow the PDF convention: origin at the bottom-left of the
//! page, larger y closer to the top. All values are in page units (points).

/// A positioned glyph run with its bounding box.
#[derive(Debug, Clone)]
pub struct Char {
    /// Decoded text of the run
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Bottom edge (vertical start)
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl Char {
    /// Create a glyph run from its decoded text and bounding box.
    pub fn new(text: impl Into<String>, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            y0,
            x1,
            y1,
        }
    }

    /// Horizontal center of the bounding box.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Vertical center of the bounding box.
    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }
}

/// An image placement on a page, with its display bounding box.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    /// XObject resource name (e.g., "Im1")
    pub name: String,
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl PlacedImage {
    /// Create an image placement from its resource name and bounding box.
    pub fn new(name: impl Into<String>, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            name: name.into(),
            x0,
            y0,
            x1,
            y1,
        }
    }

    /// Placed display width.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Placed display height.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Orientation of a ruling line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulingKind {
    Horizontal,
    Vertical,
}

/// An axis-aligned ruling line segment drawn on a page.
///
/// Horizontal rulings run along `position` on the y axis from `start` to
/// `end` on the x axis; vertical rulings the other way around.
#[derive(Debug, Clone)]
pub struct Ruling {
    pub kind: RulingKind,
    /// Fixed coordinate: y for horizontal rulings, x for vertical ones
    pub position: f32,
    /// Lower bound of the varying coordinate
    pub start: f32,
    /// Upper bound of the varying coordinate
    pub end: f32,
}

impl Ruling {
    /// A horizontal segment at height `y`, spanning `x0..x1`.
    pub fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Self {
            kind: RulingKind::Horizontal,
            position: y,
            start: x0.min(x1),
            end: x0.max(x1),
        }
    }

    /// A vertical segment at `x`, spanning `y0..y1`.
    pub fn vertical(x: f32, y0: f32, y1: f32) -> Self {
        Self {
            kind: RulingKind::Vertical,
            position: x,
            start: y0.min(y1),
            end: y0.max(y1),
        }
    }

    /// Length of the segment.
    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_horizontal(&self) -> bool {
        self.kind == RulingKind::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.kind == RulingKind::Vertical
    }

    /// Build an axis-aligned ruling from two endpoints, if they share an axis
    /// within a small tolerance.
    ///
    /// Returns `None` for diagonal segments, which carry no table structure.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<Self> {
        const AXIS_TOLERANCE: f32 = 0.1;
        if (y0 - y1).abs() < AXIS_TOLERANCE {
            Some(Self::horizontal(y0, x0, x1))
        } else if (x0 - x1).abs() < AXIS_TOLERANCE {
            Some(Self::vertical(x0, y0, y1))
        } else {
            None
        }
    }
}
