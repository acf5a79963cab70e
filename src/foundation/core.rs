/// A pixel offset relative to some origin.
///
/// Child positions are relative to the parent's origin; anchors are relative
/// to the target buffer's origin. Negative coordinates are legal and simply
/// clip during compositing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl PixelPos {
    /// The origin, `(0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Build a position from its components.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum of `self` and `other`.
    pub fn offset(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

/// A size in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Build an extent from its components.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the extent covers no pixels at all.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
