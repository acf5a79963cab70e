use image::{RgbImage, RgbaImage};

use crate::foundation::core::Extent;

/// The raster a node's draw hook produces, excluding children's content.
///
/// Tiles are 8 bits per channel. A [`Tile::Rgb`] tile is fully opaque and
/// composites via direct copy; an [`Tile::Rgba`] tile carries a coverage
/// (alpha) channel used as the per-pixel blend weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    /// Opaque color, 3 channels.
    Rgb(RgbImage),
    /// Color plus coverage, 4 channels.
    Rgba(RgbaImage),
}

impl Tile {
    /// Build a fully transparent RGBA tile of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::Rgba(RgbaImage::new(width, height))
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.width(),
            Self::Rgba(img) => img.width(),
        }
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.height(),
            Self::Rgba(img) => img.height(),
        }
    }

    /// Tile size in pixels.
    pub fn extent(&self) -> Extent {
        Extent::new(self.width(), self.height())
    }

    /// Number of channels: 3 for opaque, 4 for color + coverage.
    pub fn channels(&self) -> u8 {
        match self {
            Self::Rgb(_) => 3,
            Self::Rgba(_) => 4,
        }
    }
}

impl From<RgbImage> for Tile {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}

impl From<RgbaImage> for Tile {
    fn from(img: RgbaImage) -> Self {
        Self::Rgba(img)
    }
}
