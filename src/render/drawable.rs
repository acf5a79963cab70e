use image::{Rgb, Rgba, RgbaImage};

use crate::foundation::error::SceneResult;
use crate::render::tile::Tile;

/// The leaf drawing contract.
///
/// Concrete leaves (colored panels, video frames, text) implement this and
/// are attached to a node; the engine calls [`Drawable::produce_tile`] on
/// every render pass with the node's resolved size and composites whatever
/// comes back. Returning `Ok(None)` means the node paints nothing of its own
/// this frame (children still render).
///
/// Any `FnMut(u32, u32) -> SceneResult<Option<Tile>>` closure is a drawable,
/// which keeps one-off leaves and test fixtures cheap:
///
/// ```
/// use scenegrid::{Drawable, SceneResult, Tile};
///
/// let mut stripe = |w: u32, h: u32| -> SceneResult<Option<Tile>> {
///     let img = image::RgbImage::from_fn(w, h, |x, _| image::Rgb([(x % 256) as u8, 0, 0]));
///     Ok(Some(Tile::Rgb(img)))
/// };
/// assert!(stripe.produce_tile(4, 2).unwrap().is_some());
/// ```
pub trait Drawable {
    /// Produce this node's own raster tile at the resolved `width` x
    /// `height`. Called once per render pass; the previous tile is
    /// discarded.
    fn produce_tile(&mut self, width: u32, height: u32) -> SceneResult<Option<Tile>>;
}

impl<F> Drawable for F
where
    F: FnMut(u32, u32) -> SceneResult<Option<Tile>>,
{
    fn produce_tile(&mut self, width: u32, height: u32) -> SceneResult<Option<Tile>> {
        self(width, height)
    }
}

/// A solid-color panel filling the node's whole tile.
#[derive(Clone, Copy, Debug)]
pub struct SolidColor {
    color: Rgba<u8>,
}

impl SolidColor {
    /// A fully opaque panel of the given color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Rgba([r, g, b, 255]),
        }
    }

    /// A panel with an explicit coverage value.
    pub fn with_coverage(r: u8, g: u8, b: u8, coverage: u8) -> Self {
        Self {
            color: Rgba([r, g, b, coverage]),
        }
    }

    /// The panel color, including coverage.
    pub fn color(&self) -> Rgba<u8> {
        self.color
    }
}

impl Drawable for SolidColor {
    fn produce_tile(&mut self, width: u32, height: u32) -> SceneResult<Option<Tile>> {
        let Rgba([r, g, b, a]) = self.color;
        if a == 255 {
            let img = image::RgbImage::from_pixel(width, height, Rgb([r, g, b]));
            Ok(Some(Tile::Rgb(img)))
        } else {
            let img = RgbaImage::from_pixel(width, height, self.color);
            Ok(Some(Tile::Rgba(img)))
        }
    }
}

/// A fully transparent tile; used as the grid's background so that cell
/// content comes entirely from the children's own render passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Backdrop;

impl Drawable for Backdrop {
    fn produce_tile(&mut self, width: u32, height: u32) -> SceneResult<Option<Tile>> {
        Ok(Some(Tile::transparent(width, height)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/drawable.rs"]
mod tests;
