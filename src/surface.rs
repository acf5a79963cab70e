use image::RgbImage;

use crate::foundation::error::{SceneError, SceneResult};
use crate::render::tile::Tile;
use crate::scene::node::{Node, NodeId, Scene};

/// The display collaborator: accepts a finished frame and presents it.
///
/// A windowing backend implements this against its own surface; tests use a
/// capturing sink. Input polling and the event loop that drives the
/// render/show cycle live entirely on the collaborator's side.
pub trait DisplaySink {
    /// Present one frame under the surface's name.
    fn show(&mut self, name: &str, frame: &RgbImage) -> SceneResult<()>;
}

/// The root of a scene: owns the top-level buffer and the tree drawn into
/// it.
///
/// A surface clears its buffer to black and repaints the whole tree on every
/// [`Surface::render`] call; [`Surface::present`] hands the finished frame
/// to the display collaborator. These two calls are the only operations an
/// external event loop needs.
pub struct Surface {
    name: String,
    scene: Scene,
    root: NodeId,
    buffer: RgbImage,
}

impl Surface {
    /// Build a surface with a black `width` x `height` buffer and an empty
    /// root node. The root paints nothing of its own; content hangs off it.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::invalid_target(
                "surface dimensions must be positive",
            ));
        }
        let name = name.into();
        let mut scene = Scene::new();
        let root = scene.insert(Node::new(name.clone(), width, height).drawn_by(no_tile));
        Ok(Self {
            name,
            scene,
            root,
            buffer: RgbImage::new(width, height),
        })
    }

    /// The surface name, handed to the display collaborator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene tree drawn onto this surface.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene tree, for building and reflowing between
    /// frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Id of the root node; attach top-level components under it.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Clear the buffer to black and repaint the whole tree into it.
    #[tracing::instrument(skip(self), fields(surface = %self.name))]
    pub fn render(&mut self) -> SceneResult<()> {
        self.buffer.fill(0);
        self.scene.render(self.root, &mut self.buffer, None)
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &RgbImage {
        &self.buffer
    }

    /// Hand the current frame to the display collaborator.
    pub fn present(&self, sink: &mut dyn DisplaySink) -> SceneResult<()> {
        sink.show(&self.name, &self.buffer)
    }
}

/// Draw hook of the root node: never paints a tile of its own.
fn no_tile(_width: u32, _height: u32) -> SceneResult<Option<Tile>> {
    Ok(None)
}

#[cfg(test)]
#[path = "../tests/unit/surface.rs"]
mod tests;
