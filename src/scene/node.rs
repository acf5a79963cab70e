use image::RgbImage;

use crate::foundation::core::{Extent, PixelPos};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::blend::composite;
use crate::render::drawable::Drawable;
use crate::render::tile::Tile;
use crate::scene::grid::GridState;
use crate::scene::size::SizeSpec;

/// Handle to a node inside a [`Scene`].
///
/// Ids are minted by [`Scene::insert`] and stay valid for the scene's whole
/// lifetime; detaching a node severs its tree links but never removes it
/// from the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// One unit of the scene tree: a name, a position relative to the parent,
/// a size specification per axis, an optional draw capability and the tile
/// it produced last frame.
pub struct Node {
    name: String,
    position: PixelPos,
    width: SizeSpec,
    height: SizeSpec,
    auto_size: bool,
    opacity: f32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    tile: Option<Tile>,
    drawable: Option<Box<dyn Drawable>>,
    pub(crate) grid: Option<GridState>,
}

impl Node {
    /// Build a node with fixed pixel sizes and no draw capability.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            position: PixelPos::ZERO,
            width: SizeSpec::Fixed(width),
            height: SizeSpec::Fixed(height),
            auto_size: false,
            opacity: 1.0,
            parent: None,
            children: Vec::new(),
            tile: None,
            drawable: None,
            grid: None,
        }
    }

    /// Set the position relative to the parent's origin.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = PixelPos::new(x, y);
        self
    }

    /// Replace both size specifications.
    pub fn sized(mut self, width: impl Into<SizeSpec>, height: impl Into<SizeSpec>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    /// Always derive size from the children's extent, even over a fixed
    /// spec.
    pub fn auto_sized(mut self) -> Self {
        self.auto_size = true;
        self
    }

    /// Set the compositing opacity (clamped to `[0, 1]` at blend time).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attach the draw capability.
    pub fn drawn_by(mut self, drawable: impl Drawable + 'static) -> Self {
        self.drawable = Some(Box::new(drawable));
        self
    }

    /// Node name, used in errors and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position relative to the parent's origin.
    pub fn position(&self) -> PixelPos {
        self.position
    }

    /// Move the node relative to its parent.
    pub fn set_position(&mut self, position: PixelPos) {
        self.position = position;
    }

    /// Compositing opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the compositing opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Whether size always follows the children's extent.
    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    /// Replace both size specifications in place.
    pub fn set_size_specs(&mut self, width: SizeSpec, height: SizeSpec) {
        self.width = width;
        self.height = height;
    }

    /// The tile produced by the most recent render pass, if any.
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// Replace the draw capability.
    pub fn set_drawable(&mut self, drawable: impl Drawable + 'static) {
        self.drawable = Some(Box::new(drawable));
    }

    /// Whether this node is a grid container.
    pub fn is_grid(&self) -> bool {
        self.grid.is_some()
    }
}

/// The scene tree: an arena owning every node, addressed by [`NodeId`].
///
/// The only ownership edges run parent to children; the parent back-reference
/// is a plain id, so no node ever owns its parent. One render pass runs at a
/// time against one target buffer; tree mutations belong between frames.
#[derive(Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `node` into the arena as a detached root and return its id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Insert `node` and attach it under `parent` in one step.
    pub fn insert_child(&mut self, node: Node, parent: NodeId) -> SceneResult<NodeId> {
        let id = self.insert(node);
        self.attach(id, parent)?;
        Ok(id)
    }

    /// Shared access to a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// The node's parent, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The node's children in paint order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Attach `child` under `parent`.
    ///
    /// Idempotent when `child` already sits under `parent`; re-parents when
    /// it sits elsewhere. Attaching a node under itself or under one of its
    /// descendants is rejected with a validation error.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> SceneResult<()> {
        if self.node(child).parent == Some(parent) {
            return Ok(());
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::validation(format!(
                "attaching `{}` under `{}` would create a cycle",
                self.node(child).name(),
                self.node(parent).name(),
            )));
        }
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from its parent, if any.
    ///
    /// Clears the back-reference and, when the parent is a grid, the child's
    /// cell assignment. A detached node keeps its subtree and can be
    /// re-attached later.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).parent else {
            return;
        };
        self.node_mut(parent).children.retain(|&c| c != child);
        if let Some(grid) = self.node_mut(parent).grid.as_mut() {
            grid.cells.retain(|cell| cell.child != child);
        }
        self.node_mut(child).parent = None;
    }

    /// Whether `ancestor` appears on `node`'s parent chain (or is `node`).
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.node(id).parent;
        }
        false
    }

    /// Resolved width of `id` (spec applied to the current children extent).
    pub fn width(&self, id: NodeId) -> u32 {
        self.resolve_axis(id, Axis::X)
    }

    /// Resolved height of `id`.
    pub fn height(&self, id: NodeId) -> u32 {
        self.resolve_axis(id, Axis::Y)
    }

    fn resolve_axis(&self, id: NodeId, axis: Axis) -> u32 {
        let node = self.node(id);
        let spec = match axis {
            Axis::X => &node.width,
            Axis::Y => &node.height,
        };
        match spec {
            // Auto-sizing overrides a fixed spec with the children extent.
            SizeSpec::Fixed(v) => {
                if node.auto_size {
                    self.children_extent(id, axis)
                } else {
                    *v
                }
            }
            spec => spec.resolve(self.children_extent(id, axis)),
        }
    }

    /// Furthest pixel any direct child reaches along `axis`:
    /// `max(child.position + child.resolved_size)`, 0 with no children.
    fn children_extent(&self, id: NodeId, axis: Axis) -> u32 {
        let mut max = 0i64;
        for &child in &self.node(id).children {
            let offset = match axis {
                Axis::X => self.node(child).position.x,
                Axis::Y => self.node(child).position.y,
            };
            let reach = i64::from(offset) + i64::from(self.resolve_axis(child, axis));
            max = max.max(reach);
        }
        max.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Absolute position of `id`: its own position if it is a root, else the
    /// parent's absolute position plus its relative position. Walks the
    /// ancestors on every call so it always reflects the current tree shape.
    pub fn absolute_position(&self, id: NodeId) -> PixelPos {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self.absolute_position(parent).offset(node.position),
            None => node.position,
        }
    }

    /// Minimal bounding size containing `id` and all descendants at their
    /// current offsets. Feeds ancestors' size resolution only; compositing
    /// never consults it.
    pub fn total_extent(&self, id: NodeId) -> Extent {
        Extent::new(
            self.total_axis(id, Axis::X),
            self.total_axis(id, Axis::Y),
        )
    }

    fn total_axis(&self, id: NodeId, axis: Axis) -> u32 {
        let mut max = i64::from(self.resolve_axis(id, axis));
        for &child in &self.node(id).children {
            let offset = match axis {
                Axis::X => self.node(child).position.x,
                Axis::Y => self.node(child).position.y,
            };
            let reach = i64::from(offset) + i64::from(self.total_axis(child, axis));
            max = max.max(reach);
        }
        max.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Render `id` and its subtree onto `target`.
    ///
    /// `render_position` overrides where the subtree paints for this call
    /// without touching any stored position; the normal caller is the
    /// parent, passing `its own anchor + the child's relative position`.
    /// When absent, the node's [`Scene::absolute_position`] is the anchor.
    ///
    /// Every pass re-invokes the node's draw capability and overwrites its
    /// tile; there is no dirty tracking. A node with no drawable fails with
    /// [`SceneError::UnimplementedDraw`].
    pub fn render(
        &mut self,
        id: NodeId,
        target: &mut RgbImage,
        render_position: Option<PixelPos>,
    ) -> SceneResult<()> {
        if target.width() == 0 || target.height() == 0 {
            return Err(SceneError::invalid_target(
                "render target has no pixels to composite onto",
            ));
        }

        let anchor = match render_position {
            Some(pos) => pos,
            None => self.absolute_position(id),
        };
        let width = self.width(id);
        let height = self.height(id);

        let node = &mut self.nodes[id.0 as usize];
        let Some(drawable) = node.drawable.as_mut() else {
            return Err(SceneError::unimplemented_draw(node.name.clone()));
        };
        node.tile = drawable.produce_tile(width, height)?;

        let node = self.node(id);
        if let Some(tile) = node.tile.as_ref() {
            composite(target, anchor, tile, node.opacity);
        }

        let children = node.children.clone();
        for child in children {
            let child_anchor = anchor.offset(self.node(child).position);
            self.render(child, target, Some(child_anchor))?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
