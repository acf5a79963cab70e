//! Scenegrid is a retained-mode scene graph for compositing 2D raster
//! components into a single output image, built for debug and visualization
//! overlays: grids of live camera/video tiles, colored panels, and similar
//! simple surfaces.
//!
//! # Pipeline overview
//!
//! 1. **Build**: insert [`Node`]s into a [`Scene`] (or a [`Surface`]'s
//!    scene) and attach them into a tree; positions are relative to the
//!    parent, later siblings paint over earlier ones.
//! 2. **Size**: each axis resolves a [`SizeSpec`] (fixed, function of the
//!    children's extent, or a `"children + 10"`-style expression) on every
//!    query; auto-sized nodes always follow their children.
//! 3. **Render**: [`Surface::render`] clears the frame buffer and walks the
//!    tree; every node's [`Drawable`] produces its own [`Tile`], which is
//!    alpha-composited at the node's anchor, then the children recurse with
//!    anchors derived from where the parent actually painted this frame.
//! 4. **Present**: [`Surface::present`] hands the finished frame to a
//!    [`DisplaySink`] collaborator (the window/input layer stays external).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single renderer**: one render pass at a time mutates one target
//!   buffer; tree mutations belong between frames.
//! - **Full redraw**: every frame re-runs every draw hook; there is no
//!   dirty tracking or tile caching.
//! - **Non-owning back-references**: the only ownership edges run parent to
//!   children; parents are plain ids into the scene's arena.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod render;
mod scene;
mod surface;

pub use foundation::core::{Extent, PixelPos};
pub use foundation::error::{SceneError, SceneResult};
pub use render::blend::composite;
pub use render::drawable::{Backdrop, Drawable, SolidColor};
pub use render::tile::Tile;
pub use scene::grid::{CellRef, GridSpec};
pub use scene::node::{Node, NodeId, Scene};
pub use scene::size::SizeSpec;
pub use surface::{DisplaySink, Surface};
