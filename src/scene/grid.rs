use crate::foundation::core::PixelPos;
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::drawable::Backdrop;
use crate::scene::node::{Node, NodeId, Scene};
use crate::scene::size::SizeSpec;

/// Pitch parameters of a grid container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    /// Row capacity; must be positive.
    pub rows: u32,
    /// Column capacity; must be positive.
    pub cols: u32,
    /// Pixel width of each cell.
    pub cell_width: u32,
    /// Pixel height of each cell.
    pub cell_height: u32,
    /// Pixels between adjacent cells.
    pub padding: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            cell_width: 320,
            cell_height: 240,
            padding: 10,
        }
    }
}

impl GridSpec {
    /// Total pixel extent of the grid: `n*cell + (n-1)*padding` per axis.
    pub fn total_extent(&self) -> (u32, u32) {
        (
            self.cols * self.cell_width + self.cols.saturating_sub(1) * self.padding,
            self.rows * self.cell_height + self.rows.saturating_sub(1) * self.padding,
        )
    }

    /// Pixel offset of cell `(row, col)` within the grid.
    pub fn cell_offset(&self, row: u32, col: u32) -> PixelPos {
        PixelPos::new(
            (col * (self.cell_width + self.padding)) as i32,
            (row * (self.cell_height + self.padding)) as i32,
        )
    }

    fn validate(&self) -> SceneResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SceneError::validation(
                "grid rows and cols must be positive",
            ));
        }
        Ok(())
    }
}

/// One cell assignment. The list is keyed by child: a child holds at most
/// one entry, while a cell may transiently back more than one entry (see
/// [`Scene::place`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    /// The assigned child.
    pub child: NodeId,
    /// Cell row, in `[0, rows)`.
    pub row: u32,
    /// Cell column, in `[0, cols)`.
    pub col: u32,
}

/// Grid bookkeeping carried by a grid node.
pub(crate) struct GridState {
    pub(crate) spec: GridSpec,
    pub(crate) cells: Vec<CellRef>,
}

impl Scene {
    /// Insert a grid container node. Its size is fixed at the pitch-derived
    /// total extent and its own draw produces a transparent backdrop, so
    /// cell content comes entirely from the children.
    pub fn insert_grid(&mut self, name: impl Into<String>, spec: GridSpec) -> SceneResult<NodeId> {
        spec.validate()?;
        let (width, height) = spec.total_extent();
        let node = Node::new(name, width, height).drawn_by(Backdrop);
        let id = self.insert(node);
        self.node_mut(id).grid = Some(GridState {
            spec,
            cells: Vec::new(),
        });
        Ok(id)
    }

    /// The grid's pitch parameters.
    pub fn grid_spec(&self, grid: NodeId) -> SceneResult<GridSpec> {
        Ok(self.grid_state(grid)?.spec)
    }

    /// Logical grid coordinate of `child`, or `None` when it holds no cell.
    pub fn grid_position(&self, grid: NodeId, child: NodeId) -> Option<(u32, u32)> {
        let state = self.grid_state(grid).ok()?;
        state
            .cells
            .iter()
            .find(|cell| cell.child == child)
            .map(|cell| (cell.row, cell.col))
    }

    /// Current cell assignments in insertion order.
    pub fn grid_cells(&self, grid: NodeId) -> SceneResult<Vec<CellRef>> {
        Ok(self.grid_state(grid)?.cells.clone())
    }

    /// Place `child` at cell `(row, col)`: position it at the cell's pixel
    /// offset, attach it under the grid and record the assignment.
    ///
    /// Out-of-bounds coordinates are logged and reported as a placement
    /// failure; the caller decides whether to retry. Placing onto an
    /// occupied cell is allowed and does not disturb the prior occupant's
    /// own assignment entry, so a cell can be transiently double-booked.
    pub fn place(&mut self, grid: NodeId, child: NodeId, row: u32, col: u32) -> SceneResult<()> {
        let state = self.grid_state(grid)?;
        let spec = state.spec;
        if row >= spec.rows || col >= spec.cols {
            tracing::warn!(
                grid = self.node(grid).name(),
                row,
                col,
                rows = spec.rows,
                cols = spec.cols,
                "grid cell out of bounds"
            );
            return Err(SceneError::placement(format!(
                "cell ({row}, {col}) is out of bounds for a {}x{} grid",
                spec.rows, spec.cols,
            )));
        }

        self.node_mut(child).set_position(spec.cell_offset(row, col));
        self.attach(child, grid)?;

        let cells = &mut self.grid_state_mut(grid)?.cells;
        cells.retain(|cell| cell.child != child);
        cells.push(CellRef { child, row, col });
        Ok(())
    }

    /// Place `child` at the first free cell in row-major scan order.
    ///
    /// Fails without mutating anything when every cell holds an assignment.
    pub fn place_auto(&mut self, grid: NodeId, child: NodeId) -> SceneResult<()> {
        let state = self.grid_state(grid)?;
        let spec = state.spec;
        let mut free = None;
        'scan: for row in 0..spec.rows {
            for col in 0..spec.cols {
                let occupied = state
                    .cells
                    .iter()
                    .any(|cell| cell.row == row && cell.col == col);
                if !occupied {
                    free = Some((row, col));
                    break 'scan;
                }
            }
        }
        if let Some((row, col)) = free {
            return self.place(grid, child, row, col);
        }
        tracing::warn!(
            grid = self.node(grid).name(),
            rows = spec.rows,
            cols = spec.cols,
            "grid is full"
        );
        Err(SceneError::placement(format!(
            "grid `{}` is full ({}x{})",
            self.node(grid).name(),
            spec.rows,
            spec.cols,
        )))
    }

    /// Remove `child` from the grid: clear its cell assignment and detach it
    /// from the tree.
    pub fn remove_from_grid(&mut self, grid: NodeId, child: NodeId) -> SceneResult<()> {
        self.grid_state_mut(grid)?
            .cells
            .retain(|cell| cell.child != child);
        if self.parent(child) == Some(grid) {
            self.detach(child);
        }
        Ok(())
    }

    /// Change the grid's capacity to `rows` x `cols` and reflow children.
    ///
    /// The node's fixed size is re-derived from the new pitch. Each
    /// previously assigned child keeps its cell when it still fits the new
    /// bounds, else it is auto-placed into the next free cell in row-major
    /// order, else it is detached from the tree entirely.
    pub fn resize_grid(&mut self, grid: NodeId, rows: u32, cols: u32) -> SceneResult<()> {
        let state = self.grid_state_mut(grid)?;
        let spec = GridSpec {
            rows,
            cols,
            ..state.spec
        };
        spec.validate()?;
        let old_cells = std::mem::take(&mut state.cells);
        state.spec = spec;

        let (width, height) = spec.total_extent();
        self.node_mut(grid)
            .set_size_specs(SizeSpec::Fixed(width), SizeSpec::Fixed(height));
        tracing::debug!(
            grid = self.node(grid).name(),
            rows,
            cols,
            width,
            height,
            "grid resized"
        );

        // Keep still-fitting cells first so overflowing children never steal
        // a cell its holder is about to reclaim.
        let mut overflow = Vec::new();
        for cell in old_cells {
            if cell.row < rows && cell.col < cols {
                self.place(grid, cell.child, cell.row, cell.col)?;
            } else {
                overflow.push(cell.child);
            }
        }
        for child in overflow {
            if self.place_auto(grid, child).is_err() {
                // Grid shrank past this child's reach; drop it from the tree.
                self.detach(child);
            }
        }
        Ok(())
    }

    fn grid_state(&self, grid: NodeId) -> SceneResult<&GridState> {
        self.node(grid).grid.as_ref().ok_or_else(|| {
            SceneError::validation(format!("node `{}` is not a grid", self.node(grid).name()))
        })
    }

    fn grid_state_mut(&mut self, grid: NodeId) -> SceneResult<&mut GridState> {
        let name = self.node(grid).name().to_owned();
        self.node_mut(grid)
            .grid
            .as_mut()
            .ok_or_else(|| SceneError::validation(format!("node `{name}` is not a grid")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/grid.rs"]
mod tests;
