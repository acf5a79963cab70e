pub(crate) mod grid;
pub(crate) mod node;
pub(crate) mod size;
