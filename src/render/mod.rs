pub(crate) mod blend;
pub(crate) mod drawable;
pub(crate) mod tile;
