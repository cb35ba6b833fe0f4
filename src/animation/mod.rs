pub(crate) mod ease;
pub(crate) mod segment;
pub(crate) mod state;
pub(crate) mod track;
