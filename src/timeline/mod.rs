pub(crate) mod dsl;
pub(crate) mod player;
pub(crate) mod scheduler;
