pub(crate) mod listeners;
pub(crate) mod section;
pub(crate) mod stage;
pub(crate) mod watchdog;
