pub(crate) mod notes;
pub(crate) mod ui;
