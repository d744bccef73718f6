//! Dashboard data aggregation and the refresh/mutation cycle.

mod controller;
mod listing;

pub(crate) use controller::{
    DashboardController, DashboardError, DashboardView, NotesSource, UserSource,
};
pub(crate) use listing::{BookmarkControl, HandlerBinding, NoteAction, NoteItem, NoteListing};
