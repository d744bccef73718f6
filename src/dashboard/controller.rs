use super::listing::{build_listing, HandlerBinding, NoteAction, NoteListing};
use crate::api::{ApiError, ApiResult};
use crate::bookmarks::BookmarkStore;
use crate::models::{BookmarkRecord, Note, UserInfo};
use crate::storage::StorageError;
use thiserror::Error;

pub(crate) trait NotesSource {
    async fn get_all(&self) -> ApiResult<Vec<Note>>;
    async fn get_by_id(&self, id: &str) -> ApiResult<Note>;
    /// Returns the server's confirmation message.
    async fn destroy(&self, id: &str) -> ApiResult<String>;
}

pub(crate) trait UserSource {
    async fn get_user_info(&self) -> ApiResult<UserInfo>;
}

/// The side-effecting half of the dashboard: whatever owns the notes
/// container.
pub(crate) trait DashboardView {
    /// Replace the container's contents and the handlers bound to them.
    fn replace_listing(&self, listing: NoteListing);
    /// Blocking, user-visible message.
    fn alert(&self, message: &str);
    fn show_error(&self, message: String);
}

#[derive(Debug, Error)]
pub(crate) enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("bookmarks: {0}")]
    Bookmarks(#[from] StorageError),
}

#[derive(Debug)]
struct DashboardData {
    bookmarks: Vec<BookmarkRecord>,
    notes: Vec<Note>,
    user: UserInfo,
}

#[derive(Clone, Debug)]
pub(crate) struct DashboardController<N, U, B> {
    notes: N,
    users: U,
    bookmarks: B,
}

impl<N, U, B> DashboardController<N, U, B>
where
    N: NotesSource,
    U: UserSource,
    B: BookmarkStore,
{
    pub fn new(notes: N, users: U, bookmarks: B) -> Self {
        Self {
            notes,
            users,
            bookmarks,
        }
    }

    /// All three sources are requested together and awaited as a group; a
    /// failure in any of them fails the whole load.
    async fn load(&self) -> Result<DashboardData, DashboardError> {
        let (bookmarks, notes, user) = futures::join!(
            self.bookmarks.get_all_bookmarked_notes(),
            self.notes.get_all(),
            self.users.get_user_info(),
        );

        Ok(DashboardData {
            bookmarks: bookmarks?,
            notes: notes?,
            user: user?,
        })
    }

    /// Fetch everything and replace the view's contents. On error the view
    /// is left untouched and the error is returned to the caller.
    pub async fn refresh<V: DashboardView>(&self, view: &V) -> Result<(), DashboardError> {
        let data = self.load().await?;

        let listing = build_listing(data.notes, &data.bookmarks, data.user);
        match &listing {
            NoteListing::Empty => tracing::debug!("no notes to show"),
            NoteListing::Populated { items, .. } => tracing::debug!(
                notes = items.len(),
                bookmarked = items.iter().filter(|i| i.is_bookmarked()).count(),
                "rendering notes"
            ),
        }

        view.replace_listing(listing);
        Ok(())
    }

    /// Refresh and hand any failure to the view instead of recovering.
    pub async fn reload<V: DashboardView>(&self, view: &V) {
        if let Err(e) = self.refresh(view).await {
            tracing::error!(error = %e, "failed to load dashboard");
            view.show_error(e.to_string());
        }
    }

    pub async fn dispatch<V: DashboardView>(&self, binding: HandlerBinding, view: &V) {
        let HandlerBinding { action, note_id } = binding;
        match action {
            NoteAction::Delete => self.delete_note(&note_id, view).await,
            NoteAction::Bookmark => self.bookmark_note(&note_id, view).await,
            NoteAction::RemoveBookmark => self.remove_bookmark(&note_id, view).await,
        }
    }

    pub async fn delete_note<V: DashboardView>(&self, id: &str, view: &V) {
        match self.notes.destroy(id).await {
            Ok(message) => {
                view.alert(&message);
                self.reload(view).await;
            }
            Err(e) => tracing::error!(note_id = id, error = %e, "failed to delete note"),
        }
    }

    pub async fn bookmark_note<V: DashboardView>(&self, id: &str, view: &V) {
        let result: Result<(), DashboardError> = async {
            let note = self.notes.get_by_id(id).await?;
            self.bookmarks.put_bookmark(&note).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => self.reload(view).await,
            Err(e) => {
                tracing::error!(note_id = id, error = %e, "something went wrong when bookmarking a note")
            }
        }
    }

    pub async fn remove_bookmark<V: DashboardView>(&self, id: &str, view: &V) {
        match self.bookmarks.delete_bookmark(id).await {
            Ok(()) => self.reload(view).await,
            Err(e) => {
                tracing::error!(note_id = id, error = %e, "something went wrong when removing a bookmark")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::bookmarks::MemoryBookmarks;
    use crate::dashboard::BookmarkControl;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    fn note(id: &str, created_at: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("Note {id}"),
            body: "body".to_string(),
            created_at: created_at.to_string(),
            owner: "user-1".to_string(),
            archived: false,
        }
    }

    #[derive(Clone, Default)]
    struct FakeNotes {
        notes: Arc<Mutex<Vec<Note>>>,
        offline: bool,
    }

    impl FakeNotes {
        fn with(notes: Vec<Note>) -> Self {
            Self {
                notes: Arc::new(Mutex::new(notes)),
                offline: false,
            }
        }

        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }

        fn check(&self) -> ApiResult<()> {
            if self.offline {
                Err(ApiError::new(ApiErrorKind::Network, "offline"))
            } else {
                Ok(())
            }
        }
    }

    impl NotesSource for FakeNotes {
        async fn get_all(&self) -> ApiResult<Vec<Note>> {
            self.check()?;
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: &str) -> ApiResult<Note> {
            self.check()?;
            self.notes
                .lock()
                .unwrap()
                .iter()
                .find(|n| n.id == id)
                .cloned()
                .ok_or_else(|| ApiError::new(ApiErrorKind::Http, "Note is not found"))
        }

        async fn destroy(&self, id: &str) -> ApiResult<String> {
            self.check()?;
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| n.id != id);
            if notes.len() == before {
                return Err(ApiError::new(ApiErrorKind::Http, "Note is not found"));
            }
            Ok("Note deleted".to_string())
        }
    }

    struct FakeUsers {
        offline: bool,
    }

    impl UserSource for FakeUsers {
        async fn get_user_info(&self) -> ApiResult<UserInfo> {
            if self.offline {
                return Err(ApiError::new(ApiErrorKind::Unauthorized, "Unauthorized"));
            }
            Ok(UserInfo {
                id: "user-1".to_string(),
                name: "Dimas".to_string(),
                email: "dimas@example.com".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingView {
        listings: RefCell<Vec<NoteListing>>,
        alerts: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl RecordingView {
        fn last(&self) -> NoteListing {
            self.listings.borrow().last().cloned().expect("something rendered")
        }

        fn control_of(&self, id: &str) -> BookmarkControl {
            self.last()
                .items()
                .iter()
                .find(|i| i.note.id == id)
                .map(|i| i.control)
                .expect("note rendered")
        }
    }

    impl DashboardView for RecordingView {
        fn replace_listing(&self, listing: NoteListing) {
            self.listings.borrow_mut().push(listing);
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn show_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }
    }

    type TestController = DashboardController<FakeNotes, FakeUsers, MemoryBookmarks>;

    fn controller(notes: Vec<Note>) -> (TestController, MemoryBookmarks) {
        let bookmarks = MemoryBookmarks::default();
        let c = DashboardController::new(
            FakeNotes::with(notes),
            FakeUsers { offline: false },
            bookmarks.clone(),
        );
        (c, bookmarks)
    }

    fn two_notes() -> Vec<Note> {
        vec![note("1", "2024-01-01"), note("2", "2024-02-01")]
    }

    #[test]
    fn test_refresh_renders_sorted_annotated_listing() {
        let (c, bookmarks) = controller(two_notes());
        block_on(bookmarks.put_bookmark(&note("2", "2024-02-01"))).unwrap();
        let view = RecordingView::default();

        block_on(c.refresh(&view)).expect("refresh");

        assert_eq!(view.last().ids(), vec!["2", "1"]);
        assert_eq!(view.control_of("2"), BookmarkControl::Remove);
        assert_eq!(view.control_of("1"), BookmarkControl::Add);
    }

    #[test]
    fn test_refresh_with_no_notes_renders_empty_state() {
        let (c, _) = controller(vec![]);
        let view = RecordingView::default();

        block_on(c.refresh(&view)).expect("refresh");

        assert_eq!(view.last(), NoteListing::Empty);
        assert!(view.last().bindings().is_empty());
    }

    #[test]
    fn test_refresh_failure_is_returned_and_view_untouched() {
        let c = DashboardController::new(
            FakeNotes::offline(),
            FakeUsers { offline: false },
            MemoryBookmarks::default(),
        );
        let view = RecordingView::default();

        let err = block_on(c.refresh(&view)).unwrap_err();
        assert!(matches!(err, DashboardError::Api(ref e) if e.kind == ApiErrorKind::Network));
        assert!(view.listings.borrow().is_empty());
    }

    #[test]
    fn test_reload_surfaces_user_info_failure() {
        let c = DashboardController::new(
            FakeNotes::with(two_notes()),
            FakeUsers { offline: true },
            MemoryBookmarks::default(),
        );
        let view = RecordingView::default();

        block_on(c.reload(&view));

        assert!(view.listings.borrow().is_empty());
        assert_eq!(view.errors.borrow().as_slice(), ["Unauthorized"]);
    }

    #[test]
    fn test_delete_alerts_and_refreshes_without_deleted_note() {
        let (c, _) = controller(two_notes());
        let view = RecordingView::default();
        block_on(c.refresh(&view)).unwrap();

        block_on(c.delete_note("2", &view));

        assert_eq!(view.alerts.borrow().as_slice(), ["Note deleted"]);
        assert_eq!(view.listings.borrow().len(), 2);
        assert_eq!(view.last().ids(), vec!["1"]);
    }

    #[test]
    fn test_delete_last_note_falls_back_to_empty_state() {
        let (c, _) = controller(vec![note("1", "2024-01-01")]);
        let view = RecordingView::default();

        block_on(c.delete_note("1", &view));

        assert_eq!(view.last(), NoteListing::Empty);
    }

    #[test]
    fn test_failed_delete_is_logged_only() {
        let (c, _) = controller(two_notes());
        let view = RecordingView::default();
        block_on(c.refresh(&view)).unwrap();

        block_on(c.delete_note("missing", &view));

        assert!(view.alerts.borrow().is_empty());
        assert!(view.errors.borrow().is_empty());
        assert_eq!(view.listings.borrow().len(), 1);
    }

    #[test]
    fn test_bookmark_then_unbookmark_flips_control() {
        let (c, bookmarks) = controller(two_notes());
        let view = RecordingView::default();

        block_on(c.bookmark_note("1", &view));
        assert_eq!(view.control_of("1"), BookmarkControl::Remove);
        let stored = block_on(bookmarks.get_all_bookmarked_notes()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].note.title, "Note 1");

        block_on(c.remove_bookmark("1", &view));
        assert_eq!(view.control_of("1"), BookmarkControl::Add);
        assert!(block_on(bookmarks.get_all_bookmarked_notes()).unwrap().is_empty());
    }

    #[test]
    fn test_failed_bookmark_leaves_store_and_view_unchanged() {
        let (c, bookmarks) = controller(two_notes());
        let view = RecordingView::default();

        block_on(c.bookmark_note("missing", &view));

        assert!(view.listings.borrow().is_empty());
        assert!(block_on(bookmarks.get_all_bookmarked_notes()).unwrap().is_empty());
    }

    #[test]
    fn test_orphaned_bookmark_is_not_rendered() {
        let (c, bookmarks) = controller(two_notes());
        let view = RecordingView::default();
        block_on(c.bookmark_note("2", &view));

        block_on(c.delete_note("2", &view));

        assert_eq!(view.last().ids(), vec!["1"]);
        assert_eq!(block_on(bookmarks.get_all_bookmarked_notes()).unwrap().len(), 1);
    }

    #[test]
    fn test_dispatch_routes_each_bound_action() {
        let (c, _) = controller(two_notes());
        let view = RecordingView::default();
        block_on(c.refresh(&view)).unwrap();

        let bind = view
            .last()
            .bindings()
            .into_iter()
            .find(|b| b.action == NoteAction::Bookmark && b.note_id == "1")
            .expect("bookmark control for note 1");
        block_on(c.dispatch(bind, &view));
        assert_eq!(view.control_of("1"), BookmarkControl::Remove);

        let unbind = view
            .last()
            .bindings()
            .into_iter()
            .find(|b| b.action == NoteAction::RemoveBookmark)
            .expect("remove control after rebinding");
        assert_eq!(unbind.note_id, "1");
        block_on(c.dispatch(unbind, &view));
        assert_eq!(view.control_of("1"), BookmarkControl::Add);
    }
}
