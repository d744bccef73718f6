use crate::models::{BookmarkRecord, Note, UserInfo};
use crate::util::parse_created_at;
use std::cmp::Reverse;
use std::collections::HashSet;
use strum::{AsRefStr, Display, IntoStaticStr};

/// A user interaction a rendered control can trigger.
///
/// The string form is the element id the control carries in the DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr)]
pub(crate) enum NoteAction {
    #[strum(serialize = "deleteNoteButton")]
    Delete,
    #[strum(serialize = "bookmarkButton")]
    Bookmark,
    #[strum(serialize = "removeBookmarkButton")]
    RemoveBookmark,
}

impl NoteAction {
    pub fn dom_id(self) -> &'static str {
        self.into()
    }
}

/// Which bookmark control a note card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BookmarkControl {
    Add,
    Remove,
}

impl BookmarkControl {
    pub fn for_state(bookmarked: bool) -> Self {
        if bookmarked {
            Self::Remove
        } else {
            Self::Add
        }
    }

    pub fn action(self) -> NoteAction {
        match self {
            Self::Add => NoteAction::Bookmark,
            Self::Remove => NoteAction::RemoveBookmark,
        }
    }
}

/// One handler attached to one control.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct HandlerBinding {
    pub action: NoteAction,
    pub note_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteItem {
    pub note: Note,
    pub control: BookmarkControl,
}

impl NoteItem {
    pub fn is_bookmarked(&self) -> bool {
        self.control == BookmarkControl::Remove
    }

    /// Handlers for this card: delete plus the current bookmark control.
    pub fn bindings(&self) -> [HandlerBinding; 2] {
        [
            HandlerBinding {
                action: NoteAction::Delete,
                note_id: self.note.id.clone(),
            },
            HandlerBinding {
                action: self.control.action(),
                note_id: self.note.id.clone(),
            },
        ]
    }
}

/// Full contents of the notes container after one refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NoteListing {
    Empty,
    Populated { user: UserInfo, items: Vec<NoteItem> },
}

impl NoteListing {
    pub fn items(&self) -> &[NoteItem] {
        match self {
            Self::Empty => &[],
            Self::Populated { items, .. } => items,
        }
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<&str> {
        self.items().iter().map(|i| i.note.id.as_str()).collect()
    }

    /// Every handler the current contents need. Replacing the listing
    /// replaces this set wholesale.
    pub fn bindings(&self) -> Vec<HandlerBinding> {
        self.items().iter().flat_map(NoteItem::bindings).collect()
    }
}

/// Newest first. Stable for equal timestamps; unparseable ones go last.
pub(crate) fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by_cached_key(|n| Reverse(parse_created_at(&n.created_at)));
}

pub(crate) fn build_listing(
    mut notes: Vec<Note>,
    bookmarks: &[BookmarkRecord],
    user: UserInfo,
) -> NoteListing {
    if notes.is_empty() {
        return NoteListing::Empty;
    }

    sort_newest_first(&mut notes);

    let bookmarked: HashSet<&str> = bookmarks.iter().map(BookmarkRecord::id).collect();
    let items = notes
        .into_iter()
        .map(|note| {
            let control = BookmarkControl::for_state(bookmarked.contains(note.id.as_str()));
            NoteItem { note, control }
        })
        .collect();

    NoteListing::Populated { user, items }
}
