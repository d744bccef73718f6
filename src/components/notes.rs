//! Note list fragments: cards, bookmark controls and the empty state.
//!
//! These are pure with respect to their inputs. Each control gets its
//! handler from the binding it was rendered for, so a fresh listing always
//! comes with a fresh set of handlers.

use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle,
};
use crate::dashboard::{BookmarkControl, HandlerBinding, NoteItem, NoteListing};
use crate::models::{Note, UserInfo};
use crate::util::format_created_at;
use leptos::prelude::*;

fn owner_label(note: &Note, user: &UserInfo) -> String {
    if note.owner.is_empty() || note.owner == user.id {
        user.name.clone()
    } else {
        note.owner.clone()
    }
}

#[component]
pub fn NoteListEmpty() -> impl IntoView {
    view! {
        <div class="col-12">
            <p class="py-8 text-center text-sm text-muted-foreground">"No notes yet."</p>
        </div>
    }
}

#[component]
pub fn BookmarkButton(
    binding: HandlerBinding,
    control: BookmarkControl,
    on_action: Callback<HandlerBinding>,
) -> impl IntoView {
    let id = binding.action.dom_id();
    let note_id = binding.note_id.clone();
    let (variant, label) = match control {
        BookmarkControl::Add => (ButtonVariant::Outline, "Bookmark"),
        BookmarkControl::Remove => (ButtonVariant::Secondary, "Remove bookmark"),
    };

    view! {
        <Button
            variant=variant
            size=ButtonSize::Sm
            attr:id=id
            attr:data-id=note_id
            on:click=move |_| on_action.run(binding.clone())
        >
            {label}
        </Button>
    }
}

#[component]
pub fn NoteCard(
    item: NoteItem,
    user: UserInfo,
    on_action: Callback<HandlerBinding>,
) -> impl IntoView {
    let [delete, bookmark] = item.bindings();
    let delete_id = delete.action.dom_id();
    let note_id = item.note.id.clone();
    let owner = owner_label(&item.note, &user);
    let created = format_created_at(&item.note.created_at);

    view! {
        <Card>
            <CardHeader>
                <CardTitle>{item.note.title.clone()}</CardTitle>
                <CardDescription>{format!("{created} · {owner}")}</CardDescription>
            </CardHeader>
            <CardContent>
                <p class="whitespace-pre-wrap text-sm">{item.note.body.clone()}</p>
            </CardContent>
            <CardFooter class="justify-end">
                <BookmarkButton binding=bookmark control=item.control on_action=on_action />
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    attr:id=delete_id
                    attr:data-id=note_id
                    on:click=move |_| on_action.run(delete.clone())
                >
                    "Delete"
                </Button>
            </CardFooter>
        </Card>
    }
}

/// Renders one complete listing. Called again for every refresh.
#[component]
pub fn NoteList(listing: NoteListing, on_action: Callback<HandlerBinding>) -> impl IntoView {
    match listing {
        NoteListing::Empty => view! { <NoteListEmpty /> }.into_any(),
        NoteListing::Populated { user, items } => items
            .into_iter()
            .map(|item| {
                let user = user.clone();
                view! {
                    <div class="col-12">
                        <NoteCard item=item user=user on_action=on_action />
                    </div>
                }
            })
            .collect_view()
            .into_any(),
    }
}
