/// Reusable UI components

use patternfly_yew::prelude::{Button, ButtonVariant};
use web_sys::HtmlImageElement;
use yew::prelude::*;

use crate::view::{BookmarkRow, EmptyState, FAVICON_PLACEHOLDER, FolderSummary};

#[derive(Properties, PartialEq)]
pub struct BookmarkCardProps {
    pub row: BookmarkRow,
    pub on_open: Callback<String>,
    pub on_toggle: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(BookmarkCard)]
pub fn bookmark_card(props: &BookmarkCardProps) -> Html {
    let row = &props.row;

    let on_card_click = props.on_open.reform({
        let url = row.url.clone();
        move |_: MouseEvent| url.clone()
    });

    // Buttons sit inside the card, keep their clicks from opening it
    let button_action = |callback: &Callback<String>, value: String| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            callback.emit(value.clone());
        })
    };

    let on_favicon_error = Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<HtmlImageElement>() {
            if img.src() != FAVICON_PLACEHOLDER {
                img.set_src(FAVICON_PLACEHOLDER);
            }
        }
    });

    let class = if row.selected { "bookmark-card selected" } else { "bookmark-card" };

    html! {
        <div class={class} onclick={on_card_click}>
            <div class="bookmark-favicon">
                <img src={row.favicon.clone()} class="favicon-img" width="24" height="24" onerror={on_favicon_error} />
            </div>
            <div class="bookmark-title" title={row.title.clone()}>{&row.title}</div>
            <div class="bookmark-url" title={row.url.clone()}>{&row.host}</div>
            <div class="bookmark-actions">
                <button class="icon-btn open-btn" onclick={button_action(&props.on_open, row.url.clone())}>
                    {"Open"}
                </button>
                <button class="icon-btn select-btn" onclick={button_action(&props.on_toggle, row.id.clone())}>
                    {if row.selected { "Unselect" } else { "Select" }}
                </button>
                <button class="icon-btn delete-btn" onclick={button_action(&props.on_delete, row.id.clone())}>
                    {"Delete"}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderItemProps {
    pub summary: FolderSummary,
    pub on_rename: Callback<usize>,
    pub on_delete: Callback<usize>,
}

#[function_component(FolderItem)]
pub fn folder_item(props: &FolderItemProps) -> Html {
    let summary = &props.summary;
    let index = summary.index;

    html! {
        <div class="folder-item">
            <span class="folder-icon">{"📁"}</span>
            <div class="folder-info">
                <div class="folder-name">{&summary.name}</div>
                <div class="folder-count">{summary.count_label()}</div>
            </div>
            <div class="folder-actions">
                if summary.editable {
                    <>
                    <button class="icon-btn rename-folder-btn" onclick={props.on_rename.reform(move |_: MouseEvent| index)}>
                        {"✏️"}
                    </button>
                    <button class="icon-btn delete-folder-btn" onclick={props.on_delete.reform(move |_: MouseEvent| index)}>
                        {"🗑️"}
                    </button>
                    </>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyListProps {
    pub state: EmptyState,
}

#[function_component(EmptyList)]
pub fn empty_list(props: &EmptyListProps) -> Html {
    html! {
        <div class="empty-state">
            <div class="empty-state-icon">{"🦉"}</div>
            <p>{props.state.message()}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    html! {
        <div class="modal active">
            <div class="modal-content">
                <h3 class="modal-title">{props.title.clone()}</h3>
                <p class="modal-text">{props.message.clone()}</p>
                <div class="modal-actions">
                    <Button onclick={props.on_cancel.reform(|_| ())} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                    <Button onclick={props.on_confirm.reform(|_| ())} variant={ButtonVariant::Danger}>
                        {"Confirm"}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderModalProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<InputEvent>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(FolderModal)]
pub fn folder_modal(props: &FolderModalProps) -> Html {
    html! {
        <div class="modal active">
            <div class="modal-content">
                <h3 class="modal-title">{props.title.clone()}</h3>
                <input
                    type="text"
                    class="folder-name-input"
                    placeholder="Folder name"
                    value={props.value.clone()}
                    oninput={props.on_input.clone()}
                />
                <div class="modal-actions">
                    <Button onclick={props.on_cancel.reform(|_| ())} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                    <Button onclick={props.on_save.reform(|_| ())}>
                        {"Save"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
