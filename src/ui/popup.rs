/// Popup UI for Owl Bookmarks

use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::commands;
use crate::config::{DEFAULT_FOLDER, SUCCESS_BANNER_MS};
use crate::error::BookmarkError;
use crate::extension;
use crate::modal::{ConfirmDialog, FolderEditor};
use crate::storage::SyncStorage;
use crate::store::{BookmarkStore, FolderFilter};
use crate::ui::components::{BookmarkCard, ConfirmModal, EmptyList, FolderItem, FolderModal};
use crate::ui::owl::{Owl, pupil_offset};
use crate::view::{self, BookmarkList};

const IMPORT_ERROR: &str = "Error importing file. Please check the format.";

#[derive(Debug, Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

impl AppState {
    /// State after the user edits a field or switches screen
    fn after_edit(&self) -> AppState {
        match self {
            AppState::Error(_) => AppState::Idle,
            other => other.clone(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Screen {
    Add,
    View,
    Folders,
    Settings,
}

impl Screen {
    const ALL: [Screen; 4] = [Screen::Add, Screen::View, Screen::Folders, Screen::Settings];

    fn label(self) -> &'static str {
        match self {
            Screen::Add => "Add",
            Screen::View => "Bookmarks",
            Screen::Folders => "Folders",
            Screen::Settings => "Settings",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let store = use_state(BookmarkStore::default);
    let screen = use_state(|| Screen::View);
    let confirm = use_state(ConfirmDialog::default);
    let folder_editor = use_state(FolderEditor::default);
    let folder_name = use_state(String::new);
    let title_input = use_state(String::new);
    let url_input = use_state(String::new);
    let folder_input = use_state(|| DEFAULT_FOLDER.to_string());
    let success = use_state(|| None::<String>);
    let pupils = use_state(|| (0.0, 0.0));
    let owl_ref = use_node_ref();

    // Load storage on mount
    {
        let state = state.clone();
        let store = store.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match commands::load(&SyncStorage).await {
                    Ok(loaded) => {
                        store.set(loaded);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_mouse_move = {
        let pupils = pupils.clone();
        let owl_ref = owl_ref.clone();

        Callback::from(move |e: MouseEvent| {
            if let Some(owl) = owl_ref.cast::<Element>() {
                let rect = owl.get_bounding_client_rect();
                let center = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
                pupils.set(pupil_offset(center, (e.client_x() as f64, e.client_y() as f64)));
            }
        })
    };

    let on_screen_click = {
        let screen = screen.clone();
        let state = state.clone();
        move |target: Screen| {
            let screen = screen.clone();
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                dismiss_error(&state);
                screen.set(target);
            })
        }
    };

    // Add screen

    let on_title_input = text_setter(&title_input, &state);
    let on_url_input = text_setter(&url_input, &state);

    let on_folder_change = {
        let folder_input = folder_input.clone();
        let state = state.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                dismiss_error(&state);
                folder_input.set(select.value());
            }
        })
    };

    let on_capture_page = {
        let title_input = title_input.clone();
        let url_input = url_input.clone();
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let title_input = title_input.clone();
            let url_input = url_input.clone();
            let state = state.clone();

            spawn_local(async move {
                match extension::active_tab().await {
                    Ok(Some(tab)) => {
                        title_input.set(tab.title);
                        url_input.set(tab.url);
                    }
                    Ok(None) => log::warn!("no active tab to capture"),
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_add = {
        let store = store.clone();
        let state = state.clone();
        let success = success.clone();
        let title_input = title_input.clone();
        let url_input = url_input.clone();
        let folder_input = folder_input.clone();

        Callback::from(move |_: MouseEvent| {
            let title = title_input.trim().to_string();
            let url = url_input.trim().to_string();
            if title.is_empty() || url.is_empty() {
                state.set(AppState::Error("Title and URL are required".to_string()));
                return;
            }

            let snapshot = (*store).clone();
            // The picked folder may have been renamed or deleted since
            let folder = snapshot.folder_or_default(&folder_input).to_string();
            folder_input.set(folder.clone());
            let store = store.clone();
            let state = state.clone();
            let success = success.clone();
            let title_input = title_input.clone();
            let url_input = url_input.clone();

            spawn_local(async move {
                let added =
                    commands::add_bookmark(&SyncStorage, &snapshot, &title, &url, &folder).await;
                match added {
                    Ok(next) => {
                        store.set(next);
                        title_input.set(String::new());
                        url_input.set(String::new());
                        state.set(AppState::Idle);
                        flash_success(&success, "Bookmark saved successfully! 🎉");
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to save bookmark: {}", e))),
                }
            });
        })
    };

    // Bookmark list

    let on_search_input = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*store).clone();
                next.set_search_query(input.value());
                store.set(next);
            }
        })
    };

    let on_folder_tab = {
        let store = store.clone();
        move |filter: FolderFilter| {
            let store = store.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*store).clone();
                next.set_folder_filter(filter.clone());
                store.set(next);
            })
        }
    };

    let on_open = Callback::from(|url: String| {
        spawn_local(async move {
            if let Err(e) = extension::open_tab(&url).await {
                log::error!("{}", e);
            }
        });
    });

    let on_toggle = {
        let store = store.clone();
        Callback::from(move |id: String| {
            let mut next = (*store).clone();
            next.toggle_selection(&id);
            store.set(next);
        })
    };

    let request_confirm = {
        let confirm = confirm.clone();
        move |pending: ConfirmDialog| {
            let mut dialog = (*confirm).clone();
            dialog.request(pending);
            confirm.set(dialog);
        }
    };

    let on_delete_bookmark = {
        let request_confirm = request_confirm.clone();
        Callback::from(move |id: String| request_confirm(ConfirmDialog::PendingDeleteBookmark(id)))
    };

    let on_delete_selected = {
        let request_confirm = request_confirm.clone();
        Callback::from(move |_: MouseEvent| request_confirm(ConfirmDialog::PendingDeleteSelected))
    };

    let on_cancel_selection = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*store).clone();
            next.clear_selection();
            store.set(next);
        })
    };

    // Confirmation dialog

    let on_confirm = {
        let confirm = confirm.clone();
        let store = store.clone();
        let state = state.clone();
        let success = success.clone();

        Callback::from(move |_: ()| {
            let mut dialog = (*confirm).clone();
            let confirmed = dialog.confirm();
            confirm.set(dialog);

            let cleared_all = confirmed == ConfirmDialog::PendingClearAll;
            let snapshot = (*store).clone();
            let store = store.clone();
            let state = state.clone();
            let success = success.clone();

            spawn_local(async move {
                match commands::run_confirmed(&SyncStorage, &snapshot, confirmed).await {
                    Ok(next) => {
                        store.set(next);
                        state.set(AppState::Idle);
                        if cleared_all {
                            flash_success(&success, "All data cleared! 🗑️");
                        }
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_cancel_confirm = {
        let confirm = confirm.clone();
        Callback::from(move |_: ()| {
            let mut dialog = (*confirm).clone();
            dialog.cancel();
            confirm.set(dialog);
        })
    };

    // Folders

    let on_new_folder = {
        let folder_editor = folder_editor.clone();
        let folder_name = folder_name.clone();
        Callback::from(move |_: MouseEvent| {
            let mut editor = *folder_editor;
            editor.open_new();
            folder_editor.set(editor);
            folder_name.set(String::new());
        })
    };

    let on_rename_folder = {
        let folder_editor = folder_editor.clone();
        let folder_name = folder_name.clone();
        let store = store.clone();
        Callback::from(move |index: usize| {
            let mut editor = *folder_editor;
            editor.open_rename(&store, index);
            folder_name.set(editor.initial_value(&store));
            folder_editor.set(editor);
        })
    };

    let on_delete_folder = {
        let request_confirm = request_confirm.clone();
        Callback::from(move |index: usize| {
            request_confirm(ConfirmDialog::PendingDeleteFolder(index))
        })
    };

    let on_folder_name_input = text_setter(&folder_name, &state);

    let on_cancel_folder = {
        let folder_editor = folder_editor.clone();
        Callback::from(move |_: ()| {
            let mut editor = *folder_editor;
            editor.dismiss();
            folder_editor.set(editor);
        })
    };

    let on_save_folder = {
        let folder_editor = folder_editor.clone();
        let folder_name = folder_name.clone();
        let store = store.clone();
        let state = state.clone();

        Callback::from(move |_: ()| {
            let name = folder_name.trim().to_string();
            if name.is_empty() {
                return;
            }

            let editor = *folder_editor;
            let snapshot = (*store).clone();
            let folder_editor = folder_editor.clone();
            let store = store.clone();
            let state = state.clone();

            spawn_local(async move {
                match commands::save_folder(&SyncStorage, &snapshot, editor, &name).await {
                    Ok(next) => {
                        store.set(next);
                        state.set(AppState::Idle);
                        folder_editor.set(FolderEditor::Closed);
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    // Settings

    let on_import = {
        let store = store.clone();
        let state = state.clone();
        let success = success.clone();

        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow picking the same file again
            input.set_value("");

            let snapshot = (*store).clone();
            let store = store.clone();
            let state = state.clone();
            let success = success.clone();

            spawn_local(async move {
                let raw = match JsFuture::from(file.text()).await {
                    Ok(text) => text.as_string().unwrap_or_default(),
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to read file: {:?}", e)));
                        return;
                    }
                };

                match commands::import(&SyncStorage, &snapshot, &raw).await {
                    Ok(next) => {
                        store.set(next);
                        state.set(AppState::Idle);
                        flash_success(&success, "Bookmarks imported successfully! 🎉");
                    }
                    Err(e @ (BookmarkError::Parse(_) | BookmarkError::DuplicateId(_))) => {
                        log::warn!("import rejected: {}", e);
                        alert(IMPORT_ERROR);
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_export = {
        let store = store.clone();
        let success = success.clone();
        let state = state.clone();

        Callback::from(move |_: MouseEvent| match commands::export(&store, Utc::now()) {
            Ok((filename, json)) => {
                extension::export_to_file(&json, &filename);
                flash_success(&success, "Bookmarks exported successfully! 📥");
            }
            Err(e) => state.set(AppState::Error(format!("Export failed: {}", e))),
        })
    };

    let on_sync_info = {
        let success = success.clone();
        Callback::from(move |_: MouseEvent| {
            flash_success(&success, "Bookmarks are automatically synced via Chrome Sync! ☁️");
        })
    };

    let on_clear_all = {
        let request_confirm = request_confirm.clone();
        Callback::from(move |_: MouseEvent| request_confirm(ConfirmDialog::PendingClearAll))
    };

    html! {
        <div class="popup" onmousemove={on_mouse_move}>
            <div class="popup-header">
                <Owl node_ref={owl_ref.clone()} pupils={*pupils} />
                <h1 class="popup-title">{"Owl Bookmarks"}</h1>
            </div>

            <nav class="nav">
                {for Screen::ALL.iter().map(|&target| html! {
                    <button
                        class={if *screen == target { "nav-btn active" } else { "nav-btn" }}
                        onclick={on_screen_click(target)}
                    >
                        {target.label()}
                    </button>
                })}
            </nav>

            if let Some(message) = (*success).clone() {
                <div class="success-message">{message}</div>
            }

            // Status display
            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                AppState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                AppState::Idle => html! {},
            }}

            {match *screen {
                Screen::Add => html! {
                    <div class="screen active">
                        <input
                            type="text"
                            placeholder="Title"
                            value={(*title_input).clone()}
                            oninput={on_title_input}
                        />
                        <input
                            type="url"
                            placeholder="https://"
                            value={(*url_input).clone()}
                            oninput={on_url_input}
                        />
                        <select onchange={on_folder_change}>
                            {for store.folders().iter().map(|name| html! {
                                <option
                                    value={name.clone()}
                                    selected={name.as_str() == store.folder_or_default(&folder_input)}
                                >
                                    {name}
                                </option>
                            })}
                        </select>
                        <Button onclick={on_capture_page} variant={ButtonVariant::Secondary} block={true}>
                            {"Use current page"}
                        </Button>
                        <Button onclick={on_add} block={true}>
                            {"Save bookmark"}
                        </Button>
                    </div>
                },
                Screen::View => html! {
                    <div class="screen active">
                        <input
                            type="text"
                            class="search-input"
                            placeholder="Search bookmarks..."
                            value={store.search_query().to_string()}
                            oninput={on_search_input}
                        />
                        <div class="folder-tabs">
                            {for view::folder_tabs(&store).into_iter().map(|tab| html! {
                                <div
                                    class={if tab.active { "folder-tab active" } else { "folder-tab" }}
                                    onclick={on_folder_tab(tab.filter.clone())}
                                >
                                    {tab.label}
                                </div>
                            })}
                        </div>
                        {match view::render_list(&store) {
                            BookmarkList::Empty(empty) => html! { <EmptyList state={empty} /> },
                            BookmarkList::Items { rows, selected_count } => html! {
                                <>
                                if selected_count > 0 {
                                    <div class="bulk-actions">
                                        <span class="selected-count">{format!("{} selected", selected_count)}</span>
                                        <Button onclick={on_delete_selected} variant={ButtonVariant::Danger}>
                                            {"Delete selected"}
                                        </Button>
                                        <Button onclick={on_cancel_selection} variant={ButtonVariant::Secondary}>
                                            {"Cancel"}
                                        </Button>
                                    </div>
                                }
                                <div class="bookmarks-grid">
                                    {for rows.into_iter().map(|row| {
                                        let key = row.id.clone();
                                        html! {
                                            <BookmarkCard
                                                key={key}
                                                row={row}
                                                on_open={on_open.clone()}
                                                on_toggle={on_toggle.clone()}
                                                on_delete={on_delete_bookmark.clone()}
                                            />
                                        }
                                    })}
                                </div>
                                </>
                            },
                        }}
                    </div>
                },
                Screen::Folders => html! {
                    <div class="screen active">
                        <Button onclick={on_new_folder} variant={ButtonVariant::Secondary} block={true}>
                            {"+ New folder"}
                        </Button>
                        <div class="folders-list">
                            {for view::folder_summaries(&store).into_iter().map(|summary| {
                                let key = summary.index;
                                html! {
                                    <FolderItem
                                        key={key}
                                        summary={summary}
                                        on_rename={on_rename_folder.clone()}
                                        on_delete={on_delete_folder.clone()}
                                    />
                                }
                            })}
                        </div>
                    </div>
                },
                Screen::Settings => html! {
                    <div class="screen active settings">
                        <label class="import-label">
                            {"Import bookmarks"}
                            <input type="file" accept="application/json,.json" onchange={on_import} />
                        </label>
                        <Button onclick={on_export} variant={ButtonVariant::Secondary} block={true}>
                            {"Export bookmarks"}
                        </Button>
                        <Button onclick={on_sync_info} variant={ButtonVariant::Secondary} block={true}>
                            {"Sync"}
                        </Button>
                        <Button onclick={on_clear_all} variant={ButtonVariant::Danger} block={true}>
                            {"Clear all data"}
                        </Button>
                    </div>
                },
            }}

            if confirm.is_pending() {
                <ConfirmModal
                    title={confirm.title()}
                    message={confirm.message(&store)}
                    on_confirm={on_confirm}
                    on_cancel={on_cancel_confirm}
                />
            }

            if folder_editor.is_open() {
                <FolderModal
                    title={folder_editor.title()}
                    value={(*folder_name).clone()}
                    on_input={on_folder_name_input}
                    on_save={on_save_folder}
                    on_cancel={on_cancel_folder}
                />
            }

            <p class="footer-popup">
                {format!("{} • Owl Bookmarks v0.1.0", view::count_label(store.bookmarks().len()))}
            </p>
        </div>
    }
}

// Helper functions

fn text_setter(
    handle: &UseStateHandle<String>,
    state: &UseStateHandle<AppState>,
) -> Callback<InputEvent> {
    let handle = handle.clone();
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            dismiss_error(&state);
            handle.set(input.value());
        }
    })
}

fn dismiss_error(state: &UseStateHandle<AppState>) {
    let next = state.after_edit();
    if next != **state {
        state.set(next);
    }
}

fn flash_success(success: &UseStateHandle<Option<String>>, message: &str) {
    success.set(Some(message.to_string()));

    let success = success.clone();
    let clear = Closure::once_into_js(move || success.set(None));
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            clear.unchecked_ref(),
            SUCCESS_BANNER_MS,
        );
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
