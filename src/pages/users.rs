//! User administration: list, edit, and delete console users.
//!
//! This screen talks to the backend through the same transport as the
//! session store. A 401 on any of its calls means the credential went
//! stale, handled by the shared screen policy (`handle_screen_error`):
//! local logout, after which the protected gate redirects to login.

use leptos::prelude::*;

use crate::app::AppStore;
use crate::net::types::{User, UserUpdate};
use crate::pages::handle_screen_error;

/// User list with per-row edit and delete actions.
#[component]
pub fn UsersPage() -> impl IntoView {
    let store = expect_context::<AppStore>();

    let users = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<User>);

    // Initial load on mount.
    {
        let store = store.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match store.api().list_users().await {
                Ok(list) => users.set(list),
                Err(err) => handle_screen_error(&store, err, error).await,
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &store;
        }
    }

    // Fetch a fresh copy before editing; the row may be stale.
    let start_edit = {
        let store = store.clone();
        move |id: String| {
            #[cfg(feature = "hydrate")]
            {
                let store = store.clone();
                leptos::task::spawn_local(async move {
                    match store.api().get_user(&id).await {
                        Ok(user) => editing.set(Some(user)),
                        Err(err) => handle_screen_error(&store, err, error).await,
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&store, id);
            }
        }
    };

    let remove = {
        let store = store.clone();
        move |id: String| {
            #[cfg(feature = "hydrate")]
            {
                let store = store.clone();
                leptos::task::spawn_local(async move {
                    match store.api().delete_user(&id).await {
                        Ok(_) => users.update(|list| list.retain(|u| u.id != id)),
                        Err(err) => handle_screen_error(&store, err, error).await,
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&store, id);
            }
        }
    };

    view! {
        <div class="users-page">
            <header class="users-page__header">
                <h1>"Users"</h1>
            </header>

            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p>"Loading users..."</p> }
            >
                <table class="users-page__table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {{
                            let start_edit = start_edit.clone();
                            let remove = remove.clone();
                            move || {
                            let start_edit = start_edit.clone();
                            let remove = remove.clone();
                            users
                                .get()
                                .into_iter()
                                .map(|u| {
                                    let start_edit = start_edit.clone();
                                    let remove = remove.clone();
                                    let edit_id = u.id.clone();
                                    let remove_id = u.id.clone();
                                    view! {
                                        <tr>
                                            <td>{u.name.clone()}</td>
                                            <td>{u.email.clone()}</td>
                                            <td>{u.role_name().to_owned()}</td>
                                            <td class="users-page__actions">
                                                <button
                                                    class="btn"
                                                    on:click=move |_| start_edit(edit_id.clone())
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn btn--danger"
                                                    on:click=move |_| remove(remove_id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}}
                    </tbody>
                </table>
            </Show>

            {move || {
                editing.get().map(|user| {
                    let on_cancel = Callback::new(move |()| editing.set(None));
                    let on_saved = Callback::new(move |updated: User| {
                        users.update(|list| {
                            if let Some(row) = list.iter_mut().find(|u| u.id == updated.id) {
                                *row = updated.clone();
                            }
                        });
                        editing.set(None);
                    });
                    view! { <EditUserDialog user=user on_cancel=on_cancel on_saved=on_saved/> }
                })
            }}
        </div>
    }
}

/// Modal dialog for editing one user's name, email, and role.
#[component]
fn EditUserDialog(user: User, on_cancel: Callback<()>, on_saved: Callback<User>) -> impl IntoView {
    let store = expect_context::<AppStore>();

    let id = user.id.clone();
    let name = RwSignal::new(user.name.clone());
    let email = RwSignal::new(user.email.clone());
    let role = RwSignal::new(user.role.display().to_owned());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if pending.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            let id = id.clone();
            pending.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                let patch = UserUpdate {
                    name: Some(name.get_untracked()),
                    email: Some(email.get_untracked()),
                    role: Some(role.get_untracked()),
                };
                match store.api().update_user(&id, &patch).await {
                    Ok(updated) => on_saved.run(updated),
                    Err(err) => handle_screen_error(&store, err, error).await,
                }
                pending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, &id, on_saved);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Edit user"</h2>

                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <label class="dialog__label">
                    "Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Role"
                    <select
                        class="dialog__input"
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        <option value="staff">"Staff"</option>
                        <option value="manager">"Manager"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                </label>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        prop:disabled=move || pending.get()
                        on:click=move |_| submit.run(())
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
