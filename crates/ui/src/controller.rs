//! Character list view-controller.
//!
//! One [`CharacterListController`] is built per page session. It owns the
//! edit and delete modal state and turns user actions into one API call
//! each, followed by a full list reload on success. Errors never escape:
//! each action logs its failure and raises a static alert.
//!
//! State sits in `RefCell`s so event handlers can share the controller
//! through an `Rc`. Borrows are always released before an `.await`.

use std::cell::RefCell;
use std::time::Duration;

use lore_client::api::{CharacterApi, CharacterApiError};
use lore_core::card::render_cards;
use lore_core::form::{FormFields, ID_FIELD};
use lore_core::types::DbId;

use crate::messages;
use crate::state::{DeleteState, EditState};
use crate::surface::PageSurface;

pub struct CharacterListController<A, S> {
    api: A,
    surface: S,
    fade_delay: Duration,
    edit: RefCell<EditState>,
    delete: RefCell<DeleteState>,
}

impl<A, S> CharacterListController<A, S>
where
    A: CharacterApi,
    S: PageSurface,
{
    /// * `fade_delay` - how long a deleted card fades before the reload.
    pub fn new(api: A, surface: S, fade_delay: Duration) -> Self {
        Self {
            api,
            surface,
            fade_delay,
            edit: RefCell::new(EditState::Closed),
            delete: RefCell::new(DeleteState::Idle),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn edit_state(&self) -> EditState {
        self.edit.borrow().clone()
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete.borrow().clone()
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.delete.borrow().pending()
    }

    // ---- list ----

    /// Fetch every character and replace the rendered list.
    ///
    /// On failure the previous list stays on screen untouched.
    pub async fn reload(&self) {
        match self.api.list_characters().await {
            Ok(characters) => {
                let cards = render_cards(&characters);
                tracing::debug!(count = cards.len(), "Rendering character list");
                self.surface.show_cards(&cards);
            }
            Err(e) => self.report(messages::LOAD_LIST_FAILED, &e),
        }
    }

    // ---- create ----

    /// Post the create form. Clears it and reloads on success; leaves the
    /// entered values in place on failure.
    pub async fn submit_create(&self) {
        let fields = self.surface.read_create_form();
        match self.api.create_character(&fields).await {
            Ok(created) => {
                tracing::info!(character_id = created.id, name = %created.name, "Character created");
                self.surface.reset_create_form();
                self.reload().await;
            }
            Err(e) => self.report(messages::CREATE_FAILED, &e),
        }
    }

    // ---- edit ----

    /// Load one record into the edit modal and show it.
    ///
    /// Ignored unless the modal is closed. If the modal is dismissed before
    /// the record arrives, the result is dropped.
    pub async fn open_edit(&self, id: DbId) {
        {
            let mut edit = self.edit.borrow_mut();
            if *edit != EditState::Closed {
                tracing::debug!(character_id = id, state = ?*edit, "Edit already in progress, ignoring");
                return;
            }
            *edit = EditState::Loading { id };
        }

        let result = self.api.get_character(id).await;

        let still_loading = *self.edit.borrow() == EditState::Loading { id };
        if !still_loading {
            tracing::debug!(character_id = id, "Edit dismissed while loading");
            return;
        }

        match result {
            Ok(character) => {
                self.surface.fill_edit_form(&FormFields::from_character(&character));
                self.surface.show_edit_modal();
                *self.edit.borrow_mut() = EditState::Open { id };
            }
            Err(e) => {
                *self.edit.borrow_mut() = EditState::Closed;
                self.report(messages::LOAD_ONE_FAILED, &e);
            }
        }
    }

    /// Send the edit form (minus its id field) as an update.
    ///
    /// On success the modal closes and the list reloads. On failure the
    /// modal stays open with the user's input so they can retry.
    pub async fn submit_edit(&self) {
        let id = {
            let mut edit = self.edit.borrow_mut();
            let EditState::Open { id } = *edit else {
                tracing::debug!(state = ?*edit, "Edit submit outside an open modal, ignoring");
                return;
            };
            *edit = EditState::Submitting { id };
            id
        };

        let payload = self.surface.read_edit_form().without(ID_FIELD);
        match self.api.update_character(id, &payload).await {
            Ok(updated) => {
                tracing::info!(character_id = id, name = %updated.name, "Character updated");
                let still_submitting = {
                    let mut edit = self.edit.borrow_mut();
                    let current = *edit == (EditState::Submitting { id });
                    if current {
                        *edit = EditState::Closed;
                    }
                    current
                };
                // A modal reopened for another record while saving stays put.
                if still_submitting {
                    self.surface.hide_edit_modal();
                } else {
                    tracing::debug!(character_id = id, "Edit modal changed while saving");
                }
                self.reload().await;
            }
            Err(e) => {
                {
                    let mut edit = self.edit.borrow_mut();
                    if *edit == (EditState::Submitting { id }) {
                        *edit = EditState::Open { id };
                    }
                }
                self.report(messages::UPDATE_FAILED, &e);
            }
        }
    }

    /// Close the edit modal without submitting (outside click, Escape).
    pub fn dismiss_edit(&self) {
        let previous = self.edit.replace(EditState::Closed);
        if previous != EditState::Closed {
            tracing::debug!(state = ?previous, "Edit modal dismissed");
        }
        self.surface.hide_edit_modal();
    }

    // ---- delete ----

    /// Remember the target and ask for confirmation.
    pub fn request_delete(&self, id: DbId, name: &str) {
        {
            let mut delete = self.delete.borrow_mut();
            if let DeleteState::Deleting { .. } = *delete {
                tracing::debug!(character_id = id, "Delete already in flight, ignoring");
                return;
            }
            *delete = DeleteState::Confirming {
                id,
                name: name.to_string(),
            };
        }
        self.surface.show_delete_modal(name);
    }

    /// Delete the pending target.
    ///
    /// On success the card fades, the modal closes after the fade delay and
    /// the list reloads. On failure the modal closes and nothing is retried.
    pub async fn confirm_delete(&self) {
        let (id, name) = {
            let mut delete = self.delete.borrow_mut();
            let DeleteState::Confirming { id, name } = &*delete else {
                tracing::debug!(state = ?*delete, "Delete confirmed with nothing pending, ignoring");
                return;
            };
            let (id, name) = (*id, name.clone());
            *delete = DeleteState::Deleting {
                id,
                name: name.clone(),
            };
            (id, name)
        };

        match self.api.delete_character(id).await {
            Ok(()) => {
                tracing::info!(character_id = id, name = %name, "Character deleted");
                self.surface.fade_out_card(id);
                self.surface.wait(self.fade_delay).await;
                *self.delete.borrow_mut() = DeleteState::Idle;
                self.surface.hide_delete_modal();
                self.reload().await;
            }
            Err(e) => {
                self.report(messages::DELETE_FAILED, &e);
                *self.delete.borrow_mut() = DeleteState::Idle;
                self.surface.hide_delete_modal();
            }
        }
    }

    /// Drop the pending target without any request (outside click).
    pub fn cancel_delete(&self) {
        {
            let mut delete = self.delete.borrow_mut();
            if !matches!(*delete, DeleteState::Confirming { .. }) {
                tracing::debug!(state = ?*delete, "Nothing to cancel");
                return;
            }
            *delete = DeleteState::Idle;
        }
        self.surface.hide_delete_modal();
    }

    // ---- private helpers ----

    fn report(&self, message: &str, error: &CharacterApiError) {
        tracing::error!(error = %error, "{message}");
        self.surface.alert(message);
    }
}
