//! The presentation scaffolding the controller drives.
//!
//! In the browser this is the host page's DOM (list container, create form,
//! edit modal, delete confirmation modal); natively it is a terminal. The
//! controller never touches either directly.

use std::time::Duration;

use async_trait::async_trait;
use lore_core::card::CharacterCard;
use lore_core::form::FormFields;
use lore_core::types::DbId;

#[async_trait(?Send)]
pub trait PageSurface {
    /// Replace the whole list container with these cards.
    fn show_cards(&self, cards: &[CharacterCard]);

    /// Serialize the create form.
    fn read_create_form(&self) -> FormFields;

    /// Clear every input of the create form.
    fn reset_create_form(&self);

    /// Populate the edit form, including its hidden id input.
    fn fill_edit_form(&self, fields: &FormFields);

    /// Serialize the edit form.
    fn read_edit_form(&self) -> FormFields;

    fn show_edit_modal(&self);

    fn hide_edit_modal(&self);

    /// Show the delete confirmation naming the target character.
    fn show_delete_modal(&self, name: &str);

    fn hide_delete_modal(&self);

    /// Start the removal transition on one card.
    fn fade_out_card(&self, id: DbId);

    /// Blocking user-facing alert.
    fn alert(&self, message: &str);

    /// Yield to the host event loop for `delay`.
    async fn wait(&self, delay: Duration);
}
