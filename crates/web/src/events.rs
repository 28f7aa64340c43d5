//! Event-listener registration.
//!
//! Listeners are attached once per page session and capture the shared
//! controller. Card buttons are handled by one delegated listener on the
//! list container, which reads the record id (and name) from the button's
//! `data-*` attributes, so re-rendering the list needs no re-binding.

use std::rc::Rc;

use lore_core::error::parse_id;
use lore_ui::state::EditState;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use crate::PageController;

/// Attach a page-lifetime listener.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Wire every page control to the controller.
pub(crate) fn bind(controller: &Rc<PageController>, document: &Document) -> Result<(), JsValue> {
    let surface = controller.surface();

    let ctrl = Rc::clone(controller);
    listen(&surface.create_form, "submit", move |event| {
        event.prevent_default();
        let ctrl = Rc::clone(&ctrl);
        spawn_local(async move { ctrl.submit_create().await });
    })?;

    let ctrl = Rc::clone(controller);
    listen(&surface.list, "click", move |event| on_card_action(&ctrl, &event))?;

    let ctrl = Rc::clone(controller);
    listen(&surface.edit_form, "submit", move |event| {
        event.prevent_default();
        let ctrl = Rc::clone(&ctrl);
        spawn_local(async move { ctrl.submit_edit().await });
    })?;

    let ctrl = Rc::clone(controller);
    let edit_modal = surface.edit_modal.clone();
    listen(&surface.edit_modal, "click", move |event| {
        if is_backdrop(&event, &edit_modal) {
            ctrl.dismiss_edit();
        }
    })?;

    let ctrl = Rc::clone(controller);
    listen(document, "keydown", move |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if escape && ctrl.edit_state() != EditState::Closed {
            ctrl.dismiss_edit();
        }
    })?;

    let ctrl = Rc::clone(controller);
    let delete_modal = surface.delete_modal.clone();
    listen(&surface.delete_modal, "click", move |event| {
        if is_backdrop(&event, &delete_modal) {
            ctrl.cancel_delete();
        }
    })?;

    let ctrl = Rc::clone(controller);
    listen(&surface.confirm_delete, "click", move |event| {
        event.prevent_default();
        let ctrl = Rc::clone(&ctrl);
        spawn_local(async move { ctrl.confirm_delete().await });
    })?;

    Ok(())
}

/// Route a click inside the list container to Edit or Delete.
fn on_card_action(ctrl: &Rc<PageController>, event: &Event) {
    let Some(button) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("[data-action]").ok().flatten())
    else {
        return;
    };

    let id = match parse_id(&button.get_attribute("data-id").unwrap_or_default()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Card button without a usable id");
            return;
        }
    };

    match button.get_attribute("data-action").as_deref() {
        Some("edit") => {
            let ctrl = Rc::clone(ctrl);
            spawn_local(async move { ctrl.open_edit(id).await });
        }
        Some("delete") => {
            let name = button.get_attribute("data-name").unwrap_or_default();
            ctrl.request_delete(id, &name);
        }
        other => tracing::debug!(action = ?other, "Unknown card action"),
    }
}

/// True when the click landed on the modal overlay itself rather than on
/// its content.
fn is_backdrop(event: &Event, modal: &Element) -> bool {
    event.target().is_some_and(|target| {
        AsRef::<JsValue>::as_ref(&target) == AsRef::<JsValue>::as_ref(modal)
    })
}
