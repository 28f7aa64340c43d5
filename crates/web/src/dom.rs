//! [`PageSurface`] over the host page's DOM.

use std::time::Duration;

use async_trait::async_trait;
use lore_core::card::{render_list_html, CharacterCard};
use lore_core::form::FormFields;
use lore_core::types::DbId;
use lore_ui::surface::PageSurface;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Window,
};

/// Class that hides a modal.
const HIDDEN_CLASS: &str = "hidden";

/// Class that starts a card's removal transition.
const FADE_CLASS: &str = "fade-out";

pub(crate) const CREATE_FORM_ID: &str = "characterForm";
pub(crate) const LIST_ID: &str = "characterList";
pub(crate) const EDIT_MODAL_ID: &str = "editModal";
pub(crate) const EDIT_FORM_ID: &str = "editForm";
pub(crate) const DELETE_MODAL_ID: &str = "deleteModal";
pub(crate) const DELETE_NAME_ID: &str = "deleteCharacterName";
pub(crate) const CONFIRM_DELETE_ID: &str = "confirmDelete";

pub(crate) struct DomSurface {
    window: Window,
    document: Document,
    pub(crate) list: Element,
    pub(crate) create_form: HtmlFormElement,
    pub(crate) edit_modal: Element,
    pub(crate) edit_form: HtmlFormElement,
    pub(crate) delete_modal: Element,
    delete_name: Element,
    pub(crate) confirm_delete: Element,
}

impl DomSurface {
    /// Look up every element the page must provide.
    pub(crate) fn from_document(document: &Document) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self {
            window,
            document: document.clone(),
            list: element(document, LIST_ID)?,
            create_form: element(document, CREATE_FORM_ID)?.dyn_into()?,
            edit_modal: element(document, EDIT_MODAL_ID)?,
            edit_form: element(document, EDIT_FORM_ID)?.dyn_into()?,
            delete_modal: element(document, DELETE_MODAL_ID)?,
            delete_name: element(document, DELETE_NAME_ID)?,
            confirm_delete: element(document, CONFIRM_DELETE_ID)?,
        })
    }

    fn set_hidden(&self, el: &Element, hidden: bool) {
        let result = if hidden {
            el.class_list().add_1(HIDDEN_CLASS)
        } else {
            el.class_list().remove_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            tracing::warn!(element = %el.id(), error = ?e, "Failed to toggle modal");
        }
    }
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("page is missing #{id}")))
}

/// Serialize a form the way `FormData` sees it. File inputs are skipped.
fn read_form(form: &HtmlFormElement) -> FormFields {
    let mut fields = FormFields::new();
    let data = match web_sys::FormData::new_with_form(form) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(form = %form.id(), error = ?e, "Failed to read form");
            return fields;
        }
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return fields;
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.insert(name, value);
        }
    }
    fields
}

fn set_control_value(control: &Element, value: &str) {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

#[async_trait(?Send)]
impl PageSurface for DomSurface {
    fn show_cards(&self, cards: &[CharacterCard]) {
        self.list.set_inner_html(&render_list_html(cards));
    }

    fn read_create_form(&self) -> FormFields {
        read_form(&self.create_form)
    }

    fn reset_create_form(&self) {
        self.create_form.reset();
    }

    fn fill_edit_form(&self, fields: &FormFields) {
        let controls = self.edit_form.elements();
        for (name, value) in fields.iter() {
            match controls.named_item(name) {
                Some(control) => set_control_value(&control, value),
                None => tracing::debug!(field = name, "Edit form has no such input"),
            }
        }
    }

    fn read_edit_form(&self) -> FormFields {
        read_form(&self.edit_form)
    }

    fn show_edit_modal(&self) {
        self.set_hidden(&self.edit_modal, false);
    }

    fn hide_edit_modal(&self) {
        self.set_hidden(&self.edit_modal, true);
    }

    fn show_delete_modal(&self, name: &str) {
        self.delete_name.set_text_content(Some(name));
        self.set_hidden(&self.delete_modal, false);
    }

    fn hide_delete_modal(&self) {
        self.set_hidden(&self.delete_modal, true);
    }

    fn fade_out_card(&self, id: DbId) {
        let selector = format!(".character-card[data-id=\"{id}\"]");
        match self.document.query_selector(&selector) {
            Ok(Some(card)) => {
                if let Err(e) = card.class_list().add_1(FADE_CLASS) {
                    tracing::warn!(character_id = id, error = ?e, "Failed to fade card");
                }
            }
            _ => tracing::debug!(character_id = id, "No card to fade"),
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!(error = ?e, "Failed to show alert");
        }
    }

    async fn wait(&self, delay: Duration) {
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let window = self.window.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .is_err()
            {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
