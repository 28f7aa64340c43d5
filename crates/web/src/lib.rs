//! Lore Organizer browser front end (WASM).
//!
//! Binds a [`CharacterListController`] to the host page's DOM: the create
//! form, the list container, the edit modal and the delete confirmation
//! modal. The page markup itself is provided by the host.
//!
//! Only meaningful on `wasm32`; the crate is empty on other targets.

#![cfg(target_arch = "wasm32")]

mod dom;
mod events;

use std::rc::Rc;

use lore_client::api::HttpCharacterApi;
use lore_client::config::ClientConfig;
use lore_ui::controller::CharacterListController;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom::DomSurface;

pub(crate) type PageController = CharacterListController<HttpCharacterApi, DomSurface>;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let doc = document.clone();
        events::listen(&document, "DOMContentLoaded", move |_| {
            if let Err(e) = boot(&doc) {
                tracing::error!(error = ?e, "Failed to start character list client");
            }
        })?;
        Ok(())
    } else {
        boot(&document)
    }
}

/// Build the controller, wire listeners and run the initial load.
fn boot(document: &Document) -> Result<(), JsValue> {
    let config = page_config(document)?;
    let surface = DomSurface::from_document(document)?;
    let api = HttpCharacterApi::new(config.api_url.clone());
    let controller = Rc::new(CharacterListController::new(api, surface, config.fade_delay));

    events::bind(&controller, document)?;
    tracing::info!(api_url = %config.api_url, "Character list client started");

    wasm_bindgen_futures::spawn_local(async move { controller.reload().await });
    Ok(())
}

/// Read overrides from `<body data-api-url=".." data-fade-delay-ms="..">`.
fn page_config(document: &Document) -> Result<ClientConfig, JsValue> {
    let body = document.body();
    ClientConfig::from_lookup(|name| {
        let attribute = match name {
            "LORE_API_URL" => "data-api-url",
            "LORE_FADE_DELAY_MS" => "data-fade-delay-ms",
            _ => return None,
        };
        body.as_ref()?.get_attribute(attribute)
    })
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
