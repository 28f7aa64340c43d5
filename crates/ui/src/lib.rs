//! View-controller for the character list page.
//!
//! [`controller::CharacterListController`] owns the page's interaction state
//! and drives a [`surface::PageSurface`] (the DOM in the browser, a terminal
//! natively) from the results of [`lore_client::api::CharacterApi`] calls.

pub mod controller;
pub mod messages;
pub mod state;
pub mod surface;
