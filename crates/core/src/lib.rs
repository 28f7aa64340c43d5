//! Domain types for the Lore Organizer character client.
//!
//! Holds the character record as served by the backend, the flat form field
//! map used for create/update payloads, and the card renderer that turns
//! records into list markup.

pub mod card;
pub mod character;
pub mod error;
pub mod form;
pub mod types;
