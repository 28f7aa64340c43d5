//! REST client for the `/characters` backend resource.
//!
//! [`api::CharacterApi`] is the seam the UI controller talks to;
//! [`api::HttpCharacterApi`] implements it over [`reqwest`].

pub mod api;
pub mod config;
