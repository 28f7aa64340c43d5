//! Terminal front end for the Lore Organizer character list.
//!
//! Drives the same [`lore_ui::controller::CharacterListController`] as the
//! browser build, with a [`terminal::TerminalSurface`] standing in for the
//! page and a [`shell::Shell`] turning typed commands into user actions.

pub mod shell;
pub mod terminal;

/// `RUST_LOG` fallback: the controller's created/updated/deleted events are
/// visible without any configuration.
pub const DEFAULT_LOG_FILTER: &str = "lore_console=info,lore_ui=info,lore_client=info";
