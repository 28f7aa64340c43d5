//! User-facing alert texts, one per failing action.

pub const LOAD_LIST_FAILED: &str = "Failed to load characters";
pub const CREATE_FAILED: &str = "Failed to create character";
pub const LOAD_ONE_FAILED: &str = "Failed to load character";
pub const UPDATE_FAILED: &str = "Failed to update character";
pub const DELETE_FAILED: &str = "Failed to delete character";
