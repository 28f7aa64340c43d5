//! Character record as served by the `/characters` resource.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::DbId;

/// A character returned by the backend.
///
/// The client only ever holds a transient copy fetched for one render cycle;
/// the backend owns the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    /// Free text such as `Alive`, `Deceased`, `Unknown`. A `null` from the
    /// backend reads as an empty string.
    #[serde(default, deserialize_with = "string_or_null")]
    pub status: String,
    #[serde(default)]
    pub notable_traits: Option<String>,
}

impl Character {
    /// Build a record with only the required fields set.
    pub fn new(id: DbId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
            description: None,
            race: None,
            occupation: None,
            status: status.into(),
            notable_traits: None,
        }
    }
}

/// Treat an optional text field as absent when it is missing or empty.
///
/// Forms post empty strings for untouched inputs and the backend stores them
/// verbatim, so `Some("")` means "not filled in".
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
