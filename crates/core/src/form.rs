//! Flat form serialization.
//!
//! A submitted form is a flat `name -> string` map in document order. The
//! create flow posts it unchanged; the edit flow strips [`ID_FIELD`] first.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::character::Character;

/// Name of the hidden identifier input in the edit form.
pub const ID_FIELD: &str = "id";

/// Editable character fields, in the order the forms lay them out.
pub const CHARACTER_FIELDS: &[&str] = &[
    "name",
    "title",
    "race",
    "occupation",
    "status",
    "description",
    "notable_traits",
];

/// Serialized form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(IndexMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of these fields with one entry removed, order preserved.
    pub fn without(&self, name: &str) -> Self {
        let mut fields = self.0.clone();
        fields.shift_remove(name);
        Self(fields)
    }

    /// Pre-fill values for the edit form.
    ///
    /// Every field in [`CHARACTER_FIELDS`] is present; absent optional fields
    /// become empty strings. The record id goes into [`ID_FIELD`].
    pub fn from_character(character: &Character) -> Self {
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();

        let mut fields = Self::new();
        fields.insert(ID_FIELD, character.id.to_string());
        fields.insert("name", character.name.clone());
        fields.insert("title", optional(&character.title));
        fields.insert("race", optional(&character.race));
        fields.insert("occupation", optional(&character.occupation));
        fields.insert("status", character.status.clone());
        fields.insert("description", optional(&character.description));
        fields.insert("notable_traits", optional(&character.notable_traits));
        fields
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
