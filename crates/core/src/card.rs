//! Character card rendering.
//!
//! [`CharacterCard`] is the view model for one list entry; [`render_cards`]
//! maps a fetched collection onto cards and [`render_list_html`] produces the
//! markup that replaces the list container wholesale on every reload.

use std::fmt::Write as _;

use crate::character::{present, Character};
use crate::types::DbId;

/// Label shown for race and occupation when the record leaves them blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Display data for one character card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCard {
    pub id: DbId,
    pub name: String,
    /// Omitted from the card when `None`.
    pub title: Option<String>,
    pub race: String,
    pub status: String,
    pub occupation: String,
    /// Omitted from the card when `None`.
    pub description: Option<String>,
    /// Omitted from the card when `None`.
    pub notable_traits: Option<String>,
}

impl CharacterCard {
    pub fn from_character(character: &Character) -> Self {
        let owned = |v: &Option<String>| present(v).map(str::to_string);
        let or_unknown = |v: &Option<String>| present(v).unwrap_or(UNKNOWN_LABEL).to_string();

        Self {
            id: character.id,
            name: character.name.clone(),
            title: owned(&character.title),
            race: or_unknown(&character.race),
            status: character.status.clone(),
            occupation: or_unknown(&character.occupation),
            description: owned(&character.description),
            notable_traits: owned(&character.notable_traits),
        }
    }

    /// Card markup. Every record-supplied string is escaped.
    ///
    /// The Edit and Delete buttons carry `data-action` plus the record id
    /// (and the name, for delete) so a single delegated listener on the list
    /// container can route clicks without global callbacks.
    pub fn to_html(&self) -> String {
        let id = self.id;
        let name = escape_html(&self.name);
        let mut html = String::new();

        let _ = write!(
            html,
            "<div class=\"character-card\" data-id=\"{id}\">\
             <div class=\"card-header\"><div><h3>{name}</h3>"
        );
        if let Some(title) = &self.title {
            let _ = write!(html, "<p class=\"card-title\">{}</p>", escape_html(title));
        }
        let _ = write!(
            html,
            "</div><div class=\"card-actions\">\
             <button type=\"button\" data-action=\"edit\" data-id=\"{id}\">Edit</button>\
             <button type=\"button\" data-action=\"delete\" data-id=\"{id}\" data-name=\"{name}\">Delete</button>\
             </div></div>\
             <div class=\"card-details\">\
             <p><span>Race:</span> {race}</p>\
             <p><span>Status:</span> {status}</p>\
             <p><span>Occupation:</span> {occupation}</p>\
             </div>",
            race = escape_html(&self.race),
            status = escape_html(&self.status),
            occupation = escape_html(&self.occupation),
        );
        if let Some(description) = &self.description {
            let _ = write!(
                html,
                "<p class=\"card-description\"><span>Description:</span> {}</p>",
                escape_html(description)
            );
        }
        if let Some(traits) = &self.notable_traits {
            let _ = write!(
                html,
                "<p class=\"card-traits\"><span>Notable Traits:</span> {}</p>",
                escape_html(traits)
            );
        }
        html.push_str("</div>");
        html
    }
}

/// One card per record, in backend order.
pub fn render_cards(characters: &[Character]) -> Vec<CharacterCard> {
    characters.iter().map(CharacterCard::from_character).collect()
}

/// Full list container markup.
pub fn render_list_html(cards: &[CharacterCard]) -> String {
    cards.iter().map(CharacterCard::to_html).collect()
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
