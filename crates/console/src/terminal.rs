//! [`PageSurface`] for a line-oriented terminal.
//!
//! Modals become printed headers, forms are field buffers the shell fills
//! from prompts, and the fade is a printed notice followed by a real delay.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use lore_core::card::CharacterCard;
use lore_core::form::FormFields;
use lore_core::types::DbId;
use lore_ui::surface::PageSurface;

pub struct TerminalSurface<W: Write> {
    out: RefCell<W>,
    cards: RefCell<Vec<CharacterCard>>,
    create_form: RefCell<FormFields>,
    edit_form: RefCell<FormFields>,
    edit_open: Cell<bool>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            cards: RefCell::new(Vec::new()),
            create_form: RefCell::new(FormFields::new()),
            edit_form: RefCell::new(FormFields::new()),
            edit_open: Cell::new(false),
        }
    }

    /// Print one line.
    pub fn say(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        let _ = writeln!(out, "{text}");
    }

    /// Print a prompt without a newline and flush it.
    pub fn prompt(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }

    /// Cards from the last render.
    pub fn cards(&self) -> Vec<CharacterCard> {
        self.cards.borrow().clone()
    }

    pub fn set_create_form(&self, fields: FormFields) {
        *self.create_form.borrow_mut() = fields;
    }

    pub fn create_form(&self) -> FormFields {
        self.create_form.borrow().clone()
    }

    pub fn edit_form(&self) -> FormFields {
        self.edit_form.borrow().clone()
    }

    /// Overwrite one edit form field.
    pub fn set_edit_field(&self, name: &str, value: &str) {
        self.edit_form.borrow_mut().insert(name, value);
    }

    pub fn edit_open(&self) -> bool {
        self.edit_open.get()
    }
}

impl TerminalSurface<Vec<u8>> {
    /// Everything printed so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }
}

/// Text block for one card.
pub fn card_text(card: &CharacterCard) -> String {
    let mut text = match &card.title {
        Some(title) => format!("#{} {} ({})", card.id, card.name, title),
        None => format!("#{} {}", card.id, card.name),
    };
    text.push_str(&format!(
        "\n    Race: {} | Status: {} | Occupation: {}",
        card.race, card.status, card.occupation
    ));
    if let Some(description) = &card.description {
        text.push_str(&format!("\n    Description: {description}"));
    }
    if let Some(traits) = &card.notable_traits {
        text.push_str(&format!("\n    Notable Traits: {traits}"));
    }
    text
}

#[async_trait(?Send)]
impl<W: Write> PageSurface for TerminalSurface<W> {
    fn show_cards(&self, cards: &[CharacterCard]) {
        *self.cards.borrow_mut() = cards.to_vec();
        if cards.is_empty() {
            self.say("(no characters)");
            return;
        }
        for card in cards {
            self.say(&card_text(card));
        }
    }

    fn read_create_form(&self) -> FormFields {
        self.create_form()
    }

    fn reset_create_form(&self) {
        *self.create_form.borrow_mut() = FormFields::new();
    }

    fn fill_edit_form(&self, fields: &FormFields) {
        *self.edit_form.borrow_mut() = fields.clone();
    }

    fn read_edit_form(&self) -> FormFields {
        self.edit_form()
    }

    fn show_edit_modal(&self) {
        self.edit_open.set(true);
        let id = self.edit_form.borrow().get("id").unwrap_or("?").to_string();
        self.say(&format!("-- editing #{id} (Enter keeps a value, '.' discards) --"));
    }

    fn hide_edit_modal(&self) {
        self.edit_open.set(false);
    }

    fn show_delete_modal(&self, name: &str) {
        self.say(&format!("Are you sure you want to delete {name}?"));
    }

    fn hide_delete_modal(&self) {}

    fn fade_out_card(&self, id: DbId) {
        self.say(&format!("Removing #{id}..."));
    }

    fn alert(&self, message: &str) {
        self.say(&format!("error: {message}"));
    }

    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
