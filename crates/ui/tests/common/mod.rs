//! Test doubles for driving `CharacterListController` without a browser.
//!
//! [`FakeApi`] keeps characters in memory, logs every call and can be told
//! to fail specific operations. [`RecordingSurface`] stands in for the DOM:
//! forms are plain field maps and every visible effect is recorded.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use lore_client::api::{CharacterApi, CharacterApiError};
use lore_core::card::CharacterCard;
use lore_core::character::Character;
use lore_core::form::FormFields;
use lore_core::types::DbId;
use lore_ui::controller::CharacterListController;
use lore_ui::surface::PageSurface;
use tokio::sync::oneshot;

pub const FADE_DELAY: Duration = Duration::from_millis(300);

pub type TestController = CharacterListController<FakeApi, RecordingSurface>;

/// Build a controller over a fake backend seeded with `records`.
pub fn controller(records: Vec<Character>) -> TestController {
    CharacterListController::new(
        FakeApi::with_records(records),
        RecordingSurface::default(),
        FADE_DELAY,
    )
}

pub fn rick() -> Character {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "name": "Rick",
        "status": "Alive",
        "race": "Human",
    }))
    .unwrap()
}

pub fn morty() -> Character {
    let mut c = Character::new(2, "Morty", "Alive");
    c.title = Some("Grandson".into());
    c.occupation = Some("Student".into());
    c
}

pub fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// FakeApi
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Get(DbId),
    Create(FormFields),
    Update(DbId, FormFields),
    Delete(DbId),
}

#[derive(Default)]
pub struct FakeApi {
    records: RefCell<Vec<Character>>,
    calls: RefCell<Vec<ApiCall>>,
    failing: RefCell<HashSet<Op>>,
    gates: RefCell<HashMap<Op, oneshot::Receiver<()>>>,
}

impl FakeApi {
    pub fn with_records(records: Vec<Character>) -> Self {
        let api = Self::default();
        *api.records.borrow_mut() = records;
        api
    }

    pub fn fail(&self, op: Op) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn records(&self) -> Vec<Character> {
        self.records.borrow().clone()
    }

    /// Make the next call of `op` wait until the returned sender fires.
    pub fn hold_next(&self, op: Op) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(op, rx);
        tx
    }

    async fn pass_gate(&self, op: Op) {
        let gate = self.gates.borrow_mut().remove(&op);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, op: Op) -> Result<(), CharacterApiError> {
        if self.failing.borrow().contains(&op) {
            return Err(CharacterApiError::ApiError {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }

    fn not_found() -> CharacterApiError {
        CharacterApiError::ApiError {
            status: 404,
            body: "{\"detail\":\"Character not found\"}".into(),
        }
    }
}

/// Apply submitted form values the way the backend stores them: verbatim,
/// empty strings included.
fn apply(character: &mut Character, fields: &FormFields) {
    for (key, value) in fields.iter() {
        let value = value.to_string();
        match key {
            "name" => character.name = value,
            "status" => character.status = value,
            "title" => character.title = Some(value),
            "race" => character.race = Some(value),
            "occupation" => character.occupation = Some(value),
            "description" => character.description = Some(value),
            "notable_traits" => character.notable_traits = Some(value),
            _ => {}
        }
    }
}

#[async_trait(?Send)]
impl CharacterApi for FakeApi {
    async fn list_characters(&self) -> Result<Vec<Character>, CharacterApiError> {
        self.record(ApiCall::List);
        self.check(Op::List)?;
        Ok(self.records())
    }

    async fn get_character(&self, id: DbId) -> Result<Character, CharacterApiError> {
        self.record(ApiCall::Get(id));
        self.pass_gate(Op::Get).await;
        self.check(Op::Get)?;
        self.records
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_character(&self, fields: &FormFields) -> Result<Character, CharacterApiError> {
        self.record(ApiCall::Create(fields.clone()));
        self.check(Op::Create)?;
        let mut records = self.records.borrow_mut();
        let id = records.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut character = Character::new(id, "", "Alive");
        apply(&mut character, fields);
        records.push(character.clone());
        Ok(character)
    }

    async fn update_character(
        &self,
        id: DbId,
        fields: &FormFields,
    ) -> Result<Character, CharacterApiError> {
        self.record(ApiCall::Update(id, fields.clone()));
        self.pass_gate(Op::Update).await;
        self.check(Op::Update)?;
        let mut records = self.records.borrow_mut();
        let character = records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(Self::not_found)?;
        apply(character, fields);
        Ok(character.clone())
    }

    async fn delete_character(&self, id: DbId) -> Result<(), CharacterApiError> {
        self.record(ApiCall::Delete(id));
        self.pass_gate(Op::Delete).await;
        self.check(Op::Delete)?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|c| c.id != id);
        if records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSurface {
    /// Every list render, oldest first.
    pub renders: RefCell<Vec<Vec<CharacterCard>>>,
    pub create_form: RefCell<FormFields>,
    pub edit_form: RefCell<FormFields>,
    pub edit_modal_open: Cell<bool>,
    /// Name shown in the delete confirmation while it is open.
    pub delete_modal: RefCell<Option<String>>,
    pub faded: RefCell<Vec<DbId>>,
    pub alerts: RefCell<Vec<String>>,
    pub waits: RefCell<Vec<Duration>>,
}

impl RecordingSurface {
    /// Cards currently on screen.
    pub fn cards(&self) -> Vec<CharacterCard> {
        self.renders.borrow().last().cloned().unwrap_or_default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Simulate the user typing into the create form.
    pub fn type_create(&self, pairs: &[(&str, &str)]) {
        *self.create_form.borrow_mut() = fields(pairs);
    }

    /// Simulate the user changing one input of the edit form.
    pub fn type_edit(&self, name: &str, value: &str) {
        self.edit_form.borrow_mut().insert(name, value);
    }
}

#[async_trait(?Send)]
impl PageSurface for RecordingSurface {
    fn show_cards(&self, cards: &[CharacterCard]) {
        self.renders.borrow_mut().push(cards.to_vec());
    }

    fn read_create_form(&self) -> FormFields {
        self.create_form.borrow().clone()
    }

    fn reset_create_form(&self) {
        *self.create_form.borrow_mut() = FormFields::new();
    }

    fn fill_edit_form(&self, fields: &FormFields) {
        *self.edit_form.borrow_mut() = fields.clone();
    }

    fn read_edit_form(&self) -> FormFields {
        self.edit_form.borrow().clone()
    }

    fn show_edit_modal(&self) {
        self.edit_modal_open.set(true);
    }

    fn hide_edit_modal(&self) {
        self.edit_modal_open.set(false);
    }

    fn show_delete_modal(&self, name: &str) {
        *self.delete_modal.borrow_mut() = Some(name.to_string());
    }

    fn hide_delete_modal(&self) {
        *self.delete_modal.borrow_mut() = None;
    }

    fn fade_out_card(&self, id: DbId) {
        self.faded.borrow_mut().push(id);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    async fn wait(&self, delay: Duration) {
        self.waits.borrow_mut().push(delay);
    }
}
