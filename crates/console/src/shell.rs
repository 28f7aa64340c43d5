//! Line-oriented shell driving the character list controller.
//!
//! Each command maps onto one controller action; form-bearing commands
//! prompt for fields first. A lone `.` at any prompt abandons the form.

use std::io::Write;

use lore_client::api::CharacterApi;
use lore_core::error::{parse_id, CoreError};
use lore_core::form::{FormFields, CHARACTER_FIELDS};
use lore_core::types::DbId;
use lore_ui::controller::CharacterListController;
use lore_ui::state::EditState;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::terminal::TerminalSurface;

/// Input that abandons the current form.
const ABANDON: &str = ".";

/// Status used when the create prompt is left blank.
const DEFAULT_STATUS: &str = "Alive";

const HELP: &str = "\
commands:
  list           reload and show all characters
  new            create a character
  edit <id>      edit a character
  delete <id>    delete a character
  help           show this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Edit(DbId),
    Delete(DbId),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("usage: {0} <id>")]
    MissingId(&'static str),

    #[error(transparent)]
    BadId(#[from] CoreError),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Empty);
    };
    let mut id_arg = |usage: &'static str| -> Result<DbId, CommandError> {
        let raw = words.next().ok_or(CommandError::MissingId(usage))?;
        Ok(parse_id(raw)?)
    };

    match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "reload" => Ok(Command::List),
        "new" | "create" => Ok(Command::New),
        "edit" => Ok(Command::Edit(id_arg("edit")?)),
        "delete" | "rm" => Ok(Command::Delete(id_arg("delete")?)),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

pub struct Shell<A, W, R>
where
    W: Write,
{
    controller: CharacterListController<A, TerminalSurface<W>>,
    lines: Lines<R>,
}

impl<A, W, R> Shell<A, W, R>
where
    A: CharacterApi,
    W: Write,
    R: AsyncBufRead + Unpin,
{
    pub fn new(controller: CharacterListController<A, TerminalSurface<W>>, input: R) -> Self {
        Self {
            controller,
            lines: input.lines(),
        }
    }

    pub fn controller(&self) -> &CharacterListController<A, TerminalSurface<W>> {
        &self.controller
    }

    fn surface(&self) -> &TerminalSurface<W> {
        self.controller.surface()
    }

    /// Show the list, then serve commands until `quit` or end of input.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.controller.reload().await;

        loop {
            self.surface().prompt("lore> ");
            let Some(line) = self.lines.next_line().await? else {
                break;
            };
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command).await?,
                Err(e) => self.surface().say(&e.to_string()),
            }
        }

        tracing::debug!("Shell input closed");
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> std::io::Result<()> {
        match command {
            Command::List => self.controller.reload().await,
            Command::New => self.create().await?,
            Command::Edit(id) => self.edit(id).await?,
            Command::Delete(id) => self.delete(id).await?,
            Command::Help => self.surface().say(HELP),
            Command::Empty | Command::Quit => {}
        }
        Ok(())
    }

    /// Read one answer. `None` means end of input.
    async fn ask(&mut self, question: &str) -> std::io::Result<Option<String>> {
        self.surface().prompt(question);
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }

    async fn create(&mut self) -> std::io::Result<()> {
        let mut fields = FormFields::new();
        for name in CHARACTER_FIELDS {
            let question = if *name == "status" {
                format!("{name} [{DEFAULT_STATUS}]: ")
            } else {
                format!("{name}: ")
            };
            let Some(answer) = self.ask(&question).await? else {
                return Ok(());
            };
            if answer == ABANDON {
                self.surface().say("discarded");
                return Ok(());
            }
            let value = if *name == "status" && answer.is_empty() {
                DEFAULT_STATUS.to_string()
            } else {
                answer
            };
            fields.insert(*name, value);
        }

        self.surface().set_create_form(fields);
        self.controller.submit_create().await;
        Ok(())
    }

    async fn edit(&mut self, id: DbId) -> std::io::Result<()> {
        self.controller.open_edit(id).await;

        while matches!(self.controller.edit_state(), EditState::Open { .. }) {
            if !self.fill_edit_fields().await? {
                self.controller.dismiss_edit();
                self.surface().say("discarded");
                return Ok(());
            }

            self.controller.submit_edit().await;
            if !matches!(self.controller.edit_state(), EditState::Open { .. }) {
                break;
            }

            let retry = self.ask("retry? [y/N] ").await?;
            if !matches!(retry.as_deref(), Some("y" | "Y" | "yes")) {
                self.controller.dismiss_edit();
                break;
            }
        }
        Ok(())
    }

    /// Prompt every field with its current value. `false` when abandoned.
    async fn fill_edit_fields(&mut self) -> std::io::Result<bool> {
        for name in CHARACTER_FIELDS {
            let current = self
                .surface()
                .edit_form()
                .get(name)
                .unwrap_or_default()
                .to_string();
            let Some(answer) = self.ask(&format!("{name} [{current}]: ")).await? else {
                return Ok(false);
            };
            if answer == ABANDON {
                return Ok(false);
            }
            if !answer.is_empty() {
                self.surface().set_edit_field(name, &answer);
            }
        }
        Ok(true)
    }

    async fn delete(&mut self, id: DbId) -> std::io::Result<()> {
        let name = self
            .surface()
            .cards()
            .into_iter()
            .find(|card| card.id == id)
            .map(|card| card.name)
            .unwrap_or_else(|| format!("#{id}"));

        self.controller.request_delete(id, &name);
        let answer = self.ask("[y/N] ").await?;
        if matches!(answer.as_deref(), Some("y" | "Y" | "yes")) {
            self.controller.confirm_delete().await;
        } else {
            self.controller.cancel_delete();
            self.surface().say("cancelled");
        }
        Ok(())
    }
}
