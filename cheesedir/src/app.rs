//! Interactive controller
//!
//! Owns the record store and the optional mirror. Each menu choice runs to
//! completion before the next is read. Mutations apply to the store first and
//! are then pushed to the mirror with a full resync.

use crate::console::Console;
use crate::entry::{prompt_edited_record, prompt_new_record};
use crate::menu::{render_menu, MenuOption};
use cheesedir_common::config::TomlConfig;
use cheesedir_common::db::Mirror;
use cheesedir_common::store::persist_to_file;
use cheesedir_common::{Record, RecordStore, Result};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::info;

/// Interactive cheese directory session
pub struct App<R, W> {
    config: TomlConfig,
    store: RecordStore,
    mirror: Option<Mirror>,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Load the configured dataset and bring the mirror in line with it
    pub async fn new(
        config: TomlConfig,
        mirror: Option<Mirror>,
        console: Console<R, W>,
    ) -> Result<Self> {
        let store = RecordStore::load(&config.data_file, config.record_limit)?;
        let app = Self {
            config,
            store,
            mirror,
            console,
        };
        app.sync_mirror().await?;
        Ok(app)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn mirror(&self) -> Option<&Mirror> {
        self.mirror.as_ref()
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Show the menu and dispatch choices until Exit
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let option = self.read_menu_choice()?;
            if self.dispatch(option).await?.is_break() {
                return Ok(());
            }
        }
    }

    fn read_menu_choice(&mut self) -> Result<MenuOption> {
        let menu = render_menu(self.mirror.is_some());
        self.console.say(menu.trim_end())?;

        let first = MenuOption::Reload.number();
        let last = MenuOption::Exit.number();
        let number = self.console.read_bounded(
            "Please choose an option: ",
            first,
            last,
            "Please enter a valid option.",
            &format!("Please enter a valid integer between {} and {}.", first, last),
        )?;

        // read_bounded only returns numbers inside the menu range
        Ok(MenuOption::from_number(number).unwrap_or(MenuOption::Exit))
    }

    /// Run one menu choice; `Break` means the session is over
    pub async fn dispatch(&mut self, option: MenuOption) -> Result<ControlFlow<()>> {
        match option {
            MenuOption::Reload => self.reload().await?,
            MenuOption::Persist => self.persist().await?,
            MenuOption::DisplayAll => self.display_all().await?,
            MenuOption::Create => self.create().await?,
            MenuOption::Display => self.display_one().await?,
            MenuOption::Edit => self.edit().await?,
            MenuOption::Delete => self.delete().await?,
            MenuOption::Exit => {
                self.console.say("Goodbye")?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn sync_mirror(&self) -> Result<()> {
        if let Some(mirror) = &self.mirror {
            mirror.sync(self.store.records()).await?;
        }
        Ok(())
    }

    /// Records as the read side sees them: the mirror if present, else the store
    async fn snapshot(&self) -> Result<Vec<Record>> {
        match &self.mirror {
            Some(mirror) => mirror.all().await,
            None => Ok(self.store.records().to_vec()),
        }
    }

    async fn reload(&mut self) -> Result<()> {
        self.console.say("Reloading data...")?;
        self.store = RecordStore::load(&self.config.data_file, self.config.record_limit)?;
        self.sync_mirror().await
    }

    async fn persist(&mut self) -> Result<()> {
        let path = self.config.output_file.clone();
        let source = if self.mirror.is_some() { "database" } else { "in-memory" };
        self.console
            .say(format!("\n Writing all {} records to {}.", source, path.display()))?;

        let records = self.snapshot().await?;
        persist_to_file(&path, &records)?;

        self.console.say(format!("\n Done writing to {}.", path.display()))
    }

    async fn display_all(&mut self) -> Result<()> {
        let records = self.snapshot().await?;
        self.console.say("\nDisplaying all records...\n")?;
        for (position, record) in records.iter().enumerate() {
            self.console.say(format!("Record ID: {}: {}", position, record))?;
        }
        Ok(())
    }

    /// Report an empty store instead of prompting for an impossible position
    fn ensure_not_empty(&mut self, len: usize) -> Result<bool> {
        if len == 0 {
            self.console.say("\nThere are no records.")?;
            return Ok(false);
        }
        Ok(true)
    }

    async fn display_one(&mut self) -> Result<()> {
        match self.mirror.clone() {
            Some(mirror) => {
                let count = mirror.count().await?;
                if !self.ensure_not_empty(count)? {
                    return Ok(());
                }
                let position = self.console.read_position("display", count)?;
                let record = mirror.require_position(position).await?;
                self.console.say(format!(
                    "\n Displaying Record #{} from database: \n{}",
                    position, record
                ))
            }
            None => {
                if !self.ensure_not_empty(self.store.len())? {
                    return Ok(());
                }
                let position = self.console.read_position("display", self.store.len())?;
                let record = self.store.records()[position].clone();
                self.console
                    .say(format!("\n Displaying Record #{}: \n{}", position, record))
            }
        }
    }

    async fn create(&mut self) -> Result<()> {
        self.console.say("\n Creating record...\n")?;
        let record = prompt_new_record(&mut self.console)?;
        self.console
            .say(format!("\n Creating the following record: \n{}", record))?;

        info!("Created record {} at position {}", record.cheese_id, self.store.len());
        self.store.append(record);
        self.sync_mirror().await
    }

    async fn edit(&mut self) -> Result<()> {
        if !self.ensure_not_empty(self.store.len())? {
            return Ok(());
        }
        let position = self.console.read_position("edit", self.store.len())?;
        let current = self.store.records()[position].clone();

        self.console
            .say(format!("\n Editing Record #{}: \n{}", position, current))?;
        self.console
            .say("\n Press Enter to keep the same value, otherwise input your value...\n")?;

        let edited = prompt_edited_record(&mut self.console, &current)?;
        self.store.replace_at(position, edited.clone())?;
        self.console
            .say(format!("\n Changed the record to record: \n{}", edited))?;

        info!("Edited record at position {}", position);
        self.sync_mirror().await
    }

    async fn delete(&mut self) -> Result<()> {
        if !self.ensure_not_empty(self.store.len())? {
            return Ok(());
        }
        let position = self.console.read_position("delete", self.store.len())?;
        self.console.say(format!(
            "\n Deleting the following record: \n{}",
            self.store.records()[position]
        ))?;

        let removed = self.store.remove_at(position)?;
        info!("Deleted record {} from position {}", removed.cheese_id, position);
        self.sync_mirror().await
    }
}
