use crate::{
    domain::{
        contact::ContactId,
        form::{FormController, remove_prompt},
        view::{contact_cards, display_card},
    },
    prelude::{
        AppError, Config, ContactStore,
        command::{Cli, Commands},
    },
    storage::{PersistenceAdapter, parse_storage},
};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::info;

use super::{confirm_action, read_consent};

pub fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let stdin = io::stdin();
    execute(cli.command, &config, &mut stdin.lock())
}

/// Environment (and `.env`) first, then command line flags on top.
pub fn build_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = Config::from_env()?;

    if let Some(medium) = &cli.storage {
        config.medium = medium.parse()?;
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = PathBuf::from(dir);
    }
    if let Some(policy) = &cli.id_policy {
        config.id_policy = policy.parse()?;
    }
    if let Some(rule) = &cli.phone_rule {
        config.phone_rule = rule.parse()?;
    }

    info!(
        medium = %config.medium,
        dir = %config.storage_dir.display(),
        "configuration resolved"
    );
    Ok(config)
}

pub fn execute(command: Commands, config: &Config, input: &mut impl BufRead) -> Result<(), AppError> {
    match command {
        Commands::Reset => {
            PersistenceAdapter::new(parse_storage(config), config.id_policy).clear()?;
            println!("Contacts reset");
            Ok(())
        }

        Commands::Add { name, phone } => {
            let mut store = ContactStore::from_config(config)?;
            let contact = FormController::new().submit(&mut store, &name, &phone)?;

            println!("Contact added successfully (id {})", contact.id);
            Ok(())
        }

        // Listing contacts
        Commands::List => {
            let store = ContactStore::from_config(config)?;
            if store.is_empty() {
                println!("No contact yet");
                return Ok(());
            }

            for (i, card) in contact_cards(store.list()).iter().enumerate() {
                println!("{}", display_card(card, i + 1));
            }
            Ok(())
        }

        Commands::Update { id, name, phone } => {
            let id: ContactId = id.parse()?;
            let mut store = ContactStore::from_config(config)?;
            let mut form = FormController::new();

            let current = form.begin_edit(&store, &id)?;
            let name = name.unwrap_or_else(|| current.name.clone());
            let phone = phone.unwrap_or_else(|| current.phone.clone());

            form.submit(&mut store, &name, &phone)?;
            println!("Contact updated successfully");
            Ok(())
        }

        Commands::Remove { id, yes } => {
            let id: ContactId = id.parse()?;
            let mut store = ContactStore::from_config(config)?;

            let mut answer: Result<bool, AppError> = Ok(true);
            let removed = FormController::new().remove(&mut store, &id, |contact| {
                if yes {
                    return true;
                }
                answer = confirm_action(&remove_prompt(contact)).and_then(|_| read_consent(input));
                matches!(answer, Ok(true))
            })?;
            answer?;

            if removed {
                println!("Contact removed successfully");
            } else {
                println!("Remove cancelled");
            }
            Ok(())
        }
    }
}
