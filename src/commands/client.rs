use crate::db::clients::Clients;
use crate::libs::client::Client;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    command: ClientCommands,
}

#[derive(Debug, Subcommand)]
enum ClientCommands {
    #[command(about = "Add a client to the register")]
    Add {
        name: String,
        #[arg(long, help = "Contact email")]
        email: Option<String>,
        #[arg(long, help = "Contact phone")]
        phone: Option<String>,
    },
    #[command(about = "List all clients")]
    List,
    #[command(about = "Rename a client")]
    Rename { id: i64, name: String },
    #[command(about = "Delete a client without recorded entries")]
    Delete { id: i64 },
}

pub async fn cmd(args: ClientArgs) -> Result<()> {
    match args.command {
        ClientCommands::Add { name, email, phone } => {
            let mut clients = Clients::new()?;
            clients.insert(&Client::new(&name, email, phone))?;
            msg_success!(Message::ClientCreated(name));
        }
        ClientCommands::List => {
            let clients = Clients::new()?.fetch_all()?;
            if clients.is_empty() {
                msg_info!(Message::ClientsNotFound);
                return Ok(());
            }
            msg_print!(Message::ClientsTitle, true);
            View::clients(&clients)?;
        }
        ClientCommands::Rename { id, name } => {
            let mut clients = Clients::new()?;
            match clients.fetch(id)? {
                Some(mut client) => {
                    client.name = name.clone();
                    clients.update(id, &client)?;
                    msg_success!(Message::ClientRenamed(name));
                }
                None => msg_error!(Message::ClientNotFound(id)),
            }
        }
        ClientCommands::Delete { id } => {
            let mut clients = Clients::new()?;
            match clients.fetch(id)? {
                Some(client) => {
                    // Entries keep their client reference; refuse instead of cascading.
                    if clients.has_entries(id)? {
                        msg_error!(Message::ClientHasEntries(client.name));
                        return Ok(());
                    }
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::ConfirmDeleteClient(client.name.clone()).to_string())
                        .default(false)
                        .interact()?;
                    if confirmed {
                        clients.delete(id)?;
                        msg_success!(Message::ClientDeleted(client.name));
                    }
                }
                None => msg_error!(Message::ClientNotFound(id)),
            }
        }
    }

    Ok(())
}
