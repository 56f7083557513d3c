use crate::db::products::Products;
use crate::libs::messages::Message;
use crate::libs::product::{Product, DEFAULT_UNIT};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    command: ProductCommands,
}

#[derive(Debug, Subcommand)]
enum ProductCommands {
    #[command(about = "Add a product to the register")]
    Add {
        name: String,
        #[arg(long, default_value = DEFAULT_UNIT, help = "Billing unit")]
        unit: String,
        #[arg(long, help = "Price per unit")]
        rate: Option<f64>,
    },
    #[command(about = "List all products")]
    List,
    #[command(about = "Update a product")]
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
    },
    #[command(about = "Delete a product")]
    Delete { id: i64 },
}

pub async fn cmd(args: ProductArgs) -> Result<()> {
    match args.command {
        ProductCommands::Add { name, unit, rate } => {
            let mut products = Products::new()?;
            products.insert(&Product::new(&name, &unit, rate))?;
            msg_success!(Message::ProductCreated(name));
        }
        ProductCommands::List => {
            let products = Products::new()?.fetch_all()?;
            if products.is_empty() {
                msg_info!(Message::ProductsNotFound);
                return Ok(());
            }
            msg_print!(Message::ProductsTitle, true);
            View::products(&products)?;
        }
        ProductCommands::Update { id, name, unit, rate } => {
            let mut products = Products::new()?;
            match products.fetch(id)? {
                Some(mut product) => {
                    if let Some(name) = name {
                        product.name = name;
                    }
                    if let Some(unit) = unit {
                        product.unit = unit;
                    }
                    if let Some(rate) = rate {
                        product.rate = Some(rate);
                    }
                    products.update(id, &product)?;
                    msg_success!(Message::ProductUpdated(product.name));
                }
                None => msg_error!(Message::ProductNotFound(id)),
            }
        }
        ProductCommands::Delete { id } => {
            let mut products = Products::new()?;
            match products.fetch(id)? {
                Some(product) => {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::ConfirmDeleteProduct(product.name.clone()).to_string())
                        .default(false)
                        .interact()?;
                    if confirmed {
                        products.delete(id)?;
                        msg_success!(Message::ProductDeleted(product.name));
                    }
                }
                None => msg_error!(Message::ProductNotFound(id)),
            }
        }
    }

    Ok(())
}
