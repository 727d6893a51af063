use clap::Subcommand;

use crate::cli::{view, OutputFormat};
use crate::client::{ApiClient, StoreForm};
use crate::services::Stores;

#[derive(Subcommand)]
pub enum StoreCommands {
    #[command(about = "List all stores")]
    List,

    #[command(about = "Show one store")]
    Show {
        #[arg(help = "Store ID")]
        id: i64,
    },

    #[command(about = "Create a store")]
    Create {
        #[arg(long, help = "Store name")]
        name: String,
        #[arg(long, default_value = "", help = "Street address")]
        address: String,
    },

    #[command(about = "Edit a store; omitted fields keep their value")]
    Edit {
        #[arg(help = "Store ID")]
        id: i64,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New address")]
        address: Option<String>,
    },

    #[command(about = "Delete a store and its sales")]
    Delete {
        #[arg(help = "Store ID")]
        id: i64,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: StoreCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        StoreCommands::List => view::list::<Stores>(client, &output_format).await,
        StoreCommands::Show { id } => view::show::<Stores>(client, id, &output_format).await,
        StoreCommands::Create { name, address } => {
            view::create(client, StoreForm { name, address }, &output_format).await
        }
        StoreCommands::Edit { id, name, address } => {
            let apply = |form: &mut StoreForm| {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(address) = address {
                    form.address = address;
                }
            };
            view::edit(client, id, apply, &output_format).await
        }
        StoreCommands::Delete { id, yes } => {
            view::delete::<Stores>(client, id, yes, &output_format).await
        }
    }
}
