use clap::Subcommand;

use crate::cli::{view, OutputFormat};
use crate::client::{ApiClient, CustomerForm};
use crate::services::Customers;

#[derive(Subcommand)]
pub enum CustomerCommands {
    #[command(about = "List all customers")]
    List,

    #[command(about = "Show one customer")]
    Show {
        #[arg(help = "Customer ID")]
        id: i64,
    },

    #[command(about = "Create a customer")]
    Create {
        #[arg(long, help = "Customer name")]
        name: String,
        #[arg(long, default_value = "", help = "Postal address")]
        address: String,
    },

    #[command(about = "Edit a customer; omitted fields keep their value")]
    Edit {
        #[arg(help = "Customer ID")]
        id: i64,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New address")]
        address: Option<String>,
    },

    #[command(about = "Delete a customer and its sales")]
    Delete {
        #[arg(help = "Customer ID")]
        id: i64,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: CustomerCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        CustomerCommands::List => view::list::<Customers>(client, &output_format).await,
        CustomerCommands::Show { id } => view::show::<Customers>(client, id, &output_format).await,
        CustomerCommands::Create { name, address } => {
            view::create(client, CustomerForm { name, address }, &output_format).await
        }
        CustomerCommands::Edit { id, name, address } => {
            let apply = |form: &mut CustomerForm| {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(address) = address {
                    form.address = address;
                }
            };
            view::edit(client, id, apply, &output_format).await
        }
        CustomerCommands::Delete { id, yes } => {
            view::delete::<Customers>(client, id, yes, &output_format).await
        }
    }
}
