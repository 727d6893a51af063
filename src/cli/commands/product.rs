use clap::Subcommand;

use crate::cli::{view, OutputFormat};
use crate::client::{ApiClient, ProductForm};
use crate::services::Products;

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List all products")]
    List,

    #[command(about = "Show one product")]
    Show {
        #[arg(help = "Product ID")]
        id: i64,
    },

    #[command(about = "Create a product")]
    Create {
        #[arg(long, help = "Product name")]
        name: String,
        #[arg(long, allow_hyphen_values = true, help = "Unit price, e.g. 9.99")]
        price: String,
    },

    #[command(about = "Edit a product; omitted fields keep their value")]
    Edit {
        #[arg(help = "Product ID")]
        id: i64,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true, help = "New unit price")]
        price: Option<String>,
    },

    #[command(about = "Delete a product and its sales")]
    Delete {
        #[arg(help = "Product ID")]
        id: i64,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: ProductCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProductCommands::List => view::list::<Products>(client, &output_format).await,
        ProductCommands::Show { id } => view::show::<Products>(client, id, &output_format).await,
        ProductCommands::Create { name, price } => {
            view::create(client, ProductForm { name, price }, &output_format).await
        }
        ProductCommands::Edit { id, name, price } => {
            let apply = |form: &mut ProductForm| {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(price) = price {
                    form.price = price;
                }
            };
            view::edit(client, id, apply, &output_format).await
        }
        ProductCommands::Delete { id, yes } => {
            view::delete::<Products>(client, id, yes, &output_format).await
        }
    }
}
