use clap::Subcommand;

use crate::api::FieldErrors;
use crate::cli::view::{self, Rejected};
use crate::cli::{table, OutputFormat};
use crate::client::{ApiClient, SaleChoices, SaleForm};
use crate::services::Sales;

const REFERENCE_FIELDS: [&str; 3] = ["productId", "customerId", "storeId"];

#[derive(Subcommand)]
pub enum SaleCommands {
    #[command(about = "List all sales with product, customer and store names")]
    List,

    #[command(about = "Show one sale")]
    Show {
        #[arg(help = "Sale ID")]
        id: i64,
    },

    #[command(about = "Record a sale")]
    Create {
        #[arg(long, help = "Product ID")]
        product: String,
        #[arg(long, help = "Customer ID")]
        customer: String,
        #[arg(long, help = "Store ID")]
        store: String,
        #[arg(long, help = "Date sold, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
        date: String,
        #[arg(long, default_value = "1", allow_hyphen_values = true, help = "Units sold")]
        quantity: String,
    },

    #[command(about = "Edit a sale; omitted fields keep their value")]
    Edit {
        #[arg(help = "Sale ID")]
        id: i64,
        #[arg(long, help = "Product ID")]
        product: Option<String>,
        #[arg(long, help = "Customer ID")]
        customer: Option<String>,
        #[arg(long, help = "Store ID")]
        store: Option<String>,
        #[arg(long, help = "Date sold")]
        date: Option<String>,
        #[arg(long, allow_hyphen_values = true, help = "Units sold")]
        quantity: Option<String>,
    },

    #[command(about = "Delete a sale")]
    Delete {
        #[arg(help = "Sale ID")]
        id: i64,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    cmd: SaleCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        SaleCommands::List => view::list::<Sales>(client, &output_format).await,
        SaleCommands::Show { id } => view::show::<Sales>(client, id, &output_format).await,
        SaleCommands::Create {
            product,
            customer,
            store,
            date,
            quantity,
        } => {
            let form = SaleForm {
                product_id: product,
                customer_id: customer,
                store_id: store,
                date,
                quantity,
            };
            let result = view::create(client, form, &output_format).await;
            with_choices(result, client, &output_format).await
        }
        SaleCommands::Edit {
            id,
            product,
            customer,
            store,
            date,
            quantity,
        } => {
            let apply = |form: &mut SaleForm| {
                let fields = [
                    (&mut form.product_id, product),
                    (&mut form.customer_id, customer),
                    (&mut form.store_id, store),
                    (&mut form.date, date),
                    (&mut form.quantity, quantity),
                ];
                for (field, value) in fields {
                    if let Some(value) = value {
                        *field = value;
                    }
                }
            };
            let result = view::edit(client, id, apply, &output_format).await;
            with_choices(result, client, &output_format).await
        }
        SaleCommands::Delete { id, yes } => {
            view::delete::<Sales>(client, id, yes, &output_format).await
        }
    }
}

fn names_a_reference(field_errors: &FieldErrors) -> bool {
    REFERENCE_FIELDS
        .iter()
        .any(|field| field_errors.contains_key(*field))
}

/// When a product, customer or store id was rejected, list what can be picked
async fn with_choices(
    result: anyhow::Result<()>,
    client: &ApiClient,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let Err(err) = result else {
        return Ok(());
    };
    let wanted = matches!(output_format, OutputFormat::Text)
        && err
            .downcast_ref::<Rejected>()
            .is_some_and(|rejected| names_a_reference(&rejected.field_errors));
    if !wanted {
        return Err(err);
    }

    match SaleChoices::load(client).await {
        Ok(choices) => {
            eprintln!();
            eprintln!("Products:\n{}\n", table::render(&choices.products));
            eprintln!("Customers:\n{}\n", table::render(&choices.customers));
            eprintln!("Stores:\n{}", table::render(&choices.stores));
        }
        Err(e) => tracing::debug!("Could not load sale choices: {}", e),
    }
    Err(err)
}
