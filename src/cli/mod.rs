pub mod commands;
pub mod table;
pub mod utils;
pub mod view;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::http::DEFAULT_SERVER;
use crate::client::ApiClient;

#[derive(Parser)]
#[command(name = "storemgr")]
#[command(about = "Store Manager CLI - manage customers, products, stores and sales")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "STORE_MANAGER_URL",
        default_value = DEFAULT_SERVER,
        help = "Base URL of the Store Manager API"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Customer records")]
    Customer {
        #[command(subcommand)]
        cmd: commands::customer::CustomerCommands,
    },

    #[command(about = "Product catalogue")]
    Product {
        #[command(subcommand)]
        cmd: commands::product::ProductCommands,
    },

    #[command(about = "Store locations")]
    Store {
        #[command(subcommand)]
        cmd: commands::store::StoreCommands,
    },

    #[command(about = "Sales linking a product, customer and store")]
    Sale {
        #[command(subcommand)]
        cmd: commands::sale::SaleCommands,
    },

    #[command(about = "Server health and information")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.server)?;

    match cli.command {
        Commands::Customer { cmd } => commands::customer::handle(cmd, &client, output_format).await,
        Commands::Product { cmd } => commands::product::handle(cmd, &client, output_format).await,
        Commands::Store { cmd } => commands::store::handle(cmd, &client, output_format).await,
        Commands::Sale { cmd } => commands::sale::handle(cmd, &client, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
    }
}
