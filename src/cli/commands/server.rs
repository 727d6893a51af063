use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::output_error;
use crate::cli::OutputFormat;
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from the /health endpoint")]
    Health,

    #[command(about = "Show server information from the /api endpoint")]
    Info,
}

pub async fn handle(
    cmd: ServerCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let result = match cmd {
        ServerCommands::Health => client.health().await,
        ServerCommands::Info => client.info().await,
    };

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            output_error(&output_format, &e.user_message(), None)?;
            anyhow::bail!("{} is unreachable", client.base_url());
        }
    };

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Text => print_fields(&body),
    }

    if body.get("status").and_then(Value::as_str) == Some("degraded") {
        anyhow::bail!("server reports degraded health");
    }
    Ok(())
}

fn print_fields(body: &Value) {
    let Some(fields) = body.as_object() else {
        println!("{}", body);
        return;
    };

    for (key, value) in fields {
        match value {
            Value::String(text) => println!("{:<12} {}", key, text),
            Value::Array(items) => {
                println!("{}:", key);
                for item in items {
                    let line = item
                        .get("collection")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string());
                    println!("  {}", line);
                }
            }
            other => println!("{:<12} {}", key, other),
        }
    }
}
