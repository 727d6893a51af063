//! The list / create / edit / delete flows shared by every entity command.
//!
//! Each flow drives a `Slice` the way the web client's views do: open the
//! modal, validate locally, dispatch, close, then re-fetch and show the list.

use anyhow::anyhow;
use serde_json::json;

use crate::api::{FieldErrors, Identified};
use crate::cli::table::{self, TableRow};
use crate::cli::utils::{confirm, output_empty_collection, output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::{ApiClient, ClientError, Form, Slice};
use crate::services::Resource;

type ResourceOf<F> = <F as Form>::Resource;

/// A request the user has to fix, already reported. Carries the field errors
/// so a command can add its own hints before exiting.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Rejected {
    pub message: String,
    pub field_errors: FieldErrors,
}

pub async fn list<R: Resource>(client: &ApiClient, output_format: &OutputFormat) -> anyhow::Result<()>
where
    R::Dto: TableRow,
{
    let mut slice = Slice::<R>::new();
    fetch(&mut slice, client, output_format).await?;

    if slice.items.is_empty() {
        return output_empty_collection(
            output_format,
            R::PLURAL,
            &format!("No {} found", R::PLURAL),
        );
    }
    render_items::<R>(&slice.items, output_format)
}

pub async fn show<R: Resource>(
    client: &ApiClient,
    id: i64,
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    R::Dto: TableRow,
{
    let item = client
        .get::<R>(id)
        .await
        .map_err(|e| failed(output_format, e))?;
    render_items::<R>(std::slice::from_ref(&item), output_format)
}

pub async fn create<F: Form>(
    client: &ApiClient,
    form: F,
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    <ResourceOf<F> as Resource>::Dto: TableRow,
{
    let mut slice = Slice::<ResourceOf<F>>::new();
    slice.open_create();

    let payload = form
        .validate(None)
        .map_err(|errors| invalid(output_format, &errors))?;
    let created = slice
        .create(client, &payload)
        .await
        .map_err(|e| failed(output_format, e))?;
    slice.close_modal();

    let message = format!("Created {} {}", <ResourceOf<F> as Resource>::NAME, created.id());
    refresh_and_report(&mut slice, client, &message, output_format).await
}

/// Prefill the form from the current row, let `apply` overwrite what the
/// user supplied, then validate and send
pub async fn edit<F: Form>(
    client: &ApiClient,
    id: i64,
    apply: impl FnOnce(&mut F),
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    <ResourceOf<F> as Resource>::Dto: TableRow,
{
    let mut slice = Slice::<ResourceOf<F>>::new();
    fetch(&mut slice, client, output_format).await?;

    let current = slice
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("{} {} not found", <ResourceOf<F> as Resource>::NAME, id))?;
    let mut form = F::from_dto(&current);
    slice.open_edit(current);
    apply(&mut form);

    let payload = form
        .validate(Some(id))
        .map_err(|errors| invalid(output_format, &errors))?;
    slice
        .update(client, id, &payload)
        .await
        .map_err(|e| failed(output_format, e))?;
    slice.close_modal();

    let message = format!("Updated {} {}", <ResourceOf<F> as Resource>::NAME, id);
    refresh_and_report(&mut slice, client, &message, output_format).await
}

pub async fn delete<R: Resource>(
    client: &ApiClient,
    id: i64,
    yes: bool,
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    R::Dto: TableRow,
{
    let mut slice = Slice::<R>::new();
    let item = client
        .get::<R>(id)
        .await
        .map_err(|e| failed(output_format, e))?;
    slice.open_delete(item);

    if !yes && !confirm(&format!("Delete {} {}?", R::NAME, id))? {
        slice.close_modal();
        println!("Cancelled");
        return Ok(());
    }

    slice
        .delete(client, id)
        .await
        .map_err(|e| failed(output_format, e))?;
    slice.close_modal();

    let message = format!("Deleted {} {}", R::NAME, id);
    refresh_and_report(&mut slice, client, &message, output_format).await
}

async fn fetch<R: Resource>(
    slice: &mut Slice<R>,
    client: &ApiClient,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    slice
        .fetch(client)
        .await
        .map_err(|e| failed(output_format, e))
}

/// Re-fetch the whole list after a mutation and show it under the message
async fn refresh_and_report<R: Resource>(
    slice: &mut Slice<R>,
    client: &ApiClient,
    message: &str,
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    R::Dto: TableRow,
{
    fetch(slice, client, output_format).await?;

    match output_format {
        OutputFormat::Json => {
            let plural = R::PLURAL;
            output_success(output_format, message, Some(json!({ plural: slice.items })))
        }
        OutputFormat::Text => {
            output_success(output_format, message, None)?;
            println!();
            println!("{}", table::render(&slice.items));
            Ok(())
        }
    }
}

fn render_items<R: Resource>(items: &[R::Dto], output_format: &OutputFormat) -> anyhow::Result<()>
where
    R::Dto: TableRow,
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            println!("{}", table::render(items));
        }
    }
    Ok(())
}

/// Local validation failed: show the reasons, send nothing
fn invalid(output_format: &OutputFormat, errors: &FieldErrors) -> anyhow::Error {
    if let Err(e) = output_error(output_format, "Validation failed", Some(errors)) {
        return e;
    }
    Rejected {
        message: "validation failed".to_string(),
        field_errors: errors.clone(),
    }
    .into()
}

fn failed(output_format: &OutputFormat, err: ClientError) -> anyhow::Error {
    let message = err.user_message();
    if let Err(e) = output_error(output_format, &message, err.field_errors()) {
        return e;
    }
    Rejected {
        message,
        field_errors: err.field_errors().cloned().unwrap_or_default(),
    }
    .into()
}
