use docintel::{
    application::{error::AppError, render},
    config::OutputFormat,
    domain::result::ResultPayload,
};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to render output: {err}")))?;
    println!("{out}");
    Ok(())
}

/// Print a result. An unrecognized shape prints nothing in Markdown form.
pub fn print_result(payload: &ResultPayload, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(payload),
        OutputFormat::Markdown => {
            if let Some(document) = render::project(payload) {
                print!("{}", render::to_markdown(&document));
            }
            Ok(())
        }
    }
}
