pub mod analyze;
pub mod export;
pub mod options;
pub mod render;
pub mod status;

mod io;
mod print;

use std::sync::Arc;

use docintel::{
    application::error::AppError,
    config::Settings,
    infra::{
        credentials::{CredentialProvider, resolve_token},
        http::ApiClient,
    },
};

/// Build the API client. Authenticated commands resolve the bearer token up
/// front so a missing token fails before any request is sent.
fn api_client(settings: &Settings, authenticated: bool) -> Result<ApiClient, AppError> {
    let credentials = if authenticated {
        let token = resolve_token(
            settings.auth.token_file.as_deref(),
            settings.auth.token.as_deref(),
        )?;
        Some(Arc::new(token) as Arc<dyn CredentialProvider>)
    } else {
        None
    };
    let api = ApiClient::new(
        settings.api.base_url.as_str(),
        settings.api.request_timeout,
        credentials,
    )?;
    Ok(api)
}
