use docintel::{
    application::{error::AppError, jobs::AnalysisGateway},
    config::{Settings, StatusArgs},
    domain::job::JobHandle,
    infra::{error::InfraError, http::HttpAnalysisGateway},
};

use super::{api_client, print::print_json};

/// Query a task once and print the raw status response.
pub async fn handle(settings: &Settings, args: StatusArgs) -> Result<(), AppError> {
    let gateway = HttpAnalysisGateway::new(api_client(settings, true)?);
    let handle = JobHandle::new(args.task_id);
    let response = gateway
        .status(&handle)
        .await
        .map_err(|err| AppError::from(InfraError::http(err.to_string())))?;
    print_json(&response)
}
