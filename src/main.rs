use std::process;

use docintel::{
    application::error::AppError,
    config::{self, Command},
    infra::telemetry,
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

mod handlers;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        eprintln!("error: {error}");
        process::exit(i32::from(error.exit_code()));
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(
            error = %error,
            chain = %report.chain(),
            exit_code = error.exit_code(),
            "application error"
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = %report.chain(), "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Command::Options => handlers::options::handle(&settings).await,
        Command::Analyze(args) => handlers::analyze::handle(&settings, args).await,
        Command::Status(args) => handlers::status::handle(&settings, args).await,
        Command::Render(args) => handlers::render::handle(args).await,
        Command::Export(args) => handlers::export::handle(&settings, args).await,
    }
}
