use docintel::{application::error::AppError, config::RenderArgs};

use super::{io::read_result, print::print_result};

pub async fn handle(args: RenderArgs) -> Result<(), AppError> {
    let payload = read_result(&args.file).await?;
    print_result(&payload, args.format)
}
