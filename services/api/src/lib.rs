mod cli;
mod extract;
mod infra;
mod routes;
mod server;

use zefix_leads::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
