mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use yggdrasil_green::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
