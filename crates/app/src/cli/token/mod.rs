//! API token administration.

use clap::{Args, Subcommand};
use storefront_app::{auth::PgAuthService, database};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue an admin or customer token; the secret is printed once
    Create(create::CreateTokenArgs),

    /// Show issued tokens without their secrets
    List(list::ListTokensArgs),

    /// Stop a token from authenticating
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

async fn auth_service(database_url: &str) -> Result<PgAuthService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgAuthService::new(pool))
}
