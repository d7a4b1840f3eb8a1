use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only list tokens belonging to this customer
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let service = super::auth_service(&args.database_url).await?;

    let tokens = service
        .list_api_tokens(args.customer_uuid.map(Into::into))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_role: {}", token.principal.role());
        if let Some(customer) = token.principal.customer() {
            println!("customer_uuid: {customer}");
        }
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "expires_at: {}",
            token
                .expires_at
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
