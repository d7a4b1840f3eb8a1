use clap::Args;
use jiff::Timestamp;
use storefront_app::auth::{ApiTokenRole, Principal};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Who the token acts for: `admin` or `customer`
    #[arg(long, default_value = "admin")]
    role: ApiTokenRole,

    /// Customer UUID; required for customer tokens
    #[arg(long)]
    customer_uuid: Option<Uuid>,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<String>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let token_expires_at = parse_token_expires_at(args.token_expires_at.as_deref())?;

    if let Some(expires_at) = token_expires_at.as_ref()
        && *expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let principal = Principal::from_parts(args.role, args.customer_uuid.map(Into::into))
        .map_err(|role| match role {
            ApiTokenRole::Admin => "admin tokens cannot belong to a customer".to_string(),
            ApiTokenRole::Customer => "customer tokens require --customer-uuid".to_string(),
        })?;

    let service = super::auth_service(&args.database_url).await?;

    let issued = service
        .issue_api_token(principal, token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("token_role: {}", issued.metadata.principal.role());
    if let Some(customer) = issued.metadata.principal.customer() {
        println!("customer_uuid: {customer}");
    }
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

fn parse_token_expires_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))
    })
    .transpose()
}
