use std::sync::Arc;

use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::{
        customers::{CustomersService, PgCustomersService, data::NewCustomer},
        notifications::{MailNotificationsService, NotificationsService},
        settings::{PgSettingsService, SettingsService},
    },
    gateways::mail::{HttpMailer, MailGatewayConfig},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Customer full name
    #[arg(long)]
    full_name: String,

    /// Customer email address
    #[arg(long)]
    email: String,

    /// Optional customer UUID; generated when omitted
    #[arg(long)]
    customer_uuid: Option<Uuid>,

    /// Store currency (ISO 4217)
    #[arg(long, env = "STORE_CURRENCY", default_value = "BRL")]
    currency: String,

    /// Mail API base URL; the store contact is notified when set
    #[arg(long, env = "MAIL_API_URL")]
    mail_api_url: Option<String>,

    /// Mail API key
    #[arg(long, env = "MAIL_API_KEY", hide_env_values = true)]
    mail_api_key: Option<String>,

    /// Sender address for notifications
    #[arg(long, env = "MAIL_FROM")]
    mail_from: Option<String>,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    let currency = rusty_money::iso::find(&args.currency)
        .ok_or_else(|| format!("unknown currency: {}", args.currency))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);

    let customer = PgCustomersService::new(db.clone())
        .create_customer(NewCustomer {
            uuid: args.customer_uuid.unwrap_or_else(Uuid::now_v7).into(),
            full_name: args.full_name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("full_name: {}", customer.full_name);
    println!("email: {}", customer.email);

    let (Some(api_url), Some(api_key), Some(from)) =
        (args.mail_api_url, args.mail_api_key, args.mail_from)
    else {
        return Ok(());
    };

    let settings = PgSettingsService::new(db, currency)
        .get_settings()
        .await
        .and_then(|record| record.to_store_settings(currency))
        .map_err(|error| format!("failed to load store settings: {error}"))?;

    let notifications = MailNotificationsService::new(Arc::new(HttpMailer::new(
        MailGatewayConfig {
            api_url,
            api_key,
            from,
        },
    )));

    match notifications.customer_registered(&customer, &settings).await {
        Ok(()) => println!("store contact notified"),
        Err(error) => eprintln!("customer created but notification failed: {error}"),
    }

    Ok(())
}
