//! Storefront JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use storefront_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

mod amounts;
mod auth;
mod carts;
mod categories;
mod checkout;
mod config;
mod content;
mod extensions;
mod healthcheck;
mod me;
mod observability;
mod orders;
mod products;
mod router;
mod settings;
mod shipping_services;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod webhooks;

/// Storefront JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|init_error| {
        #[expect(
            clippy::print_stderr,
            reason = "tracing failed to initialize, stderr is the only sink left"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    });

    let app_config = match config.app_config() {
        Ok(app_config) => app_config,
        Err(config_error) => {
            error!("invalid configuration: {config_error}");

            process::exit(1);
        }
    };

    let currency = app_config.currency;
    let addr = config.socket_addr();
    let grace = config.server.shutdown_grace();

    info!(currency = currency.iso_alpha_code, "Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_config(app_config).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::shared(app, currency)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Storefront API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("swagger-ui"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    observability.shutdown();
}
