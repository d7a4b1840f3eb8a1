//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 30)]
    pub shutdown_grace_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Time allowed for a graceful stop.
    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        server: ServerRuntimeConfig,
    }

    #[test]
    fn defaults_bind_all_interfaces() -> TestResult {
        let harness = Harness::try_parse_from(["storefront-json"])?;

        assert_eq!(harness.server.socket_addr(), "0.0.0.0:8080");
        assert_eq!(harness.server.shutdown_grace(), Duration::from_secs(30));

        Ok(())
    }

    #[test]
    fn grace_period_is_configurable() -> TestResult {
        let harness =
            Harness::try_parse_from(["storefront-json", "--shutdown-grace-seconds", "5", "-p", "9000"])?;

        assert_eq!(harness.server.socket_addr(), "0.0.0.0:9000");
        assert_eq!(harness.server.shutdown_grace(), Duration::from_secs(5));

        Ok(())
    }
}
