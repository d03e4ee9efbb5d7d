//! Command implementations.

pub mod config;
pub mod push;

use std::time::Duration;

use addrpush::{PanosClient, PanosClientBuilder};

use super::args::Cli;
use crate::config::Config;
use crate::output::OutputFormat;
use crate::session::Settings;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Saved defaults with command-line overrides applied
    pub config: Config,

    pub output_format: OutputFormat,
}

impl Context {
    /// Merge flags over the saved configuration.
    pub fn new(cli: &Cli, mut config: Config) -> Self {
        if cli.verify_tls {
            config.verify_tls = true;
        }
        if let Some(len) = cli.max_request_len {
            config.max_request_len = len;
        }
        Self {
            config,
            output_format: cli.output.unwrap_or_default(),
        }
    }

    /// Builder for a client talking to `host` with the configured TLS and timeout.
    pub fn client_builder(&self, host: &str) -> PanosClientBuilder {
        PanosClient::builder(host)
            .accept_invalid_certs(!self.config.verify_tls)
            .timeout(Duration::from_secs(self.config.timeout_secs))
    }

    pub fn session_settings(&self, username: Option<String>, group: Option<String>) -> Settings {
        Settings {
            max_request_len: self.config.max_request_len,
            auth_attempts: self.config.auth_attempts,
            username: username.or_else(|| self.config.username.clone()),
            group,
            output: self.output_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["addrpush", "--verify-tls", "--max-request-len", "1200", "-o", "json"]).unwrap();
        let config = Config {
            username: Some("ops".into()),
            ..Config::default()
        };
        let ctx = Context::new(&cli, config);

        assert!(ctx.config.verify_tls);
        assert_eq!(ctx.config.max_request_len, 1200);
        assert_eq!(ctx.output_format, OutputFormat::Json);

        let settings = ctx.session_settings(None, None);
        assert_eq!(settings.username.as_deref(), Some("ops"));
        assert_eq!(settings.max_request_len, 1200);
        assert_eq!(settings.output, OutputFormat::Json);
        let settings = ctx.session_settings(Some("admin".into()), None);
        assert_eq!(settings.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_client_builder_uses_host() {
        let cli = Cli::try_parse_from(["addrpush"]).unwrap();
        let ctx = Context::new(&cli, Config::default());
        let client = ctx.client_builder("fw1.example.net").build().unwrap();
        assert_eq!(client.base_url(), "https://fw1.example.net");
    }
}
