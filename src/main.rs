//! # securekeyctl
//!
//! Command-line driver for the secure key controller.
//!
//! ```bash
//! # Create a key in the configured default namespace
//! securekeyctl create db-password --data-env DB_PASSWORD --description "primary database"
//!
//! # Check presence in another namespace (exit code 1 when absent)
//! securekeyctl exists db-password --namespace analytics
//!
//! # Delete it again
//! securekeyctl delete db-password -n analytics
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{debug, warn};

use securekey_controller::config::ControllerConfig;
use securekey_controller::observability::{gather_metrics, init_logging, register_metrics};
use securekey_controller::resource::schema::secure_key_schema;
use securekey_controller::resource::{Resource, SecureKeyId, SecureKeyResource, SecureKeySpec};
use securekey_controller::transport::ReqwestTransport;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Secure key lifecycle CLI
#[derive(Parser)]
#[command(name = "securekeyctl")]
#[command(
    version = VERSION,
    about = "Create, delete and probe namespaced secure keys",
    long_about = None,
    after_help = "\
Configuration is read from the environment (and a .env file):
  SECUREKEY_HOST, SECUREKEY_DEFAULT_NAMESPACE, SECUREKEY_ACCESS_TOKEN,
  SECUREKEY_REQUEST_TIMEOUT_SECS, LOG_LEVEL, LOG_FORMAT, ENABLE_METRICS
Flags override the environment.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control plane base address, e.g. http://localhost:11015
    #[arg(long, global = true)]
    host: Option<String>,

    /// Namespace of the key (defaults to SECUREKEY_DEFAULT_NAMESPACE)
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Access token sent as a bearer token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Dump Prometheus metrics to stderr when the command finishes
    #[arg(long, global = true)]
    print_metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a secure key
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        /// Secret value
        #[arg(long, conflicts_with = "data_env", required_unless_present = "data_env")]
        data: Option<String>,

        /// Read the secret value from this environment variable
        #[arg(long, value_name = "VAR")]
        data_env: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        /// Extra metadata, repeatable
        #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },
    /// Delete a secure key
    Delete {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Print whether a secure key exists (exit code 1 when it does not)
    Exists {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Refresh a secure key (values are write-only, nothing is fetched)
    Read {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Print the secure key attribute schema
    Schema,
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

fn load_config(cli: &Cli) -> ControllerConfig {
    let mut config = ControllerConfig::from_env();
    if let Some(host) = &cli.host {
        config.host.clone_from(host);
    }
    if let Some(token) = &cli.token {
        config.access_token = Some(token.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    config
}

fn print_schema() {
    let schema = secure_key_schema();
    println!("{}", schema.resource_type);
    for attribute in &schema.attributes {
        let mut flags = vec![attribute.kind.as_str()];
        if attribute.required {
            flags.push("required");
        }
        if attribute.force_new {
            flags.push("force-new");
        }
        let default = attribute
            .default
            .map(|d| format!(" [default: {d}]"))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<28} {}{default}",
            attribute.name,
            flags.join(", "),
            attribute.description
        );
    }
}

async fn run(cli: Cli, controller: &SecureKeyResource<ReqwestTransport>) -> Result<ExitCode> {
    let namespace = cli.namespace.unwrap_or_default();

    match cli.command {
        Commands::Create {
            name,
            data,
            data_env,
            description,
            properties,
        } => {
            let data = match (data, data_env) {
                (Some(value), _) => value,
                (None, Some(var)) => std::env::var(&var)
                    .with_context(|| format!("Failed to read secret value from ${var}"))?,
                (None, None) => bail!("one of --data or --data-env is required"),
            };
            let spec = SecureKeySpec::builder(name, data)
                .namespace(namespace)
                .description(description)
                .properties(properties)
                .build()?;
            let id = controller
                .create(&spec)
                .await
                .with_context(|| format!("Failed to create secure key {}", spec.name()))?;
            println!("created {}/{id}", id.namespace());
        }
        Commands::Delete { name } => {
            let id = SecureKeyId::new(namespace, name);
            controller
                .delete(&id)
                .await
                .with_context(|| format!("Failed to delete secure key {id}"))?;
            println!("deleted {id}");
        }
        Commands::Exists { name } => {
            let id = SecureKeyId::new(namespace, name);
            let found = controller
                .exists(&id)
                .await
                .with_context(|| format!("Failed to check secure key {id}"))?;
            println!("{found}");
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Read { name } => {
            let id = SecureKeyId::new(namespace, name);
            controller.read(&id).await?;
            println!("secure key values are write-only; nothing to read for {id}");
        }
        Commands::Schema => print_schema(),
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Missing .env is fine
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Ignoring unreadable .env file: {err}");
        }
    }

    let cli = Cli::parse();
    let config = load_config(&cli);
    init_logging(&config);
    debug!(config = ?config, "Loaded configuration");

    if config.enable_metrics {
        if let Err(err) = register_metrics() {
            warn!(error = %err, "Failed to register metrics");
        }
    }

    let print_metrics = cli.print_metrics && config.enable_metrics;
    let controller =
        SecureKeyResource::from_config(config).context("Failed to build HTTP client")?;
    let outcome = run(cli, &controller).await;

    if print_metrics {
        match gather_metrics() {
            Ok(text) => eprint!("{text}"),
            Err(err) => warn!(error = %err, "Failed to gather metrics"),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("team=ingest").unwrap(),
            ("team".to_string(), "ingest".to_string())
        );
        assert_eq!(
            parse_property("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=value").is_err());
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::try_parse_from([
            "securekeyctl",
            "exists",
            "token",
            "--host",
            "http://cdap.internal:11015",
            "--timeout",
            "5",
            "--token",
            "abc",
        ])
        .unwrap();
        let config = load_config(&cli);
        assert_eq!(config.host, "http://cdap.internal:11015");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.access_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_create_requires_a_data_source() {
        assert!(Cli::try_parse_from(["securekeyctl", "create", "token"]).is_err());
        assert!(Cli::try_parse_from([
            "securekeyctl",
            "create",
            "token",
            "--data",
            "x",
            "--data-env",
            "VAR"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["securekeyctl", "create", "token", "--data", "x"]).is_ok());
    }
}
