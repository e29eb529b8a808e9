// # homebase - dynamic DNS updater
//
// Thin command-line wrapper around `homebase-core`. It:
// 1. Reads configuration from flags or environment variables
// 2. Validates it and initializes logging
// 3. Runs one update and prints the resolved IP on stdout
//
// Run it from cron or a systemd timer; the binary itself never loops.
//
// ## Configuration
//
// - `--domain` / `HOMEBASE_DOMAIN`: Domain hosted with DigitalOcean
// - `--record` / `HOMEBASE_RECORD`: Subdomain to update
// - `--token` / `HOMEBASE_TOKEN`: DigitalOcean API token
// - `--ip-url` / `HOMEBASE_IP_URL`: Address echo service
// - `--api-url` / `HOMEBASE_API_URL`: DigitalOcean API base URL
// - `--timeout` / `HOMEBASE_TIMEOUT_SECS`: HTTP timeout in seconds
// - `--dry-run` / `HOMEBASE_DRY_RUN`: Skip the final save (`0`, `false`, `no`
//   and `off` leave it disabled)
// - `--log-level` / `HOMEBASE_LOG_LEVEL`: trace, debug, info, warn, error
//
// `-domain`, `-record` and `-token` are also accepted with a single dash.
//
// ## Example
//
// ```bash
// export HOMEBASE_TOKEN=your_token
// homebase --domain example.com --record home
// ```

use anyhow::Result;
use clap::Parser;
use clap::builder::FalseyValueParser;
use homebase_core::config::{DEFAULT_ADDRESS_ECHO_URL, DEFAULT_API_BASE_URL};
use homebase_core::{ApiToken, Error, HttpTransport, ReqwestTransport, Updater, UpdaterConfig};
use homebase_ip_http::HttpAddressResolver;
use homebase_provider_digitalocean::DigitalOceanRecords;
use std::ffi::OsString;
use std::net::IpAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different outcomes of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomebaseExitCode {
    /// Record updated (or would have been, in dry-run mode)
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// The update failed
    RuntimeError = 2,
    /// The requested record does not exist at the provider
    RecordNotFound = 3,
}

impl From<HomebaseExitCode> for ExitCode {
    fn from(code: HomebaseExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl HomebaseExitCode {
    fn for_error(err: &Error) -> Self {
        if err.is_record_not_found() {
            HomebaseExitCode::RecordNotFound
        } else {
            HomebaseExitCode::RuntimeError
        }
    }
}

/// Point a DigitalOcean subdomain at this machine's public IP
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Domain name hosted with DigitalOcean
    #[arg(long, env = "HOMEBASE_DOMAIN")]
    domain: String,

    /// Subdomain to update
    #[arg(long, env = "HOMEBASE_RECORD")]
    record: String,

    /// DigitalOcean API token
    #[arg(long, env = "HOMEBASE_TOKEN", hide_env_values = true)]
    token: ApiToken,

    /// Service that echoes the caller's IP address
    #[arg(long, env = "HOMEBASE_IP_URL", default_value = DEFAULT_ADDRESS_ECHO_URL)]
    ip_url: String,

    /// DigitalOcean API base URL
    #[arg(long, env = "HOMEBASE_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// HTTP timeout in seconds (transport default when unset)
    #[arg(long, env = "HOMEBASE_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Look up everything but do not save the record
    #[arg(long, env = "HOMEBASE_DRY_RUN", value_parser = FalseyValueParser::new())]
    dry_run: bool,

    /// Log verbosity
    #[arg(
        long,
        env = "HOMEBASE_LOG_LEVEL",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,
}

/// Flags that existing cron lines pass with a single dash (`-domain x`)
const SINGLE_DASH_FLAGS: &[&str] = &["domain", "record", "token"];

/// Rewrite `-domain`, `-record` and `-token` (with or without `=value`) to
/// their double-dash form so clap accepts them
fn expand_single_dash_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let expanded = arg.to_str().and_then(|s| {
                let rest = s.strip_prefix('-')?;
                let name = rest.split('=').next().unwrap_or(rest);
                SINGLE_DASH_FLAGS
                    .contains(&name)
                    .then(|| format!("-{}", s))
            });
            expanded.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

impl Cli {
    fn to_config(&self) -> UpdaterConfig {
        UpdaterConfig::new(
            self.domain.trim(),
            self.record.trim(),
            self.token.expose().trim(),
        )
        .with_address_echo_url(self.ip_url.clone())
        .with_api_base_url(self.api_url.clone())
        .with_http_timeout_secs(self.timeout)
        .with_dry_run(self.dry_run)
    }

    fn log_level(&self) -> Level {
        match self.log_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(expand_single_dash_flags(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also come through here
            let _ = e.print();
            return if e.use_stderr() {
                HomebaseExitCode::ConfigError.into()
            } else {
                HomebaseExitCode::Success.into()
            };
        }
    };

    let config = cli.to_config();
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return HomebaseExitCode::ConfigError.into();
    }

    if let Err(e) = init_tracing(cli.log_level()) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HomebaseExitCode::ConfigError.into();
    }

    // Every step depends on the previous one, one thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HomebaseExitCode::ConfigError.into();
        }
    };

    match rt.block_on(run(&config)) {
        Ok(ip) => {
            println!("{}", ip);
            HomebaseExitCode::Success.into()
        }
        Err(e) => {
            error!("{}", e);
            if e.is_record_not_found() {
                error!(
                    "Create an A record named '{}' under {} first",
                    config.record_name, config.domain
                );
            }
            HomebaseExitCode::for_error(&e).into()
        }
    }
}

fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Build the components from configuration and run one update
async fn run(config: &UpdaterConfig) -> homebase_core::Result<IpAddr> {
    let transport: Arc<dyn HttpTransport> = match config.http_timeout() {
        Some(timeout) => Arc::new(ReqwestTransport::with_timeout(timeout)?),
        None => Arc::new(ReqwestTransport::new()?),
    };

    let resolver = HttpAddressResolver::with_url(transport.clone(), &config.address_echo_url);
    let repository = DigitalOceanRecords::with_api_base(transport, &config.api_base_url);
    let updater = Updater::new(Box::new(resolver), Box::new(repository)).with_dry_run(config.dry_run);

    info!(
        "Updating {}.{}{}",
        config.record_name,
        config.domain,
        if config.dry_run { " [DRY-RUN]" } else { "" }
    );

    updater
        .update_to_current_address(&config.domain, &config.record_name, &config.api_token)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use homebase_core::Operation;
    use std::sync::Mutex;

    // clap reads HOMEBASE_* while parsing; tests that parse hold this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(expand_single_dash_flags(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_flags_build_config() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cli = Cli::try_parse_from([
            "homebase",
            "--domain",
            "example.com",
            "--record",
            "home",
            "--token",
            "12345",
            "--timeout",
            "15",
            "--dry-run",
        ])
        .unwrap();

        let config = cli.to_config();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.record_name, "home");
        assert_eq!(config.api_token.expose(), "12345");
        assert_eq!(config.address_echo_url, DEFAULT_ADDRESS_ECHO_URL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout_secs, Some(15));
        assert!(config.dry_run);
        assert!(config.validate().is_ok());
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = Cli::try_parse_from([
            "homebase",
            "--domain",
            "example.com",
            "--record",
            "home",
            "--token",
            "12345",
            "--log-level",
            "loud",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_dash_flags_accepted() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cli = parse(&[
            "homebase",
            "-domain",
            "example.com",
            "-record=home",
            "-token",
            "12345",
        ])
        .unwrap();

        let config = cli.to_config();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.record_name, "home");
        assert_eq!(config.api_token.expose(), "12345");
    }

    #[test]
    fn test_expand_single_dash_flags_leaves_other_args() {
        let args = expand_single_dash_flags(
            ["homebase", "--domain", "-d", "-timeout", "-", "home"]
                .iter()
                .map(OsString::from),
        );
        assert_eq!(
            args,
            ["homebase", "--domain", "-d", "-timeout", "-", "home"]
                .iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_dry_run_env_accepts_numeric_values() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let args = [
            "homebase",
            "--domain",
            "example.com",
            "--record",
            "home",
            "--token",
            "12345",
        ];

        // SAFETY: every test that reads the environment holds ENV_LOCK
        unsafe { std::env::set_var("HOMEBASE_DRY_RUN", "1") };
        let on = parse(&args);
        unsafe { std::env::set_var("HOMEBASE_DRY_RUN", "0") };
        let off = parse(&args);
        unsafe { std::env::remove_var("HOMEBASE_DRY_RUN") };
        let unset = parse(&args);

        assert!(on.unwrap().dry_run);
        assert!(!off.unwrap().dry_run);
        assert!(!unset.unwrap().dry_run);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            HomebaseExitCode::for_error(&Error::record_not_found("home")),
            HomebaseExitCode::RecordNotFound
        );
        assert_eq!(
            HomebaseExitCode::for_error(&Error::http_status(Operation::FindRecord, 404, "")),
            HomebaseExitCode::RuntimeError
        );
        assert_eq!(
            HomebaseExitCode::for_error(&Error::UnsupportedRecordType {
                actual: "CNAME".into()
            }),
            HomebaseExitCode::RuntimeError
        );
    }
}
