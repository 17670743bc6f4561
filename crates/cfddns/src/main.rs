// # cfddns - Cloudflare dynamic DNS updater
//
// Thin integration layer: reads configuration, wires the HTTP IP source and
// the Cloudflare provider into the core engine, runs one pass and maps the
// outcome to an exit code. All update logic lives in cfddns-core.
//
// ## Configuration
//
// - `CLOUDFLARE_TOKEN`: API token (required)
// - `CLOUDFLARE_DOMAIN`: zone name (required)
// - `CLOUDFLARE_SUBDOMAIN`: record label inside the zone (required)
// - `CLOUDFLARE_PROXY`: proxied flag to write (default: false)
// - `CLOUDFLARE_COMMENT`: write an audit comment (default: false)
// - `CLOUDFLARE_DRY_RUN`: skip the update call (default: false)
// - `CLOUDFLARE_IP_URL`: IP echo endpoint (default: https://api.ipify.org)
// - `CLOUDFLARE_LOG_LEVEL`: log level for stderr output (default: warn)
//
// ## Example
//
// ```bash
// export CLOUDFLARE_TOKEN=your_token
// export CLOUDFLARE_DOMAIN=example.com
// export CLOUDFLARE_SUBDOMAIN=home
// export CLOUDFLARE_COMMENT=true
//
// cfddns
// ```
//
// The result line (or the error message) goes to stdout. Logs go to stderr.

use anyhow::Result;
use cfddns_core::{Config, DdnsEngine, UpdateResult};
use cfddns_ip_http::HttpIpSource;
use cfddns_provider_cloudflare::CloudflareProvider;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record unchanged, updated, or dry run completed
/// - 1: Configuration error
/// - 2: Runtime error (IP lookup, provider, update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CfddnsExitCode {
    /// Run completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<CfddnsExitCode> for ExitCode {
    fn from(code: CfddnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Load and validate configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{}", e);
            return CfddnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CfddnsExitCode::ConfigError.into();
    }

    info!("Updating {}", config.record_name());
    debug!("Configuration: {:?}", config);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            println!("{}", e);
            return CfddnsExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(config)) {
        Ok(result) => {
            println!("{}", result.message());
            CfddnsExitCode::Success.into()
        }
        Err(e) => {
            error!("Update failed: {}", e);
            println!("{}", e);
            exit_code_for(&e).into()
        }
    }
}

/// Build the collaborators and run the engine once
async fn run(config: Config) -> Result<UpdateResult> {
    let ip_source = HttpIpSource::new(config.ip_url.clone())?;
    let provider = CloudflareProvider::new(config.token.clone())?;

    let engine = DdnsEngine::new(Box::new(ip_source), Box::new(provider), config);
    Ok(engine.run_once().await?)
}

/// Configuration failures exit with 1, everything else with 2
fn exit_code_for(err: &anyhow::Error) -> CfddnsExitCode {
    match err.downcast_ref::<cfddns_core::Error>() {
        Some(e) if e.is_config() => CfddnsExitCode::ConfigError,
        _ => CfddnsExitCode::RuntimeError,
    }
}

fn log_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}
