use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use camlink::platform::mock::{
    MockCameraDriver, MockDisplayInfo, MockPermissionGate, MockViewContainer,
};
use camlink::{CamlinkConfig, SessionControllerBuilder, StartOptions};

#[derive(Parser, Debug)]
#[command(name = "camlink")]
#[command(about = "Camera preview bridge with a channel-based command surface")]
#[command(version)]
#[command(long_about = "Exposes a native camera preview session to a host application \
through an asynchronous request/response protocol. This binary exercises the bridge \
against the built-in mock camera driver: it starts a preview, queries flash modes, \
captures a picture, flips the camera and stops again.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "camlink.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without running the bridge")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args);

    info!("Starting camlink v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match CamlinkConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            if args.validate_config {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
            return Err(e.into());
        }
    };

    if args.validate_config {
        info!("Configuration validation successful");
        println!("✓ Configuration is valid");
        return Ok(());
    }

    run_demo(config).await
}

/// Drive the bridge end to end against the mock camera driver.
async fn run_demo(config: CamlinkConfig) -> Result<()> {
    info!("Running camlink against the mock camera driver");

    let driver = MockCameraDriver::new().with_flash_modes(&["off", "on", "auto", "torch"]);

    let (bridge, controller) = SessionControllerBuilder::new()
        .with_config(config.clone())
        .with_driver(driver)
        .with_permission_gate(MockPermissionGate::granted())
        .with_display_info(MockDisplayInfo::default())
        .with_view_container(MockViewContainer::new())
        .build()?;

    let options = StartOptions {
        position: Some(config.preview.default_position.clone()),
        to_back: config.preview.to_back,
        ..Default::default()
    };

    bridge.start(options).await?;
    println!("✓ camera preview started");

    let modes = bridge.get_supported_flash_modes().await?;
    println!("✓ flash modes: {}", serde_json::to_string(&modes)?);

    bridge.set_flash_mode(Some("torch".to_string())).await?;
    println!("✓ flash mode set to torch");

    let picture = bridge.capture(None).await?;
    println!("✓ capture: {}", serde_json::to_string(&picture)?);

    bridge.flip().await?;
    println!("✓ camera flipped");

    bridge.stop().await?;
    println!("✓ camera preview stopped");

    controller.shutdown().await;

    Ok(())
}

fn init_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("camlink={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .boxed(),
        Some("pretty") => fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer().with_target(true).boxed()
        }
        None => fmt::layer().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Camlink Configuration File");
    println!("# This is the default configuration with all available options");
    println!();
    println!("{}", CamlinkConfig::default().to_toml()?);
    Ok(())
}
