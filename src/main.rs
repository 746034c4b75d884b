//! cast-presentation-server - Remote Display Presentation Service
//!
//! Entry point for the server binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cast_presentation_server::config::Config;
use cast_presentation_server::display::{select_config, summarize, DisplayProfile};
use cast_presentation_server::server::headless::{HeadlessHost, HeadlessSink};
use cast_presentation_server::server::replay::{ReplayScript, ReplaySource};
use cast_presentation_server::server::PresentationServer;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cast-presentation-server
#[derive(Parser, Debug)]
#[command(name = "cast-presentation-server")]
#[command(version, about = "Remote Display Presentation Service", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Replay script for the run mode (overrides [provider] script)
    #[arg(long, env = "CAST_PRESENTATION_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Display profile queried at surface setup (overrides [provider] profile)
    #[arg(long, env = "CAST_PRESENTATION_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Dry-run display config selection against a profile and exit
    ///
    /// Runs the selector with the configured [rendering] attributes and
    /// reports the chosen configuration, including whether the
    /// anti-aliasing fallback was taken.
    #[arg(long)]
    pub select_config: bool,

    /// Output format for --select-config (text|json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Run diagnostics and exit
    ///
    /// Checks config, display profile, replay script, and config
    /// selection. Helpful for troubleshooting setup issues.
    #[arg(long)]
    pub diagnose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolve config path: CLI flag, then XDG default, then /etc fallback
    let config_path = args.config.clone().unwrap_or_else(|| {
        let candidate = cast_presentation_server::config::get_config_dir().join("config.toml");
        if candidate.exists() {
            candidate.display().to_string()
        } else {
            "/etc/cast-presentation-server/config.toml".to_string()
        }
    });

    // Load configuration first (needed for logging settings)
    // Silently fall back to defaults if config doesn't exist yet
    let config = Config::load(&config_path).unwrap_or_else(|_| Config::default_config());

    // Initialize logging (uses config.logging, CLI args override)
    init_logging(&args, &config.logging)?;

    info!("════════════════════════════════════════════════════════");
    info!("  cast-presentation-server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "  Built: {} {}",
        option_env!("BUILD_DATE").unwrap_or("unknown"),
        option_env!("BUILD_TIME").unwrap_or("")
    );
    info!(
        "  Commit: {}",
        option_env!("GIT_HASH").unwrap_or("vendored")
    );
    info!(
        "  Profile: {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
    info!("════════════════════════════════════════════════════════");

    // Apply CLI overrides (config already loaded above for logging)
    let config = config.with_overrides(args.script.clone(), args.profile.clone());

    if args.print_config {
        return print_effective_config(&config);
    }

    if args.select_config {
        return run_select_config(&config, &args.format);
    }

    if args.diagnose {
        return run_diagnostics(&config);
    }

    cast_presentation_server::runtime::log_startup_diagnostics();

    info!("Configuration loaded successfully");
    tracing::debug!("Config: {:?}", config);

    let script_path = config
        .provider
        .script
        .clone()
        .context("No replay script configured: set [provider] script or pass --script")?;
    let profile_path = config
        .provider
        .profile
        .clone()
        .context("No display profile configured: set [provider] profile or pass --profile")?;

    let script = ReplayScript::load(&script_path)
        .with_context(|| format!("Loading replay script {}", script_path.display()))?;
    let profile = DisplayProfile::load(&profile_path)
        .with_context(|| format!("Loading display profile {}", profile_path.display()))?;

    info!(
        events = script.len(),
        profile = profile.label(),
        "Starting presentation server"
    );
    if script.is_empty() {
        warn!("Replay script contains no events; the server will exit immediately");
    }

    let server = PresentationServer::new(&config, HeadlessHost, HeadlessSink, profile);

    // Ctrl-C closes the event loop gracefully; the server dismisses any
    // active presentation before exiting.
    let shutdown = server.shutdown_sender();
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C received - initiating graceful shutdown");
            let _ = shutdown.send(());
        }
    });

    if let Err(e) = server.run(ReplaySource::new(script)).await {
        eprintln!(
            "{}",
            cast_presentation_server::runtime::format_user_error(&e)
        );
        return Err(e);
    }

    info!("Server shut down");
    Ok(())
}

/// Print the effective configuration as TOML
fn print_effective_config(config: &Config) -> Result<()> {
    let rendered =
        toml::to_string_pretty(config).context("Serializing effective configuration")?;
    println!("{rendered}");
    Ok(())
}

/// Dry-run display config selection and report the outcome
fn run_select_config(config: &Config, format: &str) -> Result<()> {
    let profile_path = config
        .provider
        .profile
        .clone()
        .context("No display profile configured: set [provider] profile or pass --profile")?;
    let profile = DisplayProfile::load(&profile_path)
        .with_context(|| format!("Loading display profile {}", profile_path.display()))?;

    let request = config.rendering.to_request();
    let outcome = select_config(&request, &profile);

    if format == "json" {
        let json = match &outcome {
            Ok(selection) => serde_json::json!({
                "profile": profile.label(),
                "candidates": profile.configs.len(),
                "selected": summarize(&profile, selection.config()),
                "multisampled": selection.is_multisampled(),
            }),
            Err(e) => serde_json::json!({
                "profile": profile.label(),
                "candidates": profile.configs.len(),
                "selected": null,
                "error": e.to_string(),
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Serializing selection report")?
        );
    } else {
        println!("╔════════════════════════════════════════════════════════╗");
        println!("║         Display Config Selection Report                ║");
        println!("╚════════════════════════════════════════════════════════╝");
        println!();
        println!(
            "Profile: {} ({} candidates)",
            profile.label(),
            profile.configs.len()
        );
        println!(
            "Requested: R{} G{} B{} A{} (exact), depth ≥{}, stencil ≥{}{}",
            request.red(),
            request.green(),
            request.blue(),
            request.alpha(),
            request.depth(),
            request.stencil(),
            match request.multisampling() {
                Some(ms) => format!(", {}x MSAA preferred", ms.samples),
                None => String::new(),
            }
        );
        println!();

        match &outcome {
            Ok(selection) => {
                let summary = summarize(&profile, selection.config());
                println!(
                    "✅ Selected: R{} G{} B{} A{}, depth {}, stencil {}, {} samples",
                    summary.red,
                    summary.green,
                    summary.blue,
                    summary.alpha,
                    summary.depth,
                    summary.stencil,
                    summary.samples
                );
                if request.multisampling().is_some() && !selection.is_multisampled() {
                    println!("⚠️  Anti-aliasing unavailable - fell back to plain rendering");
                }
            }
            Err(e) => println!("❌ Selection failed: {e}"),
        }
    }

    outcome
        .map(|_| ())
        .context("Display config selection failed")
}

/// Run diagnostic checks
fn run_diagnostics(config: &Config) -> Result<()> {
    println!("╔════════════════════════════════════════════════════════╗");
    println!("║         Diagnostic Report                              ║");
    println!("╚════════════════════════════════════════════════════════╝");
    println!();

    // Test 1: configuration
    print!("[  ] Configuration... ");
    match config.validate() {
        Ok(()) => println!("✅"),
        Err(e) => println!("❌ {e}"),
    }

    // Test 2: display profile
    print!("[  ] Display profile... ");
    let profile = match &config.provider.profile {
        Some(path) => match DisplayProfile::load(path) {
            Ok(p) => {
                println!("✅ {} ({} candidates)", p.label(), p.configs.len());
                Some(p)
            }
            Err(e) => {
                println!("❌ {e}");
                None
            }
        },
        None => {
            println!("⚠️  Not configured");
            None
        }
    };

    // Test 3: replay script
    print!("[  ] Replay script... ");
    match &config.provider.script {
        Some(path) => match ReplayScript::load(path) {
            Ok(s) => println!("✅ {} events", s.len()),
            Err(e) => println!("❌ {e}"),
        },
        None => println!("⚠️  Not configured"),
    }

    // Test 4: config selection against the profile
    print!("[  ] Config selection... ");
    match profile {
        Some(profile) => match select_config(&config.rendering.to_request(), &profile) {
            Ok(selection) if selection.is_multisampled() => println!("✅ Anti-aliased"),
            Ok(_) => println!("✅ Plain rendering"),
            Err(e) => println!("❌ {e}"),
        },
        None => println!("⚠️  Skipped (no profile)"),
    }

    println!();
    println!("SUMMARY:");
    println!("  Run --select-config for the full selection report");
    println!("  Run --print-config for the effective configuration");

    Ok(())
}

fn init_logging(
    args: &Args,
    logging_config: &cast_presentation_server::config::LoggingConfig,
) -> Result<()> {
    use std::fs::{self, File};

    // CLI -v flag overrides config
    let log_level = if args.verbose > 0 {
        match args.verbose {
            1 => "debug",
            _ => "trace",
        }
    } else {
        match logging_config.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => logging_config.level.as_str(),
            _ => "info", // Invalid value, fallback to info
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("cast_presentation_server={log_level},warn"))
    });

    // CLI --log-file overrides config.log_dir
    let log_file_path: Option<String> = if let Some(cli_path) = &args.log_file {
        Some(cli_path.clone())
    } else if logging_config.log_dir.is_some() {
        let log_dir = cast_presentation_server::config::resolve_log_dir(&logging_config.log_dir);
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!(
                "Warning: Cannot create log directory {}: {e}",
                log_dir.display()
            );
            None
        } else {
            let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            Some(
                log_dir
                    .join(format!("cast-presentation-server-{timestamp}.log"))
                    .display()
                    .to_string(),
            )
        }
    } else {
        None
    };

    // If a log file is specified, write to both stdout and file.
    // Gracefully fall back to stdout-only if file creation fails.
    let log_file = log_file_path
        .as_ref()
        .and_then(|path| match File::create(path) {
            Ok(f) => Some((f, path.clone())),
            Err(e) => {
                eprintln!(
                    "Warning: Cannot create log file {path:?}: {e} — logging to console only"
                );
                None
            }
        });

    if let Some((file, ref log_file_path)) = log_file {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path);
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact())
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .init();
            }
        }
    }

    Ok(())
}
