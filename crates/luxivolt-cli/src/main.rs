//! luxivolt CLI: Command-line entry point for the Luxivolt chat assistant

use clap::{Parser, Subcommand};
use luxivolt_chat::{
    ChatWidget, Config, ConfigError, HttpBackend, Role, CONFIG_PATH, ENDPOINT_ENV,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Luxivolt technical assistant: chat widget in the terminal
#[derive(Parser)]
#[command(name = "luxivolt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Chat backend endpoint (overrides the config file and $LUXIVOLT_CHAT_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Write logs to this file (the TUI logs nowhere else)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send one message and print the assistant's answer
    Ask {
        /// The message to send
        text: String,

        /// Print the whole conversation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the chat backend is up
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default config file
    Init,
}

fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.log_file.as_deref(), interactive);

    if let Some(Commands::Init) = cli.command {
        cmd_init(&cli.config);
        return;
    }

    let config = match load_config(&cli.config, cli.endpoint.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let backend = match config
        .endpoint_url()
        .map_err(|e| e.to_string())
        .and_then(|url| HttpBackend::new(url).map_err(|e| e.to_string()))
    {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    match cli.command {
        None | Some(Commands::Tui) => {
            if let Err(e) = rt.block_on(luxivolt_tui::run_tui(&config, Arc::new(backend))) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Ask { text, json }) => {
            rt.block_on(cmd_ask(&config, backend, &text, json));
        }
        Some(Commands::Doctor { json }) => {
            rt.block_on(cmd_doctor(&backend, json));
        }
        Some(Commands::Init) => {}
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` picks the level (default `warn`). Logs go to `log_file` when
/// given; otherwise to stderr, except in the TUI where they are dropped.
fn init_logging(log_file: Option<&Path>, interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => match std::fs::File::create(path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            Err(e) => eprintln!("Warning: cannot open log file {}: {e}", path.display()),
        },
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
}

/// Config file, then the environment, then `--endpoint`.
fn load_config(path: &Path, endpoint: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = Config::load_or_default(path)?.with_env_overrides();
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint.to_string();
    }
    config.endpoint_url()?;
    Ok(config)
}

async fn cmd_ask(config: &Config, backend: HttpBackend, text: &str, json: bool) {
    let mut widget = ChatWidget::new(Arc::new(backend), config);
    widget.open();

    if !widget.send(text).is_accepted() {
        eprintln!("Nothing to send");
        std::process::exit(1);
    }
    widget.settle().await;

    if json {
        match serde_json::to_string_pretty(widget.conversation()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to serialize conversation: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(reply) = widget
        .conversation()
        .last()
        .filter(|m| m.role == Role::Assistant)
    {
        println!("{}", reply.content);
    }
}

async fn cmd_doctor(backend: &HttpBackend, json: bool) {
    let health = backend.health().await;

    if json {
        let value = match &health {
            Ok(report) => serde_json::json!({
                "endpoint": backend.endpoint().as_str(),
                "reachable": true,
                "health": report,
            }),
            Err(e) => serde_json::json!({
                "endpoint": backend.endpoint().as_str(),
                "reachable": false,
                "error": e.to_string(),
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        );
        if health.is_err() {
            std::process::exit(1);
        }
        return;
    }

    println!("Chat endpoint:  {}", backend.endpoint());
    println!("Health check:   {}", backend.health_url());
    println!();

    match health {
        Ok(report) => {
            println!("  ✓ status      {}", report.status);
            if let Some(rag) = &report.rag_status {
                println!("  ✓ rag         {rag}");
            }
            if let Some(chunks) = report.indexed_chunks {
                println!("  ✓ chunks      {chunks}");
            }
        }
        Err(e) => {
            println!("  ✗ unreachable {e}");
            println!();
            println!("Set --endpoint or ${ENDPOINT_ENV} to point at a running backend.");
            std::process::exit(1);
        }
    }
}

fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    match Config::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::try_parse_from(["luxivolt"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(CONFIG_PATH));
    }

    #[test]
    fn test_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "luxivolt",
            "ask",
            "Trafo bakım hizmetleriniz nelerdir?",
            "--json",
            "--endpoint",
            "http://127.0.0.1:9000/chat",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000/chat"));
        match cli.command {
            Some(Commands::Ask { text, json }) => {
                assert_eq!(text, "Trafo bakım hizmetleriniz nelerdir?");
                assert!(json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_load_config_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = load_config(&path, Some("https://chat.example.com/chat")).unwrap();
        assert_eq!(config.endpoint, "https://chat.example.com/chat");
    }

    #[test]
    fn test_load_config_rejects_bad_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let err = load_config(&path, Some("ftp://example.com")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".luxivolt").join("config.json");
        cmd_init(&path);

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
