//! Canadian Cheese Directory (cheesedir) - Main entry point
//!
//! Loads the directory CSV into memory, mirrors it to SQLite and serves the
//! numbered console menu on stdin/stdout. Logs go to stderr (or the configured
//! log file) so they never interleave with the menu.

use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cheesedir::{App, Console};
use cheesedir_common::config::{
    resolve_config, ConfigOverrides, ConfigSource, LoggingConfig, TomlConfig,
};
use cheesedir_common::db::Mirror;

/// Command-line arguments for cheesedir
#[derive(Parser, Debug)]
#[command(name = "cheesedir")]
#[command(about = "Interactive Canadian Cheese Directory")]
#[command(version)]
struct Args {
    /// Config file (default: <config dir>/cheesedir/config.toml if present)
    #[arg(short, long, env = "CHEESEDIR_CONFIG")]
    config: Option<PathBuf>,

    /// Source CSV in the 30-column directory layout
    #[arg(short, long, env = "CHEESEDIR_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Target file of the persist option
    #[arg(short, long, env = "CHEESEDIR_OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Mirror database path
    #[arg(long, env = "CHEESEDIR_DATABASE")]
    database: Option<PathBuf>,

    /// Maximum number of rows read on load and reload
    #[arg(short, long, env = "CHEESEDIR_LIMIT")]
    limit: Option<usize>,

    /// Keep records in memory only
    #[arg(long, env = "CHEESEDIR_NO_MIRROR")]
    no_mirror: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CHEESEDIR_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_file: self.data_file.clone(),
            output_file: self.output_file.clone(),
            database_path: self.database.clone(),
            record_limit: self.limit,
            disable_mirror: self.no_mirror,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // No subscriber yet: config failures reach stderr only
    let (file_config, source) = resolve_config(args.config.as_deref())?;
    let config = file_config.with_overrides(args.overrides());

    init_tracing(&config.logging)?;

    info!("Starting {}", build_info());
    match &source {
        ConfigSource::Defaults => warn!("No config file found, using compiled defaults"),
        other => info!("Config loaded from {}", other),
    }

    let stdin = std::io::stdin();
    let console = Console::new(stdin.lock(), std::io::stdout());
    run_logged(config, console).await
}

/// Version and build identification captured by build.rs
fn build_info() -> String {
    format!(
        "cheesedir v{} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

/// Run a session, logging a fatal error before handing it back
async fn run_logged<R: BufRead, W: Write>(
    config: TomlConfig,
    console: Console<R, W>,
) -> Result<()> {
    let result = run_session(config, console).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run_session<R: BufRead, W: Write>(
    config: TomlConfig,
    console: Console<R, W>,
) -> Result<()> {
    info!("Data file: {}", config.data_file.display());

    let mirror = if config.mirror.enabled {
        let path = &config.mirror.database_path;
        let mirror = Mirror::open(path)
            .await
            .with_context(|| format!("Failed to open mirror database {}", path.display()))?;
        Some(mirror)
    } else {
        info!("Mirror disabled, records are kept in memory only");
        None
    };

    let mut app = App::new(config, mirror, console)
        .await
        .context("Failed to load cheese directory")?;

    app.run().await.context("Session ended with error")?;

    if let Some(mirror) = app.mirror() {
        mirror.close().await;
    }
    info!("Shutdown complete");
    Ok(())
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log level")?;

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheesedir_common::config::MirrorConfig;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn empty_console() -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(Vec::new()), Vec::new())
    }

    #[test]
    fn test_args_map_to_overrides() {
        let args = Args::try_parse_from([
            "cheesedir",
            "--data-file",
            "in.csv",
            "--limit",
            "5",
            "--no-mirror",
        ])
        .unwrap();
        let overrides = args.overrides();

        assert_eq!(overrides.data_file, Some(PathBuf::from("in.csv")));
        assert_eq!(overrides.record_limit, Some(5));
        assert!(overrides.disable_mirror);
        assert!(overrides.output_file.is_none());
    }

    #[test]
    fn test_args_reject_bad_limit() {
        assert!(Args::try_parse_from(["cheesedir", "--limit", "many"]).is_err());
    }

    #[test]
    fn test_build_info_names_version_and_profile() {
        let info = build_info();
        assert!(info.starts_with(&format!("cheesedir v{} (git ", env!("CARGO_PKG_VERSION"))));
        assert!(info.ends_with(&format!(", {})", env!("BUILD_PROFILE"))));
        assert!(!env!("GIT_HASH").is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_is_logged() {
        let temp_dir = TempDir::new().unwrap();
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = TomlConfig {
            data_file: temp_dir.path().join("missing.csv"),
            mirror: MirrorConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let err = run_logged(config, empty_console()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to load cheese directory"));
        let logged = logs.contents();
        assert!(logged.contains("ERROR"), "{}", logged);
        assert!(logged.contains("Failed to load cheese directory"), "{}", logged);
        assert!(logged.contains("missing.csv"), "{}", logged);
    }

    #[tokio::test]
    async fn test_failed_mirror_open_is_logged() {
        let temp_dir = TempDir::new().unwrap();
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // a directory cannot be opened as a database file
        let config = TomlConfig {
            mirror: MirrorConfig {
                database_path: temp_dir.path().to_path_buf(),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = run_logged(config, empty_console()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to open mirror database"));
        assert!(logs.contents().contains("Failed to open mirror database"));
    }
}
