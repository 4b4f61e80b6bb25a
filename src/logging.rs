use std::error::Error;
use std::path::{Path, PathBuf};
use chrono::Utc;
use log::{info, error, debug, warn};
use env_logger::{Builder, Target};

/// Default directory for log files, `~/.pepscan/logs`
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pepscan")
        .join("logs")
}

/// Initialize logging. Records go to stderr unless a log directory is given,
/// in which case a timestamped file is created there and its path returned.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let mut builder = Builder::from_default_env();

    let log_file = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = dir.join(format!("pepscan_{}.log", Utc::now().format("%Y%m%d_%H%M%S")));
            builder.target(Target::Pipe(Box::new(std::fs::File::create(&file)?)));
            Some(file)
        }
        None => {
            builder.target(Target::Stderr);
            None
        }
    };

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf,
            "{} [{}] [{}:{}] {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    if builder.try_init().is_err() {
        eprintln!("Logger already initialized, keeping the existing one");
    }

    info!("Logging system initialized");
    if let Some(file) = &log_file {
        info!("Log file: {file:?}");
    }

    Ok(log_file)
}

/// Map a level name or `-v` count onto a `RUST_LOG` filter for this crate.
/// `PEPSCAN_LOG_LEVEL` wins over the verbosity flag.
pub fn log_filter(env_level: Option<&str>, verbosity: u8) -> String {
    let level = match env_level.map(|l| l.to_lowercase()) {
        Some(level) => match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => level,
            _ => {
                eprintln!("Invalid log level '{level}', defaulting to 'info'");
                "info".to_string()
            }
        },
        None => match verbosity {
            0 => "info".to_string(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    };

    format!("pepscan={level}")
}

/// Set logging level based on environment variable or verbosity flag
pub fn set_log_level(verbosity: u8) {
    let env_level = std::env::var("PEPSCAN_LOG_LEVEL").ok();
    std::env::set_var("RUST_LOG", log_filter(env_level.as_deref(), verbosity));
}

/// Log system information at startup
pub fn log_system_info() {
    info!("=== Pepscan Starting ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Build target: {}", std::env::consts::ARCH);
    info!("Operating system: {}", std::env::consts::OS);
    info!("Current working directory: {:?}", std::env::current_dir().unwrap_or_default());
    info!("Available CPU cores: {}", num_cpus::get());

    debug!("Environment variables:");
    for (key, value) in std::env::vars() {
        if key.starts_with("PEPSCAN_") || key == "RUST_LOG" {
            debug!("  {key}: {value}");
        }
    }
}

/// Log application shutdown
pub fn log_shutdown() {
    info!("=== Pepscan Shutting Down ===");
    info!("Finished at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}

/// Log a fatal error, echoing it to stderr in case the log goes to a file
pub fn log_critical_error(error: &str, context: Option<&str>) {
    if let Some(ctx) = context {
        error!("CRITICAL ERROR [{ctx}]: {error}");
    } else {
        error!("CRITICAL ERROR: {error}");
    }

    if let Some(ctx) = context {
        eprintln!("[{}] CRITICAL ERROR [{}]: {}",
                 Utc::now().format("%Y-%m-%d %H:%M:%S UTC"), ctx, error);
    } else {
        eprintln!("[{}] CRITICAL ERROR: {}",
                 Utc::now().format("%Y-%m-%d %H:%M:%S UTC"), error);
    }
}

/// Warn about a peptide/budget combination that will flood the report
pub fn log_budget_warning(peptide_len: usize, max_mismatches: usize) {
    if max_mismatches >= peptide_len {
        warn!(
            "Mismatch budget {max_mismatches} >= peptide length {peptide_len}: \
             every non-identical window will be reported"
        );
    }
}
