//! Debug logging for par-nav
//!
//! Bridges the `log` facade to a file at `<tmp>/par_nav_debug.log`
//! (`/tmp/par_nav_debug.log` on Unix, `%TEMP%\par_nav_debug.log` on Windows).
//! When `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied after the config is loaded).

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the level came from the CLI or `RUST_LOG`; the config must not override it
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

struct LogBridge {
    path: PathBuf,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            *file = open_log_file(&self.path);
        }
        if let Some(f) = file.as_mut() {
            let _ = f.write_all(line.as_bytes());
            let _ = f.flush();
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            chrono::Local::now().format("%H:%M:%S%.6f"),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_line(&line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(f) = self.file.lock().as_mut() {
            let _ = f.flush();
        }
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)
        .ok()?;
    let _ = writeln!(
        file,
        "{}\npar-nav debug session started at {}\n{}",
        "=".repeat(80),
        chrono::Local::now().to_rfc3339(),
        "=".repeat(80)
    );
    Some(file)
}

/// Location of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("par_nav_debug.log")
}

/// Level requested through `RUST_LOG`, if any.
///
/// Accepts a bare level (`debug`) or the last `target=level` directive.
pub fn rust_log_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    parse_filter(&value)
}

fn parse_filter(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            LevelFilter::from_str(level).ok()
        })
        .last()
}

/// Install the log bridge as the global logger.
///
/// `cli_level` comes from `--log-level`. Without it `RUST_LOG` is consulted;
/// otherwise logging stays off until [`apply_config_level`] is called.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env_level = rust_log_level();
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        path: log_path(),
        file: Mutex::new(None),
        mirror_stderr: env_level.is_some(),
    });

    if log::set_logger(bridge).is_err() {
        // another logger (e.g. a test harness) is already installed
        return;
    }

    match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            log::set_max_level(level);
        }
        None => log::set_max_level(LevelFilter::Off),
    }
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one
pub fn apply_config_level(level: LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}
