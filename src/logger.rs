// A tiny logger for the `log` crate. Records go to stderr with a timestamp,
// level and source location. Filtering is left entirely to `log`'s global
// max level, which is set from `NEXTDATE_LOG` in `main`.

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex},
};

use {jiff::tz::TimeZone, log::Log};

use crate::style::Theme;

/// Logs every record it's given to stderr.
#[derive(Debug)]
pub struct Logger {
    /// The time zone timestamps are rendered in. Until one is set,
    /// timestamps are in UTC.
    tz: Mutex<Option<TimeZone>>,
}

impl Logger {
    /// Installs a new logger as the global logger and returns it.
    ///
    /// This fails if a global logger was already installed.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        let logger = Box::leak(Box::new(Logger { tz: Mutex::new(None) }));
        log::set_logger(logger)?;
        Ok(logger)
    }

    pub fn set_time_zone(&self, tz: TimeZone) {
        let mut logger_tz = self.tz.lock().unwrap();
        *logger_tz = Some(tz);
    }

    fn timestamp(&self) -> String {
        // `Timestamp::now` and `to_zoned` don't log, so this can't recurse
        // back into the logger.
        let ts = jiff::Timestamp::now();
        match *self.tz.lock().unwrap() {
            Some(ref tz) => ts.to_zoned(tz.clone()).to_string(),
            None => ts.to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let theme = Theme::stderr();
        let now = self.timestamp();
        let level = theme.level(record.level());
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{}|{}|{}:{}: {}",
                    theme.highlight(now),
                    level,
                    relative(file),
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                eprintln!(
                    "{}|{}|{}: {}",
                    theme.highlight(now),
                    level,
                    relative(file),
                    record.args()
                );
            }
            _ => {
                eprintln!(
                    "{}|{}: {}",
                    theme.highlight(now),
                    level,
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        // eprintln! doesn't buffer.
    }
}

fn relative<'p>(path: &'p str) -> &'p str {
    let Some(cwd) = cwd() else { return path };
    let Ok(relative) = Path::new(path).strip_prefix(cwd) else { return path };
    let Some(relative) = relative.to_str() else { return path };
    relative
}

fn cwd() -> Option<&'static Path> {
    static CWD: LazyLock<Option<PathBuf>> =
        LazyLock::new(|| std::env::current_dir().ok());
    CWD.as_deref()
}
