use std::{env, io::Write, process::ExitCode, sync::LazyLock};

use {
    anyhow::Context,
    jiff::{Timestamp, tz::TimeZone},
};

use crate::date::Date;

mod args;
mod cmd;
mod date;
mod logger;
mod parse;
mod recur;
mod rejection;
mod rule;
mod style;
mod task;

static TZ: LazyLock<TimeZone> = LazyLock::new(|| TimeZone::system());

/// The date that "next" is measured against unless `-n/--now` says
/// otherwise.
static TODAY: LazyLock<Date> = LazyLock::new(|| {
    match read_env_nextdate_now() {
        Ok(Some(date)) => {
            log::trace!(
                "setting today's date to `{date}` from `NEXTDATE_NOW` \
                 environment variable",
            );
            date
        }
        Ok(None) => {
            let today = system_today();
            log::trace!(
                "`NEXTDATE_NOW` environment variable not set, using \
                 today's date `{today}`",
            );
            today
        }
        Err(err) => {
            let today = system_today();
            log::warn!(
                "reading `NEXTDATE_NOW` failed, using today's date \
                 `{today}`: {err:#}",
            );
            today
        }
    }
});

/// Again and again, and then once more.
fn main() -> ExitCode {
    let err = match run() {
        Ok(code) => return code,
        Err(err) => err,
    };
    if let Some(help) = err.root_cause().downcast_ref::<args::Help>() {
        writeln!(&mut std::io::stdout(), "{help}").unwrap();
        return ExitCode::SUCCESS;
    }
    if let Some(version) = err.root_cause().downcast_ref::<args::Version>() {
        writeln!(&mut std::io::stdout(), "{version}").unwrap();
        return ExitCode::SUCCESS;
    }
    // A closed pipe on stdout, e.g., `nextdate seq ... | head`, is a normal
    // way to stop and not an error worth reporting. The Rust runtime ignores
    // SIGPIPE, so it shows up here as an I/O error instead.
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<std::io::Error>() {
            if err.kind() == std::io::ErrorKind::BrokenPipe {
                return ExitCode::from(0);
            }
        }
    }
    if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        writeln!(&mut std::io::stderr(), "{:?}", err).unwrap();
    } else {
        writeln!(&mut std::io::stderr(), "{:#}", err).unwrap();
    }
    ExitCode::from(1)
}

fn run() -> anyhow::Result<ExitCode> {
    let level = env::var("NEXTDATE_LOG").unwrap_or_else(|_| String::new());
    let level = match &*level {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{}'", unk),
    };
    log::set_max_level(level);
    // `TimeZone::system()` may log while it looks for the system time zone,
    // so the logger starts out in UTC and switches once the zone is known.
    let logger = logger::Logger::init()?;
    logger.set_time_zone(TZ.clone());
    cmd::run(&mut lexopt::Parser::from_env())?;
    Ok(ExitCode::SUCCESS)
}

fn system_today() -> Date {
    Date::from(Timestamp::now().to_zoned(TZ.clone()).date())
}

fn read_env_nextdate_now() -> anyhow::Result<Option<Date>> {
    let Some(val) = std::env::var_os("NEXTDATE_NOW") else { return Ok(None) };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`NEXTDATE_NOW` environment variable is not valid UTF-8: {val:?}"
        )
    };
    val.parse::<Date>()
        .context("`NEXTDATE_NOW` environment variable is not a valid date")
        .map(Some)
}
