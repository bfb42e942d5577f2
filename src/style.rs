use std::{
    fmt::Display,
    io::IsTerminal,
    sync::{Arc, LazyLock},
};

use anstyle::{AnsiColor, Style};

/// How nextdate styles what it writes to a terminal.
///
/// When the stream isn't a terminal, or colors have been disabled, every
/// style is empty and rendering is a plain pass-through.
#[derive(Clone, Debug)]
pub struct Theme {
    inner: Option<Arc<ThemeInner>>,
}

impl Theme {
    /// Returns the theme for stderr.
    pub fn stderr() -> &'static Theme {
        static THEME: LazyLock<Theme> = LazyLock::new(|| {
            if !std::io::stderr().is_terminal() || !can_use_colors() {
                return Theme::none();
            }
            Theme { inner: Some(Arc::new(ThemeInner::default())) }
        });
        &*THEME
    }

    /// Returns a theme that never styles anything.
    const fn none() -> Theme {
        Theme { inner: None }
    }

    pub fn highlight<T: Display>(&self, data: T) -> Styled<'_, T> {
        let style = self.inner().map(|inner| &inner.highlight);
        Styled { data, style }
    }

    /// Styles a log level. Errors and warnings stand out, everything else
    /// is dimmed.
    pub fn level(&self, level: log::Level) -> Styled<'_, log::Level> {
        let style = self.inner().map(|inner| match level {
            log::Level::Error => &inner.error,
            log::Level::Warn => &inner.warn,
            _ => &inner.quiet,
        });
        Styled { data: level, style }
    }

    fn inner(&self) -> Option<&ThemeInner> {
        self.inner.as_deref()
    }
}

#[derive(Debug)]
struct ThemeInner {
    highlight: Style,
    error: Style,
    warn: Style,
    quiet: Style,
}

impl Default for ThemeInner {
    fn default() -> ThemeInner {
        ThemeInner {
            highlight: Style::new()
                .bold()
                .fg_color(Some(AnsiColor::Magenta.into())),
            error: Style::new().bold().fg_color(Some(AnsiColor::Red.into())),
            warn: Style::new().fg_color(Some(AnsiColor::Yellow.into())),
            quiet: Style::new().dimmed(),
        }
    }
}

/// Some data along with the style (if any) it should be rendered in.
#[derive(Clone, Debug)]
pub struct Styled<'s, T> {
    data: T,
    style: Option<&'s Style>,
}

impl<'s, T: Display> Display for Styled<'s, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Some(style) = self.style else {
            return self.data.fmt(f);
        };
        write!(f, "{style}{}{style:#}", self.data)
    }
}

/// Whether colors have been globally disabled, via `NO_COLOR` or a dumb
/// terminal.
fn can_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    std::env::var_os("TERM").map_or(true, |v| v != "dumb")
}
