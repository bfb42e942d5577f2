use anyhow::Context;

use crate::{
    args::{Configurable, Usage},
    date::Date,
    parse::{BufReadExt, Line},
    rule::Rule,
};

/// The CLI parsing configuration for reading tasks, as an anchor date and a
/// recurrence rule.
///
/// This accepts at most two positional arguments: the anchor followed by the
/// rule. When there are no positional arguments, tasks are read from `stdin`
/// instead, one per line.
#[derive(Clone, Debug, Default)]
pub struct Tasks(Arguments);

impl Tasks {
    pub const ANCHOR_AND_RULE_OR_STDIN: Usage = Usage::arg(
        "<anchor> <rule>",
        "A task's anchor date and recurrence rule, or lines on stdin.",
        r#"
A task's anchor date and recurrence rule, e.g., `20240101 'w 1,5'`.

When no positional arguments are given, tasks are read from stdin, one per
line. Each line is an anchor, a single space and then the rule, e.g.,
`20240101 w 1,5`. Everything after the first space is the rule. A line
without a space has an empty rule.
"#,
    );

    /// Run the given function over each task read from the CLI.
    ///
    /// If there were no positional arguments, then this tries to read them
    /// from stdin, one per line.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Task<'_>) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        match self.0.positional[..] {
            [] => {}
            [ref anchor, ref rule] => {
                f(Task { anchor: anchor.to_str()?, rule: rule.to_str()? })?;
                return Ok(());
            }
            // Never more than two, see `configure`.
            _ => anyhow::bail!("missing {} argument", Rule::ARG.format),
        }
        self.0.try_map(|arg| {
            let line = arg.to_str()?;
            let (anchor, rule) = line.split_once(' ').unwrap_or((line, ""));
            f(Task { anchor, rule })
        })
    }
}

impl Configurable for Tasks {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        if matches!(*arg, lexopt::Arg::Value(_))
            && self.0.positional.len() >= 2
        {
            return Ok(false);
        }
        self.0.configure(p, arg)
    }

    fn usage(&self) -> &[Usage] {
        &[Tasks::ANCHOR_AND_RULE_OR_STDIN]
    }
}

/// A task as given on the CLI. Neither field has been validated.
#[derive(Clone, Copy, Debug)]
pub struct Task<'a> {
    pub anchor: &'a str,
    pub rule: &'a str,
}

/// The CLI parsing configuration for reading recurrence rules.
///
/// This will greedily consume all remaining positional arguments as rules.
/// When there are none, rules are read from `stdin`, one per line.
#[derive(Clone, Debug, Default)]
pub struct Rules(Arguments);

impl Rules {
    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<rule>...",
        "One or more recurrence rules, or lines on stdin.",
        r#"
One or more recurrence rules, e.g., `'w 1,5'`.

When no positional arguments are given, rules are read from stdin, one per
line.
"#,
    );

    /// Run the given function over each rule read from the CLI. The rules
    /// haven't been parsed.
    ///
    /// If there were no positional rules, then this tries to read them from
    /// stdin, one per line.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(&str) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| f(arg.to_str()?))
    }
}

impl Configurable for Rules {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }

    fn usage(&self) -> &[Usage] {
        &[Rules::ARG_OR_STDIN]
    }
}

/// The parsing configuration for a task's date followed by an optional
/// recurrence rule.
///
/// Unlike `Tasks`, these are never read from stdin. The date may be empty,
/// which commands using this take to mean today.
#[derive(Clone, Debug, Default)]
pub struct DateAndRule {
    date: Option<String>,
    rule: Option<String>,
}

impl DateAndRule {
    /// Returns the task's date as given, or an error if it's missing.
    pub fn date(&self) -> anyhow::Result<&str> {
        self.date
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("missing <date> argument"))
    }

    /// Returns the task's rule, which is empty when none was given.
    pub fn rule(&self) -> &str {
        self.rule.as_deref().unwrap_or("")
    }
}

impl Configurable for DateAndRule {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        let lexopt::Arg::Value(ref mut v) = *arg else { return Ok(false) };
        let slot = if self.date.is_none() {
            &mut self.date
        } else if self.rule.is_none() {
            &mut self.rule
        } else {
            return Ok(false);
        };
        *slot = Some(into_utf8(std::mem::take(v))?);
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const DATE: Usage = Usage::arg(
            "<date>",
            "The task's date, or an empty string for today.",
            r#"
The task's date, written as `YYYYMMDD`, e.g., `20240101`.

An empty string is also accepted, and means today.
"#,
        );
        const RULE: Usage = Usage::arg(
            "[<rule>]",
            "The task's recurrence rule, if it recurs.",
            r#"
The task's recurrence rule, if it recurs. When absent or empty, the task is a
one-off task. See the `next` command for the syntax of rules.
"#,
        );
        &[DATE, RULE]
    }
}

/// The parsing configuration for an anchor date followed by a recurrence
/// rule, both required and both given as positional arguments.
#[derive(Clone, Debug, Default)]
pub struct AnchorAndRule {
    anchor: Option<String>,
    rule: Option<String>,
}

impl AnchorAndRule {
    /// Returns the anchor and rule, or an error if either is missing.
    pub fn get(&self) -> anyhow::Result<Task<'_>> {
        let Some(ref anchor) = self.anchor else {
            anyhow::bail!("missing {} argument", Date::ANCHOR_ARG.format)
        };
        let Some(ref rule) = self.rule else {
            anyhow::bail!("missing {} argument", Rule::ARG.format)
        };
        Ok(Task { anchor, rule })
    }
}

impl Configurable for AnchorAndRule {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        let lexopt::Arg::Value(ref mut v) = *arg else { return Ok(false) };
        let slot = if self.anchor.is_none() {
            &mut self.anchor
        } else if self.rule.is_none() {
            &mut self.rule
        } else {
            return Ok(false);
        };
        *slot = Some(into_utf8(std::mem::take(v))?);
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Date::ANCHOR_ARG, Rule::ARG]
    }
}

/// The parsing configuration for reading arguments either as positional
/// arguments on the CLI, or as line-delimited data on `stdin`.
///
/// This will greedily consume all remaining positional arguments. That is,
/// this is generally intended for use cases where a variable number of
/// arguments can be given.
///
/// When there are _zero_ positional arguments, then this will read lines from
/// stdin instead.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<Argument<'static>>,
}

impl Arguments {
    /// Run the given function over each argument read from the CLI.
    ///
    /// If there were no positional arguments, then this tries to read them
    /// from stdin, one per line. Stated differently, the argument given
    /// to the closure is either always `Positional` or always `StdinLine`.
    /// You can never get a mix.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Argument<'_>) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        if !self.positional.is_empty() {
            for arg in self.positional {
                if !f(arg)? {
                    return Ok(());
                }
            }
            return Ok(());
        }
        std::io::stdin().lock().for_byte_line(|line| {
            f(Argument::StdinLine(line))
                .with_context(|| format!("line {} of <stdin>", line.number()))
        })
    }
}

impl Configurable for Arguments {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Value(ref mut v) => {
                let v = into_utf8(std::mem::take(v))?;
                self.positional.push(Argument::Positional(v));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A generic argument parsed from either positional args on the CLI, or
/// as a single line from stdin.
#[derive(Clone, Debug)]
pub enum Argument<'a> {
    Positional(String),
    StdinLine(Line<'a>),
}

impl<'a> Argument<'a> {
    /// Returns this argument as a string slice, without any line terminator.
    ///
    /// This fails only for a line from stdin that isn't valid UTF-8.
    pub fn to_str(&self) -> anyhow::Result<&str> {
        match *self {
            Argument::Positional(ref arg) => Ok(arg),
            Argument::StdinLine(line) => line.to_str(),
        }
    }
}

/// Converts a positional argument to a `String`.
///
/// Dates and rules are always ASCII, so there's no use in carrying around
/// anything that isn't UTF-8.
fn into_utf8(arg: std::ffi::OsString) -> anyhow::Result<String> {
    arg.into_string().map_err(|arg| {
        anyhow::anyhow!(
            "nextdate requires that positional arguments be valid UTF-8, \
             but `{arg:?}` is not valid UTF-8",
        )
    })
}
