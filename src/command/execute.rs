/// Dispatch: parse argv with clap, walk the matches down the tree, run the
/// action.
use std::ffi::OsString;
use std::io::Write;

use clap::ArgMatches;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use tracing::{debug, trace};

use super::errors::{CommandError, FlagValueError};
use super::flags::HELP;
use super::parser::{self, ARGS, Build};
use super::{ArgPolicy, Command, Deprecation, Invocation, command_path, defaults, help, suggest};

impl Command {
    /// Run this tree as the root command against `args` (argv without the
    /// program name).
    ///
    /// Help and action output go to `out`; warnings, errors and error usage
    /// go to `err`. The implicit `help` and `completion` commands are
    /// installed first when the root has children.
    ///
    /// # Errors
    ///
    /// Returns the failure after it has already been reported on `err` as
    /// `Error: <message>` followed by usage or a `--help` hint.
    pub fn execute<I, T>(
        mut self,
        args: I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), CommandError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        defaults::install(&mut self);
        let argv: Vec<OsString> = std::iter::once(OsString::from(self.name()))
            .chain(args.into_iter().map(Into::into))
            .collect();
        let root = &self;

        let matches = match parser::build(root, Build::STRICT).try_get_matches_from(&argv) {
            Ok(matches) => matches,
            Err(parse_err) => {
                let path = locate(root, &argv);
                let (error, unresolved) = translate(&parse_err, &path, &argv);
                debug!(command = %command_path(&path), kind = error.kind(), "argv rejected");
                if unresolved {
                    report_unresolved(err, &error, &path);
                } else {
                    // The target was reached, so it still announces its deprecation.
                    if let Some(cmd) = path.last() {
                        let _ = warn_deprecated(cmd, err);
                    }
                    report_with_usage(err, &error, &path);
                }
                return Err(error);
            }
        };

        let (path, leaf) = walk(root, &matches);
        debug!(command = %command_path(&path), "resolved command");
        run(root, &path, leaf, out, err).inspect_err(|error| {
            debug!(command = %command_path(&path), kind = error.kind(), "command failed");
            report_with_usage(err, error, &path);
        })
    }
}

// Write failures while reporting are dropped; the caller still gets the
// dispatch error.

fn report_unresolved(err: &mut dyn Write, error: &CommandError, path: &[&Command]) {
    let _ = writeln!(err, "Error: {error}");
    let _ = writeln!(err, "Run '{} --help' for usage.", command_path(path));
}

fn report_with_usage(err: &mut dyn Write, error: &CommandError, path: &[&Command]) {
    let _ = writeln!(err, "Error: {error}");
    let _ = writeln!(err, "{}", help::usage(path));
}

/// Follow the subcommand chain of `matches` from `root`. Returns the path
/// and the matches of its last node.
fn walk<'a, 'm>(root: &'a Command, matches: &'m ArgMatches) -> (Vec<&'a Command>, &'m ArgMatches) {
    let mut path = vec![root];
    let mut node = root;
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        let Some(child) = node.child(name) else {
            break;
        };
        path.push(child);
        node = child;
        current = sub;
    }
    (path, current)
}

/// The deepest command `argv` reaches, found by a parse that keeps the
/// matches recorded before the first error.
fn locate<'a>(root: &'a Command, argv: &[OsString]) -> Vec<&'a Command> {
    match parser::build(root, Build::LENIENT).try_get_matches_from(argv) {
        Ok(matches) => walk(root, &matches).0,
        Err(_) => vec![root],
    }
}

fn context(parse_err: &clap::Error, kind: ContextKind) -> Option<&str> {
    match parse_err.get(kind) {
        Some(ContextValue::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Map a clap rejection onto a `CommandError`. The flag is set when a
/// token failed to name a child of a branching node.
fn translate(parse_err: &clap::Error, path: &[&Command], argv: &[OsString]) -> (CommandError, bool) {
    let node = path.last().copied();
    let branching = node.is_some_and(|n| !n.children().is_empty());
    let invalid_arg = context(parse_err, ContextKind::InvalidArg).unwrap_or_default();

    match parse_err.kind() {
        ErrorKind::InvalidSubcommand => {
            let token = context(parse_err, ContextKind::InvalidSubcommand).unwrap_or(invalid_arg);
            (unknown_child(path, token), true)
        }
        ErrorKind::UnknownArgument => {
            if let Some(name) = invalid_arg.strip_prefix("--") {
                let error = CommandError::UnknownFlag {
                    name: name.to_owned(),
                };
                (error, false)
            } else if let Some(c) = invalid_arg.strip_prefix('-').and_then(|s| s.chars().next()) {
                let error = CommandError::UnknownShorthand {
                    shorthand: c,
                    arg: shorthand_group(argv, c),
                };
                (error, false)
            } else if branching {
                (unknown_child(path, invalid_arg), true)
            } else {
                (CommandError::unknown_command(invalid_arg, &command_path(path)), false)
            }
        }
        ErrorKind::ValueValidation => {
            let source = std::error::Error::source(parse_err)
                .and_then(|e| e.downcast_ref::<FlagValueError>());
            match source {
                Some(invalid) => (invalid.clone().into(), false),
                None => (CommandError::Parse(clap_message(parse_err)), false),
            }
        }
        ErrorKind::InvalidValue if context(parse_err, ContextKind::InvalidValue) == Some("") => {
            let flag = invalid_arg.split([' ', '=']).next().unwrap_or(invalid_arg);
            let error = CommandError::MissingFlagValue {
                flag: flag.to_owned(),
            };
            (error, false)
        }
        ErrorKind::InvalidUtf8 => (CommandError::InvalidUtf8, false),
        _ => (CommandError::Parse(clap_message(parse_err)), false),
    }
}

fn unknown_child(path: &[&Command], token: &str) -> CommandError {
    CommandError::UnknownCommand {
        token: token.to_owned(),
        path: command_path(path),
        suggestions: path
            .last()
            .map(|node| suggest::render(node, token))
            .unwrap_or_default(),
    }
}

/// The shorthand group `c` was typed in, such as `-hz` for `z`.
fn shorthand_group(argv: &[OsString], c: char) -> String {
    argv.iter()
        .skip(1)
        .map(|a| a.to_string_lossy())
        .find(|a| a.starts_with('-') && !a.starts_with("--") && a[1..].contains(c))
        .map_or_else(|| format!("-{c}"), std::borrow::Cow::into_owned)
}

/// First line of clap's rendering, without its `error: ` label.
fn clap_message(parse_err: &clap::Error) -> String {
    let rendered = parse_err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_owned()
}

fn warn_deprecated(cmd: &Command, err: &mut dyn Write) -> std::io::Result<()> {
    if let Deprecation::Deprecated(message) = cmd.deprecation() {
        writeln!(err, "Command {:?} is deprecated, {message}", cmd.name())?;
    }
    Ok(())
}

fn run<'a>(
    root: &'a Command,
    path: &[&'a Command],
    matches: &'a ArgMatches,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
) -> Result<(), CommandError> {
    let Some(cmd) = path.last().copied() else {
        return Ok(());
    };

    warn_deprecated(cmd, err)?;
    for spec in cmd.declared_flags() {
        if matches.value_source(spec.name()) != Some(ValueSource::CommandLine) {
            continue;
        }
        trace!(flag = spec.name(), "flag set");
        if let Deprecation::Deprecated(message) = spec.deprecation() {
            writeln!(err, "Flag --{} has been deprecated, {message}", spec.name())?;
        }
    }

    let help_requested = matches
        .try_get_one::<bool>(HELP)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);
    let Some(action) = cmd.action.filter(|_| !help_requested) else {
        out.write_all(help::help(path).as_bytes())?;
        return Ok(());
    };

    let args: Vec<String> = matches
        .try_get_many::<String>(ARGS)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if cmd.arg_policy() == ArgPolicy::NoArgs
        && let Some(first) = args.first()
    {
        return Err(CommandError::unknown_command(first, &command_path(path)));
    }

    let mut invocation = Invocation {
        root,
        path: path.to_vec(),
        matches,
        args,
        out,
        err,
    };
    action(&mut invocation)
}
