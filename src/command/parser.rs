/// The clap command a tree is parsed with.
///
/// Help rendering stays with the tree (see `help.rs`), so clap's own help
/// flag and help subcommand are off; `-h, --help` is an ordinary boolean
/// flag the dispatcher checks after parsing.
use clap::{Arg, ArgAction};

use super::{Command, FlagSpec};

/// Id of the hidden positional that collects a leaf's arguments.
pub(crate) const ARGS: &str = "args";

/// How to build the clap command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Build {
    /// Keep the matches recorded before the first error instead of failing.
    pub(crate) lenient: bool,
    /// Attach about and help texts.
    pub(crate) descriptions: bool,
}

impl Build {
    pub(crate) const STRICT: Self = Self {
        lenient: false,
        descriptions: true,
    };

    pub(crate) const LENIENT: Self = Self {
        lenient: true,
        descriptions: true,
    };
}

/// Build the clap command for `cmd` and everything below it.
///
/// Leaves accept any number of positionals; the dispatcher enforces the
/// argument policy. Branching nodes accept none, so a stray token there is
/// an invalid subcommand.
#[must_use]
pub(crate) fn build(cmd: &Command, how: Build) -> clap::Command {
    let mut built = clap::Command::new(cmd.name().to_owned())
        .hide(!cmd.is_available())
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .args_override_self(true)
        .ignore_errors(how.lenient)
        .arg(FlagSpec::help_for(cmd.name()).to_arg(how.descriptions));
    if how.descriptions {
        built = built.about(cmd.short_text().to_owned());
    }

    for spec in cmd.declared_flags() {
        built = built.arg(spec.to_arg(how.descriptions));
    }

    if cmd.children().is_empty() {
        built = built.arg(
            Arg::new(ARGS)
                .num_args(1..)
                .action(ArgAction::Append)
                .hide(true),
        );
    }
    for child in cmd.children() {
        built = built.subcommand(build(child, how));
    }
    built
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Command {
        Command::new("x")
            .flag(FlagSpec::bool("old", false, "old").deprecated("no"))
            .subcommand(Command::new("gone").deprecated("no"))
            .subcommand(Command::new("kept").short("Still here"))
    }

    #[test]
    fn test_deprecated_items_are_hidden() {
        let built = build(&tree(), Build::STRICT);
        assert!(built.find_subcommand("gone").is_some_and(clap::Command::is_hide_set));
        assert!(
            built
                .get_arguments()
                .find(|a| a.get_id() == "old")
                .is_some_and(Arg::is_hide_set)
        );
        let kept = built.find_subcommand("kept").unwrap();
        assert!(!kept.is_hide_set());
        assert_eq!(kept.get_about().map(ToString::to_string).as_deref(), Some("Still here"));
    }

    #[test]
    fn test_only_leaves_take_positionals() {
        let built = build(&tree(), Build::STRICT);
        assert!(built.get_positionals().next().is_none());
        let kept = built.find_subcommand("kept").unwrap();
        let ids: Vec<&str> = kept.get_positionals().map(|a| a.get_id().as_str()).collect();
        assert_eq!(ids, vec![ARGS]);
    }

    #[test]
    fn test_lenient_build_keeps_the_failing_subcommand() {
        let matches = build(&tree(), Build::LENIENT)
            .try_get_matches_from(["x", "kept", "--bogus"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("kept"));

        let err = build(&tree(), Build::STRICT)
            .try_get_matches_from(["x", "kept", "--bogus"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
