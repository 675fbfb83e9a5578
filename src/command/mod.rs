/// Command tree: nodes, their flags, and the dispatcher that runs them.
///
/// A tree is plain owned data. The root owns its children; nothing is
/// registered globally. Build it with the `Command` builder methods and hand
/// it to [`Command::execute`], which parses argv with a clap command built
/// from the tree, prints help or errors, and invokes the matched action.
pub mod defaults;
pub mod errors;
pub mod execute;
pub mod flags;
pub mod help;
pub(crate) mod parser;
pub mod suggest;

use std::io::{self, Write};

use clap::ArgMatches;

pub use errors::{CommandError, FlagValueError};
pub use flags::{FlagSet, FlagSpec, FlagValue};

/// Whether a command or flag is still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Deprecation {
    #[default]
    Active,
    /// Still usable; the message is shown whenever it is used.
    Deprecated(String),
}

impl Deprecation {
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }
}

/// Constraint on the positional arguments left after flag parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgPolicy {
    #[default]
    Arbitrary,
    /// Any positional argument is reported as an unknown command.
    NoArgs,
}

/// What a runnable command does once dispatch reaches it.
pub type Action = fn(&mut Invocation<'_>) -> Result<(), CommandError>;

/// One node of the command tree.
#[derive(Debug, Clone, Default)]
pub struct Command {
    usage: String,
    short: String,
    long: String,
    deprecation: Deprecation,
    hidden: bool,
    args: ArgPolicy,
    flags: Vec<FlagSpec>,
    children: Vec<Command>,
    action: Option<Action>,
}

impl Command {
    /// `usage` is the one-line usage token; its first word is the name
    /// matched on the command line (`"help [command]"` is named `help`).
    #[must_use]
    pub fn new(usage: &str) -> Self {
        Self {
            usage: usage.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn short(mut self, text: &str) -> Self {
        self.short = text.to_owned();
        self
    }

    #[must_use]
    pub fn long(mut self, text: &str) -> Self {
        self.long = text.to_owned();
        self
    }

    #[must_use]
    pub fn deprecated(mut self, message: &str) -> Self {
        self.deprecation = Deprecation::Deprecated(message.to_owned());
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn args(mut self, policy: ArgPolicy) -> Self {
        self.args = policy;
        self
    }

    #[must_use]
    pub fn flag(mut self, spec: FlagSpec) -> Self {
        debug_assert!(
            self.flags.iter().all(|f| f.name() != spec.name()),
            "duplicate flag --{}",
            spec.name()
        );
        self.flags.push(spec);
        self
    }

    #[must_use]
    pub fn subcommand(mut self, child: Command) -> Self {
        self.add_subcommand(child);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub(crate) fn add_subcommand(&mut self, child: Command) {
        debug_assert!(
            self.child(child.name()).is_none(),
            "duplicate subcommand {}",
            child.name()
        );
        self.children.push(child);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.usage.split_whitespace().next().unwrap_or_default()
    }

    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    #[must_use]
    pub fn short_text(&self) -> &str {
        &self.short
    }

    #[must_use]
    pub fn long_text(&self) -> &str {
        &self.long
    }

    #[must_use]
    pub fn deprecation(&self) -> &Deprecation {
        &self.deprecation
    }

    #[must_use]
    pub fn arg_policy(&self) -> ArgPolicy {
        self.args
    }

    /// Flags as declared, without the implicit help flag.
    #[must_use]
    pub fn declared_flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Declared flags plus `-h, --help`.
    #[must_use]
    pub fn local_flags(&self) -> FlagSet {
        let mut specs = self.flags.clone();
        specs.push(FlagSpec::help_for(self.name()));
        FlagSet::new(specs)
    }

    #[must_use]
    pub fn children(&self) -> &[Command] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children.iter().find(|c| c.name() == name)
    }

    #[must_use]
    pub fn is_runnable(&self) -> bool {
        self.action.is_some()
    }

    /// Listed in help and offered as a suggestion.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.hidden && !self.deprecation.is_deprecated()
    }

    #[must_use]
    pub fn has_available_children(&self) -> bool {
        self.children.iter().any(Command::is_available)
    }

    /// Column width for child names in the `Available Commands:` block.
    /// Hidden and deprecated children still count.
    #[must_use]
    pub fn name_padding(&self) -> usize {
        const MIN_NAME_PADDING: usize = 11;
        self.children
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_PADDING)
    }
}

/// Space-separated names from the root to the last node of `path`.
#[must_use]
pub fn command_path(path: &[&Command]) -> String {
    path.iter().map(|c| c.name()).collect::<Vec<_>>().join(" ")
}

/// Everything an action sees: where it sits in the tree, its parsed flags
/// and positionals, and the two output streams.
pub struct Invocation<'a> {
    pub(crate) root: &'a Command,
    pub(crate) path: Vec<&'a Command>,
    pub(crate) matches: &'a ArgMatches,
    pub(crate) args: Vec<String>,
    pub(crate) out: &'a mut dyn Write,
    pub(crate) err: &'a mut dyn Write,
}

impl<'a> Invocation<'a> {
    #[must_use]
    pub fn root(&self) -> &'a Command {
        self.root
    }

    #[must_use]
    pub fn command(&self) -> &'a Command {
        self.path.last().copied().unwrap_or(self.root)
    }

    #[must_use]
    pub fn command_path(&self) -> String {
        command_path(&self.path)
    }

    /// Flag values of the invoked command, keyed by flag name. Flags not
    /// given hold their defaults.
    #[must_use]
    pub fn flags(&self) -> &'a ArgMatches {
        self.matches
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }

    /// Write `line` and a newline to the output stream.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write error.
    pub fn println(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }
}
