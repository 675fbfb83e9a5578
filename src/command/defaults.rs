/// Commands every branching root gets for free: `help` and `completion`.
use clap_complete::Shell;
use tracing::debug;

use super::parser::{self, Build};
use super::{ArgPolicy, Command, CommandError, FlagSpec, Invocation, command_path, help, suggest};

/// Shells offered under `completion`, in listing order.
const SHELLS: [&str; 4] = ["bash", "fish", "powershell", "zsh"];

/// Add `completion` and `help` to `root` unless it has no children or
/// already defines them.
pub(crate) fn install(root: &mut Command) {
    if root.children().is_empty() {
        return;
    }
    if root.child("completion").is_none() {
        let completion = completion_command(root.name());
        root.add_subcommand(completion);
    }
    if root.child("help").is_none() {
        let help = help_command(root.name());
        root.add_subcommand(help);
    }
}

fn help_command(root_name: &str) -> Command {
    Command::new("help [command]")
        .short("Help about any command")
        .long(&format!(
            "Help provides help for any command in the application.\n\
             Simply type {root_name} help [path to command] for full details."
        ))
        .hidden(true)
        .action(run_help)
}

/// `help [command...]`: print help for the named node, or the root.
/// Words past a leaf are ignored; a word naming no child of a branching
/// node is an unknown command.
fn run_help(inv: &mut Invocation<'_>) -> Result<(), CommandError> {
    let mut path = vec![inv.root()];
    for word in inv.args() {
        let Some(node) = path.last().copied() else {
            break;
        };
        match node.child(word) {
            Some(child) => path.push(child),
            None if node.children().is_empty() => break,
            None => {
                return Err(CommandError::UnknownCommand {
                    token: word.clone(),
                    path: command_path(&path),
                    suggestions: suggest::render(node, word),
                });
            }
        }
    }
    inv.out().write_all(help::help(&path).as_bytes())?;
    Ok(())
}

fn completion_command(root_name: &str) -> Command {
    let mut completion = Command::new("completion")
        .short("Generate the autocompletion script for the specified shell")
        .long(&format!(
            "Generate the autocompletion script for {root_name} for the specified shell.\n\
             See each sub-command's help for details on how to use the generated script.\n"
        ))
        .args(ArgPolicy::NoArgs);
    for shell in SHELLS {
        completion.add_subcommand(shell_command(root_name, shell));
    }
    completion
}

fn shell_command(root_name: &str, shell: &str) -> Command {
    Command::new(shell)
        .short(&format!("Generate the autocompletion script for {shell}"))
        .long(&format!(
            "Generate the autocompletion script for the {shell} shell.\n\n\
             To load completions in your current shell session, capture the\n\
             output of '{root_name} completion {shell}' and source it.\n"
        ))
        .args(ArgPolicy::NoArgs)
        .flag(FlagSpec::bool(
            "no-descriptions",
            false,
            "disable completion descriptions",
        ))
        .action(run_completion)
}

/// Write the completion script for the shell this command is named after.
fn run_completion(inv: &mut Invocation<'_>) -> Result<(), CommandError> {
    let name = inv.command().name();
    let shell: Shell = name
        .parse()
        .map_err(|_| CommandError::UnsupportedShell(name.to_owned()))?;
    let descriptions = !inv.flags().get_flag("no-descriptions");

    let root = inv.root();
    let mut built = parser::build(
        root,
        Build {
            descriptions,
            ..Build::STRICT
        },
    );
    debug!(%shell, descriptions, "generating completion script");
    clap_complete::generate(shell, &mut built, root.name().to_owned(), inv.out());
    Ok(())
}
