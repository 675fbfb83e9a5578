/// "Did you mean this?" hints for mistyped subcommands.
use super::Command;

/// Maximum edit distance for a child name to be suggested.
const SUGGESTION_DISTANCE: usize = 2;

/// Available children of `cmd` close to `typed`: within a small
/// case-insensitive edit distance, or starting with it.
#[must_use]
pub fn suggestions_for<'a>(cmd: &'a Command, typed: &str) -> Vec<&'a str> {
    let typed = typed.to_lowercase();
    let mut found: Vec<&str> = cmd
        .children()
        .iter()
        .filter(|c| c.is_available())
        .map(Command::name)
        .filter(|name| {
            let name = name.to_lowercase();
            strsim::levenshtein(&typed, &name) <= SUGGESTION_DISTANCE || name.starts_with(&typed)
        })
        .collect();
    found.sort_unstable();
    found
}

/// Suffix appended to an unknown-command message, or empty.
#[must_use]
pub fn render(cmd: &Command, typed: &str) -> String {
    let found = suggestions_for(cmd, typed);
    if found.is_empty() {
        return String::new();
    }
    let mut text = String::from("\n\nDid you mean this?\n");
    for name in found {
        text.push('\t');
        text.push_str(name);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Command {
        Command::new("demo")
            .subcommand(Command::new("hello"))
            .subcommand(Command::new("hullo").deprecated("use hello instead"))
            .subcommand(Command::new("completion"))
    }

    #[test]
    fn test_typo_suggests_close_name() {
        assert_eq!(suggestions_for(&root(), "helo"), vec!["hello"]);
        assert_eq!(suggestions_for(&root(), "HELLO"), vec!["hello"]);
    }

    #[test]
    fn test_prefix_suggests() {
        assert_eq!(suggestions_for(&root(), "comp"), vec!["completion"]);
    }

    #[test]
    fn test_deprecated_never_suggested() {
        assert_eq!(suggestions_for(&root(), "hullo"), vec!["hello"]);
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&root(), "nonexist"), "");
        assert_eq!(render(&root(), "helo"), "\n\nDid you mean this?\n\thello\n");
    }
}
