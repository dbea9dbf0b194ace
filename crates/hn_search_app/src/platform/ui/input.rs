use hn_search_core::{Msg, SortKey};

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  <text>            search for <text>
  /search [text]    search for <text>, or submit the current text
  /type <text>      change the search text without searching
  /more             load the next page
  /sort <column>    sort by none, title, author, comments or points
                    (the same column twice flips the order)
  /dismiss <id>     hide a result
  /help             show this help
  /quit             leave";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Dispatch(Vec::new());
    }

    let Some(rest) = line.strip_prefix('/') else {
        return search(line);
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "search" | "s" if arg.is_empty() => Command::Dispatch(vec![Msg::SearchSubmitted]),
        "search" | "s" => search(arg),
        "type" | "t" => Command::Dispatch(vec![Msg::SearchTextChanged(arg.to_string())]),
        "more" | "m" => Command::Dispatch(vec![Msg::MoreRequested]),
        "sort" => match arg.parse::<SortKey>() {
            Ok(key) => Command::Dispatch(vec![Msg::SortClicked(key)]),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "dismiss" | "d" if arg.is_empty() => {
            Command::Invalid("usage: /dismiss <id>".to_string())
        }
        "dismiss" | "d" => Command::Dispatch(vec![Msg::Dismissed(arg.to_string())]),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}' (try /help)")),
    }
}

fn search(text: &str) -> Command {
    Command::Dispatch(vec![
        Msg::SearchTextChanged(text.to_string()),
        Msg::SearchSubmitted,
    ])
}

#[cfg(test)]
mod tests {
    use hn_search_core::{Msg, SortKey};

    use super::{parse_command, Command};

    #[test]
    fn plain_text_searches() {
        assert_eq!(
            parse_command("  rust async \n"),
            Command::Dispatch(vec![
                Msg::SearchTextChanged("rust async".to_string()),
                Msg::SearchSubmitted,
            ])
        );
    }

    #[test]
    fn slash_commands_map_to_messages() {
        assert_eq!(
            parse_command("/more"),
            Command::Dispatch(vec![Msg::MoreRequested])
        );
        assert_eq!(
            parse_command("/sort Points"),
            Command::Dispatch(vec![Msg::SortClicked(SortKey::Points)])
        );
        assert_eq!(
            parse_command("/dismiss 8863"),
            Command::Dispatch(vec![Msg::Dismissed("8863".to_string())])
        );
        assert_eq!(
            parse_command("/type graphql"),
            Command::Dispatch(vec![Msg::SearchTextChanged("graphql".to_string())])
        );
        assert_eq!(
            parse_command("/search"),
            Command::Dispatch(vec![Msg::SearchSubmitted])
        );
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/help"), Command::Help);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(parse_command("/sort date"), Command::Invalid(_)));
        assert!(matches!(parse_command("/dismiss"), Command::Invalid(_)));
        assert!(matches!(parse_command("/frobnicate"), Command::Invalid(_)));
        assert_eq!(parse_command("   "), Command::Dispatch(Vec::new()));
    }
}
