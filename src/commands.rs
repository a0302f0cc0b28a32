/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "open",
    aliases: &["o", "file", "upload"],
    description: "Load a JSON file: open <path>",
  },
  Command {
    name: "fetch",
    aliases: &["f", "url", "get"],
    description: "Fetch JSON from a URL: fetch <url>",
  },
  Command {
    name: "paste",
    aliases: &["p", "clipboard"],
    description: "Load JSON from the clipboard",
  },
  Command {
    name: "history",
    aliases: &["h", "recent"],
    description: "Show recent searches",
  },
  Command {
    name: "clear-history",
    aliases: &["ch", "clear"],
    description: "Delete all recent searches",
  },
  Command {
    name: "copy",
    aliases: &["c", "yank"],
    description: "Copy results to the clipboard",
  },
  Command {
    name: "download",
    aliases: &["d", "save", "export"],
    description: "Write results to search-results.json",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit jkf",
  },
];

/// A parsed command line: command word plus the rest as its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub name: String,
  pub arg: String,
}

/// Split input into the command word and its argument.
pub fn split_input(input: &str) -> (&str, &str) {
  let trimmed = input.trim_start();
  match trimmed.split_once(char::is_whitespace) {
    Some((word, rest)) => (word, rest.trim()),
    None => (trimmed.trim_end(), ""),
  }
}

/// Get autocomplete suggestions for a given input.
///
/// Only the command word is matched; anything after the first space is the
/// argument and is ignored here.
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let (word, _) = split_input(input);
  let input_lower = word.to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = Vec::new();

  for cmd in COMMANDS {
    // Exact match on name
    if cmd.name == input_lower {
      matches.push((cmd, 0)); // Highest priority
      continue;
    }

    // Exact match on alias
    if cmd.aliases.contains(&input_lower.as_str()) {
      matches.push((cmd, 1));
      continue;
    }

    // Prefix match on name
    if cmd.name.starts_with(&input_lower) {
      matches.push((cmd, 2));
      continue;
    }

    // Prefix match on alias
    if cmd.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      matches.push((cmd, 3));
      continue;
    }

    // Fuzzy match (contains)
    if cmd.name.contains(&input_lower) {
      matches.push((cmd, 4));
      continue;
    }

    // Fuzzy match on alias
    if cmd.aliases.iter().any(|a| a.contains(&input_lower)) {
      matches.push((cmd, 5));
    }
  }

  // Sort by priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Resolve input to an invocation, using the selected suggestion for the
/// command word when there is one.
pub fn resolve(input: &str, selected_suggestion: usize) -> Invocation {
  let (word, arg) = split_input(input);
  let suggestions = get_suggestions(input);
  let name = match suggestions.get(selected_suggestion) {
    Some(cmd) => cmd.name.to_string(),
    None => word.to_lowercase(),
  };
  Invocation {
    name,
    arg: arg.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    let suggestions = get_suggestions("");
    assert_eq!(suggestions.len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    let suggestions = get_suggestions("fetch");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "fetch");
  }

  #[test]
  fn test_alias_match() {
    let suggestions = get_suggestions("o");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "open");
  }

  #[test]
  fn test_prefix_match() {
    let suggestions = get_suggestions("hist");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "history");
  }

  #[test]
  fn test_fuzzy_match() {
    let suggestions = get_suggestions("load");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "download");
  }

  #[test]
  fn test_argument_ignored_for_suggestions() {
    let suggestions = get_suggestions("open /tmp/data.json");
    assert_eq!(suggestions[0].name, "open");
  }

  #[test]
  fn test_split_input() {
    assert_eq!(split_input("fetch  https://x.io/a.json "), ("fetch", "https://x.io/a.json"));
    assert_eq!(split_input("  quit "), ("quit", ""));
    assert_eq!(split_input(""), ("", ""));
  }

  #[test]
  fn test_resolve_keeps_argument() {
    let invocation = resolve("f https://example.com/data.json", 0);
    assert_eq!(
      invocation,
      Invocation {
        name: "fetch".to_string(),
        arg: "https://example.com/data.json".to_string(),
      }
    );
  }

  #[test]
  fn test_resolve_open_path_with_spaces() {
    let invocation = resolve("open /tmp/my data.json", 0);
    assert_eq!(invocation.name, "open");
    assert_eq!(invocation.arg, "/tmp/my data.json");
  }

  #[test]
  fn test_resolve_unknown_command() {
    let invocation = resolve("zzz", 0);
    assert_eq!(invocation.name, "zzz");
    assert!(invocation.arg.is_empty());
  }
}
