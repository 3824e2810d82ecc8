//! Interactive prompt commands.

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text: search for a city
    Search(String),
    /// `/history`
    History,
    /// `/N`: re-query history entry N; stored 0-based
    Select(usize),
    /// `/clear`
    Clear,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Blank line
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let Some(name) = line.strip_prefix('/') else {
            return Self::Search(line.to_string());
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "history" | "h" => Self::History,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Self::Select(n - 1),
                _ => Self::Unknown(line.to_string()),
            },
        }
    }
}

pub const HELP: &str = "\
Type a city name to see its weather.
  /history   list saved searches
  /N         show weather for saved search N
  /clear     clear saved searches
  /help      show this help
  /quit      exit";
