//! Parsing of the location/command line.

use crate::resolver::looks_like_location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    History,
    Bookmarks,
    Images,
    Reader,
    /// `imgN`: details for image N
    Image(usize),
    /// A bare number, resolved against the active numbered list
    Number(usize),
    Location(String),
    Search(String),
    Empty,
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Command::Empty;
        }

        match input {
            "help" | "?" => return Command::Help,
            "history" | "h" => return Command::History,
            "bookmarks" | "b" | "B" => return Command::Bookmarks,
            "images" | "i" => return Command::Images,
            "reader" | "r" | "R" => return Command::Reader,
            _ => {}
        }

        let lower = input.to_lowercase();
        if let Some(rest) = lower.strip_prefix("img") {
            if let Ok(number) = rest.trim().parse::<usize>() {
                return Command::Image(number);
            }
        }

        if let Ok(number) = input.parse::<usize>() {
            return Command::Number(number);
        }

        if looks_like_location(input) {
            Command::Location(input.to_string())
        } else {
            Command::Search(input.to_string())
        }
    }
}
