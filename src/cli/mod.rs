pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "A terminal web browser that turns pages into numbered text", long_about = None)]
pub struct Cli {
    /// Extract pages in reader mode
    #[arg(short, long, global = true)]
    pub reader: bool,

    /// Maximum number of open tabs
    #[arg(long, global = true)]
    pub max_tabs: Option<usize>,

    /// Bookmarks file
    #[arg(long, global = true)]
    pub bookmarks: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Config file (default: ~/.config/skiff/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the browser (the default)
    Browse {
        /// Page to open in the first tab
        url: Option<String>,
    },
    /// Fetch a page and print its extracted text
    Dump {
        url: String,

        /// List the numbered links after the text
        #[arg(long)]
        links: bool,

        /// Print the whole document as JSON
        #[arg(long, conflicts_with = "links")]
        json: bool,
    },
    /// Search the web and print numbered results
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

impl Cli {
    /// Flags win over both the config file and the environment.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.reader {
            config.browser.reader_mode = true;
        }
        if let Some(max_tabs) = self.max_tabs {
            config.browser.max_tabs = max_tabs.max(1);
        }
        if let Some(path) = &self.bookmarks {
            config.browser.bookmarks_file = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["skiff"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["skiff", "dump", "example.com", "--links", "--reader"]).unwrap();
        assert!(cli.reader);
        assert!(matches!(
            cli.command,
            Some(Commands::Dump { ref url, links: true, json: false }) if url == "example.com"
        ));
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::try_parse_from(["skiff", "search", "rust", "async"]).unwrap();
        let Some(Commands::Search { query }) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(query, vec!["rust", "async"]);
        assert!(Cli::try_parse_from(["skiff", "search"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["skiff", "--reader", "--max-tabs", "0", "--bookmarks", "/tmp/b.json"])
            .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert!(config.browser.reader_mode);
        assert_eq!(config.browser.max_tabs, 1);
        assert_eq!(
            config.browser.bookmarks_file,
            Some(PathBuf::from("/tmp/b.json"))
        );
    }
}
