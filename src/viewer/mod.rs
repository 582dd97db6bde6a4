//! External image viewer.

use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::{Result, SkiffError};

const KITTY_ICAT: &str = "kitty +kitten icat";
const SYSTEM_OPENER: &str = "system opener";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Commands tried in order; the image URL is appended as the last argument
    pub programs: Vec<String>,

    /// Try `kitty +kitten icat` first when running inside kitty
    pub kitty_inline: bool,

    /// Fall back to the desktop's default opener
    pub system_open: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            programs: vec![
                "imv".to_string(),
                "shotwell".to_string(),
                "feh".to_string(),
                "gpicview".to_string(),
            ],
            kitty_inline: true,
            system_open: true,
        }
    }
}

pub struct ImageViewer {
    commands: Vec<String>,
    system_open: bool,
}

impl ImageViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        let term = std::env::var("TERM").ok();
        Self::for_terminal(config, term.as_deref())
    }

    pub fn for_terminal(config: &ViewerConfig, term: Option<&str>) -> Self {
        let mut commands = Vec::new();
        if config.kitty_inline && term.is_some_and(|t| t.contains("kitty")) {
            commands.push(KITTY_ICAT.to_string());
        }
        commands.extend(
            config
                .programs
                .iter()
                .filter(|p| !p.trim().is_empty())
                .cloned(),
        );

        Self {
            commands,
            system_open: config.system_open,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Start the first viewer that launches. Returns the program used.
    pub fn open(&self, url: &str) -> Result<String> {
        for command in &self.commands {
            let mut parts = command.split_whitespace();
            let Some(program) = parts.next() else {
                continue;
            };

            let spawned = Command::new(program)
                .args(parts)
                .arg(url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            match spawned {
                Ok(child) => {
                    reap(child, command.clone());
                    info!("Opened {} with {}", url, command);
                    return Ok(command.clone());
                }
                Err(e) => debug!("Viewer {} unavailable: {}", command, e),
            }
        }

        if self.system_open {
            match open::that_detached(url) {
                Ok(()) => {
                    info!("Opened {} with the system opener", url);
                    return Ok(SYSTEM_OPENER.to_string());
                }
                Err(e) => warn!("System opener failed for {}: {}", url, e),
            }
        }

        Err(SkiffError::ExternalViewer(url.to_string()))
    }
}

/// Wait for a viewer on a background thread so it does not linger as a
/// zombie once it exits.
fn reap(mut child: Child, command: String) {
    std::thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Viewer {} exited with {}", command, status),
        Err(e) => warn!("Failed to wait for viewer {}: {}", command, e),
    });
}
