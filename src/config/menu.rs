use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use crate::tui::PromptConfig;

pub const DEFAULT_TITLE: &str = "Select an option using the arrow keys:";
pub const DEFAULT_HELP: &str = "Use arrow up and down, then enter to select.";

/// Menu definition as read from a TOML file or assembled from arguments.
///
/// ```toml
/// title = "Select a companion:"
/// help = "Use arrow up and down, then enter to select."
/// options = ["dog", "pony", "cat"]
/// visible = 2
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuFile {
    pub title: Option<String>,
    pub help: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub visible: Option<usize>,
}

impl MenuFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;

        let menu = Self::parse(&text)
            .with_context(|| format!("Unable to parse menu file {}", path.display()))?;

        info!(
            "loaded menu with {} options from {}",
            menu.options.len(),
            path.display()
        );
        Ok(menu)
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid menu definition")
    }

    /// Layers `overrides` on top of `self`. Options are replaced as a whole.
    #[must_use]
    pub fn merge(self, overrides: MenuFile) -> Self {
        Self {
            title: overrides.title.or(self.title),
            help: overrides.help.or(self.help),
            options: if overrides.options.is_empty() {
                self.options
            } else {
                overrides.options
            },
            visible: overrides.visible.or(self.visible),
        }
    }

    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Fills in defaults and produces the prompt configuration.
    pub fn into_prompt_config(self) -> Result<PromptConfig> {
        if self.options.is_empty() {
            bail!("No options to choose from");
        }

        Ok(PromptConfig::builder()
            .title(self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()))
            .options(self.options)
            .help(self.help.unwrap_or_else(|| DEFAULT_HELP.to_string()))
            .maybe_visible_rows(self.visible)
            .build())
    }
}
