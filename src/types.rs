//! Core data types shared across modules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two card collections is displayed and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Web,
    Folders,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Web => "web",
            Mode::Folders => "folders",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "web" => Ok(Mode::Web),
            "folders" => Ok(Mode::Folders),
            other => Err(anyhow::anyhow!("Unknown mode '{other}'")),
        }
    }
}

/// A single shortcut entry
///
/// `target` is a URL in web mode and an absolute folder path in folder mode.
/// It is persisted under the `url` key for compatibility with existing stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "url")]
    pub target: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "themeColor", default)]
    pub theme_color: Option<String>,
}

impl Card {
    /// Build a card from user input; `id` is assigned by the caller
    pub fn from_draft(id: String, draft: CardDraft) -> Self {
        Self {
            id,
            title: non_blank(draft.title),
            target: draft.target,
            image: non_blank(draft.image),
            theme_color: non_blank(draft.theme_color),
        }
    }

    /// Replace every field except `id`
    pub fn apply(&mut self, draft: CardDraft) {
        self.title = non_blank(draft.title);
        self.target = draft.target;
        self.image = non_blank(draft.image);
        self.theme_color = non_blank(draft.theme_color);
    }
}

/// Raw user input for creating or editing a card
///
/// Empty or whitespace-only optional fields mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub target: String,
    pub image: String,
    pub theme_color: String,
}

impl CardDraft {
    pub fn from_card(card: &Card) -> Self {
        Self {
            title: card.title.clone().unwrap_or_default(),
            target: card.target.clone(),
            image: card.image.clone().unwrap_or_default(),
            theme_color: card.theme_color.clone().unwrap_or_default(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
