use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A Trello board as produced by "Menu > Print and export > Export as JSON".
///
/// Only the fields the converter reads are modelled; everything else in the
/// export is ignored. Missing collections default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct TrelloExport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: Vec<TrelloLabel>,
    #[serde(default)]
    pub lists: Vec<TrelloList>,
    #[serde(default)]
    pub cards: Vec<TrelloCard>,
    #[serde(default)]
    pub checklists: Vec<TrelloChecklist>,
    #[serde(default)]
    pub actions: Vec<TrelloAction>,
    #[serde(default)]
    pub prefs: Prefs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloLabel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    pub id: String,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub desc: String,
    pub due: Option<String>,
    #[serde(default)]
    pub badges: Badges,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub id_labels: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<TrelloAttachment>,
}

impl TrelloCard {
    /// Raw due date string. The badge copy is what Trello keeps current, the
    /// card-level field is only a fallback for hand-trimmed exports.
    pub fn due_date(&self) -> Option<&str> {
        self.badges.due.as_deref().or(self.due.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Badges {
    pub due: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloAttachment {
    #[serde(default)]
    pub name: String,
    pub file_name: Option<String>,
    #[serde(default)]
    pub url: String,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub is_upload: bool,
}

impl TrelloAttachment {
    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloChecklist {
    #[serde(default)]
    pub id_card: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos: f64,
    /// "complete" or "incomplete". Not consulted by the converter.
    #[allow(dead_code)]
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloAction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: ActionData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionData {
    pub card: Option<ActionCard>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionCard {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub background: String,
}

pub fn load_export(path: &Path) -> Result<TrelloExport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Trello export from {}", path.display()))?;
    let export: TrelloExport = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse Trello export {}", path.display()))?;
    tracing::debug!(
        board = %export.name,
        lists = export.lists.len(),
        cards = export.cards.len(),
        "loaded Trello export"
    );
    Ok(export)
}
