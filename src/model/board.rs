use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub title: String,
    /// Hex color from the color table, or the literal "green" fallback.
    pub background_color: String,
    pub labels: Vec<Label>,
    pub stacks: Vec<Stack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Trello label id, used to match `idLabels` on cards.
    pub source_id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub name: String,
    pub order: f64,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<FixedOffset>>,
    pub description: String,
    /// Position within the owning stack.
    pub order: f64,
    pub checklists: Vec<Checklist>,
    pub labels: Vec<Label>,
    pub source_url: String,
    pub comments: Vec<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checklist {
    pub name: String,
    pub items: Vec<ChecklistItem>,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub name: String,
    pub completed: bool,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}
