use crate::model::board::Label;
use crate::model::color::resolve_color;
use crate::trello::TrelloLabel;

/// Board labels in export order. Unnamed labels become "Label N", N being the
/// 1-based position in the export.
pub fn map_labels(labels: &[TrelloLabel]) -> Vec<Label> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| Label {
            source_id: label.id.clone(),
            name: if label.name.is_empty() {
                format!("Label {}", i + 1)
            } else {
                label.name.clone()
            },
            color: resolve_color(label.color.as_deref()).to_string(),
        })
        .collect()
}
