use crate::model::board::Card;

/// Deck has no checklist or external attachment fields, so those go into the
/// card description as Markdown, after the Trello description.
pub fn render_description(card: &Card) -> String {
    let mut sections: Vec<String> = Vec::new();

    let description = card.description.trim_end();
    if !description.is_empty() {
        sections.push(description.to_string());
    }

    for checklist in &card.checklists {
        let mut section = format!("## {}", checklist.name);
        for item in &checklist.items {
            let mark = if item.completed { 'x' } else { ' ' };
            section.push_str(&format!("\n- [{mark}] {}", item.name));
        }
        sections.push(section);
    }

    if !card.attachments.is_empty() {
        let mut section = String::from("## Attachments");
        for attachment in &card.attachments {
            section.push_str(&format!("\n- [{}]({})", attachment.file_name, attachment.url));
        }
        sections.push(section);
    }

    if !card.source_url.is_empty() {
        sections.push(format!("[Trello card]({})", card.source_url));
    }

    sections.join("\n\n")
}
