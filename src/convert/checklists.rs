use crate::model::board::{Checklist, ChecklistItem};
use crate::trello::{CheckItem, TrelloChecklist};

/// Checklists attached to `card_id`, ordered by position with their items
/// ordered the same way.
pub fn checklists_for_card(checklists: &[TrelloChecklist], card_id: &str) -> Vec<Checklist> {
    let mut result: Vec<Checklist> = checklists
        .iter()
        .filter(|checklist| checklist.id_card == card_id)
        .map(|checklist| {
            let mut items: Vec<ChecklistItem> =
                checklist.check_items.iter().map(map_item).collect();
            items.sort_by(|a, b| a.order.total_cmp(&b.order));
            Checklist {
                name: checklist.name.clone(),
                items,
                order: checklist.pos,
            }
        })
        .collect();
    result.sort_by(|a, b| a.order.total_cmp(&b.order));
    result
}

fn map_item(item: &CheckItem) -> ChecklistItem {
    ChecklistItem {
        name: item.name.clone(),
        // Matches on the item name, not `state`. Kept as-is until the
        // intended behaviour is confirmed.
        completed: item.name == "completed",
        order: item.pos,
    }
}
