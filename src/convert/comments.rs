use crate::trello::TrelloAction;

const COMMENT_ACTION: &str = "commentCard";

/// Comment bodies posted on `card_id`, in action-log order.
pub fn comments_for_card(actions: &[TrelloAction], card_id: &str) -> Vec<String> {
    actions
        .iter()
        .filter(|action| action.kind == COMMENT_ACTION)
        .filter(|action| {
            action
                .data
                .card
                .as_ref()
                .is_some_and(|card| card.id == card_id)
        })
        .filter_map(|action| action.data.text.clone())
        .collect()
}
