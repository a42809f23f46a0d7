//! Trello export → Deck board mapping.
//!
//! Every function here is pure: the same export always yields the same
//! [`Board`]. Cross references (list id on cards, card id on checklists and
//! comments, label ids on cards) are resolved by plain id comparison and
//! anything that does not match is left out.

pub mod cards;
pub mod checklists;
pub mod comments;
pub mod labels;


use crate::error::ConvertError;
use crate::model::board::{Board, Label, Stack};
use crate::model::color::background_color;
use crate::trello::{TrelloAction, TrelloCard, TrelloChecklist, TrelloExport, TrelloList};

use cards::cards_for_stack;
use labels::map_labels;

pub fn to_board(export: &TrelloExport) -> Result<Board, ConvertError> {
    let labels = map_labels(&export.labels);
    let stacks = stacks_for_board(
        &export.lists,
        &export.cards,
        &export.checklists,
        &export.actions,
        &labels,
    )?;

    let board = Board {
        title: export.name.clone(),
        background_color: background_color(&export.prefs.background),
        labels,
        stacks,
    };
    tracing::debug!(
        title = %board.title,
        stacks = board.stacks.len(),
        labels = board.labels.len(),
        "converted board"
    );
    Ok(board)
}

/// Open lists as stacks, ordered by position.
pub fn stacks_for_board(
    lists: &[TrelloList],
    cards: &[TrelloCard],
    checklists: &[TrelloChecklist],
    actions: &[TrelloAction],
    board_labels: &[Label],
) -> Result<Vec<Stack>, ConvertError> {
    let mut stacks = lists
        .iter()
        .filter(|list| {
            if list.closed {
                tracing::debug!(list = %list.name, "skipping closed list");
            }
            !list.closed
        })
        .map(|list| -> Result<Stack, ConvertError> {
            Ok(Stack {
                name: list.name.clone(),
                order: list.pos,
                cards: cards_for_stack(cards, checklists, actions, board_labels, &list.id)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    stacks.sort_by(|a, b| a.order.total_cmp(&b.order));
    Ok(stacks)
}
