pub mod client;
pub mod markdown;

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::model::board::{Board, Card};
use crate::model::color::Color;

/// Longest card title the Deck database column accepts.
const MAX_TITLE_CHARS: usize = 255;

/// Stack and label title columns.
const MAX_SHORT_TITLE_CHARS: usize = 100;

/// Deck's comment service rejects longer messages.
const MAX_COMMENT_CHARS: usize = 1000;

/// Labels Deck creates on every new board. Titles must be unique per board.
const DECK_DEFAULT_LABELS: [&str; 4] = ["Finished", "To review", "Action needed", "Later"];

/// Card fields sent on create and on the archiving update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub order: i64,
    pub description: String,
    #[serde(rename = "duedate")]
    pub due_date: Option<DateTime<FixedOffset>>,
}

impl NewCard {
    pub fn from_card(card: &Card, order: i64) -> Self {
        Self {
            title: truncate_chars(&card.name, MAX_TITLE_CHARS),
            kind: "plain",
            order,
            description: markdown::render_description(card),
            due_date: card.due_date,
        }
    }
}

/// The subset of the Nextcloud Deck API needed to recreate a board.
/// Every create call returns the id Deck assigned.
#[async_trait]
pub trait DeckApi: Send + Sync {
    async fn create_board(&self, title: &str, color: &str) -> Result<i64>;
    async fn create_label(&self, board_id: i64, title: &str, color: &str) -> Result<i64>;
    async fn create_stack(&self, board_id: i64, title: &str, order: i64) -> Result<i64>;
    async fn create_card(&self, board_id: i64, stack_id: i64, card: &NewCard) -> Result<i64>;
    async fn assign_label(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        label_id: i64,
    ) -> Result<()>;
    async fn add_comment(&self, card_id: i64, message: &str) -> Result<()>;
    async fn archive_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        card: &NewCard,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub board_id: i64,
    pub labels: usize,
    pub stacks: usize,
    pub cards: usize,
    pub comments: usize,
}

/// Deck stores colors as hex; the "green" background fallback is a name.
fn deck_color(color: &str) -> &str {
    Color::from_name(color).map(|c| c.hex()).unwrap_or(color)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Fits `name` into a label title not yet in `taken`, adding " (2)", " (3)"
/// and so on. Comparison ignores case.
fn unique_label_title(name: &str, taken: &mut HashSet<String>) -> String {
    let base = truncate_chars(name, MAX_SHORT_TITLE_CHARS);
    let mut title = base.clone();
    let mut n = 2;
    while taken.contains(&title.to_lowercase()) {
        let suffix = format!(" ({n})");
        let room = MAX_SHORT_TITLE_CHARS - suffix.chars().count();
        title = format!("{}{suffix}", truncate_chars(&base, room));
        n += 1;
    }
    taken.insert(title.to_lowercase());
    title
}

/// Splits a comment into messages Deck accepts, keeping all of the text.
fn comment_messages(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(MAX_COMMENT_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Recreates `board` through `api`, one request at a time so that Deck hands
/// out ids in board order. Stops at the first failed request.
pub async fn upload_board(api: &dyn DeckApi, board: &Board) -> Result<UploadSummary> {
    let board_id = api
        .create_board(&board.title, deck_color(&board.background_color))
        .await
        .with_context(|| format!("Failed to create board '{}'", board.title))?;
    tracing::info!(board_id, title = %board.title, "created Deck board");

    let mut summary = UploadSummary {
        board_id,
        ..UploadSummary::default()
    };

    let mut taken: HashSet<String> = DECK_DEFAULT_LABELS
        .iter()
        .map(|title| title.to_lowercase())
        .collect();
    let mut label_ids: HashMap<&str, i64> = HashMap::new();
    for label in &board.labels {
        let title = unique_label_title(&label.name, &mut taken);
        let id = api
            .create_label(board_id, &title, &label.color)
            .await
            .with_context(|| format!("Failed to create label '{title}'"))?;
        label_ids.insert(label.source_id.as_str(), id);
        summary.labels += 1;
    }

    for (stack_order, stack) in board.stacks.iter().enumerate() {
        let stack_id = api
            .create_stack(
                board_id,
                &truncate_chars(&stack.name, MAX_SHORT_TITLE_CHARS),
                stack_order as i64,
            )
            .await
            .with_context(|| format!("Failed to create stack '{}'", stack.name))?;
        tracing::debug!(stack_id, name = %stack.name, cards = stack.cards.len(), "created stack");
        summary.stacks += 1;

        for (card_order, card) in stack.cards.iter().enumerate() {
            let new_card = NewCard::from_card(card, card_order as i64);
            let card_id = api
                .create_card(board_id, stack_id, &new_card)
                .await
                .with_context(|| format!("Failed to create card '{}'", card.name))?;
            summary.cards += 1;

            for label in &card.labels {
                let Some(&label_id) = label_ids.get(label.source_id.as_str()) else {
                    tracing::warn!(label = %label.name, card = %card.name, "label was not uploaded");
                    continue;
                };
                api.assign_label(board_id, stack_id, card_id, label_id)
                    .await
                    .with_context(|| {
                        format!("Failed to assign label '{}' to '{}'", label.name, card.name)
                    })?;
            }

            // Trello lists comments newest first; Deck threads read oldest first.
            for comment in card.comments.iter().rev() {
                for message in comment_messages(comment) {
                    api.add_comment(card_id, &message)
                        .await
                        .with_context(|| format!("Failed to add comment to '{}'", card.name))?;
                }
                summary.comments += 1;
            }

            if card.archived {
                api.archive_card(board_id, stack_id, card_id, &new_card)
                    .await
                    .with_context(|| format!("Failed to archive card '{}'", card.name))?;
            }
        }
    }

    tracing::info!(
        board_id,
        stacks = summary.stacks,
        cards = summary.cards,
        comments = summary.comments,
        "upload finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests;
