use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::checklists::checklists_for_card;
use super::comments::comments_for_card;
use crate::error::ConvertError;
use crate::model::board::{Attachment, Card, Label};
use crate::trello::{TrelloAction, TrelloCard, TrelloChecklist};

/// Cards of the list `stack_id`, ordered by position.
///
/// Checklists, comments and labels are looked up by card id in the
/// board-wide collections; rows pointing at other cards are ignored.
pub fn cards_for_stack(
    cards: &[TrelloCard],
    checklists: &[TrelloChecklist],
    actions: &[TrelloAction],
    board_labels: &[Label],
    stack_id: &str,
) -> Result<Vec<Card>, ConvertError> {
    let mut result = cards
        .iter()
        .filter(|card| card.id_list == stack_id)
        .map(|card| -> Result<Card, ConvertError> {
            Ok(Card {
                name: card.name.clone(),
                archived: card.closed,
                due_date: due_date(card)?,
                description: card.desc.clone(),
                order: card.pos,
                checklists: checklists_for_card(checklists, &card.id),
                labels: labels_for_card(board_labels, &card.id_labels),
                source_url: card.short_url.clone(),
                comments: comments_for_card(actions, &card.id),
                attachments: attachments_for_card(card),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    result.sort_by(|a, b| a.order.total_cmp(&b.order));
    Ok(result)
}

/// Uploaded files only; link attachments are dropped.
pub fn attachments_for_card(card: &TrelloCard) -> Vec<Attachment> {
    card.attachments
        .iter()
        .filter(|attachment| attachment.is_upload)
        .map(|attachment| Attachment {
            file_name: attachment.file_name().to_string(),
            url: attachment.url.clone(),
            mime_type: attachment.mime_type.clone().unwrap_or_default(),
        })
        .collect()
}

/// Board labels referenced by the card, in board order.
pub fn labels_for_card(board_labels: &[Label], label_ids: &[String]) -> Vec<Label> {
    board_labels
        .iter()
        .filter(|label| label_ids.contains(&label.source_id))
        .cloned()
        .collect()
}

fn due_date(card: &TrelloCard) -> Result<Option<DateTime<FixedOffset>>, ConvertError> {
    let Some(value) = card.due_date() else {
        return Ok(None);
    };
    parse_iso8601(value)
        .map(Some)
        .map_err(|source| ConvertError::MalformedTimestamp {
            card: card.name.clone(),
            value: value.to_string(),
            source,
        })
}

/// Local date-time layouts accepted once the offset has been split off.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Parses ISO 8601 timestamps in extended or basic format, with second or
/// minute precision, or a bare date. The offset may be `Z`, `+HH`, `+HHMM`
/// or `+HH:MM`; values without an offset are taken as UTC.
pub fn parse_iso8601(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let rfc3339_err = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };
    let Some((local, offset)) = split_offset(value) else {
        return Err(rfc3339_err);
    };
    let Some(naive) = parse_local(local) else {
        return Err(rfc3339_err);
    };
    match naive.and_local_timezone(offset).single() {
        Some(dt) => Ok(dt),
        None => Err(rfc3339_err),
    }
}

/// Splits a trailing UTC offset off `value`. Only the time part is searched,
/// so the dashes of an extended date are never mistaken for a sign.
fn split_offset(value: &str) -> Option<(&str, FixedOffset)> {
    let utc = FixedOffset::east_opt(0)?;
    if let Some(local) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        return Some((local, utc));
    }

    let time_start = value
        .find(|c: char| c == 'T' || c == ' ')
        .map_or(value.len(), |i| i + 1);
    let Some(sign_at) = value[time_start..]
        .rfind(|c: char| c == '+' || c == '-')
        .map(|i| time_start + i)
    else {
        return Some((value, utc));
    };

    let digits: String = value[sign_at + 1..].chars().filter(|c| *c != ':').collect();
    if !(digits.len() == 2 || digits.len() == 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().ok()?
    } else {
        0
    };
    let seconds = hours * 3600 + minutes * 60;
    let seconds = if value[sign_at..].starts_with('-') {
        -seconds
    } else {
        seconds
    };
    Some((&value[..sign_at], FixedOffset::east_opt(seconds)?))
}

fn parse_local(local: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(local, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
