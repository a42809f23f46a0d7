use thiserror::Error;

/// Failures that abort a conversion. Unmatched references between lists,
/// cards, checklists and actions are not errors; those rows are dropped.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Card '{card}' has a malformed due date '{value}': {source}")]
    MalformedTimestamp {
        card: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
