use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::{upload_board, DeckApi, NewCard, UploadSummary};
use crate::model::board::{Board, Card, Label, Stack};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Board(String, String),
    Label(i64, String, String),
    Stack(i64, String, i64),
    Card(i64, i64, String, i64),
    AssignLabel(i64, i64, i64, i64),
    Comment(i64, String),
    Archive(i64, i64, i64),
}

/// Records every call and hands out increasing ids starting at 100.
struct MockDeck {
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Mutex<i64>,
    fail_on_card: Option<String>,
}

impl MockDeck {
    fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Mutex::new(100),
            fail_on_card: None,
        }
    }

    fn failing_on(mut self, card: &str) -> Self {
        self.fail_on_card = Some(card.to_string());
        self
    }

    fn record(&self, call: Call) -> i64 {
        self.calls.lock().unwrap().push(call);
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

#[async_trait]
impl DeckApi for MockDeck {
    async fn create_board(&self, title: &str, color: &str) -> Result<i64> {
        Ok(self.record(Call::Board(title.into(), color.into())))
    }

    async fn create_label(&self, board_id: i64, title: &str, color: &str) -> Result<i64> {
        Ok(self.record(Call::Label(board_id, title.into(), color.into())))
    }

    async fn create_stack(&self, board_id: i64, title: &str, order: i64) -> Result<i64> {
        Ok(self.record(Call::Stack(board_id, title.into(), order)))
    }

    async fn create_card(&self, board_id: i64, stack_id: i64, card: &NewCard) -> Result<i64> {
        if self.fail_on_card.as_deref() == Some(card.title.as_str()) {
            anyhow::bail!("Mock failure");
        }
        Ok(self.record(Call::Card(board_id, stack_id, card.title.clone(), card.order)))
    }

    async fn assign_label(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        label_id: i64,
    ) -> Result<()> {
        self.record(Call::AssignLabel(board_id, stack_id, card_id, label_id));
        Ok(())
    }

    async fn add_comment(&self, card_id: i64, message: &str) -> Result<()> {
        self.record(Call::Comment(card_id, message.into()));
        Ok(())
    }

    async fn archive_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        _card: &NewCard,
    ) -> Result<()> {
        self.record(Call::Archive(board_id, stack_id, card_id));
        Ok(())
    }
}

fn make_label(id: &str, name: &str) -> Label {
    Label {
        source_id: id.into(),
        name: name.into(),
        color: "FF0000".into(),
    }
}

fn make_card(name: &str, order: f64) -> Card {
    Card {
        name: name.into(),
        archived: false,
        due_date: None,
        description: String::new(),
        order,
        checklists: vec![],
        labels: vec![],
        source_url: String::new(),
        comments: vec![],
        attachments: vec![],
    }
}

fn make_board() -> Board {
    let bug = make_label("l1", "Bug");
    let idea = make_label("l2", "Idea");

    let mut first = make_card("First", 16384.0);
    first.labels = vec![idea.clone()];
    first.comments = vec!["one".into(), "two".into()];

    let mut old = make_card("Old", 32768.0);
    old.archived = true;

    Board {
        title: "Roadmap".into(),
        background_color: "green".into(),
        labels: vec![bug, idea],
        stacks: vec![
            Stack {
                name: "Todo".into(),
                order: 1024.5,
                cards: vec![first, old],
            },
            Stack {
                name: "Done".into(),
                order: 4096.0,
                cards: vec![],
            },
        ],
    }
}

#[tokio::test]
async fn upload_replays_board_in_order() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();

    let summary = upload_board(&deck, &make_board()).await.unwrap();

    // Comments arrive newest first and are posted oldest first.
    // ids: board 100, labels 101/102, stack 103, card 104, assign 105,
    // comments 106/107, card 108, archive 109, stack 110
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::Board("Roadmap".into(), "49b675".into()),
            Call::Label(100, "Bug".into(), "FF0000".into()),
            Call::Label(100, "Idea".into(), "FF0000".into()),
            Call::Stack(100, "Todo".into(), 0),
            Call::Card(100, 103, "First".into(), 0),
            Call::AssignLabel(100, 103, 104, 102),
            Call::Comment(104, "two".into()),
            Call::Comment(104, "one".into()),
            Call::Card(100, 103, "Old".into(), 1),
            Call::Archive(100, 103, 108),
            Call::Stack(100, "Done".into(), 1),
        ]
    );
    assert_eq!(
        summary,
        UploadSummary {
            board_id: 100,
            labels: 2,
            stacks: 2,
            cards: 2,
            comments: 2,
        }
    );
}

#[tokio::test]
async fn hex_background_is_sent_unchanged() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();
    let mut board = make_board();
    board.background_color = "0000FF".into();

    upload_board(&deck, &board).await.unwrap();

    assert_eq!(
        calls.lock().unwrap()[0],
        Call::Board("Roadmap".into(), "0000FF".into())
    );
}

#[tokio::test]
async fn unknown_card_label_is_skipped() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();
    let mut board = make_board();
    board.stacks[0].cards[0].labels = vec![make_label("missing", "Ghost")];

    upload_board(&deck, &board).await.unwrap();

    assert!(!calls
        .lock()
        .unwrap()
        .iter()
        .any(|call| matches!(call, Call::AssignLabel(..))));
}

#[tokio::test]
async fn upload_stops_at_first_failure() {
    let deck = MockDeck::new().failing_on("Old");
    let calls = deck.calls.clone();

    let err = upload_board(&deck, &make_board()).await.unwrap_err();

    assert!(err.to_string().contains("Failed to create card 'Old'"));
    assert!(!calls
        .lock()
        .unwrap()
        .iter()
        .any(|call| matches!(call, Call::Stack(_, name, _) if name == "Done")));
}

fn recorded<F: Fn(&Call) -> bool>(calls: &Arc<Mutex<Vec<Call>>>, keep: F) -> Vec<Call> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|call| keep(call))
        .cloned()
        .collect()
}

#[tokio::test]
async fn long_comment_is_split_into_deck_sized_messages() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();
    let mut board = make_board();
    let long = format!("{}{}", "a".repeat(1000), "b".repeat(200));
    board.stacks[0].cards[0].comments = vec![long];

    let summary = upload_board(&deck, &board).await.unwrap();

    let comments = recorded(&calls, |call| matches!(call, Call::Comment(..)));
    assert_eq!(
        comments,
        vec![
            Call::Comment(104, "a".repeat(1000)),
            Call::Comment(104, "b".repeat(200)),
        ]
    );
    assert_eq!(summary.comments, 1);
}

#[tokio::test]
async fn duplicate_label_titles_are_made_unique() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();
    let mut board = make_board();
    board.labels = vec![
        make_label("l1", "Bug"),
        make_label("l2", "bug"),
        make_label("l3", "Bug"),
        make_label("l4", "Later"),
    ];

    upload_board(&deck, &board).await.unwrap();

    let titles: Vec<String> = recorded(&calls, |call| matches!(call, Call::Label(..)))
        .into_iter()
        .filter_map(|call| match call {
            Call::Label(_, title, _) => Some(title),
            _ => None,
        })
        .collect();
    assert_eq!(titles, ["Bug", "bug (2)", "Bug (3)", "Later (2)"]);

    // The card's label still resolves to the Deck id of its own label.
    assert!(calls
        .lock()
        .unwrap()
        .contains(&Call::AssignLabel(100, 105, 106, 102)));
}

#[tokio::test]
async fn long_stack_and_label_titles_are_truncated() {
    let deck = MockDeck::new();
    let calls = deck.calls.clone();
    let mut board = make_board();
    board.stacks[0].name = "s".repeat(150);
    board.labels = vec![make_label("l1", &"x".repeat(150)), make_label("l2", &"x".repeat(120))];

    upload_board(&deck, &board).await.unwrap();

    let sent = calls.lock().unwrap().clone();
    assert_eq!(sent[1], Call::Label(100, "x".repeat(100), "FF0000".into()));
    assert_eq!(
        sent[2],
        Call::Label(100, format!("{} (2)", "x".repeat(96)), "FF0000".into())
    );
    assert_eq!(sent[3], Call::Stack(100, "s".repeat(100), 0));
}

#[test]
fn new_card_truncates_long_titles() {
    let card = make_card(&"x".repeat(300), 1.0);
    let new_card = NewCard::from_card(&card, 4);
    assert_eq!(new_card.title.chars().count(), 255);
    assert_eq!(new_card.order, 4);
    assert_eq!(new_card.kind, "plain");
}
