use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{DeckApi, NewCard};
use crate::config::DeckConfig;

/// HTTP client for the Nextcloud Deck REST API (v1.0).
pub struct DeckClient {
    base_url: String,
    username: String,
    auth_header: String,
    client: reqwest::Client,
}

impl DeckClient {
    pub fn new(config: &DeckConfig) -> Self {
        let creds = format!("{}:{}", config.username, config.password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/index.php/apps/deck/api/v1.0{path}", self.base_url)
    }

    fn ocs_url(&self, path: &str) -> String {
        format!("{}/ocs/v2.php/apps/deck/api/v1.0{path}", self.base_url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        tracing::debug!(%method, url, "Deck request");
        let resp = self
            .client
            .request(method, url)
            .header("Authorization", &self.auth_header)
            .header("OCS-APIRequest", "true")
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Deck request to {url} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Deck returned {status} for {url}: {text}");
        }
        Ok(resp)
    }

    async fn create<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<i64> {
        let created: Created = self
            .send(reqwest::Method::POST, url, body)
            .await?
            .json()
            .await
            .context("Failed to parse Deck response")?;
        Ok(created.id)
    }
}

#[derive(Deserialize)]
struct Created {
    id: i64,
}

#[derive(Serialize)]
struct TitleColor<'a> {
    title: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct TitleOrder<'a> {
    title: &'a str,
    order: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LabelRef {
    label_id: i64,
}

#[derive(Serialize)]
struct Comment<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ArchivedCard<'a> {
    #[serde(flatten)]
    card: &'a NewCard,
    owner: &'a str,
    archived: bool,
}

#[async_trait]
impl DeckApi for DeckClient {
    async fn create_board(&self, title: &str, color: &str) -> Result<i64> {
        self.create(&self.api_url("/boards"), &TitleColor { title, color })
            .await
    }

    async fn create_label(&self, board_id: i64, title: &str, color: &str) -> Result<i64> {
        self.create(
            &self.api_url(&format!("/boards/{board_id}/labels")),
            &TitleColor { title, color },
        )
        .await
    }

    async fn create_stack(&self, board_id: i64, title: &str, order: i64) -> Result<i64> {
        self.create(
            &self.api_url(&format!("/boards/{board_id}/stacks")),
            &TitleOrder { title, order },
        )
        .await
    }

    async fn create_card(&self, board_id: i64, stack_id: i64, card: &NewCard) -> Result<i64> {
        self.create(
            &self.api_url(&format!("/boards/{board_id}/stacks/{stack_id}/cards")),
            card,
        )
        .await
    }

    async fn assign_label(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        label_id: i64,
    ) -> Result<()> {
        let url = self.api_url(&format!(
            "/boards/{board_id}/stacks/{stack_id}/cards/{card_id}/assignLabel"
        ));
        self.send(reqwest::Method::PUT, &url, &LabelRef { label_id })
            .await?;
        Ok(())
    }

    async fn add_comment(&self, card_id: i64, message: &str) -> Result<()> {
        let url = self.ocs_url(&format!("/cards/{card_id}/comments"));
        self.send(reqwest::Method::POST, &url, &Comment { message })
            .await?;
        Ok(())
    }

    async fn archive_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        card: &NewCard,
    ) -> Result<()> {
        let url = self.api_url(&format!("/boards/{board_id}/stacks/{stack_id}/cards/{card_id}"));
        let body = ArchivedCard {
            card,
            owner: &self.username,
            archived: true,
        };
        self.send(reqwest::Method::PUT, &url, &body).await?;
        Ok(())
    }
}
