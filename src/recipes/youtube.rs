use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Tutorial-video lookup. One call per dish; failures are isolated by the
/// caller.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Best single tutorial video for a dish, if any.
    async fn find_tutorial(&self, dish_name: &str) -> anyhow::Result<Option<String>>;
}

/// YouTube Data API v3 search client.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    async fn find_tutorial(&self, dish_name: &str) -> anyhow::Result<Option<String>> {
        let query = format!("{dish_name} recipe Indian cooking tutorial");
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("part", "id,snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("maxResults", "1"),
                ("order", "relevance"),
                ("videoCategoryId", "26"), // Howto & Style
                ("relevanceLanguage", "en"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let video_id = body["items"][0]["id"]["videoId"].as_str();
        debug!(dish = %dish_name, found = video_id.is_some(), "youtube search done");

        Ok(video_id.map(|id| format!("https://www.youtube.com/watch?v={id}")))
    }
}
