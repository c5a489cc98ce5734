use serde::Deserialize;
use tracing::{debug, warn};

use super::{error::ApiResult, send_json, types::Song};

const SERVICE: &str = "youtube";

/// YouTube's "Music" video category.
const MUSIC_CATEGORY_ID: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VideoSearch {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl VideoSearch {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        VideoSearch { http, base_url: base_url.into(), api_key }
    }

    /// Resolves a song to the id of its best matching music video.
    pub async fn find_video_id(&self, song: &Song) -> ApiResult<Option<String>> {
        let Some(key) = self.api_key.as_deref() else {
            warn!("YOUTUBE_API_KEY not set, cannot resolve a stream for {:?}", song.name);
            return Ok(None);
        };

        let query = video_query(song);
        let url = format!("{}/search", self.base_url);
        let request = self.http.get(url).query(&[
            ("part", "snippet"),
            ("maxResults", "1"),
            ("q", query.as_str()),
            ("type", "video"),
            ("videoCategoryId", MUSIC_CATEGORY_ID),
            ("key", key),
        ]);

        let response: SearchListResponse = send_json(SERVICE, request).await?;
        let video_id = first_video_id(response);
        debug!(query, ?video_id, "video lookup");
        Ok(video_id)
    }
}

/// "{title} {artist} {artist} official audio"
pub fn video_query(song: &Song) -> String {
    let artists = song.artists.joined(" ");
    if artists.is_empty() {
        format!("{} official audio", song.name)
    } else {
        format!("{} {} official audio", song.name, artists)
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

fn first_video_id(response: SearchListResponse) -> Option<String> {
    response
        .items
        .into_iter()
        .find_map(|item| item.id.video_id)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
pub(crate) fn parse_video_id(body: &str) -> ApiResult<Option<String>> {
    let response: SearchListResponse = serde_json::from_str(body)
        .map_err(|source| super::error::ApiError::Decode { service: SERVICE, source })?;
    Ok(first_video_id(response))
}
