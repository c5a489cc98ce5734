use tracing::debug;

use super::{
    error::ApiResult,
    send_json,
    types::{unique_by_id, Album, AlbumDetails, DetailsResponse, SearchResponse, Song},
};
use crate::mood::Mood;

const SERVICE: &str = "catalog";

pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Clone)]
pub struct Catalog {
    http: reqwest::Client,
    base_url: String,
}

impl Catalog {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Catalog { http, base_url: base_url.into() }
    }

    pub async fn search_songs(&self, query: &str, limit: u32) -> ApiResult<Vec<Song>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let url = format!("{}/search/songs", self.base_url);
        let request = self
            .http
            .get(url)
            .query(&[("query", query), ("limit", &limit.to_string())]);
        let response: SearchResponse<Song> = send_json(SERVICE, request).await?;
        debug!(query, total = response.data.total, "song search");
        Ok(unique_by_id(response.data.results))
    }

    pub async fn search_albums(&self, query: &str, limit: u32) -> ApiResult<Vec<Album>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let url = format!("{}/search/albums", self.base_url);
        let request = self
            .http
            .get(url)
            .query(&[("query", query), ("limit", &limit.to_string())]);
        let response: SearchResponse<Album> = send_json(SERVICE, request).await?;
        debug!(query, total = response.data.total, "album search");
        Ok(unique_by_id(response.data.results))
    }

    pub async fn mood_songs(&self, mood: Mood, limit: u32) -> ApiResult<Vec<Song>> {
        self.search_songs(mood.song_query(), limit).await
    }

    pub async fn mood_albums(&self, mood: Mood, limit: u32) -> ApiResult<Vec<Album>> {
        self.search_albums(mood.album_query(), limit).await
    }

    pub async fn album_details(&self, album_id: &str) -> ApiResult<AlbumDetails> {
        let url = format!("{}/albums", self.base_url);
        let request = self.http.get(url).query(&[("id", album_id)]);
        let response: DetailsResponse<AlbumDetails> = send_json(SERVICE, request).await?;
        let mut details = response.data;
        details.songs = unique_by_id(details.songs);
        Ok(details)
    }
}
