//! Payload shapes of the catalog API.
//!
//! The catalog is loose about scalar types: `year` and `duration` arrive as
//! strings, numbers or null depending on the endpoint, so those fields go
//! through lenient deserializers.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "html_text")]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Artists {
    #[serde(default)]
    pub primary: Vec<ArtistRef>,
}

impl Artists {
    pub fn joined(&self, sep: &str) -> String {
        self.primary
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlbumRef {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "html_text")]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    #[serde(deserialize_with = "html_text")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub year: Option<String>,
    /// Length in seconds.
    #[serde(default, deserialize_with = "opt_seconds")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub artists: Artists,
    #[serde(default)]
    pub image: Vec<Variant>,
    #[serde(default)]
    pub download_url: Vec<Variant>,
}

impl Song {
    pub fn artist_names(&self) -> String {
        self.artists.joined(", ")
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(deserialize_with = "html_text")]
    pub name: String,
    #[serde(default, deserialize_with = "html_text")]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub year: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub language: Option<String>,
    #[serde(default)]
    pub artists: Artists,
    #[serde(default)]
    pub image: Vec<Variant>,
}

impl Album {
    pub fn artist_names(&self) -> String {
        self.artists.joined(", ")
    }

    pub fn image_url(&self, quality: &str) -> Option<&str> {
        variant_url(&self.image, quality)
    }
}

/// Album plus its track list, as returned by the album lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlbumDetails {
    #[serde(flatten)]
    pub album: Album,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl AlbumDetails {
    pub fn total_duration_secs(&self) -> u32 {
        self.songs.iter().map(Song::duration_secs).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: SearchData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchData<T> {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub start: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

pub trait Identified {
    fn ident(&self) -> &str;
}

impl Identified for Song {
    fn ident(&self) -> &str {
        &self.id
    }
}

impl Identified for Album {
    fn ident(&self) -> &str {
        &self.id
    }
}

/// Drops repeated ids, keeping the first occurrence.
pub fn unique_by_id<T: Identified>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.ident().to_string()))
        .collect()
}

fn variant_url<'a>(variants: &'a [Variant], quality: &str) -> Option<&'a str> {
    variants
        .iter()
        .find(|v| v.quality == quality)
        .or_else(|| variants.last())
        .map(|v| v.url.as_str())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

fn opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<StringOrNumber> = Option::deserialize(de)?;
    Ok(raw.and_then(|v| match v {
        StringOrNumber::Str(s) => Some(s).filter(|s| !s.trim().is_empty()),
        StringOrNumber::Num(n) => Some(n.to_string()),
    }))
}

fn opt_seconds<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<StringOrNumber> = Option::deserialize(de)?;
    let secs = raw.and_then(|v| match v {
        StringOrNumber::Str(s) => s.trim().parse::<f64>().ok(),
        StringOrNumber::Num(n) => n.as_f64(),
    });
    Ok(secs.filter(|s| s.is_finite() && *s >= 0.0).map(|s| s as u32))
}

fn html_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.map(|s| unescape_html(&s)).unwrap_or_default())
}

/// The catalog HTML-escapes names ("Rock &amp; Roll").
pub fn unescape_html(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
