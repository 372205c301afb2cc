use crate::config::Config;
use crate::core::duration::parse_duration;
use crate::error::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// A video returned by the search step, before enrichment and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

/// Per-video statistics attached during enrichment, keyed by video id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoStats {
    pub view_count: u64,
    pub duration_secs: u64,
}

/// One search call. `published_after` is derived from an injected clock so
/// lookback windows stay deterministic in tests.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub keyword: String,
    pub published_after: DateTime<Utc>,
    pub max_results: u32,
}

impl SearchRequest {
    pub fn new(
        keyword: impl Into<String>,
        lookback_days: u32,
        max_results: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            published_after: now - Duration::days(i64::from(lookback_days)),
            max_results,
        }
    }

    pub fn published_after_param(&self) -> String {
        self.published_after
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Thin client over the three public YouTube Data API v3 endpoints.
/// Each method performs exactly one GET; non-2xx statuses surface as
/// `Error::Http` with no retry.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    config: Config,
}

impl YouTubeClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("trendscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Search for candidate videos. Zero hits is an empty Vec, not an error;
    /// the caller skips enrichment in that case.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<VideoCandidate>> {
        tracing::debug!(keyword = %request.keyword, "searching videos");

        let published_after = request.published_after_param();
        let max_results = request.max_results.to_string();
        let response: SearchResponse = self
            .http
            .get(&self.config.search_url)
            .query(&[
                ("part", "snippet"),
                ("q", request.keyword.as_str()),
                ("type", "video"),
                ("order", "viewCount"),
                ("publishedAfter", published_after.as_str()),
                ("maxResults", max_results.as_str()),
                ("videoDuration", "medium"),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(collect_candidates(response))
    }

    /// Fetch view counts and durations for the given video ids in one
    /// batched call. The id list is sent as-is (the search step never
    /// produces duplicates, so there is nothing to deduplicate here).
    pub async fn video_stats(&self, video_ids: &[&str]) -> Result<HashMap<String, VideoStats>> {
        tracing::debug!(count = video_ids.len(), "fetching video statistics");

        let ids = video_ids.join(",");
        let response: VideoListResponse = self
            .http
            .get(&self.config.videos_url)
            .query(&[
                ("part", "statistics,contentDetails"),
                ("id", ids.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        collect_video_stats(response)
    }

    /// Fetch subscriber counts for the given channel ids in one batched
    /// call. Ids are deduplicated (order-preserving) before the request.
    pub async fn channel_stats(&self, channel_ids: &[&str]) -> Result<HashMap<String, u64>> {
        let unique = dedup_ids(channel_ids);
        tracing::debug!(count = unique.len(), "fetching channel statistics");

        let ids = unique.join(",");
        let response: ChannelListResponse = self
            .http
            .get(&self.config.channels_url)
            .query(&[
                ("part", "statistics"),
                ("id", ids.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(collect_channel_stats(response))
    }
}

fn dedup_ids<'a>(ids: &[&'a str]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn collect_candidates(response: SearchResponse) -> Vec<VideoCandidate> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            Some(VideoCandidate {
                video_id: item.id.video_id?,
                channel_id: item.snippet.channel_id,
                title: item.snippet.title,
                published_at: item.snippet.published_at,
            })
        })
        .collect()
}

fn collect_video_stats(response: VideoListResponse) -> Result<HashMap<String, VideoStats>> {
    let mut map = HashMap::new();
    for item in response.items {
        // An entry without contentDetails.duration is silently dropped;
        // the join in the filter stage then excludes its candidate.
        let Some(duration) = item.content_details.and_then(|c| c.duration) else {
            continue;
        };
        let stats = VideoStats {
            view_count: parse_count(item.statistics.and_then(|s| s.view_count)),
            duration_secs: parse_duration(&duration)?,
        };
        map.insert(item.id, stats);
    }
    Ok(map)
}

fn collect_channel_stats(response: ChannelListResponse) -> HashMap<String, u64> {
    response
        .items
        .into_iter()
        .map(|item| {
            let subs = parse_count(item.statistics.and_then(|s| s.subscriber_count));
            (item.id, subs)
        })
        .collect()
}

/// The API reports counts as JSON strings; missing or malformed values
/// default to 0 rather than failing the run.
fn parse_count(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    #[serde(rename = "channelId")]
    channel_id: String,
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    subscriber_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn search_request_computes_lookback_window() {
        let request = SearchRequest::new("history", 7, 15, now());
        assert_eq!(request.published_after_param(), "2024-06-08T12:00:00Z");
    }

    #[test]
    fn search_response_extracts_candidates_in_order() {
        let body = r#"{
            "items": [
                {
                    "id": {"videoId": "vid1"},
                    "snippet": {
                        "channelId": "ch1",
                        "title": "First",
                        "publishedAt": "2024-06-14T08:00:00Z"
                    }
                },
                {
                    "id": {"videoId": "vid2"},
                    "snippet": {
                        "channelId": "ch2",
                        "title": "Second",
                        "publishedAt": "2024-06-13T08:00:00Z"
                    }
                }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).expect("valid body");
        let candidates = collect_candidates(response);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].video_id, "vid1");
        assert_eq!(candidates[0].channel_id, "ch1");
        assert_eq!(candidates[1].title, "Second");
    }

    #[test]
    fn search_response_without_items_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").expect("valid body");
        assert!(collect_candidates(response).is_empty());
    }

    #[test]
    fn search_item_without_video_id_is_skipped() {
        let body = r#"{
            "items": [{
                "id": {},
                "snippet": {
                    "channelId": "ch1",
                    "title": "Playlist-ish",
                    "publishedAt": "2024-06-14T08:00:00Z"
                }
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).expect("valid body");
        assert!(collect_candidates(response).is_empty());
    }

    #[test]
    fn video_stats_drop_entries_without_duration() {
        let body = r#"{
            "items": [
                {
                    "id": "vid1",
                    "statistics": {"viewCount": "12000"},
                    "contentDetails": {"duration": "PT10M30S"}
                },
                {
                    "id": "vid2",
                    "statistics": {"viewCount": "999"},
                    "contentDetails": {}
                },
                {
                    "id": "vid3",
                    "statistics": {"viewCount": "5"}
                }
            ]
        }"#;
        let response: VideoListResponse = serde_json::from_str(body).expect("valid body");
        let map = collect_video_stats(response).expect("valid durations");

        assert_eq!(map.len(), 1);
        let stats = map.get("vid1").expect("present");
        assert_eq!(stats.view_count, 12000);
        assert_eq!(stats.duration_secs, 630);
    }

    #[test]
    fn video_stats_missing_view_count_defaults_to_zero() {
        let body = r#"{
            "items": [{
                "id": "vid1",
                "contentDetails": {"duration": "PT6M"}
            }]
        }"#;
        let response: VideoListResponse = serde_json::from_str(body).expect("valid body");
        let map = collect_video_stats(response).expect("valid durations");
        assert_eq!(map.get("vid1").expect("present").view_count, 0);
    }

    #[test]
    fn video_stats_garbage_duration_fails_loudly() {
        let body = r#"{
            "items": [{
                "id": "vid1",
                "contentDetails": {"duration": "PTxS"}
            }]
        }"#;
        let response: VideoListResponse = serde_json::from_str(body).expect("valid body");
        assert!(collect_video_stats(response).is_err());
    }

    #[test]
    fn channel_stats_default_to_zero_subscribers() {
        let body = r#"{
            "items": [
                {"id": "ch1", "statistics": {"subscriberCount": "2500"}},
                {"id": "ch2", "statistics": {}},
                {"id": "ch3"}
            ]
        }"#;
        let response: ChannelListResponse = serde_json::from_str(body).expect("valid body");
        let map = collect_channel_stats(response);

        assert_eq!(map.get("ch1"), Some(&2500));
        assert_eq!(map.get("ch2"), Some(&0));
        assert_eq!(map.get("ch3"), Some(&0));
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let ids = ["ch2", "ch1", "ch2", "ch3", "ch1"];
        assert_eq!(dedup_ids(&ids), vec!["ch2", "ch1", "ch3"]);
    }

    #[test]
    fn malformed_count_string_parses_as_zero() {
        assert_eq!(parse_count(Some("not-a-number".to_string())), 0);
        assert_eq!(parse_count(Some("-5".to_string())), 0);
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("42".to_string())), 42);
    }
}
