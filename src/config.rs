use crate::error::{Error, Result};
use std::env;

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const CHANNELS_URL: &str = "https://www.googleapis.com/youtube/v3/channels";

/// API credential and endpoint set handed to [`crate::core::YouTubeClient`].
/// Endpoints are part of the config so tests can point the client at a fake
/// server instead of Google.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub search_url: String,
    pub videos_url: String,
    pub channels_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)?;

        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_url: SEARCH_URL.to_string(),
            videos_url: VIDEOS_URL.to_string(),
            channels_url: CHANNELS_URL.to_string(),
        }
    }
}
