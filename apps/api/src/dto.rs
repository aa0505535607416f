use std::collections::HashMap;

use hereiam_application::GithubStats;
use hereiam_domain::{NowPlaying, RecommendedTrack};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ContactSuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Refresh request body. The field name follows the frontend's camelCase
/// convention; the HttpOnly refresh cookie is the usual source instead.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Serialize)]
pub struct TrackResponse {
    pub id: String,
    pub title: String,
    pub artists: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
    pub duration_seconds: u64,
    pub progress_seconds: u64,
    pub spotify_url: String,
}

#[derive(Serialize)]
pub struct NowPlayingResponse {
    pub playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<TrackResponse>,
}

impl From<Option<NowPlaying>> for NowPlayingResponse {
    fn from(playback: Option<NowPlaying>) -> Self {
        match playback {
            Some(playback) => Self {
                playing: playback.is_playing,
                track: Some(TrackResponse {
                    id: playback.track_id,
                    title: playback.title,
                    artists: playback.artists,
                    album_art_url: playback.album_art_url,
                    duration_seconds: playback.duration_seconds,
                    progress_seconds: playback.progress_seconds,
                    spotify_url: playback.spotify_url,
                }),
            },
            None => Self {
                playing: false,
                track: None,
            },
        }
    }
}

#[derive(Serialize)]
pub struct RecommendedTrackResponse {
    pub id: String,
    pub title: String,
    pub artists: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<RecommendedTrackResponse>,
}

impl From<Vec<RecommendedTrack>> for RecommendationsResponse {
    fn from(tracks: Vec<RecommendedTrack>) -> Self {
        Self {
            tracks: tracks
                .into_iter()
                .map(|track| RecommendedTrackResponse {
                    id: track.track_id,
                    title: track.title,
                    artists: track.artists,
                    album_art_url: track.album_art_url,
                    preview_url: track.preview_url,
                    spotify_url: track.spotify_url,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct GithubStatsResponse {
    pub repos: u64,
    pub followers: u64,
    pub stars: u64,
    pub contributions: u64,
}

impl From<GithubStats> for GithubStatsResponse {
    fn from(stats: GithubStats) -> Self {
        Self {
            repos: stats.repos,
            followers: stats.followers,
            stars: stats.stars,
            contributions: stats.contributions,
        }
    }
}

#[derive(Serialize)]
pub struct LocaleDictionaryResponse {
    pub locale: String,
    pub messages: HashMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct ExperienceEntryResponse {
    pub company: &'static str,
    pub role: &'static str,
    /// ISO date of the first day.
    pub start: String,
    /// ISO date of the last day; absent while the position is held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Elapsed tenure rendered in the requested locale.
    pub tenure: String,
}

#[derive(Serialize)]
pub struct ExperienceResponse {
    pub locale: String,
    pub entries: Vec<ExperienceEntryResponse>,
}
