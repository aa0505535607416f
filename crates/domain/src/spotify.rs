//! Spotify-facing domain types.
//!
//! These model what the broker keeps of the provider's responses. The raw
//! wire shapes live with the HTTP adapter; cookie storage lives with the API
//! layer. The browser, not the server, owns the issued tokens.

/// Scopes requested during authorization: read the currently playing track,
/// read playback state, read private playlists.
pub const AUTHORIZATION_SCOPES: [&str; 3] = [
    "user-read-currently-playing",
    "user-read-playback-state",
    "playlist-read-private",
];

/// Lifetime of the refresh-token and user-id cookies, in seconds (30 days).
pub const REFRESH_TOKEN_MAX_AGE_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Tokens issued by the provider for one grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Long-lived credential for obtaining new access tokens. Refresh
    /// responses may omit it, in which case the previous one stays valid.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds, as reported by the provider.
    pub expires_in: u64,
}

/// The authenticated user's provider profile, as much of it as we keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyProfile {
    /// Opaque provider user identifier.
    pub id: String,
    /// Display name, when the user has one set.
    pub display_name: Option<String>,
}

/// One track from the fallback playlist, shown as a recommendation when
/// nothing is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendedTrack {
    /// Track identifier.
    pub track_id: String,
    /// Track title.
    pub title: String,
    /// Artist names joined with `", "`.
    pub artists: String,
    /// First album image URL, when present.
    pub album_art_url: Option<String>,
    /// 30-second audio preview URL. The provider omits it for many tracks.
    pub preview_url: Option<String>,
    /// Link to the track on the provider.
    pub spotify_url: String,
}

/// Snapshot of the owner's current playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    /// Track identifier.
    pub track_id: String,
    /// Track title.
    pub title: String,
    /// Artist names joined with `", "`.
    pub artists: String,
    /// Largest album art URL, when present.
    pub album_art_url: Option<String>,
    /// Track length in whole seconds.
    pub duration_seconds: u64,
    /// Playback position in whole seconds.
    pub progress_seconds: u64,
    /// Whether playback is active rather than paused.
    pub is_playing: bool,
    /// Link to the track on the provider.
    pub spotify_url: String,
}
