//! Spotify authorization flows: code exchange, refresh, playback lookup.
//!
//! The service owns the flow logic; where the resulting tokens live is the
//! API layer's concern (scoped cookies held by the browser). Every operation
//! is a single awaited outbound call with no retries.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use hereiam_core::{AppError, AppResult};
use hereiam_domain::{AUTHORIZATION_SCOPES, NowPlaying, RecommendedTrack, SpotifyProfile, TokenGrant};

const AUTHORIZE_ENDPOINT: &str = "https://accounts.spotify.com/authorize";

/// Port for the provider's token and resource endpoints.
#[async_trait]
pub trait SpotifyAuthClient: Send + Sync {
    /// Exchanges an authorization code for a token grant
    /// (`grant_type=authorization_code`).
    async fn exchange_code(&self, code: &str) -> AppResult<TokenGrant>;

    /// Obtains a fresh access token (`grant_type=refresh_token`). The
    /// provider may or may not rotate the refresh token.
    async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenGrant>;

    /// Fetches the authenticated user's profile with a bearer token.
    async fn fetch_profile(&self, access_token: &str) -> AppResult<SpotifyProfile>;

    /// Fetches the current playback snapshot; `None` when nothing plays.
    async fn currently_playing(&self, access_token: &str) -> AppResult<Option<NowPlaying>>;

    /// Lists the tracks of one playlist with a bearer token.
    async fn playlist_tracks(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> AppResult<Vec<RecommendedTrack>>;
}

/// Application service for the token broker.
#[derive(Clone)]
pub struct SpotifyAuthService {
    client: Arc<dyn SpotifyAuthClient>,
    client_id: String,
    redirect_uri: String,
    recommendations_playlist_id: Option<String>,
}

impl SpotifyAuthService {
    /// Creates the broker service.
    #[must_use]
    pub fn new(
        client: Arc<dyn SpotifyAuthClient>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            recommendations_playlist_id: None,
        }
    }

    /// Sets the playlist the recommendations surface reads from.
    #[must_use]
    pub fn with_recommendations_playlist(mut self, playlist_id: impl Into<String>) -> Self {
        self.recommendations_playlist_id = Some(playlist_id.into());
        self
    }

    /// Builds the provider authorization URL the visitor is redirected to.
    /// No local state changes.
    pub fn authorize_url(&self) -> AppResult<Url> {
        let mut url = Url::parse(AUTHORIZE_ENDPOINT)
            .map_err(|error| AppError::Internal(format!("invalid authorize endpoint: {error}")))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &AUTHORIZATION_SCOPES.join(" "));

        Ok(url)
    }

    /// Exchanges the callback code and resolves the user's identity.
    ///
    /// Both the grant and the profile are needed before any cookie is
    /// written, so a failed profile fetch fails the whole exchange.
    pub async fn exchange_code(&self, code: &str) -> AppResult<(TokenGrant, SpotifyProfile)> {
        if code.trim().is_empty() {
            return Err(AppError::MalformedRequest(
                "missing 'code' query parameter".to_owned(),
            ));
        }

        let grant = self.client.exchange_code(code).await?;
        let profile = self.client.fetch_profile(&grant.access_token).await?;

        Ok((grant, profile))
    }

    /// Refreshes an access token. Fails with `MissingRefreshToken` before
    /// any outbound call when no token is presented.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> AppResult<TokenGrant> {
        let token = refresh_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::MissingRefreshToken)?;

        self.client.refresh_token(token).await
    }

    /// Current playback for the given access token.
    pub async fn now_playing(&self, access_token: &str) -> AppResult<Option<NowPlaying>> {
        self.client.currently_playing(access_token).await
    }

    /// Tracks of the configured fallback playlist, shown when nothing is
    /// playing.
    pub async fn recommendations(&self, access_token: &str) -> AppResult<Vec<RecommendedTrack>> {
        let playlist_id = self.recommendations_playlist_id.as_deref().ok_or_else(|| {
            AppError::ConfigurationMissing(
                "recommendations playlist is not configured".to_owned(),
            )
        })?;

        self.client.playlist_tracks(access_token, playlist_id).await
    }
}
