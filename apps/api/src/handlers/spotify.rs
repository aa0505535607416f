//! Token broker endpoints.
//!
//! The browser holds the issued tokens in scoped cookies; the server keeps
//! nothing. Access and refresh tokens are HttpOnly, the user id cookie is
//! client-readable so the frontend can tell whether a session exists.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;
use hereiam_application::SpotifyAuthService;
use hereiam_core::AppError;
use hereiam_domain::REFRESH_TOKEN_MAX_AGE_SECONDS;
use serde::Deserialize;

use crate::dto::{NowPlayingResponse, RecommendationsResponse, RefreshRequest, RefreshResponse};
use crate::error::ApiResult;
use crate::state::{AppState, CookiePolicy};

pub const ACCESS_TOKEN_COOKIE: &str = "spotify_access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "spotify_refresh_token";
pub const USER_ID_COOKIE: &str = "spotify_user_id";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by the provider instead of `code` when the user denies access.
    pub error: Option<String>,
}

pub async fn login_handler(State(state): State<AppState>) -> ApiResult<Redirect> {
    let service = spotify_service(&state)?;
    let url = service.authorize_url()?;

    Ok(Redirect::temporary(url.as_str()))
}

pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Redirect)> {
    let service = spotify_service(&state)?;

    if let Some(denied) = query.error {
        return Err(AppError::MalformedRequest(format!(
            "authorization was not granted: {denied}"
        ))
        .into());
    }

    let code = query.code.as_deref().unwrap_or_default();
    let (grant, profile) = service.exchange_code(code).await?;

    let policy = state.cookie_policy;
    let mut jar = jar.add(scoped_cookie(
        ACCESS_TOKEN_COOKIE,
        grant.access_token,
        grant.expires_in,
        true,
        policy,
    ));
    if let Some(refresh_token) = grant.refresh_token {
        jar = jar.add(scoped_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            REFRESH_TOKEN_MAX_AGE_SECONDS,
            true,
            policy,
        ));
    }
    jar = jar.add(scoped_cookie(
        USER_ID_COOKIE,
        profile.id,
        REFRESH_TOKEN_MAX_AGE_SECONDS,
        false,
        policy,
    ));

    Ok((jar, Redirect::to("/")))
}

pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<(CookieJar, Json<RefreshResponse>)> {
    let service = spotify_service(&state)?;

    // The HttpOnly cookie is the normal source; the body field exists for
    // clients that hold the token themselves.
    let cookie_token = jar.get(REFRESH_TOKEN_COOKIE).map(|cookie| cookie.value().to_owned());
    let body_token = body.and_then(|Json(request)| request.refresh_token);
    let presented = cookie_token.or(body_token);

    let grant = service.refresh(presented.as_deref()).await?;

    let policy = state.cookie_policy;
    let mut jar = jar.add(scoped_cookie(
        ACCESS_TOKEN_COOKIE,
        grant.access_token.clone(),
        grant.expires_in,
        true,
        policy,
    ));
    if let Some(rotated) = grant.refresh_token {
        jar = jar.add(scoped_cookie(
            REFRESH_TOKEN_COOKIE,
            rotated,
            REFRESH_TOKEN_MAX_AGE_SECONDS,
            true,
            policy,
        ));
    }

    Ok((
        jar,
        Json(RefreshResponse {
            access_token: grant.access_token,
            expires_in: grant.expires_in,
        }),
    ))
}

pub async fn now_playing_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<NowPlayingResponse>> {
    let service = spotify_service(&state)?;

    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("no access token cookie".to_owned()))?;

    let playback = service.now_playing(access_token).await?;

    Ok(Json(NowPlayingResponse::from(playback)))
}

/// Fallback playlist tracks, shown by the widget when nothing is playing.
pub async fn recommendations_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<RecommendationsResponse>> {
    let service = spotify_service(&state)?;

    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("no access token cookie".to_owned()))?;

    let tracks = service.recommendations(access_token).await?;

    Ok(Json(RecommendationsResponse::from(tracks)))
}

fn spotify_service(state: &AppState) -> Result<&SpotifyAuthService, AppError> {
    state.spotify_service.as_ref().ok_or_else(|| {
        AppError::ConfigurationMissing("spotify credentials are not configured".to_owned())
    })
}

fn scoped_cookie(
    name: &'static str,
    value: String,
    max_age_seconds: u64,
    http_only: bool,
    policy: CookiePolicy,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(http_only);
    cookie.set_secure(policy.secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(
        i64::try_from(max_age_seconds).unwrap_or(i64::MAX),
    ));

    cookie
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::Json;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum_extra::extract::cookie::{Cookie, CookieJar};
    use cookie::time::Duration;
    use hereiam_application::{RateLimitService, SpotifyAuthClient, SpotifyAuthService};
    use hereiam_core::{AppError, AppResult};
    use hereiam_domain::{
        NowPlaying, RecommendedTrack, REFRESH_TOKEN_MAX_AGE_SECONDS, SpotifyProfile, TokenGrant,
        Translations,
    };
    use hereiam_infrastructure::InMemoryRateLimitRepository;

    use crate::dto::RefreshRequest;
    use crate::state::{AppState, CookiePolicy};

    use super::{
        ACCESS_TOKEN_COOKIE, CallbackQuery, REFRESH_TOKEN_COOKIE, USER_ID_COOKIE,
        callback_handler, now_playing_handler, recommendations_handler, refresh_handler,
    };

    #[derive(Default)]
    struct FakeClient {
        outbound_calls: AtomicUsize,
        rotate_refresh_token: bool,
        playing: bool,
    }

    #[async_trait]
    impl SpotifyAuthClient for FakeClient {
        async fn exchange_code(&self, code: &str) -> AppResult<TokenGrant> {
            self.outbound_calls.fetch_add(1, Ordering::SeqCst);
            if code == "bad-code" {
                return Err(AppError::AuthExchangeFailed { status: Some(400) });
            }
            Ok(TokenGrant {
                access_token: "access-1".to_owned(),
                refresh_token: Some("refresh-1".to_owned()),
                expires_in: 3600,
            })
        }

        async fn refresh_token(&self, _refresh_token: &str) -> AppResult<TokenGrant> {
            self.outbound_calls.fetch_add(1, Ordering::SeqCst);
            Ok(TokenGrant {
                access_token: "access-2".to_owned(),
                refresh_token: self.rotate_refresh_token.then(|| "refresh-2".to_owned()),
                expires_in: 1800,
            })
        }

        async fn fetch_profile(&self, _access_token: &str) -> AppResult<SpotifyProfile> {
            self.outbound_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SpotifyProfile {
                id: "listener-9".to_owned(),
                display_name: Some("Listener".to_owned()),
            })
        }

        async fn currently_playing(&self, _access_token: &str) -> AppResult<Option<NowPlaying>> {
            self.outbound_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.playing.then(|| NowPlaying {
                track_id: "track-7".to_owned(),
                title: "Song".to_owned(),
                artists: "Artist A, Artist B".to_owned(),
                album_art_url: Some("https://images.example/cover.jpg".to_owned()),
                duration_seconds: 240,
                progress_seconds: 30,
                is_playing: true,
                spotify_url: "https://open.spotify.com/track/track-7".to_owned(),
            }))
        }

        async fn playlist_tracks(
            &self,
            _access_token: &str,
            playlist_id: &str,
        ) -> AppResult<Vec<RecommendedTrack>> {
            self.outbound_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RecommendedTrack {
                track_id: format!("{playlist_id}-track-1"),
                title: "Fallback Song".to_owned(),
                artists: "Artist C".to_owned(),
                album_art_url: None,
                preview_url: Some("https://audio.example/preview.mp3".to_owned()),
                spotify_url: "https://open.spotify.com/track/fallback-1".to_owned(),
            }])
        }
    }

    fn state_with(client: Arc<FakeClient>) -> AppState {
        AppState {
            contact_service: None,
            rate_limit_service: RateLimitService::new(Arc::new(
                InMemoryRateLimitRepository::new(),
            )),
            spotify_service: Some(SpotifyAuthService::new(
                client,
                "client-abc",
                "https://example.com/spotify/callback",
            )),
            github_service: None,
            translations: Arc::new(Translations::built_in()),
            cookie_policy: CookiePolicy { secure: true },
            site_url: "https://example.com".to_owned(),
        }
    }

    fn state_with_playlist(client: Arc<FakeClient>) -> AppState {
        let mut state = state_with(client);
        state.spotify_service = state
            .spotify_service
            .map(|service| service.with_recommendations_playlist("playlist-42"));
        state
    }

    fn cookie<'a>(jar: &'a CookieJar, name: &str) -> &'a Cookie<'static> {
        match jar.get(name) {
            Some(cookie) => cookie,
            None => panic!("cookie '{name}' was not set"),
        }
    }

    #[tokio::test]
    async fn callback_sets_the_three_cookies_and_redirects_home() {
        let state = state_with(Arc::new(FakeClient::default()));
        let query = CallbackQuery {
            code: Some("good-code".to_owned()),
            error: None,
        };

        let (jar, _redirect) = match callback_handler(State(state), Query(query), CookieJar::new())
            .await
        {
            Ok(parts) => parts,
            Err(error) => panic!("callback failed: {:?}", error.0),
        };

        let access = cookie(&jar, ACCESS_TOKEN_COOKIE);
        assert_eq!(access.value(), "access-1");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age(), Some(Duration::seconds(3600)));

        let refresh = cookie(&jar, REFRESH_TOKEN_COOKIE);
        assert_eq!(refresh.value(), "refresh-1");
        assert_eq!(refresh.http_only(), Some(true));
        assert_eq!(
            refresh.max_age(),
            Some(Duration::seconds(
                i64::try_from(REFRESH_TOKEN_MAX_AGE_SECONDS).unwrap_or_default()
            ))
        );

        let user_id = cookie(&jar, USER_ID_COOKIE);
        assert_eq!(user_id.value(), "listener-9");
        assert_ne!(user_id.http_only(), Some(true));
    }

    #[tokio::test]
    async fn callback_without_code_is_malformed_and_writes_no_cookies() {
        let client = Arc::new(FakeClient::default());
        let state = state_with(client.clone());
        let query = CallbackQuery {
            code: None,
            error: None,
        };

        let outcome = callback_handler(State(state), Query(query), CookieJar::new()).await;
        match outcome {
            Err(error) => {
                assert!(matches!(error.0, AppError::MalformedRequest(_)));
                assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
            }
            Ok(_) => panic!("callback without code succeeded"),
        }
        assert_eq!(client.outbound_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denied_authorization_is_reported_without_an_exchange() {
        let client = Arc::new(FakeClient::default());
        let state = state_with(client.clone());
        let query = CallbackQuery {
            code: None,
            error: Some("access_denied".to_owned()),
        };

        let outcome = callback_handler(State(state), Query(query), CookieJar::new()).await;
        assert!(matches!(outcome, Err(error) if matches!(error.0, AppError::MalformedRequest(_))));
        assert_eq!(client.outbound_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_rejection_leaves_the_jar_untouched() {
        let state = state_with(Arc::new(FakeClient::default()));
        let query = CallbackQuery {
            code: Some("bad-code".to_owned()),
            error: None,
        };

        let outcome = callback_handler(State(state), Query(query), CookieJar::new()).await;
        match outcome {
            Err(error) => {
                assert!(matches!(
                    error.0,
                    AppError::AuthExchangeFailed { status: Some(400) }
                ));
            }
            Ok(_) => panic!("rejected exchange succeeded"),
        }
    }

    #[tokio::test]
    async fn refresh_without_any_token_fails_before_the_outbound_call() {
        let client = Arc::new(FakeClient::default());
        let state = state_with(client.clone());

        let outcome = refresh_handler(State(state), CookieJar::new(), None).await;
        match outcome {
            Err(error) => {
                assert!(matches!(error.0, AppError::MissingRefreshToken));
                assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
            }
            Ok(_) => panic!("refresh without token succeeded"),
        }
        assert_eq!(client.outbound_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_from_the_cookie_rewrites_the_access_cookie() {
        let state = state_with(Arc::new(FakeClient::default()));
        let jar = CookieJar::new().add(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh-1"));

        let (jar, Json(body)) = match refresh_handler(State(state), jar, None).await {
            Ok(parts) => parts,
            Err(error) => panic!("refresh failed: {:?}", error.0),
        };

        assert_eq!(body.access_token, "access-2");
        assert_eq!(body.expires_in, 1800);

        let access = cookie(&jar, ACCESS_TOKEN_COOKIE);
        assert_eq!(access.value(), "access-2");
        assert_eq!(access.max_age(), Some(Duration::seconds(1800)));

        // The provider kept the old refresh token, so the cookie is unchanged.
        assert_eq!(cookie(&jar, REFRESH_TOKEN_COOKIE).value(), "refresh-1");
    }

    #[tokio::test]
    async fn refresh_rotates_the_refresh_cookie_when_the_provider_issues_one() {
        let state = state_with(Arc::new(FakeClient {
            rotate_refresh_token: true,
            ..FakeClient::default()
        }));
        let body = RefreshRequest {
            refresh_token: Some("refresh-1".to_owned()),
        };

        let (jar, _body) =
            match refresh_handler(State(state), CookieJar::new(), Some(Json(body))).await {
                Ok(parts) => parts,
                Err(error) => panic!("refresh failed: {:?}", error.0),
            };

        assert_eq!(cookie(&jar, REFRESH_TOKEN_COOKIE).value(), "refresh-2");
    }

    #[tokio::test]
    async fn now_playing_requires_the_access_cookie() {
        let state = state_with(Arc::new(FakeClient::default()));

        let outcome = now_playing_handler(State(state), CookieJar::new()).await;
        match outcome {
            Err(error) => {
                assert!(matches!(error.0, AppError::Unauthorized(_)));
                assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
            }
            Ok(_) => panic!("now-playing without cookie succeeded"),
        }
    }

    #[tokio::test]
    async fn idle_playback_answers_playing_false() {
        let state = state_with(Arc::new(FakeClient::default()));
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "access-1"));

        let Json(body) = match now_playing_handler(State(state), jar).await {
            Ok(body) => body,
            Err(error) => panic!("now-playing failed: {:?}", error.0),
        };

        assert!(!body.playing);
        assert!(body.track.is_none());
    }

    #[tokio::test]
    async fn recommendations_require_the_access_cookie() {
        let client = Arc::new(FakeClient::default());
        let state = state_with_playlist(client.clone());

        let outcome = recommendations_handler(State(state), CookieJar::new()).await;
        match outcome {
            Err(error) => {
                assert!(matches!(error.0, AppError::Unauthorized(_)));
                assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
            }
            Ok(_) => panic!("recommendations without cookie succeeded"),
        }
        assert_eq!(client.outbound_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recommendations_list_the_fallback_playlist() {
        let state = state_with_playlist(Arc::new(FakeClient::default()));
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "access-1"));

        let Json(body) = match recommendations_handler(State(state), jar).await {
            Ok(body) => body,
            Err(error) => panic!("recommendations failed: {:?}", error.0),
        };

        assert_eq!(body.tracks.len(), 1);
        assert_eq!(body.tracks[0].id, "playlist-42-track-1");
        assert_eq!(body.tracks[0].artists, "Artist C");
        assert_eq!(
            body.tracks[0].preview_url.as_deref(),
            Some("https://audio.example/preview.mp3")
        );
    }

    #[tokio::test]
    async fn recommendations_without_a_playlist_answer_configuration_missing() {
        let state = state_with(Arc::new(FakeClient::default()));
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "access-1"));

        let outcome = recommendations_handler(State(state), jar).await;
        match outcome {
            Err(error) => {
                assert!(matches!(error.0, AppError::ConfigurationMissing(_)));
                assert_eq!(
                    error.into_response().status(),
                    StatusCode::INTERNAL_SERVER_ERROR
                );
            }
            Ok(_) => panic!("recommendations without a playlist succeeded"),
        }
    }

    #[tokio::test]
    async fn active_playback_reports_the_track() {
        let state = state_with(Arc::new(FakeClient {
            playing: true,
            ..FakeClient::default()
        }));
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "access-1"));

        let Json(body) = match now_playing_handler(State(state), jar).await {
            Ok(body) => body,
            Err(error) => panic!("now-playing failed: {:?}", error.0),
        };

        assert!(body.playing);
        let track = match body.track {
            Some(track) => track,
            None => panic!("active playback carried no track"),
        };
        assert_eq!(track.id, "track-7");
        assert_eq!(track.artists, "Artist A, Artist B");
        assert_eq!(track.duration_seconds, 240);
    }
}
