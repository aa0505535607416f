use std::sync::Arc;

use hereiam_application::{ContactService, GithubStatsService, RateLimitService, SpotifyAuthService};
use hereiam_domain::Translations;

/// How response cookies are scoped. `secure` is off only in local
/// development; everything else about the cookies is fixed.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
}

/// Shared state for API handlers.
///
/// Optional services correspond to optional configuration groups; a `None`
/// surface answers with `ConfigurationMissing` instead of panicking or
/// silently succeeding.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Option<ContactService>,
    pub rate_limit_service: RateLimitService,
    pub spotify_service: Option<SpotifyAuthService>,
    pub github_service: Option<GithubStatsService>,
    pub translations: Arc<Translations>,
    pub cookie_policy: CookiePolicy,
    pub site_url: String,
}
