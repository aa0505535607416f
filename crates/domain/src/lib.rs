//! Domain model for the HereIAm portfolio backend.

#![forbid(unsafe_code)]

/// Contact form submissions and their validation rules.
pub mod contact;
/// The experience timeline entries.
pub mod experience;
/// Locale handling and the startup-loaded translation table.
pub mod i18n;
/// Spotify token grants, profiles, and playback snapshots.
pub mod spotify;
/// Employment tenure arithmetic for the experience timeline.
pub mod tenure;

pub use contact::ContactSubmission;
pub use experience::ExperienceEntry;
pub use i18n::{Locale, Translations};
pub use spotify::{
    NowPlaying, RecommendedTrack, SpotifyProfile, TokenGrant, AUTHORIZATION_SCOPES,
    REFRESH_TOKEN_MAX_AGE_SECONDS,
};
pub use tenure::Tenure;
