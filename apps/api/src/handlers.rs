pub mod contact;
pub mod experience;
pub mod github;
pub mod health;
pub mod i18n;
pub mod spotify;
