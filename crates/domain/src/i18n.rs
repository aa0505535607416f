//! Locales and the message dictionary.
//!
//! The site is bilingual; every user-facing string is looked up by locale and
//! message id from a table built once at startup. There is no dynamic
//! behavior: the dictionaries are compiled in.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use hereiam_core::AppError;
use serde::{Deserialize, Serialize};

/// Supported site locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Lowercase language tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(AppError::MalformedRequest(format!(
                "unsupported locale '{other}'"
            ))),
        }
    }
}

/// Message table keyed by locale and message id.
#[derive(Debug, Clone)]
pub struct Translations {
    messages: HashMap<(Locale, &'static str), &'static str>,
}

impl Translations {
    /// Builds the compiled-in dictionary.
    #[must_use]
    pub fn built_in() -> Self {
        let mut messages = HashMap::new();

        for (id, en, es) in MESSAGES {
            messages.insert((Locale::En, *id), *en);
            messages.insert((Locale::Es, *id), *es);
        }

        Self { messages }
    }

    /// Looks up one message; `None` when the id is unknown.
    #[must_use]
    pub fn get(&self, locale: Locale, id: &str) -> Option<&'static str> {
        self.messages.get(&(locale, id)).copied()
    }

    /// All messages for one locale, for handing the whole dictionary to a
    /// client in a single response.
    #[must_use]
    pub fn for_locale(&self, locale: Locale) -> HashMap<&'static str, &'static str> {
        self.messages
            .iter()
            .filter_map(|((entry_locale, id), message)| {
                (*entry_locale == locale).then_some((*id, *message))
            })
            .collect()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::built_in()
    }
}

/// `(id, english, spanish)` triples, taken from the site components.
const MESSAGES: &[(&str, &str, &str)] = &[
    ("contact.title", "Get in Touch", "Ponte en Contacto"),
    (
        "contact.description",
        "Have a project in mind or want to chat? Feel free to reach out!",
        "¿Tienes un proyecto en mente o quieres charlar? ¡No dudes en contactarme!",
    ),
    ("contact.name_label", "Name", "Nombre"),
    ("contact.email_label", "Email", "Correo Electrónico"),
    ("contact.message_label", "Message", "Mensaje"),
    ("contact.submit", "Send Message", "Enviar Mensaje"),
    ("contact.submitting", "Sending...", "Enviando..."),
    (
        "contact.success",
        "Thanks for your message! I'll get back to you soon.",
        "¡Gracias por tu mensaje! Te responderé pronto.",
    ),
    (
        "contact.error",
        "There was an error sending your message. Please try again.",
        "Hubo un error al enviar tu mensaje. Por favor, inténtalo de nuevo.",
    ),
    ("contact.info", "Contact Information", "Información de Contacto"),
    ("contact.location", "Madrid, Spain", "Madrid, España"),
    ("contact.follow_me", "Follow Me", "Sígueme"),
    ("contact.send_another", "Send Another Message", "Enviar Otro Mensaje"),
    ("github.title", "GitHub Activity", "Actividad de GitHub"),
    ("github.repos", "Repositories", "Repositorios"),
    ("github.followers", "Followers", "Seguidores"),
    ("github.contributions", "Contributions", "Contribuciones"),
    ("github.stars", "Stars", "Estrellas"),
    ("github.view_profile", "View GitHub Profile", "Ver Perfil de GitHub"),
    (
        "github.loading",
        "Loading GitHub data...",
        "Cargando datos de GitHub...",
    ),
    (
        "github.error",
        "Failed to load GitHub data",
        "Error al cargar datos de GitHub",
    ),
    ("spotify.title", "Now Playing", "Escuchando Ahora"),
    ("spotify.not_playing", "Not playing", "Sin reproducir"),
    (
        "spotify.recommendations",
        "Recommended Tracks",
        "Canciones Recomendadas",
    ),
    ("spotify.play", "Play", "Reproducir"),
    ("spotify.pause", "Pause", "Pausar"),
    ("spotify.connect", "Connect Spotify", "Conectar Spotify"),
];
