//! Bundled translations with dotted-key lookup and `{{name}}` interpolation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::warn;

use crate::error::{LocalizationError, PreferenceError};
use crate::preferences::{LANGUAGE_PREFERENCE_KEY, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .unwrap_or_default()
    }

    fn resource(&self) -> &'static str {
        match self {
            Language::En => include_str!("../../locales/en.json"),
            Language::Zh => include_str!("../../locales/zh.json"),
        }
    }
}

static RESOURCES: OnceCell<HashMap<Language, Value>> = OnceCell::new();

fn resources() -> Result<&'static HashMap<Language, Value>, LocalizationError> {
    RESOURCES.get_or_try_init(|| {
        let mut resources = HashMap::new();
        for language in Language::ALL {
            resources.insert(language, serde_json::from_str(language.resource())?);
        }
        Ok(resources)
    })
}

pub struct Translator {
    language: Language,
    resources: &'static HashMap<Language, Value>,
}

impl Translator {
    pub fn new(language: Language) -> Result<Self, LocalizationError> {
        let resources = resources()?;
        if !resources.contains_key(&Language::En) {
            return Err(LocalizationError::MissingLanguage(Language::En.code()));
        }

        Ok(Self {
            language,
            resources,
        })
    }

    /// Builds a translator for the saved language, English when none is saved.
    pub async fn load(store: &dyn PreferenceStore) -> Result<Self, LocalizationError> {
        let language = match store.get(LANGUAGE_PREFERENCE_KEY).await {
            Ok(Some(code)) => Language::from_code(&code),
            Ok(None) => Language::En,
            Err(e) => {
                warn!(error = %e, "Error fetching language");
                Language::En
            }
        };

        Self::new(language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn set_language(
        &mut self,
        store: &dyn PreferenceStore,
        language: Language,
    ) -> Result<(), PreferenceError> {
        store.set(LANGUAGE_PREFERENCE_KEY, language.code()).await?;
        self.language = language;
        Ok(())
    }

    /// The translation of `key`, falling back to English, then to the key itself.
    pub fn t(&self, key: &str) -> String {
        self.lookup(self.language, key)
            .or_else(|| self.lookup(Language::En, key))
            .unwrap_or(key)
            .to_string()
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), args)
    }

    /// "5 minutes ago", "3 hours ago", "1 day ago", "4 days ago".
    pub fn relative_time(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(then);
        let minutes = elapsed.num_minutes().max(0);

        let (key, value) = if minutes < 60 {
            ("time.minutesAgo", minutes)
        } else if elapsed.num_hours() < 24 {
            ("time.hoursAgo", elapsed.num_hours())
        } else if elapsed.num_days() == 1 {
            ("time.daysAgo", 1)
        } else {
            ("time.daysAgoPlural", elapsed.num_days())
        };

        self.t_with(key, &[("value", &value.to_string())])
    }

    /// Section heading for an activity group: today, yesterday or the full date.
    pub fn date_heading(&self, date: NaiveDate, today: NaiveDate) -> String {
        if date == today {
            self.t("time.today")
        } else if today.pred_opt() == Some(date) {
            self.t("time.yesterday")
        } else {
            date.format("%A, %B %-d, %Y").to_string()
        }
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&'static str> {
        let mut node = self.resources.get(&language)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }
}

/// Replaces `{{name}}` placeholders; unknown names are left untouched.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let name = rest[start + 2..start + 2 + len].trim();
        output.push_str(&rest[..start]);

        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..start + len + 4]),
        }
        rest = &rest[start + len + 4..];
    }

    output.push_str(rest);
    output
}
