use serde::{Deserialize, Serialize};

use crate::Language;

/// A string with one value per supported language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Localized {
    pub en: String,
    pub es: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    pub slug: String,
    pub name: String,
    pub title: Localized,
    pub company: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendly: Option<String>,
}

impl Employee {
    /// Up to two uppercase initials, shown when no photo is available.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn vcard_file_name(&self) -> String {
        format!("{}.vcf", self.slug)
    }
}
