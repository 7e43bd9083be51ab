use std::path::PathBuf;

use anyhow::{Context, Result};
use card::{BuildOptions, Theme};
use entity::Directory;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// Profile shown on `/`; without it `/` renders the not-found view.
    pub default_slug: Option<String>,
    pub directory_file: Option<PathBuf>,
    pub offer_phone_call: bool,
    pub brand_name: Option<String>,
    /// `Some("")` disables the logo, `None` keeps the theme default.
    pub brand_logo_url: Option<String>,
    pub default_photo_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub analytics_endpoint: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let offer_phone_call = lookup("OFFER_PHONE_CALL")
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Self {
            default_slug: non_empty("DEFAULT_SLUG"),
            directory_file: non_empty("DIRECTORY_FILE").map(PathBuf::from),
            offer_phone_call,
            brand_name: non_empty("BRAND_NAME"),
            brand_logo_url: lookup("BRAND_LOGO_URL").map(|val| val.trim().to_string()),
            default_photo_url: non_empty("DEFAULT_PHOTO_URL"),
            cors_allowed_origins,
            analytics_endpoint: non_empty("ANALYTICS_ENDPOINT"),
        }
    }

    /// The configured directory file, or the built-in table.
    pub fn directory(&self) -> Result<Directory> {
        match &self.directory_file {
            Some(path) => Directory::load(path)
                .with_context(|| format!("failed to load directory {}", path.display())),
            None => Ok(Directory::builtin().clone()),
        }
    }

    pub fn theme(&self) -> Theme {
        let mut theme = Theme::default();
        if let Some(name) = &self.brand_name {
            theme.brand_name = name.clone();
        }
        if let Some(logo) = &self.brand_logo_url {
            theme.logo_url = (!logo.is_empty()).then(|| logo.clone());
        }
        if let Some(photo) = &self.default_photo_url {
            theme.default_photo = Some(photo.clone());
        }
        theme
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            offer_phone_call: self.offer_phone_call,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_builtin_defaults() {
        let config = config_from(&[]);
        assert!(config.default_slug.is_none());
        assert!(!config.build_options().offer_phone_call);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.theme(), Theme::default());
        assert!(config.directory().unwrap().find("eugenio-andreone").is_some());
    }

    #[test]
    fn values_are_trimmed_and_split() {
        let config = config_from(&[
            ("DEFAULT_SLUG", " eugenio-andreone "),
            ("OFFER_PHONE_CALL", "Yes"),
            ("CORS_ALLOWED_ORIGINS", "https://a.test, ,https://b.test"),
            ("BRAND_NAME", "AcmeID"),
        ]);
        assert_eq!(config.default_slug.as_deref(), Some("eugenio-andreone"));
        assert!(config.build_options().offer_phone_call);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
        assert_eq!(config.theme().page_title("Ana"), "Ana - AcmeID");
    }

    #[test]
    fn blank_logo_disables_brand_icon() {
        let config = config_from(&[("BRAND_LOGO_URL", "")]);
        assert!(config.theme().logo_url.is_none());
    }

    #[test]
    fn default_photo_reaches_the_theme() {
        let config = config_from(&[("DEFAULT_PHOTO_URL", " https://cdn.test/p.png ")]);
        assert_eq!(
            config.theme().default_photo.as_deref(),
            Some("https://cdn.test/p.png")
        );
        assert!(config_from(&[]).theme().default_photo.is_none());
    }

    #[test]
    fn missing_directory_file_is_an_error() {
        let config = config_from(&[("DIRECTORY_FILE", "/nonexistent/employees.json")]);
        let err = config.directory().unwrap_err();
        assert!(err.to_string().contains("failed to load directory"));
    }
}
