/// Visual parameters for the single card renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Suffix of the page title, as in `Ana Pérez - SolwareID`.
    pub brand_name: String,
    /// Drawn in place of the website icon when set.
    pub logo_url: Option<String>,
    pub accent: String,
    pub accent_secondary: String,
    pub background: String,
    /// Shown for employees without their own photo; initials are used when unset.
    pub default_photo: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand_name: "SolwareID".into(),
            logo_url: Some(
                "https://lafysstpyiejevhrlmzc.supabase.co/storage/v1/object/public/imagenes/Logos/Svg/Logo_Blanco_Solware.svg"
                    .into(),
            ),
            accent: "#4f46e5".into(),
            accent_secondary: "#9333ea".into(),
            background: "#1e1b4b".into(),
            default_photo: None,
        }
    }
}

impl Theme {
    pub fn page_title(&self, name: &str) -> String {
        format!("{name} - {}", self.brand_name)
    }
}
