use entity::Language;

/// Language selection owned by a single card view.
///
/// Starts at [`Language::DEFAULT`] and only changes through [`toggle`](Self::toggle).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LanguageState {
    current: Language,
}

impl LanguageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the state carried by a view URL; unsupported codes reset to the default.
    pub fn from_query(code: Option<&str>) -> Self {
        Self {
            current: Language::from_code_or_default(code),
        }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// The language the toggle control switches to.
    pub fn toggled(&self) -> Language {
        self.current.toggle()
    }

    pub fn toggle(&mut self) -> Language {
        self.current = self.current.toggle();
        self.current
    }
}
