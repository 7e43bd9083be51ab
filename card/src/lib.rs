//! Card pipeline: route slug -> employee -> localized contact options -> view.
//!
//! Everything here is synchronous and side-effect free apart from the
//! [`analytics::AnalyticsSink`] calls made by the caller.

pub mod analytics;
pub mod i18n;
pub mod options;
pub mod render;
pub mod resolver;
pub mod state;
pub mod theme;
pub mod vcard;

pub use analytics::{ActionId, AnalyticsEvent, AnalyticsSink};
pub use i18n::{TextKey, translate};
pub use options::{BuildOptions, ContactAction, ContactOption, Icon, LinkHints, build};
pub use render::{ActionLink, CardView, NotFoundView, View, render};
pub use resolver::SlugResolver;
pub use state::LanguageState;
pub use theme::Theme;
