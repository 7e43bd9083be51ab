//! Turns a resolved (or missing) employee into a displayable view.
//!
//! One renderer serves every card; visual differences come from [`Theme`].

use std::fmt::{self, Write as _};

use entity::{Employee, Language};
use serde::Serialize;

use crate::{
    analytics::ActionId,
    i18n::{TextKey, format_text, text},
    options::{BuildOptions, ContactOption, Icon, LinkHints, build},
    theme::Theme,
    vcard,
};

// Drops `?lang=` from the address bar so a reload starts over in the default language.
const CLICK_REPORTER: &str = r#"if (location.search) { history.replaceState(null, '', location.pathname); }
document.addEventListener('click', function (event) {
  var el = event.target.closest('[data-action]');
  if (!el || !navigator.sendBeacon) { return; }
  var body = JSON.stringify({
    action: el.dataset.action,
    subject: document.body.dataset.subject
  });
  try { navigator.sendBeacon('/events', new Blob([body], { type: 'application/json' })); } catch (_) {}
});"#;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub action: ActionId,
    pub href: String,
    pub label: &'static str,
    pub aria_label: String,
    pub hints: Option<LinkHints>,
    pub download: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub page_title: String,
    pub language: Language,
    pub toggle_to: Language,
    pub toggle_aria_label: &'static str,
    pub slug: String,
    pub name: String,
    pub initials: String,
    pub photo: Option<String>,
    pub title: String,
    pub company: String,
    pub options: Vec<ContactOption>,
    pub save_contact: ActionLink,
    pub schedule: Option<ActionLink>,
    #[serde(skip)]
    theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub language: Language,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Card(Box<CardView>),
    NotFound(NotFoundView),
}

impl View {
    pub fn is_found(&self) -> bool {
        matches!(self, View::Card(_))
    }

    pub fn page_title(&self) -> &str {
        match self {
            View::Card(card) => &card.page_title,
            View::NotFound(view) => view.title,
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

pub fn render(
    employee: Option<&Employee>,
    language: Language,
    theme: &Theme,
    options: &BuildOptions,
) -> View {
    match employee {
        Some(employee) => {
            View::Card(Box::new(card_view(employee, language, theme, options)))
        }
        None => View::NotFound(NotFoundView {
            language,
            title: text(language, TextKey::NotFound),
            description: text(language, TextKey::NotFoundDesc),
            theme: theme.clone(),
        }),
    }
}

fn card_view(
    employee: &Employee,
    language: Language,
    theme: &Theme,
    options: &BuildOptions,
) -> CardView {
    let save_contact = ActionLink {
        action: ActionId::ClickSaveContact,
        href: save_contact_href(&employee.slug, language),
        label: text(language, TextKey::Save),
        aria_label: format_text(language, TextKey::SaveAria, &employee.name),
        hints: None,
        download: true,
    };
    let schedule = employee.calendly.as_ref().map(|url| ActionLink {
        action: ActionId::ClickSchedule,
        href: url.clone(),
        label: text(language, TextKey::Schedule),
        aria_label: format_text(language, TextKey::ScheduleAria, &employee.name),
        hints: Some(LinkHints::NEW_CONTEXT),
        download: false,
    });
    CardView {
        page_title: theme.page_title(&employee.name),
        language,
        toggle_to: language.toggle(),
        toggle_aria_label: text(language, TextKey::ToggleLanguageAria),
        slug: employee.slug.clone(),
        name: employee.name.clone(),
        initials: employee.initials(),
        photo: employee.photo.clone().or_else(|| theme.default_photo.clone()),
        title: employee.title.get(language).to_string(),
        company: employee.company.get(language).to_string(),
        options: build(employee, language, options),
        save_contact,
        schedule,
        theme: theme.clone(),
    }
}

/// The vCard follows the card language; Spanish needs no parameter.
fn save_contact_href(slug: &str, language: Language) -> String {
    let path = format!("/vcf/{}", vcard::file_name(slug));
    if language == Language::DEFAULT {
        path
    } else {
        format!("{path}?lang={}", language.code())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Card(card) => fmt::Display::fmt(card.as_ref(), f),
            View::NotFound(view) => fmt::Display::fmt(view, f),
        }
    }
}

impl fmt::Display for NotFoundView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, self.language, self.title, &self.theme)?;
        writeln!(f, "<body class=\"not-found\">")?;
        writeln!(f, "<main class=\"card\">")?;
        writeln!(f, "<h1>{}</h1>", Escaped(self.title))?;
        writeln!(f, "<p>{}</p>", Escaped(self.description))?;
        writeln!(f, "</main>")?;
        writeln!(f, "</body>\n</html>")
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_head(f, self.language, &self.page_title, &self.theme)?;
        writeln!(f, "<body data-subject=\"{}\">", Escaped(&self.name))?;
        writeln!(f, "<main class=\"card\">")?;

        writeln!(f, "<header>")?;
        writeln!(
            f,
            "<a class=\"lang-toggle\" href=\"?lang={}\" aria-label=\"{}\">{}</a>",
            self.toggle_to.code(),
            Escaped(self.toggle_aria_label),
            self.toggle_to.code().to_uppercase()
        )?;
        match &self.photo {
            Some(photo) => writeln!(
                f,
                "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
                Escaped(photo),
                Escaped(&self.name)
            )?,
            None => writeln!(
                f,
                "<div class=\"avatar initials\" aria-hidden=\"true\">{}</div>",
                Escaped(&self.initials)
            )?,
        }
        writeln!(f, "<h1>{}</h1>", Escaped(&self.name))?;
        writeln!(f, "<p class=\"title\">{}</p>", Escaped(&self.title))?;
        writeln!(f, "<p class=\"company\">{}</p>", Escaped(&self.company))?;
        writeln!(f, "</header>")?;

        writeln!(f, "<nav class=\"contact-icons\">")?;
        for option in &self.options {
            write_option(f, option, &self.theme)?;
        }
        writeln!(f, "</nav>")?;

        writeln!(f, "<section class=\"actions\">")?;
        write_action(f, &self.save_contact, "primary")?;
        if let Some(schedule) = &self.schedule {
            write_action(f, schedule, "secondary")?;
        }
        writeln!(f, "</section>")?;

        writeln!(f, "</main>")?;
        writeln!(f, "<script>{CLICK_REPORTER}</script>")?;
        writeln!(f, "</body>\n</html>")
    }
}

fn write_head(
    f: &mut fmt::Formatter<'_>,
    language: Language,
    title: &str,
    theme: &Theme,
) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html lang=\"{}\">", language.code())?;
    writeln!(f, "<head>")?;
    writeln!(f, "<meta charset=\"utf-8\">")?;
    writeln!(
        f,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    )?;
    writeln!(f, "<title>{}</title>", Escaped(title))?;
    writeln!(f, "<style>{}</style>", stylesheet(theme))?;
    writeln!(f, "</head>")
}

fn write_hints(f: &mut fmt::Formatter<'_>, hints: Option<LinkHints>) -> fmt::Result {
    match hints {
        Some(hints) => write!(f, " target=\"{}\" rel=\"{}\"", hints.target, hints.rel),
        None => Ok(()),
    }
}

fn write_option(f: &mut fmt::Formatter<'_>, option: &ContactOption, theme: &Theme) -> fmt::Result {
    write!(
        f,
        "<a class=\"icon-button\" href=\"{}\" data-action=\"{}\" aria-label=\"{}\" title=\"{}\"",
        Escaped(&option.href),
        option.action_id(),
        Escaped(&option.aria_label),
        Escaped(option.label)
    )?;
    write_hints(f, option.hints)?;
    f.write_char('>')?;
    match (option.icon, &theme.logo_url) {
        (Icon::Brand, Some(logo)) => write!(
            f,
            "<img src=\"{}\" alt=\"{}\">",
            Escaped(logo),
            Escaped(&theme.brand_name)
        )?,
        (icon, _) => write!(f, "<span aria-hidden=\"true\">{}</span>", glyph(icon))?,
    }
    writeln!(f, "</a>")
}

fn write_action(f: &mut fmt::Formatter<'_>, link: &ActionLink, variant: &str) -> fmt::Result {
    write!(
        f,
        "<a class=\"action {variant}\" href=\"{}\" data-action=\"{}\" aria-label=\"{}\"",
        Escaped(&link.href),
        link.action,
        Escaped(&link.aria_label)
    )?;
    if link.download {
        f.write_str(" download")?;
    }
    write_hints(f, link.hints)?;
    writeln!(f, ">{}</a>", Escaped(link.label))
}

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Mail => "&#9993;",
        Icon::Phone => "&#9742;",
        Icon::Message => "&#128172;",
        Icon::LinkedIn => "in",
        Icon::Brand => "&#127760;",
    }
}

fn stylesheet(theme: &Theme) -> String {
    format!(
        "body{{margin:0;min-height:100vh;display:flex;align-items:center;justify-content:center;\
font-family:system-ui,sans-serif;background:{bg};color:#fff}}\
.card{{max-width:24rem;width:100%;margin:1rem;border-radius:1.5rem;overflow:hidden;\
background:rgba(255,255,255,.15);backdrop-filter:blur(20px);text-align:center;padding-bottom:1.5rem}}\
header{{position:relative;padding:1.5rem}}\
.lang-toggle{{position:absolute;top:1rem;right:1rem;color:#fff;text-decoration:none;font-weight:600}}\
.avatar{{width:6rem;height:6rem;border-radius:50%;object-fit:cover;margin:0 auto;\
display:flex;align-items:center;justify-content:center;font-size:2rem;background:rgba(255,255,255,.2)}}\
.contact-icons{{display:flex;justify-content:center;gap:1rem;margin:1.5rem 0}}\
.icon-button{{width:3.5rem;height:3.5rem;border-radius:50%;display:flex;align-items:center;\
justify-content:center;color:#fff;text-decoration:none;border:2px solid rgba(255,255,255,.5)}}\
.icon-button img{{width:2rem;height:2rem}}\
.actions{{display:flex;flex-direction:column;gap:.75rem;padding:0 1.5rem}}\
.action{{border-radius:999px;padding:1rem;color:#fff;text-decoration:none;font-weight:700}}\
.action.primary{{background:linear-gradient(90deg,{a},{b})}}\
.action.secondary{{background:rgba(30,41,59,.3);box-shadow:inset 0 0 0 2px rgba(255,255,255,.7)}}",
        bg = theme.background,
        a = theme.accent,
        b = theme.accent_secondary,
    )
}

/// HTML-escapes text and attribute values.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                other => f.write_char(other)?,
            }
        }
        Ok(())
    }
}
