//! Derives the contact actions a card offers from an employee record.

use entity::{Employee, Language};
use serde::Serialize;

use crate::{
    analytics::ActionId,
    i18n::{TextKey, format_text, text},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactAction {
    Email,
    Phone,
    WhatsApp,
    LinkedIn,
    Website,
}

impl ContactAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContactAction::Email => "email",
            ContactAction::Phone => "phone",
            ContactAction::WhatsApp => "whatsapp",
            ContactAction::LinkedIn => "linkedin",
            ContactAction::Website => "website",
        }
    }

    pub const fn action_id(self) -> ActionId {
        match self {
            ContactAction::Email => ActionId::ClickEmail,
            ContactAction::Phone => ActionId::ClickPhone,
            ContactAction::WhatsApp => ActionId::ClickWhatsapp,
            ContactAction::LinkedIn | ContactAction::Website => ActionId::ClickSocial,
        }
    }

    fn label_key(self) -> TextKey {
        match self {
            ContactAction::Email => TextKey::Email,
            ContactAction::Phone => TextKey::Phone,
            ContactAction::WhatsApp => TextKey::WhatsApp,
            ContactAction::LinkedIn => TextKey::LinkedIn,
            ContactAction::Website => TextKey::Website,
        }
    }

    fn aria_key(self) -> TextKey {
        match self {
            ContactAction::Email => TextKey::EmailAria,
            ContactAction::Phone => TextKey::PhoneAria,
            ContactAction::WhatsApp => TextKey::WhatsAppAria,
            ContactAction::LinkedIn => TextKey::LinkedInAria,
            ContactAction::Website => TextKey::WebsiteAria,
        }
    }

    const fn icon(self) -> Icon {
        match self {
            ContactAction::Email => Icon::Mail,
            ContactAction::Phone => Icon::Phone,
            ContactAction::WhatsApp => Icon::Message,
            ContactAction::LinkedIn => Icon::LinkedIn,
            ContactAction::Website => Icon::Brand,
        }
    }
}

/// Icon reference; the renderer decides how each one is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Mail,
    Phone,
    Message,
    LinkedIn,
    Brand,
}

/// Navigation hints for links that leave the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LinkHints {
    pub target: &'static str,
    pub rel: &'static str,
}

impl LinkHints {
    pub const NEW_CONTEXT: LinkHints = LinkHints {
        target: "_blank",
        rel: "noopener noreferrer",
    };
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactOption {
    pub action: ContactAction,
    pub href: String,
    pub icon: Icon,
    pub hints: Option<LinkHints>,
    pub label: &'static str,
    pub aria_label: String,
}

impl ContactOption {
    fn new(employee: &Employee, language: Language, action: ContactAction, href: String) -> Self {
        let hints = href
            .starts_with("https://")
            .then_some(LinkHints::NEW_CONTEXT);
        Self {
            action,
            href,
            icon: action.icon(),
            hints,
            label: text(language, action.label_key()),
            aria_label: format_text(
                language,
                action.aria_key(),
                aria_subject(employee, language, action),
            ),
        }
    }

    pub fn action_id(&self) -> ActionId {
        self.action.action_id()
    }
}

/// The website belongs to the company; every other action addresses the person.
fn aria_subject(employee: &Employee, language: Language, action: ContactAction) -> &str {
    match action {
        ContactAction::Website => employee.company.get(language),
        _ => &employee.name,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub offer_phone_call: bool,
}

/// Ordered contact options: email, phone (if offered), whatsapp, linkedin, website.
pub fn build(
    employee: &Employee,
    language: Language,
    options: &BuildOptions,
) -> Vec<ContactOption> {
    let mut built = Vec::with_capacity(5);
    built.push(ContactOption::new(
        employee,
        language,
        ContactAction::Email,
        mailto_link(&employee.email),
    ));
    if options.offer_phone_call {
        built.push(ContactOption::new(
            employee,
            language,
            ContactAction::Phone,
            tel_link(&employee.phone),
        ));
    }
    built.push(ContactOption::new(
        employee,
        language,
        ContactAction::WhatsApp,
        whatsapp_link(&employee.whatsapp),
    ));
    if let Some(handle) = &employee.linkedin {
        built.push(ContactOption::new(
            employee,
            language,
            ContactAction::LinkedIn,
            linkedin_link(handle),
        ));
    }
    if let Some(website) = &employee.website {
        built.push(ContactOption::new(
            employee,
            language,
            ContactAction::Website,
            website_link(website),
        ));
    }
    built
}

pub fn mailto_link(email: &str) -> String {
    format!("mailto:{email}")
}

/// Whitespace is removed; every other character is kept.
pub fn tel_link(phone: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{compact}")
}

/// Only ASCII digits survive; `+`, spaces and separators are dropped.
pub fn whatsapp_link(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}

pub fn linkedin_link(handle: &str) -> String {
    format!("https://linkedin.com/in/{handle}")
}

pub fn website_link(website: &str) -> String {
    format!("https://{website}")
}
