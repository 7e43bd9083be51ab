//! Fixed display strings for both card languages.
//!
//! Lookups by raw code fall back to [`Language::DEFAULT`] when the code is not
//! supported, so a corrupted language value still renders a readable card.

use entity::Language;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextKey {
    Save,
    Schedule,
    Email,
    Phone,
    WhatsApp,
    Website,
    LinkedIn,
    NotFound,
    NotFoundDesc,
    EmailAria,
    PhoneAria,
    WhatsAppAria,
    LinkedInAria,
    WebsiteAria,
    SaveAria,
    ScheduleAria,
    ToggleLanguageAria,
}

pub fn translate(code: &str, key: TextKey) -> &'static str {
    text(Language::from_code_or_default(Some(code)), key)
}

pub fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::En => english(key),
        Language::Es => spanish(key),
    }
}

/// Text with its `{name}` placeholder filled in.
pub fn format_text(language: Language, key: TextKey, name: &str) -> String {
    text(language, key).replace("{name}", name)
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Save => "SAVE CONTACT",
        TextKey::Schedule => "SCHEDULE MEETING",
        TextKey::Email => "Email",
        TextKey::Phone => "Phone",
        TextKey::WhatsApp => "WhatsApp",
        TextKey::Website => "Website",
        TextKey::LinkedIn => "LinkedIn",
        TextKey::NotFound => "Contact not found",
        TextKey::NotFoundDesc => "The requested profile does not exist.",
        TextKey::EmailAria => "Send an email to {name}",
        TextKey::PhoneAria => "Call {name}",
        TextKey::WhatsAppAria => "Send a WhatsApp message to {name}",
        TextKey::LinkedInAria => "View the LinkedIn profile of {name}",
        TextKey::WebsiteAria => "Visit the website of {name}",
        TextKey::SaveAria => "Save the contact of {name}",
        TextKey::ScheduleAria => "Schedule a meeting with {name}",
        TextKey::ToggleLanguageAria => "Switch language to Spanish",
    }
}

fn spanish(key: TextKey) -> &'static str {
    match key {
        TextKey::Save => "GUARDAR CONTACTO",
        TextKey::Schedule => "AGENDAR REUNIÓN",
        TextKey::Email => "Correo",
        TextKey::Phone => "Teléfono",
        TextKey::WhatsApp => "WhatsApp",
        TextKey::Website => "Sitio web",
        TextKey::LinkedIn => "LinkedIn",
        TextKey::NotFound => "Contacto no encontrado",
        TextKey::NotFoundDesc => "El perfil solicitado no existe.",
        TextKey::EmailAria => "Enviar correo electrónico a {name}",
        TextKey::PhoneAria => "Llamar a {name}",
        TextKey::WhatsAppAria => "Enviar mensaje de WhatsApp a {name}",
        TextKey::LinkedInAria => "Ver perfil de LinkedIn de {name}",
        TextKey::WebsiteAria => "Visitar sitio web de {name}",
        TextKey::SaveAria => "Guardar contacto de {name}",
        TextKey::ScheduleAria => "Programar una cita con {name}",
        TextKey::ToggleLanguageAria => "Cambiar idioma a inglés",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_texts_are_localized() {
        assert_eq!(translate("en", TextKey::NotFound), "Contact not found");
        assert_eq!(translate("es", TextKey::NotFound), "Contacto no encontrado");
        assert_eq!(
            translate("es", TextKey::NotFoundDesc),
            "El perfil solicitado no existe."
        );
    }

    #[test]
    fn unsupported_code_uses_default_language() {
        assert_eq!(translate("de", TextKey::Save), "GUARDAR CONTACTO");
        assert_eq!(translate("", TextKey::Website), "Sitio web");
    }

    #[test]
    fn placeholders_are_filled() {
        assert_eq!(
            format_text(Language::En, TextKey::ScheduleAria, "Ana"),
            "Schedule a meeting with Ana"
        );
    }
}
