use card::{
    ActionId, BuildOptions, ContactAction, LanguageState, SlugResolver, Theme, View,
    analytics::{MemorySink, track},
    build, render,
};
use entity::{Directory, Employee, Language, Localized};

fn minimal(slug: &str) -> Employee {
    Employee {
        slug: slug.into(),
        name: "Laura Gómez".into(),
        title: Localized::new("Sales Lead", "Líder de Ventas"),
        company: Localized::new("Solware Agency", "Agencia Solware"),
        photo: None,
        email: "laura@solware.agency".into(),
        phone: "+58 412 5550101".into(),
        whatsapp: "584125550101".into(),
        linkedin: None,
        website: None,
        calendly: None,
    }
}

fn card_for(employee: &Employee) -> View {
    render(Some(employee), Language::Es, &Theme::default(), &BuildOptions::default())
}

#[test]
fn unknown_slugs_render_not_found_in_selected_language() {
    let directory = Directory::builtin();
    let resolver = SlugResolver::new(directory);
    for slug in ["", "nobody", "EUGENIO-ANDREONE", "eugenio-andreone/"] {
        let employee = resolver.resolve(Some(slug));
        assert!(employee.is_none(), "{slug} should not resolve");
        for language in Language::ALL {
            let html = render(employee, language, &Theme::default(), &BuildOptions::default())
                .to_html();
            let expected = match language {
                Language::Es => "Contacto no encontrado",
                Language::En => "Contact not found",
            };
            assert!(html.contains(expected));
        }
    }
}

#[test]
fn known_slug_resolves_to_named_employee() {
    let employee = SlugResolver::new(Directory::builtin())
        .resolve(Some("eugenio-andreone"))
        .expect("builtin profile");
    assert_eq!(employee.name, "Eugenio Andreone");
}

#[test]
fn record_without_optionals_offers_email_then_whatsapp() {
    let options = build(&minimal("laura"), Language::Es, &BuildOptions::default());
    let actions: Vec<_> = options.iter().map(|option| option.action).collect();
    assert_eq!(actions, vec![ContactAction::Email, ContactAction::WhatsApp]);
}

#[test]
fn link_targets_follow_construction_rules() {
    let mut employee = minimal("laura");
    employee.whatsapp = "584142323332".into();
    employee.phone = "+58 414 2323332".into();
    let options = build(
        &employee,
        Language::En,
        &BuildOptions {
            offer_phone_call: true,
        },
    );
    let href = |action| {
        options
            .iter()
            .find(|option| option.action == action)
            .map(|option| option.href.as_str())
    };
    assert_eq!(
        href(ContactAction::WhatsApp),
        Some("https://wa.me/584142323332")
    );
    assert_eq!(href(ContactAction::Phone), Some("tel:+584142323332"));
    assert_eq!(href(ContactAction::Email), Some("mailto:laura@solware.agency"));
}

#[test]
fn toggling_twice_restores_language() {
    let mut state = LanguageState::new();
    let start = state.current();
    state.toggle();
    state.toggle();
    assert_eq!(state.current(), start);
    assert_eq!(Language::Es.toggle().toggle(), Language::Es);
}

#[test]
fn schedule_action_tracks_calendly_presence() {
    let mut employee = minimal("laura");
    let without = card_for(&employee);
    let View::Card(card) = without else {
        panic!("expected card view");
    };
    assert!(card.schedule.is_none());

    let url = "https://calendly.com/laura/30min?month=2024-05";
    employee.calendly = Some(url.into());
    let with = card_for(&employee);
    let View::Card(card) = with else {
        panic!("expected card view");
    };
    assert_eq!(card.schedule.as_ref().map(|link| link.href.as_str()), Some(url));
    assert!(card.to_string().contains("month=2024-05"));
}

#[test]
fn option_selection_reports_action_and_subject() {
    let employee = minimal("laura");
    let sink = MemorySink::default();
    for option in build(&employee, Language::Es, &BuildOptions::default()) {
        track(&sink, option.action_id(), &employee.name);
    }
    let events = sink.events();
    let actions: Vec<_> = events.iter().map(|event| event.action).collect();
    assert_eq!(actions, vec![ActionId::ClickEmail, ActionId::ClickWhatsapp]);
    assert!(events.iter().all(|event| event.subject == "Laura Gómez"));
}
