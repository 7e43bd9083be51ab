//! vCard 3.0 export for a directory entry.

use chrono::{DateTime, Utc};
use entity::{Employee, Language};

use crate::options::{linkedin_link, website_link};

const MAX_LINE_OCTETS: usize = 75;

pub fn file_name(slug: &str) -> String {
    format!("{slug}.vcf")
}

pub fn generate(employee: &Employee, language: Language) -> String {
    generate_at(employee, language, Utc::now())
}

pub fn generate_at(employee: &Employee, language: Language, revision: DateTime<Utc>) -> String {
    let (given, family) = split_name(&employee.name);
    let phone: String = employee.phone.chars().filter(|c| !c.is_whitespace()).collect();

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape(&employee.name)),
        format!("N:{};{};;;", escape(family), escape(given)),
        format!("ORG:{}", escape(employee.company.get(language))),
        format!("TITLE:{}", escape(employee.title.get(language))),
        format!("EMAIL;TYPE=INTERNET:{}", escape(&employee.email)),
        format!("TEL;TYPE=CELL:{}", escape(&phone)),
    ];
    if let Some(website) = &employee.website {
        lines.push(format!("URL:{}", website_link(website)));
    }
    if let Some(handle) = &employee.linkedin {
        lines.push(format!(
            "X-SOCIALPROFILE;TYPE=linkedin:{}",
            linkedin_link(handle)
        ));
    }
    if let Some(photo) = &employee.photo {
        lines.push(format!("PHOTO;VALUE=URI:{photo}"));
    }
    lines.push(format!("REV:{}", revision.format("%Y%m%dT%H%M%SZ")));
    lines.push("END:VCARD".to_string());

    let mut out = String::new();
    for line in &lines {
        fold_into(&mut out, line);
    }
    out
}

/// Last word is the family name; everything before it is the given name.
fn split_name(name: &str) -> (&str, &str) {
    let trimmed = name.trim();
    match trimmed.rsplit_once(char::is_whitespace) {
        Some((given, family)) => (given.trim_end(), family),
        None => (trimmed, ""),
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Folds at 75 octets without splitting a UTF-8 sequence, then terminates with CRLF.
fn fold_into(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}
