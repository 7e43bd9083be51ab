use std::{collections::HashSet, fs, path::Path};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::{Employee, Localized};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),
    #[error("employee `{slug}` has an empty `{field}`")]
    EmptyField { slug: String, field: &'static str },
    #[error("failed to read directory file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid directory json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

static BUILTIN: Lazy<Directory> = Lazy::new(|| Directory {
    employees: builtin_employees(),
});

/// Read-only set of employee records keyed by slug.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    employees: Vec<Employee>,
}

impl Directory {
    pub fn new(employees: Vec<Employee>) -> DirectoryResult<Self> {
        let mut seen = HashSet::new();
        for employee in &employees {
            validate(employee)?;
            if !seen.insert(employee.slug.as_str()) {
                return Err(DirectoryError::DuplicateSlug(employee.slug.clone()));
            }
        }
        Ok(Self { employees })
    }

    /// The directory compiled into the binary.
    pub fn builtin() -> &'static Directory {
        &BUILTIN
    }

    /// Parse a JSON array of employees.
    pub fn from_json(raw: &str) -> DirectoryResult<Self> {
        let employees: Vec<Employee> = serde_json::from_str(raw)?;
        Self::new(employees)
    }

    pub fn load(path: &Path) -> DirectoryResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, slug: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.slug == slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().map(|employee| employee.slug.as_str())
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

fn validate(employee: &Employee) -> DirectoryResult<()> {
    let required = [
        ("slug", employee.slug.as_str()),
        ("name", employee.name.as_str()),
        ("email", employee.email.as_str()),
        ("phone", employee.phone.as_str()),
        ("whatsapp", employee.whatsapp.as_str()),
        ("title.en", employee.title.en.as_str()),
        ("title.es", employee.title.es.as_str()),
        ("company.en", employee.company.en.as_str()),
        ("company.es", employee.company.es.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DirectoryError::EmptyField {
                slug: employee.slug.clone(),
                field,
            });
        }
    }
    Ok(())
}

fn builtin_employees() -> Vec<Employee> {
    vec![Employee {
        slug: "eugenio-andreone".into(),
        name: "Eugenio Andreone".into(),
        title: Localized::new("Production Engineer", "Ingeniero de Producción"),
        company: Localized::new("Solware Agency", "Agencia Solware"),
        photo: Some(
            "https://lafysstpyiejevhrlmzc.supabase.co/storage/v1/object/public/imagenes/Equipo/Eugenio.png"
                .into(),
        ),
        email: "ventas@solware.agency".into(),
        phone: "+58 414 2323332".into(),
        whatsapp: "584142323332".into(),
        linkedin: Some("eugenio-andreone".into()),
        website: Some("solware.agency".into()),
        calendly: Some(
            "https://calendar.google.com/calendar/u/0/appointments/schedules/AcZssZ28TbL6x8Jj7yLpzgpH2OQ1MV5t5zdvwYRbjCTVKTjj-pNNzSSZ3mGSpguP7Sv4AksuyRdav2bJ"
                .into(),
        ),
    }]
}
