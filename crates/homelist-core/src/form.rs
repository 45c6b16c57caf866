// ── Listing form ──
//
// Raw create/edit form values and their validation. Validation reports
// every violated field at once; a valid form yields a `HomeDraft`.

use std::fmt;

use strum::Display;

use crate::model::{City, Home, HomeDraft};

pub const TITLE_LEN: (usize, usize) = (5, 100);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 500);
pub const ROOMS_RANGE: (i64, i64) = (1, 10);
pub const BATHROOMS_RANGE: (i64, i64) = (1, 10);

/// The form's fields, named as the CLI flags name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    Title,
    Description,
    City,
    Rooms,
    Bathrooms,
    Picture,
}

/// One violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// All violations found in a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The violation reported for `field`, if any.
    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    fn push(&mut self, field: FormField, reason: impl Into<String>) {
        self.0.push(FieldError {
            field,
            reason: reason.into(),
        });
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Form values as entered, before validation.
///
/// `rooms` and `bathrooms` are signed and optional so that a cleared or
/// out-of-range input survives until `validate` can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeForm {
    pub title: String,
    pub description: String,
    pub city: String,
    pub rooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub has_pool: bool,
    pub picture: String,
}

impl Default for HomeForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            city: String::new(),
            rooms: Some(1),
            bathrooms: Some(1),
            has_pool: false,
            picture: String::new(),
        }
    }
}

impl From<&Home> for HomeForm {
    fn from(home: &Home) -> Self {
        Self {
            title: home.title.clone(),
            description: home.description.clone(),
            city: home.city.clone(),
            rooms: Some(i64::from(home.rooms)),
            bathrooms: Some(i64::from(home.bathrooms)),
            has_pool: home.has_pool,
            picture: home.picture.clone(),
        }
    }
}

impl HomeForm {
    /// Check every field; return the draft or all violations.
    pub fn validate(&self) -> Result<HomeDraft, FormErrors> {
        let mut errors = FormErrors::default();

        check_text(&mut errors, FormField::Title, &self.title, TITLE_LEN);
        check_text(
            &mut errors,
            FormField::Description,
            &self.description,
            DESCRIPTION_LEN,
        );

        let city = if self.city.is_empty() {
            errors.push(FormField::City, "is required");
            None
        } else {
            match self.city.parse::<City>() {
                Ok(city) => Some(city),
                Err(_) => {
                    errors.push(
                        FormField::City,
                        format!("must be one of: {}", City::catalogue()),
                    );
                    None
                }
            }
        };

        let rooms = check_count(&mut errors, FormField::Rooms, self.rooms, ROOMS_RANGE);
        let bathrooms = check_count(
            &mut errors,
            FormField::Bathrooms,
            self.bathrooms,
            BATHROOMS_RANGE,
        );

        if self.picture.is_empty() {
            errors.push(FormField::Picture, "is required");
        } else if !is_picture_url(&self.picture) {
            errors.push(FormField::Picture, "must be an http:// or https:// URL");
        }

        match (city, rooms, bathrooms) {
            (Some(city), Some(rooms), Some(bathrooms)) if errors.is_empty() => Ok(HomeDraft {
                title: self.title.clone(),
                description: self.description.clone(),
                city,
                rooms,
                bathrooms,
                has_pool: self.has_pool,
                picture: self.picture.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn check_text(errors: &mut FormErrors, field: FormField, value: &str, (min, max): (usize, usize)) {
    if value.is_empty() {
        errors.push(field, "is required");
        return;
    }
    let len = value.chars().count();
    if len < min {
        errors.push(field, format!("must be at least {min} characters"));
    } else if len > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
}

fn check_count(
    errors: &mut FormErrors,
    field: FormField,
    value: Option<i64>,
    (min, max): (i64, i64),
) -> Option<u32> {
    let Some(n) = value else {
        errors.push(field, "is required");
        return None;
    };
    if n < min || n > max {
        errors.push(field, format!("must be between {min} and {max}"));
        return None;
    }
    u32::try_from(n).ok()
}

/// `http://` or `https://` followed by at least one character, on one line.
fn is_picture_url(s: &str) -> bool {
    let rest = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.contains(['\n', '\r']),
        None => false,
    }
}
