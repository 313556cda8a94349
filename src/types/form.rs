//! Form view-models shared by every entity.
//!
//! A form is returned as a [`FormView`]: the values being edited, the lookup
//! lists its dropdowns need, and any errors from the last submission. Handlers
//! turn a [`Submission`] into either a redirect or a redisplayed form.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::config::{MODEL_ERROR_KEY, SAVE_FAILED_MESSAGE};
use crate::domain::AssignedCourse;

/// Field name → messages. Model-level messages use the empty key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelErrors(BTreeMap<String, Vec<String>>);

impl ModelErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Add an error that is not tied to a single field
    pub fn add_model_error(&mut self, message: impl Into<String>) {
        self.add(MODEL_ERROR_KEY, message);
    }

    /// The generic commit-failure message
    pub fn save_failed() -> Self {
        let mut errors = Self::new();
        errors.add_model_error(SAVE_FAILED_MESSAGE);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn model_errors(&self) -> &[String] {
        self.field(MODEL_ERROR_KEY)
    }

    pub fn merge(&mut self, other: ModelErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl From<&ValidationErrors> for ModelErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut model_errors = ModelErrors::new();
        for (field, errs) in errors.field_errors() {
            for e in errs {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                model_errors.add(field.to_string(), message);
            }
        }
        model_errors
    }
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: i32,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    /// Build a dropdown, marking `selected` if present
    pub fn list<I>(items: I, selected: Option<i32>) -> Vec<SelectOption>
    where
        I: IntoIterator<Item = (i32, String)>,
    {
        items
            .into_iter()
            .map(|(value, text)| SelectOption {
                value,
                text,
                selected: selected == Some(value),
            })
            .collect()
    }
}

/// Auxiliary lists a form needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lookups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructors: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<AssignedCourse>>,
}

impl Lookups {
    pub fn departments(options: Vec<SelectOption>) -> Self {
        Self {
            departments: Some(options),
            ..Self::default()
        }
    }

    pub fn instructors(options: Vec<SelectOption>) -> Self {
        Self {
            instructors: Some(options),
            ..Self::default()
        }
    }

    pub fn courses(courses: Vec<AssignedCourse>) -> Self {
        Self {
            courses: Some(courses),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_none() && self.instructors.is_none() && self.courses.is_none()
    }
}

/// A create or edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView<F> {
    /// Identity of the entity being edited; absent on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Current values; absent for an empty create form
    pub values: Option<F>,
    #[serde(skip_serializing_if = "Lookups::is_empty")]
    pub lookups: Lookups,
    #[serde(skip_serializing_if = "ModelErrors::is_empty")]
    pub errors: ModelErrors,
}

impl<F> FormView<F> {
    /// Empty create form
    pub fn empty() -> Self {
        Self {
            id: None,
            values: None,
            lookups: Lookups::default(),
            errors: ModelErrors::default(),
        }
    }

    pub fn with_values(id: Option<i32>, values: F) -> Self {
        Self {
            id,
            values: Some(values),
            lookups: Lookups::default(),
            errors: ModelErrors::default(),
        }
    }

    pub fn lookups(mut self, lookups: Lookups) -> Self {
        self.lookups = lookups;
        self
    }

    pub fn errors(mut self, errors: ModelErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Delete confirmation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation<T> {
    pub item: T,
    #[serde(skip_serializing_if = "ModelErrors::is_empty")]
    pub errors: ModelErrors,
}

impl<T> Confirmation<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            errors: ModelErrors::default(),
        }
    }

    pub fn save_failed(item: T) -> Self {
        Self {
            item,
            errors: ModelErrors::save_failed(),
        }
    }
}

/// Outcome of a POSTed form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<V> {
    /// Persisted; the client goes back to the list
    Saved,
    /// Rejected by validation; redisplay with field messages
    Invalid(V),
    /// The commit failed; redisplay the entered values for a retry
    SaveFailed(V),
}

/// Turns the text of a submitted form into typed values.
///
/// Every field that is missing, malformed or breaks a rule adds a message
/// under its own key, so one round trip reports all of them.
#[derive(Debug, Default)]
pub struct FormBinder {
    errors: ModelErrors,
}

impl FormBinder {
    /// Start from the text rules declared on `input`
    pub fn new(input: &impl Validate) -> Self {
        let mut binder = Self::default();
        binder.check(input);
        binder
    }

    /// A field that must be filled in and parse as `T`
    pub fn required<T: FromStr>(&mut self, field: &str, label: &str, text: &str) -> Option<T> {
        let text = text.trim();
        if text.is_empty() {
            self.errors.add(field, format!("The {} field is required.", label));
            return None;
        }
        self.parse(field, label, text)
    }

    /// A field that may be left blank; `Some(None)` when it was
    pub fn optional<T: FromStr>(
        &mut self,
        field: &str,
        label: &str,
        text: Option<&str>,
    ) -> Option<Option<T>> {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => self.parse(field, label, text).map(Some),
            None => Some(None),
        }
    }

    /// Apply the rules declared on a bound value
    pub fn check(&mut self, value: &impl Validate) {
        if let Err(e) = value.validate() {
            self.errors.merge(ModelErrors::from(&e));
        }
    }

    /// The bound value, or every message collected on the way
    pub fn finish<T>(self, bound: Option<T>) -> Result<T, ModelErrors> {
        match bound {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }

    fn parse<T: FromStr>(&mut self, field: &str, label: &str, text: &str) -> Option<T> {
        match text.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.errors.add(
                    field,
                    format!("The value '{}' is not valid for {}.", text, label),
                );
                None
            }
        }
    }
}

/// Leniently read an optional id, as used to preselect a dropdown entry
pub fn selected_id(text: Option<&str>) -> Option<i32> {
    text.and_then(|t| t.trim().parse().ok())
}
