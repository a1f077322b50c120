//! Form validation
//!
//! Pages declare which validators apply to each form field; [`FormRules`]
//! runs them in declaration order and reports the first failure per field.

pub mod validators;

use indexmap::IndexMap;
use validators::Validator;

/// Validators attached to the fields of one form
#[derive(Default)]
pub struct FormRules {
    fields: IndexMap<&'static str, Vec<Validator>>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a validator to a field label
    pub fn add_validator<F>(mut self, field: &'static str, validator: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .push(Box::new(validator));
        self
    }

    /// Validate the given `(field, value)` pairs
    ///
    /// Fields without rules are ignored; fields with rules but no value are
    /// validated against the empty string.
    pub fn validate<'a>(
        &self,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), Vec<String>> {
        let values: IndexMap<&str, &str> = values.into_iter().collect();
        let errors: Vec<String> = self
            .fields
            .iter()
            .filter_map(|(field, validators)| {
                let value = values.get(*field).copied().unwrap_or_default();
                validators
                    .iter()
                    .find_map(|validate| validate(*field, value).err())
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl std::fmt::Debug for FormRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormRules")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
