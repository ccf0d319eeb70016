//! # Credential Template Capability
//!
//! A template declares the ordered inputs an operator must supply and
//! renders a [`CredentialDocument`] from them. Field values are positional:
//! `field_values[i]` fills `fields()[i]`.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::credential::CredentialDocument;

/// An operator-supplied input of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Short label shown to the operator.
    pub name: &'static str,
    /// Explanation of the expected value.
    pub description: &'static str,
}

/// Errors from rendering a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Fewer field values were supplied than the template declares.
    #[error("{template}: missing value for field {field:?} at position {index}")]
    MissingFieldValue {
        /// Type name of the template being rendered.
        template: String,
        /// Name of the field without a value.
        field: String,
        /// Position of the missing value.
        index: usize,
    },
}

/// A credential type the console can issue.
///
/// Implementations must be pure: identical arguments always yield
/// structurally equal documents.
pub trait CredentialTemplate: Send + Sync {
    /// The credential type this template produces (first entry of `type`).
    fn type_name(&self) -> &str;

    /// Ordered inputs the operator must supply.
    fn fields(&self) -> &[FieldSpec];

    /// Render a credential document.
    ///
    /// Values are placed verbatim; extra values beyond `fields()` are ignored.
    ///
    /// # Errors
    ///
    /// [`TemplateError::MissingFieldValue`] if `field_values` is shorter than
    /// `fields()`.
    fn render(
        &self,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<CredentialDocument, TemplateError>;
}

/// Positional access to field values that fails loudly on short input.
pub(crate) struct FieldValues<'a> {
    template: &'a dyn CredentialTemplate,
    values: &'a [String],
}

impl<'a> FieldValues<'a> {
    /// Check the value count up front so no document is half-rendered.
    pub(crate) fn new(
        template: &'a dyn CredentialTemplate,
        values: &'a [String],
    ) -> Result<Self, TemplateError> {
        let fields = template.fields();
        if let Some((index, field)) = fields.iter().enumerate().nth(values.len()) {
            return Err(TemplateError::MissingFieldValue {
                template: template.type_name().to_string(),
                field: field.name.to_string(),
                index,
            });
        }
        Ok(Self { template, values })
    }

    /// The value at `index` as a JSON string.
    pub(crate) fn get(&self, index: usize) -> Result<Value, TemplateError> {
        match self.values.get(index) {
            Some(v) => Ok(Value::String(v.clone())),
            None => Err(TemplateError::MissingFieldValue {
                template: self.template.type_name().to_string(),
                field: self
                    .template
                    .fields()
                    .get(index)
                    .map(|f| f.name.to_string())
                    .unwrap_or_default(),
                index,
            }),
        }
    }
}

/// Build a JSON object from key/value pairs.
pub(crate) fn object<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
