//! # Presentation Definition
//!
//! The subset of the DIF Presentation Exchange `presentation_definition`
//! the console reads:
//! `input_descriptors[].constraints.fields[].{path, filter.type, filter.const}`.
//!
//! Every level keeps unrecognised members in an `extra` map so a definition
//! fetched from the node survives a deserialize/serialize pass unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSONPath expression selecting a credential's `type`.
pub const TYPE_PATH: &str = "$.type";

/// A DIF presentation definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationDefinition {
    /// Definition identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Descriptors of the credentials a holder must present.
    #[serde(default)]
    pub input_descriptors: Vec<InputDescriptor>,

    /// Members not interpreted by the console.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One required input of a presentation definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Descriptor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Constraints the input must satisfy.
    #[serde(default)]
    pub constraints: Constraints,

    /// Members not interpreted by the console.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Constraints of an input descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Field constraints, in order.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Members not interpreted by the console.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single field constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// JSONPath expressions selecting the constrained value.
    #[serde(default)]
    pub path: Vec<String>,

    /// JSON Schema filter applied to the selected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    /// Members not interpreted by the console.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON Schema filter of a field constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// JSON Schema `type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,

    /// JSON Schema `const`.
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    /// Members not interpreted by the console.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// A field pinning `$.type` to a constant string.
    pub fn type_const(type_name: impl Into<String>) -> Self {
        Self {
            path: vec![TYPE_PATH.to_string()],
            filter: Some(Filter {
                filter_type: Some("string".to_string()),
                const_value: Some(Value::String(type_name.into())),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// The credential type this field requires, if it is a `$.type`
    /// constraint with a string filter and a string `const`.
    pub fn required_type(&self) -> Option<&str> {
        if !self.path.iter().any(|p| p == TYPE_PATH) {
            return None;
        }
        let filter = self.filter.as_ref()?;
        if filter.filter_type.as_deref() != Some("string") {
            return None;
        }
        filter.const_value.as_ref()?.as_str()
    }
}
