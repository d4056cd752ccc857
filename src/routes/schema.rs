//! Body schemas and validation.

use serde_json::{Map, Value};
use strum::Display;

/// JSON type a declared field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON number.
    Number,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
        }
    }
}

/// Declaration of a single body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Expected type.
    pub kind: FieldType,
    /// Whether the field may be absent.
    pub optional: bool,
}

impl FieldSpec {
    /// A field that must be present.
    pub fn required(kind: FieldType) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// A field that may be absent.
    pub fn optional(kind: FieldType) -> Self {
        Self {
            kind,
            optional: true,
        }
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name, empty for errors about the body as a whole.
    pub field: String,
    /// Description of the failure.
    pub reason: String,
}

/// Ordered set of declared body fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySchema {
    fields: Vec<(&'static str, FieldSpec)>,
}

impl BodySchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    pub fn field(mut self, name: &'static str, spec: FieldSpec) -> Self {
        self.fields.push((name, spec));
        self
    }

    /// Validate a body against the schema.
    ///
    /// Undeclared fields are dropped from the result. A JSON `null` counts as
    /// absent.
    pub fn validate(&self, body: &Value) -> ValidatedBody {
        let Some(object) = body.as_object() else {
            return ValidatedBody {
                values: Map::new(),
                errors: vec![FieldError {
                    field: String::new(),
                    reason: "body must be a JSON object".to_string(),
                }],
            };
        };

        let mut values = Map::new();
        let mut errors = Vec::new();

        for (name, spec) in &self.fields {
            match object.get(*name).filter(|v| !v.is_null()) {
                Some(value) if spec.kind.matches(value) => {
                    values.insert((*name).to_string(), value.clone());
                }
                Some(_) => errors.push(FieldError {
                    field: (*name).to_string(),
                    reason: format!("expected {}", spec.kind),
                }),
                None if !spec.optional => errors.push(FieldError {
                    field: (*name).to_string(),
                    reason: "field is required".to_string(),
                }),
                None => {}
            }
        }

        ValidatedBody { values, errors }
    }
}

/// Result of validating a body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBody {
    values: Map<String, Value>,
    errors: Vec<FieldError>,
}

impl ValidatedBody {
    /// Whether every declared field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validation failures.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// A validated string field.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// A validated number field as a whole number.
    ///
    /// `Ok(None)` when the field is absent. Fractions and values outside the
    /// `i64` range are errors, never rounded or clamped.
    pub fn integer(&self, name: &str) -> Result<Option<i64>, FieldError> {
        let Some(Value::Number(number)) = self.values.get(name) else {
            return Ok(None);
        };

        number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| FieldError {
                field: name.to_string(),
                reason: format!("expected a whole number, got {number}"),
            })
    }
}
