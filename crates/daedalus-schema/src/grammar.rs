//! The constraint annotation grammar.
//!
//! Annotations are comma-separated `key` or `key=value` tokens, e.g.
//! `required,enum=user|moderator|admin,default=user`. Parsing is a single
//! left-to-right split; whitespace around keys and values is trimmed.

use thiserror::Error;

/// Configuration-class error raised while building a schema.
///
/// These are fatal to the operation building the schema, never defaulted
/// away. If one escapes to request time it surfaces as a 500-class failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An annotation used a key outside the recognized vocabulary.
    #[error("field `{field}`: unknown constraint key `{key}`")]
    UnknownKey {
        /// The declared field name.
        field: String,
        /// The offending key.
        key: String,
    },

    /// A key that requires a value appeared bare.
    #[error("field `{field}`: constraint `{key}` requires a value")]
    MissingValue {
        /// The declared field name.
        field: String,
        /// The offending key.
        key: String,
    },

    /// `required` appeared with a value.
    #[error("field `{field}`: constraint `required` does not take a value")]
    UnexpectedValue {
        /// The declared field name.
        field: String,
    },

    /// `min`, `max`, or an integer-field `default` had a non-integer value.
    #[error("field `{field}`: constraint `{key}` expects an integer, got `{value}`")]
    NotAnInteger {
        /// The declared field name.
        field: String,
        /// The offending key.
        key: String,
        /// The value that failed to parse.
        value: String,
    },

    /// `enum` was declared on a non-string field.
    #[error("field `{field}`: `enum` applies only to string fields")]
    EnumOnInt {
        /// The declared field name.
        field: String,
    },
}

/// The recognized annotation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKey {
    /// The field must not end up at its kind's zero value.
    Required,
    /// Overrides the parameter name looked up in the bag.
    ParamName,
    /// Restricts a string field to a fixed member set.
    Enum,
    /// Value substituted when the field would otherwise stay at zero.
    Default,
    /// Lower bound: numeric value for int fields, length for string fields.
    Min,
    /// Upper bound, same interpretation as `Min`.
    Max,
}

impl ConstraintKey {
    /// Parses a key token, returning `None` for unrecognized keys.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "required" => Some(Self::Required),
            "paramname" => Some(Self::ParamName),
            "enum" => Some(Self::Enum),
            "default" => Some(Self::Default),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    /// Returns the key's annotation spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::ParamName => "paramname",
            Self::Enum => "enum",
            Self::Default => "default",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

/// One parsed `key` or `key=value` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// The recognized key.
    pub key: ConstraintKey,
    /// The raw value, absent for bare keys.
    pub value: Option<String>,
}

/// Parses one annotation string into its constraint tokens.
///
/// An empty (or all-whitespace) annotation yields no constraints. `field` is
/// only used to name the field in errors.
pub fn parse_annotation(field: &str, annotation: &str) -> Result<Vec<Constraint>, SchemaError> {
    let annotation = annotation.trim();
    if annotation.is_empty() {
        return Ok(Vec::new());
    }

    let mut constraints = Vec::new();
    for token in annotation.split(',') {
        let (raw_key, value) = match token.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim().to_string())),
            None => (token.trim(), None),
        };

        let key = ConstraintKey::parse(raw_key).ok_or_else(|| SchemaError::UnknownKey {
            field: field.to_string(),
            key: raw_key.to_string(),
        })?;

        match (key, &value) {
            (ConstraintKey::Required, Some(_)) => {
                return Err(SchemaError::UnexpectedValue {
                    field: field.to_string(),
                })
            }
            (ConstraintKey::Required, None) => {}
            (_, None) => {
                return Err(SchemaError::MissingValue {
                    field: field.to_string(),
                    key: key.as_str().to_string(),
                })
            }
            (_, Some(_)) => {}
        }

        constraints.push(Constraint { key, value });
    }

    Ok(constraints)
}
