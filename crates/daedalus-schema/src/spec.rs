//! Parsed field specifications and the per-record schema.

use crate::grammar::{parse_annotation, ConstraintKey, SchemaError};
use crate::record::{ApiRecord, FieldDecl, FieldKind};

/// A fully parsed field constraint set, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    source_name: String,
    param_name: String,
    kind: FieldKind,
    required: bool,
    default: Option<String>,
    one_of: Option<Vec<String>>,
    min: Option<i64>,
    max: Option<i64>,
}

impl FieldSpec {
    /// Parses one field declaration's annotation into a spec.
    pub fn from_decl(decl: &FieldDecl) -> Result<Self, SchemaError> {
        let mut spec = Self {
            source_name: decl.name.to_string(),
            param_name: decl.name.to_lowercase(),
            kind: decl.kind,
            required: false,
            default: None,
            one_of: None,
            min: None,
            max: None,
        };

        for constraint in parse_annotation(decl.name, decl.annotation)? {
            // grammar guarantees a value for every key except `required`
            let value = constraint.value.unwrap_or_default();
            match constraint.key {
                ConstraintKey::Required => spec.required = true,
                ConstraintKey::ParamName => spec.param_name = value,
                ConstraintKey::Enum => {
                    if decl.kind == FieldKind::Int {
                        return Err(SchemaError::EnumOnInt {
                            field: decl.name.to_string(),
                        });
                    }
                    spec.one_of = Some(value.split('|').map(str::to_string).collect());
                }
                ConstraintKey::Default => {
                    if decl.kind == FieldKind::Int {
                        parse_int(decl.name, ConstraintKey::Default, &value)?;
                    }
                    spec.default = Some(value);
                }
                ConstraintKey::Min => {
                    spec.min = Some(parse_int(decl.name, ConstraintKey::Min, &value)?);
                }
                ConstraintKey::Max => {
                    spec.max = Some(parse_int(decl.name, ConstraintKey::Max, &value)?);
                }
            }
        }

        Ok(spec)
    }

    /// The declared field name.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The name looked up in the parameter bag: the `paramname` override if
    /// present, else the lower-cased field name.
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// The field kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field may not end at its zero value.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// The default substituted for an empty/zero field, if declared.
    #[must_use]
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The allowed member set, if declared.
    #[must_use]
    pub fn one_of(&self) -> Option<&[String]> {
        self.one_of.as_deref()
    }

    /// The lower bound, if declared.
    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    /// The upper bound, if declared.
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.max
    }
}

fn parse_int(field: &str, key: ConstraintKey, value: &str) -> Result<i64, SchemaError> {
    value
        .parse()
        .map_err(|_| SchemaError::NotAnInteger {
            field: field.to_string(),
            key: key.as_str().to_string(),
            value: value.to_string(),
        })
}

/// The ordered field specs of one record type.
///
/// Fields validate in declaration order; order determines which error
/// surfaces first for a request violating several constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSchema {
    fields: Vec<FieldSpec>,
}

impl RequestSchema {
    /// Builds the schema for a record type from its descriptor table.
    pub fn build<T: ApiRecord>() -> Result<Self, SchemaError> {
        let fields = T::fields()
            .iter()
            .map(FieldSpec::from_decl)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fields })
    }

    /// The field specs, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}
