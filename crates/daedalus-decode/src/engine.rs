//! The decode/validate engine.
//!
//! Fills a record field by field, in schema order. Per field the sequence is
//! fixed: coerce the supplied value, substitute the default if the field is
//! still at its zero value, then check `required`, `enum`, and `min`/`max`.
//! `required` runs after defaulting, so a default satisfies it; `enum` and
//! the bounds run after defaulting too, so a default must itself pass them.
//! The first failing field wins and decoding stops.

use crate::bag::ParameterBag;
use daedalus_core::ApiError;
use daedalus_schema::{schema_of, ApiRecord, FieldKind, FieldMut, FieldSpec};

/// Decodes and validates a record from the bag.
///
/// Validation failures are 400 [`ApiError`]s naming the offending parameter.
/// A schema configuration error escaping to this point is a 500.
///
/// # Example
///
/// ```
/// use daedalus_decode::{decode, ParameterBag};
/// use daedalus_schema::{ApiRecord, FieldDecl, FieldKind, FieldMut};
///
/// #[derive(Debug, Default)]
/// struct ProfileParams {
///     login: String,
/// }
///
/// impl ApiRecord for ProfileParams {
///     fn fields() -> &'static [FieldDecl] {
///         const FIELDS: &[FieldDecl] = &[FieldDecl::new("Login", FieldKind::Str, "required")];
///         FIELDS
///     }
///
///     fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
///         match name {
///             "Login" => Some(FieldMut::Str(&mut self.login)),
///             _ => None,
///         }
///     }
/// }
///
/// let bag = ParameterBag::from_query("login=i0").unwrap();
/// let params: ProfileParams = decode(&bag).unwrap();
/// assert_eq!(params.login, "i0");
/// ```
pub fn decode<T: ApiRecord>(bag: &ParameterBag) -> Result<T, ApiError> {
    let schema = schema_of::<T>().map_err(|err| {
        tracing::error!(record = std::any::type_name::<T>(), %err, "schema configuration error");
        ApiError::internal(err.to_string())
    })?;

    let mut record = T::default();
    for spec in schema.fields() {
        let Some(field) = record.field_mut(spec.source_name()) else {
            return Err(ApiError::internal(format!(
                "record exposes no field `{}`",
                spec.source_name()
            )));
        };
        fill_field(spec, field, bag)?;
    }
    Ok(record)
}

fn fill_field(spec: &FieldSpec, mut field: FieldMut<'_>, bag: &ParameterBag) -> Result<(), ApiError> {
    match bag.values(spec.param_name()) {
        None => {}
        Some([value]) => coerce(spec, &mut field, value)?,
        Some(_) => {
            return Err(ApiError::bad_request("query value must be equal 1"));
        }
    }

    if field.is_zero() {
        if let Some(default) = spec.default() {
            assign_default(spec, &mut field, default)?;
        }
    }

    if spec.required() && field.is_zero() {
        return Err(ApiError::bad_request(format!(
            "{} must not be empty",
            spec.param_name()
        )));
    }

    if let (Some(members), FieldMut::Str(value)) = (spec.one_of(), &field) {
        if !members.iter().any(|member| member == *value) {
            return Err(ApiError::bad_request(format!(
                "{} must be one of [{}]",
                spec.param_name(),
                members.join(", ")
            )));
        }
    }

    if let Some(min) = spec.min() {
        if measured(&field) < min {
            return Err(bound_violation(spec, ">=", min));
        }
    }
    if let Some(max) = spec.max() {
        if measured(&field) > max {
            return Err(bound_violation(spec, "<=", max));
        }
    }

    Ok(())
}

fn coerce(spec: &FieldSpec, field: &mut FieldMut<'_>, raw: &str) -> Result<(), ApiError> {
    match field {
        FieldMut::Int(value) => {
            **value = raw.parse().map_err(|_| {
                ApiError::bad_request(format!("{} must be int", spec.param_name()))
            })?;
        }
        FieldMut::Str(value) => **value = raw.to_string(),
    }
    Ok(())
}

fn assign_default(spec: &FieldSpec, field: &mut FieldMut<'_>, default: &str) -> Result<(), ApiError> {
    match field {
        FieldMut::Str(value) => **value = default.to_string(),
        FieldMut::Int(value) => {
            // schema build validated the default; a failure here means the
            // spec and the record disagree on the field's kind
            **value = default.parse().map_err(|_| {
                ApiError::internal(format!(
                    "default for `{}` is not an integer",
                    spec.param_name()
                ))
            })?;
        }
    }
    Ok(())
}

fn measured(field: &FieldMut<'_>) -> i64 {
    match field {
        FieldMut::Int(value) => **value,
        FieldMut::Str(value) => i64::try_from(value.len()).unwrap_or(i64::MAX),
    }
}

fn bound_violation(spec: &FieldSpec, op: &str, bound: i64) -> ApiError {
    let subject = match spec.kind() {
        FieldKind::Int => "",
        FieldKind::Str => " len",
    };
    ApiError::bad_request(format!(
        "{}{} must be {} {}",
        spec.param_name(),
        subject,
        op,
        bound
    ))
}
