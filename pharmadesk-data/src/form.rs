use pharmadesk_core::{FieldError, FormValues, RuleCode, Schema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::entity::Entity;

/// Validate `form` against `schema` and decode the coerced values into a
/// typed writable payload.
pub fn to_payload<P: DeserializeOwned>(
    schema: &Schema,
    form: &FormValues,
) -> Result<P, Vec<FieldError>> {
    let values = schema.validate(form)?;
    serde_json::from_value::<P>(Value::Object(values.clone())).map_err(|e| {
        let field = blame::<P>(&values).unwrap_or(schema.name());
        tracing::warn!(schema = schema.name(), field, error = %e, "coerced form did not decode");
        vec![FieldError::new(field, RuleCode::TypeMismatch, e.to_string())]
    })
}

/// The field whose value stops `values` from decoding: dropping it either
/// fixes the decode or only leaves the field missing.
fn blame<'v, P: DeserializeOwned>(values: &'v Map<String, Value>) -> Option<&'v str> {
    values.keys().map(String::as_str).find(|key| {
        let mut rest = values.clone();
        rest.remove(*key);
        match serde_json::from_value::<P>(Value::Object(rest)) {
            Ok(_) => true,
            Err(e) => e.to_string().starts_with(&format!("missing field `{key}`")),
        }
    })
}

/// Form state for editing `entity`.
pub fn from_entity<E: Entity>(entity: &E) -> FormValues {
    entity.to_form()
}

/// `None` for absent or blank text.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "snake_case")]
    #[allow(dead_code)]
    enum Shelf {
        Front,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Placement {
        label: String,
        shelf: Shelf,
    }

    #[test]
    fn decode_failure_names_the_offending_field() {
        let schema = Schema::new("placement")
            .field(FieldSpec::required("label", FieldKind::Text).rule(Rule::MinLength(2)))
            .field(FieldSpec::required("shelf", FieldKind::Text).rule(Rule::OneOf(&["front", "back"])));
        let form = FormValues::new().with("label", "Caja").with("shelf", "back");

        let errors = to_payload::<Placement>(&schema, &form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "shelf");
        assert_eq!(errors[0].code, RuleCode::TypeMismatch);
    }
}
