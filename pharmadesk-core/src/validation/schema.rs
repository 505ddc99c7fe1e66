use serde_json::{Map, Value};

use super::{FieldError, Rule, RuleCode};
use crate::form::{FormValue, FormValues};

/// Target shape of a field once coerced for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
}

/// Which rule set of an entity to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Full required-field enforcement.
    Create,
    /// Partial update: every field optional, only present fields checked.
    Update,
}

/// Constraint set for a single field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    blank_is_absent: bool,
    submit: bool,
    verbatim: bool,
    transform: Option<fn(&str) -> String>,
    rules: Vec<Rule>,
}

impl FieldSpec {
    /// A field that must be present. Blank text counts as present.
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            blank_is_absent: false,
            submit: true,
            verbatim: false,
            transform: None,
            rules: Vec::new(),
        }
    }

    /// A field that may be omitted. Blank text counts as absent.
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            blank_is_absent: true,
            submit: true,
            verbatim: false,
            transform: None,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validated but never part of the outgoing payload.
    pub fn local_only(mut self) -> Self {
        self.submit = false;
        self
    }

    /// Keep text exactly as typed instead of trimming it (passwords).
    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    /// Rewrite trimmed text before any rule runs, e.g. upper-casing a tax id.
    pub fn transform(mut self, f: fn(&str) -> String) -> Self {
        self.transform = Some(f);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_submitted(&self) -> bool {
        self.submit
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The present, non-absent value of this field in `form`, if any.
    fn present<'f>(&self, form: &'f FormValues) -> Option<&'f FormValue> {
        form.get(self.name)
            .filter(|v| !(self.blank_is_absent && v.is_blank()))
    }

    /// The value rules see and coercion submits: text trimmed unless
    /// verbatim, then transformed.
    fn normalize(&self, value: &FormValue) -> FormValue {
        let FormValue::Text(raw) = value else {
            return value.clone();
        };
        let text = if self.verbatim { raw.as_str() } else { raw.trim() };
        FormValue::Text(match self.transform {
            Some(f) => f(text),
            None => text.to_string(),
        })
    }
}

/// Ordered set of field constraints for one entity form.
///
/// ```ignore
/// let create = Schema::new("role")
///     .field(FieldSpec::required("name", FieldKind::Text).rule(Rule::MinLength(2)))
///     .field(FieldSpec::optional("description", FieldKind::Text));
/// let update = create.partial();
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Derive the partial-update rule set: all fields optional, rules kept.
    pub fn partial(&self) -> Schema {
        Schema {
            name: self.name,
            fields: self
                .fields
                .iter()
                .cloned()
                .map(|mut f| {
                    f.required = false;
                    f
                })
                .collect(),
        }
    }

    /// Copy of this schema without the named field.
    pub fn without(&self, name: &str) -> Schema {
        Schema {
            name: self.name,
            fields: self
                .fields
                .iter()
                .filter(|f| f.name != name)
                .cloned()
                .collect(),
        }
    }

    /// Evaluate every rule. Reports at most one error per field, in schema order.
    pub fn check(&self, form: &FormValues) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for spec in &self.fields {
            let Some(raw) = spec.present(form) else {
                if spec.required && !form.contains(spec.name) {
                    errors.push(FieldError::new(spec.name, RuleCode::Required, "is required"));
                }
                continue;
            };
            let value = spec.normalize(raw);

            let failed = spec
                .rules
                .iter()
                .find_map(|rule| rule.evaluate(&value, form).err().map(|msg| (rule.code(), msg)));
            match failed {
                Some((code, message)) => errors.push(FieldError::new(spec.name, code, message)),
                None => {
                    if let Err(message) = convert(spec.kind, &value) {
                        errors.push(FieldError::new(spec.name, RuleCode::TypeMismatch, message));
                    }
                }
            }
        }
        errors
    }

    /// Apply defaulting and coercion: blank optionals and unknown or
    /// local-only fields are dropped, text is normalized exactly as
    /// [`check`](Self::check) saw it and converted to the field kind.
    pub fn coerce(&self, form: &FormValues) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut out = Map::new();
        let mut errors = Vec::new();
        for spec in self.fields.iter().filter(|f| f.submit) {
            let Some(raw) = spec.present(form) else {
                continue;
            };
            match convert(spec.kind, &spec.normalize(raw)) {
                Ok(json) => {
                    out.insert(spec.name.to_string(), json);
                }
                Err(message) => {
                    errors.push(FieldError::new(spec.name, RuleCode::TypeMismatch, message))
                }
            }
        }
        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }

    /// [`check`](Self::check) then [`coerce`](Self::coerce).
    pub fn validate(&self, form: &FormValues) -> Result<Map<String, Value>, Vec<FieldError>> {
        let errors = self.check(form);
        if !errors.is_empty() {
            tracing::debug!(schema = self.name, errors = errors.len(), "form rejected");
            return Err(errors);
        }
        self.coerce(form)
    }
}

fn convert(kind: FieldKind, value: &FormValue) -> Result<Value, String> {
    match (kind, value) {
        (FieldKind::Text, FormValue::Text(s)) => Ok(Value::String(s.clone())),
        (FieldKind::Text, FormValue::Integer(i)) => Ok(Value::String(i.to_string())),
        (FieldKind::Integer, FormValue::Integer(i)) => Ok(Value::from(*i)),
        (FieldKind::Integer, FormValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| "expected an integer".to_string()),
        (FieldKind::Bool, FormValue::Bool(b)) => Ok(Value::Bool(*b)),
        (FieldKind::Bool, FormValue::Text(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err("expected true or false".to_string()),
        },
        (kind, other) => Err(format!(
            "expected {}, got {}",
            match kind {
                FieldKind::Text => "text",
                FieldKind::Integer => "an integer",
                FieldKind::Bool => "a boolean",
            },
            other.kind_name()
        )),
    }
}
