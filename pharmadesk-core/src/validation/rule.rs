use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use garde::Validate;
use regex::Regex;

use super::RuleCode;
use crate::form::{FormValue, FormValues};

/// A single declarative constraint on a field.
///
/// Rules only ever see present values: absence is decided by the owning
/// [`FieldSpec`](super::FieldSpec) before any rule runs.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Trimmed length must be at least `n` characters.
    MinLength(usize),
    /// Must be a syntactically valid email address.
    Email,
    /// Must be an integer >= 1.
    PositiveInteger,
    /// Must be one of the listed literals.
    OneOf(&'static [&'static str]),
    Pattern {
        regex: &'static LazyLock<Regex>,
        message: &'static str,
    },
    /// ISO-8601 date, local date-time, or RFC 3339 timestamp.
    IsoDateTime,
    /// Must equal the value of another field in the same form.
    SameAs(&'static str),
}

#[derive(Validate)]
struct EmailAddress {
    #[garde(email)]
    value: String,
}

impl Rule {
    pub fn code(&self) -> RuleCode {
        match self {
            Rule::MinLength(_) => RuleCode::MinLength,
            Rule::Email => RuleCode::EmailFormat,
            Rule::PositiveInteger => RuleCode::PositiveInteger,
            Rule::OneOf(_) => RuleCode::OneOf,
            Rule::Pattern { .. } => RuleCode::Pattern,
            Rule::IsoDateTime => RuleCode::IsoDatetime,
            Rule::SameAs(_) => RuleCode::Mismatch,
        }
    }

    /// Evaluate against a present value. `form` gives access to sibling fields.
    pub fn evaluate(&self, value: &FormValue, form: &FormValues) -> Result<(), String> {
        match self {
            Rule::MinLength(min) => {
                let len = display(value).trim().chars().count();
                if len < *min {
                    Err(format!("must be at least {min} characters long"))
                } else {
                    Ok(())
                }
            }
            Rule::Email => {
                let candidate = EmailAddress {
                    value: display(value).trim().to_string(),
                };
                candidate
                    .validate()
                    .map_err(|_| "must be a valid email address".to_string())
            }
            Rule::PositiveInteger => match value {
                FormValue::Integer(i) if *i >= 1 => Ok(()),
                FormValue::Text(s) if s.trim().parse::<i64>().is_ok_and(|i| i >= 1) => Ok(()),
                _ => Err("must be a positive integer".to_string()),
            },
            Rule::OneOf(options) => {
                let text = display(value);
                if options.contains(&text.trim()) {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", options.join(", ")))
                }
            }
            Rule::Pattern { regex, message } => {
                if regex.is_match(display(value).trim()) {
                    Ok(())
                } else {
                    Err((*message).to_string())
                }
            }
            Rule::IsoDateTime => {
                if is_iso_datetime(display(value).trim()) {
                    Ok(())
                } else {
                    Err("must be an ISO-8601 date or date-time".to_string())
                }
            }
            Rule::SameAs(other) => {
                if form.get(other) == Some(value) {
                    Ok(())
                } else {
                    Err(format!("must match {other}"))
                }
            }
        }
    }
}

fn display(value: &FormValue) -> String {
    match value {
        FormValue::Text(s) => s.clone(),
        FormValue::Integer(i) => i.to_string(),
        FormValue::Bool(b) => b.to_string(),
    }
}

fn is_iso_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIVE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").unwrap());

    fn eval(rule: Rule, value: impl Into<FormValue>) -> Result<(), String> {
        rule.evaluate(&value.into(), &FormValues::new())
    }

    #[test]
    fn min_length_uses_trimmed_length() {
        assert!(eval(Rule::MinLength(2), "ab").is_ok());
        assert!(eval(Rule::MinLength(2), " a ").is_err());
        assert!(eval(Rule::MinLength(2), "a").is_err());
    }

    #[test]
    fn email_grammar() {
        assert!(eval(Rule::Email, "ana@farmacia.mx").is_ok());
        assert!(eval(Rule::Email, "not-an-email").is_err());
        assert!(eval(Rule::Email, "").is_err());
    }

    #[test]
    fn positive_integer_accepts_numeric_text() {
        assert!(eval(Rule::PositiveInteger, 1i64).is_ok());
        assert!(eval(Rule::PositiveInteger, " 7 ").is_ok());
        assert!(eval(Rule::PositiveInteger, 0i64).is_err());
        assert!(eval(Rule::PositiveInteger, "-3").is_err());
        assert!(eval(Rule::PositiveInteger, "3.5").is_err());
        assert!(eval(Rule::PositiveInteger, true).is_err());
    }

    #[test]
    fn one_of_and_pattern() {
        assert!(eval(Rule::OneOf(&["low", "high"]), "low").is_ok());
        assert!(eval(Rule::OneOf(&["low", "high"]), "medium").is_err());
        let rule = Rule::Pattern {
            regex: &FIVE_DIGITS,
            message: "must be 5 digits",
        };
        assert!(eval(rule.clone(), "06600").is_ok());
        assert_eq!(eval(rule, "6600").unwrap_err(), "must be 5 digits");
    }

    #[test]
    fn iso_datetime_variants() {
        assert!(eval(Rule::IsoDateTime, "2024-05-01").is_ok());
        assert!(eval(Rule::IsoDateTime, "2024-05-01T10:30:00").is_ok());
        assert!(eval(Rule::IsoDateTime, "2024-05-01T10:30:00.123456").is_ok());
        assert!(eval(Rule::IsoDateTime, "2024-05-01T10:30:00Z").is_ok());
        assert!(eval(Rule::IsoDateTime, "01/05/2024").is_err());
    }

    #[test]
    fn same_as_compares_sibling() {
        let form = FormValues::new().with("password", "secreto123");
        let rule = Rule::SameAs("password");
        assert!(rule.evaluate(&"secreto123".into(), &form).is_ok());
        assert!(rule.evaluate(&"otro".into(), &form).is_err());
    }
}
