//! Lenient numeric input.
//!
//! The admin panel historically posted numbers as strings, blanks or junk and
//! the catalog accepted all of it. Strict mode turns junk into a 400 instead.

use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Absent,
    Number(f64),
    Invalid,
}

impl Numeric {
    pub fn parse(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Numeric::Absent,
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .map_or(Numeric::Invalid, Numeric::Number),
            Some(Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Numeric::Absent;
                }
                // Decimal commas come from pt-BR keyboards.
                s.replace(',', ".")
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map_or(Numeric::Invalid, Numeric::Number)
            }
            Some(_) => Numeric::Invalid,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Number(v) => Some(v),
            Numeric::Absent | Numeric::Invalid => None,
        }
    }
}

/// How non-numeric or negative product figures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericPolicy {
    pub strict: bool,
}

impl NumericPolicy {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// `Ok(None)` means "use the default / previous value".
    pub fn decimal(&self, field: &str, value: Option<&Value>) -> AppResult<Option<f64>> {
        match Numeric::parse(value) {
            Numeric::Absent => Ok(None),
            Numeric::Number(v) if v >= 0.0 => Ok(Some(v)),
            Numeric::Number(v) => {
                if self.strict {
                    return Err(AppError::validation(format!("{field} não pode ser negativo")));
                }
                tracing::debug!(field, value = v, "negative value clamped to zero");
                Ok(Some(0.0))
            }
            Numeric::Invalid => {
                if self.strict {
                    return Err(AppError::validation(format!("{field} deve ser numérico")));
                }
                tracing::debug!(field, "non-numeric value ignored");
                Ok(None)
            }
        }
    }

    /// Whole units; fractional input is truncated the way `parseInt` did.
    pub fn integer(&self, field: &str, value: Option<&Value>) -> AppResult<Option<i32>> {
        Ok(self
            .decimal(field, value)?
            .map(|v| v.trunc().min(f64::from(i32::MAX)) as i32))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(Numeric::parse(Some(&json!(12.5))), Numeric::Number(12.5));
        assert_eq!(Numeric::parse(Some(&json!(" 80 "))), Numeric::Number(80.0));
        assert_eq!(Numeric::parse(Some(&json!("62,5"))), Numeric::Number(62.5));
    }

    #[test]
    fn blanks_are_absent_and_junk_is_invalid() {
        assert_eq!(Numeric::parse(None), Numeric::Absent);
        assert_eq!(Numeric::parse(Some(&Value::Null)), Numeric::Absent);
        assert_eq!(Numeric::parse(Some(&json!(""))), Numeric::Absent);
        assert_eq!(Numeric::parse(Some(&json!("abc"))), Numeric::Invalid);
        assert_eq!(Numeric::parse(Some(&json!(true))), Numeric::Invalid);
    }

    #[test]
    fn lenient_policy_ignores_junk_and_clamps_negatives() {
        let policy = NumericPolicy::new(false);

        assert_eq!(policy.decimal("custo", Some(&json!("abc"))).unwrap(), None);
        assert_eq!(policy.decimal("custo", Some(&json!(-3))).unwrap(), Some(0.0));
        assert_eq!(policy.integer("estoque", Some(&json!("7.9"))).unwrap(), Some(7));
    }

    #[test]
    fn strict_policy_rejects_junk() {
        let policy = NumericPolicy::new(true);

        assert!(matches!(
            policy.decimal("preco", Some(&json!("abc"))),
            Err(AppError::Validation(_))
        ));
        assert!(policy.decimal("preco", Some(&json!(-1))).is_err());
        assert_eq!(policy.decimal("preco", None).unwrap(), None);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(80.0 * 1.625), 130.0);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }
}
