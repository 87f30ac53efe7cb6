//! Stock attribute transforms
//!
//! Reusable parse/serialize building blocks for `AttributeSpec`. Every parse
//! transform rejects invalid input with a `ValidationError`; inside a render
//! hook that rejection becomes a render failure and triggers rollback.

use std::sync::Arc;

use crate::descriptor::{AttrValue, ParseFn, SerializeFn, ValidationError};

/// Integer within an inclusive range
pub fn int_in_range(min: i64, max: i64) -> ParseFn {
    Arc::new(move |raw| {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidationError::Invalid(format!("expected an integer, got <{raw}>")))?;
        if value < min || value > max {
            return Err(ValidationError::Invalid(format!(
                "expected an integer in [{min}, {max}], got {value}"
            )));
        }
        Ok(AttrValue::Int(value))
    })
}

/// Hour of day, 0 through 23
pub fn hour() -> ParseFn {
    int_in_range(0, 23)
}

/// Integer greater than or equal to zero
pub fn positive_integer() -> ParseFn {
    Arc::new(|raw| {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidationError::Invalid(format!("expected an integer, got <{raw}>")))?;
        if value < 0 {
            return Err(ValidationError::Invalid(format!(
                "expected a positive integer, got {value}"
            )));
        }
        Ok(AttrValue::Int(value))
    })
}

/// Percentage text (`"42.5%"` or bare `"42.5"`) to a float
pub fn percentage() -> ParseFn {
    Arc::new(|raw| {
        let trimmed = raw.replace('%', "");
        let trimmed = trimmed.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ValidationError::Invalid(format!("expected a percentage, got <{raw}>")))?;
        Ok(AttrValue::Float(value))
    })
}

/// Float back to two-decimal percentage text
pub fn to_percentage() -> SerializeFn {
    Arc::new(|value| {
        let number = value
            .as_f64()
            .ok_or_else(|| ValidationError::Invalid(format!("expected a number, got <{value:?}>")))?;
        Ok(format!("{number:.2}%"))
    })
}

/// Non-empty trimmed text
pub fn non_empty() -> ParseFn {
    Arc::new(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Invalid("expected non-empty text".to_string()));
        }
        Ok(AttrValue::Str(trimmed.to_string()))
    })
}
