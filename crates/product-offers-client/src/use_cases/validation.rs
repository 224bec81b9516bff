use chrono::NaiveDate;

use crate::entities::{parse_calendar_date, FormState, ProductType};
use crate::error::ValidationError;

/// A field that must not be blank
pub(crate) fn required<'a>(
    form: &'a FormState,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    let value = form.get(field);
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// The field must read as a number greater than zero. The value sent is its
/// leading run of digits, so `2.9` becomes 2 and `1e2` becomes 1; a value
/// whose leading digits are zero or overflow `Int` is rejected.
pub(crate) fn page_size(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    let number: f64 = raw.parse().map_err(|_| ValidationError::InvalidPageSize)?;
    if !number.is_finite() || number <= 0.0 {
        return Err(ValidationError::InvalidPageSize);
    }

    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    match unsigned[..end].parse::<i32>() {
        Ok(whole) if whole >= 1 => Ok(whole),
        _ => Err(ValidationError::InvalidPageSize),
    }
}

pub(crate) fn calendar_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    parse_calendar_date(raw).ok_or(ValidationError::InvalidDate)
}

pub(crate) fn inventory(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInventory)
}

pub(crate) fn product_type(raw: &str) -> Result<ProductType, ValidationError> {
    raw.trim().parse()
}
