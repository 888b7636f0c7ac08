//! Input validation for goal creation and balance drafts.
//!
//! Everything here runs before a request is built, so a rejected input never
//! reaches the Goal Service.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::goals_model::{NewGoal, NewGoalForm};
use crate::constants::DATE_FORMAT;
use crate::errors::ValidationError;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_TARGET_AMOUNT: &str = "target_amount";
pub const FIELD_CURRENT_AMOUNT: &str = "current_amount";
pub const FIELD_TARGET_DATE: &str = "target_date";

/// Parses a typed amount. Accepts plain and scientific notation
/// (`1500`, `-12.5`, `.5`, `1e3`); rejects empty input, digit separators
/// and anything else that is not a decimal literal. Literals too large for
/// a money amount are reported as out of range.
pub fn parse_amount(field: &'static str, text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    let (mantissa, exponent) = split_literal(trimmed).ok_or_else(|| ValidationError::NotANumber {
        field,
        value: text.to_string(),
    })?;

    Decimal::from_str(&mantissa)
        .ok()
        .and_then(|m| scale_by_power_of_ten(m, exponent))
        .ok_or_else(|| ValidationError::OutOfRange {
            field,
            value: text.to_string(),
        })
}

/// Splits a decimal literal into a canonical mantissa (`[-]int.frac`) and
/// its exponent. Returns `None` for anything that is not a literal.
fn split_literal(text: &str) -> Option<(String, i64)> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };

    let sign = if mantissa.starts_with('-') { "-" } else { "" };
    let digits = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }

    let exponent = match exponent {
        None => 0,
        Some(e) => {
            let body = e.strip_prefix(['+', '-']).unwrap_or(e);
            if body.is_empty() || !all_digits(body) {
                return None;
            }
            // Saturate: any exponent this large overflows or underflows anyway.
            e.parse::<i64>()
                .unwrap_or(if e.starts_with('-') { i64::MIN } else { i64::MAX })
        }
    };

    let int = if int.is_empty() { "0" } else { int };
    let frac = if frac.is_empty() { "0" } else { frac };
    Some((format!("{sign}{int}.{frac}"), exponent))
}

/// `value * 10^exponent`, or `None` when the result does not fit.
fn scale_by_power_of_ten(mut value: Decimal, exponent: i64) -> Option<Decimal> {
    if value.is_zero() {
        return Some(value);
    }
    // Past 64 steps a non-zero value has already overflowed or reached zero.
    let steps = exponent.unsigned_abs().min(64);
    for _ in 0..steps {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value)
}

/// Parses a balance draft into a non-negative amount.
pub fn parse_balance_draft(draft: &str) -> Result<Decimal, ValidationError> {
    let amount = parse_amount(FIELD_CURRENT_AMOUNT, draft)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative(FIELD_CURRENT_AMOUNT));
    }
    Ok(amount)
}

pub fn parse_target_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(FIELD_TARGET_DATE));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field: FIELD_TARGET_DATE,
        value: text.to_string(),
    })
}

/// Checks a create payload. The target date may be today but not earlier.
pub fn validate_new_goal(new_goal: &NewGoal, today: NaiveDate) -> Result<(), ValidationError> {
    if new_goal.title.trim().is_empty() {
        return Err(ValidationError::MissingField(FIELD_TITLE));
    }
    if new_goal.target_amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(FIELD_TARGET_AMOUNT));
    }
    if new_goal.current_amount < Decimal::ZERO {
        return Err(ValidationError::Negative(FIELD_CURRENT_AMOUNT));
    }
    if new_goal.target_date < today {
        return Err(ValidationError::DateInPast {
            field: FIELD_TARGET_DATE,
            date: new_goal.target_date,
        });
    }
    Ok(())
}

impl NewGoalForm {
    /// Turns raw form input into a create payload, checking fields in form
    /// order (title, amount, date).
    pub fn validate(&self, today: NaiveDate) -> Result<NewGoal, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField(FIELD_TITLE));
        }
        let target_amount = parse_amount(FIELD_TARGET_AMOUNT, &self.target_amount)?;
        let target_date = parse_target_date(&self.target_date)?;

        let new_goal = NewGoal::new(title, target_amount, target_date);
        validate_new_goal(&new_goal, today)?;
        Ok(new_goal)
    }
}
