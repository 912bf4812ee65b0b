//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. Every engine
//! operation runs its input through them before touching the database, so
//! malformed requests surface as [`EngineError::InvalidInput`].

use std::sync::LazyLock;

use regex::Regex;

use crate::{EngineError, ResultEngine};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Brazilian mobile number, masked: `(DD) 9XXXX-XXXX`.
static MOBILE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\([1-9][0-9]\) 9[0-9]{4}-[0-9]{4}$"));

/// Masked postal code: `NNNNN-NNN`.
static MASKED_CEP: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{5}-[0-9]{3}$"));

#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

const STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub(crate) const MIN_PASSWORD_LEN: usize = 6;
pub(crate) const MIN_NAME_LEN: usize = 3;

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput(message.into())
}

pub(crate) fn email(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if !EMAIL.is_match(trimmed) {
        return Err(invalid("email must be a valid address"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn password(value: &str) -> ResultEngine<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Trim `value` and reject it when empty.
pub(crate) fn required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn person_name(value: &str) -> ResultEngine<String> {
    let name = required_text(value, "name")?;
    if name.chars().count() < MIN_NAME_LEN {
        return Err(invalid(format!(
            "name must have at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

/// Unmasked CPF (11 digits) with valid check digits.
pub(crate) fn cpf(value: &str) -> ResultEngine<String> {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 || value.len() != 11 {
        return Err(invalid("cpf must have 11 digits without mask"));
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(invalid("cpf is not valid"));
    }

    let check_digit = |len: usize| -> u32 {
        let weight_start = len as u32 + 1;
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };

    if check_digit(9) != digits[9] || check_digit(10) != digits[10] {
        return Err(invalid("cpf is not valid"));
    }
    Ok(value.to_string())
}

pub(crate) fn mobile_phone(value: &str) -> ResultEngine<String> {
    if !MOBILE_PHONE.is_match(value) {
        return Err(invalid("phone must be a masked mobile number: (DD) 9XXXX-XXXX"));
    }
    Ok(value.to_string())
}

pub(crate) fn masked_cep(value: &str) -> ResultEngine<String> {
    if !MASKED_CEP.is_match(value) {
        return Err(invalid("cep must be masked: NNNNN-NNN"));
    }
    Ok(value.to_string())
}

/// Digits of a postal code, masked or not. `None` unless exactly 8 digits.
pub(crate) fn cep_digits(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits: String = trimmed.chars().filter(|c| *c != '-').collect();
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if trimmed.contains('-') && !MASKED_CEP.is_match(trimmed) {
        return None;
    }
    Some(digits)
}

pub(crate) fn state(value: &str) -> ResultEngine<String> {
    if !STATES.contains(&value) {
        return Err(invalid(format!("{value} is not a brazilian state")));
    }
    Ok(value.to_string())
}

/// Optional free text: blank values are stored as `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Card number: ASCII digits only, at least 13 of them.
pub(crate) fn card_number(value: &str) -> ResultEngine<&str> {
    if value.len() < 13 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("card number must have at least 13 digits"));
    }
    Ok(value)
}

pub(crate) fn positive_id(value: i32, label: &str) -> ResultEngine<i32> {
    if value <= 0 {
        return Err(invalid(format!("{label} must be a positive integer")));
    }
    Ok(value)
}
