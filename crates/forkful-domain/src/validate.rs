//! Field bounds shared by the HTTP boundary and batch import glue.

pub const TAG_NAME_MAX: usize = 32;
pub const TAG_SLUG_MAX: usize = 32;
pub const INGREDIENT_NAME_MAX: usize = 128;
pub const MEASUREMENT_UNIT_MAX: usize = 64;
pub const RECIPE_NAME_MAX: usize = 256;
pub const RECIPE_TEXT_MAX: usize = 256;
pub const COOKING_TIME_MIN: i32 = 1;
pub const COOKING_TIME_MAX: i32 = 32000;
pub const AMOUNT_MIN: i32 = 1;
pub const AMOUNT_MAX: i32 = 32000;
pub const EMAIL_MAX: usize = 254;
pub const USERNAME_MAX: usize = 150;
pub const PERSON_NAME_MAX: usize = 150;

pub fn cooking_time_in_bounds(value: i32) -> bool {
    (COOKING_TIME_MIN..=COOKING_TIME_MAX).contains(&value)
}

pub fn amount_in_bounds(value: i32) -> bool {
    (AMOUNT_MIN..=AMOUNT_MAX).contains(&value)
}

/// Validate a username: 1–150 chars, each alphanumeric or one of `.@+-_`.
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.len() > USERNAME_MAX {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

/// Validate an email address: bounded length with a non-empty local part
/// and domain. Full RFC conformance is the auth gateway's problem.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
