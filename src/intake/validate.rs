//! Field validators and reserved-token matching for applicant input.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Any Unicode decimal digit.
static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// Minimum digits for a phone number to be accepted.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Messages that restart the application from any stage.
pub const RESET_COMMANDS: &[&str] = &["restart", "start over", "reset", "new application"];

/// Resume-stage replies meaning "no resume".
pub const RESUME_SKIP_TOKENS: &[&str] = &["skip", "n/a", "none"];

/// Addendum-stage replies meaning "nothing to add".
pub const ADDENDUM_SKIP_TOKENS: &[&str] = &["done", "no", "nothing", "skip"];

/// Whole-message, case-insensitive match against a token list.
pub fn is_token(message: &str, tokens: &[&str]) -> bool {
    let normalized = message.trim().to_lowercase();
    tokens.iter().any(|t| *t == normalized)
}

pub fn is_reset_command(message: &str) -> bool {
    is_token(message, RESET_COMMANDS)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Count of decimal digits in any script, ignoring spaces, dashes, brackets
/// and the like.
pub fn phone_digit_count(phone: &str) -> usize {
    DIGIT_RE.find_iter(phone).count()
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_digit_count(phone) >= MIN_PHONE_DIGITS
}

/// Returns the trimmed, title-cased name, or `None` if it is too short.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.chars().count() < 2 {
        return None;
    }
    Some(title_case(trimmed))
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
///
/// "mary-jane o'neil" becomes "Mary-Jane O'Neil".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
