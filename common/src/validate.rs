use thiserror::Error;

/// Why a user-supplied field was rejected. All of these are recoverable;
/// callers re-prompt or abort the current operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must contain only letters and spaces")]
    InvalidName,
    #[error("phone must be digits only, at most 15 characters")]
    InvalidPhone,
    #[error("player count must be at least 1")]
    InvalidPlayerCount,
}

/// A name is valid when, spaces aside, it is non-empty and entirely
/// alphabetic. Compound names such as "Jose Maria" pass.
pub fn valid_name(name: &str) -> bool {
    let mut saw_letter = false;
    for c in name.chars() {
        if c == ' ' {
            continue;
        }
        if !c.is_alphabetic() {
            return false;
        }
        saw_letter = true;
    }
    saw_letter
}

/// A phone number is valid when it is 1 to 15 ASCII digits.
pub fn valid_phone(phone: &str) -> bool {
    !phone.is_empty() && phone.len() <= 15 && phone.chars().all(|c| c.is_ascii_digit())
}
