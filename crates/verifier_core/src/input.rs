use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no email addresses supplied")]
pub struct EmptyInputError;

/// Splits raw text into one candidate address per non-blank line.
///
/// Lines are trimmed and kept in their original order. Duplicates and
/// malformed addresses pass through untouched; the service judges them.
pub fn normalize_input(raw: &str) -> Result<Vec<String>, EmptyInputError> {
    let emails: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if emails.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(emails)
}
