//! Input validation shared by the unauthenticated pages.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

pub(crate) const EMAIL_REQUIRED: &str = "Enter a valid email address.";
pub(crate) const PASSWORD_REQUIRED: &str = "Enter your password.";

/// Trim `raw` and require a `local@domain` shape.
pub(crate) fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_owned())
        }
        _ => Err(EMAIL_REQUIRED),
    }
}

/// Validate an email + password pair. Passwords are not trimmed.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    Ok((email, password.to_owned()))
}
