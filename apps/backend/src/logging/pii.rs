use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// The patterns below are literals exercised by the tests in this module.

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Compact JWS: three base64url segments joined by dots.
static JWT_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

/// Modular-crypt bcrypt hash, e.g. `$2b$10$` followed by 53 chars.
static BCRYPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\$2[abxy]?\$\d{2}\$[./A-Za-z0-9]{53}").unwrap()
});

/// Mask emails (first character of the local part kept), bearer tokens and
/// password hashes. Tokens and hashes go first so an email-looking fragment
/// inside them is not half-masked.
pub fn redact(input: &str) -> String {
    let no_hashes = BCRYPT_REGEX.replace_all(input, "[REDACTED_HASH]");
    let no_tokens = JWT_REGEX.replace_all(&no_hashes, "[REDACTED_TOKEN]");

    EMAIL_REGEX
        .replace_all(&no_tokens, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.find('@') {
                Some(0) | None => full.to_string(),
                Some(at) => {
                    let first = &full[..1];
                    format!("{first}***{}", &full[at..])
                }
            }
        })
        .into_owned()
}

/// Display wrapper that redacts when formatted, for use in `tracing` fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
