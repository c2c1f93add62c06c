use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Registry of the regexes used to scrub log output.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// `scheme://user:password@` credentials inside connection strings
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn url_credentials() -> &'static Regex {
        static URL_CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?P<prefix>[A-Za-z][A-Za-z0-9+.-]*://[^:/@\s]+):[^@\s]+@").unwrap()
        });
        &URL_CREDENTIALS_REGEX
    }

    /// Email pattern: matches standard email addresses
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Long opaque runs: chat-platform account ids, hex or base64 tokens (16+ chars).
    /// `/` is left out so ports and paths next to it stay readable.
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn opaque_token() -> &'static Regex {
        static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+]{16,}={0,2}").unwrap()
        });
        &OPAQUE_TOKEN_REGEX
    }
}

/// Masks secrets and identifiers in free text before it reaches the logs.
///
/// Connection-string passwords become `***`, the local part of emails
/// keeps only its first character, and long opaque runs (account ids,
/// tokens) become `[REDACTED_TOKEN]`. Credentials are handled first so a
/// password never survives as part of an email match.
pub fn redact(input: &str) -> String {
    let creds = PiiRegexRegistry::url_credentials().replace_all(input, "$prefix:***@");

    let emails = PiiRegexRegistry::email().replace_all(&creds, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full_match.to_string(),
        }
    });

    PiiRegexRegistry::opaque_token()
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Displays the wrapped string through [`redact`].
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
