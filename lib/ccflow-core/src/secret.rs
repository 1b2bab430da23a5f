use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secure wrapper for sensitive string data that zeroes its memory on drop.
///
/// Used for the client secret; the value never shows up in `Debug` output and
/// `Display` only shows a masked form.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    ///
    /// The returned reference should not be stored for extended periods.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Masks sensitive data for display/logging purposes.
    fn mask_sensitive(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head: String = chars.iter().take(4).collect();
        let tail: String = chars.iter().skip(chars.len() - 4).collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecureString").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_redact_debug_output() {
        let secret = SecureString::from("super-secret-value");
        let debug_str = format!("{secret:?}");

        assert_eq!(debug_str, r#"SecureString("[REDACTED]")"#);
    }

    #[test]
    fn should_mask_long_values_on_display() {
        let secret = SecureString::from("abcdefghijklmnop");

        assert_eq!(secret.to_string(), "abcd...mnop");
    }

    #[test]
    fn should_fully_mask_short_values_on_display() {
        assert_eq!(SecureString::from("short").to_string(), "***");
        assert_eq!(SecureString::from("12345678").to_string(), "***");
    }

    #[test]
    fn should_mask_multibyte_values_without_panicking() {
        let secret = SecureString::from("ééééééééééé");

        assert_eq!(secret.to_string(), "éééé...éééé");
    }

    #[test]
    fn should_expose_inner_value() {
        let secret = SecureString::new("value".to_string());

        assert_eq!(secret.as_str(), "value");
        assert!(!secret.is_empty());
        assert!(SecureString::from("").is_empty());
    }
}
