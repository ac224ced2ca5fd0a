//! Utility functions and types.

use std::fmt::Debug;

/// Redact wraps a secret so its Debug output leaks at most the first and last
/// three characters.
///
/// Strings shorter than 12 characters are redacted entirely, since showing
/// their edges would leave too little hidden. The partial output still lets
/// operators tell two redacted values apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or(""))
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => {
                f.write_str(&self.0[..3])?;
                f.write_str("***")?;
                f.write_str(&self.0[n - 3..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        assert_eq!(format!("{:?}", Redact::from("")), "EMPTY");
        assert_eq!(format!("{:?}", Redact::from("hunter2")), "***");
        assert_eq!(format!("{:?}", Redact::from("elevenchars")), "***");
        assert_eq!(format!("{:?}", Redact::from("GOOG1ATESTKEYID")), "GOO***YID");

        let secret = Some("testsecretkey".to_string());
        assert_eq!(format!("{:?}", Redact::from(&secret)), "tes***key");

        let missing: Option<String> = None;
        assert_eq!(format!("{:?}", Redact::from(&missing)), "EMPTY");
    }
}
