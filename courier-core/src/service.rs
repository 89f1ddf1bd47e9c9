//! Service name canonicalization.
//!
//! Inbound identifiers arrive in whatever casing the transport supplied
//! (`"facebook"`, `"FACEBOOK"`, ...). Lookups use the *capitalize* rule:
//! the first character is upper-cased and every following character is
//! lower-cased. Nothing else is touched: no trimming, no word splitting.
//! Registrations are keyed by names already in this form.

/// Canonicalize a service identifier for lookup.
///
/// ```rust
/// use courier_core::canonicalize;
///
/// assert_eq!(canonicalize("facebook"), "Facebook");
/// assert_eq!(canonicalize("FACEBOOK"), "Facebook");
/// assert_eq!(canonicalize("unknown_channel"), "Unknown_channel");
/// assert_eq!(canonicalize(""), "");
/// ```
pub fn canonicalize(service: &str) -> String {
    let mut chars = service.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Whether `name` is already in canonical form.
pub fn is_canonical(name: &str) -> bool {
    canonicalize(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalizes_first_and_lowers_rest() {
        assert_eq!(canonicalize("facebook"), "Facebook");
        assert_eq!(canonicalize("Facebook"), "Facebook");
        assert_eq!(canonicalize("fAcEbOoK"), "Facebook");
        assert_eq!(canonicalize("SMS"), "Sms");
    }

    #[test]
    fn test_no_multi_word_handling() {
        // Multi-word names collapse, they are not camel-cased.
        assert_eq!(canonicalize("WeChat"), "Wechat");
        assert_eq!(canonicalize("google_chat"), "Google_chat");
        assert_eq!(canonicalize("alexa skill"), "Alexa skill");
    }

    #[test]
    fn test_no_trimming() {
        assert_eq!(canonicalize(" facebook"), " facebook");
        assert_eq!(canonicalize("facebook "), "Facebook ");
    }

    #[test]
    fn test_empty_and_non_ascii() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("éLAN"), "Élan");
        assert_eq!(canonicalize("1ST"), "1st");
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("Facebook"));
        assert!(is_canonical("Unknown_channel"));
        assert!(is_canonical(""));
        assert!(!is_canonical("facebook"));
        assert!(!is_canonical("WeChat"));
    }
}
