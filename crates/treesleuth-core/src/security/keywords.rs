//! Fixed keyword list and the case-insensitive substring matcher.
//!
//! Matching is plain substring containment, so "key" also hits "keyboard".

/// Substrings that mark a directory name as potentially security-sensitive.
///
/// All entries are lowercase; names are lowercased before comparison.
pub const SECURITY_KEYWORDS: &[&str] = &[
    "secret",
    "private",
    "secure",
    "security",
    "password",
    "credential",
    "cert",
    "certificate",
    "key",
    "token",
    "auth",
    "oauth",
    "ssh",
    "ssl",
    "tls",
    "confidential",
    "sensitive",
    "restricted",
    ".env",
    "vault",
];

/// Return the first keyword contained in `name`, if any.
pub fn matched_keyword(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    SECURITY_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lower.contains(keyword))
}

/// `true` if `name` contains any security keyword (case-insensitive).
#[inline]
pub fn matches(name: &str) -> bool {
    matched_keyword(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_case_name_matches() {
        assert!(matches("MySecretFolder"));
        assert!(matches("SSH"));
        assert!(matches("Vault_backup"));
    }

    #[test]
    fn test_plain_names_do_not_match() {
        assert!(!matches("docs"));
        assert!(!matches("src"));
        assert!(!matches(""));
    }

    #[test]
    fn test_dotenv_keyword_includes_dot() {
        assert!(matches("app.env.d"));
        assert!(!matches("environment"));
    }

    #[test]
    fn test_first_keyword_is_reported() {
        // "certificates" also contains "certificate"; the earlier entry wins.
        assert_eq!(matched_keyword("Certificates"), Some("cert"));
        assert_eq!(matched_keyword("oauth-tokens"), Some("token"));
        assert_eq!(matched_keyword("readme"), None);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for keyword in SECURITY_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }
}
