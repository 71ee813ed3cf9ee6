//! API key lookup.

/// Environment variables checked for the API key, in order.
pub const CREDENTIAL_ENV_VARS: &[&str] = &["GOOGLE_API_KEY", "API_KEY"];

/// Resolve a `${ENV_VAR}` reference; other non-empty strings pass through.
fn resolve_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        lookup(var_name)
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Pick the API key: the configured value first, then each of
/// [`CREDENTIAL_ENV_VARS`]. Blank values are skipped.
pub(crate) fn resolve_credential(
    configured: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    non_blank(resolve_with(configured.trim(), &lookup)).or_else(|| {
        CREDENTIAL_ENV_VARS
            .iter()
            .find_map(|name| non_blank(lookup(*name)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_with() {
        let lookup = env(&[("SET_KEY", "v")]);
        // Non-env-var strings pass through
        assert_eq!(resolve_with("plain-key", &lookup), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_with("", &lookup), None);
        assert_eq!(resolve_with("${SET_KEY}", &lookup), Some("v".to_string()));
        // Unset env var returns None
        assert_eq!(resolve_with("${DEFINITELY_NOT_SET_XYZ_123}", &lookup), None);
    }

    #[test]
    fn google_api_key_wins_over_api_key() {
        let lookup = env(&[("GOOGLE_API_KEY", "g-key"), ("API_KEY", "a-key")]);
        assert_eq!(resolve_credential("", lookup), Some("g-key".to_string()));
    }

    #[test]
    fn falls_back_to_api_key() {
        let lookup = env(&[("API_KEY", "a-key")]);
        assert_eq!(resolve_credential("", lookup), Some("a-key".to_string()));
    }

    #[test]
    fn blank_google_api_key_is_skipped() {
        let lookup = env(&[("GOOGLE_API_KEY", "   "), ("API_KEY", "a-key")]);
        assert_eq!(resolve_credential("", lookup), Some("a-key".to_string()));
    }

    #[test]
    fn configured_key_wins() {
        let lookup = env(&[("GOOGLE_API_KEY", "g-key")]);
        assert_eq!(
            resolve_credential("from-config", lookup),
            Some("from-config".to_string())
        );
    }

    #[test]
    fn configured_reference_is_expanded() {
        let lookup = env(&[("MY_GEMINI_KEY", "ref-key"), ("GOOGLE_API_KEY", "g-key")]);
        assert_eq!(
            resolve_credential("${MY_GEMINI_KEY}", lookup),
            Some("ref-key".to_string())
        );
    }

    #[test]
    fn unresolved_reference_falls_through_to_env() {
        let lookup = env(&[("API_KEY", "a-key")]);
        assert_eq!(
            resolve_credential("${MISSING_KEY}", lookup),
            Some("a-key".to_string())
        );
    }

    #[test]
    fn nothing_set_is_none() {
        assert_eq!(resolve_credential("", env(&[])), None);
    }
}
