//! Domain name normalization and splitting.

use crate::errors::WhoisError;

/// Subdomain label and registrable root of a normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: Option<String>,
    pub root_domain: String,
}

/// Strip an optional `http://`/`https://` scheme, a following `www.` and a
/// trailing `/`, and lowercase what remains. Repeats until nothing more can
/// be stripped, so the result is a fixed point.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_lowercase();

    loop {
        let next = strip_once(&current);
        if next.len() == current.len() {
            return current;
        }
        current = next.to_string();
    }
}

fn strip_once(value: &str) -> &str {
    let mut rest = value;

    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }

    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.strip_suffix('/').unwrap_or(rest)
}

/// Split a normalized name into subdomain label and two-label root.
pub fn split_parts(domain: &str) -> DomainParts {
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() > 2 {
        DomainParts {
            subdomain: Some(labels[0].to_string()),
            root_domain: labels[labels.len() - 2..].join("."),
        }
    } else {
        DomainParts {
            subdomain: None,
            root_domain: domain.to_string(),
        }
    }
}

/// Structural check: at least two labels, none of them empty.
pub fn validate(domain: &str) -> Result<(), WhoisError> {
    if domain.is_empty() {
        return Err(WhoisError::InvalidDomain("Empty domain".to_string()));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(WhoisError::InvalidDomain(format!(
            "Invalid domain format: {}",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_scheme_www_and_slash() {
        assert_eq!(normalize("https://www.Example.COM/"), "example.com");
        assert_eq!(normalize("http://google.com"), "google.com");
        assert_eq!(normalize("www.google.com"), "google.com");
        assert_eq!(normalize("HTTPS://WWW.Google.com/"), "google.com");
        assert_eq!(normalize("blog.example.com/"), "blog.example.com");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "https://www.Example.COM/",
            "http://www.www.example.com//",
            "WWW.sub.Example.org",
            "example.com",
            "",
            "https://",
            "www.",
        ];

        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_split_parts_two_labels() {
        let parts = split_parts("example.com");
        assert_eq!(parts.subdomain, None);
        assert_eq!(parts.root_domain, "example.com");
    }

    #[test]
    fn test_split_parts_subdomain() {
        let parts = split_parts("blog.example.com");
        assert_eq!(parts.subdomain.as_deref(), Some("blog"));
        assert_eq!(parts.root_domain, "example.com");

        let parts = split_parts("a.b.c.example.co");
        assert_eq!(parts.subdomain.as_deref(), Some("a"));
        assert_eq!(parts.root_domain, "example.co");
        assert_eq!(parts.root_domain.split('.').count(), 2);
    }

    #[test]
    fn test_validate() {
        assert!(validate("example.com").is_ok());
        assert!(validate("blog.example.com").is_ok());

        for bad in ["", "invalid", ".com", "example.", "a..com"] {
            assert!(
                matches!(validate(bad), Err(WhoisError::InvalidDomain(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
