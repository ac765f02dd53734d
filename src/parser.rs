use crate::{Registrant, WhoisRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Each field is extracted by trying its patterns top to bottom; the first
// non-empty, acceptable capture wins. Only the first match of each pattern
// is considered.

static REGISTRAR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registrar:[ \t]*(.+)",
        r"(?i)Registrar Name:[ \t]*(.+)",
        r"(?i)Sponsoring Registrar:[ \t]*(.+)",
        r"(?i)Registration Service Provider:[ \t]*(.+)",
        // Nominet style: label on its own line, value indented below
        r"(?im)^[ \t]*Registrar:[ \t]*\r?\n[ \t]*(.+)",
    ])
});

static REGISTRAR_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registrar URL:[ \t]*(.+)",
        r"(?i)Registrar Website:[ \t]*(.+)",
    ])
});

static REGISTRAR_IANA_ID_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"(?i)Registrar IANA ID:[ \t]*(.+)"]));

static CREATION_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Creation Date:[ \t]*(.+)",
        r"(?i)Created on:[ \t]*(.+)",
        r"(?i)Domain Registration Date:[ \t]*(.+)",
        r"(?i)Domain Create Date:[ \t]*(.+)",
        r"(?i)Created Date:[ \t]*(.+)",
        r"(?i)Registered on:[ \t]*(.+)",
        r"(?i)Registration Time:[ \t]*(.+)",
        r"(?im)^[ \t]*created:[ \t]*(.+)",
    ])
});

static UPDATED_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Updated Date:[ \t]*(.+)",
        r"(?i)Last Modified:[ \t]*(.+)",
        r"(?i)Last updated on:[ \t]*(.+)",
        r"(?i)Domain Last Updated Date:[ \t]*(.+)",
        r"(?im)^[ \t]*changed:[ \t]*(.+)",
        r"(?im)^[ \t]*last-update:[ \t]*(.+)",
    ])
});

static EXPIRATION_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)(?:Registry Expiry Date|Expiration Date):[ \t]*(.+)",
        r"(?i)Registrar Registration Expiration Date:[ \t]*(.+)",
        r"(?i)Domain Expiration Date:[ \t]*(.+)",
        r"(?i)Expiry Date:[ \t]*(.+)",
        r"(?i)Expires On:[ \t]*(.+)",
        r"(?i)Expiration Time:[ \t]*(.+)",
        r"(?im)^[ \t]*paid-till:[ \t]*(.+)",
    ])
});

static REGISTRANT_ORG_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registrant Organization:[ \t]*(.+)",
        r"(?i)Registrant:[ \t]*(.+)",
        r"(?im)^[ \t]*Registrant:[ \t]*\r?\n[ \t]*(.+)",
        r"(?i)Organization:[ \t]*(.+)",
    ])
});

static REGISTRANT_COUNTRY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registrant Country:[ \t]*(.+)",
        r"(?i)Country:[ \t]*(.+)",
    ])
});

static REGISTRANT_EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Registrant Email:[ \t]*(.+)",
        r"(?i)Email:[ \t]*(.+)",
    ])
});

static DOMAIN_STATUS_PATTERN: Lazy<Regex> = Lazy::new(|| single(r"(?i)Domain Status:[ \t]*(.+)"));

static GENERIC_STATUS_PATTERN: Lazy<Regex> = Lazy::new(|| single(r"(?i)Status:[ \t]*(.+)"));

static NAME_SERVER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Name Server:[ \t]*(.+)",
        r"(?i)Nameserver:[ \t]*(.+)",
        r"(?i)nserver:[ \t]*(.+)",
    ])
});

/// Substrings (lowercase) that mark a registrant value as privacy-shielded.
const REDACTION_MARKERS: &[&str] = &[
    "redacted",
    "data protected",
    "not disclosed",
    "withheld for privacy",
    "gdpr masked",
    "statutory masking",
    "privacy service",
    "contact privacy",
    "select request email form",
];

const RESERVED_REGISTRAR: &str = "IANA (Reserved Domain)";
const RESERVED_STATUS: &str = "RESERVED-IANA";

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|pattern| single(pattern)).collect()
}

fn single(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static WHOIS pattern must compile")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WhoisParser;

impl WhoisParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract whatever structured fields the text carries. Never fails.
    pub fn parse(&self, raw: &str) -> WhoisRecord {
        let mut record = WhoisRecord {
            registrar: self.registrar(raw),
            registrar_url: first_match(&REGISTRAR_URL_PATTERNS, raw, |_| true),
            registrar_iana_id: first_match(&REGISTRAR_IANA_ID_PATTERNS, raw, |_| true),
            creation_date: first_date(&CREATION_DATE_PATTERNS, raw),
            updated_date: first_date(&UPDATED_DATE_PATTERNS, raw),
            expiration_date: first_date(&EXPIRATION_DATE_PATTERNS, raw),
            registrant: self.registrant(raw),
            status_codes: self.status_codes(raw),
            name_servers: self.name_servers(raw),
            raw_text: raw.to_string(),
        };

        if raw.contains("IANA") && raw.contains("RESERVED") {
            record.registrar = Some(RESERVED_REGISTRAR.to_string());
            if record.status_codes.is_empty() {
                record.status_codes.push(RESERVED_STATUS.to_string());
            }
        }

        record
    }

    fn registrar(&self, raw: &str) -> Option<String> {
        if let Some(registrar) = first_match(&REGISTRAR_PATTERNS, raw, |_| true) {
            return Some(registrar);
        }

        // `Registrar WHOIS Server:` and friends also contain "Registrar"
        let scanned = raw
            .lines()
            .filter(|line| {
                line.contains("Registrar:")
                    && !line.contains("WHOIS Server")
                    && !line.contains("URL")
                    && !line.contains("IANA ID")
            })
            .find_map(|line| {
                line.split_once("Registrar:")
                    .map(|(_, value)| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            });

        if scanned.is_some() {
            return scanned;
        }

        if raw.contains("MarkMonitor") {
            return Some("MarkMonitor Inc.".to_string());
        }

        None
    }

    fn registrant(&self, raw: &str) -> Option<Registrant> {
        let organization = first_match(&REGISTRANT_ORG_PATTERNS, raw, |v| !is_redacted(v));
        let country = first_match(&REGISTRANT_COUNTRY_PATTERNS, raw, |v| !is_redacted(v));

        let globally_redacted = raw.contains("GDPR") || raw.contains("REDACTED FOR PRIVACY");
        let email = if globally_redacted {
            None
        } else {
            first_match(&REGISTRANT_EMAIL_PATTERNS, raw, |v| {
                v.contains('@') && !is_redacted(v)
            })
        };

        if organization.is_none() && country.is_none() && email.is_none() {
            return None;
        }

        Some(Registrant {
            organization,
            country,
            email,
        })
    }

    fn status_codes(&self, raw: &str) -> Vec<String> {
        let mut codes = Vec::new();
        collect_unique(&DOMAIN_STATUS_PATTERN, raw, clean_status, &mut codes);

        if codes.is_empty() {
            collect_unique(&GENERIC_STATUS_PATTERN, raw, clean_status, &mut codes);
        }

        codes
    }

    fn name_servers(&self, raw: &str) -> Vec<String> {
        let mut servers = Vec::new();
        for pattern in NAME_SERVER_PATTERNS.iter() {
            collect_unique(pattern, raw, clean_name_server, &mut servers);
        }
        servers
    }
}

fn first_match<F>(patterns: &[Regex], raw: &str, accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    patterns.iter().find_map(|pattern| {
        let captures = pattern.captures(raw)?;
        let value = captures.get(1)?.as_str().trim();
        if value.is_empty() || !accept(value) {
            return None;
        }
        Some(value.to_string())
    })
}

fn first_date(patterns: &[Regex], raw: &str) -> Option<DateTime<Utc>> {
    patterns.iter().find_map(|pattern| {
        let captures = pattern.captures(raw)?;
        parse_date(captures.get(1)?.as_str())
    })
}

fn collect_unique(pattern: &Regex, raw: &str, clean: fn(&str) -> String, into: &mut Vec<String>) {
    for captures in pattern.captures_iter(raw) {
        let Some(value) = captures.get(1) else { continue };
        let value = clean(value.as_str());
        if !value.is_empty() && !into.contains(&value) {
            into.push(value);
        }
    }
}

/// Drop the ICANN explanation link that gTLD registries append.
fn clean_status(value: &str) -> String {
    let value = value.trim();
    value
        .split_once(" http")
        .map_or(value, |(status, _)| status)
        .trim()
        .to_string()
}

/// Hostname only (some registries list glue addresses after it), lowercased.
fn clean_name_server(value: &str) -> String {
    value
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_lowercase()
}

pub fn is_redacted(value: &str) -> bool {
    let lower = value.to_lowercase();
    REDACTION_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Parse the date formats commonly found in whois data.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Some(parsed) = parse_date_exact(date_str) {
        return Some(parsed);
    }

    // Values such as "2023-09-14 (YYYY-MM-DD)" or "2020-01-01 UTC"
    let first_token = date_str.split_whitespace().next()?;
    if first_token != date_str {
        if let Some(parsed) = parse_date_exact(first_token) {
            return Some(parsed);
        }
    }

    debug!("Failed to parse date: {}", date_str);
    None
}

fn parse_date_exact(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let zoned_formats = [
        "%Y-%m-%dT%H:%M:%S%z",   // 2025-05-18T13:36:06+0000
        "%Y-%m-%d %H:%M:%S%z",   // 2025-05-18 13:36:06+0000
        "%Y-%m-%d %H:%M:%S %z",  // 2025-05-18 13:36:06 +0000
    ];

    for format in &zoned_formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ", // 2025-05-18T13:36:06.0Z
        "%Y-%m-%dT%H:%M:%S",     // 2025-05-18T13:36:06
        "%Y-%m-%d %H:%M:%S%.f",  // 2025-05-18 13:36:06.123
        "%Y-%m-%d %H:%M:%S",     // 2025-05-18 13:36:06
        "%d.%m.%Y %H:%M:%S",     // 18.05.2025 13:36:06
        "%Y.%m.%d %H:%M:%S",     // 2025.05.18 13:36:06
    ];

    for format in &naive_formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive_dt, Utc));
        }
    }

    let date_only_formats = [
        "%Y-%m-%d", // 2025-05-18
        "%d-%b-%Y", // 18-May-2025
        "%d %b %Y", // 18 May 2025
        "%Y/%m/%d", // 2025/05/18
        "%m/%d/%Y", // 05/18/2025
        "%d.%m.%Y", // 18.05.2025
        "%Y.%m.%d", // 2025.05.18
    ];

    for format in &date_only_formats {
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(naive_dt) = naive_date.and_hms_opt(0, 0, 0) {
                return Some(DateTime::from_naive_utc_and_offset(naive_dt, Utc));
            }
        }
    }

    None
}
