//! Human-readable terminal rendering of a [`DomainInfo`] report.

use chrono::{DateTime, TimeZone, Utc};
use colored::{ColoredString, Colorize};
use domain_info::{
    errors::{DomainInfoError, ProbeError},
    ssl::{issuer_summary, subject_summary},
    DnsData, DomainInfo, SslData, WhoisRecord,
};
use std::io;

pub fn print_report(info: &DomainInfo, now: DateTime<Utc>) {
    print_ssl(&info.ssl_data, now);
    print_server(info);
    print_dns(&info.dns_data);
    print_whois(info, now);
}

fn heading(title: &str) -> ColoredString {
    format!("\n{}", title).bold()
}

fn unavailable(label: &str) -> ColoredString {
    label.bright_black()
}

fn short_date(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn print_ssl(ssl: &SslData, now: DateTime<Utc>) {
    println!("{}", heading("SSL Certificate:").green());

    let (subject, issuer) = match &ssl.details {
        Some(details) => (details.subject.clone(), details.issuer.clone()),
        None => (subject_summary(&ssl.subject), issuer_summary(&ssl.issuer)),
    };
    println!("  - Issued to: {}", subject);
    println!("  - Issued by: {}", issuer);
    println!(
        "  - Valid: {}",
        if ssl.valid { "Yes".green() } else { "No".red() }
    );
    println!("  - Valid from: {}", short_date(ssl.valid_from));
    println!("  - Valid until: {}", short_date(ssl.valid_to));

    if let Some(details) = &ssl.details {
        let days = (details.valid_to - now).num_days();
        let days = if days < 30 {
            days.to_string().yellow()
        } else {
            days.to_string().normal()
        };
        println!("  - Days until expiration: {}", days);
    }

    if ssl.certificate.is_some() {
        println!("  - {} PEM certificate available", "✓".green());
    }
}

fn print_server(info: &DomainInfo) {
    println!("{}", heading("Server:").cyan());

    match &info.server_data {
        Some(server) => println!("  - Server software: {}", server),
        None => println!("  - Server software: {}", unavailable("Not available")),
    }

    let status = info.http_status.to_string();
    let status = if (200..300).contains(&info.http_status) {
        status.green()
    } else {
        status.yellow()
    };
    println!("  - HTTP Status: {}", status);
}

fn print_dns(dns: &DnsData) {
    println!("{}", heading("DNS Records:").yellow());

    if dns.a.is_empty() {
        println!("  - A Records: {}", unavailable("None"));
    } else {
        println!("  - A Records: {}", dns.a.join(", "));
    }
    match &dns.cname {
        Some(cname) => println!("  - CNAME: {}", cname),
        None => println!("  - CNAME: {}", unavailable("None")),
    }

    if !dns.mx.is_empty() {
        println!("  - MX Records:");
        for mx in &dns.mx {
            println!("    * {} (priority: {})", mx.exchange, mx.priority);
        }
    }
    print_list("TXT Records", &dns.txt);
    print_list("NS Records", &dns.ns);

    if let Some(soa) = &dns.soa {
        println!("  - SOA: {} {} (serial {})", soa.nsname, soa.hostmaster, soa.serial);
    }
}

fn print_list(label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    println!("  - {}:", label);
    for value in values {
        println!("    * {}", value);
    }
}

fn print_whois(info: &DomainInfo, now: DateTime<Utc>) {
    println!("{}", heading("WHOIS:").magenta());

    let record = match (&info.whois_data, &info.whois_error) {
        (Some(record), _) => record,
        (None, Some(reason)) => {
            println!("  - {}", format!("Not available: {}", reason).bright_black());
            return;
        }
        (None, None) => {
            println!("  - {}", unavailable("Not available"));
            return;
        }
    };

    print_field("Registrar", record.registrar.as_deref());
    print_field("Registrar URL", record.registrar_url.as_deref());
    print_dates(record, now);

    if let Some(registrant) = &record.registrant {
        print_field("Registrant", registrant.organization.as_deref());
        print_field("Registrant country", registrant.country.as_deref());
        print_field("Registrant email", registrant.email.as_deref());
    }

    print_list("Status", &record.status_codes);
    print_list("Name servers", &record.name_servers);
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  - {}: {}", label, value);
    }
}

fn print_dates(record: &WhoisRecord, now: DateTime<Utc>) {
    if let Some(created) = record.creation_date {
        let age = record.days_since_creation(now).unwrap_or_default();
        println!("  - Created: {} ({} days ago)", created.format("%Y-%m-%d"), age);
    }
    if let Some(updated) = record.updated_date {
        println!("  - Updated: {}", updated.format("%Y-%m-%d"));
    }
    if let Some(expires) = record.expiration_date {
        let left = record.days_until_expiration(now).unwrap_or_default();
        let left = if left < 30 {
            format!("{} days left", left).red()
        } else {
            format!("{} days left", left).normal()
        };
        println!("  - Expires: {} ({})", expires.format("%Y-%m-%d"), left);
    }
}

/// Hints for the failures users most often hit.
pub fn suggestions(error: &DomainInfoError) -> Vec<&'static str> {
    let source = match error {
        DomainInfoError::EmptyDomain | DomainInfoError::InvalidDomain(_) => {
            return vec!["Pass a bare domain name such as example.com"];
        }
        DomainInfoError::ConfigError(_) => {
            return vec!["Check the WHOIS_*, CACHE_* and *_TIMEOUT_* environment variables"];
        }
        DomainInfoError::Probe { source, .. } => source,
    };

    if is_unknown_host(source) {
        vec![
            "Check that the domain name is spelled correctly",
            "Make sure the domain exists and has DNS records",
        ]
    } else if is_timeout(source) {
        vec![
            "The server took too long to respond",
            "Try again later or raise the limit with --timeout",
        ]
    } else if is_refused(source) {
        vec!["The server refused the connection; it may not serve HTTPS on port 443"]
    } else if matches!(source, ProbeError::Tls(_) | ProbeError::Certificate(_)) {
        vec!["The site presented a certificate that could not be verified"]
    } else {
        Vec::new()
    }
}

fn is_unknown_host(error: &ProbeError) -> bool {
    match error {
        ProbeError::Dns(e) => e.is_nx_domain(),
        ProbeError::Io(e) => {
            let message = e.to_string().to_lowercase();
            message.contains("failed to lookup address")
                || message.contains("name or service not known")
        }
        ProbeError::Http(e) => e.is_connect() && {
            let message = format!("{:?}", e).to_lowercase();
            message.contains("dns error") || message.contains("failed to lookup address")
        },
        _ => false,
    }
}

fn is_timeout(error: &ProbeError) -> bool {
    match error {
        ProbeError::Timeout => true,
        ProbeError::Io(e) => e.kind() == io::ErrorKind::TimedOut,
        ProbeError::Http(e) => e.is_timeout(),
        _ => false,
    }
}

fn is_refused(error: &ProbeError) -> bool {
    match error {
        ProbeError::Io(e) => e.kind() == io::ErrorKind::ConnectionRefused,
        ProbeError::Http(e) => e.is_connect() && format!("{:?}", e).contains("ConnectionRefused"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_info::errors::ProbeKind;

    fn probe_failure(source: ProbeError) -> DomainInfoError {
        DomainInfoError::Probe {
            kind: ProbeKind::Ssl,
            domain: "example.com".to_string(),
            source,
        }
    }

    #[test]
    fn test_timeout_suggestion() {
        let hints = suggestions(&probe_failure(ProbeError::Timeout));
        assert!(hints.iter().any(|hint| hint.contains("--timeout")));
    }

    #[test]
    fn test_refused_suggestion() {
        let error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let hints = suggestions(&probe_failure(ProbeError::Io(error)));
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("refused"));
    }

    #[test]
    fn test_unknown_host_suggestion() {
        let error = io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Name or service not known",
        );
        let hints = suggestions(&probe_failure(ProbeError::Io(error)));
        assert!(hints[0].contains("spelled"));
    }

    #[test]
    fn test_invalid_domain_suggestion() {
        let hints = suggestions(&DomainInfoError::InvalidDomain("bad".to_string()));
        assert_eq!(hints, vec!["Pass a bare domain name such as example.com"]);
    }

    #[test]
    fn test_unclassified_error_has_no_suggestion() {
        let hints = suggestions(&probe_failure(ProbeError::InvalidHeader("x".to_string())));
        assert!(hints.is_empty());
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(0), "1970-01-01");
    }
}
