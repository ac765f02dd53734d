//! Counters and histograms emitted through the `metrics` facade.
//!
//! Recording is compiled in only with the `metrics` feature; an application
//! that wants the numbers installs its own recorder. Without the feature
//! every function here is a no-op.

#[cfg(feature = "metrics")]
use metrics::{counter, histogram};

#[cfg(feature = "metrics")]
pub fn increment_requests(domain: &str) {
    let tld = extract_tld(domain);
    counter!("whois_requests_total", "tld" => tld).increment(1);
}

#[cfg(feature = "metrics")]
pub fn increment_cache_hits() {
    counter!("whois_cache_hits_total").increment(1);
}

#[cfg(feature = "metrics")]
pub fn increment_cache_misses() {
    counter!("whois_cache_misses_total").increment(1);
}

#[cfg(feature = "metrics")]
pub fn increment_referrals() {
    counter!("whois_referrals_followed_total").increment(1);
}

#[cfg(feature = "metrics")]
pub fn increment_errors(error_type: &str) {
    counter!("whois_errors_total", "error_type" => error_type.to_string()).increment(1);
}

#[cfg(feature = "metrics")]
pub fn increment_probe_errors(probe: &str) {
    counter!("domain_info_probe_errors_total", "probe" => probe.to_string()).increment(1);
}

#[cfg(feature = "metrics")]
pub fn record_query_time(duration_ms: u64) {
    let duration_seconds = duration_ms as f64 / 1000.0;
    histogram!("whois_request_duration_seconds").record(duration_seconds);
}

#[cfg(feature = "metrics")]
fn extract_tld(domain: &str) -> String {
    domain
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
        .unwrap_or("unknown")
        .to_lowercase()
}

#[cfg(not(feature = "metrics"))]
pub fn increment_requests(_domain: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn increment_cache_hits() {}

#[cfg(not(feature = "metrics"))]
pub fn increment_cache_misses() {}

#[cfg(not(feature = "metrics"))]
pub fn increment_referrals() {}

#[cfg(not(feature = "metrics"))]
pub fn increment_errors(_error_type: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn increment_probe_errors(_probe: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_query_time(_duration_ms: u64) {}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tld() {
        assert_eq!(extract_tld("example.COM"), "com");
        assert_eq!(extract_tld("example."), "unknown");
    }
}
