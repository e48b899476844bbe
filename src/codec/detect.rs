use super::escape::percent_decode;

// Shape detection for payloads without a format prefix
//------------------------------------------------------------------------------

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// Dotted host name ending in an alphabetic top level domain, e.g. "www.example.com"
fn is_host(host: &str) -> bool {
    let labels = host.split('.').collect::<Vec<_>>();
    if labels.len() < 2 {
        return false;
    }

    let well_formed = labels.iter().all(|l| {
        !l.is_empty()
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];

    well_formed && tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

// Top level domains accepted on a bare host that has neither "www." nor a path
const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "int", "info", "biz", "io", "app", "dev", "co", "uk",
    "de", "fr", "es", "nl", "eu", "ch", "at", "be", "se", "jp", "cn", "ru", "br", "au", "ca",
    "us",
];

// Splits "host:port/path?query" into host and whether anything followed it
fn authority_host(s: &str) -> Option<(&str, bool)> {
    let end = s.find(['/', '?', '#']).unwrap_or(s.len());
    let authority = &s[..end];
    let has_path = end < s.len();
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            Some((host, true))
        }
        Some(_) => None,
        None => Some((authority, has_path)),
    }
}

fn has_common_tld(host: &str) -> bool {
    host.rsplit('.')
        .next()
        .is_some_and(|tld| COMMON_TLDS.iter().any(|t| tld.eq_ignore_ascii_case(t)))
}

/// Scheme followed by `://`, or a bare domain such as `www.example.com`, `example.com` or
/// `example.net/path`.
pub fn is_url(s: &str) -> bool {
    if s.is_empty() || has_whitespace(s) {
        return false;
    }

    if let Some((scheme, rest)) = s.split_once("://") {
        return is_scheme(scheme) && !rest.is_empty();
    }

    match authority_host(s) {
        Some((host, qualified)) => {
            let www = host.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www."));
            !host.contains('@') && is_host(host) && (qualified || www || has_common_tld(host))
        }
        None => false,
    }
}

/// `local@domain.tld` with nothing else around it.
pub fn is_bare_email(s: &str) -> bool {
    if has_whitespace(s) || s.contains(['/', ':']) {
        return false;
    }

    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !local.contains(['<', '>', '(', ')', '[', ']', ',', ';', '"'])
                && !domain.contains('@')
                && is_host(domain)
        }
        None => false,
    }
}

fn coordinates(value: &str) -> Option<(String, String)> {
    let (lat, long) = value.split_once(',')?;
    let (lat, long) = (lat.trim(), long.trim());
    if lat.parse::<f64>().ok()?.is_finite() && long.parse::<f64>().ok()?.is_finite() {
        Some((lat.to_string(), long.to_string()))
    } else {
        None
    }
}

/// Coordinates of a Google Maps link such as `http://maps.google.com/maps?q=40.71,-74.00`.
pub fn maps_query(s: &str) -> Option<(String, String)> {
    let lower = s.to_ascii_lowercase();
    let rest = lower.strip_prefix("http://").or_else(|| lower.strip_prefix("https://"))?;

    let host_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (host, path) = rest.split_at(host_end);
    let is_maps = host.starts_with("maps.google.")
        || (host.trim_start_matches("www.").starts_with("google.") && path.starts_with("/maps"));
    if !is_maps {
        return None;
    }

    let query_start = s.find('?')? + 1;
    s[query_start..].split('&').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        match key {
            "q" | "ll" => coordinates(&percent_decode(value)),
            _ => None,
        }
    })
}
