use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::error::{PayloadError, PayloadResult};
use crate::record::{Birthday, Contact, Record};

use super::detect::{is_bare_email, is_url, maps_query};
use super::escape::{percent_decode, split_fields};

// Decoder
//------------------------------------------------------------------------------

/// Decodes scanned QR text into a [`Record`].
///
/// ```
/// use qrpayload::{Decoder, Record};
///
/// let mut decoder = Decoder::new();
/// decoder.maps_as_geo(true);
/// let record = decoder.decode("http://maps.google.com/maps?q=40.7128,-74.0060").unwrap();
/// assert_eq!(record, Record::geo("40.7128", "-74.0060"));
/// ```
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Decoder {
    maps_as_geo: bool,
    legacy_prefixes: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self { maps_as_geo: false, legacy_prefixes: true }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read Google Maps links carrying coordinates as [`Record::Geo`] instead of
    /// [`Record::Url`].
    pub fn maps_as_geo(&mut self, enabled: bool) -> &mut Self {
        self.maps_as_geo = enabled;
        self
    }

    /// Accept `smsto:`, `mmsto:` and `MATMSG:` payloads written by older generators.
    pub fn legacy_prefixes(&mut self, enabled: bool) -> &mut Self {
        self.legacy_prefixes = enabled;
        self
    }

    pub fn decode(&self, raw: &str) -> PayloadResult<Record> {
        // Scanners may append a line break, which is never part of a URI payload
        let uri = raw.trim_end_matches(['\r', '\n']);
        if let Some(rest) = strip_prefix_ci(uri, "mailto:") {
            return Ok(decode_mailto(rest));
        }
        if let Some(rest) = strip_prefix_ci(uri, "tel:") {
            return Ok(Record::telephone(rest));
        }
        if let Some(rest) = self.strip_message_prefix(uri, "sms:", "smsto:") {
            let (number, body) = split_message(rest);
            return Ok(Record::Sms { number, body });
        }
        if let Some(rest) = self.strip_message_prefix(uri, "mms:", "mmsto:") {
            let (number, body) = split_message(rest);
            return Ok(Record::Mms { number, body });
        }
        if let Some(geo) = strip_prefix_ci(uri, "geo:").and_then(decode_geo) {
            return Ok(geo);
        }
        if let Some(rest) = strip_prefix_ci(raw, "MECARD:") {
            return decode_phonebook(rest);
        }
        if let Some(rest) = strip_prefix_ci(raw, "MEBKM:") {
            return decode_bookmark(rest);
        }
        if let Some(rest) = strip_prefix_ci(raw, "MATMSG:").filter(|_| self.legacy_prefixes) {
            return decode_matmsg(rest);
        }

        let trimmed = raw.trim();
        if self.maps_as_geo {
            if let Some((latitude, longitude)) = maps_query(trimmed) {
                return Ok(Record::Geo { latitude, longitude });
            }
        }
        if is_bare_email(trimmed) {
            return Ok(Record::email(trimmed));
        }
        if is_url(trimmed) {
            return Ok(Record::url(trimmed));
        }

        Ok(Record::text(raw))
    }

    /// Decodes the raw bytes of a byte mode segment. UTF-8 is tried first, then Shift_JIS,
    /// which is what most MECARD generators emit.
    pub fn decode_bytes(&self, raw: &[u8]) -> PayloadResult<Record> {
        let text = match std::str::from_utf8(raw) {
            Ok(utf8) => Cow::Borrowed(utf8),
            Err(_) => {
                let (sjis, _, has_err) = SHIFT_JIS.decode(raw);
                if has_err {
                    return Err(PayloadError::InvalidCharacterEncoding);
                }
                sjis
            }
        };

        self.decode(&text)
    }

    fn strip_message_prefix<'a>(
        &self,
        raw: &'a str,
        prefix: &str,
        legacy: &str,
    ) -> Option<&'a str> {
        strip_prefix_ci(raw, prefix)
            .or_else(|| strip_prefix_ci(raw, legacy).filter(|_| self.legacy_prefixes))
    }
}

/// Decodes with the default [`Decoder`].
pub fn decode(raw: &str) -> PayloadResult<Record> {
    Decoder::default().decode(raw)
}

/// Decodes raw bytes with the default [`Decoder`].
pub fn decode_bytes(raw: &[u8]) -> PayloadResult<Record> {
    Decoder::default().decode_bytes(raw)
}

// Format parsers
//------------------------------------------------------------------------------

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn email_or_message(address: String, subject: String, body: String) -> Record {
    if subject.is_empty() && body.is_empty() {
        Record::Email { address }
    } else {
        Record::EmailMessage { address, subject, body }
    }
}

// Query params other than subject and body (cc, bcc) are dropped
fn decode_mailto(rest: &str) -> Record {
    let (to, query) = match rest.split_once('?') {
        Some((to, query)) => (to, Some(query)),
        None => (rest, None),
    };

    let mut subject = None;
    let mut body = None;
    for param in query.into_iter().flat_map(|q| q.split('&')) {
        let (key, value) = param.split_once('=').unwrap_or((param, ""));
        if key.eq_ignore_ascii_case("subject") {
            set_once(&mut subject, percent_decode(value));
        } else if key.eq_ignore_ascii_case("body") {
            set_once(&mut body, percent_decode(value));
        }
    }

    email_or_message(percent_decode(to), subject.unwrap_or_default(), body.unwrap_or_default())
}

// "number:body", or the RFC 5724 form "number?body=...", whichever separator comes first
fn split_message(rest: &str) -> (String, String) {
    match rest.find([':', '?']).map(|i| rest.split_at(i)) {
        Some((number, body)) if body.starts_with(':') => {
            (number.to_string(), body[1..].to_string())
        }
        Some((number, query)) => {
            let query = &query[1..];
            let body = query
                .split('&')
                .find_map(|p| p.split_once('=').filter(|(k, _)| k.eq_ignore_ascii_case("body")))
                .map(|(_, v)| percent_decode(v))
                .unwrap_or_default();
            (number.to_string(), body)
        }
        None => (rest.to_string(), String::new()),
    }
}

// Altitude and ";u=" / "?q=" parameters are dropped
fn decode_geo(rest: &str) -> Option<Record> {
    let end = rest.find([';', '?']).unwrap_or(rest.len());
    let (latitude, rest) = rest[..end].split_once(',')?;
    let longitude = rest.split(',').next().unwrap_or_default();

    if latitude.is_empty() || longitude.is_empty() {
        return None;
    }
    Some(Record::geo(latitude, longitude))
}

// First occurrence of a key wins
fn set_once(field: &mut Option<String>, value: String) {
    if field.is_none() {
        *field = Some(value);
    }
}

fn decode_phonebook(rest: &str) -> PayloadResult<Record> {
    let fields = split_fields(rest.trim_end()).ok_or(PayloadError::MalformedPhonebook)?;

    let mut contact = Contact::default();
    let mut birthday_seen = false;
    for (key, value) in fields {
        match key.to_ascii_uppercase().as_str() {
            "N" => set_once(&mut contact.name, value),
            "TEL" => set_once(&mut contact.telephone, value),
            "EMAIL" => set_once(&mut contact.email, value),
            "NOTE" => set_once(&mut contact.note, value),
            // An empty BDAY still counts as the first occurrence
            "BDAY" if !birthday_seen => {
                birthday_seen = true;
                if !value.is_empty() {
                    contact.birthday = Some(Birthday::parse(&value)?);
                }
            }
            "ADR" => set_once(&mut contact.address, value),
            "URL" => set_once(&mut contact.url, value),
            _ => {}
        }
    }

    Ok(Record::Phonebook(contact))
}

fn decode_bookmark(rest: &str) -> PayloadResult<Record> {
    let fields = split_fields(rest.trim_end()).ok_or(PayloadError::MalformedBookmark)?;

    let mut title = None;
    let mut address = None;
    for (key, value) in fields {
        match key.to_ascii_uppercase().as_str() {
            "TITLE" => set_once(&mut title, value),
            "URL" => set_once(&mut address, value),
            _ => {}
        }
    }

    Ok(Record::Bookmark { title: title.unwrap_or_default(), address: address.unwrap_or_default() })
}

fn decode_matmsg(rest: &str) -> PayloadResult<Record> {
    let fields = split_fields(rest.trim_end()).ok_or(PayloadError::MalformedMessage)?;

    let mut address = None;
    let mut subject = None;
    let mut body = None;
    for (key, value) in fields {
        match key.to_ascii_uppercase().as_str() {
            "TO" => set_once(&mut address, value),
            "SUB" => set_once(&mut subject, value),
            "BODY" => set_once(&mut body, value),
            _ => {}
        }
    }

    Ok(email_or_message(
        address.unwrap_or_default(),
        subject.unwrap_or_default(),
        body.unwrap_or_default(),
    ))
}
