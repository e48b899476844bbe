use crate::record::{Contact, Record};

use super::escape::{escape_field, percent_encode_address, percent_encode_query};

// Encoder
//------------------------------------------------------------------------------

/// Encodes a record into the exact payload string a QR symbol should carry.
///
/// Records with nothing filled in encode to an empty string, so an empty result means there
/// is nothing to render yet.
pub fn encode(record: &Record) -> String {
    if record.is_empty() {
        return String::new();
    }

    match record {
        Record::Text { body } => body.clone(),
        Record::Url { address } | Record::Email { address } => address.clone(),
        Record::Bookmark { title, address } => encode_bookmark(title, address),
        Record::EmailMessage { address, subject, body } => {
            encode_email_message(address, subject, body)
        }
        Record::Telephone { number } => format!("tel:{number}"),
        Record::Phonebook(contact) => encode_phonebook(contact),
        Record::Sms { number, body } => format!("sms:{number}:{body}"),
        Record::Mms { number, body } => format!("mms:{number}:{body}"),
        Record::Geo { latitude, longitude } => format!("geo:{latitude},{longitude}"),
    }
}

fn encode_bookmark(title: &str, address: &str) -> String {
    let mut out = String::with_capacity(title.len() + address.len() + 19);
    out.push_str("MEBKM:TITLE:");
    escape_field(title, &mut out);
    out.push_str(";URL:");
    escape_field(address, &mut out);
    out.push_str(";;");
    out
}

// Without a subject or body the message is just an address
pub(crate) fn encode_email_message(address: &str, subject: &str, body: &str) -> String {
    if subject.is_empty() && body.is_empty() {
        return address.to_string();
    }

    let mut query = Vec::with_capacity(2);
    if !subject.is_empty() {
        query.push(format!("subject={}", percent_encode_query(subject)));
    }
    if !body.is_empty() {
        query.push(format!("body={}", percent_encode_query(body)));
    }

    format!("mailto:{}?{}", percent_encode_address(address), query.join("&"))
}

fn encode_phonebook(contact: &Contact) -> String {
    let birthday = contact.birthday.map(|b| b.to_string());
    let fields = [
        ("N", contact.name.as_deref()),
        ("TEL", contact.telephone.as_deref()),
        ("EMAIL", contact.email.as_deref()),
        ("NOTE", contact.note.as_deref()),
        ("BDAY", birthday.as_deref()),
        ("ADR", contact.address.as_deref()),
        ("URL", contact.url.as_deref()),
    ];

    let mut out = String::from("MECARD:");
    let mut first = true;
    for (key, value) in fields {
        let Some(value) = value else { continue };
        if !first {
            out.push(';');
        }
        first = false;
        out.push_str(key);
        out.push(':');
        escape_field(value, &mut out);
    }
    out.push_str(";;");
    out
}
