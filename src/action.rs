use std::fmt;

use crate::codec::encoder::encode_email_message;
use crate::codec::escape::percent_encode_address;
use crate::record::{Contact, Record};

// Actions on decoded records
//------------------------------------------------------------------------------

impl Record {
    /// Link a viewer can open for this record: the bookmarked page, a `mailto:` draft, or a map
    /// of the coordinates. Kinds with nothing to open, and empty records, give `None`.
    pub fn action_link(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        match self {
            Self::Url { address } => Some(address.clone()),
            Self::Bookmark { address, .. } if !address.is_empty() => Some(address.clone()),
            Self::Email { address } => Some(format!("mailto:{}", percent_encode_address(address))),
            Self::EmailMessage { address, subject, body }
                if subject.is_empty() && body.is_empty() =>
            {
                Some(format!("mailto:{}", percent_encode_address(address)))
            }
            Self::EmailMessage { address, subject, body } => {
                Some(encode_email_message(address, subject, body))
            }
            Self::Geo { latitude, longitude } => {
                Some(format!("http://maps.google.com/maps?q={latitude},{longitude}"))
            }
            _ => None,
        }
    }
}

fn write_contact(f: &mut fmt::Formatter, contact: &Contact) -> fmt::Result {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    let birthday = contact
        .birthday
        .map(|b| format!("{:04}-{:02}-{:02}", b.year(), b.month(), b.day()))
        .unwrap_or_default();

    write!(
        f,
        "Name: {}\nTel: {}\nE-Mail: {}\nNote: {}\nBirthday: {}\nAddress: {}\nURL: {}",
        field(&contact.name),
        field(&contact.telephone),
        field(&contact.email),
        field(&contact.note),
        birthday,
        field(&contact.address),
        field(&contact.url),
    )
}

// Summary for showing a decoded record to a person, headed by the kind label
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.kind().label())?;
        match self {
            Self::Text { body } => write!(f, "{body}"),
            Self::Url { address } | Self::Email { address } => write!(f, "{address}"),
            Self::Bookmark { title, address } => write!(f, "Title: {title}\nURL: {address}"),
            Self::EmailMessage { address, subject, body } => {
                write!(f, "To: {address}\nSubject: {subject}\nMessage: {body}")
            }
            Self::Telephone { number } => write!(f, "{number}"),
            Self::Phonebook(contact) => write_contact(f, contact),
            Self::Sms { number, body } | Self::Mms { number, body } => {
                write!(f, "To: {number}\nMessage: {body}")
            }
            Self::Geo { latitude, longitude } => {
                write!(f, "Latitude: {latitude}\nLongitude: {longitude}")
            }
        }
    }
}

#[cfg(test)]
mod action_tests {
    use test_case::test_case;

    use crate::record::{Birthday, Contact, Record};

    #[test_case(Record::url("http://x.com"), Some("http://x.com"); "url")]
    #[test_case(Record::bookmark("Site", "http://x.com"), Some("http://x.com"); "bookmark")]
    #[test_case(Record::bookmark("Site", ""), None; "bookmark_without_address")]
    #[test_case(Record::email("a@b.com"), Some("mailto:a@b.com"); "email")]
    #[test_case(Record::email_message("a@b.com", "Hi", ""), Some("mailto:a@b.com?subject=Hi"); "email_message")]
    #[test_case(Record::email_message("a@b.com", "", ""), Some("mailto:a@b.com"); "email_message_collapsed")]
    #[test_case(Record::geo("40.7128", "-74.0060"), Some("http://maps.google.com/maps?q=40.7128,-74.0060"); "geo")]
    #[test_case(Record::text("hello"), None; "text")]
    #[test_case(Record::telephone("+15551234"), None; "telephone")]
    #[test_case(Record::sms("+15551234", "Hi"), None; "sms")]
    #[test_case(Record::url(""), None; "empty")]
    fn test_action_link(record: Record, expected: Option<&str>) {
        assert_eq!(record.action_link().as_deref(), expected);
    }

    #[test]
    fn test_display_bookmark() {
        let record = Record::bookmark("Site", "http://x.com");
        assert_eq!(record.to_string(), "Bookmark\nTitle: Site\nURL: http://x.com");
    }

    #[test]
    fn test_display_sms() {
        let record = Record::sms("+15551234", "Hi");
        assert_eq!(record.to_string(), "SMS\nTo: +15551234\nMessage: Hi");
    }

    #[test]
    fn test_display_phonebook() {
        let contact = Contact::builder()
            .name("Jane Doe")
            .birthday(Birthday::parse("19840229").unwrap())
            .build();
        assert_eq!(
            Record::Phonebook(contact).to_string(),
            "Contact Information (PhoneBook)\nName: Jane Doe\nTel: \nE-Mail: \nNote: \n\
             Birthday: 1984-02-29\nAddress: \nURL: "
        );
    }
}
