use std::{fmt, str::FromStr};

use time::{Date, Month};

use crate::error::{PayloadError, PayloadResult};

// Record kind
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum RecordKind {
    Text,
    Url,
    Bookmark,
    Email,
    EmailMessage,
    Telephone,
    Phonebook,
    Sms,
    Mms,
    Geo,
}

impl RecordKind {
    /// Kinds in the order a template picker lists them.
    pub const ALL: [RecordKind; 10] = [
        Self::Text,
        Self::Url,
        Self::Bookmark,
        Self::Email,
        Self::EmailMessage,
        Self::Telephone,
        Self::Phonebook,
        Self::Sms,
        Self::Mms,
        Self::Geo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Bookmark => "bookmark",
            Self::Email => "email",
            Self::EmailMessage => "emailmessage",
            Self::Telephone => "telephone",
            Self::Phonebook => "phonebook",
            Self::Sms => "sms",
            Self::Mms => "mms",
            Self::Geo => "geo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Url => "URL",
            Self::Bookmark => "Bookmark",
            Self::Email => "E-Mail",
            Self::EmailMessage => "E-Mail Message",
            Self::Telephone => "Telephone Number",
            Self::Phonebook => "Contact Information (PhoneBook)",
            Self::Sms => "SMS",
            Self::Mms => "MMS",
            Self::Geo => "Geolocalization",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Accepts either the key or the label
impl FromStr for RecordKind {
    type Err = PayloadError;

    fn from_str(s: &str) -> PayloadResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(s) || k.label() == s)
            .ok_or(PayloadError::UnknownKind)
    }
}

// Birthday
//------------------------------------------------------------------------------

/// Calendar date of a contact's birthday, written on the wire as `YYYYMMDD`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Birthday(Date);

impl Birthday {
    /// Parses exactly eight ASCII digits. Out of range months or days are rejected, not rolled
    /// over into the next month.
    pub fn parse(s: &str) -> PayloadResult<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayloadError::InvalidDate);
        }

        // All ascii digits, so slicing and parsing cannot fail
        let year = s[..4].parse::<i32>().map_err(|_| PayloadError::InvalidDate)?;
        let month = s[4..6].parse::<u8>().map_err(|_| PayloadError::InvalidDate)?;
        let day = s[6..].parse::<u8>().map_err(|_| PayloadError::InvalidDate)?;

        Self::from_ymd(year, month, day)
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> PayloadResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(PayloadError::InvalidDate);
        }
        let month = Month::try_from(month).map_err(|_| PayloadError::InvalidDate)?;
        let date =
            Date::from_calendar_date(year, month, day).map_err(|_| PayloadError::InvalidDate)?;
        Ok(Self(date))
    }

    pub fn date(&self) -> Date {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(&self) -> u8 {
        self.0.day()
    }
}

impl FromStr for Birthday {
    type Err = PayloadError;

    fn from_str(s: &str) -> PayloadResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

// Contact
//------------------------------------------------------------------------------

/// Phonebook entry. `None` fields are left out of the wire form entirely, `Some("")` is kept
/// as an explicitly empty field.
///
/// `address` holds PO box, room number, house number, city, prefecture, zip code and country
/// joined by commas, in that order.
#[derive(Debug, Default, PartialEq, Eq, Clone, Hash)]
pub struct Contact {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub birthday: Option<Birthday>,
    pub address: Option<String>,
    pub url: Option<String>,
}

impl Contact {
    pub fn builder() -> ContactBuilder {
        ContactBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.birthday.is_none()
            && [&self.name, &self.telephone, &self.email, &self.note, &self.address, &self.url]
                .iter()
                .all(|f| f.as_ref().map_or(true, |s| s.is_empty()))
    }
}

#[derive(Debug, Default, Clone)]
pub struct ContactBuilder {
    contact: Contact,
}

impl ContactBuilder {
    pub fn new() -> Self {
        Self { contact: Contact::default() }
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.contact.name = Some(name.into());
        self
    }

    pub fn unset_name(&mut self) -> &mut Self {
        self.contact.name = None;
        self
    }

    pub fn telephone(&mut self, telephone: impl Into<String>) -> &mut Self {
        self.contact.telephone = Some(telephone.into());
        self
    }

    pub fn unset_telephone(&mut self) -> &mut Self {
        self.contact.telephone = None;
        self
    }

    pub fn email(&mut self, email: impl Into<String>) -> &mut Self {
        self.contact.email = Some(email.into());
        self
    }

    pub fn unset_email(&mut self) -> &mut Self {
        self.contact.email = None;
        self
    }

    pub fn note(&mut self, note: impl Into<String>) -> &mut Self {
        self.contact.note = Some(note.into());
        self
    }

    pub fn unset_note(&mut self) -> &mut Self {
        self.contact.note = None;
        self
    }

    pub fn birthday(&mut self, birthday: Birthday) -> &mut Self {
        self.contact.birthday = Some(birthday);
        self
    }

    pub fn unset_birthday(&mut self) -> &mut Self {
        self.contact.birthday = None;
        self
    }

    pub fn address(&mut self, address: impl Into<String>) -> &mut Self {
        self.contact.address = Some(address.into());
        self
    }

    pub fn unset_address(&mut self) -> &mut Self {
        self.contact.address = None;
        self
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.contact.url = Some(url.into());
        self
    }

    pub fn unset_url(&mut self) -> &mut Self {
        self.contact.url = None;
        self
    }

    pub fn build(&self) -> Contact {
        self.contact.clone()
    }
}

// Record
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Record {
    Text { body: String },
    Url { address: String },
    Bookmark { title: String, address: String },
    Email { address: String },
    EmailMessage { address: String, subject: String, body: String },
    Telephone { number: String },
    Phonebook(Contact),
    Sms { number: String, body: String },
    Mms { number: String, body: String },
    Geo { latitude: String, longitude: String },
}

impl Record {
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    pub fn url(address: impl Into<String>) -> Self {
        Self::Url { address: address.into() }
    }

    pub fn bookmark(title: impl Into<String>, address: impl Into<String>) -> Self {
        Self::Bookmark { title: title.into(), address: address.into() }
    }

    pub fn email(address: impl Into<String>) -> Self {
        Self::Email { address: address.into() }
    }

    pub fn email_message(
        address: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::EmailMessage { address: address.into(), subject: subject.into(), body: body.into() }
    }

    pub fn telephone(number: impl Into<String>) -> Self {
        Self::Telephone { number: number.into() }
    }

    pub fn sms(number: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Sms { number: number.into(), body: body.into() }
    }

    pub fn mms(number: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Mms { number: number.into(), body: body.into() }
    }

    pub fn geo(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self::Geo { latitude: latitude.into(), longitude: longitude.into() }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Text { .. } => RecordKind::Text,
            Self::Url { .. } => RecordKind::Url,
            Self::Bookmark { .. } => RecordKind::Bookmark,
            Self::Email { .. } => RecordKind::Email,
            Self::EmailMessage { .. } => RecordKind::EmailMessage,
            Self::Telephone { .. } => RecordKind::Telephone,
            Self::Phonebook(_) => RecordKind::Phonebook,
            Self::Sms { .. } => RecordKind::Sms,
            Self::Mms { .. } => RecordKind::Mms,
            Self::Geo { .. } => RecordKind::Geo,
        }
    }

    /// True when the record carries nothing worth encoding.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text { body: s } | Self::Url { address: s } | Self::Email { address: s } => {
                s.is_empty()
            }
            Self::Telephone { number } => number.is_empty(),
            Self::Bookmark { title, address } => title.is_empty() && address.is_empty(),
            Self::EmailMessage { address, subject, body } => {
                address.is_empty() && subject.is_empty() && body.is_empty()
            }
            Self::Phonebook(contact) => contact.is_empty(),
            Self::Sms { number, body } | Self::Mms { number, body } => {
                number.is_empty() && body.is_empty()
            }
            Self::Geo { latitude, longitude } => latitude.is_empty() && longitude.is_empty(),
        }
    }
}

impl From<Contact> for Record {
    fn from(contact: Contact) -> Self {
        Self::Phonebook(contact)
    }
}

/// Number of 160 character messages an SMS body is split into.
pub fn sms_segment_count(body: &str) -> usize {
    body.chars().count().div_ceil(160)
}


#[cfg(test)]
mod birthday_tests {
    use test_case::test_case;

    use super::Birthday;
    use crate::PayloadError;

    #[test]
    fn test_parse() {
        let bday = Birthday::parse("19840229").unwrap();
        assert_eq!((bday.year(), bday.month(), bday.day()), (1984, 2, 29));
        assert_eq!(bday.to_string(), "19840229");
    }

    #[test]
    fn test_range_edges() {
        assert!(Birthday::parse("00010101").is_ok());
        assert!(Birthday::parse("99991231").is_ok());
    }

    #[test_case("20230230"; "february_30")]
    #[test_case("19000229"; "non_leap_century")]
    #[test_case("20231301"; "month_13")]
    #[test_case("20230001"; "month_0")]
    #[test_case("20230100"; "day_0")]
    #[test_case("20230431"; "april_31")]
    #[test_case("00001231"; "year_0")]
    #[test_case("2023011"; "too_short")]
    #[test_case("202301011"; "too_long")]
    #[test_case("2023-1-1"; "separators")]
    #[test_case("+2023011"; "sign")]
    #[test_case("２０２３０１０１"; "fullwidth_digits")]
    fn test_invalid(s: &str) {
        assert_eq!(Birthday::parse(s), Err(PayloadError::InvalidDate));
    }

    #[test]
    fn test_from_ymd() {
        assert_eq!(Birthday::from_ymd(2000, 2, 29), Birthday::parse("20000229"));
        assert_eq!(Birthday::from_ymd(10000, 1, 1), Err(PayloadError::InvalidDate));
    }
}

#[cfg(test)]
mod record_tests {
    use super::{sms_segment_count, Birthday, Contact, Record, RecordKind};

    #[test]
    fn test_kind() {
        assert_eq!(Record::text("hi").kind(), RecordKind::Text);
        assert_eq!(Record::email_message("a@b.com", "", "").kind(), RecordKind::EmailMessage);
        assert_eq!(Record::from(Contact::default()).kind(), RecordKind::Phonebook);
        assert_eq!(Record::geo("1", "2").kind(), RecordKind::Geo);
    }

    #[test]
    fn test_is_empty() {
        assert!(Record::text("").is_empty());
        assert!(Record::bookmark("", "").is_empty());
        assert!(!Record::bookmark("Site", "").is_empty());
        assert!(Record::sms("", "").is_empty());
        assert!(!Record::sms("", "hello").is_empty());
        assert!(Record::Phonebook(Contact::builder().name("").build()).is_empty());
        assert!(!Record::Phonebook(Contact::builder().name("Jane").build()).is_empty());
    }

    #[test]
    fn test_builder() {
        let mut builder = Contact::builder();
        builder.name("Jane Doe").telephone("555-1234");
        let contact = builder.build();
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.telephone.as_deref(), Some("555-1234"));
        assert_eq!(contact.email, None);
        assert_eq!(contact.birthday, None);
    }

    #[test]
    fn test_builder_unset() {
        let mut builder = Contact::builder();
        builder
            .name("Jane Doe")
            .telephone("555-1234")
            .email("jane@example.com")
            .note("")
            .birthday(Birthday::parse("19840229").unwrap())
            .address("Springfield")
            .url("http://jane.example.com");
        let full = builder.build();

        builder.unset_telephone().unset_birthday().unset_note();
        let trimmed = builder.build();
        assert_eq!(trimmed.name, full.name);
        assert_eq!(trimmed.telephone, None);
        assert_eq!(trimmed.note, None);
        assert_eq!(trimmed.birthday, None);
        assert_eq!(trimmed.url.as_deref(), Some("http://jane.example.com"));

        builder.unset_name().unset_email().unset_address().unset_url();
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_sms_segment_count() {
        assert_eq!(sms_segment_count(""), 0);
        assert_eq!(sms_segment_count("hello"), 1);
        assert_eq!(sms_segment_count(&"a".repeat(160)), 1);
        assert_eq!(sms_segment_count(&"a".repeat(161)), 2);
        assert_eq!(sms_segment_count(&"é".repeat(160)), 1);
    }
}
