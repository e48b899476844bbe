pub mod decoder;
pub(crate) mod detect;
pub mod encoder;
pub(crate) mod escape;

pub use decoder::{decode, decode_bytes, Decoder};
pub use encoder::encode;

// Codec round trips
//------------------------------------------------------------------------------

#[cfg(test)]
mod codec_tests {
    use test_case::test_case;

    use super::{decode, encode};
    use crate::record::{Birthday, Contact, Record};

    #[test_case(Record::bookmark("Site; Home", r"http://x.com/a\b"); "bookmark")]
    #[test_case(Record::email_message("a@b.com", "Hi & bye", "100% sure?\nYes"); "email_message")]
    #[test_case(Record::email_message("a@b.com", "", "Only body"); "email_message_body_only")]
    #[test_case(Record::telephone("+1 (555) 123-4567"); "telephone")]
    #[test_case(Record::sms("+15551234", "Meet at 10:30; bring snacks"); "sms")]
    #[test_case(Record::mms("+15551234", ""); "mms_empty_body")]
    #[test_case(Record::geo("-33.8688", "151.2093"); "geo")]
    #[test_case(Record::email("a@b.com"); "email")]
    #[test_case(Record::url("https://example.com/path?q=1"); "url")]
    #[test_case(Record::text("just some random text"); "text")]
    fn test_round_trip(record: Record) {
        assert_eq!(decode(&encode(&record)), Ok(record));
    }

    #[test]
    fn test_round_trip_phonebook() {
        let contact = Contact::builder()
            .name("Doe;Jane")
            .telephone("555-1234")
            .note(r"back\slash: kept")
            .birthday(Birthday::parse("20000229").unwrap())
            .address(",,1 Main St,Springfield,,62701,USA")
            .build();
        let record = Record::Phonebook(contact);
        assert_eq!(decode(&encode(&record)), Ok(record));
    }

    #[test]
    fn test_email_message_collapses_to_email() {
        let record = Record::email_message("a@b.com", "", "");
        assert_eq!(decode(&encode(&record)), Ok(Record::email("a@b.com")));
    }
}
