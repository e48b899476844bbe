//! # qrpayload
//!
//! A Rust library for turning typed records into the text payloads QR codes carry, and for
//! reading scanned QR text back into typed records.
//!
//! ## Features
//!
//! - **Structured payloads**: MECARD contacts, MEBKM bookmarks, `mailto:` e-mail messages,
//!   `tel:`, `sms:`, `mms:` and `geo:` URIs, plain URLs and text
//! - **Kind recovery**: Scanned text is matched against each format in a fixed precedence order
//!   and falls back to plain text, so decoding arbitrary text never fails
//! - **Tolerant parsing**: Case-insensitive prefixes, legacy `smsto:`/`MATMSG:` forms, unknown
//!   MECARD keys, trailing newlines and Shift_JIS encoded byte payloads
//!
//! The crate only produces and consumes the payload text. Rendering the QR symbol itself is left
//! to a QR generator, and the text a QR scanner returns is the input to [`decode`].
//!
//! ## Quick Start
//!
//! ### Encoding a record
//!
//! ```rust
//! use qrpayload::{encode, Contact, Record};
//!
//! let bookmark = Record::bookmark("Site", "http://x.com");
//! assert_eq!(encode(&bookmark), "MEBKM:TITLE:Site;URL:http://x.com;;");
//!
//! let contact = Contact::builder().name("Jane Doe").telephone("555-1234").build();
//! assert_eq!(encode(&contact.into()), "MECARD:N:Jane Doe;TEL:555-1234;;");
//! ```
//!
//! ### Decoding scanned text
//!
//! ```rust
//! use qrpayload::{decode, PayloadError, Record, RecordKind};
//!
//! # fn main() -> Result<(), PayloadError> {
//! let record = decode("geo:40.7128,-74.0060")?;
//! assert_eq!(record.kind(), RecordKind::Geo);
//! assert_eq!(
//!     record.action_link().as_deref(),
//!     Some("http://maps.google.com/maps?q=40.7128,-74.0060")
//! );
//!
//! // An e-mail message without subject or body is just an e-mail address
//! assert_eq!(decode("mailto:a@b.com?subject=&body=")?, Record::email("a@b.com"));
//!
//! // Decoding falls back to text
//! assert_eq!(decode("just some random text")?, Record::text("just some random text"));
//!
//! // A recognised prefix with a broken structure is an error
//! assert_eq!(decode("MECARD:N:Jane;"), Err(PayloadError::MalformedPhonebook));
//! # Ok(())
//! # }
//! ```
//!
//! ## Formats
//!
//! | Kind | Payload |
//! |---|---|
//! | Text, URL, E-Mail | the text itself |
//! | Bookmark | `MEBKM:TITLE:<title>;URL:<address>;;` |
//! | E-Mail Message | `mailto:<address>?subject=<subject>&body=<body>` |
//! | Telephone | `tel:<number>` |
//! | PhoneBook | `MECARD:N:<name>;TEL:<tel>;EMAIL:<email>;NOTE:<note>;BDAY:<yyyymmdd>;ADR:<address>;URL:<url>;;` |
//! | SMS, MMS | `sms:<number>:<body>`, `mms:<number>:<body>` |
//! | Geolocalization | `geo:<latitude>,<longitude>` |

mod action;
pub mod codec;
pub mod error;
pub mod record;

pub use codec::{decode, decode_bytes, encode, Decoder};
pub use error::{PayloadError, PayloadResult};
pub use record::{sms_segment_count, Birthday, Contact, ContactBuilder, Record, RecordKind};
