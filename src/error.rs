use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum PayloadError {
    // Structured payloads
    MalformedPhonebook,
    MalformedBookmark,
    MalformedMessage,

    // Field values
    InvalidDate,
    InvalidCharacterEncoding,

    // Record model
    UnknownKind,
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Structured payloads
            Self::MalformedPhonebook => "Malformed MECARD phonebook entry",
            Self::MalformedBookmark => "Malformed MEBKM bookmark",
            Self::MalformedMessage => "Malformed MATMSG e-mail message",

            // Field values
            Self::InvalidDate => "Invalid date, expected a calendar date as YYYYMMDD",
            Self::InvalidCharacterEncoding => "Payload is neither UTF-8 nor Shift_JIS",

            // Record model
            Self::UnknownKind => "Unknown record kind",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for PayloadError {}

pub type PayloadResult<T> = Result<T, PayloadError>;
