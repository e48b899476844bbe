use percent_encoding::{
    percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC,
};

// Percent escaping for mailto URIs
//------------------------------------------------------------------------------

// RFC 3986 unreserved characters pass through
const QUERY_VALUE: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

const ADDRESS: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'&').add(b'<').add(b'>').add(b'?');

pub fn percent_encode_query(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

pub fn percent_encode_address(address: &str) -> String {
    utf8_percent_encode(address, ADDRESS).to_string()
}

// Malformed sequences are kept literally and invalid utf8 is replaced, decode never fails
pub fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

// Backslash escaping for MECARD, MEBKM and MATMSG
//------------------------------------------------------------------------------

pub fn escape_field(value: &str, out: &mut String) {
    for c in value.chars() {
        if matches!(c, '\\' | ';') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Splits the body of a `;;` terminated payload into `(key, value)` pairs.
///
/// Keys end at the first unescaped `:`. Values are unescaped, so `\:` and `\,` written by other
/// generators come back as plain characters. Empty fields are skipped. Returns `None` when the
/// body is not terminated by two unescaped `;`, ends in a dangling `\` or has a non-empty
/// field without a key.
pub fn split_fields(body: &str) -> Option<Vec<(String, String)>> {
    let mut fields = Vec::new();
    let mut key: Option<String> = None;
    let mut cur = String::new();
    let mut trailing_seps = 0;

    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                cur.push(chars.next()?);
                trailing_seps = 0;
            }
            ':' if key.is_none() => {
                key = Some(std::mem::take(&mut cur));
                trailing_seps = 0;
            }
            ';' => {
                let val = std::mem::take(&mut cur);
                match key.take() {
                    Some(k) => fields.push((k, val)),
                    None if val.is_empty() => {}
                    None => return None,
                }
                trailing_seps += 1;
            }
            _ => {
                cur.push(c);
                trailing_seps = 0;
            }
        }
    }

    if trailing_seps < 2 {
        return None;
    }

    Some(fields)
}

#[cfg(test)]
mod escape_tests {
    use test_case::test_case;

    use super::{
        escape_field, percent_decode, percent_encode_address, percent_encode_query, split_fields,
    };

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_percent_encode_query() {
        assert_eq!(percent_encode_query("Hello World"), "Hello%20World");
        assert_eq!(percent_encode_query("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(percent_encode_query("ok-._~"), "ok-._~");
        assert_eq!(percent_encode_query("café"), "caf%C3%A9");
    }

    #[test]
    fn test_percent_encode_address() {
        assert_eq!(percent_encode_address("a@b.com"), "a@b.com");
        assert_eq!(percent_encode_address("a?b@c.com"), "a%3Fb@c.com");
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("Hello%20World"), "Hello World");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("a+b"), "a+b");
    }

    #[test]
    fn test_escape_field() {
        let mut out = String::new();
        escape_field(r"a;b\c:d,e", &mut out);
        assert_eq!(out, r"a\;b\\c:d,e");
    }

    #[test]
    fn test_split_fields() {
        let fields = split_fields("N:Jane Doe;TEL:555-1234;;").unwrap();
        assert_eq!(fields, pairs(&[("N", "Jane Doe"), ("TEL", "555-1234")]));
    }

    #[test]
    fn test_split_fields_unescape() {
        let fields = split_fields(r"NOTE:a\;b\\c\:d;URL:http://x.com;;").unwrap();
        assert_eq!(fields, pairs(&[("NOTE", r"a;b\c:d"), ("URL", "http://x.com")]));
    }

    #[test]
    fn test_split_fields_empty_value() {
        let fields = split_fields("N:;TEL:1;;").unwrap();
        assert_eq!(fields, pairs(&[("N", ""), ("TEL", "1")]));
    }

    #[test]
    fn test_split_fields_skips_empty_fields() {
        let fields = split_fields("N:a;;TEL:1;;;").unwrap();
        assert_eq!(fields, pairs(&[("N", "a"), ("TEL", "1")]));
        assert_eq!(split_fields(";;").unwrap(), Vec::<(String, String)>::new());
    }

    #[test_case(""; "empty")]
    #[test_case("N:Jane;"; "single_separator")]
    #[test_case("N:Jane"; "no_separator")]
    #[test_case(";"; "lone_separator")]
    #[test_case(r"N:Jane\;;"; "escaped_terminator")]
    #[test_case(r"N:Jane;;\"; "dangling_escape")]
    #[test_case("N:Jane;;junk"; "trailing_junk")]
    #[test_case("garbage;;"; "field_without_key")]
    fn test_split_fields_malformed(body: &str) {
        assert_eq!(split_fields(body), None);
    }

    #[test]
    fn test_escape_then_split() {
        let mut body = String::from("NOTE:");
        escape_field(r"semi;colon and \slash", &mut body);
        body.push_str(";;");
        let fields = split_fields(&body).unwrap();
        assert_eq!(fields, pairs(&[("NOTE", r"semi;colon and \slash")]));
    }
}
