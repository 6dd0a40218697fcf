//! Data-URI parsing.

use super::EncodeError;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Standard alphabet, padding optional, non-zero trailing bits ignored, as
/// browsers' `atob` accepts it.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A data URI split into header and payload, borrowing the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    header: &'a str,
    payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Splits at the first comma.
    pub fn parse(uri: &'a str) -> Result<Self, EncodeError> {
        let (header, payload) = uri.split_once(',').ok_or(EncodeError::MissingSeparator)?;
        Ok(Self { header, payload })
    }

    /// Text before the first comma.
    #[inline]
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// Text after the first comma.
    #[inline]
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// MIME type between the first `:` and the following `;` of the header.
    ///
    /// Yields an empty string when the header does not have that shape.
    pub fn mime(&self) -> &'a str {
        self.header
            .split_once(':')
            .and_then(|(_, rest)| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .unwrap_or("")
    }

    /// Base64-decodes the payload. ASCII whitespace is ignored.
    pub fn decode(&self) -> Result<Vec<u8>, EncodeError> {
        let compact: String = self
            .payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        Ok(LENIENT_BASE64.decode(compact)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jpeg_uri() {
        let uri = DataUri::parse("data:image/jpeg;base64,SGVsbG8=").unwrap();
        assert_eq!(uri.header(), "data:image/jpeg;base64");
        assert_eq!(uri.mime(), "image/jpeg");
        assert_eq!(uri.decode().unwrap(), b"Hello");
    }

    #[test]
    fn test_missing_comma() {
        assert!(matches!(
            DataUri::parse("data:image/jpeg;base64"),
            Err(EncodeError::MissingSeparator)
        ));
    }

    #[test]
    fn test_mime_defaults_to_empty() {
        assert_eq!(DataUri::parse("data,SGk=").unwrap().mime(), "");
        assert_eq!(DataUri::parse("data:image/png,SGk=").unwrap().mime(), "");
        assert_eq!(DataUri::parse(",SGk=").unwrap().mime(), "");
    }

    #[test]
    fn test_splits_at_first_comma_only() {
        let uri = DataUri::parse("data:text/plain;base64,SGk=,SGk=").unwrap();
        assert_eq!(uri.payload(), "SGk=,SGk=");
        assert!(matches!(uri.decode(), Err(EncodeError::InvalidBase64(_))));
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_missing_padding() {
        let uri = DataUri::parse("data:image/jpeg;base64,SGVs\nbG8").unwrap();
        assert_eq!(uri.decode().unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        let uri = DataUri::parse("data:image/jpeg;base64,SGl=").unwrap();
        assert_eq!(uri.decode().unwrap(), b"Hi");

        let unpadded = DataUri::parse("data:image/jpeg;base64,SGl").unwrap();
        assert_eq!(unpadded.decode().unwrap(), b"Hi");
    }

    #[test]
    fn test_empty_payload() {
        let uri = DataUri::parse("data:image/jpeg;base64,").unwrap();
        assert!(uri.decode().unwrap().is_empty());
    }
}
