//! Header text encodings
//!
//! A header that is valid UTF-8 is read as UTF-8. Anything else is read as Latin-1, which maps every byte to exactly
//! one `char`, so the segmenter never rejects a file. Artifacts derived from a Latin-1 header are written back in
//! Latin-1, which gives an annotated header the same bytes as its input outside the inserted blocks.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl SourceEncoding {
    /// Decode raw header bytes, falling back to Latin-1 when they are not UTF-8.
    pub fn decode(bytes: Vec<u8>) -> (String, SourceEncoding) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, SourceEncoding::Utf8),
            Err(err) => {
                let text = err.into_bytes().into_iter().map(char::from).collect();
                (text, SourceEncoding::Latin1)
            }
        }
    }

    /// Encode `text` for writing.
    ///
    /// Latin-1 output that contains a character above U+00FF (e.g. from a `${author}` value) is written as UTF-8.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            SourceEncoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            SourceEncoding::Latin1 => match text.chars().map(u8::try_from).collect::<Result<Vec<u8>, _>>() {
                Ok(bytes) => Cow::Owned(bytes),
                Err(_) => {
                    tracing::warn!("output has characters outside Latin-1; writing UTF-8");
                    Cow::Borrowed(text.as_bytes())
                }
            },
        }
    }
}
