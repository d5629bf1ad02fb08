//! Text decoding for master CSVs exported from assorted spreadsheet tools.
//!
//! The attempt order and the final permissive fallback are plain data
//! ([`EncodingPolicy`]) so a config file can reorder them.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text encoding the reader knows how to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Plain UTF-8; a BOM, if present, stays in the text.
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-8 with an optional leading BOM removed.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    /// Windows code page 1252.
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    #[serde(rename = "latin-1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    /// Label used in logs and config files.
    pub const fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode, failing on any byte sequence invalid for this encoding.
    pub fn decode_strict(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::Latin1 => Some(latin1(bytes)),
        }
    }

    /// Decode, replacing invalid sequences with U+FFFD.
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8_lossy(body).into_owned()
            }
            TextEncoding::Windows1252 => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
            TextEncoding::Latin1 => latin1(bytes),
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Ordered strict attempts, then one permissive decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingPolicy {
    /// Encodings tried strictly, in order.
    pub attempts: Vec<TextEncoding>,
    /// Used with replacement when every attempt fails.
    pub fallback: TextEncoding,
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        Self {
            attempts: vec![
                TextEncoding::Utf8,
                TextEncoding::Utf8Sig,
                TextEncoding::Windows1252,
                TextEncoding::Latin1,
            ],
            fallback: TextEncoding::Utf8,
        }
    }
}

/// Decoded text plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The text, with non-breaking spaces turned into plain spaces.
    pub text: String,
    /// Encoding that produced `text`.
    pub encoding: TextEncoding,
    /// True when the permissive fallback had to replace bytes.
    pub lossy: bool,
}

impl EncodingPolicy {
    /// Decode `bytes` using the first attempt that succeeds, else the fallback.
    pub fn decode(&self, bytes: &[u8]) -> Decoded {
        let (text, encoding, lossy) = self
            .attempts
            .iter()
            .find_map(|&enc| enc.decode_strict(bytes).map(|t| (t, enc, false)))
            .unwrap_or_else(|| (self.fallback.decode_lossy(bytes), self.fallback, true));

        Decoded {
            text: text.replace('\u{a0}', " "),
            encoding,
            lossy,
        }
    }
}
