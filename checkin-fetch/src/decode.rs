//! Response body decoding.
//!
//! Forums are inconsistent about their charset, often from one page to the
//! next, so every page fetch names the encoding it expects.

use std::fmt;

use encoding_rs::{Encoding, BIG5, GB18030, GBK, UTF_8};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Text encoding of a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// UTF-8.
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// GBK (also accepts GB2312 pages).
    #[serde(alias = "gb2312")]
    Gbk,
    /// GB18030.
    Gb18030,
    /// Big5.
    Big5,
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Gbk => GBK,
            Self::Gb18030 => GB18030,
            Self::Big5 => BIG5,
        }
    }

    /// Returns the WHATWG label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Gbk => "gbk",
            Self::Gb18030 => "gb18030",
            Self::Big5 => "big5",
        }
    }

    /// Decodes `bytes`. Malformed sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, _, had_errors) = self.encoding().decode(bytes);
        if had_errors {
            debug!(encoding = %self, "Body contained malformed sequences");
        }
        text.into_owned()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
