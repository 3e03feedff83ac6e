use bstr::BString;
use thiserror::Error;

/// Reason a parse or format primitive failed.
///
/// The `Display` text doubles as the human-readable reason used by
/// [`ParseError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// A failure with no more specific classification.
    #[error("unknown error")]
    UnknownError,
    /// The output buffer has no room left before its bound.
    #[error("buffer overflow")]
    BufferOverflow,
    /// A character has no representation in the target encoding.
    #[error("unmappable character")]
    UnmappableChar,
    /// A code unit sequence is structurally invalid (including overlong
    /// UTF-8 and lone surrogates in the middle of text).
    #[error("malformed unicode sequence")]
    MalformedUnicode,
    /// A multi-unit sequence is truncated at the edge of the buffer.
    #[error("incomplete unicode sequence")]
    IncompleteUnicode,
    /// No digits (or no value at all) were found.
    #[error("empty value")]
    EmptyValue,
    /// The value does not fit the target type.
    #[error("number overflow")]
    NumberOverflow,
    /// A non-zero real number rounded to zero.
    #[error("number underflow")]
    NumberUnderflow,
    /// A grouping separator appeared where no digit group may end.
    #[error("invalid grouping")]
    InvalidGrouping,
    /// Input remained that is not part of the value.
    #[error("invalid syntax")]
    InvalidSyntax,
}

/// A failed parse of a complete text, carrying the text itself, the index of
/// the first error and its reason.
///
/// The text is kept as a [`BString`] so UTF-8, UTF-16 and raw byte inputs all
/// display (lossily) the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code} at index {index} in \"{text}\"")]
pub struct ParseError {
    text: BString,
    index: usize,
    code: ErrorCode,
}

impl ParseError {
    pub(crate) fn new(text: BString, index: usize, code: ErrorCode) -> Self {
        Self { text, index, code }
    }

    /// The text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &BString {
        &self.text
    }

    /// Code unit index of the first error.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Why parsing failed.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}
