//! Code point boundary engine for UTF-8 and UTF-16 buffers.
//!
//! Both encodings expose the same operations through [`Encoding`]:
//! classify a code unit, seek to the boundary enclosing the cursor, step one
//! code point forward or backward, decode, and encode.
//!
//! Conventions
//! - Every operation works on a [`ParsePosition`] and a buffer, bounded by a
//!   half-open limit: `end` for forward operations, `start` for backward ones.
//! - Failures return `Err(ErrorCode)` and are also recorded on the cursor; the
//!   cursor index is left where it was.
//! - Reaching the limit exactly is not a failure: steps return `Ok(0)` and
//!   decodes return `Ok(None)`.
//! - `IncompleteUnicode` means a sequence is cut off by the buffer edge or the
//!   limit; `MalformedUnicode` means it can never be valid.
//! - Index ranges outside the buffer are programming errors and panic.

use alloc::string::String;

use bstr::BString;

use crate::{ErrorCode, ParsePosition};

mod utf16;
mod utf8;

pub use utf8::Utf8;
pub use utf16::{SURROGATE_COMPOSE_OFFSET, SURROGATE_DECOMPOSE_OFFSET, Utf16};

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// A variable-length Unicode encoding over fixed-width code units.
pub trait Encoding {
    /// Storage unit: `u8` for UTF-8, `u16` for UTF-16.
    type Unit: Copy + Default + Into<u32> + core::fmt::Debug;

    /// Most units a single code point can occupy.
    const MAX_UNITS: usize;

    /// `unit` is a complete code point on its own.
    fn is_single(unit: Self::Unit) -> bool;

    /// `unit` starts a multi-unit sequence.
    fn is_leading(unit: Self::Unit) -> bool;

    /// `unit` continues a multi-unit sequence.
    fn is_trailing(unit: Self::Unit) -> bool;

    /// Number of trailing units announced by `leading`; 0 for anything that is
    /// not a leading unit.
    fn trailing_count(leading: Self::Unit) -> usize;

    /// If the cursor sits inside a sequence, moves it back to the first unit of
    /// that sequence. No-op at a boundary. `start` is the lowest index the
    /// search may look at.
    ///
    /// # Errors
    ///
    /// `IncompleteUnicode` if the sequence begins before `start`,
    /// `MalformedUnicode` if the enclosing sequence is invalid.
    fn seek_to_boundary_start(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        start: usize,
    ) -> Result<(), ErrorCode>;

    /// If the cursor sits inside a sequence, moves it forward past the last
    /// unit of that sequence. No-op at a boundary.
    ///
    /// # Errors
    ///
    /// `IncompleteUnicode` if the sequence extends past `end`,
    /// `MalformedUnicode` if the enclosing sequence is invalid.
    fn seek_to_boundary_end(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        end: usize,
    ) -> Result<(), ErrorCode>;

    /// Decodes the code point at the cursor and advances past it.
    ///
    /// # Errors
    ///
    /// `IncompleteUnicode` for a sequence cut off by `end` or for a cursor that
    /// sits inside a sequence, `MalformedUnicode` for invalid units.
    fn decode_next(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        end: usize,
    ) -> Result<Option<u32>, ErrorCode>;

    /// Moves the cursor back over one code point, returning the number of units
    /// crossed.
    ///
    /// # Errors
    ///
    /// `IncompleteUnicode` for a sequence cut off by `start` or by the cursor,
    /// `MalformedUnicode` for invalid units.
    fn step_backward(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        start: usize,
    ) -> Result<usize, ErrorCode>;

    /// Writes `code_point` at the cursor and advances past it, returning the
    /// number of units written.
    ///
    /// # Errors
    ///
    /// `BufferOverflow` if fewer units than needed remain before `end`,
    /// `MalformedUnicode` for surrogates and values above [`MAX_CODE_POINT`].
    fn encode(
        pos: &mut ParsePosition,
        buffer: &mut [Self::Unit],
        end: usize,
        code_point: u32,
    ) -> Result<usize, ErrorCode>;

    /// Advances the cursor over one code point, returning the number of units
    /// crossed.
    ///
    /// # Errors
    ///
    /// Same as [`decode_next`](Self::decode_next).
    fn step_forward(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        end: usize,
    ) -> Result<usize, ErrorCode> {
        let origin = pos.index();
        Self::decode_next(pos, text, end)?;
        Ok(pos.index() - origin)
    }

    /// Decodes the code point before the cursor and moves back over it.
    ///
    /// Implemented as a backward step followed by a forward decode; on failure
    /// the cursor is restored.
    ///
    /// # Errors
    ///
    /// Same as [`step_backward`](Self::step_backward).
    fn decode_previous(
        pos: &mut ParsePosition,
        text: &[Self::Unit],
        start: usize,
    ) -> Result<Option<u32>, ErrorCode> {
        let origin = pos.index();
        if Self::step_backward(pos, text, start)? == 0 {
            return Ok(None);
        }
        let boundary = pos.index();
        match Self::decode_next(pos, text, origin) {
            Ok(code_point) => {
                pos.set_index(boundary);
                Ok(code_point)
            }
            Err(code) => {
                pos.set_index(origin);
                Err(code)
            }
        }
    }
}

/// A text that can be parsed through the boundary engine.
pub trait Text {
    /// Encoding of the units returned by [`units`](Self::units).
    type Encoding: Encoding;

    /// The code units of the text.
    fn units(&self) -> &[<Self::Encoding as Encoding>::Unit];

    /// A lossy copy for error reporting.
    fn to_bstring(&self) -> BString;
}

impl Text for str {
    type Encoding = Utf8;

    fn units(&self) -> &[u8] {
        self.as_bytes()
    }

    fn to_bstring(&self) -> BString {
        BString::from(self)
    }
}

impl Text for [u8] {
    type Encoding = Utf8;

    fn units(&self) -> &[u8] {
        self
    }

    fn to_bstring(&self) -> BString {
        BString::from(self)
    }
}

impl Text for [u16] {
    type Encoding = Utf16;

    fn units(&self) -> &[u16] {
        self
    }

    fn to_bstring(&self) -> BString {
        let text: String = char::decode_utf16(self.iter().copied())
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        BString::from(text)
    }
}

/// `code_point` is a Unicode white space character.
#[must_use]
pub fn is_blank(code_point: u32) -> bool {
    char::from_u32(code_point).is_some_and(char::is_whitespace)
}

/// Records `code` at the cursor and returns it as an error.
pub(crate) fn fail<T>(pos: &mut ParsePosition, code: ErrorCode, index: usize) -> Result<T, ErrorCode> {
    pos.set_error(code, index);
    Err(code)
}

/// Classifies a unit the cursor cannot start decoding from: inside a valid
/// sequence (or cut off at the buffer start) is incomplete, anything else is
/// malformed.
pub(crate) fn misplaced_trailing<E: Encoding>(text: &[E::Unit], index: usize) -> ErrorCode {
    let mut lookahead = ParsePosition::new(index);
    match E::seek_to_boundary_start(&mut lookahead, text, 0) {
        Ok(()) | Err(ErrorCode::IncompleteUnicode) => ErrorCode::IncompleteUnicode,
        Err(code) => code,
    }
}
