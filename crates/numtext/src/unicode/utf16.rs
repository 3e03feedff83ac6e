use super::{Encoding, MAX_CODE_POINT, fail, misplaced_trailing};
use crate::{ErrorCode, ParsePosition, position::check_range};

/// Subtracted from `(leading << 10) + trailing` to compose a supplementary
/// code point from a surrogate pair.
pub const SURROGATE_COMPOSE_OFFSET: u32 = (0xD800 << 10) + 0xDC00 - 0x1_0000;

/// Added to `code_point >> 10` to obtain the leading surrogate.
pub const SURROGATE_DECOMPOSE_OFFSET: u32 = 0xD800 - (0x1_0000 >> 10);

/// UTF-16 over `[u16]`. Only surrogate pairs span more than one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16;

impl Utf16 {
    /// Composes a supplementary code point from a surrogate pair.
    #[must_use]
    pub const fn compose(leading: u16, trailing: u16) -> u32 {
        ((leading as u32) << 10) + trailing as u32 - SURROGATE_COMPOSE_OFFSET
    }

    /// Splits a supplementary code point into its surrogate pair.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn decompose(code_point: u32) -> (u16, u16) {
        (
            ((code_point >> 10) + SURROGATE_DECOMPOSE_OFFSET) as u16,
            ((code_point & 0x3FF) | 0xDC00) as u16,
        )
    }
}

impl Encoding for Utf16 {
    type Unit = u16;

    const MAX_UNITS: usize = 2;

    #[inline]
    fn is_single(unit: u16) -> bool {
        !(0xD800..=0xDFFF).contains(&unit)
    }

    #[inline]
    fn is_leading(unit: u16) -> bool {
        (0xD800..=0xDBFF).contains(&unit)
    }

    #[inline]
    fn is_trailing(unit: u16) -> bool {
        (0xDC00..=0xDFFF).contains(&unit)
    }

    #[inline]
    fn trailing_count(leading: u16) -> usize {
        usize::from(Self::is_leading(leading))
    }

    fn seek_to_boundary_start(
        pos: &mut ParsePosition,
        text: &[u16],
        start: usize,
    ) -> Result<(), ErrorCode> {
        let index = pos.index();
        check_range(start, index, text.len());
        if index == text.len() || !Self::is_trailing(text[index]) {
            return Ok(());
        }
        if index == start {
            return fail(pos, ErrorCode::IncompleteUnicode, index);
        }
        if !Self::is_leading(text[index - 1]) {
            return fail(pos, ErrorCode::MalformedUnicode, index);
        }
        pos.decrease(1);
        Ok(())
    }

    fn seek_to_boundary_end(
        pos: &mut ParsePosition,
        text: &[u16],
        end: usize,
    ) -> Result<(), ErrorCode> {
        let index = pos.index();
        check_range(0, end.max(index), text.len());
        if index == text.len() || !Self::is_trailing(text[index]) {
            return Ok(());
        }
        if index == 0 {
            return fail(pos, ErrorCode::IncompleteUnicode, index);
        }
        if !Self::is_leading(text[index - 1]) {
            return fail(pos, ErrorCode::MalformedUnicode, index);
        }
        if index >= end {
            return fail(pos, ErrorCode::IncompleteUnicode, index);
        }
        pos.increase(1);
        Ok(())
    }

    fn decode_next(
        pos: &mut ParsePosition,
        text: &[u16],
        end: usize,
    ) -> Result<Option<u32>, ErrorCode> {
        let index = pos.index();
        check_range(index, end, text.len());
        if index == end {
            return Ok(None);
        }
        let unit = text[index];
        if Self::is_single(unit) {
            pos.increase(1);
            return Ok(Some(u32::from(unit)));
        }
        if Self::is_trailing(unit) {
            let code = misplaced_trailing::<Self>(text, index);
            return fail(pos, code, index);
        }
        if index + 1 == end {
            return fail(pos, ErrorCode::IncompleteUnicode, index);
        }
        let next = text[index + 1];
        if !Self::is_trailing(next) {
            return fail(pos, ErrorCode::MalformedUnicode, index);
        }
        pos.increase(2);
        Ok(Some(Self::compose(unit, next)))
    }

    fn step_backward(
        pos: &mut ParsePosition,
        text: &[u16],
        start: usize,
    ) -> Result<usize, ErrorCode> {
        let origin = pos.index();
        check_range(start, origin, text.len());
        if origin == start {
            return Ok(0);
        }
        let unit = text[origin - 1];
        if Self::is_single(unit) {
            pos.decrease(1);
            return Ok(1);
        }
        // A leading surrogate right before the cursor has its pair cut off.
        if Self::is_leading(unit) || origin - 1 == start {
            return fail(pos, ErrorCode::IncompleteUnicode, origin - 1);
        }
        if !Self::is_leading(text[origin - 2]) {
            return fail(pos, ErrorCode::MalformedUnicode, origin - 1);
        }
        pos.decrease(2);
        Ok(2)
    }

    fn encode(
        pos: &mut ParsePosition,
        buffer: &mut [u16],
        end: usize,
        code_point: u32,
    ) -> Result<usize, ErrorCode> {
        let index = pos.index();
        check_range(index, end, buffer.len());
        match code_point {
            0..=0xD7FF | 0xE000..=0xFFFF => {
                if index == end {
                    return fail(pos, ErrorCode::BufferOverflow, index);
                }
                buffer[index] = u16::try_from(code_point).unwrap_or_default();
                pos.increase(1);
                Ok(1)
            }
            0x1_0000..=MAX_CODE_POINT => {
                if end - index < 2 {
                    return fail(pos, ErrorCode::BufferOverflow, index);
                }
                let (leading, trailing) = Self::decompose(code_point);
                buffer[index] = leading;
                buffer[index + 1] = trailing;
                pos.increase(2);
                Ok(2)
            }
            _ => fail(pos, ErrorCode::MalformedUnicode, index),
        }
    }
}
