use super::{Encoding, MAX_CODE_POINT, fail, misplaced_trailing};
use crate::{ErrorCode, ParsePosition, position::check_range};

/// UTF-8 over `[u8]`.
///
/// Only well-formed sequences decode: overlong forms (`C0`, `C1`, `E0 80..9F`,
/// `F0 80..8F`), encoded surrogates (`ED A0..BF`), values above U+10FFFF
/// (`F4 90..`, `F5..FF`) and stray continuation bytes are malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

/// Valid range of the first continuation byte after `leading`.
const fn second_unit_range(leading: u8) -> (u8, u8) {
    match leading {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}

/// Decodes the sequence starting at `index`, reading no unit at or past `end`.
/// Returns the code point and its length in units.
fn decode_at(text: &[u8], index: usize, end: usize) -> Result<(u32, usize), ErrorCode> {
    let leading = text[index];
    if Utf8::is_single(leading) {
        return Ok((u32::from(leading), 1));
    }
    if !Utf8::is_leading(leading) {
        return Err(ErrorCode::MalformedUnicode);
    }
    let trailing = Utf8::trailing_count(leading);
    let (low, high) = second_unit_range(leading);
    let mut code_point = u32::from(leading) & (0x7F >> (trailing + 1));
    for offset in 1..=trailing {
        let Some(&unit) = text[..end].get(index + offset) else {
            return Err(ErrorCode::IncompleteUnicode);
        };
        let (min, max) = if offset == 1 { (low, high) } else { (0x80, 0xBF) };
        if !(min..=max).contains(&unit) {
            return Err(ErrorCode::MalformedUnicode);
        }
        code_point = (code_point << 6) | u32::from(unit & 0x3F);
    }
    Ok((code_point, trailing + 1))
}

impl Encoding for Utf8 {
    type Unit = u8;

    const MAX_UNITS: usize = 4;

    #[inline]
    fn is_single(unit: u8) -> bool {
        unit < 0x80
    }

    #[inline]
    fn is_leading(unit: u8) -> bool {
        matches!(unit, 0xC2..=0xF4)
    }

    #[inline]
    fn is_trailing(unit: u8) -> bool {
        unit & 0xC0 == 0x80
    }

    /// Derived from the run of leading 1-bits: `110xxxxx` announces one
    /// trailing byte, `1110xxxx` two, `11110xxx` three.
    #[inline]
    fn trailing_count(leading: u8) -> usize {
        if Self::is_leading(leading) {
            leading.leading_ones() as usize - 1
        } else {
            0
        }
    }

    fn seek_to_boundary_start(
        pos: &mut ParsePosition,
        text: &[u8],
        start: usize,
    ) -> Result<(), ErrorCode> {
        let index = pos.index();
        check_range(start, index, text.len());
        if index == text.len() || !Self::is_trailing(text[index]) {
            return Ok(());
        }

        let mut leading = index;
        while Self::is_trailing(text[leading]) {
            if index - leading == Self::MAX_UNITS - 1 {
                return fail(pos, ErrorCode::MalformedUnicode, index);
            }
            if leading == start {
                return fail(pos, ErrorCode::IncompleteUnicode, index);
            }
            leading -= 1;
        }

        if !Self::is_leading(text[leading]) || Self::trailing_count(text[leading]) < index - leading {
            return fail(pos, ErrorCode::MalformedUnicode, index);
        }
        if let Err(code) = decode_at(text, leading, text.len()) {
            return fail(pos, code, leading);
        }
        pos.set_index(leading);
        Ok(())
    }

    fn seek_to_boundary_end(
        pos: &mut ParsePosition,
        text: &[u8],
        end: usize,
    ) -> Result<(), ErrorCode> {
        let index = pos.index();
        check_range(0, end.max(index), text.len());
        if index == text.len() || !Self::is_trailing(text[index]) {
            return Ok(());
        }

        let mut lookahead = ParsePosition::new(index);
        if let Err(code) = Self::seek_to_boundary_start(&mut lookahead, text, 0) {
            return fail(pos, code, index);
        }
        let leading = lookahead.index();
        let sequence_end = leading + Self::trailing_count(text[leading]) + 1;
        if sequence_end > end {
            return fail(pos, ErrorCode::IncompleteUnicode, index);
        }
        pos.set_index(sequence_end);
        Ok(())
    }

    fn decode_next(
        pos: &mut ParsePosition,
        text: &[u8],
        end: usize,
    ) -> Result<Option<u32>, ErrorCode> {
        let index = pos.index();
        check_range(index, end, text.len());
        if index == end {
            return Ok(None);
        }
        if Self::is_trailing(text[index]) {
            let code = misplaced_trailing::<Self>(text, index);
            return fail(pos, code, index);
        }
        match decode_at(text, index, end) {
            Ok((code_point, len)) => {
                pos.increase(len);
                Ok(Some(code_point))
            }
            Err(code) => fail(pos, code, index),
        }
    }

    fn step_backward(
        pos: &mut ParsePosition,
        text: &[u8],
        start: usize,
    ) -> Result<usize, ErrorCode> {
        let origin = pos.index();
        check_range(start, origin, text.len());
        if origin == start {
            return Ok(0);
        }
        if Self::is_single(text[origin - 1]) {
            pos.decrease(1);
            return Ok(1);
        }

        let mut leading = origin - 1;
        while Self::is_trailing(text[leading]) && leading > start && origin - leading < Self::MAX_UNITS
        {
            leading -= 1;
        }
        let unit = text[leading];
        if Self::is_trailing(unit) {
            let code = if origin - leading < Self::MAX_UNITS {
                ErrorCode::IncompleteUnicode
            } else {
                ErrorCode::MalformedUnicode
            };
            return fail(pos, code, leading);
        }
        if !Self::is_leading(unit) {
            return fail(pos, ErrorCode::MalformedUnicode, leading);
        }

        let expected = Self::trailing_count(unit) + 1;
        let actual = origin - leading;
        if expected > actual {
            return fail(pos, ErrorCode::IncompleteUnicode, leading);
        }
        if expected < actual {
            return fail(pos, ErrorCode::MalformedUnicode, leading);
        }
        if let Err(code) = decode_at(text, leading, origin) {
            return fail(pos, code, leading);
        }
        pos.set_index(leading);
        Ok(actual)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode(
        pos: &mut ParsePosition,
        buffer: &mut [u8],
        end: usize,
        code_point: u32,
    ) -> Result<usize, ErrorCode> {
        let index = pos.index();
        check_range(index, end, buffer.len());
        let len = match code_point {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xD7FF | 0xE000..=0xFFFF => 3,
            0x1_0000..=MAX_CODE_POINT => 4,
            _ => return fail(pos, ErrorCode::MalformedUnicode, index),
        };
        if end - index < len {
            return fail(pos, ErrorCode::BufferOverflow, index);
        }

        let out = &mut buffer[index..index + len];
        match len {
            1 => out[0] = code_point as u8,
            2 => {
                out[0] = 0xC0 | (code_point >> 6) as u8;
                out[1] = 0x80 | (code_point & 0x3F) as u8;
            }
            3 => {
                out[0] = 0xE0 | (code_point >> 12) as u8;
                out[1] = 0x80 | ((code_point >> 6) & 0x3F) as u8;
                out[2] = 0x80 | (code_point & 0x3F) as u8;
            }
            _ => {
                out[0] = 0xF0 | (code_point >> 18) as u8;
                out[1] = 0x80 | ((code_point >> 12) & 0x3F) as u8;
                out[2] = 0x80 | ((code_point >> 6) & 0x3F) as u8;
                out[3] = 0x80 | (code_point & 0x3F) as u8;
            }
        }
        pos.increase(len);
        Ok(len)
    }
}
