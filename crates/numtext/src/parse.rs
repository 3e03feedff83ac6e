//! Stateless parsing primitives over a [`ParsePosition`] and a code unit
//! buffer.
//!
//! Every function reads from the cursor index up to `end` (exclusive) and
//! leaves the cursor after what it consumed. Integer readers never abort on
//! bad data: they record the first error on the cursor, keep consuming the
//! digit run and return a saturated value. Callers check
//! [`ParsePosition::success`] before trusting the result.
//!
//! Code points that cannot be decoded end a run like any other non-matching
//! character; the reader does not record a Unicode error for them.

use alloc::string::String;

use crate::{
    ErrorCode, ParsePosition, Radix,
    position::check_range,
    unicode::{Encoding, is_blank},
};

/// Decodes the code point at `index` without touching any cursor. Returns the
/// code point and the index just past it.
fn peek<E: Encoding>(text: &[E::Unit], index: usize, end: usize) -> Option<(u32, usize)> {
    let mut lookahead = ParsePosition::new(index);
    match E::decode_next(&mut lookahead, text, end) {
        Ok(Some(code_point)) => Some((code_point, lookahead.index())),
        Ok(None) | Err(_) => None,
    }
}

fn peek_char<E: Encoding>(text: &[E::Unit], index: usize, end: usize) -> Option<(char, usize)> {
    let (code_point, next) = peek::<E>(text, index, end)?;
    Some((char::from_u32(code_point)?, next))
}

/// ASCII digit value of `code_point` in `radix`; letters of either case count
/// for radices above 10.
fn digit_value(code_point: u32, radix: u32) -> Option<u8> {
    char::from_u32(code_point)?
        .to_digit(radix)
        .and_then(|digit| u8::try_from(digit).ok())
}

fn skip_while<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    matches: impl Fn(u32) -> bool,
) -> usize {
    check_range(pos.index(), end, text.len());
    let start = pos.index();
    while let Some((code_point, next)) = peek::<E>(text, pos.index(), end) {
        if !matches(code_point) {
            break;
        }
        pos.set_index(next);
    }
    pos.index() - start
}

/// Skips a run of blank code points, returning the number of units skipped.
///
/// ```rust
/// use numtext::{ParsePosition, Utf8, parse::skip_blanks};
///
/// let mut pos = ParsePosition::new(0);
/// assert_eq!(skip_blanks::<Utf8>(&mut pos, b"   abc", 6), 3);
/// assert_eq!(pos.index(), 3);
/// ```
pub fn skip_blanks<E: Encoding>(pos: &mut ParsePosition, text: &[E::Unit], end: usize) -> usize {
    skip_while::<E>(pos, text, end, is_blank)
}

/// Skips a run of non-blank code points, returning the number of units
/// skipped.
pub fn skip_non_blanks<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
) -> usize {
    skip_while::<E>(pos, text, end, |code_point| !is_blank(code_point))
}

/// Consumes one optional sign character and returns `-1` for `minus`, `1`
/// otherwise. Blanks are not skipped.
pub fn get_sign<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    plus: char,
    minus: char,
) -> i32 {
    check_range(pos.index(), end, text.len());
    match peek_char::<E>(text, pos.index(), end) {
        Some((ch, next)) if ch == minus => {
            pos.set_index(next);
            -1
        }
        Some((ch, next)) if ch == plus => {
            pos.set_index(next);
            1
        }
        _ => 1,
    }
}

/// Recognizes `0b`/`0B` and `0x`/`0X` at `index`, returning the radix and the
/// index after the prefix.
fn prefix_at<E: Encoding>(text: &[E::Unit], index: usize, end: usize) -> Option<(u32, usize)> {
    let (zero, next) = peek_char::<E>(text, index, end)?;
    if zero != '0' {
        return None;
    }
    match peek_char::<E>(text, next, end)? {
        ('b' | 'B', after) => Some((2, after)),
        ('x' | 'X', after) => Some((16, after)),
        _ => None,
    }
}

/// Determines the radix of the number at the cursor.
///
/// A forced binary or hexadecimal `radix` consumes a matching `0b`/`0x`
/// prefix when present. The octal prefix `0` is never consumed since it is
/// indistinguishable from a leading zero. With `radix` unset, `0b` and `0x`
/// select binary and hexadecimal (consuming the prefix), a lone leading `0`
/// selects octal, and anything else yields `default_radix`.
///
/// ```rust
/// use numtext::{ParsePosition, Utf8, parse::get_radix};
///
/// let mut pos = ParsePosition::new(0);
/// assert_eq!(get_radix::<Utf8>(&mut pos, b"0x1A", 4, None, 10), 16);
/// assert_eq!(pos.index(), 2);
///
/// let mut pos = ParsePosition::new(0);
/// assert_eq!(get_radix::<Utf8>(&mut pos, b"017", 3, None, 10), 8);
/// assert_eq!(pos.index(), 0);
/// ```
pub fn get_radix<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    radix: Option<Radix>,
    default_radix: u32,
) -> u32 {
    check_range(pos.index(), end, text.len());
    let prefix = prefix_at::<E>(text, pos.index(), end);
    match radix {
        Some(forced) => {
            if let Some((detected, after)) = prefix {
                if detected == forced.value() {
                    pos.set_index(after);
                }
            }
            forced.value()
        }
        None => {
            if let Some((detected, after)) = prefix {
                pos.set_index(after);
                detected
            } else if matches!(peek_char::<E>(text, pos.index(), end), Some(('0', _))) {
                8
            } else {
                default_radix
            }
        }
    }
}

macro_rules! decimal_reader {
    ($(#[$doc:meta])* $name:ident, $(#[$grouped_doc:meta])* $grouped:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name<E: Encoding>(
            pos: &mut ParsePosition,
            text: &[E::Unit],
            end: usize,
            sign: i32,
            max_value: $ty,
            max_digits: usize,
        ) -> $ty {
            $grouped::<E>(pos, text, end, sign, max_value, max_digits, None)
        }

        $(#[$grouped_doc])*
        pub fn $grouped<E: Encoding>(
            pos: &mut ParsePosition,
            text: &[E::Unit],
            end: usize,
            sign: i32,
            max_value: $ty,
            max_digits: usize,
            separator: Option<char>,
        ) -> $ty {
            check_range(pos.index(), end, text.len());
            assert!(max_value > 0, "max_value must be positive, got {max_value}");

            // The magnitude accumulates negated so the minimum value, which has
            // no positive counterpart, fits.
            let limit: $ty = if sign < 0 { -max_value - 1 } else { -max_value };
            let multiply_limit = limit / 10;

            let start = pos.index();
            let mut index = start;
            let mut value: $ty = 0;
            let mut digits = 0usize;
            let mut overflow = false;
            let mut pending_separator = None;

            while digits < max_digits {
                let Some((code_point, next)) = peek::<E>(text, index, end) else {
                    break;
                };
                if let Some(digit) = digit_value(code_point, 10) {
                    let digit = <$ty>::from(digit);
                    if !overflow {
                        if value < multiply_limit || value * 10 < limit + digit {
                            overflow = true;
                            pos.set_error(ErrorCode::NumberOverflow, index);
                        } else {
                            value = value * 10 - digit;
                        }
                    }
                    digits += 1;
                    pending_separator = None;
                    index = next;
                    continue;
                }

                let is_separator = separator.is_some_and(|sep| u32::from(sep) == code_point);
                if !is_separator {
                    break;
                }
                if digits == 0 {
                    pos.set_error(ErrorCode::InvalidGrouping, index);
                    break;
                }
                if pending_separator.is_some() {
                    break;
                }
                pending_separator = Some(index);
                index = next;
            }

            if let Some(at) = pending_separator {
                pos.set_error(ErrorCode::InvalidGrouping, at);
                index = at;
            }
            pos.set_index(index);

            if digits == 0 {
                pos.set_error(ErrorCode::EmptyValue, start);
                return 0;
            }
            if overflow {
                return if sign < 0 { limit } else { max_value };
            }
            if sign < 0 { value } else { -value }
        }
    };
}

decimal_reader!(
    /// Reads decimal digits into a value no larger than `max_value` in
    /// magnitude (`max_value + 1` when `sign` is negative), consuming at most
    /// `max_digits` digits.
    ///
    /// On overflow the error is recorded at the first offending digit, the
    /// remaining digits are still consumed, and the result saturates to
    /// `max_value` or `-max_value - 1`. Without any digit the result is 0 with
    /// `EmptyValue`.
    ///
    /// # Panics
    ///
    /// Panics if `max_value` is not positive or the cursor lies past `end`.
    get_decimal_int,
    /// [`get_decimal_int`] that also skips `separator` between digits.
    ///
    /// A separator before the first digit, directly after another separator,
    /// or not followed by a digit records `InvalidGrouping` at that separator
    /// and ends the run there.
    ///
    /// # Panics
    ///
    /// Same as [`get_decimal_int`].
    get_decimal_int_grouped,
    i32
);

decimal_reader!(
    /// 64-bit [`get_decimal_int`].
    ///
    /// # Panics
    ///
    /// Same as [`get_decimal_int`].
    get_decimal_long,
    /// 64-bit [`get_decimal_int_grouped`].
    ///
    /// # Panics
    ///
    /// Same as [`get_decimal_int`].
    get_decimal_long_grouped,
    i64
);

macro_rules! special_radix_reader {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name<E: Encoding>(
            pos: &mut ParsePosition,
            text: &[E::Unit],
            end: usize,
            sign: i32,
            radix: u32,
            unsigned_max: $ty,
            max_digits: usize,
        ) -> $ty {
            assert!(
                matches!(radix, 2 | 4 | 8 | 16),
                "special radix must be 2, 4, 8 or 16, got {radix}"
            );
            check_range(pos.index(), end, text.len());

            let shift = radix.trailing_zeros();
            let limit = unsigned_max >> shift;
            let start = pos.index();
            let mut index = start;
            let mut value: $ty = 0;
            let mut digits = 0usize;
            let mut overflow = false;

            while digits < max_digits {
                let Some((code_point, next)) = peek::<E>(text, index, end) else {
                    break;
                };
                let Some(digit) = digit_value(code_point, radix) else {
                    break;
                };
                if !overflow {
                    if value <= limit {
                        value = (value << shift) | <$ty>::from(digit);
                    } else {
                        overflow = true;
                        pos.set_error(ErrorCode::NumberOverflow, index);
                    }
                }
                digits += 1;
                index = next;
            }
            pos.set_index(index);

            if digits == 0 {
                pos.set_error(ErrorCode::EmptyValue, start);
                return 0;
            }
            if overflow {
                return unsigned_max;
            }
            if sign < 0 { value.wrapping_neg() } else { value }
        }
    };
}

special_radix_reader!(
    /// Reads digits of a power-of-two `radix` into an unsigned bit pattern no
    /// larger than `unsigned_max`, consuming at most `max_digits` digits.
    ///
    /// The sign never affects digit accumulation: a negative `sign` negates
    /// the finished bit pattern, so `-ff` yields `0xFF.wrapping_neg()`. On
    /// overflow the error is recorded at the first offending digit, remaining
    /// digits are consumed, and the result is `unsigned_max`.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not 2, 4, 8 or 16, or the cursor lies past `end`.
    get_special_radix_int,
    u32
);

special_radix_reader!(
    /// 64-bit [`get_special_radix_int`].
    ///
    /// # Panics
    ///
    /// Same as [`get_special_radix_int`].
    get_special_radix_long,
    u64
);

/// Copies up to `max_digits` digits of `radix` (2 to 36, ASCII letters of
/// either case above 9) into `out`, returning how many were copied. Without
/// any digit the cursor is not moved and `EmptyValue` is recorded.
///
/// # Panics
///
/// Panics if `radix` is outside 2 to 36 or the cursor lies past `end`.
pub fn get_digit_run<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    radix: u32,
    max_digits: usize,
    out: &mut String,
) -> usize {
    assert!((2..=36).contains(&radix), "radix must be 2 to 36, got {radix}");
    check_range(pos.index(), end, text.len());
    let start = pos.index();
    let mut index = start;
    let mut digits = 0usize;
    while digits < max_digits {
        match peek_char::<E>(text, index, end) {
            Some((ch, next)) if ch.is_digit(radix) => {
                out.push(ch);
                digits += 1;
                index = next;
            }
            _ => break,
        }
    }
    if digits == 0 {
        pos.set_error(ErrorCode::EmptyValue, start);
    }
    pos.set_index(index);
    digits
}

/// What [`get_real_lexeme`] collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealLexeme {
    /// Mantissa digits, integer and fraction part together.
    pub digits: usize,
    /// At least one mantissa digit is not `0`.
    pub nonzero: bool,
}

fn push_digits<E: Encoding>(
    text: &[E::Unit],
    index: &mut usize,
    end: usize,
    out: &mut String,
    lexeme: &mut RealLexeme,
) {
    while let Some((ch, next)) = peek_char::<E>(text, *index, end) {
        if !ch.is_ascii_digit() {
            break;
        }
        out.push(ch);
        lexeme.digits += 1;
        lexeme.nonzero |= ch != '0';
        *index = next;
    }
}

/// Collects an unsigned real number into `out` in the form `core` parses:
/// digits, an optional `decimal_separator` (written as `.`) with fraction
/// digits, and an optional exponent introduced by `exponent` (ASCII case
/// insensitive) with an optional `+`/`-`.
///
/// An exponent marker not followed by digits is left unconsumed. Without any
/// mantissa digit, the cursor is not moved and `EmptyValue` is recorded.
pub fn get_real_lexeme<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    decimal_separator: char,
    exponent: char,
    out: &mut String,
) -> RealLexeme {
    check_range(pos.index(), end, text.len());
    let start = pos.index();
    let mut index = start;
    let mut lexeme = RealLexeme::default();

    push_digits::<E>(text, &mut index, end, out, &mut lexeme);
    if let Some((ch, next)) = peek_char::<E>(text, index, end) {
        if ch == decimal_separator {
            out.push('.');
            index = next;
            push_digits::<E>(text, &mut index, end, out, &mut lexeme);
        }
    }

    if lexeme.digits == 0 {
        out.clear();
        pos.set_error(ErrorCode::EmptyValue, start);
        return lexeme;
    }

    if let Some((ch, next)) = peek_char::<E>(text, index, end) {
        if ch.eq_ignore_ascii_case(&exponent) {
            let mantissa_len = out.len();
            let mut exponent_index = next;
            out.push('e');
            if let Some((sign @ ('+' | '-'), after)) = peek_char::<E>(text, next, end) {
                out.push(sign);
                exponent_index = after;
            }
            let mut exponent_digits = RealLexeme::default();
            push_digits::<E>(text, &mut exponent_index, end, out, &mut exponent_digits);
            if exponent_digits.digits == 0 {
                out.truncate(mantissa_len);
            } else {
                index = exponent_index;
            }
        }
    }

    pos.set_index(index);
    lexeme
}

/// Consumes `symbol` if the text at the cursor spells it, comparing ASCII
/// letters case-insensitively. An empty symbol never matches.
pub fn get_symbol<E: Encoding>(
    pos: &mut ParsePosition,
    text: &[E::Unit],
    end: usize,
    symbol: &str,
) -> bool {
    check_range(pos.index(), end, text.len());
    if symbol.is_empty() {
        return false;
    }
    let mut index = pos.index();
    for expected in symbol.chars() {
        match peek_char::<E>(text, index, end) {
            Some((ch, next)) if ch.eq_ignore_ascii_case(&expected) => index = next,
            _ => return false,
        }
    }
    pos.set_index(index);
    true
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::{Utf8, Utf16};

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn skip_blanks_stops_at_first_non_blank() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_blanks::<Utf8>(&mut pos, b"   abc", 6), 3);
        assert_eq!(pos.index(), 3);
        assert!(pos.success());
    }

    #[test]
    fn skip_blanks_handles_wide_blanks() {
        let text = utf16("\u{3000}\t7");
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_blanks::<Utf16>(&mut pos, &text, text.len()), 2);

        let bytes = "\u{3000} 7".as_bytes();
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_blanks::<Utf8>(&mut pos, bytes, bytes.len()), 4);
    }

    #[test]
    fn skip_blanks_respects_bound() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_blanks::<Utf8>(&mut pos, b"    x", 2), 2);
        assert_eq!(pos.index(), 2);
    }

    #[test]
    fn skip_non_blanks_stops_at_blank() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_non_blanks::<Utf8>(&mut pos, b"abc def", 7), 3);
        assert_eq!(pos.index(), 3);
    }

    #[test]
    fn skip_blanks_stops_at_malformed_input() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(skip_blanks::<Utf8>(&mut pos, b" \xC0\x80", 3), 1);
        assert!(pos.success());
    }

    #[rstest]
    #[case(b"-7", -1, 1)]
    #[case(b"+7", 1, 1)]
    #[case(b"7", 1, 0)]
    #[case(b" -7", 1, 0)]
    #[case(b"", 1, 0)]
    fn get_sign_consumes_one_sign(#[case] text: &[u8], #[case] sign: i32, #[case] index: usize) {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_sign::<Utf8>(&mut pos, text, text.len(), '+', '-'), sign);
        assert_eq!(pos.index(), index);
    }

    #[test]
    fn get_sign_uses_given_symbols() {
        let text = utf16("\u{2212}5");
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_sign::<Utf16>(&mut pos, &text, 2, '+', '\u{2212}'), -1);
        assert_eq!(pos.index(), 1);
    }

    #[rstest]
    #[case::auto_hex(b"0x1A", None, 16, 2)]
    #[case::auto_hex_upper(b"0X1A", None, 16, 2)]
    #[case::auto_binary(b"0b101", None, 2, 2)]
    #[case::auto_octal(b"017", None, 8, 0)]
    #[case::auto_lone_zero(b"0", None, 8, 0)]
    #[case::auto_default(b"42", None, 10, 0)]
    #[case::forced_hex_with_prefix(b"0xff", Some(Radix::Hexadecimal), 16, 2)]
    #[case::forced_hex_without_prefix(b"ff", Some(Radix::Hexadecimal), 16, 0)]
    #[case::forced_hex_ignores_binary_prefix(b"0b1", Some(Radix::Hexadecimal), 16, 0)]
    #[case::forced_binary(b"0B11", Some(Radix::Binary), 2, 2)]
    #[case::forced_octal_keeps_zero(b"017", Some(Radix::Octal), 8, 0)]
    #[case::forced_decimal(b"0x10", Some(Radix::Decimal), 10, 0)]
    fn get_radix_detects_prefixes(
        #[case] text: &[u8],
        #[case] radix: Option<Radix>,
        #[case] expected: u32,
        #[case] index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_radix::<Utf8>(&mut pos, text, text.len(), radix, 10), expected);
        assert_eq!(pos.index(), index);
        assert!(pos.success());
    }

    #[rstest]
    #[case(b"0", 1, 0, 1)]
    #[case(b"123", 1, 123, 3)]
    #[case(b"123", -1, -123, 3)]
    #[case(b"2147483647", 1, i32::MAX, 10)]
    #[case(b"2147483648", -1, i32::MIN, 10)]
    #[case(b"007x", 1, 7, 3)]
    fn decimal_int_reads_digits(
        #[case] text: &[u8],
        #[case] sign: i32,
        #[case] expected: i32,
        #[case] index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        let value = get_decimal_int::<Utf8>(&mut pos, text, text.len(), sign, i32::MAX, usize::MAX);
        assert_eq!(value, expected);
        assert_eq!(pos.index(), index);
        assert!(pos.success());
    }

    #[rstest]
    #[case(b"2147483648", 1, i32::MAX, 9)]
    #[case(b"2147483649", -1, i32::MIN, 9)]
    #[case(b"99999999999", 1, i32::MAX, 9)]
    #[case(b"21474836470", 1, i32::MAX, 10)]
    fn decimal_int_saturates_on_overflow(
        #[case] text: &[u8],
        #[case] sign: i32,
        #[case] expected: i32,
        #[case] error_index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        let value = get_decimal_int::<Utf8>(&mut pos, text, text.len(), sign, i32::MAX, usize::MAX);
        assert_eq!(value, expected);
        assert_eq!(pos.error_code(), Some(ErrorCode::NumberOverflow));
        assert_eq!(pos.error_index(), Some(error_index));
        assert_eq!(pos.index(), text.len(), "all digits are consumed");
    }

    #[test]
    fn decimal_int_saturates_to_narrow_max() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_decimal_int::<Utf8>(&mut pos, b"1280", 4, 1, 127, usize::MAX), 127);
        assert_eq!(pos.error_code(), Some(ErrorCode::NumberOverflow));
        assert_eq!(pos.index(), 4);

        let mut pos = ParsePosition::new(0);
        assert_eq!(get_decimal_int::<Utf8>(&mut pos, b"128", 3, -1, 127, usize::MAX), -128);
        assert!(pos.success());
    }

    #[test]
    fn decimal_long_handles_minimum() {
        let text = b"9223372036854775808";
        let mut pos = ParsePosition::new(0);
        let value = get_decimal_long::<Utf8>(&mut pos, text, text.len(), -1, i64::MAX, usize::MAX);
        assert_eq!(value, i64::MIN);
        assert!(pos.success());

        let mut pos = ParsePosition::new(0);
        let value = get_decimal_long::<Utf8>(&mut pos, text, text.len(), 1, i64::MAX, usize::MAX);
        assert_eq!(value, i64::MAX);
        assert_eq!(pos.error_code(), Some(ErrorCode::NumberOverflow));
    }

    #[test]
    fn decimal_reader_without_digits_is_empty() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_decimal_int::<Utf8>(&mut pos, b"abc", 3, 1, i32::MAX, usize::MAX), 0);
        assert_eq!(pos.error_code(), Some(ErrorCode::EmptyValue));
        assert_eq!(pos.error_index(), Some(0));
        assert_eq!(pos.index(), 0);
    }

    #[test]
    fn max_digits_bounds_consumption() {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_decimal_int::<Utf8>(&mut pos, b"123456", 6, 1, i32::MAX, 4), 1234);
        assert_eq!(pos.index(), 4);

        let mut pos = ParsePosition::new(0);
        let value = get_special_radix_int::<Utf8>(&mut pos, b"00e9ff", 6, 1, 16, u32::MAX, 4);
        assert_eq!(value, 0xE9);
        assert_eq!(pos.index(), 4);
    }

    #[test]
    fn decimal_reader_works_on_utf16() {
        let text = utf16("4096!");
        let mut pos = ParsePosition::new(0);
        let value = get_decimal_int::<Utf16>(&mut pos, &text, text.len(), 1, i32::MAX, usize::MAX);
        assert_eq!(value, 4096);
        assert_eq!(pos.index(), 4);
    }

    #[rstest]
    #[case::grouped(b"1,234,567", 1_234_567, 9, None)]
    #[case::ungrouped(b"1234", 1234, 4, None)]
    #[case::trailing(b"12,", 12, 2, Some(2))]
    #[case::double(b"1,,2", 1, 1, Some(1))]
    #[case::leading(b",12", 0, 0, Some(0))]
    fn grouped_decimal(
        #[case] text: &[u8],
        #[case] expected: i32,
        #[case] index: usize,
        #[case] grouping_error: Option<usize>,
    ) {
        let mut pos = ParsePosition::new(0);
        let value = get_decimal_int_grouped::<Utf8>(
            &mut pos,
            text,
            text.len(),
            1,
            i32::MAX,
            usize::MAX,
            Some(','),
        );
        assert_eq!(value, expected);
        assert_eq!(pos.index(), index);
        match grouping_error {
            Some(at) => {
                assert_eq!(pos.error_code(), Some(ErrorCode::InvalidGrouping));
                assert_eq!(pos.error_index(), Some(at));
            }
            None => assert!(pos.success()),
        }
    }

    #[rstest]
    #[case(b"1A", 16, 1, 0x1A)]
    #[case(b"ff", 16, 1, 0xFF)]
    #[case(b"777", 8, 1, 0o777)]
    #[case(b"1011", 2, 1, 0b1011)]
    #[case(b"33", 4, 1, 15)]
    #[case(b"ff", 16, -1, 0xFFu32.wrapping_neg())]
    #[case(b"ffffffff", 16, 1, u32::MAX)]
    fn special_radix_int_reads_bit_pattern(
        #[case] text: &[u8],
        #[case] radix: u32,
        #[case] sign: i32,
        #[case] expected: u32,
    ) {
        let mut pos = ParsePosition::new(0);
        let value =
            get_special_radix_int::<Utf8>(&mut pos, text, text.len(), sign, radix, u32::MAX, usize::MAX);
        assert_eq!(value, expected);
        assert_eq!(pos.index(), text.len());
        assert!(pos.success());
    }

    #[rstest]
    #[case(b"100", 16, 0xFF, 2)]
    #[case(b"400", 8, 0xFF, 2)]
    #[case(b"100000000", 2, 0xFF, 8)]
    #[case(b"1ffffffff", 16, u32::MAX, 8)]
    fn special_radix_overflow_returns_unsigned_max(
        #[case] text: &[u8],
        #[case] radix: u32,
        #[case] unsigned_max: u32,
        #[case] error_index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        let value = get_special_radix_int::<Utf8>(
            &mut pos,
            text,
            text.len(),
            1,
            radix,
            unsigned_max,
            usize::MAX,
        );
        assert_eq!(value, unsigned_max);
        assert_eq!(pos.error_code(), Some(ErrorCode::NumberOverflow));
        assert_eq!(pos.error_index(), Some(error_index));
        assert_eq!(pos.index(), text.len());
    }

    #[test]
    fn special_radix_long_reads_full_width() {
        let text = b"8000000000000000";
        let mut pos = ParsePosition::new(0);
        let value =
            get_special_radix_long::<Utf8>(&mut pos, text, text.len(), 1, 16, u64::MAX, usize::MAX);
        assert_eq!(value, 0x8000_0000_0000_0000);
        assert!(pos.success());
    }

    #[test]
    #[should_panic(expected = "special radix")]
    fn special_radix_rejects_decimal() {
        let mut pos = ParsePosition::new(0);
        get_special_radix_int::<Utf8>(&mut pos, b"10", 2, 1, 10, u32::MAX, usize::MAX);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn readers_reject_bound_past_text() {
        let mut pos = ParsePosition::new(0);
        get_decimal_int::<Utf8>(&mut pos, b"10", 3, 1, i32::MAX, usize::MAX);
    }

    #[rstest]
    #[case(b"ff7g", 16, usize::MAX, "ff7", 3)]
    #[case(b"0129", 8, usize::MAX, "012", 3)]
    #[case(b"123456", 10, 4, "1234", 4)]
    #[case(b"zZ1", 36, usize::MAX, "zZ1", 3)]
    fn digit_run_copies_digits(
        #[case] text: &[u8],
        #[case] radix: u32,
        #[case] max_digits: usize,
        #[case] expected: &str,
        #[case] index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        let mut out = String::new();
        let count =
            get_digit_run::<Utf8>(&mut pos, text, text.len(), radix, max_digits, &mut out);
        assert_eq!(out, expected);
        assert_eq!(count, expected.len());
        assert_eq!(pos.index(), index);
        assert!(pos.success());
    }

    #[test]
    fn digit_run_without_digits_is_empty() {
        let mut pos = ParsePosition::new(1);
        let mut out = String::new();
        assert_eq!(get_digit_run::<Utf8>(&mut pos, b"-x", 2, 10, usize::MAX, &mut out), 0);
        assert_eq!(pos.error_code(), Some(ErrorCode::EmptyValue));
        assert_eq!(pos.error_index(), Some(1));
        assert_eq!(pos.index(), 1);
    }

    #[rstest]
    #[case(b"3.25", ".", "3.25", 4)]
    #[case(b"1e10", ".", "1e10", 4)]
    #[case(b"1E-3x", ".", "1e-3", 4)]
    #[case(b"2.5e", ".", "2.5", 3)]
    #[case(b"2.5e+", ".", "2.5", 3)]
    #[case(b".5", ".", ".5", 2)]
    #[case(b"7.", ".", "7.", 2)]
    #[case(b"3,25", ",", "3.25", 4)]
    fn real_lexeme_collects_core_syntax(
        #[case] text: &[u8],
        #[case] separator: &str,
        #[case] expected: &str,
        #[case] index: usize,
    ) {
        let separator = separator.chars().next().unwrap();
        let mut pos = ParsePosition::new(0);
        let mut out = String::new();
        let lexeme = get_real_lexeme::<Utf8>(&mut pos, text, text.len(), separator, 'e', &mut out);
        assert_eq!(out, expected);
        assert_eq!(pos.index(), index);
        assert!(lexeme.digits > 0);
        assert!(pos.success());
    }

    #[test]
    fn real_lexeme_tracks_nonzero_mantissa() {
        let mut out = String::new();
        let mut pos = ParsePosition::new(0);
        let lexeme = get_real_lexeme::<Utf8>(&mut pos, b"0.000e5", 7, '.', 'e', &mut out);
        assert_eq!(lexeme, RealLexeme { digits: 4, nonzero: false });

        out.clear();
        let mut pos = ParsePosition::new(0);
        let lexeme = get_real_lexeme::<Utf8>(&mut pos, b"0.001", 5, '.', 'e', &mut out);
        assert!(lexeme.nonzero);
    }

    #[test]
    fn real_lexeme_without_digits_is_empty() {
        let mut out = String::new();
        let mut pos = ParsePosition::new(0);
        get_real_lexeme::<Utf8>(&mut pos, b".e5", 3, '.', 'e', &mut out);
        assert_eq!(pos.error_code(), Some(ErrorCode::EmptyValue));
        assert_eq!(pos.index(), 0);
        assert!(out.is_empty());
    }

    #[rstest]
    #[case(b"Infinity", "Infinity", true, 8)]
    #[case(b"INFINITY", "Infinity", true, 8)]
    #[case(b"nan", "NaN", true, 3)]
    #[case(b"Inf", "Infinity", false, 0)]
    #[case(b"x", "", false, 0)]
    fn get_symbol_matches_case_insensitively(
        #[case] text: &[u8],
        #[case] symbol: &str,
        #[case] matched: bool,
        #[case] index: usize,
    ) {
        let mut pos = ParsePosition::new(0);
        assert_eq!(get_symbol::<Utf8>(&mut pos, text, text.len(), symbol), matched);
        assert_eq!(pos.index(), index);
    }

    #[test]
    fn get_symbol_matches_non_ascii_symbols() {
        let text = "∞".as_bytes();
        let mut pos = ParsePosition::new(0);
        assert!(get_symbol::<Utf8>(&mut pos, text, text.len(), "∞"));
        assert_eq!(pos.index(), 3);
    }
}
