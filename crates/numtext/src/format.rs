//! Stateless formatting primitives.
//!
//! Digits are emitted right to left into a `char` buffer ending at a given
//! index, so sign and radix prefix can be written in front of a finished
//! digit run without shifting anything. Each `*_backward` function returns
//! the new start of the content. [`put_format_result`] then copies the
//! content into a [`FormatSink`] with padding.

use alloc::{string::String, vec::Vec};

use crate::{
    Alignment, FormatFlags, ParsePosition,
    position::check_range,
    unicode::{Encoding, Utf8, Utf16},
};

/// Output for formatted text.
pub trait FormatSink {
    /// Appends one character.
    fn put_char(&mut self, ch: char);

    /// Appends every character of `text`.
    fn put_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }
}

impl FormatSink for String {
    fn put_char(&mut self, ch: char) {
        self.push(ch);
    }

    fn put_str(&mut self, text: &str) {
        self.push_str(text);
    }
}

fn encode_into<E: Encoding>(units: &mut Vec<E::Unit>, ch: char) {
    let index = units.len();
    units.resize(index + E::MAX_UNITS, E::Unit::default());
    let mut pos = ParsePosition::new(index);
    // Every `char` is a scalar value and room for `MAX_UNITS` was reserved.
    let written = E::encode(&mut pos, units, index + E::MAX_UNITS, u32::from(ch)).unwrap_or(0);
    units.truncate(index + written);
}

/// UTF-16 code units; characters outside the BMP become surrogate pairs.
impl FormatSink for Vec<u16> {
    fn put_char(&mut self, ch: char) {
        encode_into::<Utf16>(self, ch);
    }
}

/// UTF-8 bytes.
impl FormatSink for Vec<u8> {
    fn put_char(&mut self, ch: char) {
        encode_into::<Utf8>(self, ch);
    }
}

/// Decimal digits of `|i32::MIN|`, which has no `i32` representation.
const INT_MIN_DIGITS: &[u8] = b"2147483648";

/// Decimal digits of `|i64::MIN|`.
const LONG_MIN_DIGITS: &[u8] = b"9223372036854775808";

/// Right-to-left writer over a `char` buffer, inserting a grouping separator
/// in front of every third digit.
struct Backward<'a> {
    buffer: &'a mut [char],
    start: usize,
    grouping: Option<char>,
    digits: usize,
}

impl<'a> Backward<'a> {
    fn new(buffer: &'a mut [char], end: usize, grouping: Option<char>) -> Self {
        check_range(0, end, buffer.len());
        Self { buffer, start: end, grouping, digits: 0 }
    }

    fn push(&mut self, ch: char) {
        assert!(self.start > 0, "buffer too small for formatted number");
        self.start -= 1;
        self.buffer[self.start] = ch;
    }

    fn push_digit(&mut self, ch: char) {
        if let Some(separator) = self.grouping {
            if self.digits > 0 && self.digits % 3 == 0 {
                self.push(separator);
            }
        }
        self.push(ch);
        self.digits += 1;
    }

    fn pad(&mut self, precision: usize, zero: char) -> usize {
        while self.digits < precision {
            self.push_digit(zero);
        }
        self.start
    }
}

macro_rules! decimal_writer {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $min_digits:expr) => {
        $(#[$doc])*
        #[allow(clippy::cast_possible_truncation)]
        pub fn $name(
            value: $ty,
            precision: usize,
            digits: &[char; 16],
            grouping: Option<char>,
            buffer: &mut [char],
            end: usize,
        ) -> usize {
            let mut writer = Backward::new(buffer, end, grouping);
            if value == <$ty>::MIN {
                for &digit in $min_digits.iter().rev() {
                    writer.push_digit(digits[usize::from(digit - b'0')]);
                }
            } else {
                let mut magnitude = value.unsigned_abs();
                loop {
                    writer.push_digit(digits[(magnitude % 10) as usize]);
                    magnitude /= 10;
                    if magnitude == 0 {
                        break;
                    }
                }
            }
            writer.pad(precision, digits[0])
        }
    };
}

decimal_writer!(
    /// Writes the decimal digits of `|value|` so they end at `end`, padding
    /// with zeros up to `precision` digits. With `grouping`, the separator is
    /// inserted every three digits. Returns the index of the first written
    /// character.
    ///
    /// # Panics
    ///
    /// Panics if `end` lies outside `buffer` or the digits do not fit before
    /// `end`.
    put_decimal_int_abs_backward,
    i32,
    INT_MIN_DIGITS
);

decimal_writer!(
    /// 64-bit [`put_decimal_int_abs_backward`].
    ///
    /// # Panics
    ///
    /// Same as [`put_decimal_int_abs_backward`].
    put_decimal_long_abs_backward,
    i64,
    LONG_MIN_DIGITS
);

macro_rules! special_radix_writer {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        #[allow(clippy::cast_possible_truncation)]
        pub fn $name(
            value: $ty,
            shift: u32,
            precision: usize,
            digits: &[char; 16],
            buffer: &mut [char],
            end: usize,
        ) -> usize {
            assert!(matches!(shift, 1..=4), "shift must be 1 to 4 bits, got {shift}");
            let mask: $ty = (1 << shift) - 1;
            let mut writer = Backward::new(buffer, end, None);
            let mut pattern = value;
            loop {
                writer.push_digit(digits[(pattern & mask) as usize]);
                pattern >>= shift;
                if pattern == 0 {
                    break;
                }
            }
            writer.pad(precision, digits[0])
        }
    };
}

special_radix_writer!(
    /// Writes the bit pattern `value` in the power-of-two radix `1 << shift`
    /// so the digits end at `end`, padding with zeros up to `precision`
    /// digits. Returns the index of the first written character.
    ///
    /// # Panics
    ///
    /// Panics if `shift` is not 1 to 4, `end` lies outside `buffer`, or the
    /// digits do not fit before `end`.
    put_special_radix_int_backward,
    u32
);

special_radix_writer!(
    /// 64-bit [`put_special_radix_int_backward`].
    ///
    /// # Panics
    ///
    /// Same as [`put_special_radix_int_backward`].
    put_special_radix_long_backward,
    u64
);

/// Writes `prefix` so it ends at `start`, upper-casing ASCII letters when
/// asked. Returns the new start.
///
/// # Panics
///
/// Panics if the prefix does not fit before `start`.
pub fn put_radix_prefix_backward(
    prefix: &str,
    uppercase: bool,
    buffer: &mut [char],
    start: usize,
) -> usize {
    let mut writer = Backward::new(buffer, start, None);
    for ch in prefix.chars().rev() {
        writer.push(if uppercase { ch.to_ascii_uppercase() } else { ch });
    }
    writer.start
}

/// Writes `sign` right before `start`. Returns the new start.
///
/// # Panics
///
/// Panics if `start` is 0 or lies outside `buffer`.
pub fn put_sign_backward(sign: char, buffer: &mut [char], start: usize) -> usize {
    let mut writer = Backward::new(buffer, start, None);
    writer.push(sign);
    writer.start
}

/// Copies `buffer[start..end]` into `output`, padded with `fill` to `width`
/// characters according to `flags.alignment`. Centered content gets the odd
/// fill character on the left.
///
/// # Panics
///
/// Panics if `start..end` is not a range within `buffer`.
pub fn put_format_result<S: FormatSink + ?Sized>(
    flags: &FormatFlags,
    width: usize,
    fill: char,
    buffer: &[char],
    start: usize,
    end: usize,
    output: &mut S,
) {
    check_range(start, end, buffer.len());
    let pad = width.saturating_sub(end - start);
    let (left, right) = match flags.alignment {
        Alignment::Left => (0, pad),
        Alignment::Right => (pad, 0),
        Alignment::Center => (pad - pad / 2, pad / 2),
    };
    for _ in 0..left {
        output.put_char(fill);
    }
    for &ch in &buffer[start..end] {
        output.put_char(ch);
    }
    for _ in 0..right {
        output.put_char(fill);
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use rstest::rstest;

    use super::*;

    const LOWER: [char; 16] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
    ];
    const UPPER: [char; 16] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
    ];

    fn collect(buffer: &[char], start: usize, end: usize) -> String {
        buffer[start..end].iter().collect()
    }

    #[rstest]
    #[case(0, 1, None, "0")]
    #[case(42, 1, None, "42")]
    #[case(-42, 1, None, "42")]
    #[case(7, 3, None, "007")]
    #[case(i32::MAX, 1, None, "2147483647")]
    #[case(i32::MIN, 1, None, "2147483648")]
    #[case(1_234_567, 1, Some(','), "1,234,567")]
    #[case(123, 1, Some(','), "123")]
    #[case(1234, 6, Some('.'), "001.234")]
    #[case(i32::MIN, 1, Some(' '), "2 147 483 648")]
    fn decimal_int_backward(
        #[case] value: i32,
        #[case] precision: usize,
        #[case] grouping: Option<char>,
        #[case] expected: &str,
    ) {
        let mut buffer = vec!['\0'; 32];
        let start = put_decimal_int_abs_backward(value, precision, &LOWER, grouping, &mut buffer, 32);
        assert_eq!(collect(&buffer, start, 32), expected);
    }

    #[test]
    fn decimal_long_backward_handles_minimum() {
        let mut buffer = vec!['\0'; 40];
        let start = put_decimal_long_abs_backward(i64::MIN, 1, &LOWER, None, &mut buffer, 40);
        assert_eq!(collect(&buffer, start, 40), "9223372036854775808");
        let start = put_decimal_long_abs_backward(i64::MAX, 1, &LOWER, None, &mut buffer, 40);
        assert_eq!(collect(&buffer, start, 40), "9223372036854775807");
    }

    #[test]
    fn writers_stop_at_end_index() {
        let mut buffer = vec!['x'; 8];
        let start = put_decimal_int_abs_backward(12, 1, &LOWER, None, &mut buffer, 5);
        assert_eq!(start, 3);
        assert_eq!(buffer.iter().collect::<String>(), "xxx12xxx");
    }

    #[rstest]
    #[case(0xFF, 4, 1, &UPPER, "FF")]
    #[case(0xFF, 4, 1, &LOWER, "ff")]
    #[case(0xA, 4, 4, &LOWER, "000a")]
    #[case(0o755, 3, 1, &LOWER, "755")]
    #[case(0b1010, 1, 1, &LOWER, "1010")]
    #[case(0, 4, 1, &LOWER, "0")]
    #[case(u32::MAX, 4, 1, &LOWER, "ffffffff")]
    #[case(15, 2, 1, &LOWER, "33")]
    fn special_radix_int_backward(
        #[case] value: u32,
        #[case] shift: u32,
        #[case] precision: usize,
        #[case] digits: &[char; 16],
        #[case] expected: &str,
    ) {
        let mut buffer = vec!['\0'; 40];
        let start = put_special_radix_int_backward(value, shift, precision, digits, &mut buffer, 40);
        assert_eq!(collect(&buffer, start, 40), expected);
    }

    #[test]
    fn special_radix_long_backward_full_width() {
        let mut buffer = vec!['\0'; 70];
        let start = put_special_radix_long_backward(u64::MAX, 1, 1, &LOWER, &mut buffer, 70);
        assert_eq!(70 - start, 64);
        assert!(buffer[start..].iter().all(|&ch| ch == '1'));
    }

    #[test]
    fn prefix_and_sign_go_in_front() {
        let mut buffer = vec!['\0'; 16];
        let start = put_special_radix_int_backward(0x1A, 4, 1, &LOWER, &mut buffer, 16);
        let start = put_radix_prefix_backward("0x", true, &mut buffer, start);
        let start = put_sign_backward('-', &mut buffer, start);
        assert_eq!(collect(&buffer, start, 16), "-0X1a");
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn writer_panics_when_out_of_room() {
        let mut buffer = vec!['\0'; 2];
        put_decimal_int_abs_backward(12_345, 1, &LOWER, None, &mut buffer, 2);
    }

    #[rstest]
    #[case(Alignment::Right, 5, "   42")]
    #[case(Alignment::Left, 5, "42   ")]
    #[case(Alignment::Center, 5, "  42 ")]
    #[case(Alignment::Center, 6, "  42  ")]
    #[case(Alignment::Right, 1, "42")]
    fn format_result_pads(#[case] alignment: Alignment, #[case] width: usize, #[case] expected: &str) {
        let flags = FormatFlags { alignment, ..Default::default() };
        let buffer = ['4', '2'];
        let mut out = String::new();
        put_format_result(&flags, width, ' ', &buffer, 0, 2, &mut out);
        assert_eq!(out, expected);
    }

    #[test]
    fn utf16_sink_writes_surrogate_pairs_for_fill() {
        let flags = FormatFlags::default();
        let buffer = ['7'];
        let mut out: Vec<u16> = Vec::new();
        put_format_result(&flags, 3, '😀', &buffer, 0, 1, &mut out);
        assert_eq!(out, "😀😀7".encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn utf8_sink_writes_bytes() {
        let mut out: Vec<u8> = Vec::new();
        out.put_str("€1");
        assert_eq!(out, "€1".as_bytes());
    }
}
