use alloc::{string::String, sync::Arc, vec::Vec};

use rstest::rstest;

use crate::{
    Alignment, Case, FormatFlags, NumberFormat, NumberFormatOptions, NumberFormatSymbols, Radix,
    SignMode,
};

fn format_int_with(options: NumberFormatOptions, value: i32) -> String {
    let mut nf = NumberFormat::with_options(options);
    let mut out = String::new();
    nf.format_int(value, &mut out);
    out
}

fn flags(radix: Radix) -> FormatFlags {
    FormatFlags {
        radix: Some(radix),
        ..Default::default()
    }
}

#[test]
fn byte_minus_one_in_upper_hex() {
    let mut nf = NumberFormat::with_options(NumberFormatOptions {
        flags: FormatFlags {
            radix: Some(Radix::Hexadecimal),
            case: Case::Upper,
            ..Default::default()
        },
        int_precision: 2,
        ..Default::default()
    });
    let mut out = String::new();
    nf.format_byte(-1, &mut out);
    assert_eq!(out, "FF");
}

#[test]
fn minimum_values_in_decimal() {
    let mut nf = NumberFormat::new();
    let mut out = String::new();
    nf.format_byte(i8::MIN, &mut out);
    out.push(' ');
    nf.format_short(i16::MIN, &mut out);
    out.push(' ');
    nf.format_int(i32::MIN, &mut out);
    out.push(' ');
    nf.format_long(i64::MIN, &mut out);
    assert_eq!(out, "-128 -32768 -2147483648 -9223372036854775808");
}

#[rstest]
#[case(Radix::Binary, -1, "11111111111111111111111111111111")]
#[case(Radix::Octal, 8, "10")]
#[case(Radix::Octal, -1, "37777777777")]
#[case(Radix::Decimal, -42, "-42")]
#[case(Radix::Hexadecimal, 255, "ff")]
#[case(Radix::Hexadecimal, i32::MIN, "80000000")]
fn radices(#[case] radix: Radix, #[case] value: i32, #[case] expected: &str) {
    let options = NumberFormatOptions {
        flags: flags(radix),
        ..Default::default()
    };
    assert_eq!(format_int_with(options, value), expected);
}

#[rstest]
#[case(Radix::Binary, false, "0b101")]
#[case(Radix::Octal, false, "05")]
#[case(Radix::Hexadecimal, false, "0x5")]
#[case(Radix::Hexadecimal, true, "0X5")]
#[case(Radix::Decimal, false, "5")]
fn radix_prefixes(#[case] radix: Radix, #[case] uppercase: bool, #[case] expected: &str) {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            show_radix: true,
            uppercase_radix_prefix: uppercase,
            ..flags(radix)
        },
        ..Default::default()
    };
    assert_eq!(format_int_with(options, 5), expected);
}

#[rstest]
#[case(Case::Lower, "0xabc")]
#[case(Case::Upper, "0xABC")]
#[case(Case::Title, "0xabc")]
fn hex_digit_case(#[case] case: Case, #[case] expected: &str) {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            case,
            show_radix: true,
            ..flags(Radix::Hexadecimal)
        },
        ..Default::default()
    };
    assert_eq!(format_int_with(options, 0xABC), expected);
}

#[rstest]
#[case(SignMode::Negative, 5, "5")]
#[case(SignMode::Plus, 5, "+5")]
#[case(SignMode::Space, 5, " 5")]
#[case(SignMode::Plus, -5, "-5")]
#[case(SignMode::Plus, 0, "+0")]
fn sign_modes(#[case] sign: SignMode, #[case] value: i32, #[case] expected: &str) {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            sign,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(format_int_with(options, value), expected);
}

#[test]
fn sign_mode_does_not_apply_to_bit_patterns() {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            sign: SignMode::Plus,
            ..flags(Radix::Hexadecimal)
        },
        ..Default::default()
    };
    assert_eq!(format_int_with(options, 10), "a");
}

#[rstest]
#[case(42, "00042")]
#[case(-42, "-00042")]
#[case(123_456, "123456")]
fn int_precision_pads_digits(#[case] value: i32, #[case] expected: &str) {
    let options = NumberFormatOptions {
        int_precision: 5,
        ..Default::default()
    };
    assert_eq!(format_int_with(options, value), expected);
}

#[rstest]
#[case(Alignment::Right, "***-42")]
#[case(Alignment::Left, "-42***")]
#[case(Alignment::Center, "**-42*")]
fn width_and_alignment(#[case] alignment: Alignment, #[case] expected: &str) {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            alignment,
            ..Default::default()
        },
        width: 6,
        fill: '*',
        ..Default::default()
    };
    assert_eq!(format_int_with(options, -42), expected);
}

#[test]
fn grouping_uses_locale_separator() {
    let fr = NumberFormatSymbols::for_locale("fr").unwrap();
    let mut nf = NumberFormat::with_symbols(
        NumberFormatOptions {
            flags: FormatFlags {
                grouping: true,
                ..Default::default()
            },
            ..Default::default()
        },
        Arc::new(fr),
    );
    let mut out = String::new();
    nf.format_long(-1_234_567, &mut out);
    assert_eq!(out, "-1\u{202F}234\u{202F}567");
}

#[test]
fn grouping_is_ignored_for_special_radices() {
    let options = NumberFormatOptions {
        flags: FormatFlags {
            grouping: true,
            ..flags(Radix::Binary)
        },
        ..Default::default()
    };
    assert_eq!(format_int_with(options, 0b1111_0000), "11110000");
}

#[test]
fn utf16_output_with_supplementary_fill() {
    let mut nf = NumberFormat::with_options(NumberFormatOptions {
        width: 3,
        fill: '😀',
        ..Default::default()
    });
    let mut out: Vec<u16> = Vec::new();
    nf.format_int(7, &mut out);
    assert_eq!(out, "😀😀7".encode_utf16().collect::<Vec<_>>());
}

#[test]
fn utf8_byte_output() {
    let mut nf = NumberFormat::new();
    let mut out: Vec<u8> = Vec::new();
    nf.format_short(-300, &mut out);
    assert_eq!(out, b"-300");
}

#[test]
fn scratch_buffer_grows_for_large_precision() {
    let mut nf = NumberFormat::with_options(NumberFormatOptions {
        int_precision: 100,
        ..Default::default()
    });
    let mut out = String::new();
    nf.format_long(1, &mut out);
    assert_eq!(out.len(), 100);
    assert!(out.ends_with("001"));

    nf.options_mut().int_precision = 1;
    out.clear();
    nf.format_long(1, &mut out);
    assert_eq!(out, "1");
}

#[test]
fn oversized_int_precision_is_clamped() {
    let options = NumberFormatOptions {
        int_precision: usize::MAX / 2,
        ..Default::default()
    };
    let out = format_int_with(options, 1);
    assert_eq!(out.len(), crate::MAX_PRECISION);
    assert!(out.ends_with("01"));
    assert!(out.bytes().rev().skip(1).all(|b| b == b'0'));

    let hex = NumberFormatOptions {
        flags: flags(Radix::Hexadecimal),
        int_precision: usize::MAX,
        ..Default::default()
    };
    assert_eq!(format_int_with(hex, 0xff).len(), crate::MAX_PRECISION);
}

#[test]
fn output_is_appended() {
    let mut nf = NumberFormat::new();
    let mut out = String::from("x=");
    nf.format_int(3, &mut out);
    assert_eq!(out, "x=3");
}
