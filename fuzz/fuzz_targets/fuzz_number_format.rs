#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use numtext::{
    Alignment, Case, FormatFlags, NumberFormat, NumberFormatOptions, Radix, RealNotation, SignMode,
};

#[derive(Debug, Arbitrary)]
struct Input {
    flags: u16,
    width: u8,
    fill: char,
    int_precision: u8,
    real_precision: u8,
    value: i64,
    real: f64,
    text: Vec<u8>,
}

fn options(input: &Input) -> NumberFormatOptions {
    let bits = input.flags;
    NumberFormatOptions {
        flags: FormatFlags {
            radix: match bits & 7 {
                0 => Some(Radix::Binary),
                1 => Some(Radix::Octal),
                2 => Some(Radix::Decimal),
                3 => Some(Radix::Hexadecimal),
                _ => None,
            },
            case: if bits & 8 == 0 { Case::Lower } else { Case::Upper },
            alignment: match (bits >> 4) & 3 {
                0 => Alignment::Left,
                1 => Alignment::Center,
                _ => Alignment::Right,
            },
            real_notation: match (bits >> 6) & 3 {
                0 => RealNotation::Fixed,
                1 => RealNotation::Scientific,
                _ => RealNotation::Shortest,
            },
            sign: match (bits >> 8) & 3 {
                0 => SignMode::Plus,
                1 => SignMode::Space,
                _ => SignMode::Negative,
            },
            show_radix: bits & 0x400 != 0,
            grouping: bits & 0x800 != 0,
            keep_blanks: bits & 0x1000 != 0,
            uppercase_radix_prefix: bits & 0x2000 != 0,
            show_point: bits & 0x4000 != 0,
            uppercase_exponent: bits & 0x8000 != 0,
            ..Default::default()
        },
        width: usize::from(input.width),
        fill: input.fill,
        int_precision: usize::from(input.int_precision),
        real_precision: usize::from(input.real_precision),
        ..Default::default()
    }
}

fuzz_target!(|input: Input| {
    let mut nf = NumberFormat::with_options(options(&input));

    // Arbitrary bytes must never panic, whatever they decode to.
    let text = &input.text[..];
    let _ = nf.parse_long(text, 0, text.len());
    assert!(nf.position().index() <= text.len());
    let _ = nf.try_parse_double(text);
    let units: Vec<u16> = text
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let _ = nf.try_parse_int(&units[..]);

    // Unpadded, forced-radix output reads back to the same value.
    let mut round_trip = options(&input);
    round_trip.width = 0;
    if round_trip.flags.radix.is_none() {
        round_trip.flags.radix = Some(Radix::Decimal);
    }
    if round_trip.flags.sign == SignMode::Space {
        round_trip.flags.sign = SignMode::Negative;
    }
    round_trip.flags.keep_blanks = false;
    let mut nf = NumberFormat::with_options(round_trip);
    let mut out = String::new();
    nf.format_long(input.value, &mut out);
    assert_eq!(nf.try_parse_long(out.as_str()), Ok(input.value), "{out:?}");

    out.clear();
    nf.options_mut().flags.real_notation = RealNotation::Shortest;
    nf.format_double(input.real, &mut out);
    match nf.try_parse_double(out.as_str()) {
        Ok(parsed) if input.real.is_nan() => assert!(parsed.is_nan()),
        parsed => assert_eq!(parsed, Ok(input.real), "{out:?}"),
    }
});
