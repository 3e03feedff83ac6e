#![allow(clippy::struct_excessive_bools)]

/// Numeric base used for integer parsing and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radix {
    /// Base 2.
    Binary,
    /// Base 8.
    Octal,
    /// Base 10.
    Decimal,
    /// Base 16.
    Hexadecimal,
}

impl Radix {
    /// The numeric base.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// Maps 2, 8, 10 and 16 to their radix.
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        match value {
            2 => Some(Radix::Binary),
            8 => Some(Radix::Octal),
            10 => Some(Radix::Decimal),
            16 => Some(Radix::Hexadecimal),
            _ => None,
        }
    }

    /// Bits per digit for power-of-two radices; `None` for decimal.
    #[must_use]
    pub const fn shift(self) -> Option<u32> {
        match self {
            Radix::Binary => Some(1),
            Radix::Octal => Some(3),
            Radix::Decimal => None,
            Radix::Hexadecimal => Some(4),
        }
    }
}

/// Letter case for digits above 9 and for alphabetic boolean output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Case {
    /// `ff`, `true`.
    #[default]
    Lower,
    /// `FF`, `TRUE`.
    Upper,
    /// `ff`, `True`. Digits are never title-cased.
    Title,
}

/// Placement of content inside a field wider than the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Fill on the right.
    Left,
    /// Fill on the left.
    #[default]
    Right,
    /// Fill on both sides; an odd fill count puts the extra fill on the left.
    Center,
}

/// Notation for real numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealNotation {
    /// `123.450000` with `real_precision` fraction digits.
    Fixed,
    /// `1.234500e2` with `real_precision` fraction digits.
    Scientific,
    /// The shortest digits that round-trip.
    #[default]
    Shortest,
}

/// What to emit in front of non-negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignMode {
    /// Only negative numbers carry a sign.
    #[default]
    Negative,
    /// Non-negative numbers get the plus sign.
    Plus,
    /// Non-negative numbers get a space.
    Space,
}

/// Formatting and parsing switches shared by the number and boolean formats.
///
/// Each mutually exclusive group (radix, case, alignment, real notation,
/// sign) is a single enum-typed field, so setting one member always clears
/// the others.
///
/// ```rust
/// use numtext::{Alignment, FormatFlags, Radix};
///
/// let flags = FormatFlags {
///     radix: Some(Radix::Binary),
///     show_radix: true,
///     alignment: Alignment::Left,
///     ..Default::default()
/// };
/// assert!(flags.bool_alpha);
/// ```
///
/// # Default
///
/// No forced radix, lower case, right alignment, shortest real notation,
/// sign only for negative numbers, `bool_alpha` on and every other switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatFlags {
    /// Forced radix. `None` auto-detects `0b`/`0x`/`0` prefixes when parsing
    /// and formats in decimal.
    pub radix: Option<Radix>,
    /// Case of hex digits and alphabetic booleans.
    pub case: Case,
    /// Placement inside the field width.
    pub alignment: Alignment,
    /// Notation for real numbers.
    pub real_notation: RealNotation,
    /// Sign emission for non-negative numbers.
    pub sign: SignMode,
    /// Booleans as `true`/`false` rather than `1`/`0`.
    pub bool_alpha: bool,
    /// Emit the radix prefix (`0b`, `0`, `0x`) when formatting.
    pub show_radix: bool,
    /// Always emit a decimal separator for real numbers.
    pub show_point: bool,
    /// Group decimal digits in threes with the grouping separator.
    pub grouping: bool,
    /// Leading blanks are significant: parsing does not skip them.
    pub keep_blanks: bool,
    /// Upper-case the letters of the radix prefix (`0X`, `0B`).
    pub uppercase_radix_prefix: bool,
    /// Upper-case the exponent marker of real numbers.
    pub uppercase_exponent: bool,
}

impl Default for FormatFlags {
    fn default() -> Self {
        Self {
            radix: None,
            case: Case::default(),
            alignment: Alignment::default(),
            real_notation: RealNotation::default(),
            sign: SignMode::default(),
            bool_alpha: true,
            show_radix: false,
            show_point: false,
            grouping: false,
            keep_blanks: false,
            uppercase_radix_prefix: false,
            uppercase_exponent: false,
        }
    }
}
