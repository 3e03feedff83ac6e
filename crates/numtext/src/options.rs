use crate::FormatFlags;

/// Largest `int_precision` and `real_precision` honored when formatting;
/// larger values are clamped to it.
pub const MAX_PRECISION: usize = 4096;

/// Settings of a [`NumberFormat`](crate::NumberFormat).
///
/// ```rust
/// use numtext::{Alignment, FormatFlags, NumberFormat, NumberFormatOptions};
///
/// let mut nf = NumberFormat::with_options(NumberFormatOptions {
///     flags: FormatFlags { alignment: Alignment::Left, ..Default::default() },
///     width: 6,
///     fill: '*',
///     ..Default::default()
/// });
/// let mut out = String::new();
/// nf.format_int(42, &mut out);
/// assert_eq!(out, "42****");
/// ```
///
/// # Default
///
/// Default flags, no padding, at least one integer digit, unlimited digits
/// when parsing and six fraction digits for fixed and scientific reals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormatOptions {
    /// Radix, case, alignment, notation and the independent switches.
    pub flags: FormatFlags,

    /// Minimum width of formatted output in characters. `0` disables padding.
    pub width: usize,

    /// Padding character. Characters outside the BMP are written as surrogate
    /// pairs to UTF-16 sinks.
    pub fill: char,

    /// Minimum number of integer digits; shorter numbers get leading zeros.
    /// Clamped to [`MAX_PRECISION`].
    ///
    /// Zero-padded decimal output only reads back with `radix` forced to
    /// [`Radix::Decimal`](crate::Radix::Decimal): auto-detection takes a
    /// leading `0` as the octal prefix, so `"009"` stops at the `9`.
    pub int_precision: usize,

    /// Most digits an integer parse consumes.
    pub max_digits: usize,

    /// Fraction digits of fixed and scientific real numbers. Clamped to
    /// [`MAX_PRECISION`].
    pub real_precision: usize,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            flags: FormatFlags::default(),
            width: 0,
            fill: ' ',
            int_precision: 1,
            max_digits: usize::MAX,
            real_precision: 6,
        }
    }
}

/// Settings of a [`BooleanFormat`](crate::BooleanFormat).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooleanFormatOptions {
    /// `bool_alpha`, `case`, `alignment` and `keep_blanks` apply.
    pub flags: FormatFlags,
    /// Minimum width of formatted output in characters.
    pub width: usize,
    /// Padding character.
    pub fill: char,
}

impl Default for BooleanFormatOptions {
    fn default() -> Self {
        Self {
            flags: FormatFlags::default(),
            width: 0,
            fill: ' ',
        }
    }
}
