use alloc::{string::String, sync::Arc, vec::Vec};
use core::{
    fmt::{Display, LowerExp, Write as _},
    str::FromStr,
};

#[cfg(feature = "big")]
use bigdecimal::BigDecimal;
#[cfg(feature = "big")]
use num_bigint::BigInt;
#[cfg(feature = "big")]
use num_traits::{Num, Zero};

#[cfg(feature = "big")]
use crate::parse::get_digit_run;
use crate::{
    ErrorCode, FormatFlags, FormatSink, MAX_PRECISION, NumberFormatOptions, NumberFormatSymbols,
    ParseError, ParsePosition, Radix, RealNotation, SignMode,
    format::{
        put_decimal_int_abs_backward, put_decimal_long_abs_backward, put_format_result,
        put_radix_prefix_backward, put_sign_backward, put_special_radix_int_backward,
        put_special_radix_long_backward,
    },
    parse::{
        get_decimal_int_grouped, get_decimal_long_grouped, get_radix, get_real_lexeme, get_sign,
        get_special_radix_int, get_special_radix_long, get_symbol, skip_blanks,
    },
    position::check_range,
    unicode::{Encoding, Text},
};

/// Floating point types the facade parses and formats.
trait Real: Copy + PartialEq + FromStr + Display + LowerExp + core::ops::Neg<Output = Self> {
    const ZERO: Self;
    const INFINITY: Self;
    const NAN: Self;

    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn is_sign_negative(self) -> bool;
}

macro_rules! impl_real {
    ($($ty:ty),*) => {
        $(
            impl Real for $ty {
                const ZERO: Self = 0.0;
                const INFINITY: Self = <$ty>::INFINITY;
                const NAN: Self = <$ty>::NAN;

                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_infinite(self) -> bool {
                    <$ty>::is_infinite(self)
                }

                fn is_sign_negative(self) -> bool {
                    <$ty>::is_sign_negative(self)
                }
            }
        )*
    };
}

impl_real!(f32, f64);

/// Parses and formats numbers according to [`NumberFormatOptions`] and
/// [`NumberFormatSymbols`].
///
/// Integers honor every option: radix (with prefix detection when parsing),
/// case, grouping, sign mode, precision, width and alignment. Non-decimal
/// radices format the unsigned bit pattern of the value, so `-1i8` in
/// hexadecimal is `ff`.
///
/// Real numbers honor the sign, decimal separator, exponent, infinity and NaN
/// symbols, the notation and `real_precision`, but not the radix or grouping
/// switches: their digits are parsed and generated by `core`.
///
/// With the `big` feature, [`parse_big_integer`](Self::parse_big_integer)
/// reads an unbounded integer honoring blanks, sign symbols, the radix (with
/// prefix detection) and `max_digits`, but not grouping; the sign negates the
/// magnitude in every radix. [`parse_big_decimal`](Self::parse_big_decimal)
/// honors the same symbols as the real parsers except infinity and NaN.
///
/// # Cursor and scratch state
///
/// A `NumberFormat` owns the cursor of its last parse (see
/// [`position`](Self::position)) and a scratch buffer reused by every format
/// call. Every method takes `&mut self`, so an instance serves one caller at
/// a time; use one instance per thread.
///
/// ```rust
/// use numtext::{ErrorCode, NumberFormat};
///
/// let mut nf = NumberFormat::new();
/// assert_eq!(nf.parse_byte("1280", 0, 4), 127);
/// assert_eq!(nf.position().error_code(), Some(ErrorCode::NumberOverflow));
/// assert_eq!(nf.position().index(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberFormat {
    options: NumberFormatOptions,
    symbols: Arc<NumberFormatSymbols>,
    position: ParsePosition,
    scratch: Vec<char>,
    lexeme: String,
}

macro_rules! integer_parsers {
    ($($(#[$doc:meta])* $name:ident -> $ty:ty, $max:expr, $unsigned_max:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Panics
            ///
            /// Panics if `start..end` is not a range within `text`.
            #[allow(clippy::cast_possible_truncation)]
            pub fn $name<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> $ty {
                let value = self.read_int::<T::Encoding>(text.units(), start, end, $max, $unsigned_max);
                value as $ty
            }
        )*
    };
}

macro_rules! try_parsers {
    ($($(#[$doc:meta])* $name:ident => $parse:ident -> $ty:ty;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Returns a [`ParseError`] carrying the text, the index of the
            /// first error and its code. Input left over after the number
            /// (other than trailing blanks) is `InvalidSyntax`.
            pub fn $name<T: Text + ?Sized>(&mut self, text: &T) -> Result<$ty, ParseError> {
                let value = self.$parse(text, 0, text.units().len());
                let keep_blanks = self.options.flags.keep_blanks;
                ensure_consumed(&mut self.position, text, keep_blanks)?;
                Ok(value)
            }
        )*
    };
}

impl NumberFormat {
    /// A format with default options and symbols.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A format with `options` and the default symbols.
    #[must_use]
    pub fn with_options(options: NumberFormatOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// A format with `options` reading and writing `symbols`, typically
    /// shared through a [`SymbolsCache`](crate::SymbolsCache).
    #[must_use]
    pub fn with_symbols(options: NumberFormatOptions, symbols: Arc<NumberFormatSymbols>) -> Self {
        Self {
            options,
            symbols,
            ..Self::default()
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &NumberFormatOptions {
        &self.options
    }

    /// Mutable access to the options; changes apply to the next call.
    pub fn options_mut(&mut self) -> &mut NumberFormatOptions {
        &mut self.options
    }

    /// Symbols in use.
    #[must_use]
    pub fn symbols(&self) -> &Arc<NumberFormatSymbols> {
        &self.symbols
    }

    /// Cursor left by the last parse: where it stopped and the first error it
    /// recorded.
    #[must_use]
    pub fn position(&self) -> &ParsePosition {
        &self.position
    }

    integer_parsers! {
        /// Parses an 8-bit integer from `text[start..end]`. Blanks before the
        /// number are skipped unless `keep_blanks` is set.
        ///
        /// The result is only meaningful if [`position`](Self::position)
        /// reports success; on overflow it saturates.
        parse_byte -> i8, i8::MAX.into(), u8::MAX.into();
        /// 16-bit [`parse_byte`](Self::parse_byte).
        parse_short -> i16, i16::MAX.into(), u16::MAX.into();
    }

    /// 32-bit [`parse_byte`](Self::parse_byte).
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    pub fn parse_int<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> i32 {
        self.read_int::<T::Encoding>(text.units(), start, end, i32::MAX, u32::MAX)
    }

    /// 64-bit [`parse_byte`](Self::parse_byte).
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    pub fn parse_long<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> i64 {
        let units = text.units();
        let (sign, radix) = self.begin::<T::Encoding>(units, start, end);
        let max_digits = self.options.max_digits;
        let value = if radix == 10 {
            let separator = self.grouping_separator();
            get_decimal_long_grouped::<T::Encoding>(
                &mut self.position,
                units,
                end,
                sign,
                i64::MAX,
                max_digits,
                separator,
            )
        } else {
            let pattern = get_special_radix_long::<T::Encoding>(
                &mut self.position,
                units,
                end,
                sign,
                radix,
                u64::MAX,
                max_digits,
            );
            i64::from_ne_bytes(pattern.to_ne_bytes())
        };
        self.trace_failure("long");
        value
    }

    /// Parses a 32-bit real number from `text[start..end]`.
    ///
    /// A finite number too large for `f32` yields infinity with
    /// `NumberOverflow`; a non-zero number too small yields zero with
    /// `NumberUnderflow`.
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    pub fn parse_float<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> f32 {
        self.read_real::<T::Encoding, f32>(text.units(), start, end)
    }

    /// 64-bit [`parse_float`](Self::parse_float).
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    pub fn parse_double<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> f64 {
        self.read_real::<T::Encoding, f64>(text.units(), start, end)
    }

    try_parsers! {
        /// Parses all of `text` as an 8-bit integer.
        try_parse_byte => parse_byte -> i8;
        /// Parses all of `text` as a 16-bit integer.
        try_parse_short => parse_short -> i16;
        /// Parses all of `text` as a 32-bit integer.
        ///
        /// ```rust
        /// use numtext::{ErrorCode, NumberFormat};
        ///
        /// let mut nf = NumberFormat::new();
        /// assert_eq!(nf.try_parse_int(" -42 "), Ok(-42));
        /// let err = nf.try_parse_int("42x").unwrap_err();
        /// assert_eq!((err.code(), err.index()), (ErrorCode::InvalidSyntax, 2));
        /// ```
        try_parse_int => parse_int -> i32;
        /// Parses all of `text` as a 64-bit integer.
        try_parse_long => parse_long -> i64;
        /// Parses all of `text` as a 32-bit real number.
        try_parse_float => parse_float -> f32;
        /// Parses all of `text` as a 64-bit real number.
        try_parse_double => parse_double -> f64;
        /// Parses all of `text` as an unbounded integer.
        #[cfg(feature = "big")]
        try_parse_big_integer => parse_big_integer -> BigInt;
        /// Parses all of `text` as an arbitrary precision decimal.
        #[cfg(feature = "big")]
        try_parse_big_decimal => parse_big_decimal -> BigDecimal;
    }

    /// Parses an unbounded integer from `text[start..end]`.
    ///
    /// Without digits the result is zero with `EmptyValue`.
    ///
    /// ```rust
    /// use numtext::NumberFormat;
    ///
    /// let mut nf = NumberFormat::new();
    /// let value = nf.try_parse_big_integer("-0x10000000000000000").unwrap();
    /// assert_eq!(value.to_string(), "-18446744073709551616");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    #[cfg(feature = "big")]
    pub fn parse_big_integer<T: Text + ?Sized>(
        &mut self,
        text: &T,
        start: usize,
        end: usize,
    ) -> BigInt {
        let units = text.units();
        let (sign, radix) = self.begin::<T::Encoding>(units, start, end);
        let number_start = self.position.index();
        self.lexeme.clear();
        let digits = get_digit_run::<T::Encoding>(
            &mut self.position,
            units,
            end,
            radix,
            self.options.max_digits,
            &mut self.lexeme,
        );
        let value = if digits == 0 {
            BigInt::zero()
        } else if let Ok(magnitude) = BigInt::from_str_radix(&self.lexeme, radix) {
            magnitude
        } else {
            self.position.set_error(ErrorCode::InvalidSyntax, number_start);
            BigInt::zero()
        };
        self.trace_failure("big integer");
        if sign < 0 { -value } else { value }
    }

    /// Parses an arbitrary precision decimal from `text[start..end]`.
    ///
    /// Without mantissa digits the result is zero with `EmptyValue`.
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    #[cfg(feature = "big")]
    pub fn parse_big_decimal<T: Text + ?Sized>(
        &mut self,
        text: &T,
        start: usize,
        end: usize,
    ) -> BigDecimal {
        let units = text.units();
        check_range(start, end, units.len());
        self.position.reset(start);
        if !self.options.flags.keep_blanks {
            skip_blanks::<T::Encoding>(&mut self.position, units, end);
        }
        let symbols = &*self.symbols;
        let sign = get_sign::<T::Encoding>(
            &mut self.position,
            units,
            end,
            symbols.plus_sign,
            symbols.minus_sign,
        );
        let number_start = self.position.index();
        self.lexeme.clear();
        let shape = get_real_lexeme::<T::Encoding>(
            &mut self.position,
            units,
            end,
            symbols.decimal_separator,
            symbols.exponent,
            &mut self.lexeme,
        );
        let value = if shape.digits == 0 {
            BigDecimal::zero()
        } else if let Ok(value) = self.lexeme.parse::<BigDecimal>() {
            value
        } else {
            self.position.set_error(ErrorCode::InvalidSyntax, number_start);
            BigDecimal::zero()
        };
        self.trace_failure("big decimal");
        if sign < 0 { -value } else { value }
    }

    /// Formats an 8-bit integer into `output`.
    pub fn format_byte<S: FormatSink + ?Sized>(&mut self, value: i8, output: &mut S) {
        let pattern = u8::from_ne_bytes(value.to_ne_bytes());
        self.write_int(i32::from(value), u32::from(pattern), output);
    }

    /// Formats a 16-bit integer into `output`.
    pub fn format_short<S: FormatSink + ?Sized>(&mut self, value: i16, output: &mut S) {
        let pattern = u16::from_ne_bytes(value.to_ne_bytes());
        self.write_int(i32::from(value), u32::from(pattern), output);
    }

    /// Formats a 32-bit integer into `output`.
    ///
    /// ```rust
    /// use numtext::{FormatFlags, NumberFormat, NumberFormatOptions};
    ///
    /// let mut nf = NumberFormat::with_options(NumberFormatOptions {
    ///     flags: FormatFlags { grouping: true, ..Default::default() },
    ///     ..Default::default()
    /// });
    /// let mut out = String::new();
    /// nf.format_int(-1_234_567, &mut out);
    /// assert_eq!(out, "-1,234,567");
    /// ```
    pub fn format_int<S: FormatSink + ?Sized>(&mut self, value: i32, output: &mut S) {
        self.write_int(value, u32::from_ne_bytes(value.to_ne_bytes()), output);
    }

    /// Formats a 64-bit integer into `output`.
    pub fn format_long<S: FormatSink + ?Sized>(&mut self, value: i64, output: &mut S) {
        self.write_long(value, u64::from_ne_bytes(value.to_ne_bytes()), output);
    }

    /// Formats a 32-bit real number into `output`.
    pub fn format_float<S: FormatSink + ?Sized>(&mut self, value: f32, output: &mut S) {
        self.write_real(value, output);
    }

    /// Formats a 64-bit real number into `output`.
    pub fn format_double<S: FormatSink + ?Sized>(&mut self, value: f64, output: &mut S) {
        self.write_real(value, output);
    }

    /// Checks the range, resets the cursor, skips blanks and reads the sign
    /// and radix.
    fn begin<E: Encoding>(&mut self, text: &[E::Unit], start: usize, end: usize) -> (i32, u32) {
        check_range(start, end, text.len());
        self.position.reset(start);
        let flags = self.options.flags;
        if !flags.keep_blanks {
            skip_blanks::<E>(&mut self.position, text, end);
        }
        let sign = get_sign::<E>(
            &mut self.position,
            text,
            end,
            self.symbols.plus_sign,
            self.symbols.minus_sign,
        );
        let radix = get_radix::<E>(&mut self.position, text, end, flags.radix, 10);
        (sign, radix)
    }

    fn grouping_separator(&self) -> Option<char> {
        self.options.flags.grouping.then_some(self.symbols.grouping_separator)
    }

    fn read_int<E: Encoding>(
        &mut self,
        text: &[E::Unit],
        start: usize,
        end: usize,
        max_value: i32,
        unsigned_max: u32,
    ) -> i32 {
        let (sign, radix) = self.begin::<E>(text, start, end);
        let max_digits = self.options.max_digits;
        let value = if radix == 10 {
            let separator = self.grouping_separator();
            get_decimal_int_grouped::<E>(
                &mut self.position,
                text,
                end,
                sign,
                max_value,
                max_digits,
                separator,
            )
        } else {
            let pattern = get_special_radix_int::<E>(
                &mut self.position,
                text,
                end,
                sign,
                radix,
                unsigned_max,
                max_digits,
            );
            i32::from_ne_bytes(pattern.to_ne_bytes())
        };
        self.trace_failure("integer");
        value
    }

    fn read_real<E: Encoding, F: Real>(&mut self, text: &[E::Unit], start: usize, end: usize) -> F {
        check_range(start, end, text.len());
        self.position.reset(start);
        if !self.options.flags.keep_blanks {
            skip_blanks::<E>(&mut self.position, text, end);
        }
        let symbols = &*self.symbols;
        let sign = get_sign::<E>(
            &mut self.position,
            text,
            end,
            symbols.plus_sign,
            symbols.minus_sign,
        );

        let magnitude = if get_symbol::<E>(&mut self.position, text, end, &symbols.infinity) {
            F::INFINITY
        } else if get_symbol::<E>(&mut self.position, text, end, &symbols.nan) {
            F::NAN
        } else {
            let number_start = self.position.index();
            self.lexeme.clear();
            let shape = get_real_lexeme::<E>(
                &mut self.position,
                text,
                end,
                symbols.decimal_separator,
                symbols.exponent,
                &mut self.lexeme,
            );
            if shape.digits == 0 {
                self.trace_failure("real");
                return F::ZERO;
            }
            match self.lexeme.parse::<F>() {
                Ok(value) if value.is_infinite() => {
                    self.position.set_error(ErrorCode::NumberOverflow, number_start);
                    value
                }
                Ok(value) if shape.nonzero && value == F::ZERO => {
                    self.position.set_error(ErrorCode::NumberUnderflow, number_start);
                    value
                }
                Ok(value) => value,
                Err(_) => {
                    self.position.set_error(ErrorCode::InvalidSyntax, number_start);
                    F::ZERO
                }
            }
        };
        self.trace_failure("real");
        if sign < 0 { -magnitude } else { magnitude }
    }

    fn trace_failure(&self, kind: &str) {
        if let (Some(code), Some(index)) = (self.position.error_code(), self.position.error_index()) {
            log::trace!("{kind} parse failed: {code} at index {index}");
        }
    }

    /// Grows the scratch buffer to at least `len` characters.
    fn reserve_scratch(&mut self, len: usize) {
        if self.scratch.len() < len {
            self.scratch.resize(len, '\0');
        }
    }

    /// Sign to put in front of a decimal or real number.
    fn sign_char(flags: &FormatFlags, symbols: &NumberFormatSymbols, negative: bool) -> Option<char> {
        if negative {
            return Some(symbols.minus_sign);
        }
        match flags.sign {
            SignMode::Negative => None,
            SignMode::Plus => Some(symbols.plus_sign),
            SignMode::Space => Some(' '),
        }
    }

    /// Scratch length for `bits` wide integers: one digit per bit at most,
    /// room for grouping, sign and prefix.
    fn int_capacity(&self, bits: u32, precision: usize, flags: &FormatFlags, radix: Radix) -> usize {
        let digits = precision.max(bits as usize);
        let prefix = if flags.show_radix {
            self.symbols.radix_prefix(radix.value()).chars().count()
        } else {
            0
        };
        digits + digits / 3 + 10 + prefix
    }
}

macro_rules! integer_writer {
    ($name:ident, $signed:ty, $unsigned:ty, $decimal:ident, $special:ident) => {
        impl NumberFormat {
            fn $name<S: FormatSink + ?Sized>(&mut self, value: $signed, pattern: $unsigned, output: &mut S) {
                let options = self.options;
                let flags = options.flags;
                let radix = flags.radix.unwrap_or(Radix::Decimal);
                let precision = options.int_precision.min(MAX_PRECISION);
                let end = self.int_capacity(<$unsigned>::BITS, precision, &flags, radix);
                self.reserve_scratch(end);

                let symbols = &*self.symbols;
                let buffer = &mut self.scratch;
                let digits = symbols.digits(flags.case);
                let mut start = match radix.shift() {
                    None => {
                        let grouping = flags.grouping.then_some(symbols.grouping_separator);
                        $decimal(value, precision, digits, grouping, buffer, end)
                    }
                    Some(shift) => $special(pattern, shift, precision, digits, buffer, end),
                };
                if flags.show_radix {
                    let prefix = symbols.radix_prefix(radix.value());
                    start = put_radix_prefix_backward(prefix, flags.uppercase_radix_prefix, buffer, start);
                }
                if radix == Radix::Decimal {
                    if let Some(sign) = Self::sign_char(&flags, symbols, value < 0) {
                        start = put_sign_backward(sign, buffer, start);
                    }
                }
                put_format_result(&flags, options.width, options.fill, buffer, start, end, output);
            }
        }
    };
}

integer_writer!(
    write_int,
    i32,
    u32,
    put_decimal_int_abs_backward,
    put_special_radix_int_backward
);
integer_writer!(
    write_long,
    i64,
    u64,
    put_decimal_long_abs_backward,
    put_special_radix_long_backward
);

impl NumberFormat {
    fn write_real<F: Real, S: FormatSink + ?Sized>(&mut self, value: F, output: &mut S) {
        let options = self.options;
        let flags = options.flags;
        let symbols = &*self.symbols;

        let negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = if negative { -value } else { value };
        let finite = !value.is_nan() && !value.is_infinite();

        self.lexeme.clear();
        if finite {
            let precision = options.real_precision.min(MAX_PRECISION);
            // Writing into a `String` cannot fail.
            let _ = match flags.real_notation {
                RealNotation::Fixed => write!(self.lexeme, "{magnitude:.precision$}"),
                RealNotation::Scientific => write!(self.lexeme, "{magnitude:.precision$e}"),
                RealNotation::Shortest => write!(self.lexeme, "{magnitude}"),
            };
        }

        let body_len = if finite {
            self.lexeme.chars().count()
        } else if value.is_nan() {
            symbols.nan.chars().count()
        } else {
            symbols.infinity.chars().count()
        };
        let capacity = body_len + 2;
        if self.scratch.len() < capacity {
            self.scratch.resize(capacity, '\0');
        }

        let buffer = &mut self.scratch;
        let mut end = 0;
        let mut push = |ch: char| {
            buffer[end] = ch;
            end += 1;
        };

        if !value.is_nan() {
            if let Some(sign) = Self::sign_char(&flags, symbols, negative) {
                push(sign);
            }
        }
        if value.is_nan() {
            symbols.nan.chars().for_each(&mut push);
        } else if !finite {
            symbols.infinity.chars().for_each(&mut push);
        } else {
            let mut has_point = false;
            for ch in self.lexeme.chars() {
                match ch {
                    '.' => {
                        has_point = true;
                        push(symbols.decimal_separator);
                    }
                    'e' => {
                        if flags.show_point && !has_point {
                            has_point = true;
                            push(symbols.decimal_separator);
                        }
                        push(if flags.uppercase_exponent {
                            symbols.exponent.to_ascii_uppercase()
                        } else {
                            symbols.exponent
                        });
                    }
                    _ => push(ch),
                }
            }
            if flags.show_point && !has_point {
                push(symbols.decimal_separator);
            }
        }

        put_format_result(&flags, options.width, options.fill, &self.scratch, 0, end, output);
    }
}

/// Turns a failed cursor, or input left after the parsed value, into a
/// [`ParseError`]. Trailing blanks are accepted unless `keep_blanks` is set.
pub(crate) fn ensure_consumed<T: Text + ?Sized>(
    position: &mut ParsePosition,
    text: &T,
    keep_blanks: bool,
) -> Result<(), ParseError> {
    let units = text.units();
    let end = units.len();
    if position.success() && position.index() < end {
        if !keep_blanks {
            skip_blanks::<T::Encoding>(position, units, end);
        }
        let index = position.index();
        if index < end {
            let mut lookahead = ParsePosition::new(index);
            let code = match <T::Encoding as Encoding>::decode_next(&mut lookahead, units, end) {
                Err(code) => code,
                Ok(_) => ErrorCode::InvalidSyntax,
            };
            position.set_error(code, index);
        }
    }
    match (position.error_code(), position.error_index()) {
        (Some(code), Some(index)) => Err(ParseError::new(text.to_bstring(), index, code)),
        _ => Ok(()),
    }
}
