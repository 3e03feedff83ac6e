use crate::{
    BooleanFormatOptions, Case, ErrorCode, FormatSink, ParseError, ParsePosition,
    format::put_format_result,
    number_format::ensure_consumed,
    parse::{get_symbol, skip_blanks},
    position::check_range,
    unicode::{Encoding, Text},
};

/// Parses and formats `bool` values as `true`/`false` or `1`/`0`.
///
/// ```rust
/// use numtext::{BooleanFormat, BooleanFormatOptions, Case, FormatFlags};
///
/// let mut bf = BooleanFormat::with_options(BooleanFormatOptions {
///     flags: FormatFlags { case: Case::Title, ..Default::default() },
///     ..Default::default()
/// });
/// let mut out = String::new();
/// bf.format(false, &mut out);
/// assert_eq!(out, "False");
/// assert_eq!(bf.try_parse(" TRUE"), Ok(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BooleanFormat {
    options: BooleanFormatOptions,
    position: ParsePosition,
}

impl BooleanFormat {
    /// A format with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A format with `options`.
    #[must_use]
    pub fn with_options(options: BooleanFormatOptions) -> Self {
        Self {
            options,
            position: ParsePosition::default(),
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &BooleanFormatOptions {
        &self.options
    }

    /// Mutable access to the options.
    pub fn options_mut(&mut self) -> &mut BooleanFormatOptions {
        &mut self.options
    }

    /// Cursor left by the last parse.
    #[must_use]
    pub fn position(&self) -> &ParsePosition {
        &self.position
    }

    /// Formats `value` into `output`: `true`/`false` in the configured case
    /// with `bool_alpha`, `1`/`0` otherwise.
    pub fn format<S: FormatSink + ?Sized>(&self, value: bool, output: &mut S) {
        let flags = self.options.flags;
        let word = match (flags.bool_alpha, value) {
            (false, true) => "1",
            (false, false) => "0",
            (true, true) => "true",
            (true, false) => "false",
        };

        let mut buffer = ['\0'; 5];
        let mut len = 0;
        for (index, ch) in word.chars().enumerate() {
            buffer[index] = match flags.case {
                Case::Lower => ch,
                Case::Upper => ch.to_ascii_uppercase(),
                Case::Title if index == 0 => ch.to_ascii_uppercase(),
                Case::Title => ch,
            };
            len += 1;
        }
        put_format_result(&flags, self.options.width, self.options.fill, &buffer, 0, len, output);
    }

    /// Parses `true`, `false`, `1` or `0` (ASCII case-insensitive) from
    /// `text[start..end]`. Blanks before the value are skipped unless
    /// `keep_blanks` is set.
    ///
    /// Without a match the result is `false` with `EmptyValue` (nothing left
    /// to read) or `InvalidSyntax` recorded on [`position`](Self::position).
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a range within `text`.
    pub fn parse<T: Text + ?Sized>(&mut self, text: &T, start: usize, end: usize) -> bool {
        let units = text.units();
        check_range(start, end, units.len());
        self.position.reset(start);
        if !self.options.flags.keep_blanks {
            skip_blanks::<T::Encoding>(&mut self.position, units, end);
        }

        for (word, value) in [("true", true), ("false", false), ("1", true), ("0", false)] {
            if get_symbol::<T::Encoding>(&mut self.position, units, end, word) {
                return value;
            }
        }

        let index = self.position.index();
        let code = if index == end {
            ErrorCode::EmptyValue
        } else {
            let mut lookahead = ParsePosition::new(index);
            match <T::Encoding as Encoding>::decode_next(&mut lookahead, units, end) {
                Err(code) => code,
                Ok(_) => ErrorCode::InvalidSyntax,
            }
        };
        self.position.set_error(code, index);
        log::trace!("boolean parse failed: {code} at index {index}");
        false
    }

    /// Parses all of `text` as a boolean.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if no boolean is found or input other than
    /// trailing blanks follows it.
    pub fn try_parse<T: Text + ?Sized>(&mut self, text: &T) -> Result<bool, ParseError> {
        let value = self.parse(text, 0, text.units().len());
        ensure_consumed(&mut self.position, text, self.options.flags.keep_blanks)?;
        Ok(value)
    }
}
