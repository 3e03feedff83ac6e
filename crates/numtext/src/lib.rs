//! Locale-independent number parsing and formatting, built on a UTF-8/UTF-16
//! code point boundary engine.
//!
//! The crate is organised leaves first:
//!
//! - [`ErrorCode`] and [`ParsePosition`]: the failure taxonomy and the mutable
//!   parse cursor every primitive reports into.
//! - [`unicode`]: classification, stepping, decoding and encoding of code
//!   points over `[u8]` (UTF-8) and `[u16]` (UTF-16) buffers.
//! - [`parse`] and [`format`]: stateless integer parsing and backward digit
//!   emission primitives.
//! - [`NumberFormat`] and [`BooleanFormat`]: facades combining the primitives
//!   with [`NumberFormatOptions`] and [`NumberFormatSymbols`].
//!
//! ```rust
//! use numtext::{FormatFlags, NumberFormat, NumberFormatOptions, Radix};
//!
//! let mut nf = NumberFormat::new();
//! assert_eq!(nf.parse_int("0x1A", 0, 4), 26);
//! assert!(nf.position().success());
//!
//! let mut hex = NumberFormat::with_options(NumberFormatOptions {
//!     flags: FormatFlags {
//!         radix: Some(Radix::Hexadecimal),
//!         case: numtext::Case::Upper,
//!         ..Default::default()
//!     },
//!     int_precision: 2,
//!     ..Default::default()
//! });
//! let mut out = String::new();
//! hex.format_byte(-1, &mut out);
//! assert_eq!(out, "FF");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod boolean_format;
mod error;
mod flags;
mod number_format;
mod options;
mod position;
mod symbols;

pub mod format;
pub mod parse;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use boolean_format::BooleanFormat;
pub use error::{ErrorCode, ParseError};
pub use flags::{Alignment, Case, FormatFlags, Radix, RealNotation, SignMode};
pub use format::FormatSink;
pub use number_format::NumberFormat;
pub use options::{BooleanFormatOptions, MAX_PRECISION, NumberFormatOptions};
pub use position::ParsePosition;
#[cfg(feature = "std")]
pub use symbols::SymbolsCache;
pub use symbols::NumberFormatSymbols;
pub use unicode::{Encoding, Text, Utf8, Utf16};
