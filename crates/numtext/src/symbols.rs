use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use alloc::{collections::BTreeMap, sync::Arc};

use crate::Case;

const LOWER_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];
const UPPER_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Characters and strings a [`NumberFormat`](crate::NumberFormat) reads and
/// writes.
///
/// The default is the locale-independent table: ASCII digits, `0b`/`0`/`0x`
/// prefixes, `.` as decimal separator and `,` for grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormatSymbols {
    /// Digits `0`-`9` and `A`-`F`.
    pub upper_digits: [char; 16],
    /// Digits `0`-`9` and `a`-`f`.
    pub lower_digits: [char; 16],
    /// Radix prefixes indexed by radix. Radices without a prefix map to an
    /// empty string.
    pub radix_prefixes: [String; 17],
    /// Sign of positive numbers when one is requested.
    pub plus_sign: char,
    /// Sign of negative numbers.
    pub minus_sign: char,
    /// Separator between integer and fraction digits.
    pub decimal_separator: char,
    /// Separator between digit groups.
    pub grouping_separator: char,
    /// Exponent marker of scientific notation, in lower case.
    pub exponent: char,
    /// Text of an infinite real number.
    pub infinity: String,
    /// Text of a real number that is not a number.
    pub nan: String,
    /// Percent sign.
    pub percent: char,
    /// Currency symbol.
    pub currency: String,
}

impl Default for NumberFormatSymbols {
    fn default() -> Self {
        let mut radix_prefixes: [String; 17] = Default::default();
        radix_prefixes[2] = "0b".to_string();
        radix_prefixes[8] = "0".to_string();
        radix_prefixes[16] = "0x".to_string();
        Self {
            upper_digits: UPPER_DIGITS,
            lower_digits: LOWER_DIGITS,
            radix_prefixes,
            plus_sign: '+',
            minus_sign: '-',
            decimal_separator: '.',
            grouping_separator: ',',
            exponent: 'e',
            infinity: "Infinity".to_string(),
            nan: "NaN".to_string(),
            percent: '%',
            currency: "\u{A4}".to_string(),
        }
    }
}

/// Lower-cases a language tag and turns `_` into `-`.
fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .chars()
        .map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() })
        .collect()
}

impl NumberFormatSymbols {
    /// Separator and currency conventions for a few well-known language tags
    /// (`en`, `de`, `fr`, `ru` and Swiss `de-CH`/`ch`), matched
    /// case-insensitively on the primary language. Returns `None` for any
    /// other tag.
    ///
    /// ```rust
    /// use numtext::NumberFormatSymbols;
    ///
    /// let de = NumberFormatSymbols::for_locale("de_DE").unwrap();
    /// assert_eq!(de.decimal_separator, ',');
    /// assert!(NumberFormatSymbols::for_locale("tlh").is_none());
    /// ```
    #[must_use]
    pub fn for_locale(tag: &str) -> Option<Self> {
        let tag = normalize_tag(tag);
        let (decimal_separator, grouping_separator, currency) = match tag.as_str() {
            "ch" | "de-ch" | "fr-ch" | "it-ch" => ('.', '\u{2019}', "CHF"),
            _ => match tag.split('-').next().unwrap_or_default() {
                "en" => ('.', ',', "$"),
                "de" => (',', '.', "\u{20AC}"),
                "fr" => (',', '\u{202F}', "\u{20AC}"),
                "ru" => (',', '\u{A0}', "\u{20BD}"),
                _ => return None,
            },
        };
        Some(Self {
            decimal_separator,
            grouping_separator,
            currency: currency.to_string(),
            ..Self::default()
        })
    }

    /// Digit alphabet for `case`. Title case uses lower-case digits.
    #[must_use]
    pub fn digits(&self, case: Case) -> &[char; 16] {
        match case {
            Case::Upper => &self.upper_digits,
            Case::Lower | Case::Title => &self.lower_digits,
        }
    }

    /// Prefix for `radix`; empty for radices without one or above 16.
    #[must_use]
    pub fn radix_prefix(&self, radix: u32) -> &str {
        usize::try_from(radix)
            .ok()
            .and_then(|index| self.radix_prefixes.get(index))
            .map_or("", String::as_str)
    }
}

/// Memoized [`NumberFormatSymbols`] per language tag.
///
/// Lookups take the read lock; only the first lookup of a tag takes the write
/// lock to populate its entry. Unknown tags resolve to the default symbols.
/// Share one cache between threads and hand its `Arc`s to
/// [`NumberFormat::with_symbols`](crate::NumberFormat::with_symbols).
///
/// ```rust
/// use numtext::SymbolsCache;
///
/// let cache = SymbolsCache::new();
/// let de = cache.get("de");
/// assert_eq!(de.grouping_separator, '.');
/// assert!(std::sync::Arc::ptr_eq(&de, &cache.get("DE")));
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct SymbolsCache {
    default: Arc<NumberFormatSymbols>,
    entries: parking_lot::RwLock<BTreeMap<String, Arc<NumberFormatSymbols>>>,
}

#[cfg(feature = "std")]
impl SymbolsCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols for `tag`, looked up once and shared afterwards.
    pub fn get(&self, tag: &str) -> Arc<NumberFormatSymbols> {
        let key = normalize_tag(tag);
        if let Some(symbols) = self.entries.read().get(&key) {
            return Arc::clone(symbols);
        }

        let mut entries = self.entries.write();
        let symbols = entries.entry(key).or_insert_with_key(|key| {
            if let Some(symbols) = NumberFormatSymbols::for_locale(key) {
                log::debug!("caching number symbols for locale {key:?}");
                Arc::new(symbols)
            } else {
                log::debug!("no number symbols for locale {key:?}, using defaults");
                Arc::clone(&self.default)
            }
        });
        Arc::clone(symbols)
    }

    /// The symbols unknown tags resolve to.
    #[must_use]
    pub fn default_symbols(&self) -> Arc<NumberFormatSymbols> {
        Arc::clone(&self.default)
    }

    /// Number of cached tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// `true` if no tag has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
