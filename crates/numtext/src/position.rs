use crate::ErrorCode;

/// Mutable parse cursor: the current code unit index plus the first error
/// recorded at or before it.
///
/// Primitives never abort on bad data. They record the failure here and keep
/// returning (possibly saturated) values, so callers must check
/// [`success`](Self::success) before trusting a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsePosition {
    index: usize,
    error: Option<(ErrorCode, usize)>,
}

impl ParsePosition {
    /// Creates a cursor at `index` with no error.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, error: None }
    }

    /// Moves to `index` and clears any recorded error.
    pub fn reset(&mut self, index: usize) {
        self.index = index;
        self.error = None;
    }

    /// Current code unit index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Moves to `index` without touching the error state.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Advances by `count` code units.
    pub fn increase(&mut self, count: usize) {
        self.index += count;
    }

    /// Retreats by `count` code units.
    ///
    /// # Panics
    ///
    /// Panics if `count` is larger than the current index.
    pub fn decrease(&mut self, count: usize) {
        assert!(
            count <= self.index,
            "cannot move cursor {count} units back from index {}",
            self.index
        );
        self.index -= count;
    }

    /// Records `code` at `index` unless an earlier error is already recorded.
    pub fn set_error(&mut self, code: ErrorCode, index: usize) {
        if self.error.is_none() {
            self.error = Some((code, index));
        }
    }

    /// Forgets the recorded error, keeping the index.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// The first recorded error, if any.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self.error {
            Some((code, _)) => Some(code),
            None => None,
        }
    }

    /// Index at which the first recorded error occurred.
    #[must_use]
    pub const fn error_index(&self) -> Option<usize> {
        match self.error {
            Some((_, index)) => Some(index),
            None => None,
        }
    }

    /// `true` while no error has been recorded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.error.is_none()
    }

    /// `true` once an error has been recorded.
    #[must_use]
    pub const fn fail(&self) -> bool {
        self.error.is_some()
    }
}

/// Asserts the half-open range `[start, end)` lies within a text of `len`
/// units. Violations are programming errors, not parse failures.
#[track_caller]
pub(crate) fn check_range(start: usize, end: usize, len: usize) {
    assert!(
        start <= end && end <= len,
        "range {start}..{end} out of bounds for text of length {len}"
    );
}
