//! Searching a `CharBuf`.
//!
//! Every search returns the offset of the match, or `None`. Start offsets
//! past the end are clamped: forward searches find nothing there and
//! backward searches start from the last unit. The `*_of` family tests each
//! unit for membership in a set and never matches sequences.

use rawstore::RawStorage;

use crate::code_unit::CodeUnit;
use crate::core::CharBuf;

impl<C: CodeUnit, S: RawStorage> CharBuf<C, S> {
    /// First offset at or after `from` holding `unit`.
    #[must_use]
    pub fn find(&self, unit: C, from: usize) -> Option<usize> {
        let units = self.as_slice();
        let offset = units.get(from..)?.iter().position(|&candidate| candidate == unit)?;
        Some(from + offset)
    }

    /// First offset at or after `from` where `needle` starts.
    ///
    /// An empty needle matches at `from` itself while `from <= len()`.
    #[must_use]
    pub fn find_units(&self, needle: &[C], from: usize) -> Option<usize> {
        let haystack = self.as_slice().get(from..)?;
        if needle.is_empty() {
            return Some(from);
        }
        let offset = haystack.windows(needle.len()).position(|window| window == needle)?;
        Some(from + offset)
    }

    /// [`CharBuf::find_units`] with another buffer's units as the needle.
    #[must_use]
    pub fn find_buf<S2: RawStorage>(&self, needle: &CharBuf<C, S2>, from: usize) -> Option<usize> {
        self.find_units(needle.as_slice(), from)
    }

    /// Last offset where `needle` starts, no later than `from`.
    ///
    /// `None` for `from` searches the whole buffer. An empty needle matches at
    /// `from` clamped to `len()`.
    #[must_use]
    pub fn rfind_units(&self, needle: &[C], from: Option<usize>) -> Option<usize> {
        let units = self.as_slice();
        let last_start = units.len().checked_sub(needle.len())?;
        let start = from.map_or(last_start, |from| from.min(last_start));
        if needle.is_empty() {
            return Some(start);
        }
        units[..start + needle.len()]
            .windows(needle.len())
            .rposition(|window| window == needle)
    }

    /// First offset at or after `from` holding a unit of `set`.
    #[must_use]
    pub fn find_first_of(&self, set: &[C], from: usize) -> Option<usize> {
        self.scan_forward(from, |unit| set.contains(&unit))
    }

    /// First offset at or after `from` holding a unit outside `set`.
    #[must_use]
    pub fn find_first_not_of(&self, set: &[C], from: usize) -> Option<usize> {
        self.scan_forward(from, |unit| !set.contains(&unit))
    }

    /// Last offset no later than `before` holding a unit of `set`.
    ///
    /// `None` for `before` starts from the last unit.
    #[must_use]
    pub fn find_last_of(&self, set: &[C], before: Option<usize>) -> Option<usize> {
        self.scan_backward(before, |unit| set.contains(&unit))
    }

    /// Last offset no later than `before` holding a unit outside `set`.
    #[must_use]
    pub fn find_last_not_of(&self, set: &[C], before: Option<usize>) -> Option<usize> {
        self.scan_backward(before, |unit| !set.contains(&unit))
    }

    fn scan_forward(&self, from: usize, mut matches: impl FnMut(C) -> bool) -> Option<usize> {
        let offset = self
            .as_slice()
            .get(from..)?
            .iter()
            .position(|&unit| matches(unit))?;
        Some(from + offset)
    }

    fn scan_backward(&self, before: Option<usize>, mut matches: impl FnMut(C) -> bool) -> Option<usize> {
        let units = self.as_slice();
        let last = units.len().checked_sub(1)?;
        let start = before.map_or(last, |before| before.min(last));
        units[..=start].iter().rposition(|&unit| matches(unit))
    }
}
