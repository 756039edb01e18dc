use crate::utils::error::Result;
use crate::utils::validation::validate_non_negative;
use std::ops::Range;

/// Upper bound on the number of fundraisers returned by one page.
pub const MAX_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Accepts paging arguments from untrusted signed sources (text, JSON).
    pub fn from_signed(limit: i64, offset: i64) -> Result<Self> {
        Ok(Self {
            limit: validate_non_negative("limit", limit)?,
            offset: validate_non_negative("offset", offset)?,
        })
    }

    /// The slice of a collection of `count` items this request selects.
    ///
    /// Always within `0..count` and never longer than [`MAX_PAGE_SIZE`].
    pub fn window(&self, count: usize) -> Range<usize> {
        if self.offset >= count {
            return 0..0;
        }
        let effective_limit = self.limit.min(MAX_PAGE_SIZE);
        let end = self.offset.saturating_add(effective_limit).min(count);
        self.offset..end
    }
}
