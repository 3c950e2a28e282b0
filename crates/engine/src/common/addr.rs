//! Cache-line and page geometry.
//!
//! This module defines address arithmetic over raw byte addresses. It provides:
//! 1. **Line Indexing:** Conversion between byte addresses and cache-line numbers.
//! 2. **Target Construction:** Line-aligned prefetch targets offset by a signed
//!    delta, with overflow reported rather than wrapped.
//! 3. **Page Checks:** Same-page tests used to bound speculation.

use super::constants;

/// Address arithmetic for a fixed line/page geometry.
///
/// Both sizes must be powers of two; invalid sizes fall back to the defaults
/// in [`constants`]. All prefetch targets produced through this type are
/// aligned to a line boundary.
#[derive(Clone, Copy, Debug)]
pub struct LineGeometry {
    /// Shift converting byte addresses to line numbers.
    line_shift: u32,
    /// Shift converting byte addresses to page numbers.
    page_shift: u32,
}

impl LineGeometry {
    /// Creates a geometry from line and page sizes in bytes.
    ///
    /// Non-power-of-two sizes, and pages smaller than a line, are replaced
    /// with the defaults rather than rejected.
    ///
    /// # Arguments
    ///
    /// * `line_bytes` - Cache line size in bytes.
    /// * `page_bytes` - Page size in bytes.
    pub const fn new(line_bytes: u64, page_bytes: u64) -> Self {
        let safe_line = if line_bytes.is_power_of_two() {
            line_bytes
        } else {
            constants::LINE_BYTES
        };
        let safe_page = if page_bytes.is_power_of_two() && page_bytes >= safe_line {
            page_bytes
        } else if constants::PAGE_BYTES >= safe_line {
            constants::PAGE_BYTES
        } else {
            safe_line
        };

        Self {
            line_shift: safe_line.trailing_zeros(),
            page_shift: safe_page.trailing_zeros(),
        }
    }

    /// Returns the cache line size in bytes.
    #[inline(always)]
    pub const fn line_bytes(&self) -> u64 {
        1 << self.line_shift
    }

    /// Returns the page size in bytes.
    #[inline(always)]
    pub const fn page_bytes(&self) -> u64 {
        1 << self.page_shift
    }

    /// Returns the cache-line number containing `addr`.
    #[inline(always)]
    pub const fn line_index(&self, addr: u64) -> u64 {
        addr >> self.line_shift
    }

    /// Returns whether two byte addresses fall in the same page.
    #[inline(always)]
    pub const fn same_page(&self, a: u64, b: u64) -> bool {
        (a ^ b) >> self.page_shift == 0
    }

    /// Builds the line-aligned target `delta` lines away from `addr`.
    ///
    /// Returns `None` when the target would fall below address zero or
    /// overflow the address space.
    pub fn target(&self, addr: u64, delta: i64) -> Option<u64> {
        let line = (self.line_index(addr) as i64).checked_add(delta)?;
        if line < 0 {
            return None;
        }
        (line as u64).checked_mul(self.line_bytes())
    }
}

impl Default for LineGeometry {
    /// Returns the default 64-byte line / 4 KiB page geometry.
    fn default() -> Self {
        Self::new(constants::LINE_BYTES, constants::PAGE_BYTES)
    }
}
