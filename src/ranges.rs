//! Emoji code-point ranges.
//!
//! The table below is the authoritative list of ranges removed by the stripper. It is kept in
//! its historical order, with overlaps. [`RangeSet`] normalizes it into sorted, disjoint
//! intervals so membership is a binary search.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// An inclusive range of Unicode code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointRange {
    pub low: u32,
    pub high: u32,
}

impl CodePointRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub const fn single(cp: u32) -> Self {
        Self { low: cp, high: cp }
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.low <= cp && cp <= self.high
    }
}

impl fmt::Display for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "U+{:04X}", self.low)
        } else {
            write!(f, "U+{:04X}-{:04X}", self.low, self.high)
        }
    }
}

/// Parses `U+2B50`, `U+2B1B-2B1C`, or `U+2B1B-U+2B1C` (the `U+` prefix is optional).
impl FromStr for CodePointRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRange(s.to_string());

        fn parse_cp(part: &str) -> Option<u32> {
            let part = part.trim();
            let hex = part
                .strip_prefix("U+")
                .or_else(|| part.strip_prefix("u+"))
                .unwrap_or(part);
            if hex.is_empty() {
                return None;
            }
            let cp = u32::from_str_radix(hex, 16).ok()?;
            (cp <= char::MAX as u32).then_some(cp)
        }

        let range = match s.split_once('-') {
            Some((low, high)) => Self::new(parse_cp(low).ok_or_else(invalid)?, parse_cp(high).ok_or_else(invalid)?),
            None => Self::single(parse_cp(s).ok_or_else(invalid)?),
        };

        if range.low > range.high {
            return Err(invalid());
        }
        Ok(range)
    }
}

/// Emoji and pictographic symbol ranges, inclusive on both ends.
pub const EMOJI_RANGES: &[CodePointRange] = &[
    CodePointRange::new(0x1F600, 0x1F64F), // Emoticons
    CodePointRange::new(0x1F300, 0x1F5FF), // Misc symbols and pictographs
    CodePointRange::new(0x1F680, 0x1F6FF), // Transport and map
    CodePointRange::new(0x1F1E0, 0x1F1FF), // Regional indicators (flags)
    CodePointRange::new(0x2600, 0x26FF),   // Misc symbols
    CodePointRange::new(0x2700, 0x27BF),   // Dingbats
    CodePointRange::new(0x1F900, 0x1F9FF), // Supplemental symbols and pictographs
    CodePointRange::new(0x1FA00, 0x1FA6F), // Chess symbols
    CodePointRange::new(0x1FA70, 0x1FAFF), // Symbols and pictographs extended-A
    CodePointRange::new(0x231A, 0x231B),
    CodePointRange::new(0x23E9, 0x23EC),
    CodePointRange::single(0x23F0),
    CodePointRange::single(0x23F3),
    CodePointRange::new(0x25FD, 0x25FE),
    CodePointRange::new(0x2614, 0x2615),
    CodePointRange::new(0x2648, 0x2653),
    CodePointRange::single(0x267F),
    CodePointRange::single(0x2693),
    CodePointRange::single(0x26A1),
    CodePointRange::new(0x26AA, 0x26AB),
    CodePointRange::new(0x26BD, 0x26BE),
    CodePointRange::new(0x26C4, 0x26C5),
    CodePointRange::single(0x26CE),
    CodePointRange::single(0x26D4),
    CodePointRange::single(0x26EA),
    CodePointRange::new(0x26F2, 0x26F3),
    CodePointRange::single(0x26F5),
    CodePointRange::single(0x26FA),
    CodePointRange::single(0x26FD),
    CodePointRange::single(0x2705),
    CodePointRange::new(0x270A, 0x270B),
    CodePointRange::single(0x2728),
    CodePointRange::single(0x274C),
    CodePointRange::single(0x274E),
    CodePointRange::new(0x2753, 0x2755),
    CodePointRange::single(0x2757),
    CodePointRange::new(0x2795, 0x2797),
    CodePointRange::single(0x27B0),
    CodePointRange::single(0x27BF),
    CodePointRange::new(0x2B1B, 0x2B1C),
    CodePointRange::single(0x2B50),
    CodePointRange::single(0x2B55),
];

/// A normalized set of code-point ranges: sorted, non-overlapping, non-adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSet {
    intervals: Vec<CodePointRange>,
}

impl RangeSet {
    /// The default emoji set built from [`EMOJI_RANGES`].
    pub fn emoji() -> Self {
        Self::from_ranges(EMOJI_RANGES.iter().copied())
    }

    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        let mut sorted: Vec<CodePointRange> = ranges.into_iter().collect();
        sorted.sort_unstable();

        let mut intervals: Vec<CodePointRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match intervals.last_mut() {
                Some(last) if range.low <= last.high.saturating_add(1) => {
                    last.high = last.high.max(range.high);
                }
                _ => intervals.push(range),
            }
        }

        Self { intervals }
    }

    /// Add more ranges, re-normalizing the set.
    pub fn extend<I>(&mut self, ranges: I)
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        let merged = std::mem::take(&mut self.intervals).into_iter().chain(ranges);
        *self = Self::from_ranges(merged);
    }

    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        // First interval whose upper bound is >= cp is the only candidate
        let idx = self.intervals.partition_point(|r| r.high < cp);
        self.intervals.get(idx).is_some_and(|r| r.low <= cp)
    }

    pub fn intervals(&self) -> &[CodePointRange] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total number of code points covered by the set.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(|r| (r.high - r.low + 1) as usize).sum()
    }
}
