//! Text transformation: remove every code point that falls in a [`RangeSet`].

use std::borrow::Cow;

use crate::ranges::RangeSet;

/// Result of stripping a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// Content with matching code points removed. Borrowed when nothing matched.
    pub content: Cow<'a, str>,
    /// Number of code points removed.
    pub removed: usize,
    /// Number of UTF-8 bytes removed.
    pub bytes_removed: usize,
}

impl Stripped<'_> {
    pub fn changed(&self) -> bool {
        self.removed > 0
    }

    pub fn into_owned(self) -> String {
        self.content.into_owned()
    }
}

/// Remove all characters of `content` contained in `ranges`.
///
/// Everything else, including whitespace and line endings, is copied verbatim.
pub fn strip<'a>(content: &'a str, ranges: &RangeSet) -> Stripped<'a> {
    // Fast path: most documents contain nothing to remove
    let Some(first) = content.char_indices().find(|&(_, c)| ranges.contains(c)).map(|(i, _)| i) else {
        return Stripped {
            content: Cow::Borrowed(content),
            removed: 0,
            bytes_removed: 0,
        };
    };

    let mut out = String::with_capacity(content.len());
    out.push_str(&content[..first]);

    let mut removed = 0;
    let mut bytes_removed = 0;
    for c in content[first..].chars() {
        if ranges.contains(c) {
            removed += 1;
            bytes_removed += c.len_utf8();
        } else {
            out.push(c);
        }
    }

    Stripped {
        content: Cow::Owned(out),
        removed,
        bytes_removed,
    }
}
