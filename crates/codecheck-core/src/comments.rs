//! Comment region location.
//!
//! Comment regions are file-global: they are located once per file and
//! shared by every rule evaluated against that file.

use crate::pattern::Pattern;

/// A closed byte range `[start, end]` covered by a comment.
///
/// `end` is the exclusive end of the comment match, but containment treats it
/// as inclusive, so a match starting right after a comment counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First byte of the comment.
    pub start: usize,
    /// End of the comment match.
    pub end: usize,
}

impl Interval {
    /// Tests `start <= offset <= end`.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// The comment intervals of one file, in match order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    intervals: Vec<Interval>,
}

impl CommentMap {
    /// A map with no comment regions.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tests whether `offset` lies in at least one interval.
    ///
    /// Overlapping intervals are not merged.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.intervals.iter().any(|i| i.contains(offset))
    }

    /// Returns the intervals in match order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of comment regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if there are no comment regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl FromIterator<Interval> for CommentMap {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}

/// Locates every comment region in `content`.
#[must_use]
pub fn locate(content: &str, comment: &Pattern) -> CommentMap {
    comment
        .find_all(content)
        .into_iter()
        .map(|span| Interval {
            start: span.start,
            end: span.end,
        })
        .collect()
}
