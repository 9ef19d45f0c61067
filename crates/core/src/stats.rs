use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Line classification result for a single text.
///
/// `total()` always equals the number of lines in the classified text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineCounts {
    /// Lines containing code (including mixed code + comment lines).
    pub code: usize,
    /// Lines containing only comment content.
    pub comment: usize,
    /// Whitespace-only lines outside block comments.
    pub blank: usize,
}

impl LineCounts {
    #[inline]
    #[must_use]
    pub const fn new(code: usize, comment: usize, blank: usize) -> Self {
        Self { code, comment, blank }
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.code + self.comment + self.blank
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.code + rhs.code, self.comment + rhs.comment, self.blank + rhs.blank)
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.code += rhs.code;
        self.comment += rhs.comment;
        self.blank += rhs.blank;
    }
}

impl Sum for LineCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a LineCounts> for LineCounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Aggregation node (directory, language, or grand total).
///
/// Only the three line categories and the file count are stored;
/// `total()` is derived so it can never drift from its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub name: String,
    pub files: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

impl Statistics {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: 0,
            code: 0,
            comment: 0,
            blank: 0,
        }
    }

    /// Adds one file's counts to this node.
    pub fn append(&mut self, counts: &LineCounts) -> &mut Self {
        self.files += 1;
        self.code += counts.code;
        self.comment += counts.comment;
        self.blank += counts.blank;
        self
    }

    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.code + self.comment + self.blank
    }

    #[must_use]
    pub const fn counts(&self) -> LineCounts {
        LineCounts::new(self.code, self.comment, self.blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_counts_total_and_sum() {
        let items = [LineCounts::new(3, 1, 2), LineCounts::new(0, 4, 0)];
        let sum: LineCounts = items.iter().sum();
        assert_eq!(sum, LineCounts::new(3, 5, 2));
        assert_eq!(sum.total(), 10);
    }

    #[test]
    fn test_statistics_append_derives_total() {
        let mut stats = Statistics::new("Total");
        stats.append(&LineCounts::new(10, 2, 3)).append(&LineCounts::new(1, 0, 0));
        assert_eq!(stats.files, 2);
        assert_eq!(stats.code, 11);
        assert_eq!(stats.total(), 16);
        assert_eq!(stats.counts(), LineCounts::new(11, 2, 3));
    }

    #[test]
    fn test_zero_counts() {
        assert_eq!(LineCounts::zero().total(), 0);
        assert_eq!(LineCounts::new(0, 0, 1).total(), 1);
    }
}
