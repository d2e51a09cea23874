//! Match collection and result types

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::explanation::Explanation;
use crate::{Ordinal, Score};

/// One ranked result: document ordinal, score, optional explanation.
///
/// Matches are created fresh per query and may be rewritten in place by
/// decorator layers before they reach the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMatch {
    /// Global position of the document in the reader snapshot.
    pub ordinal: Ordinal,
    pub score: Score,
    pub explanation: Option<Explanation>,
}

/// Heap entry ordered so that the heap maximum is the worst-ranked match.
struct Ranked(DocumentMatch);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.0.ordinal == other.0.ordinal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .score
            .partial_cmp(&self.0.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.0.ordinal.cmp(&other.0.ordinal))
    }
}

/// Collector for the top-n matches by score.
pub(crate) struct TopNCollector {
    heap: BinaryHeap<Ranked>,
    size: usize,
}

impl TopNCollector {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(size + 1),
            size,
        }
    }

    pub(crate) fn collect(&mut self, matched: DocumentMatch) {
        if self.heap.len() < self.size {
            self.heap.push(Ranked(matched));
            return;
        }
        let beats_worst = match self.heap.peek() {
            Some(worst) => matched.score > worst.0.score,
            None => false,
        };
        if beats_worst {
            self.heap.pop();
            self.heap.push(Ranked(matched));
        }
    }

    pub(crate) fn into_sorted_matches(self) -> Vec<DocumentMatch> {
        let mut matches: Vec<DocumentMatch> =
            self.heap.into_vec().into_iter().map(|r| r.0).collect();
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        matches
    }
}

/// Iterator over collected matches, best first.
pub struct DocumentMatchIterator {
    matches: std::vec::IntoIter<DocumentMatch>,
}

impl DocumentMatchIterator {
    pub(crate) fn new(matches: Vec<DocumentMatch>) -> Self {
        Self {
            matches: matches.into_iter(),
        }
    }
}

impl Iterator for DocumentMatchIterator {
    type Item = DocumentMatch;

    fn next(&mut self) -> Option<DocumentMatch> {
        self.matches.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(ordinal: Ordinal, score: Score) -> DocumentMatch {
        DocumentMatch {
            ordinal,
            score,
            explanation: None,
        }
    }

    #[test]
    fn keeps_only_top_n() {
        let mut collector = TopNCollector::new(2);
        collector.collect(matched(0, 1.0));
        collector.collect(matched(1, 3.0));
        collector.collect(matched(2, 2.0));
        let results = collector.into_sorted_matches();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].ordinal, 1);
        assert_eq!(results[1].ordinal, 2);
    }

    #[test]
    fn ties_break_by_ascending_ordinal() {
        let mut collector = TopNCollector::new(10);
        collector.collect(matched(5, 1.0));
        collector.collect(matched(1, 1.0));
        collector.collect(matched(3, 1.0));
        let results = collector.into_sorted_matches();
        let ordinals: Vec<Ordinal> = results.iter().map(|m| m.ordinal).collect();
        assert_eq!(ordinals, vec![1, 3, 5]);
    }

    #[test]
    fn zero_size_collects_nothing() {
        let mut collector = TopNCollector::new(0);
        collector.collect(matched(0, 1.0));
        assert!(collector.into_sorted_matches().is_empty());
    }
}
