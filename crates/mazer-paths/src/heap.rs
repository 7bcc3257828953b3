//! A binary min-heap ordered by an external score.
//!
//! Unlike `std::collections::BinaryHeap`, [`ScoreHeap`] never caches an
//! element's priority: every operation takes the scoring function and calls
//! it at comparison time. A caller that keeps scores in its own table can
//! therefore lower a score and then call [`ScoreHeap::rescore`] to move the
//! element up.

use std::mem;

/// Min-heap of opaque elements scored by a caller-supplied function.
///
/// Elements are compared by identity (`PartialEq`) for [`remove`] and
/// [`rescore`]; ties between equal scores are broken by heap shape.
///
/// [`remove`]: ScoreHeap::remove
/// [`rescore`]: ScoreHeap::rescore
#[derive(Debug, Clone)]
pub struct ScoreHeap<T> {
    content: Vec<T>,
}

impl<T> Default for ScoreHeap<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
        }
    }
}

impl<T: PartialEq> ScoreHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Number of elements held.
    #[inline]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Elements in heap order (the minimum first, the rest unordered).
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.content
    }

    /// The minimum element, if any, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.content.first()
    }

    /// Linear membership test.
    pub fn contains(&self, element: &T) -> bool {
        self.content.contains(element)
    }

    /// Consume the heap, returning its elements in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.content
    }

    /// Insert `element`, sifting it toward the root.
    pub fn push<F: Fn(&T) -> f64>(&mut self, element: T, score: F) {
        self.content.push(element);
        let last = self.content.len() - 1;
        self.sift_up(last, &score);
    }

    /// Remove and return the element with the lowest score.
    pub fn pop<F: Fn(&T) -> f64>(&mut self, score: F) -> Option<T> {
        let end = self.content.pop()?;
        if self.content.is_empty() {
            return Some(end);
        }
        let result = mem::replace(&mut self.content[0], end);
        self.sift_down(0, &score);
        Some(result)
    }

    /// Remove `element` wherever it sits in the heap.
    ///
    /// Lookup is linear; the repair afterwards is logarithmic. Returns `None`
    /// if the element is not present.
    pub fn remove<F: Fn(&T) -> f64>(&mut self, element: &T, score: F) -> Option<T> {
        let i = self.content.iter().position(|e| e == element)?;
        let end = self.content.pop()?;
        if i == self.content.len() {
            // The element was the last one.
            return Some(end);
        }
        let removed = mem::replace(&mut self.content[i], end);
        if score(&self.content[i]) < score(&removed) {
            self.sift_up(i, &score);
        } else {
            self.sift_down(i, &score);
        }
        Some(removed)
    }

    /// Restore heap order after `element`'s score was lowered externally.
    ///
    /// Only decreases are handled. Returns `false` if the element is absent.
    pub fn rescore<F: Fn(&T) -> f64>(&mut self, element: &T, score: F) -> bool {
        match self.content.iter().position(|e| e == element) {
            Some(i) => {
                self.sift_up(i, &score);
                true
            }
            None => false,
        }
    }

    fn sift_up<F: Fn(&T) -> f64>(&mut self, mut n: usize, score: &F) {
        let elem_score = score(&self.content[n]);
        while n > 0 {
            let parent = (n - 1) / 2;
            if elem_score < score(&self.content[parent]) {
                self.content.swap(parent, n);
                n = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<F: Fn(&T) -> f64>(&mut self, mut n: usize, score: &F) {
        let len = self.content.len();
        let elem_score = score(&self.content[n]);

        loop {
            let child2 = (n + 1) * 2;
            let child1 = child2 - 1;
            let mut swap = None;
            let mut child1_score = elem_score;

            if child1 < len {
                child1_score = score(&self.content[child1]);
                if child1_score < elem_score {
                    swap = Some(child1);
                }
            }

            if child2 < len {
                let child2_score = score(&self.content[child2]);
                let bound = if swap.is_some() { child1_score } else { elem_score };
                if child2_score < bound {
                    swap = Some(child2);
                }
            }

            match swap {
                Some(s) => {
                    self.content.swap(n, s);
                    n = s;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn drain(heap: &mut ScoreHeap<usize>, scores: &[f64]) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(i) = heap.pop(|&i| scores[i]) {
            out.push(i);
        }
        out
    }

    #[test]
    fn pops_in_score_order() {
        let scores = [5.0, 1.0, 4.0, 2.0, 3.0, 0.5];
        let mut heap = ScoreHeap::new();
        for i in 0..scores.len() {
            heap.push(i, |&i| scores[i]);
        }
        assert_eq!(heap.size(), 6);
        assert_eq!(heap.peek(), Some(&5));
        assert_eq!(drain(&mut heap, &scores), vec![5, 1, 3, 4, 2, 0]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(|&i| scores[i]), None);
    }

    #[test]
    fn remove_arbitrary_elements() {
        let scores = [3.0, 9.0, 1.0, 7.0, 5.0, 8.0, 2.0];
        let mut heap = ScoreHeap::new();
        for i in 0..scores.len() {
            heap.push(i, |&i| scores[i]);
        }
        assert_eq!(heap.remove(&2, |&i| scores[i]), Some(2)); // the root
        assert_eq!(heap.remove(&5, |&i| scores[i]), Some(5));
        assert_eq!(heap.remove(&42, |&i| scores[i]), None);
        assert!(!heap.contains(&2));
        assert_eq!(drain(&mut heap, &scores), vec![6, 0, 4, 3, 1]);
    }

    #[test]
    fn remove_last_element() {
        let scores = [1.0, 2.0];
        let mut heap = ScoreHeap::new();
        heap.push(0, |&i| scores[i]);
        heap.push(1, |&i| scores[i]);
        assert_eq!(heap.remove(&1, |&i| scores[i]), Some(1));
        assert_eq!(heap.as_slice(), &[0]);
        assert_eq!(heap.remove(&0, |&i| scores[i]), Some(0));
        assert!(heap.is_empty());
    }

    #[test]
    fn rescore_after_external_decrease() {
        let mut scores = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut heap = ScoreHeap::new();
        for i in 0..scores.len() {
            heap.push(i, |&i| scores[i]);
        }
        scores[4] = 0.0;
        assert!(heap.rescore(&4, |&i| scores[i]));
        assert!(!heap.rescore(&9, |&i| scores[i]));
        assert_eq!(heap.pop(|&i| scores[i]), Some(4));
        assert_eq!(drain(&mut heap, &scores), vec![0, 1, 2, 3]);
    }

    #[test]
    fn scores_are_read_at_comparison_time() {
        let mut scores = vec![1.0, 2.0, 3.0];
        let mut heap = ScoreHeap::new();
        for i in 0..scores.len() {
            heap.push(i, |&i| scores[i]);
        }
        // Raise the root's score without telling the heap: the next pop still
        // returns the root, but sifting the replacement uses fresh scores.
        scores[1] = 10.0;
        assert_eq!(heap.pop(|&i| scores[i]), Some(0));
        assert_eq!(heap.pop(|&i| scores[i]), Some(2));
        assert_eq!(heap.pop(|&i| scores[i]), Some(1));
    }

    #[test]
    fn random_operations_keep_min_on_top() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 200;
        let mut scores: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..100.0)).collect();
        let mut present = vec![false; n];
        let mut heap = ScoreHeap::new();

        for _ in 0..2000 {
            let i = rng.random_range(0..n);
            match rng.random_range(0..4u32) {
                0 if !present[i] => {
                    heap.push(i, |&i| scores[i]);
                    present[i] = true;
                }
                1 if present[i] => {
                    assert_eq!(heap.remove(&i, |&i| scores[i]), Some(i));
                    present[i] = false;
                }
                2 if present[i] => {
                    scores[i] -= rng.random_range(0.0..50.0);
                    heap.rescore(&i, |&i| scores[i]);
                }
                3 => {
                    let min = (0..n)
                        .filter(|&j| present[j])
                        .map(|j| scores[j])
                        .fold(f64::INFINITY, f64::min);
                    match heap.pop(|&i| scores[i]) {
                        Some(j) => {
                            assert_eq!(scores[j], min);
                            present[j] = false;
                        }
                        None => assert!(min.is_infinite()),
                    }
                }
                _ => {}
            }
            assert_eq!(heap.size(), present.iter().filter(|p| **p).count());
        }
    }
}
