use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use super::EdgeComparator;

/// Heap entry ordered so that the max-heap [BinaryHeap] hands out the smallest edge first,
/// and equal edges in insertion order.
struct SmallestEdgeHolder<'a, E> {
    edge: E,
    seq: u64,
    comparator: Rc<dyn EdgeComparator<E> + 'a>,
}

impl<E> Eq for SmallestEdgeHolder<'_, E> {}

impl<E> PartialEq for SmallestEdgeHolder<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> PartialOrd for SmallestEdgeHolder<'_, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for SmallestEdgeHolder<'_, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.comparator.compare(&other.edge, &self.edge) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Priority queue of the edges still to be settled, ordered by the search comparator.
pub(crate) struct Frontier<'a, E> {
    heap: BinaryHeap<SmallestEdgeHolder<'a, E>>,
    comparator: Rc<dyn EdgeComparator<E> + 'a>,
    next_seq: u64,
}

impl<'a, E> Frontier<'a, E> {
    pub fn new(comparator: Rc<dyn EdgeComparator<E> + 'a>) -> Frontier<'a, E> {
        Frontier {
            heap: BinaryHeap::new(),
            comparator,
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub fn push(&mut self, edge: E) {
        self.heap.push(SmallestEdgeHolder {
            edge,
            seq: self.next_seq,
            comparator: Rc::clone(&self.comparator),
        });
        self.next_seq += 1;
    }

    pub fn pop(&mut self) -> Option<E> {
        self.heap.pop().map(|holder| holder.edge)
    }
}
