/*!
A max-heap over a fixed index space, with a companion position map.

The structure doubles as a store: every index carries a value whether or not
it is currently on the heap, and indices move on and off the heap without
their values being lost. This suits activity-ordered branching, where every
variable has an activity but only unassigned decision variables are eligible
to be picked.

The position map supports decrease/increase-key: after a value is revised,
[heapify_if_active](IndexHeap::heapify_if_active) restores order in
logarithmic time, and [rebuild](IndexHeap::rebuild) reconstructs the heap
over a fresh index set in linear time.
*/

use std::cmp::Ordering;

pub struct IndexHeap<V: PartialOrd + Default + Copy> {
    values: Vec<V>,
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl<V: PartialOrd + Default + Copy> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            heap: Vec::default(),
            position: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default + Copy> IndexHeap<V> {
    /// Grows the index space so `index` is valid, filling with defaults.
    pub fn reserve(&mut self, index: usize) {
        if self.values.len() <= index {
            self.values.resize(index + 1, V::default());
            self.position.resize(index + 1, None);
        }
    }

    /// The value stored for `index`.
    pub fn value(&self, index: usize) -> V {
        self.values[index]
    }

    /// Overwrites the value for `index` without touching heap order.
    pub fn set_value(&mut self, index: usize, value: V) {
        self.values[index] = value;
    }

    /// Revises the value for `index` and restores heap order if the index
    /// is active.
    pub fn update(&mut self, index: usize, f: impl FnOnce(V) -> V) {
        self.values[index] = f(self.values[index]);
        self.heapify_if_active(index);
    }

    /// Applies `f` to every stored value, active or not.
    ///
    /// The relative order of values is assumed to be preserved, so the heap
    /// is not repaired. Used for multiplicative rescaling.
    pub fn apply_to_all(&mut self, f: impl Fn(V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(*value);
        }
    }

    pub fn active(&self, index: usize) -> bool {
        self.position[index].is_some()
    }

    /// Places `index` on the heap, if absent.
    pub fn activate(&mut self, index: usize) {
        if self.position[index].is_none() {
            let slot = self.heap.len();
            self.heap.push(index);
            self.position[index] = Some(slot);
            self.sift_up(slot);
        }
    }

    /// Removes `index` from the heap, if present. Its value is kept.
    pub fn deactivate(&mut self, index: usize) {
        if let Some(slot) = self.position[index] {
            let last = self.heap.len() - 1;
            self.heap.swap(slot, last);
            self.position[self.heap[slot]] = Some(slot);
            self.position[index] = None;
            self.heap.pop();
            if slot < self.heap.len() {
                self.sift_down(slot);
                self.sift_up(slot);
            }
        }
    }

    /// Restores heap order around `index` after its value changed.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(slot) = self.position[index] {
            self.sift_up(slot);
            self.sift_down(self.position[index].expect("lost during sift"));
        }
    }

    /// Pops the index with the maximal value.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = *self.heap.first()?;
        self.deactivate(max);
        Some(max)
    }

    /// The index held at heap slot `slot`, in no particular order.
    /// Useful for picking a uniformly random active index.
    pub fn at(&self, slot: usize) -> usize {
        self.heap[slot]
    }

    /// A count of active indices.
    pub fn active_len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_active_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Discards the active set and rebuilds the heap over `indices`.
    pub fn rebuild(&mut self, indices: impl IntoIterator<Item = usize>) {
        for &index in self.heap.iter() {
            self.position[index] = None;
        }
        self.heap.clear();
        for index in indices {
            self.position[index] = Some(self.heap.len());
            self.heap.push(index);
        }
        for slot in (0..self.heap.len() / 2).rev() {
            self.sift_down(slot);
        }
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        matches!(
            self.values[self.heap[a]].partial_cmp(&self.values[self.heap[b]]),
            Some(Ordering::Greater)
        )
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.greater(slot, parent) {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let mut largest = slot;
            if self.greater(left, largest) {
                largest = left;
            }
            if right < self.heap.len() && self.greater(right, largest) {
                largest = right;
            }
            if largest == slot {
                break;
            }
            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(pairs: &[(usize, i32)]) -> IndexHeap<i32> {
        let mut heap = IndexHeap::default();
        for &(index, value) in pairs {
            heap.reserve(index);
            heap.set_value(index, value);
            heap.activate(index);
        }
        heap
    }

    #[test]
    fn pops_in_order() {
        let mut heap = filled(&[(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)]);
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn update_reorders() {
        let mut heap = filled(&[(0, 70), (1, 60), (4, 30)]);
        heap.update(4, |_| 100);
        assert_eq!(heap.pop_max(), Some(4));
        heap.update(1, |v| v - 60);
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
    }

    #[test]
    fn deactivate_keeps_value() {
        let mut heap = filled(&[(0, 1), (1, 2), (2, 3)]);
        heap.deactivate(2);
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.value(2), 3);
        heap.activate(2);
        assert_eq!(heap.pop_max(), Some(2));
    }

    #[test]
    fn rebuild_over_subset() {
        let mut heap = filled(&[(0, 5), (1, 9), (2, 7), (3, 1)]);
        heap.rebuild([0, 2, 3]);
        assert_eq!(heap.active_len(), 3);
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(3));
    }

    #[test]
    fn sparse_indices() {
        let mut heap = IndexHeap::default();
        heap.reserve(600);
        heap.set_value(600, 10);
        heap.activate(600);
        heap.set_value(0, 70);
        heap.activate(0);
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert!(heap.pop_max().is_none());
    }
}
