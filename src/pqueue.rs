use std::cmp::max;
use std::fmt;

use ordered_float::OrderedFloat;

use crate::errors::ColoringError;

/// minimum number of elements allocated for a new queue
pub const MIN_PQUEUE_SIZE: usize = 1024;

/// element stored in the heap, with the priority computed when it was inserted
#[derive(Debug, Clone)]
struct PQueueElement<T> {
    data: T,
    priority: OrderedFloat<f64>,
}

/** Max priority queue (binary heap) over opaque elements.
The priority of an element is computed by the `calculate_priority` function when the element
is inserted, and is never updated afterwards: to account for a priority change, the queue
is reset and filled again.
*/
pub struct PQueue<T, F>
where F: Fn(&T) -> f64 {
    /// heap of elements (elements[0] has the largest priority)
    elements: Vec<PQueueElement<T>>,
    /// computes the priority of an element
    calculate_priority: F,
}

impl<T, F> fmt::Debug for PQueue<T, F>
where F: Fn(&T) -> f64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PQueue")
            .field("len", &self.elements.len())
            .field("capacity", &self.elements.capacity())
            .finish()
    }
}

impl<T, F> PQueue<T, F>
where F: Fn(&T) -> f64 {
    /** creates a queue able to store at least sz elements (and MIN_PQUEUE_SIZE) without growing. */
    pub fn with_capacity(sz: usize, calculate_priority: F) -> Result<Self, ColoringError> {
        let mut elements = Vec::new();
        elements.try_reserve_exact(max(sz, MIN_PQUEUE_SIZE))?;
        Ok(Self { elements, calculate_priority })
    }

    /// number of elements in the queue
    pub fn len(&self) -> usize { self.elements.len() }

    /// true iff the queue has no elements
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// number of elements the queue can store before growing
    pub fn capacity(&self) -> usize { self.elements.capacity() }

    /// drops every element, keeps the allocated storage
    pub fn reset(&mut self) { self.elements.clear(); }

    /** inserts an element. Its priority is computed now. O(log n).
    The storage doubles when full. */
    pub fn insert(&mut self, data: T) -> Result<(), ColoringError> {
        if self.elements.len() == self.elements.capacity() {
            let additional = max(self.elements.capacity(), MIN_PQUEUE_SIZE);
            self.elements.try_reserve_exact(additional)?;
        }
        let priority = OrderedFloat((self.calculate_priority)(&data));
        self.elements.push(PQueueElement { data, priority });
        self.sift_up(self.elements.len() - 1);
        Ok(())
    }

    /// removes and returns the element of largest priority. O(log n).
    pub fn extract_max(&mut self) -> Result<T, ColoringError> {
        self.extract_max_with_priority().map(|(data, _)| data)
    }

    /// removes and returns the element of largest priority, with its priority. O(log n).
    pub fn extract_max_with_priority(&mut self) -> Result<(T, f64), ColoringError> {
        if self.elements.is_empty() {
            return Err(ColoringError::EmptyQueue);
        }
        let res = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok((res.data, res.priority.into_inner()))
    }

    /// largest priority in the queue (if any)
    pub fn max_priority(&self) -> Option<f64> {
        self.elements.first().map(|e| e.priority.into_inner())
    }

    fn sift_up(&mut self, mut k: usize) {
        while k > 0 {
            let parent = (k - 1) / 2;
            if self.elements[k].priority <= self.elements[parent].priority { break; }
            self.elements.swap(k, parent);
            k = parent;
        }
    }

    fn sift_down(&mut self, mut k: usize) {
        let len = self.elements.len();
        loop {
            let mut child = 2 * k + 1;
            if child >= len { break; }
            if child + 1 < len && self.elements[child].priority < self.elements[child + 1].priority {
                child += 1;
            }
            if self.elements[k].priority >= self.elements[child].priority { break; }
            self.elements.swap(k, child);
            k = child;
        }
    }
}
