//! Recency list backing the LRU store
//!
//! Doubly-linked list threaded through a slot arena. Links are slot indices,
//! so a handle stays valid until its entry is removed. Freed slots are reused.

/// Entry in the recency list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered entries, front = most recently used, back = least recently used
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Slot of the least recently used entry
    pub(crate) fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Insert at the front and return the new entry's slot
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.len += 1;
        idx
    }

    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    /// Unlink the entry at `idx` and hand back its key and value
    pub(crate) fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        // Links must be repaired while the node is still in its slot
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    pub(crate) fn entry(&self, idx: usize) -> Option<(&K, &V)> {
        self.nodes[idx].as_ref().map(|node| (&node.key, &node.value))
    }

    pub(crate) fn value_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.nodes[idx].as_mut().map(|node| &mut node.value)
    }

    /// Iterate from least to most recently used
    pub(crate) fn iter_from_back(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.tail,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

/// Oldest-first iterator over list entries
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.nodes[idx].as_ref()?;
        self.cursor = node.prev;
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_oldest_first(list: &RecencyList<u32, &str>) -> Vec<u32> {
        list.iter_from_back().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_list_push_front() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(1, "a");
        list.push_front(2, "b");
        list.push_front(3, "c");

        assert_eq!(list.len(), 3);
        assert_eq!(keys_oldest_first(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_move_to_front() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front(1, "a");
        list.push_front(2, "b");
        let c = list.push_front(3, "c");

        list.move_to_front(a);
        assert_eq!(keys_oldest_first(&list), vec![2, 3, 1]);

        // Already at front
        list.move_to_front(a);
        assert_eq!(keys_oldest_first(&list), vec![2, 3, 1]);

        list.move_to_front(c);
        assert_eq!(keys_oldest_first(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_list_remove_tail() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(1, "a");
        list.push_front(2, "b");

        let tail = list.back().unwrap();
        assert_eq!(list.remove(tail), Some((1, "a")));
        assert_eq!(list.len(), 1);
        assert_eq!(keys_oldest_first(&list), vec![2]);
        assert_eq!(list.entry(list.back().unwrap()), Some((&2, &"b")));
    }

    #[test]
    fn test_list_remove_middle_and_reuse_slot() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(1, "a");
        let b = list.push_front(2, "b");
        list.push_front(3, "c");

        assert_eq!(list.remove(b), Some((2, "b")));
        assert_eq!(keys_oldest_first(&list), vec![1, 3]);

        // Freed slot is handed out again
        let d = list.push_front(4, "d");
        assert_eq!(d, b);
        assert_eq!(keys_oldest_first(&list), vec![1, 3, 4]);
    }

    #[test]
    fn test_list_remove_only_entry() {
        let mut list = RecencyList::with_capacity(1);
        let a = list.push_front(1, "a");

        assert_eq!(list.remove(a), Some((1, "a")));
        assert_eq!(list.len(), 0);
        assert_eq!(list.back(), None);
        assert_eq!(list.remove(a), None);
    }

    #[test]
    fn test_list_value_mut() {
        let mut list = RecencyList::with_capacity(1);
        let a = list.push_front(1, "a");

        if let Some(value) = list.value_mut(a) {
            *value = "z";
        }
        assert_eq!(list.entry(a), Some((&1, &"z")));
    }

    #[test]
    fn test_list_clear() {
        let mut list = RecencyList::with_capacity(2);
        list.push_front(1, "a");
        list.push_front(2, "b");
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.back(), None);
        assert!(keys_oldest_first(&list).is_empty());
    }
}
