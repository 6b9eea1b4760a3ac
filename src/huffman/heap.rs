use crate::huffman::tree::HuffNode;

/// Binary min-heap over node weight, used to drive the tree-building merge loop.
///
/// The heap is sized to the caller's distinct-symbol count; it never holds more
/// than one node per distinct symbol plus the internal nodes produced while
/// merging, so capacity stays within the alphabet size.
#[derive(Debug, Default)]
pub struct MinHeap {
    nodes: Vec<HuffNode>,
}

impl MinHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// O(log n) sift-up insert. Ties on equal weight keep whatever order the
    /// parent-chain walk produces; consumers must not rely on a canonical tree
    /// for inputs with weight ties.
    pub fn push(&mut self, node: HuffNode) {
        self.nodes.push(node);
        let mut pos = self.nodes.len() - 1;
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.nodes[pos].weight() >= self.nodes[parent].weight() {
                break;
            }
            self.nodes.swap(pos, parent);
            pos = parent;
        }
    }

    /// Removes and returns the minimum-weight node, or `None` on an empty heap.
    pub fn pop(&mut self) -> Option<HuffNode> {
        if self.is_empty() {
            return None;
        }
        let last = self.nodes.len() - 1;
        self.nodes.swap(0, last);
        let min = self.nodes.pop();
        self.sift_down(0);
        min
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            if left >= self.nodes.len() {
                break;
            }
            let smaller = if right < self.nodes.len() && self.nodes[right].weight() < self.nodes[left].weight() {
                right
            } else {
                left
            };
            if self.nodes[smaller].weight() >= self.nodes[pos].weight() {
                break;
            }
            self.nodes.swap(pos, smaller);
            pos = smaller;
        }
    }
}
