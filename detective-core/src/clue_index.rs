use std::cmp::Ordering;

#[derive(Debug)]
struct ClueNode {
    text: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            left: None,
            right: None,
        }
    }
}

/// Unbalanced binary search tree of collected clue texts.
///
/// Ordering is plain byte-wise `str` comparison, so it is case-sensitive.
/// Inserting a text that is already present is a no-op.
#[derive(Debug, Default)]
pub struct ClueIndex {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the clue was not stored before.
    pub fn insert(&mut self, text: &str) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match text.cmp(node.text.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(ClueNode::new(text)));
        self.len += 1;
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match text.cmp(node.text.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&ClueNode, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, d)) = stack.pop() {
            deepest = deepest.max(d);
            let children = [node.left.as_deref(), node.right.as_deref()];
            stack.extend(children.into_iter().flatten().map(|child| (child, d + 1)));
        }
        deepest
    }

    /// Clues in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    pub fn in_order_list(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

/// In-order walk driven by an explicit stack.
pub struct Iter<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.text.as_str())
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
