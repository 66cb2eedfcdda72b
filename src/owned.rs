//! An unbalanced BST where every `Node` exclusively owns its children. Mutations rewire the
//! parent's child slot in place. Nothing rebalances the tree behind your back: construction
//! builds a minimal-height tree, but inserts and deletes are plain BST operations and balance is
//! only restored when [`Tree::rebalance`] is called.
//!
//! # Examples
//!
//! ```
//! use bst::owned::Tree;
//!
//! // Duplicates are dropped and the rest is built into a minimal-height tree.
//! let mut tree = Tree::from_values(vec![5, 3, 3, 8, 1]);
//! assert_eq!(tree.in_order(), [&1, &3, &5, &8]);
//! assert_eq!(tree.height(), Some(2));
//!
//! // Inserting an existing key changes nothing.
//! assert!(!tree.insert(3));
//! assert!(tree.insert(9));
//!
//! // Ascending inserts make a lopsided tree...
//! tree.insert(10);
//! tree.insert(11);
//! assert!(!tree.is_balanced());
//!
//! // ...until it is rebuilt.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.in_order(), [&1, &3, &5, &8, &9, &10, &11]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

use crate::util::{height_gap, split_mid};

type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over unique keys. It supports inserting, finding, and deleting keys,
/// the four classic traversals, and a handful of structural queries (height, depth, balance).
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

/// A single key in a [`Tree`] along with the two (possibly empty) subtrees it owns.
#[derive(Clone, Debug)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Unlinks nodes onto a heap allocated stack so a degenerate chain doesn't drop recursively.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    /// Consumes the tree, yielding its keys in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        let len = self.len;
        into_sorted_keys(self.root.take(), len).into_iter()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a tree from an arbitrary collection of keys. The keys are deduplicated and sorted,
    /// then built into a tree of minimal height: each subtree's root is the middle key of its
    /// range (the upper middle when the range has an even length).
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let tree = Tree::from_values(vec![4, 6, 2, 1, 3, 7, 5, 4]);
    ///
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(4));
    /// assert_eq!(tree.height(), Some(2));
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = values.into_iter().collect();
        let received = keys.len();
        keys.sort_unstable();
        keys.dedup();

        log::debug!(
            "building tree from {} values ({} unique)",
            received,
            keys.len()
        );
        let len = keys.len();
        Self {
            root: build_minimal_height(keys),
            len,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root of the tree, if there is one.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Inserts `key` as a new leaf. Returns `false`, leaving the tree untouched, if the key was
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(7));
    /// assert!(!tree.insert(7));
    /// assert_eq!(tree.in_order(), [&7]);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut depth = 0;
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
            depth += 1;
        }

        *link = Some(Box::new(Node::new(key)));
        self.len += 1;
        log::trace!("inserted leaf at depth {}", depth);
        true
    }

    /// Deletes the node containing `key` and returns the key. If the tree does not contain the
    /// key, nothing happens and `None` is returned.
    ///
    /// A node with two children is never unlinked directly: it takes over the key of its
    /// in-order successor (the smallest key of its right subtree) and the successor's node is
    /// removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let mut tree = Tree::from_values(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.in_order(), [&1, &3]);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let deleted = delete_from(&mut self.root, key);
        if deleted.is_some() {
            self.len -= 1;
        }
        deleted
    }

    /// Potentially finds the node holding `key`. The returned node borrows from the tree so it
    /// can't outlive the next mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let tree = Tree::from_values(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.key()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root().map(Node::min_key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }

    /// Keys in breadth-first order: the root, then each level left to right.
    pub fn level_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.level_order_with(|node| keys.push(&node.key));
        keys
    }

    /// Keys in ascending order: left subtree, node, right subtree.
    pub fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.in_order_with(|node| keys.push(&node.key));
        keys
    }

    /// Keys with every node before its subtrees: node, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.pre_order_with(|node| keys.push(&node.key));
        keys
    }

    /// Keys with every node after its subtrees: left subtree, right subtree, node.
    pub fn post_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.post_order_with(|node| keys.push(&node.key));
        keys
    }

    /// Calls `visit` on every node in the order of [`Tree::level_order`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let tree = Tree::from_values(vec![1, 2, 3, 4]);
    /// let mut leaves = 0;
    /// tree.level_order_with(|node| {
    ///     if node.left().is_none() && node.right().is_none() {
    ///         leaves += 1;
    ///     }
    /// });
    ///
    /// assert_eq!(leaves, 2);
    /// ```
    pub fn level_order_with<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K>),
    {
        let mut queue: VecDeque<&Node<K>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }

    /// Calls `visit` on every node in the order of [`Tree::in_order`].
    pub fn in_order_with<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K>),
    {
        let mut stack = Vec::new();
        let mut current = self.root();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            match stack.pop() {
                Some(node) => {
                    visit(node);
                    current = node.right();
                }
                None => break,
            }
        }
    }

    /// Calls `visit` on every node in the order of [`Tree::pre_order`].
    pub fn pre_order_with<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K>),
    {
        let mut stack: Vec<&Node<K>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            visit(node);
            // Right goes on first so the left subtree is popped first.
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    /// Calls `visit` on every node in the order of [`Tree::post_order`].
    pub fn post_order_with<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K>),
    {
        // The flag marks nodes whose children are already on the stack.
        let mut stack: Vec<(&Node<K>, bool)> =
            self.root().map(|n| (n, false)).into_iter().collect();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                visit(node);
            } else {
                stack.push((node, true));
                stack.extend(node.right().map(|n| (n, false)));
                stack.extend(node.left().map(|n| (n, false)));
            }
        }
    }

    /// The number of edges on the longest path from the root down to a leaf. A tree with just a
    /// root has height `0` and an empty tree has no height at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// assert_eq!(Tree::<i32>::new().height(), None);
    /// assert_eq!(Tree::from_values(vec![1]).height(), Some(0));
    /// assert_eq!(Tree::from_values(1..=7).height(), Some(2));
    /// ```
    pub fn height(&self) -> Option<usize> {
        self.root().map(Node::height)
    }

    /// The number of edges from the root down to `target`. The node is matched by identity, not
    /// by key, so a node from another tree is never found even if it holds an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::owned::Tree;
    ///
    /// let tree = Tree::from_values(1..=7);
    /// let other = Tree::from_values(1..=7);
    ///
    /// let three = tree.find(&3).unwrap();
    /// assert_eq!(tree.depth(three), Some(2));
    ///
    /// let foreign = other.find(&3).unwrap();
    /// assert_eq!(tree.depth(foreign), None);
    /// ```
    pub fn depth(&self, target: &Node<K>) -> Option<usize> {
        self.root().and_then(|root| root.depth_of(target))
    }

    /// Whether, at every node, the heights of the two subtrees differ by at most one.
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, Node::is_balanced)
    }

    /// Rebuilds the tree into a minimal-height tree holding the same keys. Afterwards
    /// [`Tree::is_balanced`] is always `true`.
    pub fn rebalance(&mut self) {
        let height_before = if log::log_enabled!(log::Level::Debug) {
            self.height()
        } else {
            None
        };

        let keys = into_sorted_keys(self.root.take(), self.len);
        self.len = keys.len();
        self.root = build_minimal_height(keys);

        log::debug!(
            "rebalanced {} keys: height {:?} -> {:?}",
            self.len,
            height_before,
            self.height()
        );
    }

    /// Writes the [`Display`][fmt::Display] rendering of the tree to stdout.
    pub fn pretty_print(&self)
    where
        K: fmt::Display,
    {
        print!("{}", self);
    }
}

/// Draws the tree sideways: right subtrees above their parent and left subtrees below it.
///
/// ```
/// use bst::owned::Tree;
///
/// let tree = Tree::from_values(1..=3);
///
/// assert_eq!(tree.to_string(), "│   ┌── 3\n└── 2\n    └── 1\n");
/// ```
impl<K: fmt::Display> fmt::Display for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.fmt_subtree(f, "", true),
            None => Ok(()),
        }
    }
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the subtree rooted at this node. A leaf has height `0`.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Self> = vec![self];
        loop {
            let next: Vec<&Self> = level
                .into_iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
            if next.is_empty() {
                return height;
            }
            height += 1;
            level = next;
        }
    }

    /// Whether the subtree rooted at this node is balanced. Heights are recomputed at every node,
    /// so this is quadratic on a degenerate subtree.
    pub fn is_balanced(&self) -> bool {
        height_gap(
            self.left().map(Node::height),
            self.right().map(Node::height),
        ) <= 1
            && self.left().map_or(true, Node::is_balanced)
            && self.right().map_or(true, Node::is_balanced)
    }

    fn min_key(&self) -> &K {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        &node.key
    }

    /// Searches the whole subtree, left before right, for `target` by address. Key ordering is
    /// never consulted.
    fn depth_of(&self, target: &Self) -> Option<usize> {
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            if std::ptr::eq(node, target) {
                return Some(level);
            }
            stack.extend(node.right().map(|n| (n, level + 1)));
            stack.extend(node.left().map(|n| (n, level + 1)));
        }
        None
    }

    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, prefix: &str, is_left: bool) -> fmt::Result
    where
        K: fmt::Display,
    {
        if let Some(right) = self.right() {
            let prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
            right.fmt_subtree(f, &prefix, false)?;
        }
        writeln!(
            f,
            "{}{}{}",
            prefix,
            if is_left { "└── " } else { "┌── " },
            self.key
        )?;
        if let Some(left) = self.left() {
            let prefix = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
            left.fmt_subtree(f, &prefix, true)?;
        }
        Ok(())
    }
}

/// Recursively builds a minimal-height tree out of sorted, unique keys.
fn build_minimal_height<K>(sorted_unique: Vec<K>) -> Link<K> {
    let (before, key, after) = split_mid(sorted_unique)?;
    Some(Box::new(Node {
        key,
        left: build_minimal_height(before),
        right: build_minimal_height(after),
    }))
}

/// Deletes `key` from the subtree in `link`, replacing the subtree's root in place when the
/// root itself is deleted.
fn delete_from<K: Ord>(link: &mut Link<K>, key: &K) -> Option<K> {
    let node = link.as_mut()?;
    match key.cmp(&node.key) {
        Ordering::Less => delete_from(&mut node.left, key),
        Ordering::Greater => delete_from(&mut node.right, key),
        Ordering::Equal => match (node.left.is_some(), node.right.is_some()) {
            (false, _) => {
                let right = node.right.take();
                let deleted = std::mem::replace(link, right)?;
                log::trace!("deleted node without a left child");
                Some(deleted.key)
            }
            (true, false) => {
                let left = node.left.take();
                let deleted = std::mem::replace(link, left)?;
                log::trace!("deleted node without a right child");
                Some(deleted.key)
            }
            (true, true) => {
                let successor = take_min(&mut node.right)?;
                log::trace!("deleted node with two children by promoting its successor");
                Some(std::mem::replace(&mut node.key, successor))
            }
        },
    }
}

/// Removes the leftmost node of the subtree in `link`, splicing its right child into its place,
/// and returns its key.
fn take_min<K>(mut link: &mut Link<K>) -> Option<K> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let min = link.take()?;
    let Node { key, right, .. } = *min;
    *link = right;
    Some(key)
}

/// Tears down the subtree in `root` without recursion, moving its keys out in ascending order.
fn into_sorted_keys<K>(root: Link<K>, len: usize) -> Vec<K> {
    let mut keys = Vec::with_capacity(len);
    let mut stack: Vec<Box<Node<K>>> = Vec::new();
    let mut current = root;
    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }
        match stack.pop() {
            Some(node) => {
                let Node { key, right, .. } = *node;
                keys.push(key);
                current = right;
            }
            None => return keys,
        }
    }
}
