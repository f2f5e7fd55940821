//! A trinary search tree. Values are kept in order like any BST but inserting
//! a value that is already present adds another `Node` hanging off of the first
//! one through its "equal" link, so duplicates are stored structurally.
//!
//! # Examples
//!
//! ```
//! use trinary::tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert!(!tree.delete(&1));
//!
//! tree.insert(1);
//! tree.insert(1);
//! assert_eq!(tree.count(&1), 2);
//!
//! // Deleting removes a single occurrence.
//! assert!(tree.delete(&1));
//! assert_eq!(tree.count(&1), 1);
//!
//! assert_eq!(tree.to_string(), "Node 1\nLeft\nMiddle\nRight\n");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

use log::{debug, trace};

/// How far each level of the printed tree is indented past its parent.
const INDENT: usize = 3;

/// A trinary search tree. This can be used for inserting values (duplicates
/// included), deleting single occurrences of values, and printing the tree.
///
/// The tree never rebalances itself: the shape is entirely decided by the
/// order of inserts and deletes.
///
/// There is no internal locking. A `Tree` may be moved to or shared with
/// other threads whenever `T` allows it, but callers that mutate it from
/// several threads must serialize those calls themselves, e.g. by keeping it
/// behind a `Mutex`.
pub struct Tree<T> {
    root: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// A `Node` owns its value and up to three children. The less and greater
/// children hold strictly smaller and larger values, the equal child holds
/// another `Node` with this same value.
struct Node<T> {
    value: T,
    less: Link<T>,
    equal: Link<T>,
    greater: Link<T>,
}

/// Which child took the place of a deleted node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Splice {
    /// The head of the equal chain, inheriting both the less and greater subtrees.
    Middle,
    /// The less child, with no greater subtree to carry along.
    Left,
    /// The less child, after the greater subtree was placed inside of it.
    MergedLeft,
    /// The greater child.
    Right,
    /// Nothing, the deleted node had no children.
    Leaf,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // Boxes would drop their children recursively, which is as deep as the tree.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.less.take());
            stack.extend(node.equal.take());
            stack.extend(node.greater.take());
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

/// Renders the tree the same way [`Tree::print_tree`] does.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// A line still to be written, with its nesting depth.
        enum Line<'a, T> {
            Node(&'a Node<T>, usize),
            Label(&'static str, usize),
        }

        let root = match self.root.as_deref() {
            Some(root) => root,
            None => return writeln!(f, "Empty Tree"),
        };

        let mut stack = vec![Line::Node(root, 0)];
        while let Some(line) = stack.pop() {
            match line {
                Line::Label(label, depth) => {
                    writeln!(f, "{:indent$}{}", "", label, indent = depth * INDENT)?
                }
                Line::Node(node, depth) => {
                    writeln!(f, "{:indent$}Node {}", "", node.value, indent = depth * INDENT)?;

                    // Pushed backwards so they pop as Left, less, Middle, equal, Right, greater.
                    for (label, child) in [
                        ("Right", node.greater.as_deref()),
                        ("Middle", node.equal.as_deref()),
                        ("Left", node.less.as_deref()),
                    ] {
                        if let Some(child) = child {
                            stack.push(Line::Node(child, depth + 1));
                        }
                        stack.push(Line::Label(label, depth));
                    }
                }
            }
        }

        Ok(())
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of values in the tree, counting every duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            len += 1;
            stack.extend(node.less.as_deref());
            stack.extend(node.equal.as_deref());
            stack.extend(node.greater.as_deref());
        }

        len
    }

    /// Flattens the tree by visiting a node's less subtree, the node itself, its equal chain and
    /// then its greater subtree. The values come out sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for value in [3, 1, 2, 1] {
    ///     tree.insert(value);
    /// }
    ///
    /// assert_eq!(tree.values(), [&1, &1, &2, &3]);
    /// ```
    pub fn values(&self) -> Vec<&T> {
        enum Visit<'a, T> {
            Expand(&'a Node<T>),
            Emit(&'a T),
        }

        let mut values = Vec::new();
        let mut stack: Vec<Visit<'_, T>> =
            self.root.as_deref().map(Visit::Expand).into_iter().collect();
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Emit(value) => values.push(value),
                Visit::Expand(node) => {
                    stack.extend(node.greater.as_deref().map(Visit::Expand));
                    stack.extend(node.equal.as_deref().map(Visit::Expand));
                    stack.push(Visit::Emit(&node.value));
                    stack.extend(node.less.as_deref().map(Visit::Expand));
                }
            }
        }

        values
    }

    /// Counts the nodes holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(7);
    /// tree.insert(7);
    ///
    /// assert_eq!(tree.count(&7), 2);
    /// assert_eq!(tree.count(&8), 0);
    /// ```
    pub fn count(&self, value: &T) -> usize
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Equal => break,
                ordering => current = node.link(ordering).as_deref(),
            }
        }

        let mut count = 0;
        while let Some(node) = current {
            count += 1;
            current = node.equal.as_deref();
        }

        count
    }

    /// Whether at least one node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.count(value) > 0
    }

    /// Inserts the given value into the tree. Values that are already present are kept as well,
    /// at the end of the equal chain of the first node holding them.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.values(), [&1, &1]);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let node = Node::new_boxed(value);
        match self.root.as_mut() {
            Some(root) => root.add_child(node),
            None => self.root = Some(node),
        }
    }

    /// Deletes one node holding the given value and returns whether one was found. The node's
    /// place is taken by, in order of preference, the next node of its equal chain, its less
    /// child (with the greater subtree moved inside of it) or its greater child.
    ///
    /// The node removed is the tree's root if that matches, or else the first node met on the
    /// way down that hangs off of its parent's less or greater link. Other nodes holding the
    /// value stay where they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let link = match self.matching_link(value) {
            Some(link) => link,
            None => {
                debug!("delete found no matching node");
                return false;
            }
        };

        match link.take() {
            Some(node) => {
                let (replacement, splice) = node.splice();
                trace!("deleted a node, {:?} took its place", splice);
                *link = replacement;
                true
            }
            None => false,
        }
    }

    /// Writes the tree to stdout. Each node is printed as its value followed by its less, equal
    /// and greater subtrees, indented under `Left`, `Middle` and `Right` labels.
    ///
    /// This is meant for people to read, not for programs to parse.
    pub fn print_tree(&self)
    where
        T: fmt::Display,
    {
        // Nothing sensible to do if stdout is gone.
        let _ = self.write_tree(io::stdout().lock());
    }

    /// Writes the same text as [`Tree::print_tree`] to `out`.
    pub fn write_tree<W>(&self, mut out: W) -> io::Result<()>
    where
        W: Write,
        T: fmt::Display,
    {
        write!(out, "{}", self)
    }

    /// Finds the link holding the node `delete` should remove: the root if it matches, or the
    /// less or greater link of the first node on the search path whose child there matches.
    fn matching_link(&mut self, value: &T) -> Option<&mut Link<T>>
    where
        T: Ord,
    {
        if self.root.as_ref()?.value.cmp(value) == Ordering::Equal {
            return Some(&mut self.root);
        }

        let mut current = self.root.as_deref_mut()?;
        loop {
            if let Some(side) = current.matching_side(value) {
                return Some(current.link_mut(side));
            }

            let next = match current.value.cmp(value) {
                Ordering::Less => Ordering::Greater,
                _ => Ordering::Less,
            };
            current = current.link_mut(next).as_deref_mut()?;
        }
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            less: None,
            equal: None,
            greater: None,
        })
    }

    /// The child link a value with the given ordering relative to this node belongs under.
    fn link(&self, ordering: Ordering) -> &Link<T> {
        match ordering {
            Ordering::Less => &self.less,
            Ordering::Equal => &self.equal,
            Ordering::Greater => &self.greater,
        }
    }

    fn link_mut(&mut self, ordering: Ordering) -> &mut Link<T> {
        match ordering {
            Ordering::Less => &mut self.less,
            Ordering::Equal => &mut self.equal,
            Ordering::Greater => &mut self.greater,
        }
    }

    /// Whether the less or the greater child holds `value`, less first.
    fn matching_side(&self, value: &T) -> Option<Ordering>
    where
        T: Ord,
    {
        [Ordering::Less, Ordering::Greater]
            .iter()
            .copied()
            .find(|&side| match self.link(side) {
                Some(child) => child.value.cmp(value) == Ordering::Equal,
                None => false,
            })
    }

    /// Places `child` (and whatever subtree it carries) in the first empty link found by walking
    /// down from this node. Equal values walk down equal links so the child ends up at the tail
    /// of the chain.
    fn add_child(&mut self, child: Box<Self>)
    where
        T: Ord,
    {
        let mut depth = 1;
        let ordering = child.value.cmp(&self.value);
        let mut link = self.link_mut(ordering);
        while let Some(node) = link {
            let ordering = child.value.cmp(&node.value);
            link = node.link_mut(ordering);
            depth += 1;
        }

        trace!("placed node at depth {}", depth);
        *link = Some(child);
    }

    /// Takes this node out of the tree and returns the subtree that should be linked in its place.
    fn splice(self: Box<Self>) -> (Link<T>, Splice)
    where
        T: Ord,
    {
        let Node {
            less,
            equal,
            greater,
            ..
        } = *self;

        match (less, equal, greater) {
            (less, Some(mut middle), greater) => {
                // The rest of an equal chain never gets less or greater children of its own.
                debug_assert!(middle.less.is_none() && middle.greater.is_none());
                middle.less = less;
                middle.greater = greater;
                (Some(middle), Splice::Middle)
            }
            (Some(mut less), None, Some(greater)) => {
                less.add_child(greater);
                (Some(less), Splice::MergedLeft)
            }
            (Some(less), None, None) => (Some(less), Splice::Left),
            (None, None, Some(greater)) => (Some(greater), Splice::Right),
            (None, None, None) => (None, Splice::Leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for value in values {
            tree.insert(*value);
        }

        tree
    }

    /// A compact picture of the tree: a leaf is its value, any other node is
    /// `(value less equal greater)` with `_` for missing children.
    fn sketch(tree: &Tree<i32>) -> String {
        fn sketch_link(link: &Link<i32>) -> String {
            match link {
                None => "_".to_string(),
                Some(node) if node.less.is_none() && node.equal.is_none() && node.greater.is_none() => {
                    node.value.to_string()
                }
                Some(node) => format!(
                    "({} {} {} {})",
                    node.value,
                    sketch_link(&node.less),
                    sketch_link(&node.equal),
                    sketch_link(&node.greater)
                ),
            }
        }

        sketch_link(&tree.root)
    }

    /// Builds a tree shaped like a list by linking nodes by hand, which avoids the quadratic cost
    /// of inserting ascending values.
    fn descending_spine(depth: i32) -> Tree<i32> {
        let mut root = None;
        for value in 0..depth {
            let mut node = Node::new_boxed(value);
            node.less = root;
            root = Some(node);
        }

        Tree { root }
    }

    #[test]
    fn insert_into_empty_tree_creates_root() {
        let tree = tree_of(&[10]);

        assert!(!tree.is_empty());
        assert_eq!(sketch(&tree), "10");
        assert_eq!(tree.to_string(), "Node 10\nLeft\nMiddle\nRight\n");
    }

    #[test]
    fn insert_places_by_order() {
        let tree = tree_of(&[6, 5, 4, 9, 3, 5, 7, 2, 2]);

        assert_eq!(
            sketch(&tree),
            "(6 (5 (4 (3 (2 _ 2 _) _ _) _ _) 5 _) _ (9 7 _ _))"
        );
    }

    #[test]
    fn duplicates_extend_the_equal_chain() {
        let tree = tree_of(&[10, 15, 15, 15]);

        assert_eq!(sketch(&tree), "(10 _ _ (15 _ (15 _ 15 _) _))");
        assert_eq!(tree.count(&15), 3);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn delete_from_empty_tree() {
        let mut tree = Tree::<i32>::new();

        assert!(!tree.delete(&1));
        assert_eq!(tree.to_string(), "Empty Tree\n");
    }

    #[test]
    fn delete_root_promotes_middle() {
        let mut tree = tree_of(&[5, 3, 7, 5]);

        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "(5 3 _ 7)");
    }

    #[test]
    fn delete_root_merges_right_into_left() {
        let mut tree = tree_of(&[5, 3, 7, 4]);

        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "(3 _ _ (4 _ _ 7))");
    }

    #[test]
    fn delete_root_with_single_child() {
        let mut tree = tree_of(&[5, 3]);
        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "3");

        let mut tree = tree_of(&[5, 7]);
        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "7");
    }

    #[test]
    fn delete_only_node() {
        let mut tree = tree_of(&[5]);

        assert!(tree.delete(&5));
        assert!(tree.is_empty());
        assert!(!tree.delete(&5));
    }

    #[test]
    fn delete_left_child_promotes_middle() {
        let mut tree = tree_of(&[10, 5, 5, 3, 7]);

        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "(10 (5 3 _ 7) _ _)");
    }

    #[test]
    fn delete_right_child_merges_right_into_left() {
        let mut tree = tree_of(&[10, 15, 12, 20, 13]);

        assert!(tree.delete(&15));
        assert_eq!(sketch(&tree), "(10 _ _ (12 _ _ (13 _ _ 20)))");
    }

    #[test]
    fn delete_left_child_keeps_left_subtree() {
        let mut tree = tree_of(&[10, 5, 3, 7, 6]);

        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "(10 (3 _ _ (7 6 _ _)) _ _)");
    }

    #[test]
    fn delete_right_child_with_only_right() {
        let mut tree = tree_of(&[10, 15, 20]);

        assert!(tree.delete(&15));
        assert_eq!(sketch(&tree), "(10 _ _ 20)");
    }

    #[test]
    fn delete_leaf() {
        let mut tree = tree_of(&[10, 5]);
        assert!(tree.delete(&5));
        assert_eq!(sketch(&tree), "10");

        let mut tree = tree_of(&[10, 5, 15, 12, 14]);
        assert!(tree.delete(&14));
        assert_eq!(sketch(&tree), "(10 5 _ (15 12 _ _))");
    }

    #[test]
    fn delete_missing_value_changes_nothing() {
        let mut tree = tree_of(&[10, 5, 15, 12, 14]);
        let before = tree.to_string();

        assert!(!tree.delete(&13));
        assert!(!tree.delete(&0));
        assert!(!tree.delete(&99));
        assert_eq!(tree.to_string(), before);
    }

    #[test]
    fn delete_one_occurrence_at_a_time() {
        let mut tree = tree_of(&[5, 5, 5]);

        assert!(tree.delete(&5));
        assert_eq!(tree.count(&5), 2);
        assert!(tree.delete(&5));
        assert_eq!(tree.count(&5), 1);
        assert!(tree.delete(&5));
        assert!(!tree.delete(&5));
        assert!(tree.is_empty());
    }

    #[test]
    fn promoted_middle_keeps_both_subtrees() {
        let mut tree = tree_of(&[8, 4, 12, 4, 2, 6]);

        assert!(tree.delete(&4));
        assert_eq!(sketch(&tree), "(8 (4 2 _ 6) _ 12)");
        assert!(tree.delete(&4));
        assert_eq!(sketch(&tree), "(8 (2 _ _ 6) _ 12)");
    }

    #[test]
    fn splice_reports_which_child_was_used() {
        let mut node = Node::new_boxed(5);
        node.add_child(Node::new_boxed(3));
        node.add_child(Node::new_boxed(7));
        assert_eq!(node.splice().1, Splice::MergedLeft);

        let mut node = Node::new_boxed(5);
        node.add_child(Node::new_boxed(5));
        assert_eq!(node.splice().1, Splice::Middle);

        let mut node = Node::new_boxed(5);
        node.add_child(Node::new_boxed(3));
        assert_eq!(node.splice().1, Splice::Left);

        let mut node = Node::new_boxed(5);
        node.add_child(Node::new_boxed(7));
        assert_eq!(node.splice().1, Splice::Right);

        let (replacement, splice) = Node::new_boxed(5).splice();
        assert!(replacement.is_none());
        assert_eq!(splice, Splice::Leaf);
    }

    #[test]
    fn print_composite_tree() {
        let tree = tree_of(&[5, 3, 7, 5]);

        let mut out = Vec::new();
        tree.write_tree(&mut out).unwrap();

        let expected = "\
Node 5
Left
   Node 3
   Left
   Middle
   Right
Middle
   Node 5
   Left
   Middle
   Right
Right
   Node 7
   Left
   Middle
   Right
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn debug_lists_values_in_order() {
        let tree = tree_of(&[2, 3, 1, 2]);

        assert_eq!(format!("{:?}", tree), "[1, 2, 2, 3]");
    }

    #[test]
    fn deep_tree_operations_do_not_recurse() {
        const DEPTH: i32 = 200_000;
        let mut tree = descending_spine(DEPTH);

        assert_eq!(tree.len(), DEPTH as usize);
        assert_eq!(tree.values().len(), DEPTH as usize);
        assert_eq!(tree.count(&0), 1);

        // The smallest value sits at the bottom of the spine.
        tree.insert(-1);
        assert_eq!(tree.count(&-1), 1);
        assert!(tree.delete(&0));
        assert!(tree.delete(&-1));
        assert!(!tree.delete(&-1));
        assert_eq!(tree.len(), DEPTH as usize - 1);

        // Dropped here without blowing the stack.
    }

    #[test]
    fn deep_tree_prints() {
        let tree = descending_spine(2_000);
        let printed = tree.to_string();

        assert_eq!(printed.lines().count(), 4 * 2_000);
        assert!(printed.starts_with("Node 1999\nLeft\n   Node 1998\n"));
    }

    #[test]
    fn ascending_inserts_build_a_spine() {
        let tree = tree_of(&[1, 2, 3, 4, 5]);

        assert_eq!(sketch(&tree), "(1 _ _ (2 _ _ (3 _ _ (4 _ _ 5))))");
    }
}
