//! This crate exposes a trinary search tree, a Binary Search Tree variant
//! that keeps duplicate values as nodes of their own instead of counting them.
//!
//! ## Trinary Tree
//!
//! A trinary tree stores values in `Node`s just like a BST does, but every
//! `Node` has three children instead of two: a "less" child, an "equal" child
//! and a "greater" child. The invariants are:
//!
//! 1. For every `Node`, all the `Node`s in its less subtree have a value
//!    strictly less than its own value.
//! 2. For every `Node`, all the `Node`s in its greater subtree have a value
//!    strictly greater than its own value.
//! 3. Following a `Node`'s equal child, and that child's equal child, and so on,
//!    gives a chain of `Node`s that all hold the same value as the `Node` itself.
//!
//! > Inserting the same value three times gives three `Node`s: the first one
//! > reachable from its parent and two more hanging off of it through equal links.
//!
//! The tree does no balancing. Inserting values in ascending order gives a
//! tree as deep as the number of values, so every walk over the tree is done
//! with a loop and, where needed, an explicit stack rather than recursion.
//!
//! The crate also carries [`long`], a strict decimal string to `i64` converter
//! used by the `trinary` driver binary to read its input.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod long;
pub mod tree;
