//! A red-black tree ordered map for Rust.
//!
//! This crate provides [`RBTreeMap`], a balanced binary search tree that keeps its
//! entries sorted by a [`Comparator`] and guarantees O(log n) search, insertion and
//! deletion. Nodes are stored in an arena and linked by index, so rotations are
//! cheap index rewrites and the crate contains no `unsafe` code.
//!
//! # Example
//!
//! ```
//! use rbtree_map::{RBTreeMap, TreeError};
//!
//! let mut tree = RBTreeMap::new();
//! for (key, value) in [(10, "ten"), (5, "five"), (15, "fifteen"), (3, "three")] {
//!     tree.insert(key, value)?;
//! }
//!
//! assert_eq!(tree.size(), 4);
//! assert_eq!(tree.search(&5)?, &"five");
//! assert!(tree.contains(&15));
//!
//! // Keys are unique: a second insert is rejected and the first value kept.
//! assert_eq!(tree.insert(5, "FIVE"), Err(TreeError::DuplicateKey));
//!
//! tree.delete(&5)?;
//! assert_eq!(tree.keys(), [&3, &10, &15]);
//! assert!(tree.validate());
//! # Ok::<(), TreeError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Strict keys** - Inserting a present key, or deleting/searching a missing one, is an error
//! - **Pluggable ordering** - Any [`Comparator`], including closures; [`Natural`] by default
//! - **Self-checking** - [`RBTreeMap::validate`] re-derives every red-black invariant
//!
//! # Logging
//!
//! Rotations and fixups are reported at `trace` level and failed structural checks
//! at `debug` level through the [`log`] facade. No logger is installed by this crate.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod raw;

pub mod error;
pub mod rbtree_map;

pub use comparator::{Comparator, Natural, Reversed};
pub use error::{TreeError, Violation};
pub use rbtree_map::RBTreeMap;
