//! # jtree-core
//!
//! A typed, in-memory JSON value tree that sits between the untyped output of
//! a JSON decoder and application structs.
//!
//! - **Cast**: `serde_json::Value` → [`JsonValue`], with safe narrowing
//!   (`is_*` / `as_*`) that reports the expected and actual variant instead of
//!   panicking.
//! - **Access**: navigation by key, index, slice, or RFC 6901 [`Pointer`].
//! - **Visit**: depth-first and breadth-first traversal that tracks the
//!   pointer of every node, either through a [`Visitor`] or as a lazy
//!   iterator.
//!
//! ## Quick start
//!
//! ```rust
//! use jtree_core::{Pointer, RootValue};
//!
//! let root: RootValue = r#"{"number": ["zero", "one", "two"]}"#.parse().unwrap();
//!
//! let pointer: Pointer = "/number/1".parse().unwrap();
//! assert_eq!(root.access_as_string(&pointer).unwrap(), "one");
//!
//! let paths: Vec<String> = root
//!     .breadth_first()
//!     .map(|(pointer, _)| pointer.to_string())
//!     .collect();
//! assert_eq!(paths, ["/", "/number", "/number/0", "/number/1", "/number/2"]);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `JsonValue`, `RootValue`, JSON encode/decode
//! - [`cast`]: untyped ↔ typed conversion, narrowing, `force*` helpers
//! - [`pointer`]: `Accessor`, `Slice`, `Pointer` and its text form
//! - [`access`]: key / index / slice / pointer navigation and replacement
//! - [`visit`]: `Visitor` hooks, traversal engines, lazy traversal iterators
//! - [`error`]: Error types
//!
//! ## Features
//!
//! - `preserve_order`: objects keep insertion order (`IndexMap`) instead of
//!   sorted order (`BTreeMap`).

pub mod access;
pub mod cast;
pub mod error;
pub mod pointer;
pub mod value;
pub mod visit;

pub use cast::{cast, force, uncast};
pub use error::{AccessError, AsValueError, CastError, Error, PointerError, Result, TraversalError};
pub use pointer::{Accessor, AccessorKind, Pointer, Slice};
pub use value::{Array, EntryKey, JsonValue, Object, Representation, RootValue};
pub use visit::{walk_breadth_first, walk_depth_first, BaseVisitor, BreadthFirst, DepthFirst, Visitor};
