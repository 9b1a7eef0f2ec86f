//! Path-tracking traversal.
//!
//! Two engines drive a [`Visitor`] over a tree:
//!
//! - [`walk_depth_first`]: pre-order and recursive. A container's `visit_*`
//!   hook runs before any of its entries, and every entry is exhausted before
//!   the next sibling starts.
//! - [`walk_breadth_first`]: level-order over a FIFO queue. Every node at
//!   depth `n` is visited before any node at depth `n + 1`.
//!
//! Both hand each hook the [`Pointer`] of the node it concerns. Entry hooks
//! receive the pointer of the entry's value, i.e. the parent pointer plus the
//! entry's key or index.
//!
//! The first hook error aborts the walk and is returned as a
//! [`TraversalError`] carrying that pointer. Leave hooks are still invoked
//! for every entry (and, depth-first, every container) whose enter hook
//! already ran; an error from the subtree takes precedence over one from
//! the leave hook.
//!
//! [`DepthFirst`] and [`BreadthFirst`] are the lazy `(Pointer, &JsonValue)`
//! sequences with the same orders. They keep an explicit stack or queue so a
//! consumer can stop at any point; calling [`JsonValue::depth_first`] again
//! restarts from the root.

use crate::error::TraversalError;
use crate::pointer::{Accessor, Pointer};
use crate::value::{EntryKey, JsonValue, Object};
use std::collections::VecDeque;
use std::convert::Infallible;
use tracing::trace;

/// Hooks invoked by the traversal engines. Every hook defaults to a no-op,
/// so implementors override only what they need.
///
/// `'a` is the lifetime of the traversed tree, which lets a visitor keep
/// references to the nodes it sees.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    type Error;

    fn enter_root(&mut self, root: &'a JsonValue) -> Result<(), Self::Error> {
        Ok(())
    }

    fn leave_root(&mut self, root: &'a JsonValue) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_object(&mut self, pointer: &Pointer, object: &'a Object) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Depth-first only: runs after the last entry of `object`.
    fn leave_object(&mut self, pointer: &Pointer, object: &'a Object) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_array(&mut self, pointer: &Pointer, array: &'a [JsonValue]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Depth-first only: runs after the last element of `array`.
    fn leave_array(&mut self, pointer: &Pointer, array: &'a [JsonValue]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_string(&mut self, pointer: &Pointer, string: &'a str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_number(&mut self, pointer: &Pointer, number: f64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_bool(&mut self, pointer: &Pointer, boolean: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_null(&mut self, pointer: &Pointer) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_object_entry(
        &mut self,
        pointer: &Pointer,
        key: &'a str,
        value: &'a JsonValue,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn leave_object_entry(
        &mut self,
        pointer: &Pointer,
        key: &'a str,
        value: &'a JsonValue,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_array_entry(
        &mut self,
        pointer: &Pointer,
        index: usize,
        value: &'a JsonValue,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn leave_array_entry(
        &mut self,
        pointer: &Pointer,
        index: usize,
        value: &'a JsonValue,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A visitor that does nothing. Useful as a starting point and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseVisitor;

impl Visitor<'_> for BaseVisitor {
    type Error = Infallible;
}

type Walk<E> = Result<(), TraversalError<E>>;

/// Attach `pointer` to a hook failure.
fn located<E>(hooked: Result<(), E>, pointer: &Pointer) -> Walk<E> {
    hooked.map_err(|source| {
        trace!(pointer = %pointer, "visitor aborted traversal");
        TraversalError {
            pointer: pointer.clone(),
            source,
        }
    })
}

/// Call the `visit_*` hook matching the variant of `value`.
fn dispatch<'a, V>(value: &'a JsonValue, pointer: &Pointer, visitor: &mut V) -> Walk<V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    let visited = match value {
        JsonValue::Object(object) => visitor.visit_object(pointer, object),
        JsonValue::Array(array) => visitor.visit_array(pointer, array),
        JsonValue::String(string) => visitor.visit_string(pointer, string),
        JsonValue::Number(number) => visitor.visit_number(pointer, *number),
        JsonValue::Bool(boolean) => visitor.visit_bool(pointer, *boolean),
        JsonValue::Null => visitor.visit_null(pointer),
    };
    located(visited, pointer)
}

/// Run `inner` between the enter and leave hooks of the entry `key` holding
/// `value`. Leave runs whenever enter succeeded.
fn around_entry<'a, V>(
    key: EntryKey<'a>,
    value: &'a JsonValue,
    pointer: &mut Pointer,
    visitor: &mut V,
    inner: impl FnOnce(&mut Pointer, &mut V) -> Walk<V::Error>,
) -> Walk<V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    let entered = match key {
        EntryKey::Key(key) => visitor.enter_object_entry(pointer, key, value),
        EntryKey::Index(index) => visitor.enter_array_entry(pointer, index, value),
        EntryKey::Unit => Ok(()),
    };
    located(entered, pointer)?;
    let walked = inner(pointer, visitor);
    let left = match key {
        EntryKey::Key(key) => visitor.leave_object_entry(pointer, key, value),
        EntryKey::Index(index) => visitor.leave_array_entry(pointer, index, value),
        EntryKey::Unit => Ok(()),
    };
    walked.and(located(left, pointer))
}

fn entry_accessor(key: EntryKey<'_>) -> Option<Accessor> {
    match key {
        EntryKey::Key(key) => Some(Accessor::Key(key.to_owned())),
        EntryKey::Index(index) => Some(Accessor::Index(index)),
        EntryKey::Unit => None,
    }
}

/// Entries of `value` with their pointers below `pointer`. Empty for scalars.
fn children<'a, 'p>(
    pointer: &'p Pointer,
    value: &'a JsonValue,
) -> impl DoubleEndedIterator<Item = (Pointer, EntryKey<'a>, &'a JsonValue)> + use<'a, 'p> {
    value.entries().filter_map(move |(key, child)| {
        entry_accessor(key).map(|accessor| (pointer.join(accessor), key, child))
    })
}

/// Walk `root` in pre-order.
///
/// # Errors
///
/// Returns the first hook error together with the pointer it occurred at.
pub fn walk_depth_first<'a, V>(root: &'a JsonValue, visitor: &mut V) -> Walk<V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    trace!(engine = "depth_first", "starting traversal");
    let mut pointer = Pointer::root();
    located(visitor.enter_root(root), &pointer)?;
    let walked = descend(root, &mut pointer, visitor);
    let left = located(visitor.leave_root(root), &pointer);
    walked.and(left)
}

fn descend<'a, V>(value: &'a JsonValue, pointer: &mut Pointer, visitor: &mut V) -> Walk<V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    dispatch(value, pointer, visitor)?;
    if !value.is_container() {
        return Ok(());
    }

    let walked = value.entries().try_for_each(|(key, child)| {
        if let Some(accessor) = entry_accessor(key) {
            pointer.push(accessor);
        }
        let result = around_entry(key, child, pointer, visitor, |pointer, visitor| {
            descend(child, pointer, visitor)
        });
        pointer.pop();
        result
    });

    let left = match value {
        JsonValue::Object(object) => visitor.leave_object(pointer, object),
        JsonValue::Array(array) => visitor.leave_array(pointer, array),
        _ => Ok(()),
    };
    walked.and(located(left, pointer))
}

/// Walk `root` in level order.
///
/// # Errors
///
/// Returns the first hook error together with the pointer it occurred at.
pub fn walk_breadth_first<'a, V>(root: &'a JsonValue, visitor: &mut V) -> Walk<V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    trace!(engine = "breadth_first", "starting traversal");
    located(visitor.enter_root(root), &Pointer::root())?;

    let mut queue = VecDeque::from([(Pointer::root(), EntryKey::Unit, root)]);
    let mut walked = Ok(());
    while let Some((mut pointer, key, value)) = queue.pop_front() {
        walked = around_entry(key, value, &mut pointer, visitor, |pointer, visitor| {
            dispatch(value, pointer, visitor)?;
            queue.extend(children(pointer, value));
            Ok(())
        });
        if walked.is_err() {
            break;
        }
    }

    let left = located(visitor.leave_root(root), &Pointer::root());
    walked.and(left)
}

/// Lazy pre-order sequence of every node with its pointer, root first.
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    stack: Vec<(Pointer, &'a JsonValue)>,
}

impl<'a> DepthFirst<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Self {
            stack: vec![(Pointer::root(), root)],
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (Pointer, &'a JsonValue);

    fn next(&mut self) -> Option<Self::Item> {
        let (pointer, value) = self.stack.pop()?;
        // Pushed in reverse so the first child is popped first.
        let next = children(&pointer, value).rev();
        self.stack.extend(next.map(|(child_pointer, _, child)| (child_pointer, child)));
        Some((pointer, value))
    }
}

/// Lazy level-order sequence of every node with its pointer, root first.
#[derive(Debug, Clone)]
pub struct BreadthFirst<'a> {
    queue: VecDeque<(Pointer, &'a JsonValue)>,
}

impl<'a> BreadthFirst<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Self {
            queue: VecDeque::from([(Pointer::root(), root)]),
        }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (Pointer, &'a JsonValue);

    fn next(&mut self) -> Option<Self::Item> {
        let (pointer, value) = self.queue.pop_front()?;
        let next = children(&pointer, value);
        self.queue.extend(next.map(|(child_pointer, _, child)| (child_pointer, child)));
        Some((pointer, value))
    }
}

impl JsonValue {
    /// Drive `visitor` over this tree in pre-order. See [`walk_depth_first`].
    pub fn accept_depth_first<'a, V>(&'a self, visitor: &mut V) -> Walk<V::Error>
    where
        V: Visitor<'a> + ?Sized,
    {
        walk_depth_first(self, visitor)
    }

    /// Drive `visitor` over this tree in level order. See [`walk_breadth_first`].
    pub fn accept_breadth_first<'a, V>(&'a self, visitor: &mut V) -> Walk<V::Error>
    where
        V: Visitor<'a> + ?Sized,
    {
        walk_breadth_first(self, visitor)
    }

    /// Every node with its pointer, in pre-order.
    ///
    /// ```
    /// use jtree_core::cast::force;
    /// use serde_json::json;
    ///
    /// let value = force(json!({"a": ["b", "c"]}));
    /// let paths: Vec<String> = value.depth_first().map(|(p, _)| p.to_string()).collect();
    /// assert_eq!(paths, ["/", "/a", "/a/0", "/a/1"]);
    /// ```
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(self)
    }

    /// Every node with its pointer, in level order.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(self)
    }
}
