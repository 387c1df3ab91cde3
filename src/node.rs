use std::{
    any::Any,
    cell::RefCell,
    fmt::Debug,
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::payload::{Payload, PayloadError, slot_get};

struct NodeInner {
    label: RefCell<String>,
    first: RefCell<Option<Payload>>,
    second: RefCell<Option<Payload>>,
}

/// A vertex handle.
///
/// Identity is the handle itself: clones of a `Node` are the same vertex,
/// while two separately created nodes are distinct even when their labels
/// match.  Equality and hashing use the address of the shared allocation.
///
/// A node carries a mutable label and two optional payload slots, which
/// callers use to attach coordinates, heuristic values, game evaluations and
/// the like.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self(Rc::new(NodeInner {
            label: RefCell::new(label.into()),
            first: RefCell::new(None),
            second: RefCell::new(None),
        }))
    }

    /// Creates a node with its first payload slot filled.
    pub fn with_value<T: Any>(label: impl Into<String>, value: T) -> Self {
        let node = Self::new(label);
        node.set_value(value);
        node
    }

    /// Creates a node with both payload slots filled.
    pub fn with_values<T1: Any, T2: Any>(label: impl Into<String>, first: T1, second: T2) -> Self {
        let node = Self::with_value(label, first);
        node.set_second_value(second);
        node
    }

    pub fn label(&self) -> String {
        self.0.label.borrow().clone()
    }

    pub fn has_label(&self, label: &str) -> bool {
        *self.0.label.borrow() == label
    }

    pub fn set_label(&self, label: impl Into<String>) {
        *self.0.label.borrow_mut() = label.into();
    }

    /// Reads the first payload slot as a `T`.
    pub fn value<T: Any + Clone>(&self) -> Result<T, PayloadError> {
        slot_get::<T>(&self.0.first.borrow()).cloned()
    }

    /// Applies `f` to the first payload slot, for values that are not `Clone`.
    pub fn map_value<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, PayloadError> {
        slot_get::<T>(&self.0.first.borrow()).map(f)
    }

    pub fn set_value<T: Any>(&self, value: T) {
        *self.0.first.borrow_mut() = Some(Payload::new(value));
    }

    pub fn has_value(&self) -> bool {
        self.0.first.borrow().is_some()
    }

    /// Reads the second payload slot as a `T`.
    pub fn second_value<T: Any + Clone>(&self) -> Result<T, PayloadError> {
        slot_get::<T>(&self.0.second.borrow()).cloned()
    }

    pub fn map_second_value<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, PayloadError> {
        slot_get::<T>(&self.0.second.borrow()).map(f)
    }

    pub fn set_second_value<T: Any>(&self, value: T) {
        *self.0.second.borrow_mut() = Some(Payload::new(value));
    }

    /// Empties both payload slots.
    pub fn clear_values(&self) {
        self.0.first.borrow_mut().take();
        self.0.second.borrow_mut().take();
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({:?})", self.0.label.borrow())
    }
}
