//! Value representation for in-memory data graphs.
//!
//! This module provides the core data structures traversed by structprobe.
//! Scalars are stored inline; objects and arrays are shared handles, so the
//! same container can be reachable from several places in a graph (including
//! from inside itself). Container identity is the address of the shared
//! allocation and is what the search algorithms use for cycle detection.
//!
//! # Example
//!
//! ```
//! use structprobe::document::node::{Object, Value};
//!
//! // Build { "name": "probe", "self": <itself> }
//! let obj = Object::new();
//! obj.insert("name", Value::from("probe"));
//! obj.insert("self", Value::Object(obj.clone()));
//!
//! let root = Value::Object(obj);
//! assert!(root.is_container());
//! ```

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Key-ordered field storage of an [`Object`].
pub type ObjectMap = IndexMap<String, Value>;

/// A numeric scalar (integer or float).
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// Shared handle to a keyed container.
///
/// Cloning an `Object` clones the handle, not the fields: both clones refer
/// to the same container and compare as the same identity.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectMap>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: ObjectMap) -> Self {
        Object(Rc::new(RefCell::new(map)))
    }

    /// Inserts or replaces a field, keeping the original position of an
    /// existing key.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    /// Returns the value bound to `key`, if the object owns that field.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the fields in insertion order.
    pub fn fields(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Object {
    // Fields are not printed: a cyclic object would recurse forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object@{:#x}({} fields)", self.id(), self.len())
    }
}

/// Shared handle to an ordered container.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(items)))
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Replaces the element at `index`. Returns false when out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the elements in index order.
    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array@{:#x}({} items)", self.id(), self.len())
    }
}

/// A node in a data graph.
///
/// `Absent` is distinct from `Null`: it marks "no value here", both for
/// lookups that found nothing and for fields explicitly bound to no value.
///
/// Equality is strict: scalars compare by value, containers by identity.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(Object),
    Array(Array),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Key of a direct child inside its owning container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildKey {
    /// Field of an object.
    Field(String),
    /// Position inside an array.
    Index(usize),
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Field(name) => f.write_str(name),
            ChildKey::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A value known to be a container; the uniform view used by traversals.
#[derive(Debug, Clone)]
pub enum Container {
    Object(Object),
    Array(Array),
}

impl Container {
    /// Identity of the underlying allocation.
    pub fn id(&self) -> usize {
        match self {
            Container::Object(obj) => obj.id(),
            Container::Array(arr) => arr.id(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Container::Array(_))
    }

    /// Direct children in natural enumeration order: insertion order for
    /// objects, index order for arrays.
    pub fn entries(&self) -> Vec<(ChildKey, Value)> {
        match self {
            Container::Object(obj) => obj
                .fields()
                .into_iter()
                .map(|(k, v)| (ChildKey::Field(k), v))
                .collect(),
            Container::Array(arr) => arr
                .items()
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ChildKey::Index(i), v))
                .collect(),
        }
    }

    /// Returns the value of the field named `key` if this container owns one.
    ///
    /// Arrays own the fields named by canonical decimal indices within
    /// bounds (`"0"`, `"12"`; never `"01"` or `"-1"`).
    pub fn own_field(&self, key: &str) -> Option<Value> {
        match self {
            Container::Object(obj) => obj.get(key),
            Container::Array(arr) => parse_index(key).and_then(|idx| arr.get(idx)),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Container::Object(obj) => Value::Object(obj),
            Container::Array(arr) => Value::Array(arr),
        }
    }
}

/// Parses a canonical decimal array index.
pub fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

impl Value {
    /// Builds an object from key/value pairs, preserving their order.
    pub fn object<K, I>(fields: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: ObjectMap = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Object::from_map(map))
    }

    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Array(Array::from_vec(items.into_iter().collect()))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is an object or an array.
    ///
    /// # Example
    ///
    /// ```
    /// use structprobe::document::node::Value;
    ///
    /// assert!(Value::array(Vec::new()).is_container());
    /// assert!(!Value::Null.is_container());
    /// assert!(!Value::from(42).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    pub fn as_container(&self) -> Option<Container> {
        match self {
            Value::Object(obj) => Some(Container::Object(obj.clone())),
            Value::Array(arr) => Some(Container::Array(arr.clone())),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Returns true if both values are handles to the same container.
    pub fn same_container(&self, other: &Value) -> bool {
        match (self.as_container(), other.as_container()) {
            (Some(a), Some(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i as i64))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}
