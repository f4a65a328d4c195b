use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::error::StoreError;
use crate::signal::SubId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// A plain field mutation, routed to the generic render target.
    Field,
    /// An array mutation, or a mutation of a key literally named `items`.
    Items,
}

/// One effective mutation: the full dot-path, the leaf key, and both values.
/// `old` is `Value::Null` when the key did not exist before.
#[derive(Clone, Debug)]
pub struct Change {
    pub path: String,
    pub key: String,
    pub kind: ChangeKind,
    pub old: Value,
    pub new: Value,
}

impl Change {
    /// Path of the container to re-render for an `Items` change: for an
    /// array-index write the index segment is stripped, otherwise the path
    /// itself.
    pub fn container_path(&self) -> &str {
        if self.key.parse::<usize>().is_ok() {
            match self.path.rsplit_once('.') {
                Some((parent, _)) => parent,
                None => &self.path,
            }
        } else {
            &self.path
        }
    }
}

/// Keyed observable store. Mutations go through [`Store::set`], which
/// resolves dot-paths, records dirty keys, and notifies subscribers
/// synchronously — but only when the value actually changed.
#[derive(Clone)]
pub struct Store(Rc<RefCell<Inner>>);

struct Inner {
    root: Value,
    subs: Vec<Option<Rc<dyn Fn(&Change)>>>,
    dirty: SmallVec<[String; 4]>,
    deep: bool,
}

impl Store {
    /// Attribute-store flavor: every change is a [`ChangeKind::Field`].
    pub fn shallow() -> Self {
        Self::new(false)
    }

    /// Property-store flavor: array mutations and the `items` key are
    /// classified as [`ChangeKind::Items`].
    pub fn deep() -> Self {
        Self::new(true)
    }

    fn new(deep: bool) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            root: Value::Object(Map::new()),
            subs: Vec::new(),
            dirty: SmallVec::new(),
            deep,
        })))
    }

    /// Assigns `value` at `path`, creating intermediate objects on demand.
    /// Sibling keys at every level are left untouched. Numeric segments
    /// index into arrays; writing past the end pads with `Value::Null`.
    ///
    /// Assigning a value equal to the current one is a no-op.
    pub fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let change = self.apply(path, value)?;
        if let Some(change) = change {
            self.notify(&change);
        }
        Ok(())
    }

    fn apply(&self, path: &str, value: Value) -> Result<Option<Change>, StoreError> {
        if path.is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let mut inner = self.0.borrow_mut();
        let deep = inner.deep;

        let segments: Vec<&str> = path.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(StoreError::EmptyPath);
        };

        let mut current: &mut Value = &mut inner.root;
        for seg in parents {
            current = match current {
                Value::Array(arr) => {
                    let idx = seg
                        .parse::<usize>()
                        .map_err(|_| StoreError::IndexExpected { segment: seg.to_string() })?;
                    if arr.len() <= idx {
                        arr.resize(idx + 1, Value::Null);
                    }
                    &mut arr[idx]
                }
                Value::Object(map) => map.entry(seg.to_string()).or_insert(Value::Null),
                _ => return Err(StoreError::NotAContainer { segment: seg.to_string() }),
            };
            if !matches!(current, Value::Object(_) | Value::Array(_)) {
                if !matches!(current, Value::Null) {
                    log::warn!("store: replacing non-container value at `{seg}` on path `{path}`");
                }
                *current = Value::Object(Map::new());
            }
        }

        let in_array = matches!(current, Value::Array(_));
        let old = match current {
            Value::Array(arr) => {
                let idx = leaf
                    .parse::<usize>()
                    .map_err(|_| StoreError::IndexExpected { segment: leaf.to_string() })?;
                let old = arr.get(idx).cloned().unwrap_or(Value::Null);
                if old == value {
                    return Ok(None);
                }
                if arr.len() <= idx {
                    arr.resize(idx + 1, Value::Null);
                }
                arr[idx] = value.clone();
                old
            }
            Value::Object(map) => {
                let old = map.get(*leaf).cloned().unwrap_or(Value::Null);
                if old == value {
                    return Ok(None);
                }
                map.insert(leaf.to_string(), value.clone());
                old
            }
            _ => return Err(StoreError::NotAContainer { segment: leaf.to_string() }),
        };

        let kind = if deep && (in_array || *leaf == "items") {
            ChangeKind::Items
        } else {
            ChangeKind::Field
        };

        inner.dirty.push(path.to_string());

        Ok(Some(Change {
            path: path.to_string(),
            key: leaf.to_string(),
            kind,
            old,
            new: value,
        }))
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        let inner = self.0.borrow();
        let mut current: &Value = &inner.root;
        for seg in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(seg)?,
                Value::Array(arr) => arr.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    /// Clone of the top-level entries.
    pub fn snapshot(&self) -> Map<String, Value> {
        match &self.0.borrow().root {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Drains the dirty-path list accumulated since the last call.
    pub fn take_dirty(&self) -> Vec<String> {
        std::mem::take(&mut self.0.borrow_mut().dirty).into_vec()
    }

    pub fn subscribe(&self, f: impl Fn(&Change) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Some(Rc::new(f)));
        inner.subs.len() - 1
    }

    pub fn unsubscribe(&self, id: SubId) {
        let mut inner = self.0.borrow_mut();
        if let Some(slot) = inner.subs.get_mut(id) {
            *slot = None;
        }
    }

    fn notify(&self, change: &Change) {
        let subs: Vec<_> = self.0.borrow().subs.iter().flatten().cloned().collect();
        for s in subs {
            s(change);
        }
    }
}
