use std::collections::HashMap;

use crate::value::Value;

/// A hash-indexed collection of unique values.
///
/// The element storage is a dense vector; lookups go through a hash index
/// keyed on [`Value::value_hash`]. The index is **not** maintained
/// incrementally: any structural mutation (adding a defaulted element,
/// removing an element) or in-place edit of an element changes element
/// identity, and the caller must [`rehash`](SetValue::rehash) before the
/// next lookup. The inspector's container drawer does exactly that at the
/// end of a mutating pass.
#[derive(Debug, Clone, Default)]
pub struct SetValue {
    elements: Vec<Value>,
    index: HashMap<u64, Vec<usize>>,
    dirty: bool,
}

impl SetValue {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from elements and builds the index.
    pub fn from_values(elements: Vec<Value>) -> Self {
        let mut set = Self {
            elements,
            index: HashMap::new(),
            dirty: true,
        };
        set.rehash();
        set
    }

    /// The element count.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element at `index`.
    pub fn element(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// The element at `index`, mutably. Editing an element changes its
    /// identity; rehash before the next lookup.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.elements.get_mut(index)
    }

    /// All elements in storage order.
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    /// Appends an element without updating the index.
    pub fn add(&mut self, value: Value) {
        self.elements.push(value);
        self.dirty = true;
    }

    /// Removes the element at `index` without updating the index.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.elements.len() {
            self.elements.remove(index);
            self.dirty = true;
        }
    }

    /// Whether a structural mutation has not yet been followed by a rehash.
    pub fn needs_rehash(&self) -> bool {
        self.dirty
    }

    /// Rebuilds the hash index from the current elements.
    pub fn rehash(&mut self) {
        self.index.clear();
        for (position, element) in self.elements.iter().enumerate() {
            if let Some(hash) = element.value_hash() {
                self.index.entry(hash).or_default().push(position);
            }
        }
        self.dirty = false;
    }

    /// Looks up a value through the index.
    pub fn contains(&self, value: &Value) -> bool {
        let Some(hash) = value.value_hash() else {
            return false;
        };
        self.index
            .get(&hash)
            .is_some_and(|positions| {
                positions
                    .iter()
                    .any(|&position| self.elements[position].value_eq(value))
            })
    }
}

/// A hash-indexed collection of key/value pairs.
///
/// Same storage and rehash discipline as [`SetValue`], with the index keyed
/// on the pair's key.
#[derive(Debug, Clone, Default)]
pub struct MapValue {
    pairs: Vec<(Value, Value)>,
    index: HashMap<u64, Vec<usize>>,
    dirty: bool,
}

impl MapValue {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map from pairs and builds the index.
    pub fn from_pairs(pairs: Vec<(Value, Value)>) -> Self {
        let mut map = Self {
            pairs,
            index: HashMap::new(),
            dirty: true,
        };
        map.rehash();
        map
    }

    /// The pair count.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the map has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pair at `index`.
    pub fn pair(&self, index: usize) -> Option<(&Value, &Value)> {
        self.pairs.get(index).map(|(key, value)| (key, value))
    }

    /// The pair at `index`, mutably. Editing a key changes its identity;
    /// rehash before the next lookup.
    pub fn pair_mut(&mut self, index: usize) -> Option<(&mut Value, &mut Value)> {
        self.pairs.get_mut(index).map(|(key, value)| (key, value))
    }

    /// All pairs in storage order.
    pub fn pairs(&self) -> &[(Value, Value)] {
        &self.pairs
    }

    /// Appends a pair without updating the index.
    pub fn add(&mut self, key: Value, value: Value) {
        self.pairs.push((key, value));
        self.dirty = true;
    }

    /// Removes the pair at `index` without updating the index.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.pairs.len() {
            self.pairs.remove(index);
            self.dirty = true;
        }
    }

    /// Whether a structural mutation has not yet been followed by a rehash.
    pub fn needs_rehash(&self) -> bool {
        self.dirty
    }

    /// Rebuilds the hash index from the current keys.
    pub fn rehash(&mut self) {
        self.index.clear();
        for (position, (key, _)) in self.pairs.iter().enumerate() {
            if let Some(hash) = key.value_hash() {
                self.index.entry(hash).or_default().push(position);
            }
        }
        self.dirty = false;
    }

    /// Looks up the value stored under `key` through the index.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let hash = key.value_hash()?;
        self.index.get(&hash)?.iter().find_map(|&position| {
            let (stored_key, stored_value) = &self.pairs[position];
            stored_key.value_eq(key).then_some(stored_value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_lookup_succeeds_immediately_after_rehash() {
        let mut set = SetValue::from_values(vec![Value::I32(1), Value::I32(2)]);
        assert!(set.contains(&Value::I32(2)));

        set.add(Value::I32(7));
        assert!(set.needs_rehash());
        set.rehash();
        assert!(set.contains(&Value::I32(7)));

        set.remove_at(0);
        set.rehash();
        assert!(!set.contains(&Value::I32(1)));
        assert!(set.contains(&Value::I32(2)));
    }

    #[test]
    fn set_index_survives_element_edits_only_after_rehash() {
        let mut set = SetValue::from_values(vec![Value::Str("old".into())]);
        *set.element_mut(0).unwrap() = Value::Str("new".into());
        set.rehash();
        assert!(set.contains(&Value::Str("new".into())));
        assert!(!set.contains(&Value::Str("old".into())));
    }

    #[test]
    fn map_lookup_goes_through_the_key_index() {
        let mut map = MapValue::from_pairs(vec![
            (Value::Name("strength".into()), Value::I32(10)),
            (Value::Name("agility".into()), Value::I32(7)),
        ]);
        assert!(matches!(
            map.get(&Value::Name("agility".into())),
            Some(Value::I32(7))
        ));

        map.add(Value::Name("luck".into()), Value::I32(1));
        map.rehash();
        assert!(matches!(
            map.get(&Value::Name("luck".into())),
            Some(Value::I32(1))
        ));
        assert!(map.get(&Value::Name("wisdom".into())).is_none());
    }

    #[test]
    fn identity_less_values_are_stored_but_never_found() {
        let mut set = SetValue::new();
        set.add(Value::Array(vec![Value::I32(1)]));
        set.rehash();
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&Value::Array(vec![Value::I32(1)])));
    }
}
