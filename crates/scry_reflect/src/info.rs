use bitflags::bitflags;

use crate::{ClassId, FieldInfo};

bitflags! {
    /// Capability markers a class declares for the inspector.
    ///
    /// Flags apply to exactly one inheritance level: a mutable subclass does
    /// not make its parent's own fields editable, and vice versa. Each level
    /// is queried independently while walking the chain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassFlags: u8 {
        /// The own fields of this class level may be edited when drawn.
        const MUTABLE = 1 << 0;
        /// The class replaces default field-by-field rendering with a
        /// custom drawer registered on the inspector side.
        const CUSTOM_DRAWER = 1 << 1;
    }
}

/// Metadata for one class: its own declared fields (excluding inherited
/// ones), an optional parent, and capability flags.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    name: String,
    parent: Option<ClassId>,
    fields: Vec<FieldInfo>,
    flags: ClassFlags,
}

impl ClassInfo {
    /// Creates a root class with no fields and no flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            flags: ClassFlags::empty(),
        }
    }

    /// Sets the immediate parent class.
    pub fn with_parent(mut self, parent: ClassId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends an own field.
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the capability flags.
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immediate parent class, if any.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// The fields this class level declares itself, excluding inherited ones.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// The capability flags of this level.
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    /// Whether this exact level opts into editing.
    pub fn is_mutable(&self) -> bool {
        self.flags.contains(ClassFlags::MUTABLE)
    }

    /// Whether this exact level declares a custom drawer.
    pub fn has_custom_drawer(&self) -> bool {
        self.flags.contains(ClassFlags::CUSTOM_DRAWER)
    }
}

/// Metadata for a plain aggregate: a name and its fields.
#[derive(Debug, Clone)]
pub struct StructInfo {
    name: String,
    fields: Vec<FieldInfo>,
}

impl StructInfo {
    /// Creates a struct with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    /// The struct name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields, in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }
}

/// One `(name, underlying value)` entry of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    name: String,
    value: i64,
}

impl EnumEntry {
    /// The entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying integer value.
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Metadata for an enum: an ordered list of entries.
///
/// Registration auto-appends a trailing `<NAME>_MAX` sentinel entry,
/// mirroring the host reflection systems this model stands in for. Drawers
/// must never offer the sentinel; [`EnumInfo::selectable_count`] is the
/// entry count with the sentinel excluded.
///
/// Underlying values are not assumed contiguous; all index/value mapping
/// goes through the entry list.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    name: String,
    entries: Vec<EnumEntry>,
}

impl EnumInfo {
    /// Creates enum metadata from `(name, value)` pairs, appending the
    /// sentinel entry with a value one past the largest defined value.
    pub fn new(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (impl Into<String>, i64)>,
    ) -> Self {
        let name = name.into();
        let mut entries: Vec<EnumEntry> = entries
            .into_iter()
            .map(|(entry_name, value)| EnumEntry {
                name: entry_name.into(),
                value,
            })
            .collect();
        let sentinel_value = entries.iter().map(EnumEntry::value).max().unwrap_or(-1) + 1;
        entries.push(EnumEntry {
            name: format!("{}_MAX", name.to_uppercase()),
            value: sentinel_value,
        });
        Self { name, entries }
    }

    /// The enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The total entry count, sentinel included.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The number of entries a drawer may offer: all but the sentinel.
    pub fn selectable_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// The entry at `index`, sentinel included.
    pub fn entry_at(&self, index: usize) -> Option<&EnumEntry> {
        self.entries.get(index)
    }

    /// The display index of the entry with the given underlying value.
    pub fn index_of_value(&self, value: i64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.value == value)
    }

    /// The underlying value of the entry at `index`.
    pub fn value_at(&self, index: usize) -> Option<i64> {
        self.entries.get(index).map(EnumEntry::value)
    }

    /// The value a default-constructed field of this enum takes: the first
    /// defined entry, so defaults always round-trip through the metadata.
    pub fn default_value(&self) -> i64 {
        if self.selectable_count() > 0 {
            self.entries[0].value
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon_kind() -> EnumInfo {
        EnumInfo::new("WeaponKind", [("Sword", 0), ("Bow", 3), ("Staff", 10)])
    }

    #[test]
    fn sentinel_is_appended_past_the_largest_value() {
        let info = weapon_kind();
        assert_eq!(info.entry_count(), 4);
        assert_eq!(info.selectable_count(), 3);
        let sentinel = info.entry_at(3).unwrap();
        assert_eq!(sentinel.name(), "WEAPONKIND_MAX");
        assert_eq!(sentinel.value(), 11);
    }

    #[test]
    fn index_and_value_round_trip_for_every_defined_entry() {
        let info = weapon_kind();
        for index in 0..info.selectable_count() {
            let value = info.value_at(index).unwrap();
            assert_eq!(info.index_of_value(value), Some(index));
        }
    }

    #[test]
    fn non_contiguous_values_map_through_metadata() {
        let info = weapon_kind();
        assert_eq!(info.index_of_value(10), Some(2));
        assert_eq!(info.index_of_value(1), None);
    }

    #[test]
    fn empty_enum_still_carries_a_sentinel() {
        let info = EnumInfo::new("Empty", Vec::<(String, i64)>::new());
        assert_eq!(info.entry_count(), 1);
        assert_eq!(info.selectable_count(), 0);
        assert_eq!(info.default_value(), 0);
    }

    #[test]
    fn flags_apply_per_level() {
        let flags = ClassFlags::MUTABLE | ClassFlags::CUSTOM_DRAWER;
        assert!(flags.contains(ClassFlags::MUTABLE));
        assert!(ClassFlags::default().is_empty());
    }
}
