//! Codebook records.
//!
//! A codebook is an ordered list of question groups. Each group has a main
//! question and the items (sub-questions) that belong to it, keyed by their
//! encoding, e.g. `v_0071`.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::OptionSet;

/// A single item (sub-question) in the codebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Question text shown for this item.
    pub label: String,
    /// Item type tag, e.g. `categorical`, `numeric` or `text`.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Item-level options. Take precedence over the group's options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSet>,
}

impl Item {
    pub fn new(label: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            item_type: item_type.into(),
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = Some(options);
        self
    }

    /// Item-level options, if present and non-empty.
    pub fn own_options(&self) -> Option<&OptionSet> {
        self.options.as_ref().filter(|options| !options.is_empty())
    }
}

/// Items of a group in file order.
///
/// The source format stores items as a list of single-key objects
/// (`[{"v_1": {...}}, {"v_2": {...}}]`). Every key of every element is kept,
/// so an element with several keys contributes all of them. A plain object
/// is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMap {
    entries: Vec<(String, Item)>,
}

impl ItemMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, encoding: impl Into<String>, item: Item) {
        self.entries.push((encoding.into(), item));
    }

    pub fn contains(&self, encoding: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == encoding)
    }

    /// Last definition of `encoding` in this group.
    pub fn get(&self, encoding: &str) -> Option<&Item> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == encoding)
            .map(|(_, item)| item)
    }

    pub fn encodings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.entries.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Item)> for ItemMap {
    fn from_iter<I: IntoIterator<Item = (K, Item)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(encoding, item)| (encoding.into(), item))
                .collect(),
        }
    }
}

struct SingleEntry<'a>(&'a str, &'a Item);

impl Serialize for SingleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

impl Serialize for ItemMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (encoding, item) in &self.entries {
            seq.serialize_element(&SingleEntry(encoding, item))?;
        }
        seq.end()
    }
}

fn read_entries<'de, A: MapAccess<'de>>(
    mut map: A,
    entries: &mut Vec<(String, Item)>,
) -> Result<(), A::Error> {
    while let Some((encoding, item)) = map.next_entry::<String, Item>()? {
        entries.push((encoding, item));
    }
    Ok(())
}

/// One element of the item list; keeps key order.
struct ItemObject(Vec<(String, Item)>);

impl<'de> Deserialize<'de> for ItemObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = ItemObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping encodings to items")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                read_entries(map, &mut entries)?;
                Ok(ItemObject(entries))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl<'de> Deserialize<'de> for ItemMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemMapVisitor;

        impl<'de> Visitor<'de> for ItemMapVisitor {
            type Value = ItemMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of item objects or an object of items")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(ItemObject(object)) = seq.next_element()? {
                    entries.extend(object);
                }
                Ok(ItemMap { entries })
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                read_entries(map, &mut entries)?;
                Ok(ItemMap { entries })
            }
        }

        deserializer.deserialize_any(ItemMapVisitor)
    }
}

/// A question group: one main question and the items asked under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: String,
    pub main_question: String,
    pub items: ItemMap,
    /// Group-level default options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSet>,
}

impl Group {
    pub fn new(group_id: impl Into<String>, main_question: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            main_question: main_question.into(),
            items: ItemMap::new(),
            options: None,
        }
    }

    #[must_use]
    pub fn with_item(mut self, encoding: impl Into<String>, item: Item) -> Self {
        self.items.push(encoding, item);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = Some(options);
        self
    }

    /// Group-level options, if present and non-empty.
    pub fn own_options(&self) -> Option<&OptionSet> {
        self.options.as_ref().filter(|options| !options.is_empty())
    }
}

/// The full codebook in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Codebook {
    groups: Vec<Group>,
}

impl Codebook {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of item definitions, duplicates included.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

impl From<Vec<Group>> for Codebook {
    fn from(groups: Vec<Group>) -> Self {
        Self::new(groups)
    }
}

impl FromIterator<Group> for Codebook {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
