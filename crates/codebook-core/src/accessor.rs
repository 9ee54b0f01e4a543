//! Read-only lookups over a loaded codebook.
//!
//! [`CodebookAccessor`] owns the codebook and the respondent data table and
//! answers questions about item encodings:
//!
//! - **Enumerations**: group ids, main questions and encodings in file order
//! - **Item metadata**: label and type of a single item
//! - **Options**: the option set used to interpret an item's values, taken
//!   from the item itself or, failing that, from its owning group
//! - **Main question**: the question text of the group owning an item
//!
//! # Duplicate encodings
//!
//! Encodings are expected to be unique across the codebook but this is not
//! enforced. When an encoding appears in several groups, group-scoped
//! lookups ([`CodebookAccessor::main_question`], the group-level options
//! fallback) use the first owning group in file order, while item lookups
//! use the last definition, matching [`CodebookAccessor::items_by_id`].

use std::collections::{BTreeMap, HashMap};

use codebook_ingest::{LoadError, SourceConfig, load_codebook, read_data_table};
use codebook_model::{Codebook, CodebookError, DataTable, Group, Item, OptionSet, Result};
use tracing::{debug, trace, warn};

static NO_OPTIONS: OptionSet = OptionSet::new();

/// Query layer over a codebook and its respondent data.
#[derive(Debug, Clone)]
pub struct CodebookAccessor {
    codebook: Codebook,
    data: DataTable,
    /// Encoding to the index of the first group defining it.
    owners: HashMap<String, usize>,
}

impl CodebookAccessor {
    pub fn new(codebook: Codebook, data: DataTable) -> Self {
        let mut owners: HashMap<String, usize> = HashMap::new();
        for (idx, group) in codebook.groups().iter().enumerate() {
            for encoding in group.items.encodings() {
                let first = *owners.entry(encoding.to_string()).or_insert(idx);
                if first != idx {
                    warn!(
                        encoding,
                        first_group = %codebook.groups()[first].group_id,
                        group = %group.group_id,
                        "encoding defined by more than one group"
                    );
                }
            }
        }
        debug!(
            groups = codebook.len(),
            items = codebook.item_count(),
            encodings = owners.len(),
            data_rows = data.row_count(),
            "codebook accessor ready"
        );
        Self {
            codebook,
            data,
            owners,
        }
    }

    /// Load both input files described by `sources` and build an accessor.
    pub fn from_sources(sources: &SourceConfig) -> std::result::Result<Self, LoadError> {
        let codebook = load_codebook(&sources.codebook)?;
        let data = read_data_table(&sources.data, sources.delimiter)?;
        Ok(Self::new(codebook, data))
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// The respondent data table. None of the lookups read it.
    pub fn data(&self) -> &DataTable {
        &self.data
    }

    /// Group ids in codebook order.
    pub fn group_ids(&self) -> Vec<&str> {
        self.codebook
            .groups()
            .iter()
            .map(|group| group.group_id.as_str())
            .collect()
    }

    /// Main questions in codebook order.
    pub fn main_questions(&self) -> Vec<&str> {
        self.codebook
            .groups()
            .iter()
            .map(|group| group.main_question.as_str())
            .collect()
    }

    /// Every item encoding, group by group. Duplicates are kept.
    pub fn encodings(&self) -> Vec<&str> {
        self.codebook
            .groups()
            .iter()
            .flat_map(|group| group.items.encodings())
            .collect()
    }

    /// All items merged into one map; a later definition replaces an
    /// earlier one.
    pub fn items_by_id(&self) -> BTreeMap<&str, &Item> {
        let mut items = BTreeMap::new();
        for group in self.codebook.groups() {
            for (encoding, item) in group.items.iter() {
                items.insert(encoding, item);
            }
        }
        items
    }

    pub fn contains(&self, encoding: &str) -> bool {
        self.owners.contains_key(encoding)
    }

    fn ensure_known(&self, encoding: &str) -> Result<()> {
        if self.contains(encoding) {
            Ok(())
        } else {
            Err(CodebookError::encoding_not_found(encoding))
        }
    }

    pub fn item(&self, encoding: &str) -> Result<&Item> {
        self.ensure_known(encoding)?;
        self.codebook
            .groups()
            .iter()
            .rev()
            .find_map(|group| group.items.get(encoding))
            .ok_or_else(|| CodebookError::encoding_not_found(encoding))
    }

    pub fn item_label(&self, encoding: &str) -> Result<&str> {
        self.item(encoding).map(|item| item.label.as_str())
    }

    pub fn item_type(&self, encoding: &str) -> Result<&str> {
        self.item(encoding).map(|item| item.item_type.as_str())
    }

    /// First group, in codebook order, whose items contain `encoding`.
    pub fn group_of(&self, encoding: &str) -> Option<&Group> {
        self.owners
            .get(encoding)
            .and_then(|&idx| self.codebook.groups().get(idx))
    }

    /// Options used to interpret the values of `encoding`.
    ///
    /// Item-level options win when non-empty; otherwise the owning group's
    /// options apply; otherwise the result is empty.
    pub fn item_options(&self, encoding: &str) -> Result<&OptionSet> {
        let item = self.item(encoding)?;
        if let Some(options) = item.own_options() {
            return Ok(options);
        }
        let group_options = self.group_of(encoding).and_then(Group::own_options);
        trace!(
            encoding,
            from_group = group_options.is_some(),
            "item has no options of its own"
        );
        Ok(group_options.unwrap_or(&NO_OPTIONS))
    }

    /// Main question of the group owning `encoding`, or `""` when no group
    /// contains it.
    pub fn main_question(&self, encoding: &str) -> &str {
        self.group_of(encoding)
            .map(|group| group.main_question.as_str())
            .unwrap_or("")
    }

    /// Translate a raw data value of `encoding` into its option label.
    pub fn decode_value(&self, encoding: &str, raw: &str) -> Result<Option<&str>> {
        Ok(self.item_options(encoding)?.lookup_text(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accessor() -> CodebookAccessor {
        let codebook: Codebook = vec![
            Group::new("g1", "Q1").with_item("v_1", Item::new("Age", "numeric")),
            Group::new("g2", "Q2").with_item(
                "v_2",
                Item::new("Sex", "categorical")
                    .with_options([("1", "M"), ("2", "F")].into_iter().collect()),
            ),
        ]
        .into();
        CodebookAccessor::new(codebook, DataTable::default())
    }

    #[test]
    fn enumerations_have_no_placeholder() {
        let accessor = accessor();
        assert_eq!(accessor.group_ids(), vec!["g1", "g2"]);
        assert_eq!(accessor.main_questions(), vec!["Q1", "Q2"]);
        assert_eq!(accessor.encodings(), vec!["v_1", "v_2"]);
    }

    #[test]
    fn decode_value_uses_effective_options() {
        let accessor = accessor();
        assert_eq!(accessor.decode_value("v_2", "2").unwrap(), Some("F"));
        assert_eq!(accessor.decode_value("v_2", "2.0").unwrap(), Some("F"));
        assert_eq!(accessor.decode_value("v_1", "34").unwrap(), None);
        assert!(accessor.decode_value("v_3", "1").is_err());
    }

    #[test]
    fn accessor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodebookAccessor>();
    }
}
