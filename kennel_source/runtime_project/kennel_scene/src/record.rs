use indexmap::IndexMap;

use crate::document::{Document, PARENT_KEY, TYPE_KEY};

/// A section projected into the pieces the builder needs.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub name: String,
    /// Empty when the section has no `type` key.
    pub type_name: String,
    pub parent: Option<String>,
    /// Every other key, in document order.
    pub properties: IndexMap<String, String>,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            parent: None,
            properties: IndexMap::new(),
        }
    }
}

pub fn parse_records(document: &Document) -> Vec<NodeRecord> {
    document
        .sections()
        .map(|section| {
            let mut record = NodeRecord::new(
                section.name.as_str(),
                section.get(TYPE_KEY).unwrap_or_default(),
            );
            record.parent = section
                .get(PARENT_KEY)
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            record.properties = section
                .entries()
                .filter(|e| e.key != TYPE_KEY && e.key != PARENT_KEY)
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect();
            record
        })
        .collect()
}
