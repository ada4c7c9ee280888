//! Sectioned key/value documents that remember enough of their source text to be written
//! back unchanged.

use indexmap::IndexMap;

pub const TYPE_KEY: &str = "type";
pub const PARENT_KEY: &str = "parent";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// Trailing `; ...` comment, starting at the `;`.
    pub comment: Option<String>,
    /// Comment and blank lines directly above this entry.
    pub leading: Vec<String>,
    /// Source line, re-emitted while the value is unchanged.
    raw: Option<String>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: None,
            leading: Vec::new(),
            raw: None,
        }
    }

    pub(crate) fn from_source(
        key: &str,
        value: &str,
        comment: Option<&str>,
        leading: Vec<String>,
        raw: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.map(str::to_string),
            leading,
            raw: Some(raw.to_string()),
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.value {
            self.value = value;
            self.raw = None;
        }
    }

    /// The line this entry writes.
    pub fn render(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        match &self.comment {
            Some(comment) => format!("{} = {} {}", self.key, self.value, comment),
            None => format!("{} = {}", self.key, self.value),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: String,
    entries: IndexMap<String, Entry>,
    /// Comment and blank lines after the last entry.
    pub trailer: Vec<String>,
    header_raw: Option<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
            trailer: Vec::new(),
            header_raw: None,
        }
    }

    pub(crate) fn from_source(name: &str, header_raw: &str) -> Self {
        Self {
            header_raw: Some(header_raw.to_string()),
            ..Self::new(name)
        }
    }

    pub fn header(&self) -> String {
        match &self.header_raw {
            Some(raw) => raw.clone(),
            None => format!("[{}]", self.name),
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    #[inline]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Updates the value in place, or appends the key at the end of the section.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        match self.entries.get_mut(key) {
            Some(entry) => entry.set_value(value),
            None => {
                self.entries.insert(key.to_string(), Entry::new(key, value));
            }
        }
    }

    /// Removes the key. Comment and blank lines above it move to the next entry, or to the
    /// trailer when it was the last one.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let (index, _, mut entry) = self.entries.shift_remove_full(key)?;
        let above = std::mem::take(&mut entry.leading);
        if !above.is_empty() {
            match self.entries.get_index_mut(index) {
                Some((_, next)) => prepend(&mut next.leading, above),
                None => prepend(&mut self.trailer, above),
            }
        }
        Some(entry)
    }

    /// Fails (returning the entry) when the key already exists.
    pub(crate) fn push_entry(&mut self, entry: Entry) -> Result<(), Entry> {
        if self.entries.contains_key(&entry.key) {
            return Err(entry);
        }
        self.entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.header_raw = None;
    }
}

fn prepend(lines: &mut Vec<String>, mut above: Vec<String>) {
    above.append(lines);
    *lines = above;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    sections: IndexMap<String, Section>,
    /// Comment and blank lines before the first section.
    pub preamble: Vec<String>,
    pub line_ending: LineEnding,
    pub final_newline: bool,
    /// The source started with a UTF-8 byte order mark.
    pub bom: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            sections: IndexMap::new(),
            preamble: Vec::new(),
            line_ending: LineEnding::Lf,
            final_newline: true,
            bom: false,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[inline]
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    #[inline]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Appends a section. Fails (returning it) when the name is taken.
    pub fn push_section(&mut self, section: Section) -> Result<&mut Section, Section> {
        if self.sections.contains_key(&section.name) {
            return Err(section);
        }
        // Keep appended sections visually separated
        if let Some((_, last)) = self.sections.last_mut() {
            if last.trailer.last().is_none_or(|l| !l.trim().is_empty()) {
                last.trailer.push(String::new());
            }
        }
        let entry = self.sections.entry(section.name.clone());
        Ok(entry.or_insert(section))
    }

    /// Appends a parsed section as-is.
    pub(crate) fn push_section_raw(&mut self, section: Section) -> Result<(), Section> {
        if self.sections.contains_key(&section.name) {
            return Err(section);
        }
        self.sections.insert(section.name.clone(), section);
        Ok(())
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key)
    }

    /// Sets `key` in an existing section. Returns `false` when the section is missing.
    pub fn set_value(&mut self, section: &str, key: &str, value: impl Into<String>) -> bool {
        match self.sections.get_mut(section) {
            Some(s) => {
                s.set(key, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_key(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .get_mut(section)
            .and_then(|s| s.remove(key))
            .is_some()
    }

    /// Renames a section in place, keeping its position, keys and their order.
    /// Returns `false` when `old` is missing or `new` is taken.
    pub fn rename_section(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.sections.contains_key(old);
        }
        if !self.sections.contains_key(old) || self.sections.contains_key(new) {
            return false;
        }
        let sections = std::mem::take(&mut self.sections);
        self.sections = sections
            .into_iter()
            .map(|(name, mut section)| {
                if name == old {
                    section.rename(new);
                    (new.to_string(), section)
                } else {
                    (name, section)
                }
            })
            .collect();
        true
    }

    /// Points every `parent = old` at `new`. Returns how many sections changed.
    pub fn rewrite_parent_refs(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for section in self.sections.values_mut() {
            if section.get(PARENT_KEY) == Some(old) {
                section.set(PARENT_KEY, new);
                changed += 1;
            }
        }
        changed
    }
}
