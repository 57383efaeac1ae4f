//! String table shared by a record and its `d2` string array.
//!
//! Records never embed strings: they refer to entries of the table by
//! [`StringId`]. The producer side ([`StringTable`]) deduplicates strings while
//! a writer runs; the consumer side ([`NameResolver`]) turns ids back into
//! names while a reader walks the record.
//!
//! Local classes (declared inside a function body) have no stable qualified
//! name. Their ids are listed in [`StringTableTypes::local_names`] and their
//! qualified names render with a leading `.`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Index into the string table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringId(pub u32);

impl StringId {
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-string attributes stored in `d1` in front of the record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringTableTypes {
    /// Ids of strings that name local classes, ascending.
    pub local_names: Vec<u32>,
}

/// Builds the string table while a writer runs.
#[derive(Debug, Default)]
pub struct StringTable {
    /// Lookup from (content, is local class) to id.
    lookup: HashMap<(String, bool), StringId>,
    /// Ordered strings for `d2`.
    strings: Vec<String>,
    local_names: Vec<u32>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a plain string (a simple name, a signature, ...).
    pub fn intern(&mut self, s: &str) -> StringId {
        self.intern_with(s, false)
    }

    /// Intern a qualified class name. A leading `.` marks a local class.
    pub fn intern_class_name(&mut self, name: &str) -> StringId {
        match name.strip_prefix('.') {
            Some(local) => self.intern_with(local, true),
            None => self.intern_with(name, false),
        }
    }

    fn intern_with(&mut self, s: &str, local: bool) -> StringId {
        if let Some(&id) = self.lookup.get(&(s.to_string(), local)) {
            return id;
        }

        let id = StringId(self.strings.len() as u32);
        self.strings.push(s.to_string());
        if local {
            self.local_names.push(id.get());
        }
        self.lookup.insert((s.to_string(), local), id);
        id
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Look up a string by its id.
    pub fn get(&self, id: StringId) -> &str {
        &self.strings[id.index()]
    }

    /// Split the table into the `d1` prefix and the `d2` string array.
    pub fn serialize(&self) -> (StringTableTypes, Vec<String>) {
        let types = StringTableTypes {
            local_names: self.local_names.clone(),
        };
        (types, self.strings.clone())
    }

    /// Resolver over the strings interned so far.
    pub fn resolver(&self) -> NameResolver {
        let (types, strings) = self.serialize();
        NameResolver {
            strings,
            local_names: types.local_names.into_iter().collect(),
        }
    }
}

/// Name-resolution context: maps the ids used by a record to strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameResolver {
    strings: Vec<String>,
    local_names: HashSet<u32>,
}

impl NameResolver {
    /// Build a resolver from a decoded `d1` prefix and the `d2` array.
    pub fn new(types: StringTableTypes, strings: Vec<String>) -> Result<Self, CodecError> {
        let resolver = Self {
            local_names: types.local_names.iter().copied().collect(),
            strings,
        };
        for &id in &types.local_names {
            resolver.check(StringId(id))?;
        }
        Ok(resolver)
    }

    /// Number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Fail unless `id` refers to an entry of the table.
    pub fn check(&self, id: StringId) -> Result<(), CodecError> {
        if id.index() < self.strings.len() {
            Ok(())
        } else {
            Err(CodecError::StringIdOutOfRange {
                id: id.get(),
                len: self.strings.len(),
            })
        }
    }

    /// The plain string at `id`.
    ///
    /// Ids of a record are checked when the record is decoded, so lookups
    /// during traversal always hit.
    pub fn string(&self, id: StringId) -> &str {
        &self.strings[id.index()]
    }

    /// The qualified class name at `id`; local classes get a leading `.`.
    pub fn qualified_class_name(&self, id: StringId) -> String {
        let name = self.string(id);
        if self.is_local_class_name(id) {
            format!(".{name}")
        } else {
            name.to_string()
        }
    }

    pub fn is_local_class_name(&self, id: StringId) -> bool {
        self.local_names.contains(&id.get())
    }

    /// The raw string array (`d2`).
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}
