use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ParserSetting;

/// Ordered `extension -> parser setting` table
///
/// Matchers are registered in table order, so the table keeps the order in
/// which entries were declared. Inserting an existing extension replaces its
/// setting without moving it.
#[derive(Debug, Clone, Default)]
pub struct ParserTable {
    entries: Vec<(String, ParserSetting)>,
}

impl ParserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, extension: impl Into<String>, setting: ParserSetting) {
        let extension = extension.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == extension) {
            Some((_, slot)) => *slot = setting,
            None => self.entries.push((extension, setting)),
        }
    }

    pub fn get(&self, extension: &str) -> Option<&ParserSetting> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == extension)
            .map(|(_, setting)| setting)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParserSetting)> {
        self.entries.iter().map(|(extension, setting)| (extension.as_str(), setting))
    }

    pub fn extensions(&self) -> Vec<&str> {
        self.entries.iter().map(|(extension, _)| extension.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParserTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (extension, setting) in &self.entries {
            map.serialize_entry(extension, setting)?;
        }
        map.end()
    }
}

struct ParserTableVisitor;

impl<'de> Visitor<'de> for ParserTableVisitor {
    type Value = ParserTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a table of file extensions to parser settings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = ParserTable::new();
        while let Some((extension, setting)) = access.next_entry::<String, ParserSetting>()? {
            table.insert(extension, setting);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for ParserTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ParserTableVisitor)
    }
}
