//! Reference documentation (`api-docs/mini/en-us.json`).
//!
//! Keys follow the upstream scheme:
//! `@roblox/globaltype/Part`, `@roblox/globaltype/Part.Anchored`,
//! `@roblox/enum/KeyCode`, `@roblox/enum/KeyCode.A`, `@roblox/global/print`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    documentation: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApiDocs {
    entries: HashMap<String, String>,
}

impl ApiDocs {
    pub fn parse(json: &str) -> Result<Self> {
        let raw: HashMap<String, RawEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .filter_map(|(key, entry)| {
                let doc = entry.documentation?;
                let doc = doc.trim();
                (!doc.is_empty()).then(|| (key, doc.to_string()))
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn class(&self, class: &str) -> Option<&str> {
        self.get(&format!("@roblox/globaltype/{class}"))
    }

    pub fn member(&self, class: &str, member: &str) -> Option<&str> {
        self.get(&format!("@roblox/globaltype/{class}.{member}"))
    }

    pub fn enumeration(&self, name: &str) -> Option<&str> {
        self.get(&format!("@roblox/enum/{name}"))
    }

    pub fn enum_item(&self, name: &str, item: &str) -> Option<&str> {
        self.get(&format!("@roblox/enum/{name}.{item}"))
    }

    pub fn global(&self, name: &str) -> Option<&str> {
        self.get(&format!("@roblox/global/{name}"))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}
