//! Raw `API-Dump.json` shape and its conversion into validated descriptors.
//!
//! The dump is loosely typed in a few places (security may be a string or an
//! object, tags may contain objects, return types may be arrays).  All of that
//! is normalised here so that nothing downstream has to look at JSON again.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{KbError, Result};
use crate::model::{
    ClassDescriptor, EnumDescriptor, EnumItem, MemberDescriptor, MemberKind, Parameter, Security,
};

// ── Raw shape ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDump {
    #[serde(default)]
    classes: Vec<RawClass>,
    #[serde(default)]
    enums: Vec<RawEnum>,
    #[serde(default)]
    version: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawClass {
    name: String,
    #[serde(default)]
    superclass: Option<String>,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default)]
    tags: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMember {
    name: String,
    member_type: String,
    #[serde(default)]
    value_type: Option<RawType>,
    #[serde(default)]
    return_type: Option<Value>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default)]
    tags: Vec<Value>,
    #[serde(default)]
    security: Option<RawSecurity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawType {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawParameter {
    name: String,
    #[serde(rename = "Type")]
    ty: Option<RawType>,
    #[serde(default)]
    default: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSecurity {
    Both(String),
    Split {
        #[serde(rename = "Read")]
        read: String,
        #[serde(rename = "Write")]
        write: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEnum {
    name: String,
    #[serde(default)]
    items: Vec<RawEnumItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEnumItem {
    name: String,
    value: i64,
    #[serde(default)]
    tags: Vec<Value>,
}

// ── Parsed dump ───────────────────────────────────────────────────────────

/// Classes and enums in dump order, duplicates already collapsed.
#[derive(Debug, Default)]
pub struct ParsedDump {
    pub classes: Vec<ClassDescriptor>,
    pub enums: Vec<EnumDescriptor>,
    pub version: Option<u32>,
}

pub fn parse_dump(json: &str) -> Result<ParsedDump> {
    let raw: RawDump = serde_json::from_str(json)?;

    let mut classes: Vec<ClassDescriptor> = Vec::with_capacity(raw.classes.len());
    let mut class_slots: HashMap<String, usize> = HashMap::new();
    for raw_class in raw.classes {
        if raw_class.name.is_empty() {
            return Err(KbError::Schema("class with empty name".into()));
        }
        let class = convert_class(raw_class);
        // Last definition wins, keeping the first definition's position.
        match class_slots.get(&class.name) {
            Some(&slot) => classes[slot] = class,
            None => {
                class_slots.insert(class.name.clone(), classes.len());
                classes.push(class);
            }
        }
    }

    let mut enums: Vec<EnumDescriptor> = Vec::with_capacity(raw.enums.len());
    let mut enum_slots: HashMap<String, usize> = HashMap::new();
    for raw_enum in raw.enums {
        let descriptor = EnumDescriptor {
            name: raw_enum.name,
            items: raw_enum
                .items
                .into_iter()
                .map(|i| EnumItem { name: i.name, value: i.value, tags: string_tags(&i.tags) })
                .collect(),
        };
        match enum_slots.get(&descriptor.name) {
            Some(&slot) => enums[slot] = descriptor,
            None => {
                enum_slots.insert(descriptor.name.clone(), enums.len());
                enums.push(descriptor);
            }
        }
    }

    log::debug!(
        "parsed API dump v{:?}: {} classes, {} enums",
        raw.version,
        classes.len(),
        enums.len()
    );

    Ok(ParsedDump { classes, enums, version: raw.version })
}

fn convert_class(raw: RawClass) -> ClassDescriptor {
    let mut members: Vec<MemberDescriptor> = Vec::with_capacity(raw.members.len());
    for raw_member in raw.members {
        let member = convert_member(raw_member);
        match members.iter().position(|m| m.name == member.name) {
            Some(slot) => members[slot] = member,
            None => members.push(member),
        }
    }

    ClassDescriptor {
        name: raw.name,
        superclass: raw
            .superclass
            .filter(|s| !s.is_empty() && s != "<<<ROOT>>>"),
        members,
        tags: string_tags(&raw.tags),
    }
}

fn convert_member(raw: RawMember) -> MemberDescriptor {
    let kind = MemberKind::from_dump(&raw.member_type);
    let security = match raw.security {
        None => Security::default(),
        Some(RawSecurity::Both(level)) => Security { read: level.clone(), write: level },
        Some(RawSecurity::Split { read, write }) => Security { read, write },
    };

    MemberDescriptor {
        name: raw.name,
        kind,
        value_type: raw.value_type.map(|t| t.name),
        return_type: raw.return_type.as_ref().and_then(return_type_name),
        parameters: raw
            .parameters
            .into_iter()
            .map(|p| {
                let type_name = p.ty.map(|t| t.name).unwrap_or_else(|| "any".to_string());
                Parameter {
                    optional: p.default.is_some() || type_name.ends_with('?'),
                    name: p.name,
                    type_name,
                }
            })
            .collect(),
        tags: string_tags(&raw.tags),
        security,
    }
}

/// `ReturnType` is either `{Name}` or, for tuple returns, `[{Name}, ...]`.
/// The dump spells "returns nothing" as `null`.
fn return_type_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map
            .get("Name")?
            .as_str()
            .filter(|name| *name != "null")
            .map(str::to_string),
        Value::Array(items) => items.first().and_then(return_type_name),
        _ => None,
    }
}

fn string_tags(tags: &[Value]) -> BTreeSet<String> {
    tags.iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
