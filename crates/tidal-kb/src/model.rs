//! Validated descriptors for classes, members and enums.
//!
//! These are built once from the raw dump (see [`crate::dump`]) and never
//! mutated afterwards.  Type references (`value_type`, `return_type`,
//! `superclass`) are plain names: resolving them may fail, which callers treat
//! as "stop here" rather than as an error.

use std::collections::BTreeSet;

// ── Member kinds ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    /// `Function` in the dump.
    Method,
    Event,
    Callback,
    /// Anything the dump labels with a member type we do not recognise.
    Field,
}

impl MemberKind {
    pub(crate) fn from_dump(member_type: &str) -> Self {
        match member_type {
            "Property" => MemberKind::Property,
            "Function" | "Method" => MemberKind::Method,
            "Event" => MemberKind::Event,
            "Callback" => MemberKind::Callback,
            _ => MemberKind::Field,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberKind::Property => "Property",
            MemberKind::Method => "Method",
            MemberKind::Event => "Event",
            MemberKind::Callback => "Callback",
            MemberKind::Field => "Field",
        }
    }
}

// ── Security ──────────────────────────────────────────────────────────────

/// Access levels for reading and writing a member.
///
/// `None` (the level name, not the absence of one) means unrestricted.  A dump
/// entry without any security descriptor is treated the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Security {
    pub read: String,
    pub write: String,
}

pub const OPEN_SECURITY: &str = "None";

impl Default for Security {
    fn default() -> Self {
        Self {
            read: OPEN_SECURITY.to_string(),
            write: OPEN_SECURITY.to_string(),
        }
    }
}

impl Security {
    pub fn is_open_read(&self) -> bool {
        self.read == OPEN_SECURITY
    }
}

// ── Members ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub kind: MemberKind,
    /// Property type.
    pub value_type: Option<String>,
    /// Method / callback return type.
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
    pub tags: BTreeSet<String>,
    pub security: Security,
}

impl MemberDescriptor {
    /// The type this member evaluates to when used as a chain segment.
    pub fn resolved_type(&self) -> Option<&str> {
        self.value_type
            .as_deref()
            .or(self.return_type.as_deref())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_deprecated(&self) -> bool {
        self.has_tag("Deprecated")
    }

    pub fn is_open_read(&self) -> bool {
        self.security.is_open_read()
    }

    /// `name: Type, other: Type?` as shown in signatures.
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| {
                let opt = if p.optional && !p.type_name.ends_with('?') { "?" } else { "" };
                format!("{}: {}{}", p.name, p.type_name, opt)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A one-line Luau-ish rendering of the member, used for details and hovers.
    pub fn signature(&self, owner: &str) -> String {
        match self.kind {
            MemberKind::Property | MemberKind::Field => format!(
                "{owner}.{}: {}",
                self.name,
                self.value_type.as_deref().unwrap_or("any")
            ),
            MemberKind::Method | MemberKind::Callback => format!(
                "{owner}:{}({}): {}",
                self.name,
                self.parameter_list(),
                self.return_type.as_deref().unwrap_or("()")
            ),
            MemberKind::Event => format!("{owner}.{}: RBXScriptSignal", self.name),
        }
    }
}

// ── Classes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    /// Display only: member resolution never walks up to the superclass.
    pub superclass: Option<String>,
    pub members: Vec<MemberDescriptor>,
    pub tags: BTreeSet<String>,
}

impl ClassDescriptor {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_service(&self) -> bool {
        self.has_tag("Service")
    }

    /// Whether `Instance.new(name)` is legal for this class.
    pub fn is_creatable(&self) -> bool {
        !self.has_tag("NotCreatable") && !self.is_service()
    }

    /// Exact-name lookup, falling back to a case-insensitive match.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.members.iter().find(|m| m.name.eq_ignore_ascii_case(name)))
    }

    /// Exact-name lookup only.
    pub fn member_exact(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn open_read_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|m| m.is_open_read())
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumItem {
    pub name: String,
    pub value: i64,
    pub tags: BTreeSet<String>,
}

impl EnumItem {
    pub fn is_deprecated(&self) -> bool {
        self.tags.contains("Deprecated")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub items: Vec<EnumItem>,
}

impl EnumDescriptor {
    pub fn item(&self, name: &str) -> Option<&EnumItem> {
        self.items.iter().find(|i| i.name == name)
    }
}
