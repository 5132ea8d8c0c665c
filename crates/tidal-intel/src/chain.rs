//! Accessor-chain resolution against the class graph.
//!
//! `workspace.Camera.` walks `Workspace → Camera` through member types and
//! offers the members of the class it ends on.  Every unresolvable step fails
//! closed with an empty list; the caller then falls back to general completion.

use tidal_kb::metadata::{ItemStruct, LibFunction, LibProperty, LibraryMetadata};
use tidal_kb::{ClassDescriptor, KnowledgeBase, MemberDescriptor, MemberKind};

use crate::builtins::{global_alias, GLOBAL_ALIASES};
use crate::candidate::{CandidateKind, CompletionCandidate};
use crate::text::Range;

/// Maps the first chain segment to its class.  Only global aliases and
/// service names are roots.
pub fn root_class<'k>(kb: &'k KnowledgeBase, root: &str) -> Option<&'k ClassDescriptor> {
    if let Some(class) = global_alias(root).and_then(|a| a.class) {
        return kb.class(class);
    }
    if kb.is_service(root) {
        return kb.class(root);
    }

    let alias = GLOBAL_ALIASES
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(root))
        .and_then(|a| a.class);
    if let Some(class) = alias {
        return kb.class(class);
    }
    kb.class_ignore_case(root).filter(|c| c.is_service())
}

/// The class whose members complete the last segment of `chain`.
///
/// Segments between the root and the last one are looked up as members of the
/// current class and replaced by that member's type.  Superclasses are not
/// searched.
pub fn resolve_class<'k>(kb: &'k KnowledgeBase, chain: &[String]) -> Option<&'k ClassDescriptor> {
    let (root, rest) = chain.split_first()?;
    let mut class = root_class(kb, root)?;
    let Some((_partial, middle)) = rest.split_last() else {
        return Some(class);
    };
    for segment in middle {
        let member = class.member(segment)?;
        class = kb.class(member.resolved_type()?)?;
    }
    Some(class)
}

/// Open-read members of the class `chain` resolves to, or nothing.
pub fn resolve_chain(kb: &KnowledgeBase, chain: &[String], range: Range) -> Vec<CompletionCandidate> {
    let Some(class) = resolve_class(kb, chain) else {
        log::debug!("chain {:?} did not resolve", chain);
        return Vec::new();
    };
    class
        .open_read_members()
        .map(|m| member_candidate(kb, class, m, range))
        .collect()
}

pub fn member_candidate(
    kb: &KnowledgeBase,
    owner: &ClassDescriptor,
    member: &MemberDescriptor,
    range: Range,
) -> CompletionCandidate {
    let kind = match member.kind {
        MemberKind::Property | MemberKind::Callback => CandidateKind::Property,
        MemberKind::Method => CandidateKind::Method,
        MemberKind::Event => CandidateKind::Event,
        MemberKind::Field => CandidateKind::Field,
    };
    let mut candidate = CompletionCandidate::new(&member.name, kind, range)
        .detail(member.signature(&owner.name));

    if member.kind == MemberKind::Method {
        candidate = if member.parameters.is_empty() {
            CompletionCandidate { insert_text: format!("{}()", member.name), ..candidate }
        } else {
            let args = member
                .parameters
                .iter()
                .enumerate()
                .map(|(i, p)| format!("${{{}:{}}}", i + 1, p.name))
                .collect::<Vec<_>>()
                .join(", ");
            candidate.snippet(format!("{}({args})", member.name))
        };
    }

    let mut doc = Vec::new();
    if member.is_deprecated() {
        doc.push("**Deprecated**".to_string());
    }
    if let Some(text) = kb.docs().member(&owner.name, &member.name) {
        doc.push(text.to_string());
    }
    if !doc.is_empty() {
        candidate = candidate.documentation(doc.join("\n\n"));
    }
    candidate
}

// ── Library access ────────────────────────────────────────────────────────────

/// `math.` / `Vector3.` completions from the standard-library metadata.  Only
/// two-segment chains qualify.
pub fn library_members(meta: &LibraryMetadata, chain: &[String], range: Range) -> Vec<CompletionCandidate> {
    let [owner, _partial] = chain else {
        return Vec::new();
    };
    if let Some(lib) = meta.library(owner) {
        let qualifier = format!("{}.", lib.name);
        let functions = lib.functions.iter().map(|f| function_candidate(f, &qualifier, range));
        let properties = lib.properties.iter().map(|p| property_candidate(p, &qualifier, range));
        return functions.chain(properties).collect();
    }
    if let Some(item) = meta.item_struct(owner) {
        let qualifier = format!("{}.", item.name);
        return item
            .constructors()
            .map(|f| function_candidate(f, &qualifier, range))
            .collect();
    }
    Vec::new()
}

/// Instance members of a data type value: `v.Magnitude`, `v:Dot(...)`.
pub fn struct_members(item: &ItemStruct, range: Range) -> Vec<CompletionCandidate> {
    let method_qualifier = format!("{}:", item.name);
    let field_qualifier = format!("{}.", item.name);
    let methods = item.methods().map(|f| CompletionCandidate {
        kind: CandidateKind::Method,
        ..function_candidate(f, &method_qualifier, range)
    });
    let properties = item
        .properties
        .iter()
        .map(|p| property_candidate(p, &field_qualifier, range));
    methods.chain(properties).collect()
}

pub fn function_candidate(f: &LibFunction, qualifier: &str, range: Range) -> CompletionCandidate {
    let candidate = CompletionCandidate::new(&f.name, CandidateKind::Function, range)
        .snippet(f.snippet(&f.name))
        .detail(f.signature(qualifier));
    match &f.description {
        Some(doc) => candidate.documentation(doc),
        None => candidate,
    }
}

fn property_candidate(p: &LibProperty, qualifier: &str, range: Range) -> CompletionCandidate {
    let candidate = CompletionCandidate::new(&p.name, CandidateKind::Field, range)
        .detail(format!("{qualifier}{}: {}", p.name, p.type_name));
    match &p.description {
        Some(doc) => candidate.documentation(doc),
        None => candidate,
    }
}
