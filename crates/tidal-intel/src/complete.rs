//! The analysis entry point and completion aggregation.

use tidal_kb::metadata::LibraryMetadata;
use tidal_kb::{EnumDescriptor, KnowledgeBase};

use crate::builtins::{DATA_TYPES, GLOBAL_ALIASES, GLOBAL_FUNCTIONS, KEYWORDS, PRIMITIVE_TYPES, data_type};
use crate::candidate::{CandidateKind, CandidateSet, CompletionCandidate, SortBucket};
use crate::chain::{function_candidate, library_members, resolve_chain, struct_members};
use crate::context::{classify, CompletionContext, StringContext};
use crate::exploits::EXPLOIT_FUNCTIONS;
use crate::scope::{self, SymbolKind, DEFAULT_SCAN_LIMIT};
use crate::snippets::SNIPPETS;
use crate::text::{line_before, Position, Range, SourceText};

/// Everything one request needs: the knowledge base, the host's module list
/// and the scanner cap.  Cheap to build; the host constructs one per request.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    pub(crate) kb: &'a KnowledgeBase,
    pub(crate) modules: &'a [String],
    pub(crate) scan_limit: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb, modules: &[], scan_limit: DEFAULT_SCAN_LIMIT }
    }

    /// Paths offered inside `require("`.
    pub fn with_modules(mut self, modules: &'a [String]) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = limit;
        self
    }

    pub fn knowledge_base(&self) -> &'a KnowledgeBase {
        self.kb
    }

    /// Completion candidates at `pos`, deduplicated and in precedence order.
    ///
    /// Returns nothing while the knowledge base is still empty.
    pub fn complete<S: SourceText + ?Sized>(&self, src: &S, pos: Position) -> Vec<CompletionCandidate> {
        if self.kb.is_empty() {
            log::debug!("completion requested before the knowledge base loaded");
            return Vec::new();
        }
        let range = src.word_range_at(pos);

        match classify(src, pos) {
            CompletionContext::String(StringContext::ServiceName) => {
                self.service_names(string_range(src, pos))
            }
            CompletionContext::String(StringContext::ClassName) => {
                self.creatable_classes(string_range(src, pos))
            }
            CompletionContext::String(StringContext::RequirePath) => {
                self.module_paths(string_range(src, pos))
            }
            CompletionContext::String(StringContext::Other) | CompletionContext::Comment => Vec::new(),
            CompletionContext::TypeAnnotation => self.type_names(range),
            CompletionContext::EnumItems { name } => match self.kb.enumeration(&name) {
                Some(e) => self.enum_items(e, range),
                None => self.general(src, range),
            },
            CompletionContext::EnumNames => self.enum_names(range),
            CompletionContext::Accessor { chain } => {
                let members = resolve_chain(self.kb, &chain, range);
                if !members.is_empty() {
                    return members;
                }
                let library = match self.kb.library() {
                    Ok(meta) => {
                        let members = library_members(meta, &chain, range);
                        if members.is_empty() {
                            self.local_struct_members(meta, src, &chain, range)
                        } else {
                            members
                        }
                    }
                    Err(_) => Vec::new(),
                };
                if !library.is_empty() {
                    return library;
                }
                self.general(src, range)
            }
            CompletionContext::General => self.general(src, range),
        }
    }

    /// `v.` / `v:` where `v` is a local holding a data type value.
    fn local_struct_members<S: SourceText + ?Sized>(
        &self,
        meta: &LibraryMetadata,
        src: &S,
        chain: &[String],
        range: Range,
    ) -> Vec<CompletionCandidate> {
        let [root, _partial] = chain else {
            return Vec::new();
        };
        scope::scan(src.full_text(), self.scan_limit)
            .into_iter()
            .find(|sym| sym.name == *root)
            .and_then(|sym| meta.item_struct(&sym.inferred_type))
            .map(|item| struct_members(item, range))
            .unwrap_or_default()
    }

    // ── Short-circuit modes ───────────────────────────────────────────────────

    fn service_names(&self, range: Range) -> Vec<CompletionCandidate> {
        self.kb
            .services()
            .iter()
            .map(|name| {
                let candidate = CompletionCandidate::new(name, CandidateKind::Class, range).detail("service");
                match self.kb.docs().class(name) {
                    Some(doc) => candidate.documentation(doc),
                    None => candidate,
                }
            })
            .collect()
    }

    fn creatable_classes(&self, range: Range) -> Vec<CompletionCandidate> {
        self.kb
            .classes()
            .iter()
            .filter(|c| c.is_creatable())
            .map(|c| {
                let detail = match &c.superclass {
                    Some(superclass) => format!("class {} : {superclass}", c.name),
                    None => format!("class {}", c.name),
                };
                CompletionCandidate::new(&c.name, CandidateKind::Class, range).detail(detail)
            })
            .collect()
    }

    fn module_paths(&self, range: Range) -> Vec<CompletionCandidate> {
        self.modules
            .iter()
            .map(|path| CompletionCandidate::new(path, CandidateKind::Module, range).detail("module"))
            .collect()
    }

    fn type_names(&self, range: Range) -> Vec<CompletionCandidate> {
        let mut set = CandidateSet::new();
        set.extend(PRIMITIVE_TYPES.iter().map(|t| {
            CompletionCandidate::new(t.name, CandidateKind::Keyword, range).documentation(t.doc)
        }));
        set.extend(DATA_TYPES.iter().map(|t| {
            CompletionCandidate::new(t.name, CandidateKind::Class, range)
                .documentation(t.doc)
                .bucket(SortBucket::Global)
        }));
        set.extend(self.kb.classes().iter().map(|c| {
            CompletionCandidate::new(&c.name, CandidateKind::Class, range).bucket(SortBucket::Global)
        }));
        set.into_vec()
    }

    fn enum_items(&self, e: &EnumDescriptor, range: Range) -> Vec<CompletionCandidate> {
        e.items
            .iter()
            .map(|item| {
                let candidate = CompletionCandidate::new(&item.name, CandidateKind::EnumMember, range)
                    .detail(format!("Enum.{}.{} = {}", e.name, item.name, item.value));
                let mut doc = Vec::new();
                if item.is_deprecated() {
                    doc.push("**Deprecated**");
                }
                doc.extend(self.kb.docs().enum_item(&e.name, &item.name));
                if doc.is_empty() { candidate } else { candidate.documentation(doc.join("\n\n")) }
            })
            .collect()
    }

    fn enum_names(&self, range: Range) -> Vec<CompletionCandidate> {
        self.kb
            .enums()
            .iter()
            .map(|e| {
                let candidate = CompletionCandidate::new(&e.name, CandidateKind::Enum, range)
                    .detail(format!("Enum.{} ({} items)", e.name, e.items.len()));
                match self.kb.docs().enumeration(&e.name) {
                    Some(doc) => candidate.documentation(doc),
                    None => candidate,
                }
            })
            .collect()
    }

    // ── General aggregation ───────────────────────────────────────────────────

    /// Every source merged in precedence order; the first source to offer a
    /// label keeps it.
    fn general<S: SourceText + ?Sized>(&self, src: &S, range: Range) -> Vec<CompletionCandidate> {
        let mut set = CandidateSet::new();

        // 1. standard-library metadata
        match self.kb.library() {
            Ok(meta) => {
                for lib in meta.libraries.iter().filter(|l| l.name != "_G") {
                    let candidate = CompletionCandidate::new(&lib.name, CandidateKind::Module, range)
                        .detail(format!("library {}", lib.name));
                    set.push(match &lib.description {
                        Some(doc) => candidate.documentation(doc),
                        None => candidate,
                    });
                }
                if let Some(globals) = meta.library("_G") {
                    set.extend(globals.functions.iter().map(|f| function_candidate(f, "", range)));
                }
                for item in &meta.structs {
                    let candidate = CompletionCandidate::new(&item.name, CandidateKind::Class, range)
                        .detail(format!("type {}", item.name));
                    set.push(match data_type(&item.name) {
                        Some(t) => candidate.documentation(t.doc),
                        None => candidate,
                    });
                }
                for item in &meta.structs {
                    for ctor in item.constructors() {
                        let callee = format!("{}.{}", item.name, ctor.name);
                        let candidate = CompletionCandidate::new(&callee, CandidateKind::Function, range)
                            .snippet(ctor.snippet(&callee))
                            .detail(ctor.signature(&format!("{}.", item.name)));
                        set.push(match &ctor.description {
                            Some(doc) => candidate.documentation(doc),
                            None => candidate,
                        });
                    }
                }
            }
            Err(e) => log::debug!("skipping standard-library completions: {e}"),
        }

        // 2. global types, aliases, functions
        set.extend(DATA_TYPES.iter().map(|t| {
            CompletionCandidate::new(t.name, CandidateKind::Class, range)
                .detail(format!("type {}", t.name))
                .documentation(t.doc)
                .bucket(SortBucket::Global)
        }));
        set.extend(GLOBAL_ALIASES.iter().map(|a| {
            CompletionCandidate::new(a.name, CandidateKind::Variable, range)
                .detail(match a.class {
                    Some(class) => format!("{}: {class}", a.name),
                    None => format!("{}: table", a.name),
                })
                .documentation(a.doc)
                .bucket(SortBucket::Global)
        }));
        set.extend(GLOBAL_FUNCTIONS.iter().map(|f| {
            CompletionCandidate::new(f.name, CandidateKind::Function, range)
                .detail(f.signature)
                .documentation(self.kb.docs().global(f.name).unwrap_or(f.doc))
                .bucket(SortBucket::Global)
        }));

        // 3. locals
        for sym in scope::scan(src.full_text(), self.scan_limit) {
            let kind = match sym.kind {
                SymbolKind::Variable => CandidateKind::Variable,
                SymbolKind::Function => CandidateKind::Function,
            };
            set.push(
                CompletionCandidate::new(&sym.name, kind, range)
                    .detail(format!("local {}: {}", sym.name, sym.inferred_type))
                    .bucket(SortBucket::Local),
            );
        }

        // 4. executor registry
        set.extend(EXPLOIT_FUNCTIONS.iter().map(|f| {
            CompletionCandidate::new(f.name, CandidateKind::Function, range)
                .detail(format!("[{}] {}", f.category.label(), f.signature))
                .documentation(f.doc)
                .bucket(SortBucket::Registry)
        }));

        // 5. snippets, then keywords
        set.extend(SNIPPETS.iter().map(|s| {
            CompletionCandidate::new(s.label, CandidateKind::Snippet, range)
                .snippet(s.body)
                .detail(format!("[{}] {}", s.category, s.prefix))
                .documentation(s.description)
                .bucket(SortBucket::Snippet)
        }));
        set.extend(KEYWORDS.iter().map(|k| {
            CompletionCandidate::new(k.name, CandidateKind::Keyword, range)
                .documentation(k.doc)
                .bucket(SortBucket::Keyword)
        }));

        set.into_vec()
    }
}

/// From just after the opening quote to the cursor.
fn string_range<S: SourceText + ?Sized>(src: &S, pos: Position) -> Range {
    let before = line_before(src, pos);
    let start = before.rfind(['"', '\'', '`']).map_or(0, |i| i + 1);
    let end = Position::new(pos.line, before.len() as u32);
    Range::new(Position::new(pos.line, start as u32), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    fn at_end(kb: &KnowledgeBase, text: &str) -> Vec<CompletionCandidate> {
        let line = text.lines().count().saturating_sub(1) as u32;
        let col = text.lines().last().unwrap_or("").len() as u32;
        Analyzer::new(kb).complete(text, Position::new(line, col))
    }

    fn labels(items: &[CompletionCandidate]) -> Vec<&str> {
        items.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn get_service_string_offers_exactly_the_services() {
        let kb = fixture::kb();
        let items = at_end(&kb, "local p = game:GetService(\"");
        assert_eq!(labels(&items), kb.services());
        assert_eq!(labels(&items), ["Workspace", "Players", "Lighting"]);
        assert_eq!(items[0].range, Range::new(Position::new(0, 27), Position::new(0, 27)));
    }

    #[test]
    fn instance_new_offers_creatable_classes() {
        let kb = fixture::kb();
        let items = at_end(&kb, "Instance.new('Pa");
        let names = labels(&items);
        assert!(names.contains(&"Part"));
        assert!(names.contains(&"Folder"));
        assert!(!names.contains(&"Instance"));
        assert!(!names.contains(&"Workspace"));
        assert_eq!(items[0].range.start.character, 14);
    }

    #[test]
    fn require_offers_host_modules() {
        let kb = fixture::kb();
        let modules = vec!["./util".to_string(), "./net/client".to_string()];
        let text = "local u = require(\"./";
        let items = Analyzer::new(&kb)
            .with_modules(&modules)
            .complete(text, Position::new(0, text.len() as u32));
        assert_eq!(labels(&items), ["./util", "./net/client"]);
    }

    #[test]
    fn other_strings_and_comments_offer_nothing() {
        let kb = fixture::kb();
        assert!(at_end(&kb, "print(\"game.").is_empty());
        assert!(at_end(&kb, "-- game.").is_empty());
        assert!(at_end(&kb, "--[[\nlocal").is_empty());
    }

    #[test]
    fn enum_path_offers_only_items() {
        let kb = fixture::kb();
        let items = at_end(&kb, "if key == Enum.KeyCode.");
        assert_eq!(labels(&items), ["Space", "A", "B"]);
        assert!(items.iter().all(|c| c.kind == CandidateKind::EnumMember));
        assert_eq!(items[0].documentation.as_deref(), Some("The space bar."));
    }

    #[test]
    fn enum_root_offers_enum_names() {
        let kb = fixture::kb();
        let items = at_end(&kb, "local m = Enum.");
        assert_eq!(labels(&items), ["KeyCode", "Material", "PartType"]);
    }

    #[test]
    fn deprecated_enum_items_are_flagged() {
        let kb = fixture::kb();
        let items = at_end(&kb, "Enum.Material.");
        let pebble = items.iter().find(|c| c.label == "Pebble").unwrap();
        assert_eq!(pebble.documentation.as_deref(), Some("**Deprecated**"));
    }

    #[test]
    fn type_position_offers_types_only() {
        let kb = fixture::kb();
        let names_owned = at_end(&kb, "local speed: ");
        let names = labels(&names_owned);
        assert!(names.contains(&"number"));
        assert!(names.contains(&"Vector3"));
        assert!(names.contains(&"Part"));
        assert!(!names.contains(&"local"));
        assert!(!names.contains(&"print"));
    }

    #[test]
    fn resolved_chain_short_circuits() {
        let kb = fixture::kb();
        let items = at_end(&kb, "workspace.");
        assert_eq!(labels(&items), ["Gravity", "CurrentCamera", "FilteringEnabled", "Raycast"]);
    }

    #[test]
    fn library_access_after_dot() {
        let kb = fixture::kb();
        let items = at_end(&kb, "local x = math.");
        assert_eq!(labels(&items), ["clamp", "floor", "pi"]);
        let clamp = &items[0];
        assert!(clamp.is_snippet);
        assert_eq!(clamp.insert_text, "clamp(${1:x}, ${2:min}, ${3:max})");
    }

    #[test]
    fn data_type_locals_offer_struct_members() {
        let kb = fixture::kb();
        let items = at_end(&kb, "local v = Vector3.new(1, 2, 3)\nprint(v:");
        assert_eq!(labels(&items), ["Dot", "Magnitude"]);
        assert_eq!(items[0].insert_text, "Dot(${1:other})");

        let items = at_end(&kb, "local v: Vector3 = get()\nv.Mag");
        assert!(labels(&items).contains(&"Magnitude"));

        let items = at_end(&kb, "local n = 5\nn.");
        assert!(!labels(&items).contains(&"Magnitude"));
    }

    #[test]
    fn unresolved_chain_falls_through_to_general() {
        let kb = fixture::kb();
        let items = at_end(&kb, "workspace.NoSuchThing.Fo");
        let names = labels(&items);
        assert!(names.contains(&"workspace"));
        assert!(names.contains(&"while"));
        assert!(!names.contains(&"Gravity"));
    }

    #[test]
    fn standard_library_wins_label_collisions() {
        let kb = fixture::kb();
        let items = at_end(&kb, "pri");
        let prints: Vec<_> = items.iter().filter(|c| c.label == "print").collect();
        assert_eq!(prints.len(), 1);
        assert_eq!(prints[0].sort_bucket, SortBucket::Primary);
        assert_eq!(
            prints[0].documentation.as_deref(),
            Some("Prints all provided values to the output.")
        );
        assert_eq!(prints[0].range, Range::new(Position::new(0, 0), Position::new(0, 3)));
    }

    #[test]
    fn general_merges_every_source() {
        let kb = fixture::kb();
        let items = at_end(&kb, "local foo = Vector3.new(1, 2, 3)\n");
        let find = |label: &str| items.iter().find(|c| c.label == label).unwrap();

        assert_eq!(find("math").kind, CandidateKind::Module);
        assert_eq!(find("Vector3.new").insert_text, "Vector3.new(${1:x}, ${2:y}, ${3:z})");
        assert_eq!(find("game").sort_bucket, SortBucket::Global);
        assert_eq!(find("foo").detail.as_deref(), Some("local foo: Vector3"));
        assert_eq!(find("foo").sort_bucket, SortBucket::Local);
        assert_eq!(find("getgenv").detail.as_deref(), Some("[Environment] getgenv(): table"));
        assert_eq!(find("for loop ipairs").sort_bucket, SortBucket::Snippet);
        assert_eq!(find("repeat").kind, CandidateKind::Keyword);

        let mut seen = std::collections::HashSet::new();
        assert!(items.iter().all(|c| seen.insert(c.label.clone())));
        assert!(items
            .iter()
            .filter(|c| c.kind == CandidateKind::Snippet)
            .all(|c| c.sort_text().starts_with("9_")));
    }

    #[test]
    fn broken_metadata_does_not_abort_aggregation() {
        let kb = fixture::kb_without_metadata().with_metadata_xml("<StudioAutocomplete><unclosed>");
        let items = at_end(&kb, "pri");
        let print = items.iter().find(|c| c.label == "print").unwrap();
        assert_eq!(print.sort_bucket, SortBucket::Global);
        assert!(items.iter().any(|c| c.label == "Vector3"));
        assert!(!items.iter().any(|c| c.label == "math"));
    }

    #[test]
    fn empty_knowledge_base_completes_nothing() {
        let kb = KnowledgeBase::default();
        for text in ["", "game.", "game:GetService(\"", "Enum.KeyCode.", "local x = 1\nx"] {
            assert!(at_end(&kb, text).is_empty(), "{text:?}");
        }
    }
}
