use std::collections::HashMap;
use std::sync::OnceLock;

use crate::docs::ApiDocs;
use crate::dump::parse_dump;
use crate::error::{KbError, Result};
use crate::metadata::{parse_metadata, LibraryMetadata};
use crate::model::{ClassDescriptor, EnumDescriptor};

/// Immutable, read-only view of everything the analysis layer knows about the
/// Roblox API.
///
/// [`KnowledgeBase::default`] is the "not loaded yet" state: every lookup on it
/// returns `None` or an empty slice.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    classes: Vec<ClassDescriptor>,
    class_index: HashMap<String, usize>,
    enums: Vec<EnumDescriptor>,
    enum_index: HashMap<String, usize>,
    services: Vec<String>,
    version: Option<u32>,
    metadata_xml: Option<String>,
    metadata: OnceLock<Result<LibraryMetadata>>,
    docs: ApiDocs,
}

impl KnowledgeBase {
    /// Builds the class/enum tables from an `API-Dump.json` document.
    pub fn from_dump_json(json: &str) -> Result<Self> {
        let dump = parse_dump(json)?;

        let class_index = dump
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        let enum_index = dump
            .enums
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        let services = dump
            .classes
            .iter()
            .filter(|c| c.is_service())
            .map(|c| c.name.clone())
            .collect();

        Ok(Self {
            classes: dump.classes,
            class_index,
            enums: dump.enums,
            enum_index,
            services,
            version: dump.version,
            ..Self::default()
        })
    }

    /// Attaches the standard-library metadata document.  Parsing is deferred
    /// until the first call to [`KnowledgeBase::library`].
    pub fn with_metadata_xml(mut self, xml: impl Into<String>) -> Self {
        self.metadata_xml = Some(xml.into());
        self.metadata = OnceLock::new();
        self
    }

    pub fn with_docs(mut self, docs: ApiDocs) -> Self {
        self.docs = docs;
        self
    }

    // ── State ─────────────────────────────────────────────────────────────

    /// `true` until a dump with at least one class or enum has been loaded.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.enums.is_empty()
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    // ── Classes ───────────────────────────────────────────────────────────

    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.class_index.get(name).map(|&i| &self.classes[i])
    }

    /// Exact match first, then the first class whose name matches ignoring
    /// ASCII case.
    pub fn class_ignore_case(&self, name: &str) -> Option<&ClassDescriptor> {
        self.class(name).or_else(|| {
            self.classes
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
    }

    /// All classes, in dump order.
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    // ── Enums ─────────────────────────────────────────────────────────────

    pub fn enumeration(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enum_index.get(name).map(|&i| &self.enums[i])
    }

    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    // ── Services ──────────────────────────────────────────────────────────

    /// Names of classes tagged `Service`, in dump order.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn is_service(&self, name: &str) -> bool {
        self.class(name).is_some_and(ClassDescriptor::is_service)
    }

    // ── Metadata & docs ───────────────────────────────────────────────────

    /// Standard-library metadata, parsed on first use.
    ///
    /// Without a metadata document this is an empty [`LibraryMetadata`].  A
    /// parse failure is remembered and returned to every caller; it is logged
    /// once, when it first happens.
    pub fn library(&self) -> std::result::Result<&LibraryMetadata, &KbError> {
        self.metadata
            .get_or_init(|| match &self.metadata_xml {
                None => Ok(LibraryMetadata::default()),
                Some(xml) => parse_metadata(xml).inspect_err(|e| {
                    log::warn!("autocomplete metadata unusable: {e}");
                }),
            })
            .as_ref()
    }

    pub fn docs(&self) -> &ApiDocs {
        &self.docs
    }
}
