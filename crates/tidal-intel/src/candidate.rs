//! Completion candidates and the first-wins merge used to combine sources.

use std::collections::HashSet;

use crate::text::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Property,
    Method,
    Event,
    Field,
    EnumMember,
    Enum,
    Variable,
    Function,
    Class,
    Keyword,
    Snippet,
    Module,
}

/// Coarse ordering key; lower buckets sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortBucket {
    Primary = 0,
    Global = 1,
    Local = 2,
    Registry = 3,
    Keyword = 4,
    Snippet = 9,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Unique within one response.
    pub label: String,
    pub kind: CandidateKind,
    pub insert_text: String,
    /// `insert_text` contains `${n:placeholder}` tab stops.
    pub is_snippet: bool,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub sort_bucket: SortBucket,
    /// Text the candidate replaces.
    pub range: Range,
}

impl CompletionCandidate {
    pub fn new(label: impl Into<String>, kind: CandidateKind, range: Range) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            is_snippet: false,
            detail: None,
            documentation: None,
            sort_bucket: SortBucket::Primary,
            range,
        }
    }

    pub fn snippet(mut self, template: impl Into<String>) -> Self {
        self.insert_text = template.into();
        self.is_snippet = true;
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn bucket(mut self, bucket: SortBucket) -> Self {
        self.sort_bucket = bucket;
        self
    }

    /// `<bucket>_<label>`, the host's sort string.
    pub fn sort_text(&self) -> String {
        format!("{}_{}", self.sort_bucket as u8, self.label)
    }
}

/// Ordered candidate list that drops any candidate whose label was already
/// added.  Sources must be pushed in precedence order.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    items: Vec<CompletionCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the label was taken by an earlier source.
    pub fn push(&mut self, candidate: CompletionCandidate) -> bool {
        if self.seen.contains(&candidate.label) {
            return false;
        }
        self.seen.insert(candidate.label.clone());
        self.items.push(candidate);
        true
    }

    pub fn extend(&mut self, candidates: impl IntoIterator<Item = CompletionCandidate>) {
        for candidate in candidates {
            self.push(candidate);
        }
    }

    pub fn into_vec(self) -> Vec<CompletionCandidate> {
        self.items
    }
}
