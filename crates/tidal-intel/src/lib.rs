//! Completion, hover and signature help for **Luau** against a Roblox
//! [`KnowledgeBase`](tidal_kb::KnowledgeBase).
//!
//! Everything here works on raw text through the [`SourceText`] trait and
//! produces plain data; the host (an LSP server, an editor plugin) owns the
//! documents and the wire format.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`context`] | cursor-context classifier |
//! | [`chain`] | accessor-chain resolver |
//! | [`scope`] | local declaration scanner |
//! | [`complete`] | [`Analyzer`] and candidate aggregation |
//! | [`hover`], [`signature`] | hover and signature help |
//! | [`builtins`], [`exploits`], [`snippets`] | static tables |
//!
//! # Quick start
//!
//! ```rust
//! use tidal_intel::{Analyzer, Position};
//! use tidal_kb::KnowledgeBase;
//!
//! let kb = KnowledgeBase::from_dump_json(r#"{
//!     "Classes": [{"Name": "Players", "Members": [], "Tags": ["Service"]}],
//!     "Enums": []
//! }"#).unwrap();
//!
//! let src = "local p = game:GetService(\"";
//! let items = Analyzer::new(&kb).complete(src, Position::new(0, src.len() as u32));
//! assert_eq!(items[0].label, "Players");
//! ```

pub mod builtins;
pub mod candidate;
pub mod chain;
pub mod complete;
pub mod context;
pub mod exploits;
pub mod hover;
pub mod scope;
pub mod signature;
pub mod snippets;
pub mod text;

#[cfg(test)]
mod fixture;

pub use candidate::{CandidateKind, CompletionCandidate, SortBucket};
pub use complete::Analyzer;
pub use context::{classify, CompletionContext, StringContext};
pub use hover::HoverInfo;
pub use scope::{LocalSymbol, SymbolKind};
pub use signature::{ParameterInfo, SignatureHelp, SignatureInfo};
pub use text::{Position, Range, SourceText};
