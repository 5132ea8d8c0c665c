//! Knowledge base for the **Roblox / Luau** API.
//!
//! Holds the three typed tables the completion engine resolves against
//! (classes, enums, services) plus the loosely structured standard-library
//! metadata and reference docs.  Everything is validated once, at load time;
//! afterwards the knowledge base is read-only and every lookup is a total
//! function returning `Option`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`model`] | `ClassDescriptor`, `MemberDescriptor`, `EnumDescriptor`, `Security` |
//! | [`dump`] | `API-Dump.json` ingestion |
//! | [`metadata`] | `AutocompleteMetadata.xml` ingestion |
//! | [`docs`] | reference documentation lookup |
//! | [`error`] | `KbError` |
//!
//! # Quick start
//!
//! ```rust
//! use tidal_kb::KnowledgeBase;
//!
//! let kb = KnowledgeBase::from_dump_json(r#"{
//!     "Classes": [{"Name": "Players", "Members": [], "Tags": ["Service"]}],
//!     "Enums": []
//! }"#).unwrap();
//!
//! assert_eq!(kb.services(), ["Players"]);
//! assert!(KnowledgeBase::default().is_empty());
//! ```

pub mod docs;
pub mod dump;
pub mod error;
mod kb;
pub mod metadata;
pub mod model;

pub use docs::ApiDocs;
pub use error::KbError;
pub use kb::KnowledgeBase;
pub use metadata::LibraryMetadata;
pub use model::{ClassDescriptor, EnumDescriptor, EnumItem, MemberDescriptor, MemberKind, Parameter};
