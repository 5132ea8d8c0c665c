//! Knowledge-base loading: remote, then local cache, then bundled backup.

use std::fmt;
use std::path::{Path, PathBuf};

use tidal_kb::{ApiDocs, KbError, KnowledgeBase};

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid document: {0}")]
    Kb(#[from] KbError),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// The three upstream documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    ApiDump,
    Metadata,
    ApiDocs,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Document::ApiDump => "API-Dump.json",
            Document::Metadata => "AutocompleteMetadata.xml",
            Document::ApiDocs => "api-docs.json",
        }
    }

    fn url(self, config: &ServerConfig) -> &str {
        match self {
            Document::ApiDump => &config.api_dump_url,
            Document::Metadata => &config.metadata_url,
            Document::ApiDocs => &config.api_docs_url,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Where a document ended up coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Cache,
    Backup,
}

pub struct Loader {
    config: ServerConfig,
    client: reqwest::Client,
}

impl Loader {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(concat!("tidal-lsp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    /// Never fails: anything that cannot be obtained is left out, down to an
    /// empty knowledge base.
    pub async fn load(&self) -> KnowledgeBase {
        let Some((mut kb, source)) = self.fetch(Document::ApiDump, parse_dump).await else {
            log::warn!("no usable API dump; completions stay empty");
            return KnowledgeBase::default();
        };
        log::info!(
            "API dump v{} loaded from {source:?}: {} classes, {} enums",
            kb.version().map_or_else(|| "?".to_string(), |v| v.to_string()),
            kb.classes().len(),
            kb.enums().len()
        );

        if let Some((xml, source)) = self.fetch(Document::Metadata, check_metadata).await {
            log::info!("autocomplete metadata loaded from {source:?}");
            kb = kb.with_metadata_xml(xml);
        }
        if let Some((docs, source)) = self.fetch(Document::ApiDocs, parse_docs).await {
            log::info!("API docs loaded from {source:?}: {} entries", docs.len());
            kb = kb.with_docs(docs);
        }
        kb
    }

    /// First source whose text `parse` accepts.  A remote document is cached
    /// only after it has been accepted.
    async fn fetch<T>(&self, doc: Document, parse: fn(&str) -> Result<T>) -> Option<(T, Source)> {
        if self.config.offline {
            log::debug!("{doc}: offline, skipping remote");
        } else {
            match self.fetch_remote(doc, parse).await {
                Ok((value, text)) => {
                    if let Some(dir) = &self.config.cache_dir {
                        if let Err(e) = write_cache(dir, doc, &text).await {
                            log::warn!("{doc}: could not update cache: {e}");
                        }
                    }
                    return Some((value, Source::Remote));
                }
                Err(e) => log::warn!("{doc}: remote fetch failed: {e}"),
            }
        }

        let fallbacks = [
            (Source::Cache, &self.config.cache_dir),
            (Source::Backup, &self.config.backup_dir),
        ];
        for (source, dir) in fallbacks {
            let Some(dir) = dir else { continue };
            match read_local(&dir.join(doc.file_name()), parse).await {
                Ok(value) => return Some((value, source)),
                Err(e) => log::warn!("{doc}: {source:?} copy unusable: {e}"),
            }
        }
        None
    }

    async fn fetch_remote<T>(&self, doc: Document, parse: fn(&str) -> Result<T>) -> Result<(T, String)> {
        let response = self.client.get(doc.url(&self.config)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        let value = parse(&text)?;
        Ok((value, text))
    }
}

async fn read_local<T>(path: &Path, parse: fn(&str) -> Result<T>) -> Result<T> {
    let text = tokio::fs::read_to_string(path).await?;
    parse(&text)
}

async fn write_cache(dir: &Path, doc: Document, text: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(doc.file_name());
    tokio::fs::write(&path, text).await?;
    Ok(path)
}

// ── Validation ────────────────────────────────────────────────────────────────

fn parse_dump(text: &str) -> Result<KnowledgeBase> {
    let kb = KnowledgeBase::from_dump_json(text)?;
    if kb.classes().is_empty() {
        return Err(KbError::Schema("dump has no classes".into()).into());
    }
    Ok(kb)
}

/// Cheap shape check; the full parse happens on first use.
fn check_metadata(text: &str) -> Result<String> {
    if !text.trim_start().starts_with('<') {
        return Err(KbError::Schema("metadata is not an XML document".into()).into());
    }
    Ok(text.to_string())
}

fn parse_docs(text: &str) -> Result<ApiDocs> {
    let docs = ApiDocs::parse(text)?;
    if docs.is_empty() {
        return Err(KbError::Schema("docs have no documented entries".into()).into());
    }
    Ok(docs)
}
