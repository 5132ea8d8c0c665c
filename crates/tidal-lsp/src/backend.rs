//! LSP backend: document store, knowledge-base lifecycle, completion, hover
//! and signature help.

use std::sync::{Arc, OnceLock};

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use tidal_intel::{
    Analyzer, CandidateKind, CompletionCandidate, HoverInfo, SignatureHelp as SrcSignatureHelp,
};
use tidal_kb::KnowledgeBase;

use crate::config::ServerConfig;
use crate::encoding::{Encoding, LineIndex};
use crate::loader::Loader;
use crate::logging::{init_logging, LoggingConfig};
use crate::workspace::Workspace;

const COMPLETION_TRIGGERS: &[&str] = &[".", ":", "\"", "'", "`", "(", ",", "[", "{", " "];
const SIGNATURE_TRIGGERS: &[&str] = &["(", ","];

// ── Backend ───────────────────────────────────────────────────────────────────

pub struct Backend {
    client: Client,
    workspace: Arc<RwLock<Workspace>>,
    /// Swapped once when loading finishes; requests take a snapshot.
    kb: Arc<RwLock<Arc<KnowledgeBase>>>,
    config: Arc<RwLock<ServerConfig>>,
    /// Agreed with the client in `initialize`.
    encoding: OnceLock<Encoding>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            workspace: Arc::new(RwLock::new(Workspace::new())),
            kb: Arc::new(RwLock::new(Arc::new(KnowledgeBase::default()))),
            config: Arc::new(RwLock::new(ServerConfig::default())),
            encoding: OnceLock::new(),
        }
    }

    fn encoding(&self) -> Encoding {
        self.encoding.get().copied().unwrap_or_default()
    }

    async fn knowledge_base(&self) -> Arc<KnowledgeBase> {
        self.kb.read().await.clone()
    }

    fn spawn_loader(&self, config: ServerConfig) {
        let slot = self.kb.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let loader = match Loader::new(config) {
                Ok(loader) => loader,
                Err(e) => {
                    log::error!("cannot build HTTP client: {e}");
                    return;
                }
            };
            let kb = loader.load().await;
            let summary = format!(
                "tidal-lsp: knowledge base ready ({} classes, {} enums, {} services)",
                kb.classes().len(),
                kb.enums().len(),
                kb.services().len()
            );
            *slot.write().await = Arc::new(kb);
            client.log_message(MessageType::INFO, summary).await;
        });
    }
}

// ── LanguageServer impl ───────────────────────────────────────────────────────

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let (config, rejected) = match ServerConfig::from_init_options(params.initialization_options.as_ref()) {
            Ok(config) => (config, None),
            Err(e) => (ServerConfig::default(), Some(e)),
        };
        init_logging(LoggingConfig {
            env_filter: config.log_filter.clone(),
            ..LoggingConfig::default()
        });
        if let Some(e) = rejected {
            log::warn!("ignoring malformed initializationOptions: {e}");
        }
        let encoding = Encoding::negotiate(&params.capabilities);
        let _ = self.encoding.set(encoding);
        log::info!("initializing, offline={}, encoding={encoding:?}", config.offline);
        *self.config.write().await = config;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding: Some(encoding.kind()),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(strings(COMPLETION_TRIGGERS)),
                    ..Default::default()
                }),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(strings(SIGNATURE_TRIGGERS)),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tidal-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let config = self.config.read().await.clone();
        self.spawn_loader(config);
        self.client
            .log_message(MessageType::INFO, "tidal-lsp ready; loading API dump")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.workspace.write().await.clear();
        log::info!("shutdown");
        Ok(())
    }

    // ── Document lifecycle ────────────────────────────────────────────────────

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.workspace
            .write()
            .await
            .open(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // FULL sync: the last change holds the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.workspace
                .write()
                .await
                .change(params.text_document.uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.workspace.write().await.close(&params.text_document.uri);
    }

    // ── Completion ────────────────────────────────────────────────────────────

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;

        let kb = self.knowledge_base().await;
        let scan_limit = self.config.read().await.scan_limit_bytes;
        let workspace = self.workspace.read().await;
        let Some(text) = workspace.text(uri) else {
            return Ok(None);
        };
        let modules = workspace.module_paths(uri);
        let index = LineIndex::new(text, self.encoding());
        let pos = index.position(params.text_document_position.position);

        let items: Vec<CompletionItem> = Analyzer::new(&kb)
            .with_modules(&modules)
            .with_scan_limit(scan_limit)
            .complete(text, pos)
            .into_iter()
            .map(|candidate| completion_item(candidate, &index))
            .collect();
        log::debug!("completion at {}:{}: {} items", pos.line, pos.character, items.len());

        Ok(Some(CompletionResponse::Array(items)))
    }

    // ── Hover ─────────────────────────────────────────────────────────────────

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;

        let kb = self.knowledge_base().await;
        let workspace = self.workspace.read().await;
        let Some(text) = workspace.text(uri) else {
            return Ok(None);
        };
        let index = LineIndex::new(text, self.encoding());
        let pos = index.position(params.text_document_position_params.position);
        Ok(Analyzer::new(&kb).hover(text, pos).map(|info| markdown_hover(info, &index)))
    }

    // ── Signature help ────────────────────────────────────────────────────────

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let uri = &params.text_document_position_params.text_document.uri;

        let kb = self.knowledge_base().await;
        let workspace = self.workspace.read().await;
        let Some(text) = workspace.text(uri) else {
            return Ok(None);
        };
        let pos = LineIndex::new(text, self.encoding()).position(params.text_document_position_params.position);
        Ok(Analyzer::new(&kb).signature_help(text, pos).map(signature_help))
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn completion_kind(kind: CandidateKind) -> CompletionItemKind {
    match kind {
        CandidateKind::Property => CompletionItemKind::PROPERTY,
        CandidateKind::Method => CompletionItemKind::METHOD,
        CandidateKind::Event => CompletionItemKind::EVENT,
        CandidateKind::Field => CompletionItemKind::FIELD,
        CandidateKind::EnumMember => CompletionItemKind::ENUM_MEMBER,
        CandidateKind::Enum => CompletionItemKind::ENUM,
        CandidateKind::Variable => CompletionItemKind::VARIABLE,
        CandidateKind::Function => CompletionItemKind::FUNCTION,
        CandidateKind::Class => CompletionItemKind::CLASS,
        CandidateKind::Keyword => CompletionItemKind::KEYWORD,
        CandidateKind::Snippet => CompletionItemKind::SNIPPET,
        CandidateKind::Module => CompletionItemKind::MODULE,
    }
}

fn completion_item(candidate: CompletionCandidate, index: &LineIndex<'_>) -> CompletionItem {
    let sort_text = candidate.sort_text();
    CompletionItem {
        kind: Some(completion_kind(candidate.kind)),
        detail: candidate.detail,
        documentation: candidate.documentation.map(|value| {
            Documentation::MarkupContent(MarkupContent { kind: MarkupKind::Markdown, value })
        }),
        sort_text: Some(sort_text),
        insert_text_format: Some(if candidate.is_snippet {
            InsertTextFormat::SNIPPET
        } else {
            InsertTextFormat::PLAIN_TEXT
        }),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: index.lsp_range(candidate.range),
            new_text: candidate.insert_text,
        })),
        label: candidate.label,
        ..Default::default()
    }
}

fn markdown_hover(info: HoverInfo, index: &LineIndex<'_>) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.blocks.join("\n\n---\n\n"),
        }),
        range: Some(index.lsp_range(info.range)),
    }
}

fn signature_help(help: SrcSignatureHelp) -> SignatureHelp {
    SignatureHelp {
        signatures: help
            .signatures
            .into_iter()
            .map(|s| SignatureInformation {
                label: s.label,
                documentation: s.documentation.map(|value| {
                    Documentation::MarkupContent(MarkupContent { kind: MarkupKind::Markdown, value })
                }),
                parameters: Some(
                    s.parameters
                        .into_iter()
                        .map(|p| ParameterInformation {
                            label: ParameterLabel::Simple(p.label),
                            documentation: p.documentation.map(Documentation::String),
                        })
                        .collect(),
                ),
                active_parameter: None,
            })
            .collect(),
        active_signature: Some(help.active_signature),
        active_parameter: Some(help.active_parameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_intel::{ParameterInfo, Position as SrcPosition, Range as SrcRange, SignatureInfo, SortBucket};

    const TEXT: &str = "local a = 1\nlocal b = 2\nx = math.cl";

    fn src_range(line: u32, start: u32, end: u32) -> SrcRange {
        SrcRange::new(SrcPosition::new(line, start), SrcPosition::new(line, end))
    }

    fn utf16(text: &str) -> LineIndex<'_> {
        LineIndex::new(text, Encoding::Utf16)
    }

    #[test]
    fn snippet_candidates_become_snippet_edits() {
        let candidate = CompletionCandidate::new("clamp", CandidateKind::Function, src_range(2, 5, 7))
            .snippet("clamp(${1:x})")
            .detail("math.clamp(x: number): number")
            .bucket(SortBucket::Primary);
        let item = completion_item(candidate, &utf16(TEXT));

        assert_eq!(item.label, "clamp");
        assert_eq!(item.kind, Some(CompletionItemKind::FUNCTION));
        assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(item.sort_text.as_deref(), Some("0_clamp"));
        let Some(CompletionTextEdit::Edit(edit)) = item.text_edit else {
            panic!("expected a plain text edit");
        };
        assert_eq!(edit.new_text, "clamp(${1:x})");
        assert_eq!(edit.range, Range::new(Position::new(2, 5), Position::new(2, 7)));
    }

    #[test]
    fn plain_candidates_keep_documentation_as_markdown() {
        let candidate = CompletionCandidate::new("while", CandidateKind::Keyword, src_range(0, 0, 2))
            .documentation("Loop while `cond` holds.")
            .bucket(SortBucket::Keyword);
        let item = completion_item(candidate, &utf16(TEXT));
        assert_eq!(item.insert_text_format, Some(InsertTextFormat::PLAIN_TEXT));
        assert_eq!(item.sort_text.as_deref(), Some("4_while"));
        assert_eq!(
            item.documentation,
            Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: "Loop while `cond` holds.".into(),
            }))
        );
    }

    #[test]
    fn hover_blocks_join_with_rules() {
        let hover = markdown_hover(
            HoverInfo {
                blocks: vec!["```luau\nfor\n```".into(), "Loop.".into()],
                range: src_range(1, 0, 3),
            },
            &utf16(TEXT),
        );
        let HoverContents::Markup(content) = hover.contents else {
            panic!("expected markup");
        };
        assert_eq!(content.value, "```luau\nfor\n```\n\n---\n\nLoop.");
        assert_eq!(hover.range, Some(Range::new(Position::new(1, 0), Position::new(1, 3))));
    }

    #[test]
    fn edit_ranges_are_reported_in_utf16() {
        let text = "print(\"héllo\") workspace.Gr";
        let index = utf16(text);
        // The client sends UTF-16 column 27; the word `Gr` sits at bytes 26..28.
        assert_eq!(index.position(Position::new(0, 27)), SrcPosition::new(0, 28));
        let candidate = CompletionCandidate::new("Gravity", CandidateKind::Property, src_range(0, 26, 28));
        let Some(CompletionTextEdit::Edit(edit)) = completion_item(candidate, &index).text_edit else {
            panic!("expected a plain text edit");
        };
        assert_eq!(edit.range, Range::new(Position::new(0, 25), Position::new(0, 27)));
    }

    #[test]
    fn signature_help_keeps_active_indices() {
        let help = signature_help(SrcSignatureHelp {
            signatures: vec![SignatureInfo {
                label: "wait(seconds: number?)".into(),
                documentation: None,
                parameters: vec![ParameterInfo { label: "seconds: number?".into(), documentation: None }],
            }],
            active_signature: 0,
            active_parameter: 1,
        });
        assert_eq!(help.active_parameter, Some(1));
        let params = help.signatures[0].parameters.as_ref().unwrap();
        assert_eq!(params[0].label, ParameterLabel::Simple("seconds: number?".into()));
    }

    #[test]
    fn every_candidate_kind_maps() {
        use CandidateKind::*;
        let kinds = [Property, Method, Event, Field, EnumMember, Enum, Variable, Function, Class, Keyword, Snippet, Module];
        let mapped: Vec<_> = kinds.iter().map(|&k| completion_kind(k)).collect();
        for (i, kind) in mapped.iter().enumerate() {
            assert!(!mapped[..i].contains(kind), "{:?} mapped twice", kinds[i]);
        }
    }
}
