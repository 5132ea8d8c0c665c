//! Open-document store.

use std::collections::HashMap;

use tower_lsp::lsp_types::Url;

const SCRIPT_EXTENSIONS: &[&str] = &[".luau", ".lua"];

/// Text of every open document, keyed by URI.  Owned by the backend; cleared
/// on shutdown.
#[derive(Debug, Default)]
pub struct Workspace {
    docs: HashMap<Url, String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, uri: Url, text: String) {
        log::debug!("open {uri}");
        self.docs.insert(uri, text);
    }

    /// Full-text replacement.
    pub fn change(&mut self, uri: Url, text: String) {
        self.docs.insert(uri, text);
    }

    pub fn close(&mut self, uri: &Url) {
        log::debug!("close {uri}");
        self.docs.remove(uri);
    }

    pub fn text(&self, uri: &Url) -> Option<&str> {
        self.docs.get(uri).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }

    /// `require` paths of the other open scripts relative to `from`:
    /// `./stem` for siblings, `./dir/stem` for scripts below its directory.
    pub fn module_paths(&self, from: &Url) -> Vec<String> {
        let Some(dir) = from.path().rsplit_once('/').map(|(dir, _)| dir) else {
            return Vec::new();
        };
        let prefix = format!("{dir}/");

        let mut paths: Vec<String> = self
            .docs
            .keys()
            .filter(|uri| *uri != from && uri.scheme() == from.scheme() && uri.host() == from.host())
            .filter_map(|uri| {
                let relative = uri.path().strip_prefix(&prefix)?;
                let stem = SCRIPT_EXTENSIONS
                    .iter()
                    .find_map(|ext| relative.strip_suffix(ext))?;
                Some(format!("./{stem}"))
            })
            .collect();
        paths.sort();
        paths
    }
}
