//! Signature help for the call the cursor is inside of.

use tidal_kb::metadata::LibFunction;
use tidal_kb::{ClassDescriptor, MemberDescriptor, MemberKind};

use crate::chain::resolve_class;
use crate::complete::Analyzer;
use crate::context::{extract_chain, lazy_regex};
use crate::scope::split_top_level;
use crate::text::{line_before, Position, SourceText};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Substring of the signature label.
    pub label: String,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    pub label: String,
    pub documentation: Option<String>,
    pub parameters: Vec<ParameterInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHelp {
    pub signatures: Vec<SignatureInfo>,
    pub active_signature: u32,
    pub active_parameter: u32,
}

struct KnownSignature {
    /// `name`, `owner.name`, or `:name` for methods on any receiver.
    key: &'static str,
    label: &'static str,
    doc: &'static str,
}

static KNOWN_SIGNATURES: &[KnownSignature] = &[
    KnownSignature { key: "wait",            label: "wait(seconds: number?): (number, number)",                        doc: "Deprecated. Yields the current thread; prefer `task.wait`." },
    KnownSignature { key: "task.wait",       label: "task.wait(duration: number?): number",                            doc: "Yields the current thread until the next Heartbeat after `duration` seconds." },
    KnownSignature { key: "task.spawn",      label: "task.spawn(functionOrThread: function | thread, ...: any): thread", doc: "Resumes the function or thread immediately." },
    KnownSignature { key: "task.delay",      label: "task.delay(duration: number, functionOrThread: function | thread, ...: any): thread", doc: "Schedules the function or thread after `duration` seconds." },
    KnownSignature { key: "task.defer",      label: "task.defer(functionOrThread: function | thread, ...: any): thread", doc: "Schedules the function or thread at the end of the current resumption cycle." },
    KnownSignature { key: "task.cancel",     label: "task.cancel(thread: thread)",                                     doc: "Cancels a thread, preventing it from being resumed." },
    KnownSignature { key: "Instance.new",    label: "Instance.new(className: string, parent: Instance?): Instance",    doc: "Creates a new instance of the given class." },
    KnownSignature { key: "Vector3.new",     label: "Vector3.new(x: number, y: number, z: number): Vector3",           doc: "Creates a vector from its components." },
    KnownSignature { key: "CFrame.new",      label: "CFrame.new(x: number, y: number, z: number): CFrame",             doc: "Creates a coordinate frame at a position with no rotation." },
    KnownSignature { key: "Color3.new",      label: "Color3.new(r: number, g: number, b: number): Color3",             doc: "Creates a color from components in [0, 1]." },
    KnownSignature { key: "Color3.fromRGB",  label: "Color3.fromRGB(r: number, g: number, b: number): Color3",         doc: "Creates a color from components in [0, 255]." },
    KnownSignature { key: "UDim2.new",       label: "UDim2.new(xScale: number, xOffset: number, yScale: number, yOffset: number): UDim2", doc: "Creates a UI size or position." },
    KnownSignature { key: ":GetService",     label: "GetService(className: string): Instance",                         doc: "Returns the service with the given class name, creating it if needed." },
    KnownSignature { key: ":FindFirstChild", label: "FindFirstChild(name: string, recursive: boolean?): Instance?",     doc: "Returns the first child with the given name, or `nil`." },
    KnownSignature { key: ":WaitForChild",   label: "WaitForChild(childName: string, timeOut: number?): Instance",     doc: "Yields until a child with the given name exists." },
    KnownSignature { key: "print",           label: "print(...: any)",                                                 doc: "Writes its arguments to the output." },
    KnownSignature { key: "warn",            label: "warn(...: any)",                                                  doc: "Writes its arguments to the output as a warning." },
    KnownSignature { key: "require",         label: "require(module: ModuleScript | string): any",                     doc: "Runs a ModuleScript once and returns its value." },
    KnownSignature { key: "pcall",           label: "pcall(f: function, ...: any): (boolean, ...any)",                 doc: "Calls `f` in protected mode." },
];

impl Analyzer<'_> {
    pub fn signature_help<S: SourceText + ?Sized>(&self, src: &S, pos: Position) -> Option<SignatureHelp> {
        if self.kb.is_empty() {
            return None;
        }
        let before = line_before(src, pos);
        let (paren, active_parameter) = open_call(before)?;
        let target = before[..paren].trim_end();
        let caps = call_target_re().captures(target)?;
        let owner = caps.get(1).map(|m| m.as_str());
        let separator = caps.get(2).map(|m| m.as_str());
        let name = caps.get(3)?.as_str();

        let signature = self
            .known_signature(owner, separator, name)
            .or_else(|| self.library_signature(owner, separator, name))
            .or_else(|| self.method_signature(target, separator, name))?;

        Some(SignatureHelp { signatures: vec![signature], active_signature: 0, active_parameter })
    }

    fn known_signature(&self, owner: Option<&str>, separator: Option<&str>, name: &str) -> Option<SignatureInfo> {
        let key = match (owner, separator) {
            (Some(owner), Some(".")) => format!("{owner}.{name}"),
            (_, Some(":")) => format!(":{name}"),
            _ => name.to_string(),
        };
        let known = KNOWN_SIGNATURES.iter().find(|s| s.key == key)?;
        Some(signature_info(known.label.to_string(), Some(known.doc.to_string())))
    }

    fn library_signature(&self, owner: Option<&str>, separator: Option<&str>, name: &str) -> Option<SignatureInfo> {
        let meta = self.kb.library().ok()?;
        let (f, qualifier): (&LibFunction, String) = match (owner, separator) {
            (Some(owner), Some(".")) => {
                let f = match meta.library(owner) {
                    Some(lib) => lib.function(name),
                    None => meta.item_struct(owner).and_then(|s| s.static_function(name)),
                }?;
                (f, format!("{owner}."))
            }
            (None, None) => (meta.library("_G")?.function(name)?, String::new()),
            _ => return None,
        };
        Some(signature_info(f.signature(&qualifier), f.description.clone()))
    }

    /// A method of the class the receiver chain resolves to, else of the
    /// first class declaring a method with that name.
    fn method_signature(&self, target: &str, separator: Option<&str>, name: &str) -> Option<SignatureInfo> {
        if separator != Some(":") {
            return None;
        }
        let is_method = |m: &&MemberDescriptor| m.kind == MemberKind::Method;
        let resolved = extract_chain(target)
            .and_then(|chain| resolve_class(self.kb, &chain))
            .and_then(|class| class.member(name).filter(is_method).map(|m| (class, m)));
        let (class, member): (&ClassDescriptor, &MemberDescriptor) = match resolved {
            Some(found) => found,
            None => self
                .kb
                .classes()
                .iter()
                .find_map(|c| c.member_exact(name).filter(is_method).map(|m| (c, m)))?,
        };
        let doc = self.kb.docs().member(&class.name, &member.name).map(str::to_string);
        Some(signature_info(member.signature(&class.name), doc))
    }
}

fn signature_info(label: String, documentation: Option<String>) -> SignatureInfo {
    let parameters = parameter_labels(&label)
        .into_iter()
        .map(|p| ParameterInfo { label: p.to_string(), documentation: None })
        .collect();
    SignatureInfo { label, documentation, parameters }
}

/// The comma-separated parameters between the first `(` of `label` and its
/// matching `)`.
fn parameter_labels(label: &str) -> Vec<&str> {
    let Some(open) = label.find('(') else { return Vec::new() };
    let mut depth = 0;
    let mut close = None;
    for (i, c) in label[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else { return Vec::new() };
    let inner = &label[open + 1..close];
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(inner, ',').into_iter().map(str::trim).collect()
}

/// Byte index of the innermost unclosed `(` and the number of top-level
/// commas after it.  Strings are skipped; commas inside `{}`/`[]` don't count.
fn open_call(before: &str) -> Option<(usize, u32)> {
    let mut stack: Vec<(u8, usize, u32)> = Vec::new();
    let bytes = before.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            q @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != q {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            open @ (b'(' | b'{' | b'[') => stack.push((open, i, 0)),
            b')' | b'}' | b']' => {
                stack.pop();
            }
            b',' => {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    stack
        .iter()
        .rev()
        .find(|(open, _, _)| *open == b'(')
        .map(|&(_, at, commas)| (at, commas))
}

lazy_regex!(call_target_re, r"(?:([A-Za-z_]\w*)\s*([.:])\s*)?([A-Za-z_]\w*)$");
