//! Local scope scanner.
//!
//! Collects `local` declarations, named functions and function parameters from
//! the buffer with a handful of patterns and guesses each symbol's type from
//! its initializer.  Scope boundaries are ignored: everything declared anywhere
//! in the scanned prefix is visible.

use crate::context::lazy_regex;
use crate::text::clamp_col;

/// Bytes of the buffer the scanner looks at.
pub const DEFAULT_SCAN_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSymbol {
    pub name: String,
    pub kind: SymbolKind,
    /// `"any"` when declared without a value, `"unknown"` when the value is
    /// not recognised.
    pub inferred_type: String,
}

impl LocalSymbol {
    fn variable(name: &str, inferred_type: impl Into<String>) -> Self {
        Self { name: name.to_string(), kind: SymbolKind::Variable, inferred_type: inferred_type.into() }
    }
}

/// Every symbol declared in the first `limit` bytes of `text`, in order of
/// first appearance, one entry per name.
pub fn scan(text: &str, limit: usize) -> Vec<LocalSymbol> {
    let text = &text[..clamp_col(text, limit)];
    let mut found: Vec<(usize, LocalSymbol)> = Vec::new();

    for caps in local_decl_re().captures_iter(text) {
        let (Some(names), init) = (caps.get(1), caps.get(2)) else { continue };
        if names.as_str().starts_with("function") {
            continue;
        }
        let inits = init.map(|m| split_top_level(m.as_str(), ',')).unwrap_or_default();
        for (i, decl) in split_top_level(names.as_str(), ',').into_iter().enumerate() {
            let Some((name, annotation)) = split_annotation(decl) else { continue };
            let inferred = match (annotation, init, inits.get(i)) {
                (Some(ty), _, _) => ty.to_string(),
                (None, None, _) => "any".to_string(),
                (None, Some(_), None) => "nil".to_string(),
                (None, Some(_), Some(expr)) => infer_type(expr),
            };
            found.push((names.start(), LocalSymbol::variable(name, inferred)));
        }
    }

    for caps in function_decl_re().captures_iter(text) {
        let Some(name) = caps.get(1) else { continue };
        found.push((
            name.start(),
            LocalSymbol {
                name: name.as_str().to_string(),
                kind: SymbolKind::Function,
                inferred_type: "function".to_string(),
            },
        ));
    }

    for caps in params_re().captures_iter(text) {
        let Some(list) = caps.get(1) else { continue };
        for param in split_top_level(list.as_str(), ',') {
            if param.trim() == "..." {
                continue;
            }
            if let Some((name, annotation)) = split_annotation(param) {
                found.push((list.start(), LocalSymbol::variable(name, annotation.unwrap_or("any"))));
            }
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    let mut seen = std::collections::HashSet::new();
    found
        .into_iter()
        .filter(|(_, sym)| seen.insert(sym.name.clone()))
        .map(|(_, sym)| sym)
        .collect()
}

/// Best-effort type of an initializer expression.
pub fn infer_type(expr: &str) -> String {
    let expr = expr.trim().trim_end_matches(';').trim_end();
    if let Some(caps) = constructor_re().captures(expr) {
        return caps[1].to_string();
    }
    if let Some(caps) = instance_new_re().captures(expr) {
        return caps.get(1).map_or("Instance", |m| m.as_str()).to_string();
    }
    if let Some(caps) = get_service_re().captures(expr) {
        return caps[1].to_string();
    }
    let literal = match expr.find("--") {
        Some(i) if !starts_with_quote(expr) => expr[..i].trim_end(),
        _ => expr,
    };
    let ty = if number_re().is_match(literal) {
        "number"
    } else if starts_with_quote(expr) {
        "string"
    } else if literal == "true" || literal == "false" {
        "boolean"
    } else if literal == "nil" {
        "nil"
    } else if expr.starts_with('{') {
        "table"
    } else if function_expr_re().is_match(expr) {
        "function"
    } else {
        "unknown"
    };
    ty.to_string()
}

fn starts_with_quote(expr: &str) -> bool {
    expr.starts_with(['"', '\'', '`']) || expr.starts_with("[[") || expr.starts_with("[=")
}

/// `name: Type` → (`name`, `Some("Type")`); `name` → (`name`, `None`).
fn split_annotation(decl: &str) -> Option<(&str, Option<&str>)> {
    let caps = name_annotation_re().captures(decl)?;
    let name = caps.get(1)?.as_str();
    let ty = caps.get(2).map(|m| m.as_str().trim()).filter(|t| !t.is_empty());
    Some((name, ty))
}

/// Splits on `sep` outside `()`, `[]` and `{}` groups and quoted strings.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

lazy_regex!(local_decl_re, r"(?m)\blocal[ \t]+([^=\n]+?)[ \t]*(?:=[ \t]*([^\n]*))?$");
lazy_regex!(function_decl_re, r"\bfunction[ \t]+([A-Za-z_]\w*)[ \t]*\(");
lazy_regex!(params_re, r"\bfunction\b[^(\n]*\(([^)\n]*)\)");
lazy_regex!(name_annotation_re, r"^\s*([A-Za-z_]\w*)\s*(?::\s*(.+))?$");
lazy_regex!(constructor_re, r"^(Vector3|Vector2|CFrame|UDim2|UDim|Color3)\s*\.\s*(?:new|from\w+)\s*\(");
lazy_regex!(instance_new_re, r#"^Instance\s*\.\s*new\s*\(\s*(?:["']([A-Za-z_]\w*)["'])?"#);
lazy_regex!(get_service_re, r#"^[A-Za-z_]\w*\s*:\s*GetService\s*\(\s*["']([A-Za-z_]\w*)["']"#);
lazy_regex!(number_re, r"^-?(?:0[xX][0-9A-Fa-f_]+|0[bB][01_]+|\d[\d_]*(?:\.\d*)?(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)$");
lazy_regex!(function_expr_re, r"^function\b");

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(syms: &'a [LocalSymbol], name: &str) -> &'a LocalSymbol {
        syms.iter().find(|s| s.name == name).unwrap_or_else(|| panic!("{name} not found"))
    }

    #[test]
    fn constructor_initializer_types() {
        let syms = scan("local foo = Vector3.new(1,2,3)\n", DEFAULT_SCAN_LIMIT);
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].name, "foo");
        assert_eq!(syms[0].kind, SymbolKind::Variable);
        assert_eq!(syms[0].inferred_type, "Vector3");
    }

    #[test]
    fn literal_inference() {
        let src = "\
local n = 42
local h = 0xFF -- mask
local s = 'hi'
local b = false
local z = nil
local t = { a = 1 }
local f = function() end
local c = Color3.fromRGB(1, 2, 3)
local other = compute()
local later
";
        let syms = scan(src, DEFAULT_SCAN_LIMIT);
        let ty = |name| find(&syms, name).inferred_type.as_str();
        assert_eq!(ty("n"), "number");
        assert_eq!(ty("h"), "number");
        assert_eq!(ty("s"), "string");
        assert_eq!(ty("b"), "boolean");
        assert_eq!(ty("z"), "nil");
        assert_eq!(ty("t"), "table");
        assert_eq!(ty("f"), "function");
        assert_eq!(ty("c"), "Color3");
        assert_eq!(ty("other"), "unknown");
        assert_eq!(ty("later"), "any");
    }

    #[test]
    fn instances_and_services() {
        let src = "\
local part = Instance.new(\"Part\")
local thing = Instance.new(className)
local Players = game:GetService('Players')
";
        let syms = scan(src, DEFAULT_SCAN_LIMIT);
        assert_eq!(find(&syms, "part").inferred_type, "Part");
        assert_eq!(find(&syms, "thing").inferred_type, "Instance");
        assert_eq!(find(&syms, "Players").inferred_type, "Players");
    }

    #[test]
    fn annotation_beats_initializer() {
        let syms = scan("local speed: number = getSpeed()\n", DEFAULT_SCAN_LIMIT);
        assert_eq!(find(&syms, "speed").inferred_type, "number");
    }

    #[test]
    fn multiple_names_pair_with_values() {
        let syms = scan("local a, b, c = 1, \"x, y\"\n", DEFAULT_SCAN_LIMIT);
        let names: Vec<&str> = syms.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(syms[0].inferred_type, "number");
        assert_eq!(syms[1].inferred_type, "string");
        assert_eq!(syms[2].inferred_type, "nil");
    }

    #[test]
    fn functions_and_parameters() {
        let src = "\
local function greet(name: string, times, ...)
end
function module.helper(x) end
function update(dt: number)
end
";
        let syms = scan(src, DEFAULT_SCAN_LIMIT);
        let names: Vec<&str> = syms.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["greet", "name", "times", "x", "update", "dt"]);
        assert_eq!(find(&syms, "greet").kind, SymbolKind::Function);
        assert_eq!(find(&syms, "name").inferred_type, "string");
        assert_eq!(find(&syms, "times").inferred_type, "any");
        assert_eq!(find(&syms, "dt").inferred_type, "number");
    }

    #[test]
    fn first_declaration_wins() {
        let syms = scan("local x = 1\nlocal x = 'a'\n", DEFAULT_SCAN_LIMIT);
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].inferred_type, "number");
    }

    #[test]
    fn scan_respects_limit() {
        let src = "local early = 1\nlocal late = 2\n";
        let syms = scan(src, 16);
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].name, "early");
        // A limit inside a multi-byte character is floored.
        assert!(scan("local é = 1", 7).is_empty());
    }

    #[test]
    fn top_level_split_ignores_nesting() {
        assert_eq!(split_top_level("a, f(b, c), {d, e}, 'x,y'", ','), ["a", " f(b, c)", " {d, e}", " 'x,y'"]);
    }
}
