//! Standard-library metadata (`AutocompleteMetadata.xml`).
//!
//! The document lists Lua libraries (`math`, `string`, `task`, ...) and Roblox
//! data types (`Vector3`, `CFrame`, ...).  Parameter and return types are
//! encoded as element tag names, e.g. `<number name="x"/>`.

use roxmltree::{Document, Node};

use crate::error::Result;

/// Converts a metadata tag name to the Luau type it stands for.
pub fn luau_type(tag: &str) -> &str {
    match tag {
        "bool" => "boolean",
        "RobloxScriptConnection" => "RBXScriptConnection",
        "variant" | "value" => "any",
        other => other,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryMetadata {
    pub libraries: Vec<LuaLibrary>,
    pub structs: Vec<ItemStruct>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaLibrary {
    pub name: String,
    pub description: Option<String>,
    pub functions: Vec<LibFunction>,
    pub properties: Vec<LibProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStruct {
    pub name: String,
    pub functions: Vec<LibFunction>,
    pub properties: Vec<LibProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibFunction {
    pub name: String,
    pub is_static: bool,
    pub parameters: Vec<LibParam>,
    pub returns: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibParam {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibProperty {
    pub name: String,
    pub type_name: String,
    pub description: Option<String>,
}

impl LibraryMetadata {
    pub fn library(&self, name: &str) -> Option<&LuaLibrary> {
        self.libraries.iter().find(|l| l.name == name)
    }

    pub fn item_struct(&self, name: &str) -> Option<&ItemStruct> {
        self.structs.iter().find(|s| s.name == name)
    }
}

impl LuaLibrary {
    pub fn function(&self, name: &str) -> Option<&LibFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&LibProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl ItemStruct {
    pub fn constructors(&self) -> impl Iterator<Item = &LibFunction> {
        self.functions.iter().filter(|f| f.is_static)
    }

    pub fn methods(&self) -> impl Iterator<Item = &LibFunction> {
        self.functions.iter().filter(|f| !f.is_static)
    }

    pub fn static_function(&self, name: &str) -> Option<&LibFunction> {
        self.constructors().find(|f| f.name == name)
    }
}

impl LibFunction {
    /// `name: type, other: type?`
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{}: {}{}", p.name, p.type_name, if p.optional { "?" } else { "" }))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Full signature with `qualifier` in front of the name, e.g.
    /// `signature("math.")` → `math.clamp(x: number, ...): number`.
    pub fn signature(&self, qualifier: &str) -> String {
        let mut sig = format!("{qualifier}{}({})", self.name, self.parameter_list());
        if !self.returns.is_empty() {
            sig.push_str(": ");
            sig.push_str(&self.returns.join(", "));
        }
        sig
    }

    /// Insert text with one tab stop per parameter: `clamp(${1:x}, ${2:min})`.
    pub fn snippet(&self, callee: &str) -> String {
        let args = self
            .parameters
            .iter()
            .enumerate()
            .map(|(i, p)| format!("${{{}:{}}}", i + 1, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{callee}({args})")
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

pub fn parse_metadata(xml: &str) -> Result<LibraryMetadata> {
    let doc = Document::parse(xml)?;
    let mut meta = LibraryMetadata::default();

    for node in doc.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "LuaLibrary" => {
                let Some(name) = node.attribute("name") else {
                    log::debug!("skipping LuaLibrary without a name");
                    continue;
                };
                meta.libraries.push(LuaLibrary {
                    name: name.to_string(),
                    description: node.attribute("description").map(str::to_string),
                    functions: functions_of(&node),
                    properties: properties_of(&node),
                });
            }
            "ItemStruct" => {
                let Some(name) = node.attribute("name") else {
                    log::debug!("skipping ItemStruct without a name");
                    continue;
                };
                meta.structs.push(ItemStruct {
                    name: name.to_string(),
                    functions: functions_of(&node),
                    properties: properties_of(&node),
                });
            }
            _ => {}
        }
    }

    log::debug!(
        "parsed autocomplete metadata: {} libraries, {} structs",
        meta.libraries.len(),
        meta.structs.len()
    );
    Ok(meta)
}

fn functions_of(owner: &Node<'_, '_>) -> Vec<LibFunction> {
    owner
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("Function"))
        .filter_map(|f| {
            let name = f.attribute("name")?;
            let parameters = child_element(&f, "parameters")
                .map(|params| {
                    params
                        .children()
                        .filter(Node::is_element)
                        .map(|p| LibParam {
                            name: p.attribute("name").unwrap_or("arg").to_string(),
                            type_name: luau_type(p.tag_name().name()).to_string(),
                            optional: p.attribute("optional") == Some("true"),
                        })
                        .collect()
                })
                .unwrap_or_default();
            let returns = child_element(&f, "returns")
                .map(|ret| {
                    ret.children()
                        .filter(Node::is_element)
                        .map(|r| match r.attribute("name") {
                            Some("...") => "...".to_string(),
                            _ => luau_type(r.tag_name().name()).to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(LibFunction {
                name: name.to_string(),
                is_static: f.attribute("static") == Some("true"),
                parameters,
                returns,
                description: child_element(&f, "description").and_then(|d| dedent(d.text())),
            })
        })
        .collect()
}

fn properties_of(owner: &Node<'_, '_>) -> Vec<LibProperty> {
    let Some(props) = child_element(owner, "Properties") else {
        return vec![];
    };
    props
        .children()
        .filter(Node::is_element)
        .filter_map(|p| {
            Some(LibProperty {
                name: p.attribute("name")?.to_string(),
                type_name: luau_type(p.tag_name().name()).to_string(),
                description: dedent(p.text()),
            })
        })
        .collect()
}

fn child_element<'a, 'input>(
    node: &Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Strips the XML indentation from multi-line descriptions.
fn dedent(text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    Some(
        text.lines()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
