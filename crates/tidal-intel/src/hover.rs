//! Hover resolution.  Sources are tried in a fixed order and the first one
//! that knows the word answers alone.

use tidal_kb::{ClassDescriptor, KnowledgeBase, MemberDescriptor};

use crate::builtins::{data_type, global_alias, global_function, keyword, primitive_type};
use crate::chain::resolve_class;
use crate::complete::Analyzer;
use crate::context::{extract_chain, lazy_regex};
use crate::exploits::exploit_function;
use crate::text::{word_at, Position, Range, SourceText};

/// Classes whose members win the cross-class member search.
const FOUNDATIONAL_CLASSES: &[&str] = &["Instance", "BasePart"];

/// Markdown blocks, rendered by the host separated by rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    pub blocks: Vec<String>,
    pub range: Range,
}

fn code(text: impl AsRef<str>) -> String {
    format!("```luau\n{}\n```", text.as_ref())
}

impl Analyzer<'_> {
    pub fn hover<S: SourceText + ?Sized>(&self, src: &S, pos: Position) -> Option<HoverInfo> {
        if self.kb.is_empty() {
            return None;
        }
        let (word, range) = word_at(src, pos)?;
        let line = src.line_text(pos.line);
        let prefix = &line[..range.start.character as usize];
        let blocks = self.describe(word, prefix)?;
        Some(HoverInfo { blocks, range })
    }

    fn describe(&self, word: &str, prefix: &str) -> Option<Vec<String>> {
        let kb = self.kb;

        if let Some(k) = keyword(word) {
            let mut doc = k.doc.to_string();
            if k.dialect {
                doc.push_str("\n\n_Luau extension._");
            }
            return Some(vec![code(k.name), doc]);
        }

        if let Some(t) = primitive_type(word) {
            return Some(vec![code(format!("type {}", t.name)), t.doc.to_string()]);
        }

        if let Some(blocks) = self.describe_library(word, prefix) {
            return Some(blocks);
        }

        if let Some(alias) = global_alias(word) {
            let ty = alias.class.unwrap_or("table");
            return Some(vec![code(format!("{}: {ty}", alias.name)), alias.doc.to_string()]);
        }
        if let Some(f) = global_function(word) {
            let doc = kb.docs().global(word).unwrap_or(f.doc);
            return Some(vec![code(f.signature), doc.to_string()]);
        }

        if let Some(t) = data_type(word) {
            let mut blocks = vec![code(format!("type {}", t.name)), t.doc.to_string()];
            if let Some(example) = t.constructor {
                blocks.push(code(example));
            }
            return Some(blocks);
        }

        if let Some(class) = kb.class(word) {
            return Some(describe_class(kb, class));
        }

        if let Some(f) = exploit_function(word) {
            return Some(vec![code(f.signature), format!("**[{}]** {}", f.category.label(), f.doc)]);
        }

        let enum_item = enum_item_re()
            .captures(prefix)
            .and_then(|caps| kb.enumeration(&caps[1]))
            .and_then(|e| Some((e, e.item(word)?)));
        if let Some((e, item)) = enum_item {
            let mut blocks = vec![code(format!("Enum.{}.{} = {}", e.name, item.name, item.value))];
            if item.is_deprecated() {
                blocks.push("**Deprecated**".to_string());
            }
            blocks.extend(kb.docs().enum_item(&e.name, &item.name).map(str::to_string));
            return Some(blocks);
        }
        if enum_root_re().is_match(prefix) {
            if let Some(e) = kb.enumeration(word) {
                let mut blocks = vec![
                    code(format!("enum Enum.{}", e.name)),
                    format!("{} items", e.items.len()),
                ];
                blocks.extend(kb.docs().enumeration(&e.name).map(str::to_string));
                return Some(blocks);
            }
        }

        if let Some((owner, member)) = self.find_member(word, prefix) {
            return Some(describe_member(kb, owner, member));
        }

        let service = kb.class_ignore_case(word).filter(|c| c.is_service())?;
        Some(vec![
            code(format!("service {}", service.name)),
            code(format!("game:GetService(\"{}\")", service.name)),
        ])
    }

    /// `math.clamp`, `Vector3.new`, or a bare library name.
    fn describe_library(&self, word: &str, prefix: &str) -> Option<Vec<String>> {
        let meta = self.kb.library().ok()?;

        let Some(caps) = owner_dot_re().captures(prefix) else {
            let lib = meta.library(word).filter(|l| l.name != "_G")?;
            let mut blocks = vec![code(format!("library {}", lib.name))];
            blocks.extend(lib.description.clone());
            return Some(blocks);
        };

        let owner = &caps[1];
        let qualifier = format!("{owner}.");
        if let Some(lib) = meta.library(owner) {
            if let Some(f) = lib.function(word) {
                let mut blocks = vec![code(f.signature(&qualifier))];
                blocks.extend(f.description.clone());
                return Some(blocks);
            }
            if let Some(p) = lib.property(word) {
                let mut blocks = vec![code(format!("{qualifier}{}: {}", p.name, p.type_name))];
                blocks.extend(p.description.clone());
                return Some(blocks);
            }
        }
        let f = meta.item_struct(owner)?.static_function(word)?;
        let mut blocks = vec![code(f.signature(&qualifier))];
        blocks.extend(f.description.clone());
        Some(blocks)
    }

    /// The class resolved from the chain before the word, else the first class
    /// declaring the member, with foundational classes taking precedence.
    fn find_member(&self, word: &str, prefix: &str) -> Option<(&ClassDescriptor, &MemberDescriptor)> {
        let kb = self.kb;
        let resolved = extract_chain(&format!("{prefix}{word}"))
            .and_then(|chain| resolve_class(kb, &chain))
            .and_then(|class| class.member(word).map(|m| (class, m)));
        if resolved.is_some() {
            return resolved;
        }

        let mut found = None;
        for class in kb.classes() {
            let Some(member) = class.member_exact(word) else { continue };
            if FOUNDATIONAL_CLASSES.contains(&class.name.as_str()) {
                return Some((class, member));
            }
            found.get_or_insert((class, member));
        }
        found
    }
}

fn describe_class(kb: &KnowledgeBase, class: &ClassDescriptor) -> Vec<String> {
    let header = match &class.superclass {
        Some(superclass) => format!("class {} : {superclass}", class.name),
        None => format!("class {}", class.name),
    };
    let mut blocks = vec![code(header)];
    if !class.tags.is_empty() {
        let tags: Vec<String> = class.tags.iter().map(|t| format!("`{t}`")).collect();
        blocks.push(format!("Tags: {}", tags.join(", ")));
    }
    if class.is_service() {
        blocks.push(code(format!("local {0} = game:GetService(\"{0}\")", class.name)));
    } else if class.is_creatable() {
        blocks.push(code(format!("local obj = Instance.new(\"{}\")", class.name)));
    }
    blocks.extend(kb.docs().class(&class.name).map(str::to_string));
    blocks
}

fn describe_member(kb: &KnowledgeBase, owner: &ClassDescriptor, member: &MemberDescriptor) -> Vec<String> {
    let mut blocks = vec![code(member.signature(&owner.name))];
    let mut notes = vec![format!("{} of `{}`", member.kind.label(), owner.name)];
    if member.is_deprecated() {
        notes.push("**Deprecated**".to_string());
    }
    if !member.is_open_read() {
        notes.push(format!("Read security: `{}`", member.security.read));
    }
    blocks.push(notes.join(" · "));
    blocks.extend(kb.docs().member(&owner.name, &member.name).map(str::to_string));
    blocks
}

lazy_regex!(owner_dot_re, r"([A-Za-z_]\w*)\s*\.\s*$");
lazy_regex!(enum_item_re, r"\bEnum\.([A-Za-z_]\w*)\.$");
lazy_regex!(enum_root_re, r"\bEnum\.$");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    /// Hover with the cursor on the first character of `needle`'s last occurrence.
    fn hover_on(kb: &KnowledgeBase, text: &str, needle: &str) -> Option<HoverInfo> {
        let (line_no, line) = text
            .lines()
            .enumerate()
            .filter(|(_, l)| l.contains(needle))
            .last()
            .unwrap();
        let col = line.rfind(needle).unwrap();
        Analyzer::new(kb).hover(text, Position::new(line_no as u32, col as u32))
    }

    fn first_block(kb: &KnowledgeBase, text: &str, needle: &str) -> String {
        hover_on(kb, text, needle).unwrap().blocks.remove(0)
    }

    #[test]
    fn keywords_come_first() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "for i = 1, 10 do end", "for").unwrap();
        assert_eq!(hover.blocks[0], "```luau\nfor\n```");
        assert_eq!(hover.range, Range::new(Position::new(0, 0), Position::new(0, 3)));
        let cont = hover_on(&kb, "continue", "continue").unwrap();
        assert!(cont.blocks[1].contains("Luau extension"));
    }

    #[test]
    fn primitive_types() {
        let kb = fixture::kb();
        assert_eq!(first_block(&kb, "local n: number", "number"), "```luau\ntype number\n```");
    }

    #[test]
    fn library_members_and_libraries() {
        let kb = fixture::kb();
        assert_eq!(
            first_block(&kb, "math.clamp(x, 0, 1)", "clamp"),
            "```luau\nmath.clamp(x: number, min: number, max: number): number\n```"
        );
        assert_eq!(first_block(&kb, "local p = math.pi", "pi"), "```luau\nmath.pi: number\n```");
        assert_eq!(first_block(&kb, "math.floor(1)", "math"), "```luau\nlibrary math\n```");
        assert!(first_block(&kb, "Vector3.new(1, 2, 3)", "new").starts_with("```luau\nVector3.new("));
    }

    #[test]
    fn aliases_and_global_functions() {
        let kb = fixture::kb();
        assert_eq!(first_block(&kb, "workspace.Gravity = 10", "workspace"), "```luau\nworkspace: Workspace\n```");
        let print = hover_on(&kb, "print(1)", "print").unwrap();
        assert_eq!(print.blocks, ["```luau\nprint(...: any)\n```", "Prints to the output."]);
    }

    #[test]
    fn data_types_show_constructor() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "local c: CFrame", "CFrame").unwrap();
        assert_eq!(hover.blocks.last().unwrap(), "```luau\nCFrame.new(x, y, z)\n```");
    }

    #[test]
    fn classes_show_superclass_tags_and_example() {
        let kb = fixture::kb();
        let part = hover_on(&kb, "local p: Part", "Part").unwrap();
        assert_eq!(part.blocks[0], "```luau\nclass Part : BasePart\n```");
        assert_eq!(part.blocks[1], "```luau\nlocal obj = Instance.new(\"Part\")\n```");

        let players = hover_on(&kb, "local P: Players", "Players").unwrap();
        assert_eq!(players.blocks[1], "Tags: `NotCreatable`, `Service`");
        assert!(players.blocks[2].contains("game:GetService(\"Players\")"));
    }

    #[test]
    fn exploit_functions_carry_category() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "local env = getgenv()", "getgenv").unwrap();
        assert!(hover.blocks[1].starts_with("**[Environment]**"));
    }

    #[test]
    fn enum_items_and_names() {
        let kb = fixture::kb();
        let item = hover_on(&kb, "if k == Enum.KeyCode.Space then", "Space").unwrap();
        assert_eq!(item.blocks, ["```luau\nEnum.KeyCode.Space = 32\n```", "The space bar."]);
        let name = hover_on(&kb, "Enum.KeyCode.A", "KeyCode").unwrap();
        assert_eq!(name.blocks[1], "3 items");
        assert!(hover_on(&kb, "Enum.KeyCode.Nope", "Nope").is_none());
    }

    #[test]
    fn enum_item_miss_falls_through_to_members() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "Enum.KeyCode.Name", "Name").unwrap();
        assert_eq!(hover.blocks[0], "```luau\nInstance.Name: string\n```");
        let service = hover_on(&kb, "Enum.KeyCode.lighting", "lighting").unwrap();
        assert_eq!(service.blocks[0], "```luau\nservice Lighting\n```");
    }

    #[test]
    fn chain_resolved_member() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "print(workspace.Gravity)", "Gravity").unwrap();
        assert_eq!(hover.blocks[0], "```luau\nWorkspace.Gravity: float\n```");
        assert_eq!(hover.blocks[2], "Downward acceleration in studs per second squared.");
    }

    #[test]
    fn foundational_class_wins_member_search() {
        let kb = fixture::kb();
        // GuiObject declares Position before BasePart does.
        let hover = hover_on(&kb, "local p = thing.Position", "Position").unwrap();
        assert_eq!(hover.blocks[0], "```luau\nBasePart.Position: Vector3\n```");
        // Without a foundational match the first declaring class wins.
        let fov = hover_on(&kb, "cam.FieldOfView", "FieldOfView").unwrap();
        assert_eq!(fov.blocks[0], "```luau\nCamera.FieldOfView: float\n```");
    }

    #[test]
    fn restricted_members_show_security() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "workspace.PhysicsSecret", "PhysicsSecret").unwrap();
        assert!(hover.blocks[1].contains("RobloxScriptSecurity"));
    }

    #[test]
    fn services_match_case_insensitively() {
        let kb = fixture::kb();
        let hover = hover_on(&kb, "local l = lighting", "lighting").unwrap();
        assert_eq!(hover.blocks[0], "```luau\nservice Lighting\n```");
    }

    #[test]
    fn unknown_words_and_empty_kb() {
        let kb = fixture::kb();
        assert!(hover_on(&kb, "local zzz = 1", "zzz").is_none());
        assert!(Analyzer::new(&kb).hover("   ", Position::new(0, 1)).is_none());

        let empty = KnowledgeBase::default();
        assert!(hover_on(&empty, "for i = 1, 2 do end", "for").is_none());
        assert!(hover_on(&empty, "game", "game").is_none());
    }
}
