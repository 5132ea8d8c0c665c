//! Executor-provided globals that are not part of the Roblox API.

use self::ExploitCategory::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploitCategory {
    Environment,
    Closures,
    Instances,
    Signals,
    Metatables,
    Scripts,
    Misc,
}

impl ExploitCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExploitCategory::Environment => "Environment",
            ExploitCategory::Closures => "Closures",
            ExploitCategory::Instances => "Instances",
            ExploitCategory::Signals => "Signals",
            ExploitCategory::Metatables => "Metatables",
            ExploitCategory::Scripts => "Scripts",
            ExploitCategory::Misc => "Misc",
        }
    }
}

pub struct ExploitFunction {
    pub name: &'static str,
    pub category: ExploitCategory,
    pub signature: &'static str,
    pub doc: &'static str,
}

pub static EXPLOIT_FUNCTIONS: &[ExploitFunction] = &[
    ExploitFunction { name: "getgenv",              category: Environment, signature: "getgenv(): table",                                   doc: "The executor's global environment, shared by every executed script." },
    ExploitFunction { name: "getrenv",              category: Environment, signature: "getrenv(): table",                                   doc: "The global environment of the game's own scripts." },
    ExploitFunction { name: "getreg",               category: Environment, signature: "getreg(): table",                                    doc: "The Lua registry." },
    ExploitFunction { name: "getgc",                category: Environment, signature: "getgc(includeTables: boolean?): { any }",            doc: "Every value currently tracked by the garbage collector." },
    ExploitFunction { name: "identifyexecutor",     category: Environment, signature: "identifyexecutor(): (string, string)",               doc: "Name and version of the executor." },
    ExploitFunction { name: "hookfunction",         category: Closures,    signature: "hookfunction(target: function, hook: function): function", doc: "Replaces `target` with `hook`; returns a callable copy of the original." },
    ExploitFunction { name: "newcclosure",          category: Closures,    signature: "newcclosure(f: function): function",                 doc: "Wraps a Lua function in a C closure." },
    ExploitFunction { name: "islclosure",           category: Closures,    signature: "islclosure(f: function): boolean",                   doc: "Whether `f` is a Lua closure." },
    ExploitFunction { name: "iscclosure",           category: Closures,    signature: "iscclosure(f: function): boolean",                   doc: "Whether `f` is a C closure." },
    ExploitFunction { name: "checkcaller",          category: Closures,    signature: "checkcaller(): boolean",                             doc: "Whether the current thread was started by the executor." },
    ExploitFunction { name: "loadstring",           category: Closures,    signature: "loadstring(source: string, chunkname: string?): (function?, string?)", doc: "Compiles Luau source into a function." },
    ExploitFunction { name: "getinstances",         category: Instances,   signature: "getinstances(): { Instance }",                       doc: "Every instance the client knows about." },
    ExploitFunction { name: "getnilinstances",      category: Instances,   signature: "getnilinstances(): { Instance }",                    doc: "Instances whose parent is `nil`." },
    ExploitFunction { name: "gethui",               category: Instances,   signature: "gethui(): Folder",                                   doc: "A hidden container for executor UI." },
    ExploitFunction { name: "fireclickdetector",    category: Signals,     signature: "fireclickdetector(detector: ClickDetector, distance: number?)", doc: "Fires a ClickDetector as if the player clicked it." },
    ExploitFunction { name: "fireproximityprompt",  category: Signals,     signature: "fireproximityprompt(prompt: ProximityPrompt)",       doc: "Triggers a ProximityPrompt." },
    ExploitFunction { name: "firesignal",           category: Signals,     signature: "firesignal(signal: RBXScriptSignal, ...: any)",      doc: "Invokes every connection of a signal." },
    ExploitFunction { name: "getconnections",       category: Signals,     signature: "getconnections(signal: RBXScriptSignal): { table }", doc: "The connections attached to a signal." },
    ExploitFunction { name: "getrawmetatable",      category: Metatables,  signature: "getrawmetatable(value: any): table?",                doc: "The metatable of a value, bypassing `__metatable`." },
    ExploitFunction { name: "setrawmetatable",      category: Metatables,  signature: "setrawmetatable(value: any, mt: table)",             doc: "Sets a metatable, bypassing `__metatable`." },
    ExploitFunction { name: "hookmetamethod",       category: Metatables,  signature: "hookmetamethod(object: any, method: string, hook: function): function", doc: "Hooks a metamethod; returns the original." },
    ExploitFunction { name: "setreadonly",          category: Metatables,  signature: "setreadonly(t: table, readonly: boolean)",           doc: "Toggles a table's read-only flag." },
    ExploitFunction { name: "getnamecallmethod",    category: Metatables,  signature: "getnamecallmethod(): string",                        doc: "The method name of the current `__namecall` invocation." },
    ExploitFunction { name: "dumpstring",           category: Scripts,     signature: "dumpstring(source: string): string",                 doc: "Compiles source to bytecode." },
    ExploitFunction { name: "getscripts",           category: Scripts,     signature: "getscripts(): { LuaSourceContainer }",               doc: "Every script instance." },
    ExploitFunction { name: "getsenv",              category: Scripts,     signature: "getsenv(script: LuaSourceContainer): table",         doc: "The environment of a running script." },
    ExploitFunction { name: "setclipboard",         category: Misc,        signature: "setclipboard(text: string)",                         doc: "Copies text to the system clipboard." },
    ExploitFunction { name: "request",              category: Misc,        signature: "request(options: table): table",                     doc: "Performs an HTTP request." },
];

pub fn exploit_function(name: &str) -> Option<&'static ExploitFunction> {
    EXPLOIT_FUNCTIONS.iter().find(|f| f.name == name)
}
