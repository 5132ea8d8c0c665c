//! Static language knowledge: keywords, primitive types, global data types,
//! global instance aliases and global functions.

// ── Keywords ──────────────────────────────────────────────────────────────

pub struct KeywordInfo {
    pub name: &'static str,
    pub doc: &'static str,
    /// Luau additions on top of Lua 5.1.
    pub dialect: bool,
}

pub static KEYWORDS: &[KeywordInfo] = &[
    KeywordInfo { name: "and",      dialect: false, doc: "Logical conjunction. Returns the first operand if it is falsy, otherwise the second." },
    KeywordInfo { name: "break",    dialect: false, doc: "Exits the innermost enclosing loop." },
    KeywordInfo { name: "do",       dialect: false, doc: "Opens a block: `do ... end`, or the body of a `for`/`while` loop." },
    KeywordInfo { name: "else",     dialect: false, doc: "Branch taken when no preceding `if`/`elseif` condition held." },
    KeywordInfo { name: "elseif",   dialect: false, doc: "Additional conditional branch of an `if` statement." },
    KeywordInfo { name: "end",      dialect: false, doc: "Closes a block opened by `do`, `then`, `function`, ..." },
    KeywordInfo { name: "false",    dialect: false, doc: "The boolean value `false`." },
    KeywordInfo { name: "for",      dialect: false, doc: "Numeric (`for i = a, b, step do`) or generic (`for k, v in t do`) loop." },
    KeywordInfo { name: "function", dialect: false, doc: "Declares a function: `function name(params) ... end`." },
    KeywordInfo { name: "if",       dialect: false, doc: "Conditional statement or expression: `if cond then ... end`." },
    KeywordInfo { name: "in",       dialect: false, doc: "Separates loop variables from the iterator in a generic `for`." },
    KeywordInfo { name: "local",    dialect: false, doc: "Declares a variable or function scoped to the enclosing block." },
    KeywordInfo { name: "nil",      dialect: false, doc: "The absence of a value." },
    KeywordInfo { name: "not",      dialect: false, doc: "Logical negation." },
    KeywordInfo { name: "or",       dialect: false, doc: "Logical disjunction. Returns the first operand if it is truthy, otherwise the second." },
    KeywordInfo { name: "repeat",   dialect: false, doc: "Loop whose body runs at least once: `repeat ... until cond`." },
    KeywordInfo { name: "return",   dialect: false, doc: "Returns values from the enclosing function or chunk." },
    KeywordInfo { name: "then",     dialect: false, doc: "Opens the body of an `if`/`elseif` branch." },
    KeywordInfo { name: "true",     dialect: false, doc: "The boolean value `true`." },
    KeywordInfo { name: "until",    dialect: false, doc: "Terminating condition of a `repeat` loop." },
    KeywordInfo { name: "while",    dialect: false, doc: "Loop that runs while its condition holds: `while cond do ... end`." },
    KeywordInfo { name: "continue", dialect: true,  doc: "Skips to the next iteration of the innermost loop." },
    KeywordInfo { name: "export",   dialect: true,  doc: "Makes a type alias visible to modules that `require` this one." },
    KeywordInfo { name: "type",     dialect: true,  doc: "Declares a type alias: `type Name = ...`." },
    KeywordInfo { name: "typeof",   dialect: true,  doc: "In a type position, the type of an expression: `typeof(value)`." },
];

pub fn keyword(name: &str) -> Option<&'static KeywordInfo> {
    KEYWORDS.iter().find(|k| k.name == name)
}

// ── Primitive types ───────────────────────────────────────────────────────

pub struct PrimitiveType {
    pub name: &'static str,
    pub doc: &'static str,
}

pub static PRIMITIVE_TYPES: &[PrimitiveType] = &[
    PrimitiveType { name: "any",      doc: "Opts out of type checking for this value." },
    PrimitiveType { name: "unknown",  doc: "Any value; must be refined before use." },
    PrimitiveType { name: "never",    doc: "A type with no values." },
    PrimitiveType { name: "nil",      doc: "The type of `nil`." },
    PrimitiveType { name: "boolean",  doc: "`true` or `false`." },
    PrimitiveType { name: "number",   doc: "Double-precision floating point number." },
    PrimitiveType { name: "string",   doc: "Immutable byte string." },
    PrimitiveType { name: "table",    doc: "Associative array; the only structured type in Luau." },
    PrimitiveType { name: "thread",   doc: "A coroutine." },
    PrimitiveType { name: "buffer",   doc: "Fixed-size mutable block of bytes." },
    PrimitiveType { name: "userdata", doc: "Opaque host-provided value." },
    PrimitiveType { name: "vector",   doc: "Native 3-component float vector." },
];

pub fn primitive_type(name: &str) -> Option<&'static PrimitiveType> {
    PRIMITIVE_TYPES.iter().find(|t| t.name == name)
}

// ── Global data types ─────────────────────────────────────────────────────

pub struct DataType {
    pub name: &'static str,
    pub doc: &'static str,
    /// Construction example shown on hover.
    pub constructor: Option<&'static str>,
}

pub static DATA_TYPES: &[DataType] = &[
    DataType { name: "Vector3",        doc: "A 3D vector, used for positions, sizes and directions.", constructor: Some("Vector3.new(x, y, z)") },
    DataType { name: "Vector2",        doc: "A 2D vector.", constructor: Some("Vector2.new(x, y)") },
    DataType { name: "CFrame",         doc: "A coordinate frame: a position and an orientation.", constructor: Some("CFrame.new(x, y, z)") },
    DataType { name: "Color3",         doc: "An RGB color with components in [0, 1].", constructor: Some("Color3.fromRGB(r, g, b)") },
    DataType { name: "UDim",           doc: "A one-dimensional UI size: scale plus offset.", constructor: Some("UDim.new(scale, offset)") },
    DataType { name: "UDim2",          doc: "A two-dimensional UI size or position.", constructor: Some("UDim2.new(xScale, xOffset, yScale, yOffset)") },
    DataType { name: "Instance",       doc: "Base of every object in the data model.", constructor: Some("Instance.new(\"Part\")") },
    DataType { name: "Enum",           doc: "Root of every engine enumeration: `Enum.<Name>.<Item>`.", constructor: None },
    DataType { name: "Ray",            doc: "A half-line with an origin and a direction.", constructor: Some("Ray.new(origin, direction)") },
    DataType { name: "Random",         doc: "A seeded pseudo-random number generator.", constructor: Some("Random.new(seed)") },
    DataType { name: "Region3",        doc: "An axis-aligned 3D box.", constructor: Some("Region3.new(min, max)") },
    DataType { name: "TweenInfo",      doc: "Parameters for a TweenService tween.", constructor: Some("TweenInfo.new(time, easingStyle, easingDirection)") },
    DataType { name: "NumberRange",    doc: "A range between two numbers.", constructor: Some("NumberRange.new(min, max)") },
    DataType { name: "NumberSequence", doc: "A series of numeric keypoints over time.", constructor: Some("NumberSequence.new(value)") },
    DataType { name: "ColorSequence",  doc: "A series of color keypoints over time.", constructor: Some("ColorSequence.new(color)") },
    DataType { name: "BrickColor",     doc: "A color from the legacy named palette.", constructor: Some("BrickColor.new(\"Bright red\")") },
];

pub fn data_type(name: &str) -> Option<&'static DataType> {
    DATA_TYPES.iter().find(|t| t.name == name)
}

// ── Global instance aliases ───────────────────────────────────────────────

pub struct GlobalAlias {
    pub name: &'static str,
    /// Class the alias refers to, when it is a chain root.
    pub class: Option<&'static str>,
    pub doc: &'static str,
}

pub static GLOBAL_ALIASES: &[GlobalAlias] = &[
    GlobalAlias { name: "game",      class: Some("DataModel"), doc: "The root of the data model (`DataModel`)." },
    GlobalAlias { name: "workspace", class: Some("Workspace"), doc: "The `Workspace` service: everything rendered in the 3D world." },
    GlobalAlias { name: "script",    class: Some("Script"),    doc: "The script instance running this code." },
    GlobalAlias { name: "plugin",    class: Some("Plugin"),    doc: "The `Plugin` object, only inside Studio plugins." },
    GlobalAlias { name: "shared",    class: None,              doc: "A table shared between every script in the same context." },
];

pub fn global_alias(name: &str) -> Option<&'static GlobalAlias> {
    GLOBAL_ALIASES.iter().find(|a| a.name == name)
}

// ── Global functions ──────────────────────────────────────────────────────

pub struct GlobalFunction {
    pub name: &'static str,
    pub signature: &'static str,
    pub doc: &'static str,
}

pub static GLOBAL_FUNCTIONS: &[GlobalFunction] = &[
    GlobalFunction { name: "print",        signature: "print(...: any)",                                  doc: "Writes its arguments to the output." },
    GlobalFunction { name: "warn",         signature: "warn(...: any)",                                   doc: "Writes its arguments to the output as a warning." },
    GlobalFunction { name: "error",        signature: "error(message: any, level: number?)",              doc: "Raises an error." },
    GlobalFunction { name: "assert",       signature: "assert(value: T, message: string?): T",            doc: "Raises an error if `value` is falsy, otherwise returns it." },
    GlobalFunction { name: "pairs",        signature: "pairs(t: table)",                                  doc: "Iterates every key/value pair of a table." },
    GlobalFunction { name: "ipairs",       signature: "ipairs(t: table)",                                 doc: "Iterates the array part of a table in order." },
    GlobalFunction { name: "next",         signature: "next(t: table, key: any?)",                        doc: "Returns the pair following `key` in `t`." },
    GlobalFunction { name: "select",       signature: "select(index: number | string, ...: any)",        doc: "Returns arguments after `index`, or their count for `\"#\"`." },
    GlobalFunction { name: "type",         signature: "type(value: any): string",                         doc: "Returns the basic Lua type of a value." },
    GlobalFunction { name: "typeof",       signature: "typeof(value: any): string",                       doc: "Returns the type of a value, including Roblox data types." },
    GlobalFunction { name: "tostring",     signature: "tostring(value: any): string",                     doc: "Converts a value to a string." },
    GlobalFunction { name: "tonumber",     signature: "tonumber(value: any, base: number?): number?",     doc: "Converts a value to a number, or returns `nil`." },
    GlobalFunction { name: "pcall",        signature: "pcall(f: function, ...: any): (boolean, ...any)",  doc: "Calls `f` in protected mode." },
    GlobalFunction { name: "xpcall",       signature: "xpcall(f: function, handler: function, ...: any): (boolean, ...any)", doc: "Calls `f` in protected mode with an error handler." },
    GlobalFunction { name: "require",      signature: "require(module: ModuleScript | string): any",     doc: "Runs a ModuleScript once and returns its value." },
    GlobalFunction { name: "setmetatable", signature: "setmetatable(t: table, mt: table?): table",        doc: "Sets the metatable of a table." },
    GlobalFunction { name: "getmetatable", signature: "getmetatable(t: any): table?",                     doc: "Returns the metatable of a value." },
    GlobalFunction { name: "rawget",       signature: "rawget(t: table, key: any): any",                  doc: "Reads `t[key]` without invoking metamethods." },
    GlobalFunction { name: "rawset",       signature: "rawset(t: table, key: any, value: any): table",    doc: "Writes `t[key]` without invoking metamethods." },
    GlobalFunction { name: "rawequal",     signature: "rawequal(a: any, b: any): boolean",                doc: "Compares without invoking metamethods." },
    GlobalFunction { name: "rawlen",       signature: "rawlen(t: table | string): number",                doc: "Length without invoking metamethods." },
    GlobalFunction { name: "unpack",       signature: "unpack(t: table, i: number?, j: number?): ...any", doc: "Returns the elements of an array." },
    GlobalFunction { name: "tick",         signature: "tick(): number",                                   doc: "Seconds since the Unix epoch, local time." },
    GlobalFunction { name: "time",         signature: "time(): number",                                   doc: "Seconds since the game started running." },
    GlobalFunction { name: "wait",         signature: "wait(seconds: number?): (number, number)",         doc: "Deprecated: yields the thread. Prefer `task.wait`." },
    GlobalFunction { name: "spawn",        signature: "spawn(callback: function)",                        doc: "Deprecated: runs a function on a new thread. Prefer `task.spawn`." },
    GlobalFunction { name: "delay",        signature: "delay(seconds: number, callback: function)",       doc: "Deprecated: runs a function after a delay. Prefer `task.delay`." },
];

pub fn global_function(name: &str) -> Option<&'static GlobalFunction> {
    GLOBAL_FUNCTIONS.iter().find(|f| f.name == name)
}
