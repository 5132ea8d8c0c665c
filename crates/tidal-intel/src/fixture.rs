//! A miniature API dump, metadata document and reference docs shared by the
//! module tests.

use tidal_kb::{ApiDocs, KnowledgeBase};

pub const DUMP: &str = r#"{
  "Version": 1,
  "Classes": [
    {"Name": "Instance", "Superclass": "<<<ROOT>>>", "Tags": ["NotCreatable", "NotBrowsable"], "Members": [
      {"Name": "Name", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "string"}},
      {"Name": "Parent", "MemberType": "Property", "ValueType": {"Category": "Class", "Name": "Instance"}},
      {"Name": "FindFirstChild", "MemberType": "Function",
       "Parameters": [{"Name": "name", "Type": {"Name": "string"}},
                      {"Name": "recursive", "Type": {"Name": "bool"}, "Default": "false"}],
       "ReturnType": {"Category": "Class", "Name": "Instance"}},
      {"Name": "WaitForChild", "MemberType": "Function",
       "Parameters": [{"Name": "childName", "Type": {"Name": "string"}},
                      {"Name": "timeOut", "Type": {"Name": "double"}, "Default": null}],
       "ReturnType": {"Category": "Class", "Name": "Instance"}},
      {"Name": "Destroy", "MemberType": "Function", "ReturnType": {"Category": "Primitive", "Name": "null"}},
      {"Name": "ChildAdded", "MemberType": "Event", "Parameters": [{"Name": "child", "Type": {"Name": "Instance"}}]}
    ]},
    {"Name": "GuiObject", "Superclass": "Instance", "Tags": ["NotCreatable"], "Members": [
      {"Name": "Position", "MemberType": "Property", "ValueType": {"Category": "DataType", "Name": "UDim2"}}
    ]},
    {"Name": "BasePart", "Superclass": "Instance", "Tags": ["NotCreatable"], "Members": [
      {"Name": "Anchored", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "bool"}},
      {"Name": "Position", "MemberType": "Property", "ValueType": {"Category": "DataType", "Name": "Vector3"}},
      {"Name": "Touched", "MemberType": "Event", "Parameters": [{"Name": "otherPart", "Type": {"Name": "BasePart"}}]}
    ]},
    {"Name": "Part", "Superclass": "BasePart", "Members": [
      {"Name": "Shape", "MemberType": "Property", "ValueType": {"Category": "Enum", "Name": "PartType"}}
    ]},
    {"Name": "Folder", "Superclass": "Instance", "Members": []},
    {"Name": "DataModel", "Superclass": "Instance", "Tags": ["NotCreatable"], "Members": [
      {"Name": "Workspace", "MemberType": "Property", "ValueType": {"Category": "Class", "Name": "Workspace"}},
      {"Name": "JobId", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "string"}},
      {"Name": "GetService", "MemberType": "Function",
       "Parameters": [{"Name": "className", "Type": {"Name": "string"}}],
       "ReturnType": {"Category": "Class", "Name": "Instance"}}
    ]},
    {"Name": "Workspace", "Superclass": "Instance", "Tags": ["NotCreatable", "Service"], "Members": [
      {"Name": "Gravity", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "float"}},
      {"Name": "CurrentCamera", "MemberType": "Property", "ValueType": {"Category": "Class", "Name": "Camera"}},
      {"Name": "PhysicsSecret", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "bool"},
       "Security": {"Read": "RobloxScriptSecurity", "Write": "RobloxScriptSecurity"}},
      {"Name": "FilteringEnabled", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "bool"},
       "Tags": ["Deprecated", {"PreferredDescriptorName": "none"}]},
      {"Name": "Raycast", "MemberType": "Function",
       "Parameters": [{"Name": "origin", "Type": {"Name": "Vector3"}},
                      {"Name": "direction", "Type": {"Name": "Vector3"}}],
       "ReturnType": {"Category": "DataType", "Name": "RaycastResult"}}
    ]},
    {"Name": "Camera", "Superclass": "Instance", "Members": [
      {"Name": "FieldOfView", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "float"}},
      {"Name": "CFrame", "MemberType": "Property", "ValueType": {"Category": "DataType", "Name": "CFrame"}}
    ]},
    {"Name": "Script", "Superclass": "Instance", "Members": [
      {"Name": "Disabled", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "bool"}}
    ]},
    {"Name": "Plugin", "Superclass": "Instance", "Tags": ["NotCreatable"], "Members": [
      {"Name": "CreateToolbar", "MemberType": "Function", "Security": "PluginSecurity",
       "Parameters": [{"Name": "name", "Type": {"Name": "string"}}],
       "ReturnType": {"Category": "Class", "Name": "Instance"}},
      {"Name": "Unloading", "MemberType": "Event"}
    ]},
    {"Name": "Players", "Superclass": "Instance", "Tags": ["NotCreatable", "Service"], "Members": [
      {"Name": "LocalPlayer", "MemberType": "Property", "ValueType": {"Category": "Class", "Name": "Player"}},
      {"Name": "PlayerAdded", "MemberType": "Event", "Parameters": [{"Name": "player", "Type": {"Name": "Player"}}]},
      {"Name": "GetPlayers", "MemberType": "Function", "ReturnType": {"Category": "Group", "Name": "Objects"}}
    ]},
    {"Name": "Lighting", "Superclass": "Instance", "Tags": ["NotCreatable", "Service"], "Members": [
      {"Name": "ClockTime", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "float"}}
    ]},
    {"Name": "Player", "Superclass": "Instance", "Tags": ["NotCreatable"], "Members": [
      {"Name": "UserId", "MemberType": "Property", "ValueType": {"Category": "Primitive", "Name": "int64"}},
      {"Name": "Kick", "MemberType": "Function",
       "Parameters": [{"Name": "message", "Type": {"Name": "string"}, "Default": ""}],
       "ReturnType": {"Category": "Primitive", "Name": "null"}}
    ]}
  ],
  "Enums": [
    {"Name": "KeyCode", "Items": [
      {"Name": "Space", "Value": 32},
      {"Name": "A", "Value": 97},
      {"Name": "B", "Value": 98}
    ]},
    {"Name": "Material", "Items": [
      {"Name": "Plastic", "Value": 256},
      {"Name": "Neon", "Value": 288},
      {"Name": "Pebble", "Value": 1248, "Tags": ["Deprecated"]}
    ]},
    {"Name": "PartType", "Items": [
      {"Name": "Ball", "Value": 0},
      {"Name": "Block", "Value": 1}
    ]}
  ]
}"#;

pub const METADATA: &str = r#"<?xml version="1.0"?>
<StudioAutocomplete>
  <LuaLibrary name="_G">
    <Function name="print">
      <parameters><variant name="..."/></parameters>
      <description>Prints all provided values to the output.</description>
    </Function>
  </LuaLibrary>
  <LuaLibrary name="math" description="Mathematical functions">
    <Function name="clamp">
      <parameters>
        <number name="x"/>
        <number name="min"/>
        <number name="max"/>
      </parameters>
      <returns><number/></returns>
      <description>Returns x clamped between min and max.</description>
    </Function>
    <Function name="floor">
      <parameters><number name="x"/></parameters>
      <returns><number/></returns>
    </Function>
    <Properties>
      <number name="pi">The value of pi.</number>
    </Properties>
  </LuaLibrary>
  <LuaLibrary name="task">
    <Function name="wait">
      <parameters><number name="duration" optional="true"/></parameters>
      <returns><number/></returns>
      <description>Yields the current thread.</description>
    </Function>
  </LuaLibrary>
  <ItemStruct name="Vector3">
    <Function name="new" static="true">
      <parameters>
        <number name="x" optional="true"/>
        <number name="y" optional="true"/>
        <number name="z" optional="true"/>
      </parameters>
      <returns><Vector3/></returns>
      <description>Creates a new Vector3.</description>
    </Function>
    <Function name="Dot">
      <parameters><Vector3 name="other"/></parameters>
      <returns><number/></returns>
    </Function>
    <Properties>
      <number name="Magnitude"/>
    </Properties>
  </ItemStruct>
</StudioAutocomplete>"#;

pub const DOCS: &str = r#"{
  "@roblox/globaltype/Workspace": {"documentation": "Houses every object in the 3D world."},
  "@roblox/globaltype/Workspace.Gravity": {"documentation": "Downward acceleration in studs per second squared."},
  "@roblox/enum/KeyCode": {"documentation": "Keyboard key codes."},
  "@roblox/enum/KeyCode.Space": {"documentation": "The space bar."},
  "@roblox/global/print": {"documentation": "Prints to the output."}
}"#;

/// The fixture dump with metadata and docs attached.
pub fn kb() -> KnowledgeBase {
    KnowledgeBase::from_dump_json(DUMP)
        .expect("fixture dump parses")
        .with_metadata_xml(METADATA)
        .with_docs(ApiDocs::parse(DOCS).expect("fixture docs parse"))
}

/// Class and enum tables only; `library()` is empty.
pub fn kb_without_metadata() -> KnowledgeBase {
    KnowledgeBase::from_dump_json(DUMP).expect("fixture dump parses")
}
