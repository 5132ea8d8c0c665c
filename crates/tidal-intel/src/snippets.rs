//! Snippet library.  Bodies use `${n:placeholder}` tab stops.

pub struct Snippet {
    pub label: &'static str,
    pub prefix: &'static str,
    pub body: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub static SNIPPETS: &[Snippet] = &[
    // basic
    Snippet { label: "local variable",       prefix: "local",   category: "basic",     description: "Declare a local variable",        body: "local ${1:name} = ${2:value}" },
    Snippet { label: "if statement",         prefix: "if",      category: "basic",     description: "Conditional block",               body: "if ${1:condition} then\n\t${2}\nend" },
    Snippet { label: "if else",              prefix: "ife",     category: "basic",     description: "Conditional with else branch",    body: "if ${1:condition} then\n\t${2}\nelse\n\t${3}\nend" },
    // loops
    Snippet { label: "for loop numeric",     prefix: "forn",    category: "loops",     description: "Numeric for loop",                body: "for ${1:i} = ${2:1}, ${3:10} do\n\t${4}\nend" },
    Snippet { label: "for loop pairs",       prefix: "forp",    category: "loops",     description: "Iterate key/value pairs",         body: "for ${1:key}, ${2:value} in pairs(${3:t}) do\n\t${4}\nend" },
    Snippet { label: "for loop ipairs",      prefix: "fori",    category: "loops",     description: "Iterate an array in order",       body: "for ${1:index}, ${2:value} in ipairs(${3:array}) do\n\t${4}\nend" },
    Snippet { label: "while loop",           prefix: "while",   category: "loops",     description: "While loop",                      body: "while ${1:condition} do\n\t${2}\nend" },
    Snippet { label: "repeat until",         prefix: "repeat",  category: "loops",     description: "Repeat-until loop",               body: "repeat\n\t${1}\nuntil ${2:condition}" },
    // functions
    Snippet { label: "function declaration", prefix: "func",    category: "functions", description: "Global function",                 body: "function ${1:name}(${2})\n\t${3}\nend" },
    Snippet { label: "local function",       prefix: "lfunc",   category: "functions", description: "Local function",                  body: "local function ${1:name}(${2})\n\t${3}\nend" },
    Snippet { label: "anonymous function",   prefix: "afunc",   category: "functions", description: "Function expression",             body: "function(${1})\n\t${2}\nend" },
    // roblox
    Snippet { label: "Instance.new",         prefix: "new",     category: "roblox",    description: "Create a new instance",           body: "local ${1:part} = Instance.new(\"${2:Part}\")" },
    Snippet { label: "GetService",           prefix: "service", category: "roblox",    description: "Fetch a service",                 body: "local ${1:Players} = game:GetService(\"${1:Players}\")" },
    Snippet { label: "Connect event",        prefix: "connect", category: "roblox",    description: "Connect to a signal",             body: "${1:signal}:Connect(function(${2})\n\t${3}\nend)" },
    Snippet { label: "WaitForChild",         prefix: "wfc",     category: "roblox",    description: "Wait for a child to exist",       body: "local ${1:child} = ${2:parent}:WaitForChild(\"${3:Name}\")" },
    Snippet { label: "FindFirstChild",       prefix: "ffc",     category: "roblox",    description: "Find a child by name",            body: "local ${1:child} = ${2:parent}:FindFirstChild(\"${3:Name}\")" },
    Snippet { label: "task.spawn",           prefix: "spawn",   category: "roblox",    description: "Run a function on a new thread",  body: "task.spawn(function()\n\t${1}\nend)" },
    Snippet { label: "RemoteEvent client",   prefix: "remoteclient", category: "roblox", description: "Fire a RemoteEvent from the client",
              body: "local ${1:remote} = game:GetService(\"ReplicatedStorage\"):WaitForChild(\"${2:RemoteName}\")\n\n${1:remote}:FireServer(${3})" },
    Snippet { label: "RemoteEvent server",   prefix: "remoteserver", category: "roblox", description: "Handle a RemoteEvent on the server",
              body: "local ${1:remote} = game:GetService(\"ReplicatedStorage\"):WaitForChild(\"${2:RemoteName}\")\n\n${1:remote}.OnServerEvent:Connect(function(player, ${3})\n\t${4}\nend)" },
    // exploit
    Snippet { label: "hookfunction hook",    prefix: "hookfunc", category: "exploit",  description: "Hook a function, keeping the original",
              body: "local old${1:Name}\nold${1:Name} = hookfunction(${2:target}, function(...)\n\t${3}\n\treturn old${1:Name}(...)\nend)" },
    Snippet { label: "getgenv assignment",   prefix: "genv",    category: "exploit",   description: "Store a value in the executor environment", body: "getgenv().${1:name} = ${2:value}" },
    Snippet { label: "loadstring HttpGet",   prefix: "lsget",   category: "exploit",   description: "Load and run remote source",      body: "loadstring(game:HttpGet(\"${1:url}\"))()" },
];
