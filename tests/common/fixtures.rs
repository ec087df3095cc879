//! Static documents used across harnesses.

/// A small source file with repeated identifiers and mixed case.
pub const SOURCE: &[&str] = &[
    "use std::collections::HashMap;",
    "",
    "pub struct Cache {",
    "    entries: HashMap<String, Entry>,",
    "    capacity: usize,",
    "}",
    "",
    "impl Cache {",
    "    pub fn new(capacity: usize) -> Self {",
    "        Self { entries: HashMap::new(), capacity }",
    "    }",
    "",
    "    pub fn get(&self, key: &str) -> Option<&Entry> {",
    "        self.entries.get(key)",
    "    }",
    "",
    "    pub fn insert(&mut self, key: String, entry: Entry) {",
    "        if self.entries.len() >= self.capacity {",
    "            self.evict();",
    "        }",
    "        self.entries.insert(key, entry);",
    "    }",
    "}",
    "// TODO: EVICT least recently used",
];

/// Lines with non-ASCII text, for char-column checks.
pub const UNICODE: &[&str] = &[
    "größe: 42",
    "GRÖSSE: 17",
    "naïve café ☕ order",
    "plain ascii order",
    "Ünïcode ÉCOLE here",
];

/// A long document for scrolling and viewport tests.
pub fn numbered(lines: usize) -> Vec<String> {
    (0..lines).map(|i| format!("line {i:04} item-{}", i % 7)).collect()
}
