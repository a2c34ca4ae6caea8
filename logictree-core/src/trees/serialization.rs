use crate::types::*;
use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;

/// Output formats the converter can render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Canonical JSON logic tree (default)
    #[default]
    Json,
    /// Indented IF / THEN / ELSE / ACTION text, for reading a tree at a glance
    Outline,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "outline" => Ok(OutputFormat::Outline),
            other => Err(format!("unknown output format '{other}' (expected json or outline)")),
        }
    }
}

impl LogicTree {
    /// Pretty JSON with `indent` spaces per level; key order and `then`
    /// array order are preserved.
    pub fn to_json(&self, indent: usize) -> Result<String, serde_json::Error> {
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        match self {
            LogicTree::Rooted(node) => write_outline(node, 0, &mut out),
            LogicTree::Forest(nodes) => {
                for node in nodes {
                    write_outline(node, 0, &mut out);
                }
            }
        }
        out
    }

    pub fn render(&self, format: OutputFormat, indent: usize) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => self.to_json(indent),
            OutputFormat::Outline => Ok(self.to_outline()),
        }
    }
}

fn write_outline(node: &Node, level: usize, out: &mut String) {
    let pad = "  ".repeat(level);
    if let Some(condition) = &node.condition {
        let _ = writeln!(out, "{pad}IF {condition}");
    }
    if let Some(action) = &node.action {
        let _ = writeln!(out, "{pad}ACTION {action}");
    }
    if node.then.is_some() {
        let _ = writeln!(out, "{pad}THEN");
        for child in node.then_children() {
            write_outline(child, level + 1, out);
        }
    }
    if let Some(otherwise) = &node.otherwise {
        let _ = writeln!(out, "{pad}ELSE");
        write_outline(otherwise, level + 1, out);
    }
}
