//! Palette trees (`*palcus.itp`) decoded from GFF JSON
//!
//! The GFF converter wraps every field as `{"type": "...", "value": X}`; hand
//! written fixtures often use the bare value `X`. Both forms are accepted.
//!
//! ```text
//! MAIN: [
//!   { STRREF: 5, ID: 1, LIST: [          <- category
//!       { RESREF: "crow01", NAME: ... }  <- leaf
//!   ]}
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One node of a palette tree, classified once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteNode {
    /// A named grouping level. Contributes a directory and a manifest line.
    Category {
        strref: u32,
        id: Option<u32>,
        children: Vec<PaletteNode>,
    },
    /// A reference to one blueprint file.
    Leaf { resref: String },
}

impl PaletteNode {
    /// Build a node from one GFF struct.
    ///
    /// A struct carrying `RESREF` is a leaf; any other struct must carry `STRREF`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| invalid(format!("expected a struct, found {}", kind_of(value))))?;

        if let Some(resref) = field(fields, "RESREF") {
            let resref = resref.as_str().ok_or_else(|| {
                invalid(format!("RESREF must be a string, found {}", kind_of(resref)))
            })?;
            return Ok(PaletteNode::Leaf {
                resref: resref.to_string(),
            });
        }

        let strref = field(fields, "STRREF")
            .ok_or_else(|| invalid("category node has neither RESREF nor STRREF".to_string()))
            .and_then(|v| as_u32(v, "STRREF"))?;

        let id = field(fields, "ID").map(|v| as_u32(v, "ID")).transpose()?;

        let children = match field(fields, "LIST") {
            Some(list) => parse_list(list, "LIST")?,
            None => Vec::new(),
        };

        Ok(PaletteNode::Category {
            strref,
            id,
            children,
        })
    }

    /// Number of category nodes in this subtree, including this one.
    pub fn category_count(&self) -> usize {
        match self {
            PaletteNode::Category { children, .. } => {
                1 + children.iter().map(PaletteNode::category_count).sum::<usize>()
            }
            PaletteNode::Leaf { .. } => 0,
        }
    }
}

/// A whole palette document: the ordered top-level entries of `MAIN`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteTree {
    pub entries: Vec<PaletteNode>,
}

impl PaletteTree {
    /// Read a converted palette JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json(&value)
    }

    /// Build from the converter's root struct
    pub fn from_json(value: &Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| {
            invalid(format!("palette root must be a struct, found {}", kind_of(value)))
        })?;
        let main =
            field(root, "MAIN").ok_or_else(|| invalid("palette has no MAIN list".to_string()))?;
        Ok(Self {
            entries: parse_list(main, "MAIN")?,
        })
    }

    pub fn category_count(&self) -> usize {
        self.entries.iter().map(PaletteNode::category_count).sum()
    }
}

/// Field lookup that unwraps the converter's `{"type", "value"}` envelope.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let raw = fields.get(name)?;
    match raw {
        Value::Object(wrapped) if wrapped.contains_key("value") => wrapped.get("value"),
        _ => Some(raw),
    }
}

fn parse_list(value: &Value, name: &str) -> Result<Vec<PaletteNode>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("{name} must be a list, found {}", kind_of(value))))?
        .iter()
        .map(PaletteNode::from_json)
        .collect()
}

fn as_u32(value: &Value, name: &str) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| invalid(format!("{name} must be an unsigned 32-bit integer, found {value}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a struct",
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidPaletteTree { message }
}
