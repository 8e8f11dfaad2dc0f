// src/render/structured.rs

//! Structured (JSON) output document
//!
//! The document has exactly two possible top-level keys:
//! - `results`: the entities exactly as received
//! - `_pagination`: present only when the service reported valid pagination

use super::{Console, OutputMode};
use crate::error::Result;
use crate::models::Entity;
use crate::pagination::{PageInfo, Pagination};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

const PRETTY_INDENT: &[u8] = b"    ";

/// The structured output document
#[derive(Debug, Serialize)]
pub struct StructuredDocument<'a> {
    pub results: &'a [Entity],
    #[serde(rename = "_pagination", skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Build the document for a page of results
pub fn structured_document<'a>(
    results: &'a [Entity],
    page_info: Option<&PageInfo>,
) -> StructuredDocument<'a> {
    StructuredDocument {
        results,
        pagination: page_info.and_then(|info| info.as_pagination(results.len())),
    }
}

/// Serialize the document for the given mode
///
/// Keys come out sorted in both modes; `pretty_json` indents by four spaces.
pub fn serialize_document(document: &StructuredDocument<'_>, mode: OutputMode) -> Result<String> {
    // Round-trip through Value so struct fields sort alongside entity keys
    let value = serde_json::to_value(document)?;
    let text = match mode {
        OutputMode::PrettyJson => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer)?;
            String::from_utf8(buf).map_err(|e| crate::Error::Decode(e.to_string()))?
        }
        OutputMode::Json | OutputMode::Pretty => serde_json::to_string(&value)?,
    };
    Ok(text)
}

/// Emit results as a structured document when the mode asks for one
///
/// Returns `true` when the document was written; the caller must then skip
/// table rendering and the summary line.
pub fn emit_structured<O: Write, E: Write>(
    console: &mut Console<O, E>,
    results: &[Entity],
    page_info: Option<&PageInfo>,
) -> Result<bool> {
    if !console.mode().is_structured() {
        return Ok(false);
    }
    let document = structured_document(results, page_info);
    let text = serialize_document(&document, console.mode())?;
    console.out_line(&text)?;
    Ok(true)
}
