//! lessondoc-wasm - WebAssembly bindings for lessondoc
//!
//! This crate provides WASM bindings to render lesson documents in web
//! browsers and other WASM-compatible environments. Documents and
//! vocabulary entries cross the boundary as JSON text.

use lessondoc_ast::{lenient, DocumentNode, VocabularyEntry};
use lessondoc_core::{
    build_reference_map, inspect_document, render_document_html, RenderConfig, RenderContext,
    Renderer,
};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Returns the current version of lessondoc
#[wasm_bindgen]
pub fn version() -> String {
    lessondoc_core::VERSION.to_string()
}

/// Render a document tree to an HTML fragment
///
/// `document_json` may be `null` for an absent document.
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document(document_json: &str, vocabulary_json: &str) -> Result<String, JsValue> {
    render_html(document_json, vocabulary_json, None).map_err(to_js_error)
}

/// Render a document tree to HTML using TOML settings
#[wasm_bindgen(js_name = renderDocumentWithConfig)]
pub fn render_document_with_config(
    document_json: &str,
    vocabulary_json: &str,
    config_toml: &str,
) -> Result<String, JsValue> {
    render_html(document_json, vocabulary_json, Some(config_toml)).map_err(to_js_error)
}

/// Render a document tree to its presentation tree as a JS object
#[wasm_bindgen(js_name = renderTree)]
pub fn render_tree(document_json: &str, vocabulary_json: &str) -> Result<JsValue, JsValue> {
    let (document, entries) = parse_inputs(document_json, vocabulary_json).map_err(to_js_error)?;
    let config = RenderConfig::default();
    let references = build_reference_map(&entries);
    let nodes =
        Renderer::new(&config.card).render(document.as_ref(), RenderContext::new(&references));
    serde_wasm_bindgen::to_value(&nodes).map_err(JsValue::from)
}

/// Inspect a document tree, returning diagnostics as JSON
#[wasm_bindgen(js_name = inspectDocument)]
pub fn inspect_document_json(
    document_json: &str,
    vocabulary_json: &str,
) -> Result<String, JsValue> {
    inspect_json(document_json, vocabulary_json).map_err(to_js_error)
}

fn render_html(
    document_json: &str,
    vocabulary_json: &str,
    config_toml: Option<&str>,
) -> lessondoc_core::Result<String> {
    let (document, entries) = parse_inputs(document_json, vocabulary_json)?;
    let config = match config_toml {
        Some(toml) => RenderConfig::from_toml_str(toml)?,
        None => RenderConfig::default(),
    };
    Ok(render_document_html(document.as_ref(), &entries, &config))
}

fn inspect_json(document_json: &str, vocabulary_json: &str) -> lessondoc_core::Result<String> {
    let (document, entries) = parse_inputs(document_json, vocabulary_json)?;
    let diagnostics = inspect_document(document.as_ref(), &build_reference_map(&entries));
    Ok(serde_json::to_string(&diagnostics)?)
}

/// Parse the document and the vocabulary
///
/// Blank, `null` or non-array vocabulary means none; malformed entries are
/// skipped.
fn parse_inputs(
    document_json: &str,
    vocabulary_json: &str,
) -> lessondoc_core::Result<(Option<DocumentNode>, Vec<VocabularyEntry>)> {
    let document = serde_json::from_str(document_json)?;
    let entries = if vocabulary_json.trim().is_empty() {
        Vec::new()
    } else {
        match serde_json::from_str(vocabulary_json)? {
            Value::Array(items) => lenient::collect_valid(items),
            _ => Vec::new(),
        }
    };
    Ok((document, entries))
}

fn to_js_error(err: lessondoc_core::LessonError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
