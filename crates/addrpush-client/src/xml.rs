//! Parsing of API response documents.
//!
//! Responses look like:
//!
//! ```xml
//! <response status="success">
//!   <result total-count="1" count="1">
//!     <address><entry name="web"><ip-netmask>10.1.1.1</ip-netmask></entry></address>
//!   </result>
//! </response>
//! ```
//!
//! Errors carry `status="error"`, an optional `code`, and a message under
//! `msg`, sometimes split across `line` elements.

use roxmltree::{Document, Node};

use crate::{PanosError, Result};

const STATUS_SUCCESS: &str = "success";

fn parse(body: &str) -> Result<Document<'_>> {
    let doc = Document::parse(body)?;
    if !doc.root_element().has_tag_name("response") {
        return Err(PanosError::UnexpectedResponse(format!(
            "root element is <{}>, expected <response>",
            doc.root_element().tag_name().name()
        )));
    }
    Ok(doc)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn result<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>> {
    child(doc.root_element(), "result")
        .ok_or_else(|| PanosError::UnexpectedResponse("response has no <result>".into()))
}

/// Collect the error message of a response element.
fn error_message(response: Node<'_, '_>) -> String {
    let lines: Vec<String> = response
        .descendants()
        .filter(|n| n.has_tag_name("msg"))
        .flat_map(|msg| {
            let lines: Vec<&str> = msg
                .children()
                .filter(|n| n.has_tag_name("line"))
                .filter_map(|n| n.text())
                .collect();
            if lines.is_empty() {
                msg.text().into_iter().collect()
            } else {
                lines
            }
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        "no error message in response".to_string()
    } else {
        lines.join("; ")
    }
}

/// Fail with [`PanosError::Api`] unless the response status is success.
pub fn ensure_success(body: &str) -> Result<()> {
    let doc = parse(body)?;
    let root = doc.root_element();
    if root.attribute("status") == Some(STATUS_SUCCESS) {
        return Ok(());
    }
    Err(PanosError::Api {
        code: root.attribute("code").and_then(|c| c.parse().ok()),
        message: error_message(root),
    })
}

/// Extract the key from a keygen response.
pub fn api_key(body: &str) -> Result<String> {
    let doc = parse(body)?;
    child(result(&doc)?, "key")
        .and_then(|n| n.text())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| PanosError::UnexpectedResponse("keygen response has no key".into()))
}

/// Names of `entry` elements under `result/<container>`.
///
/// A missing container means the node is empty, not an error.
pub fn entry_names(body: &str, container: &str) -> Result<Vec<String>> {
    let doc = parse(body)?;
    let result = result(&doc)?;
    Ok(result
        .children()
        .filter(|n| n.has_tag_name(container))
        .flat_map(|c| c.children().filter(|n| n.has_tag_name("entry")))
        .filter_map(|e| e.attribute("name"))
        .map(str::to_string)
        .collect())
}

/// Text content of `result`, trimmed.
pub fn result_text(body: &str) -> Result<String> {
    let doc = parse(body)?;
    Ok(result(&doc)?.text().unwrap_or_default().trim().to_string())
}

/// Ancestors of a device group in a `show dg-hierarchy` response.
///
/// The hierarchy nests `dg` elements; the ancestors of a device group are
/// its enclosing `dg` elements, nearest first. Returns `None` if the device
/// group is not in the hierarchy.
pub fn dg_ancestors(body: &str, device_group: &str) -> Result<Option<Vec<String>>> {
    let doc = parse(body)?;
    let Some(node) = result(&doc)?
        .descendants()
        .find(|n| n.has_tag_name("dg") && n.attribute("name") == Some(device_group))
    else {
        return Ok(None);
    };

    Ok(Some(
        node.ancestors()
            .skip(1)
            .filter(|n| n.has_tag_name("dg"))
            .filter_map(|n| n.attribute("name"))
            .map(str::to_string)
            .collect(),
    ))
}
