//! HTML import (HTML → [`Element`] list)
//!
//! Pipeline: HTML string → RcDom → top-level `<body>` elements

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::Element;

/// Parse an HTML document and return the element children of `<body>`.
///
/// Text and comment nodes sitting directly under `<body>` are dropped.
/// html5ever always synthesizes a body, so a fragment without one yields
/// its top-level elements too.
pub fn body_elements(html: &str) -> Vec<Element> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    match find_body(&dom.document) {
        Some(body) => body
            .children
            .borrow()
            .iter()
            .filter_map(convert)
            .collect(),
        None => Vec::new(),
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data
        && name.local.as_ref() == "body"
    {
        return Some(handle.clone());
    }
    handle.children.borrow().iter().find_map(find_body)
}

/// Convert an element node; `None` for text, comments and the rest.
fn convert(handle: &Handle) -> Option<Element> {
    let NodeData::Element { name, attrs, .. } = &handle.data else {
        return None;
    };

    let attrs = attrs
        .borrow()
        .iter()
        .map(|a| {
            (
                a.name.local.as_ref().to_ascii_lowercase(),
                a.value.to_string(),
            )
        })
        .collect();

    let mut text = String::new();
    collect_text(handle, &mut text);

    let children = handle.children.borrow().iter().filter_map(convert).collect();

    Some(Element::from_parts(
        name.local.as_ref().to_ascii_lowercase(),
        attrs,
        text,
        children,
    ))
}

fn collect_text(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, out),
            _ => {}
        }
    }
}
