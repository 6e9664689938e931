//! Build a [`Node`] tree from XML text.
//!
//! Archive extraction is the caller's job; this only turns the text of one
//! part (`slide1.xml`, `theme1.xml`, ...) into a tree.

use super::node::Node;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

impl Node {
    /// Parse an XML document and return its root element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use drawingml_style::Node;
    ///
    /// let node = Node::from_xml(r#"<a:srgbClr val="FF0000"><a:alpha val="50000"/></a:srgbClr>"#).unwrap();
    /// assert_eq!(node.name(), "srgbClr");
    /// assert_eq!(node.child("alpha").and_then(|a| a.attr("val")), Some("50000"));
    /// ```
    pub fn from_xml(xml: &str) -> Result<Node> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from(e)?);
                },
                Ok(Event::Empty(ref e)) => {
                    let node = element_from(e)?;
                    attach(&mut stack, &mut root, node)?;
                },
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("Unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                },
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let t = std::str::from_utf8(e.as_ref())?;
                        current.push_text(t);
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(current) = stack.last_mut() {
                        if let Ok(Some(ch)) = e.resolve_char_ref() {
                            current.push_text(ch.encode_utf8(&mut [0; 4]));
                        } else {
                            let name = std::str::from_utf8(e.as_ref())?;
                            if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(name) {
                                current.push_text(resolved);
                            }
                        }
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let t = std::str::from_utf8(e.as_ref())?;
                        current.push_text(t);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
        }

        if !stack.is_empty() {
            return Err(Error::Xml(format!("Unclosed element <{}>", stack[stack.len() - 1].name())));
        }
        root.ok_or_else(|| Error::InvalidFormat("Document has no root element".to_string()))
    }
}

fn element_from(e: &BytesStart<'_>) -> Result<Node> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut node = Node::new(&name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr.unescape_value().map_err(|e| Error::Xml(e.to_string()))?;
        node.set_attr(key, value.as_ref());
    }
    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => {
            if root.is_some() {
                return Err(Error::InvalidFormat("Multiple root elements".to_string()));
            }
            *root = Some(node);
        },
    }
    Ok(())
}
