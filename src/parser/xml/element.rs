use crate::error::{AnalyzerError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use tracing::debug;

/// Minimal element tree built from a Katalon XML document.
///
/// Only element names, direct text and child order are kept; attributes are
/// not used by any Katalon artifact format we read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn named(start: &BytesStart) -> Self {
        Self {
            name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Text appearing before the first child element, like ElementTree's `.text`
    fn push_text(&mut self, text: &str) {
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }

    /// Parse a well-formed document and return its root element
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let contents = contents.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(contents);
        reader.check_end_names(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(AnalyzerError::xml(path, "multiple root elements"));
                    }
                    stack.push(XmlElement::named(e));
                }
                Ok(Event::Empty(ref e)) => {
                    attach(path, &mut stack, &mut root, XmlElement::named(e))?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| AnalyzerError::xml(path, "unexpected closing tag"))?;
                    attach(path, &mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| AnalyzerError::xml(path, err.to_string()))?;
                    push_text(path, &mut stack, &text)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e).to_string();
                    push_text(path, &mut stack, &text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(AnalyzerError::xml(
                        path,
                        format!("{} at position {}", e, reader.buffer_position()),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(AnalyzerError::xml(
                path,
                format!("unclosed element <{}>", open.name),
            ));
        }

        root.ok_or_else(|| AnalyzerError::xml(path, "no root element"))
    }

    /// Trimmed text of this element
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == tag)
    }

    /// All direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == tag)
    }

    /// Trimmed text of the first `tag` child, or `default` when the child is
    /// missing or has no text
    pub fn child_text_or(&self, tag: &str, default: &str) -> String {
        match self.child(tag) {
            Some(child) if !child.text().is_empty() => child.text().to_string(),
            _ => default.to_string(),
        }
    }

    /// Trimmed text of the first `tag` child, or an empty string
    pub fn child_text(&self, tag: &str) -> String {
        self.child_text_or(tag, "")
    }

    /// `true` when the child's lower-cased text is exactly "true"
    pub fn child_bool(&self, tag: &str, default: bool) -> bool {
        let fallback = if default { "true" } else { "false" };
        self.child_text_or(tag, fallback).to_lowercase() == "true"
    }

    /// Child text parsed as an integer, falling back to `default` when missing
    /// or not a number
    pub fn child_u32(&self, tag: &str, default: u32) -> u32 {
        let text = self.child_text(tag);
        if text.is_empty() {
            return default;
        }
        match text.parse() {
            Ok(value) => value,
            Err(_) => {
                debug!("Ignoring non-numeric <{}> value {:?}", tag, text);
                default
            }
        }
    }
}

fn attach(
    path: &Path,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_some() {
        Err(AnalyzerError::xml(path, "multiple root elements"))
    } else {
        *root = Some(element);
        Ok(())
    }
}

fn push_text(path: &Path, stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(AnalyzerError::xml(path, "text outside of the root element")),
    }
}
