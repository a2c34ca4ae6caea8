//! Strict XHTML backend built on `quick-xml`.
//!
//! The markup is read once into a flat arena of elements; handles are
//! `(document, index)` pairs so they stay `Copy` like the HTML ones. Index 0
//! is a synthetic document node, so the outermost element is itself a
//! descendant of the root.

use super::DocumentElement;
use crate::error::DocumentError;
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug)]
struct XmlElement {
    name: String,
    children: Vec<XmlContent>,
}

#[derive(Debug)]
enum XmlContent {
    Element(usize),
    Text(String),
}

#[derive(Debug)]
pub struct XhtmlDocument {
    elements: Vec<XmlElement>,
}

impl XhtmlDocument {
    pub fn parse(markup: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(markup);
        let mut elements = vec![XmlElement {
            name: "#document".to_string(),
            children: Vec::new(),
        }];
        // open elements; the document node is never popped
        let mut open = vec![0usize];

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let id = Self::push_element(&mut elements, &open, start.local_name().as_ref());
                    open.push(id);
                }
                Event::Empty(empty) => {
                    Self::push_element(&mut elements, &open, empty.local_name().as_ref());
                }
                Event::End(_) => {
                    if open.len() > 1 {
                        open.pop();
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    Self::push_text(&mut elements, &open, text);
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    Self::push_text(&mut elements, &open, text);
                }
                Event::Eof => break,
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        Ok(Self { elements })
    }

    pub fn root(&self) -> XhtmlElement<'_> {
        XhtmlElement { doc: self, id: 0 }
    }

    fn push_element(elements: &mut Vec<XmlElement>, open: &[usize], name: &[u8]) -> usize {
        let id = elements.len();
        elements.push(XmlElement {
            name: String::from_utf8_lossy(name).to_ascii_lowercase(),
            children: Vec::new(),
        });
        let parent = open.last().copied().unwrap_or(0);
        elements[parent].children.push(XmlContent::Element(id));
        id
    }

    fn push_text(elements: &mut [XmlElement], open: &[usize], text: String) {
        let parent = open.last().copied().unwrap_or(0);
        elements[parent].children.push(XmlContent::Text(text));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct XhtmlElement<'a> {
    doc: &'a XhtmlDocument,
    id: usize,
}

impl<'a> XhtmlElement<'a> {
    pub fn tag_name(&self) -> &'a str {
        &self.doc.elements[self.id].name
    }

    fn at(&self, id: usize) -> Self {
        Self { doc: self.doc, id }
    }

    fn child_ids(&self, id: usize) -> impl Iterator<Item = usize> + 'a {
        let doc: &'a XhtmlDocument = self.doc;
        doc.elements[id].children.iter().filter_map(|c| match c {
            XmlContent::Element(child) => Some(*child),
            XmlContent::Text(_) => None,
        })
    }

    /// Descendant element ids in document order, excluding `self`
    fn descendant_ids(&self) -> Vec<usize> {
        let mut ordered = Vec::new();
        let mut stack: Vec<usize> = self.child_ids(self.id).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            ordered.push(id);
            let mut children: Vec<usize> = self.child_ids(id).collect();
            children.reverse();
            stack.extend(children);
        }
        ordered
    }

    fn has_tag(&self, id: usize, tag: &str) -> bool {
        self.doc.elements[id].name.eq_ignore_ascii_case(tag)
    }

    fn collect_text(&self, id: usize, out: &mut String) {
        for child in &self.doc.elements[id].children {
            match child {
                XmlContent::Text(text) => out.push_str(text),
                XmlContent::Element(child) => self.collect_text(*child, out),
            }
        }
    }
}

impl<'a> DocumentElement for XhtmlElement<'a> {
    fn find_first(&self, tag: &str) -> Option<Self> {
        self.descendant_ids()
            .into_iter()
            .find(|&id| self.has_tag(id, tag))
            .map(|id| self.at(id))
    }

    fn find_children(&self, tag: &str, recursive: bool) -> Vec<Self> {
        let candidates: Vec<usize> = if recursive {
            self.descendant_ids()
        } else {
            self.child_ids(self.id).collect()
        };
        candidates
            .into_iter()
            .filter(|&id| self.has_tag(id, tag))
            .map(|id| self.at(id))
            .collect()
    }

    fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(self.id, &mut text);
        text
    }
}
