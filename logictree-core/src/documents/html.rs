//! Lenient HTML5 backend built on `scraper`.
//!
//! HTML5 tree construction inserts implied elements, so a table written as
//! `<table><tr>..` comes back as `<table><tbody><tr>..`.

use super::DocumentElement;
use scraper::{ElementRef, Html};

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parsing never fails; malformed markup is repaired the way browsers do.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn root(&self) -> HtmlElement<'_> {
        HtmlElement(self.html.root_element())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl<'a> HtmlElement<'a> {
    pub fn tag_name(&self) -> &'a str {
        self.0.value().name()
    }

    fn has_tag(element: &ElementRef<'a>, tag: &str) -> bool {
        element.value().name().eq_ignore_ascii_case(tag)
    }
}

impl<'a> DocumentElement for HtmlElement<'a> {
    fn find_first(&self, tag: &str) -> Option<Self> {
        self.0
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| Self::has_tag(element, tag))
            .map(HtmlElement)
    }

    fn find_children(&self, tag: &str, recursive: bool) -> Vec<Self> {
        if recursive {
            self.0
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|element| Self::has_tag(element, tag))
                .map(HtmlElement)
                .collect()
        } else {
            self.0
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|element| Self::has_tag(element, tag))
                .map(HtmlElement)
                .collect()
        }
    }

    fn text_content(&self) -> String {
        self.0.text().collect()
    }
}
