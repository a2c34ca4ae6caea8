//! Document backends
//!
//! The tree builder never touches a parser directly. It walks any element
//! type that offers the three lookups below, and every lookup answers with an
//! empty result (`None` / empty `Vec` / empty `String`) instead of failing.
//!
//! ```text
//! markup (HTML, XHTML)
//!     ↓
//! [HtmlDocument | XhtmlDocument]
//!     ↓
//! DocumentElement (find_first / find_children / text_content)
//!     ↓
//! [TreeBuilder]
//! ```

pub mod html;
pub mod xhtml;

pub use html::{HtmlDocument, HtmlElement};
pub use xhtml::{XhtmlDocument, XhtmlElement};

/// Read-only navigation over one element of a parsed document.
///
/// Tag names are matched case-insensitively.
pub trait DocumentElement: Sized {
    /// First descendant (document order, excluding `self`) with this tag
    fn find_first(&self, tag: &str) -> Option<Self>;

    /// Children with this tag, in document order. Non-recursive looks only at
    /// immediate element children; recursive looks at every descendant.
    fn find_children(&self, tag: &str, recursive: bool) -> Vec<Self>;

    /// Concatenated text of all descendant text nodes, unnormalized
    fn text_content(&self) -> String;
}
