mod reader;

pub use reader::{PathElement, SvgPaths};

use crate::Error;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Parses `text` as xml. Doctypes are accepted since map exports usually
/// carry the svg 1.1 one.
pub fn parse_document(text: &str) -> Result<roxmltree::Document<'_>, Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    debug!(nodes = document.descendants().count(), "parsed svg document");
    Ok(document)
}
