use roxmltree::{Descendants, Document, Node};

use super::SVG_NS;

/// The attributes of an svg `<path>` needed for region matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathElement<'a> {
    /// Empty when the element has no `class`.
    pub class: &'a str,
    pub d: Option<&'a str>,
    /// Byte offset of the element in the source text, resolve it with
    /// [`Document::text_pos_at`].
    pub offset: usize,
}

/// Every `<path>` in the svg namespace, in document order.
pub struct SvgPaths<'a, 'input> {
    nodes: Descendants<'a, 'input>,
}

impl<'a, 'input> SvgPaths<'a, 'input> {
    pub fn new(document: &'a Document<'input>) -> Self {
        Self {
            nodes: document.descendants(),
        }
    }
}

fn is_svg_path(node: &Node) -> bool {
    let tag = node.tag_name();
    node.is_element() && tag.namespace() == Some(SVG_NS) && tag.name() == "path"
}

impl<'a, 'input> Iterator for SvgPaths<'a, 'input> {
    type Item = PathElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.find(is_svg_path)?;
        Some(PathElement {
            class: node.attribute("class").unwrap_or_default(),
            d: node.attribute("d"),
            offset: node.range().start,
        })
    }
}
