// XML navigation helpers shared by the dialect parsers

use roxmltree::{ExpandedName, Node};

use super::Result;
use crate::error::NormalizeError;

/// Element children matching `name`. A name without namespace matches on local name only.
pub(crate) fn child_elements<'a, 'input, 'n, 'm>(
    node: Node<'a, 'input>,
    name: impl Into<ExpandedName<'n, 'm>>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let name = name.into();
    let (uri, local) = (name.namespace(), name.name());
    node.children().filter(move |n| {
        n.is_element()
            && n.tag_name().name() == local
            && (uri.is_none() || n.tag_name().namespace() == uri)
    })
}

pub(crate) fn child_element<'a, 'input, 'n, 'm>(
    node: Node<'a, 'input>,
    name: impl Into<ExpandedName<'n, 'm>>,
) -> Option<Node<'a, 'input>> {
    child_elements(node, name).next()
}

/// Follow a path of element names, taking the first match at every step
pub(crate) fn find_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[(&str, &str)],
) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(node, |current, step| child_element(current, *step))
}

pub(crate) fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: (&str, &str),
) -> Result<Node<'a, 'input>> {
    child_element(node, name)
        .ok_or_else(|| NormalizeError::missing_element(name.1, node.tag_name().name()))
}

/// All descendant text of `node`, trimmed
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Text of a required child element
pub(crate) fn required_text(node: Node<'_, '_>, name: (&str, &str)) -> Result<String> {
    required_child(node, name).map(text_content)
}

/// Text of an optional child element; `None` when absent or blank
pub(crate) fn optional_text(node: Node<'_, '_>, name: (&str, &str)) -> Option<String> {
    child_element(node, name)
        .map(text_content)
        .filter(|text| !text.is_empty())
}

/// Non-negative integer from a required child element
pub(crate) fn required_count(node: Node<'_, '_>, name: (&str, &str)) -> Result<usize> {
    let text = required_text(node, name)?;
    parse_count(name.1, &text)
}

pub(crate) fn parse_count(field: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| NormalizeError::invalid_value(field, value, e.to_string()))
}

/// Optional integer attribute, defaulting to zero when absent
pub(crate) fn count_attribute(node: Node<'_, '_>, attribute: &str) -> Result<usize> {
    match node.attribute(attribute) {
        Some(value) => parse_count(attribute, value),
        None => Ok(0),
    }
}
