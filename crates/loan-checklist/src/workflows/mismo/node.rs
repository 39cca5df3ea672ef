//! Minimal element view the extractor walks, independent of the XML library.

use super::normalizer::clean_text;

/// An XML element addressed by local name; namespaces and prefixes are ignored.
pub trait XmlElement: Sized + Clone {
    fn local_name(&self) -> &str;
    fn child_elements(&self) -> Vec<Self>;
    /// Direct character data of the element, if any.
    fn text(&self) -> Option<&str>;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<'a, 'input: 'a> XmlElement for roxmltree::Node<'a, 'input> {
    fn local_name(&self) -> &str {
        self.tag_name().name()
    }

    fn child_elements(&self) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|node| node.is_element())
            .collect()
    }

    fn text(&self) -> Option<&str> {
        roxmltree::Node::text(self)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attributes(self)
            .find(|attribute| attribute.name() == name)
            .map(|attribute| attribute.value())
    }
}

pub(crate) fn child<E: XmlElement>(element: &E, name: &str) -> Option<E> {
    element
        .child_elements()
        .into_iter()
        .find(|child| child.local_name() == name)
}

pub(crate) fn children<E: XmlElement>(element: &E, name: &str) -> Vec<E> {
    element
        .child_elements()
        .into_iter()
        .filter(|child| child.local_name() == name)
        .collect()
}

/// Follows direct children one name at a time, taking the first match per step.
pub(crate) fn path<E: XmlElement>(element: &E, names: &[&str]) -> Option<E> {
    let mut current = element.clone();
    for name in names {
        current = child(&current, name)?;
    }
    Some(current)
}

/// All matching descendants in document order.
pub(crate) fn descendants<E: XmlElement>(element: &E, name: &str) -> Vec<E> {
    let mut found = Vec::new();
    collect_descendants(element, name, &mut found);
    found
}

fn collect_descendants<E: XmlElement>(element: &E, name: &str, found: &mut Vec<E>) {
    for child in element.child_elements() {
        if child.local_name() == name {
            found.push(child.clone());
        }
        collect_descendants(&child, name, found);
    }
}

pub(crate) fn first_descendant<E: XmlElement>(element: &E, name: &str) -> Option<E> {
    for child in element.child_elements() {
        if child.local_name() == name {
            return Some(child);
        }
        if let Some(found) = first_descendant(&child, name) {
            return Some(found);
        }
    }
    None
}

/// Cleaned text of the first descendant named `name`; blank text counts as absent.
pub(crate) fn text_of<E: XmlElement>(element: &E, name: &str) -> Option<String> {
    first_descendant(element, name).and_then(|found| own_text(&found))
}

pub(crate) fn own_text<E: XmlElement>(element: &E) -> Option<String> {
    element.text().and_then(clean_text)
}
