//! Thin document-fragment helpers over `scraper::ElementRef`.
//!
//! The extraction engine never depends on a site's fixed DOM schema, only on
//! this narrow capability set: first/all descendant lookup by tag set plus
//! attribute predicate, and text collection. Fragments are read-only views.

use scraper::ElementRef;

/// All descendant elements of `root` in document order, excluding `root`.
pub fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
}

/// First descendant whose tag is in `tags` and which satisfies `predicate`.
pub fn find_first<'a, F>(root: ElementRef<'a>, tags: &[&str], predicate: F) -> Option<ElementRef<'a>>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    descendant_elements(root)
        .find(|el| tags.contains(&el.value().name()) && predicate(el))
}

/// All descendants whose tag is in `tags` and which satisfy `predicate`,
/// in document order.
pub fn find_all<'a, F>(root: ElementRef<'a>, tags: &[&str], predicate: F) -> Vec<ElementRef<'a>>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    descendant_elements(root)
        .filter(|el| tags.contains(&el.value().name()) && predicate(el))
        .collect()
}

/// Whether the element's `class` attribute contains any of `needles`,
/// case-insensitively.
pub fn class_contains_any(el: &ElementRef<'_>, needles: &[&str]) -> bool {
    el.value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            needles.iter().any(|needle| class.contains(needle))
        })
        .unwrap_or(false)
}

/// Whether the element carries the named attribute at all.
pub fn has_attr(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().attr(name).is_some()
}

/// Concatenated text content. With `trimmed`, each text node is trimmed
/// before joining so markup indentation never leaks into names.
pub fn text_content(el: ElementRef<'_>, trimmed: bool) -> String {
    if trimmed {
        el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
    } else {
        el.text().collect()
    }
}

/// Non-empty trimmed lines of the fragment's raw text, in document order.
pub fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    text_content(el, false)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
