//! Dot/bracket rendering of paths found during traversal.
//!
//! Notation: the first token is written as-is; later tokens are written as
//! `.name` when their owner is an object and `[n]` when their owner is an
//! array. Nothing is quoted or escaped.

use crate::document::node::ChildKey;

/// Renders the path of a child given its parent's path.
///
/// `parent` is `None` for children of the traversal root, which render bare
/// regardless of the owner's kind.
///
/// # Example
///
/// ```
/// use structprobe::document::ChildKey;
/// use structprobe::path::render::child_path;
///
/// let b = child_path(None, &ChildKey::Field("b".into()));
/// let d = child_path(Some(&b), &ChildKey::Field("d".into()));
/// let first = child_path(Some(&d), &ChildKey::Index(0));
/// assert_eq!(first, "b.d[0]");
/// ```
pub fn child_path(parent: Option<&str>, key: &ChildKey) -> String {
    match (parent, key) {
        (None, key) => key.to_string(),
        (Some(parent), ChildKey::Field(name)) => format!("{}.{}", parent, name),
        (Some(parent), ChildKey::Index(idx)) => format!("{}[{}]", parent, idx),
    }
}

/// Renders a full key sequence, root to leaf.
pub fn render_keys<'a, I>(keys: I) -> String
where
    I: IntoIterator<Item = &'a ChildKey>,
{
    let mut rendered: Option<String> = None;
    for key in keys {
        rendered = Some(child_path(rendered.as_deref(), key));
    }
    rendered.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Parser;

    fn field(name: &str) -> ChildKey {
        ChildKey::Field(name.to_string())
    }

    #[test]
    fn test_root_level_keys_render_bare() {
        assert_eq!(child_path(None, &field("a")), "a");
        assert_eq!(child_path(None, &ChildKey::Index(3)), "3");
    }

    #[test]
    fn test_nested_rendering() {
        let keys = [field("b"), field("d"), ChildKey::Index(0), field("e")];
        assert_eq!(render_keys(&keys), "b.d[0].e");
    }

    #[test]
    fn test_empty_key_sequence() {
        let keys: [ChildKey; 0] = [];
        assert_eq!(render_keys(&keys), "");
    }

    #[test]
    fn test_empty_root_key_keeps_separator_for_children() {
        let keys = [field(""), field("a")];
        assert_eq!(render_keys(&keys), ".a");
    }

    #[test]
    fn test_rendered_path_parses_back() {
        let keys = [field("b"), field("d"), ChildKey::Index(10), field("e")];
        let rendered = render_keys(&keys);
        assert_eq!(Parser::parse(&rendered), ["b", "d", "10", "e"]);
    }
}
