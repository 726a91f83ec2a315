use crate::ast::Node;

/// Walks a tree depth-first in pre-order using an explicit stack.
///
/// `visit` sees every reachable node before its children. Returning `true`
/// descends into the node's children (left to right); returning `false`
/// skips that subtree and the walk resumes at the next sibling or ancestor.
///
/// ```rust
/// use gqlgen_syntax::{parse_str, traverse, Node};
///
/// let doc = parse_str("type User { id: ID } input NewUser { name: String }").unwrap();
///
/// let mut outputs = Vec::new();
/// traverse(&doc, |node| match node {
///     Node::TypeDef(def) => {
///         if !def.input {
///             outputs.push(def.name.clone());
///         }
///         false
///     }
///     _ => true,
/// });
///
/// assert_eq!(outputs, vec!["User"]);
/// ```
pub fn traverse<'a, F>(root: impl Into<Node<'a>>, mut visit: F)
where
    F: FnMut(Node<'a>) -> bool,
{
    let mut stack: Vec<Node<'a>> = Vec::with_capacity(16);
    stack.push(root.into());

    while let Some(node) = stack.pop() {
        if visit(node) {
            stack.extend(node.children().into_iter().rev());
        }
    }
}

/// Collects every node `select` returns a value for, pruning below matches.
///
/// This is the common "find all X, but don't look inside X" walk.
pub fn collect<'a, T, F>(root: impl Into<Node<'a>>, mut select: F) -> Vec<T>
where
    F: FnMut(Node<'a>) -> Option<T>,
{
    let mut found = Vec::new();
    traverse(root, |node| match select(node) {
        Some(item) => {
            found.push(item);
            false
        }
        None => true,
    });
    found
}
