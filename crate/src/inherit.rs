//! Walks the single-parent inheritance chain of a rule node.
use crate::{
    error::LookupError,
    tree::{NodeKind, RuleNode, RuleTree},
};
use std::collections::HashSet;

/// Returns the verb-sets `node` inherits from, nearest first. A node with no
/// `inherit` attribute has no ancestors.
///
/// This fails if any link in the chain names a verb-set that does not exist,
/// or if the chain loops back on itself.
pub fn ancestors_of<'t>(
    tree: &'t RuleTree,
    node: &'t RuleNode,
) -> Result<Vec<&'t RuleNode>, LookupError> {
    let mut chain = vec![];
    let mut seen = HashSet::new();
    if node.kind() == NodeKind::VerbSet {
        seen.insert(node.name());
    }

    let mut next = node.inherit();
    while let Some(id) = next {
        let parent = tree.find_verb_set(id)?;
        if !seen.insert(parent.name()) {
            return Err(LookupError::InheritanceCycle { id: id.to_string() });
        }
        chain.push(parent);
        next = parent.inherit();
    }

    Ok(chain)
}
