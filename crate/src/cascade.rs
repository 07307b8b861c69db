//! Resolves the modifiers for one conjugated slot.
//!
//! Resolution runs along two axes at once. To decide *which* group,
//! paradigm group, or paradigm applies, each level is looked up on the
//! verb's own entry and then on each ancestor in turn, and the nearest one
//! that exists is used. To decide the *value* of a modifier, a level that
//! leaves it unset takes it from the level enclosing it, as already
//! resolved, and not by searching the ancestors again.
//!
//! That means a verb can define a `prs` group that sets `<endlength>` while
//! its first-person endings come from a paradigm group declared on a
//! grandparent verb-set. The endings still truncate by the verb's own
//! `<endlength>`.
use crate::{
    error::LookupError,
    inherit,
    tree::{Group, ModifierSet, Paradigm, PdgmGroup, RuleNode, RuleTree},
};
use tracing::trace;

/// The result of resolving a paradigm group or a paradigm.
#[derive(Clone, Debug)]
pub enum Resolved {
    /// The nearest definition is marked `ignore`, so the slot (or, for a
    /// paradigm group, every slot for that person) is not produced.
    Ignored,
    Modifiers(ModifierSet),
}

/// The rule node matched for one verb, along with its ancestors, nearest
/// first. A `Lineage` lives for a single conjugation.
#[derive(Debug)]
pub struct Lineage<'t> {
    root: &'t RuleNode,
    chain: Vec<&'t RuleNode>,
}

impl<'t> Lineage<'t> {
    pub fn new(tree: &'t RuleTree, root: &'t RuleNode) -> Result<Self, LookupError> {
        let chain = inherit::ancestors_of(tree, root)?;
        Ok(Self { root, chain })
    }

    pub fn root(&self) -> &'t RuleNode {
        self.root
    }

    pub fn chain(&self) -> &[&'t RuleNode] {
        &self.chain
    }

    fn nodes(&self) -> impl Iterator<Item = &'t RuleNode> + '_ {
        std::iter::once(self.root).chain(self.chain.iter().copied())
    }

    fn find_group(&self, form: &str) -> Option<&'t Group> {
        self.nodes().find_map(|n| n.group(form))
    }

    fn find_pdgmgroup(&self, form: &str, person: &str) -> Option<&'t PdgmGroup> {
        self.nodes()
            .find_map(|n| n.group(form).and_then(|g| g.person(person)))
    }

    fn find_paradigm(&self, form: &str, person: &str, quantity: &str) -> Option<&'t Paradigm> {
        self.nodes().find_map(|n| {
            n.group(form)
                .and_then(|g| g.person(person))
                .and_then(|p| p.quantity(quantity))
        })
    }

    /// The modifiers of the nearest group for `form`. Unset fields stay
    /// unset. Groups are never merged across nodes.
    pub fn group_modifiers(&self, form: &str) -> ModifierSet {
        self.find_group(form)
            .map(|g| g.modifiers().clone())
            .unwrap_or_default()
    }

    /// The modifiers of the nearest paradigm group for `form` and `person`,
    /// with each unset field taken from `parent`.
    pub fn person_modifiers(&self, form: &str, person: &str, parent: &ModifierSet) -> Resolved {
        match self.find_pdgmgroup(form, person) {
            Some(p) if p.is_ignored() => {
                trace!(form, person, "paradigm group is ignored");
                Resolved::Ignored
            }
            Some(p) => Resolved::Modifiers(p.modifiers().or(parent)),
            None => Resolved::Modifiers(parent.clone()),
        }
    }

    /// The modifiers of the nearest paradigm for `form`, `person`, and
    /// `quantity`, with each unset field taken from `parent`.
    pub fn paradigm_modifiers(
        &self,
        form: &str,
        person: &str,
        quantity: &str,
        parent: &ModifierSet,
    ) -> Resolved {
        match self.find_paradigm(form, person, quantity) {
            Some(p) if p.is_ignored() => {
                trace!(form, person, quantity, "paradigm is ignored");
                Resolved::Ignored
            }
            Some(p) => Resolved::Modifiers(p.modifiers().or(parent)),
            None => Resolved::Modifiers(parent.clone()),
        }
    }
}
