//! Reads a rule file into a [RuleTree].
//!
//! # Examples
//!
//! ```
//! use konjug::RuleTree;
//!
//! let tree = RuleTree::from_xml(r#"
//!     <verbs>
//!       <meta>
//!         <forms><form>prs</form></forms>
//!         <paradigms><paradigm person="1" quant="sg"/></paradigms>
//!         <fallbacks><fallback regex="er$" ref="er"/></fallbacks>
//!       </meta>
//!       <verbset id="er">
//!         <group id="prs"><endlength>2</endlength><append>e</append></group>
//!       </verbset>
//!     </verbs>
//! "#).unwrap();
//! assert_eq!(tree.forms(), ["prs"]);
//! assert_eq!(tree.fallbacks().len(), 1);
//! ```
use crate::{
    error::LoadError,
    tree::{
        FallbackRule, Group, ModifierSet, NodeKind, Paradigm, ParadigmKey, PdgmGroup, RuleNode,
        RuleTree, Substitution, SubstitutionMode,
    },
    util,
};
use regex::Regex;
use roxmltree::{Document, Node};
use std::collections::{hash_map::Entry, HashMap};
use tracing::debug;

impl RuleTree {
    /// Parses the XML text of a rule file. Every regex in the file is
    /// compiled here, so a bad pattern is reported now rather than on the
    /// first conjugation that needs it.
    pub fn from_xml(text: &str) -> Result<RuleTree, LoadError> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "verbs" {
            return Err(LoadError::UnexpectedRoot(
                root.tag_name().name().to_string(),
            ));
        }

        let mut tree = RuleTree::default();
        for child in elements(root) {
            match child.tag_name().name() {
                "meta" => read_meta(child, &mut tree)?,
                "verbset" => {
                    let node = read_rule_node(child, NodeKind::VerbSet)?;
                    match tree.verb_sets.entry(node.name.clone()) {
                        Entry::Occupied(_) => return Err(LoadError::DuplicateVerbSet(node.name)),
                        Entry::Vacant(e) => {
                            e.insert(node);
                        }
                    }
                }
                "verb" => {
                    let node = read_rule_node(child, NodeKind::Verb)?;
                    match tree.verbs.entry(node.name.clone()) {
                        Entry::Occupied(_) => return Err(LoadError::DuplicateVerb(node.name)),
                        Entry::Vacant(e) => {
                            e.insert(node);
                        }
                    }
                }
                _ => (),
            }
        }

        debug!(
            forms = tree.forms.len(),
            paradigms = tree.paradigms.len(),
            fallbacks = tree.fallbacks.len(),
            verbs = tree.verbs.len(),
            verb_sets = tree.verb_sets.len(),
            "read rule tree"
        );

        Ok(tree)
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, LoadError> {
    node.attribute(attribute)
        .ok_or(LoadError::MissingAttribute { element, attribute })
}

fn compile(pattern: &str) -> Result<Regex, LoadError> {
    Regex::new(pattern).map_err(|source| LoadError::BadPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn read_meta(meta: Node<'_, '_>, tree: &mut RuleTree) -> Result<(), LoadError> {
    for section in elements(meta) {
        match section.tag_name().name() {
            "forms" => {
                for form in elements(section).filter(|n| n.has_tag_name("form")) {
                    let id = form
                        .text()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .ok_or(LoadError::MissingText { element: "form" })?;
                    tree.forms.push(id.to_string());
                }
            }
            "paradigms" => {
                for paradigm in elements(section).filter(|n| n.has_tag_name("paradigm")) {
                    let person = required_attribute(paradigm, "paradigm", "person")?;
                    let quantity = required_attribute(paradigm, "paradigm", "quant")?;
                    tree.paradigms.push(ParadigmKey::new(person, quantity));
                }
            }
            "fallbacks" => {
                for fallback in elements(section).filter(|n| n.has_tag_name("fallback")) {
                    let pattern = required_attribute(fallback, "fallback", "regex")?;
                    let target = required_attribute(fallback, "fallback", "ref")?;
                    tree.fallbacks.push(FallbackRule {
                        pattern: compile(pattern)?,
                        target: target.to_string(),
                    });
                }
            }
            _ => (),
        }
    }
    Ok(())
}

fn read_rule_node(node: Node<'_, '_>, kind: NodeKind) -> Result<RuleNode, LoadError> {
    let name = match kind {
        NodeKind::Verb => required_attribute(node, "verb", "word")?,
        NodeKind::VerbSet => required_attribute(node, "verbset", "id")?,
    };

    let mut groups = HashMap::new();
    for group in elements(node).filter(|n| n.has_tag_name("group")) {
        let form = required_attribute(group, "group", "id")?;
        let group = read_group(group)?;
        match groups.entry(form.to_string()) {
            Entry::Vacant(e) => {
                e.insert(group);
            }
            Entry::Occupied(mut e) => merge_group(e.get_mut(), group),
        }
    }

    Ok(RuleNode {
        kind,
        name: name.to_string(),
        inherit: node.attribute("inherit").map(str::to_string),
        groups,
    })
}

fn read_group(node: Node<'_, '_>) -> Result<Group, LoadError> {
    let mut persons = HashMap::new();
    for pdgmgroup in elements(node).filter(|n| n.has_tag_name("pdgmgroup")) {
        let person = required_attribute(pdgmgroup, "pdgmgroup", "id")?;
        let pdgmgroup = read_pdgmgroup(pdgmgroup)?;
        match persons.entry(person.to_string()) {
            Entry::Vacant(e) => {
                e.insert(pdgmgroup);
            }
            Entry::Occupied(mut e) => merge_pdgmgroup(e.get_mut(), pdgmgroup),
        }
    }
    Ok(Group {
        modifiers: read_modifiers(node)?,
        persons,
    })
}

fn read_pdgmgroup(node: Node<'_, '_>) -> Result<PdgmGroup, LoadError> {
    let mut quantities = HashMap::new();
    for paradigm in elements(node).filter(|n| n.has_tag_name("paradigm")) {
        let quantity = required_attribute(paradigm, "paradigm", "id")?;
        let paradigm = Paradigm {
            ignore: paradigm.has_attribute("ignore"),
            modifiers: read_modifiers(paradigm)?,
        };
        quantities.entry(quantity.to_string()).or_insert(paradigm);
    }
    Ok(PdgmGroup {
        ignore: node.has_attribute("ignore"),
        modifiers: read_modifiers(node)?,
        quantities,
    })
}

// A group or pdgmgroup id declared twice under one parent keeps the
// modifiers and ignore flag of the first declaration, while the children of
// every declaration are searched in document order.
fn merge_group(first: &mut Group, later: Group) {
    for (person, pdgmgroup) in later.persons {
        match first.persons.entry(person) {
            Entry::Vacant(e) => {
                e.insert(pdgmgroup);
            }
            Entry::Occupied(mut e) => merge_pdgmgroup(e.get_mut(), pdgmgroup),
        }
    }
}

fn merge_pdgmgroup(first: &mut PdgmGroup, later: PdgmGroup) {
    for (quantity, paradigm) in later.quantities {
        first.quantities.entry(quantity).or_insert(paradigm);
    }
}

// All of the text under `node`, including text split up by comments or
// nested elements.
fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

// Only the direct children of `node` are modifiers for its level. The
// first occurrence of each modifier element is used.
fn read_modifiers(node: Node<'_, '_>) -> Result<ModifierSet, LoadError> {
    let mut modifiers = ModifierSet::default();
    for child in elements(node) {
        match child.tag_name().name() {
            "prepend" if modifiers.prepend.is_none() => {
                modifiers.prepend = Some(text_of(child));
            }
            "append" if modifiers.append.is_none() => {
                modifiers.append = Some(text_of(child));
            }
            "endlength" if modifiers.truncate.is_none() => {
                modifiers.truncate = Some(util::leading_count(&text_of(child)));
            }
            "mod" if modifiers.substitution.is_none() => {
                modifiers.substitution = Some(read_substitution(child)?);
            }
            _ => (),
        }
    }
    Ok(modifiers)
}

fn read_substitution(node: Node<'_, '_>) -> Result<Substitution, LoadError> {
    let mode = required_attribute(node, "mod", "match")?;
    let mode = mode
        .parse::<SubstitutionMode>()
        .map_err(|_| LoadError::UnknownMatchMode(mode.to_string()))?;
    let search = required_attribute(node, "mod", "search")?;
    Ok(Substitution {
        mode,
        search: compile(search)?,
        replace: node.attribute("replace").unwrap_or("").to_string(),
    })
}
