//! The typed, read-only rule tree for one language.
//!
//! A [RuleTree] is normally built from a rule file with
//! [RuleTree::from_xml], then handed to a
//! [Conjugator](crate::Conjugator). Nothing in this module mutates a tree
//! after it has been built.
//!
//! The tree has this shape:
//!
//! ```text
//! RuleTree
//! ├── forms, paradigms, fallbacks   (declared once per language, ordered)
//! ├── verb-sets  id   -> RuleNode   (may inherit from one other verb-set)
//! └── verbs      word -> RuleNode   (may inherit from one verb-set)
//!
//! RuleNode
//! └── form     -> Group      (modifiers)
//!     └── person   -> PdgmGroup  (ignore, modifiers)
//!         └── quantity -> Paradigm   (ignore, modifiers)
//! ```
use crate::error::{ConfigError, LookupError};
use regex::Regex;
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A concrete word. Nothing can inherit from a verb.
    Verb,
    /// An abstract, inheritable bundle of rules. Never conjugated directly,
    /// though a fallback rule can stand one in for an unknown verb.
    VerbSet,
}

/// A verb or verb-set entry from the rule file.
#[derive(Debug)]
pub struct RuleNode {
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    pub(crate) inherit: Option<String>,
    pub(crate) groups: HashMap<String, Group>,
}

impl RuleNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The word for a verb, or the id for a verb-set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id of the verb-set this node inherits from, if any.
    pub fn inherit(&self) -> Option<&str> {
        self.inherit.as_deref()
    }

    pub fn group(&self, form: &str) -> Option<&Group> {
        self.groups.get(form)
    }
}

/// The rules for one form of a verb.
#[derive(Debug, Default)]
pub struct Group {
    pub(crate) modifiers: ModifierSet,
    pub(crate) persons: HashMap<String, PdgmGroup>,
}

impl Group {
    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn person(&self, person: &str) -> Option<&PdgmGroup> {
        self.persons.get(person)
    }
}

/// The rules for one person within a form.
#[derive(Debug, Default)]
pub struct PdgmGroup {
    pub(crate) ignore: bool,
    pub(crate) modifiers: ModifierSet,
    pub(crate) quantities: HashMap<String, Paradigm>,
}

impl PdgmGroup {
    /// An ignored paradigm group suppresses every quantity beneath it.
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn quantity(&self, quantity: &str) -> Option<&Paradigm> {
        self.quantities.get(quantity)
    }
}

/// The rules for one (person, quantity) slot within a form.
#[derive(Debug, Default)]
pub struct Paradigm {
    pub(crate) ignore: bool,
    pub(crate) modifiers: ModifierSet,
}

impl Paradigm {
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }
}

/// The modifiers that turn a verb into one conjugated form. Every field is
/// optional, and `None` always means "not set at this level" rather than
/// "empty". An entirely unset `ModifierSet` leaves the verb untouched.
#[derive(Clone, Debug, Default)]
pub struct ModifierSet {
    pub prepend: Option<String>,
    pub append: Option<String>,
    pub substitution: Option<Substitution>,
    /// The number of characters to remove from the end of the verb before
    /// any substitution is applied.
    pub truncate: Option<usize>,
}

impl ModifierSet {
    /// Fills in every field this set leaves unset from `parent`.
    pub fn or(&self, parent: &ModifierSet) -> ModifierSet {
        ModifierSet {
            prepend: self.prepend.clone().or_else(|| parent.prepend.clone()),
            append: self.append.clone().or_else(|| parent.append.clone()),
            substitution: self
                .substitution
                .clone()
                .or_else(|| parent.substitution.clone()),
            truncate: self.truncate.or(parent.truncate),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prepend.is_none()
            && self.append.is_none()
            && self.substitution.is_none()
            && self.truncate.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubstitutionMode {
    First,
    All,
}

impl FromStr for SubstitutionMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(SubstitutionMode::First),
            "all" => Ok(SubstitutionMode::All),
            _ => Err(()),
        }
    }
}

/// A regex replacement applied to the (possibly truncated) verb.
#[derive(Clone, Debug)]
pub struct Substitution {
    pub mode: SubstitutionMode,
    pub search: Regex,
    pub replace: String,
}

/// A (person, quantity) pair naming one slot within a form, such as
/// first person singular.
///
/// ```
/// use konjug::ParadigmKey;
///
/// let key: ParadigmKey = "1sg".parse().unwrap();
/// assert_eq!(key, ParadigmKey::new("1", "sg"));
/// assert_eq!(key.to_string(), "1sg");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParadigmKey {
    pub person: String,
    pub quantity: String,
}

impl ParadigmKey {
    pub fn new(person: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            quantity: quantity.into(),
        }
    }
}

impl fmt::Display for ParadigmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.person, self.quantity)
    }
}

impl FromStr for ParadigmKey {
    type Err = ConfigError;

    /// Splits a key like `1sg` into its person (the leading digits) and
    /// quantity (the rest).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(s.len(), |(i, _)| i);
        if split == 0 || split == s.len() {
            return Err(ConfigError::BadParadigm(s.to_string()));
        }
        Ok(ParadigmKey::new(&s[..split], &s[split..]))
    }
}

impl<'a> From<(&'a str, &'a str)> for ParadigmKey {
    fn from(pair: (&'a str, &'a str)) -> Self {
        ParadigmKey::new(pair.0, pair.1)
    }
}

/// When a verb has no entry of its own, the first fallback whose pattern
/// matches the verb picks the verb-set used in its place.
#[derive(Clone, Debug)]
pub struct FallbackRule {
    pub pattern: Regex,
    pub target: String,
}

/// All of the rule data for one language.
#[derive(Debug, Default)]
pub struct RuleTree {
    pub(crate) forms: Vec<String>,
    pub(crate) paradigms: Vec<ParadigmKey>,
    pub(crate) fallbacks: Vec<FallbackRule>,
    pub(crate) verbs: HashMap<String, RuleNode>,
    pub(crate) verb_sets: HashMap<String, RuleNode>,
}

impl RuleTree {
    /// Returns the entry for exactly this word, if there is one.
    pub fn find_verb(&self, word: &str) -> Option<&RuleNode> {
        self.verbs.get(word)
    }

    /// Returns the verb-set with this id. A missing id means some other part
    /// of the rule data refers to a verb-set that was never declared.
    pub fn find_verb_set(&self, id: &str) -> Result<&RuleNode, LookupError> {
        self.verb_sets
            .get(id)
            .ok_or_else(|| LookupError::UnknownVerbSet { id: id.to_string() })
    }

    /// The declared forms, in declaration order.
    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// The declared paradigms, in declaration order.
    pub fn paradigms(&self) -> &[ParadigmKey] {
        &self.paradigms
    }

    pub fn fallbacks(&self) -> &[FallbackRule] {
        &self.fallbacks
    }

    pub fn verb_count(&self) -> usize {
        self.verbs.len()
    }

    pub fn verb_set_count(&self) -> usize {
        self.verb_sets.len()
    }
}
