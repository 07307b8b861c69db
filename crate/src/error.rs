//! Error types returned by this crate.
//!
//! There are three families of failure, and each has its own type:
//!
//! * [LoadError] - the rule file could not be read or does not describe a
//!   valid rule tree. A [Conjugator](crate::Conjugator) cannot be built.
//! * [ConfigError] - an [Options](crate::Options) value names something the
//!   language does not declare.
//! * [LookupError] - the rule data is internally inconsistent in a way that
//!   only shows up when a particular verb is conjugated, such as an
//!   `inherit` attribute pointing at a verb-set that does not exist.
//!
//! Not finding a rule for a verb is *not* an error. See
//! [Conjugator::conjugate](crate::Conjugator::conjugate).
use std::path::PathBuf;
use thiserror::Error;

/// Returned by the constructors, which can fail either while loading rule
/// data or while validating the options.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read the rule file at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("the rule file is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("the root element of a rule file must be <verbs>, not <{0}>")]
    UnexpectedRoot(String),
    #[error("<{element}> is missing its `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("<{element}> must contain text")]
    MissingText { element: &'static str },
    #[error("`{0}` is not a valid match mode for <mod> (expected `first` or `all`)")]
    UnknownMatchMode(String),
    #[error("could not compile the pattern `{pattern}`: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("the verb `{0}` is declared more than once")]
    DuplicateVerb(String),
    #[error("the verb-set `{0}` is declared more than once")]
    DuplicateVerbSet(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{0}` is not a form declared by this language")]
    UnknownForm(String),
    #[error("`{0}` is not a paradigm declared by this language")]
    UnknownParadigm(String),
    #[error("`{0}` is not a paradigm; expected a person followed by a quantity, like `1sg`")]
    BadParadigm(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("the verb-set `{id}` is referenced but never declared")]
    UnknownVerbSet { id: String },
    #[error("the verb-set `{id}` inherits from itself through its ancestors")]
    InheritanceCycle { id: String },
}
