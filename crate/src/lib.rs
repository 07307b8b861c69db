#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Conjugate verbs according to declarative, hierarchical rule files.
//!
//! Each language has one rule file. It declares the language's forms
//! (tenses and moods, such as `prs` or `futant`), its paradigms (person and
//! quantity pairs, such as first person singular), and a set of verbs and
//! verb-sets. A verb-set is an abstract bundle of rules that other verb-sets
//! and verbs can inherit from; a verb is a concrete word. When a verb has no
//! entry of its own, a list of fallback patterns picks a verb-set for it,
//! which is how regular verbs are conjugated.
//!
//! ```
//! use konjug::{Conjugator, Options};
//!
//! let conjugator = Conjugator::load("fr", Options::new()).unwrap();
//! let conjugation = conjugator.conjugate("être").unwrap().unwrap();
//! assert_eq!(conjugation.get("pcomp").unwrap().get("1sg"), Some("ai été"));
//!
//! let conjugation = conjugator.conjugate("finir").unwrap().unwrap();
//! assert_eq!(conjugation.get("prs").unwrap().get("1pl"), Some("finissons"));
//! ```
//!
//! # How a form is built
//!
//! Every slot is produced from the verb itself by a set of modifiers:
//! `<endlength>` removes characters from the end, `<mod>` makes a regex
//! substitution, and `<prepend>` and `<append>` add text. Modifiers can be
//! declared for a whole form (`<group>`), for one person within the form
//! (`<pdgmgroup>`), or for a single slot (`<paradigm>`). A modifier that a
//! level does not declare is taken from the level that encloses it. See the
//! [cascade] module for the details.
//!
//! # Rule files
//!
//! [Conjugator::load] reads `<lang>.xml` from [data_dir]. This crate ships
//! rules for French (`fr`).

mod util;
mod xml;

pub mod cascade;
pub mod conjugator;
pub mod error;
pub mod fallback;
pub mod inherit;
pub mod options;
pub mod transform;
pub mod tree;

pub use conjugator::{data_dir, Conjugation, Conjugator, FormConjugation, DATA_DIR_ENV};
pub use error::{ConfigError, Error, LoadError, LookupError};
pub use options::{Options, Selection};
pub use tree::{ParadigmKey, RuleTree};
