//! Options that restrict which forms and paradigms are conjugated.
//!
//! # Examples
//!
//! ```
//! use konjug::{Options, ParadigmKey};
//!
//! // A single value or a list is accepted wherever a selection is.
//! let options = Options::new()
//!     .forms(["prs", "futant"])
//!     .forms_except("futant")
//!     .paradigms(("1", "sg"))
//!     .paradigms_except(vec![ParadigmKey::new("3", "pl")]);
//! assert_eq!(options.forms, Some(vec!["prs".to_string(), "futant".to_string()]));
//! assert_eq!(options.forms_except, ["futant"]);
//! assert_eq!(options.paradigms, Some(vec![ParadigmKey::new("1", "sg")]));
//! ```
use crate::{
    error::ConfigError,
    tree::{ParadigmKey, RuleTree},
};

/// One value or a list of values, collected into a list once, when the
/// option is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<T>(Vec<T>);

impl<T> Selection<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'a> From<&'a str> for Selection<String> {
    fn from(value: &'a str) -> Self {
        Selection(vec![value.to_string()])
    }
}

impl From<String> for Selection<String> {
    fn from(value: String) -> Self {
        Selection(vec![value])
    }
}

impl From<ParadigmKey> for Selection<ParadigmKey> {
    fn from(value: ParadigmKey) -> Self {
        Selection(vec![value])
    }
}

impl<'a> From<(&'a str, &'a str)> for Selection<ParadigmKey> {
    fn from(value: (&'a str, &'a str)) -> Self {
        Selection(vec![value.into()])
    }
}

impl<T, I: Into<T>> From<Vec<I>> for Selection<T> {
    fn from(values: Vec<I>) -> Self {
        Selection(values.into_iter().map(Into::into).collect())
    }
}

impl<T, I: Into<T>, const N: usize> From<[I; N]> for Selection<T> {
    fn from(values: [I; N]) -> Self {
        Selection(values.into_iter().map(Into::into).collect())
    }
}

impl<'a, T, I: Clone + Into<T>> From<&'a [I]> for Selection<T> {
    fn from(values: &'a [I]) -> Self {
        Selection(values.iter().cloned().map(Into::into).collect())
    }
}

/// Which forms and paradigms a [Conjugator](crate::Conjugator) produces.
///
/// `None` for `forms` or `paradigms` means "everything the language
/// declares". Anything listed in `forms_except` or `paradigms_except` is
/// left out even if it is also listed in `forms` or `paradigms`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub forms: Option<Vec<String>>,
    pub forms_except: Vec<String>,
    pub paradigms: Option<Vec<ParadigmKey>>,
    pub paradigms_except: Vec<ParadigmKey>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only conjugate these forms.
    pub fn forms(mut self, forms: impl Into<Selection<String>>) -> Self {
        self.forms = Some(forms.into().into_vec());
        self
    }

    /// Never conjugate these forms.
    pub fn forms_except(mut self, forms: impl Into<Selection<String>>) -> Self {
        self.forms_except = forms.into().into_vec();
        self
    }

    /// Only produce these paradigms.
    pub fn paradigms(mut self, paradigms: impl Into<Selection<ParadigmKey>>) -> Self {
        self.paradigms = Some(paradigms.into().into_vec());
        self
    }

    /// Never produce these paradigms.
    pub fn paradigms_except(mut self, paradigms: impl Into<Selection<ParadigmKey>>) -> Self {
        self.paradigms_except = paradigms.into().into_vec();
        self
    }

    /// Checks the names in `forms` and `paradigms` against what `tree`
    /// declares and returns the forms and paradigms to produce, in the order
    /// the language declares them. Excluding a name the language lacks
    /// changes nothing.
    pub(crate) fn resolve(&self, tree: &RuleTree) -> Result<Selected, ConfigError> {
        let declared_forms = tree.forms();
        for form in self.forms.iter().flatten() {
            if !declared_forms.contains(form) {
                return Err(ConfigError::UnknownForm(form.clone()));
            }
        }

        let declared_paradigms = tree.paradigms();
        for paradigm in self.paradigms.iter().flatten() {
            if !declared_paradigms.contains(paradigm) {
                return Err(ConfigError::UnknownParadigm(paradigm.to_string()));
            }
        }

        Ok(Selected {
            forms: filter(declared_forms, self.forms.as_deref(), &self.forms_except),
            paradigms: filter(
                declared_paradigms,
                self.paradigms.as_deref(),
                &self.paradigms_except,
            ),
        })
    }
}

fn filter<T: Clone + PartialEq>(declared: &[T], only: Option<&[T]>, except: &[T]) -> Vec<T> {
    declared
        .iter()
        .filter(|d| only.map_or(true, |o| o.contains(*d)))
        .filter(|d| !except.contains(*d))
        .cloned()
        .collect()
}

/// The forms and paradigms left after applying [Options] to a language.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Selected {
    pub(crate) forms: Vec<String>,
    pub(crate) paradigms: Vec<ParadigmKey>,
}
