//! Applies resolved modifiers to a verb.
use crate::{
    tree::{ModifierSet, SubstitutionMode},
    util,
};
use regex::NoExpand;
use std::borrow::Cow;

/// Produces one conjugated form of `stem`. The steps always run in this
/// order:
///
/// 1. Remove `truncate` characters from the end of the stem.
/// 2. Apply the substitution, replacing the first match or every match. The
///    replacement is literal text, so `$` has no special meaning.
/// 3. Wrap the result in `prepend` and `append`.
///
/// An empty [ModifierSet] returns the stem unchanged.
pub fn apply(stem: &str, modifiers: &ModifierSet) -> String {
    let truncated = util::truncate_chars(stem, modifiers.truncate.unwrap_or(0));

    let substituted = match &modifiers.substitution {
        Some(sub) => match sub.mode {
            SubstitutionMode::First => sub.search.replace(truncated, NoExpand(sub.replace.as_str())),
            SubstitutionMode::All => sub.search.replace_all(truncated, NoExpand(sub.replace.as_str())),
        },
        None => Cow::Borrowed(truncated),
    };

    let prepend = modifiers.prepend.as_deref().unwrap_or("");
    let append = modifiers.append.as_deref().unwrap_or("");
    let mut conjugated = String::with_capacity(prepend.len() + substituted.len() + append.len());
    conjugated.push_str(prepend);
    conjugated.push_str(&substituted);
    conjugated.push_str(append);
    conjugated
}
