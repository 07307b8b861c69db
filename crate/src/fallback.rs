//! Picks a verb-set for a verb that has no entry of its own.
use crate::{
    error::LookupError,
    tree::{RuleNode, RuleTree},
};
use tracing::debug;

/// Returns the verb-set named by the first fallback rule whose pattern
/// matches `word`. Patterns are searched for anywhere in the word, so a
/// pattern that should only match at the end must say so with `$`.
///
/// The first matching rule wins even if a later one would be a closer fit.
pub fn match_fallback<'t>(
    tree: &'t RuleTree,
    word: &str,
) -> Result<Option<&'t RuleNode>, LookupError> {
    let rule = match tree.fallbacks().iter().find(|f| f.pattern.is_match(word)) {
        Some(r) => r,
        None => return Ok(None),
    };
    debug!(
        word,
        pattern = rule.pattern.as_str(),
        target = rule.target.as_str(),
        "using fallback rule"
    );
    tree.find_verb_set(&rule.target).map(Some)
}
