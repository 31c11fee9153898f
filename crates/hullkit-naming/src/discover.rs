//! Hull discovery by name.
//!
//! Given the names of some source objects, find the previously generated
//! hulls among a larger collection of named items.

use crate::error::NamingResult;
use crate::template::build_match_pattern;

/// Anything identified by a string name.
pub trait NamedItem {
    /// Returns the item's name.
    fn name(&self) -> &str;
}

/// A named item whose name can be changed.
pub trait NamedItemMut: NamedItem {
    /// Replaces the item's name.
    fn set_name(&mut self, name: String);
}

impl NamedItem for str {
    fn name(&self) -> &str {
        self
    }
}

impl NamedItem for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl NamedItemMut for String {
    fn set_name(&mut self, name: String) {
        *self = name;
    }
}

impl<T: NamedItem + ?Sized> NamedItem for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: NamedItem + ?Sized> NamedItem for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: NamedItemMut + ?Sized> NamedItemMut for &mut T {
    fn set_name(&mut self, name: String) {
        (**self).set_name(name)
    }
}

/// Options for [`discover_matches_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Remove a matched candidate from consideration for later base names.
    pub consume_matches: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            consume_matches: true,
        }
    }
}

/// A candidate matched for one of the base names.
#[derive(Debug)]
pub struct DiscoveredItem<'a, T> {
    /// Position of the base name in the input.
    pub base_index: usize,
    /// Position of the candidate in the input.
    pub candidate_index: usize,
    /// The matched candidate.
    pub item: &'a T,
}

// Derived Clone/Copy would require T: Clone.
impl<T> Clone for DiscoveredItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DiscoveredItem<'_, T> {}

/// Result of a discovery run.
#[derive(Debug)]
pub struct Discovery<'a, T> {
    /// Matches grouped by base name order, newest-first within each group.
    pub matches: Vec<DiscoveredItem<'a, T>>,
    /// Candidates not matched by any base name, in their original order.
    pub unmatched: Vec<&'a T>,
}

impl<'a, T> Discovery<'a, T> {
    /// Returns the matched items in discovery order.
    pub fn items(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.matches.iter().map(|m| m.item)
    }

    /// Returns the items matched for the base name at `base_index`.
    pub fn group(&self, base_index: usize) -> impl Iterator<Item = &'a T> + '_ {
        self.matches
            .iter()
            .filter(move |m| m.base_index == base_index)
            .map(|m| m.item)
    }

    /// Returns the number of matched items.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<'a, T: NamedItem> Discovery<'a, T> {
    /// Returns the names of the matched items in discovery order.
    pub fn names(&self) -> Vec<&'a str> {
        self.matches.iter().map(|m| m.item.name()).collect()
    }
}

/// Finds the items generated from `template` for each of `base_names`.
///
/// Candidates are scanned from last to first so that the most recently added
/// hulls come first, and each candidate is claimed by at most one base name.
pub fn discover_matches<'a, T, S>(
    template: &str,
    candidates: &'a [T],
    base_names: &[S],
) -> NamingResult<Discovery<'a, T>>
where
    T: NamedItem,
    S: AsRef<str>,
{
    discover_matches_with(template, candidates, base_names, DiscoverOptions::default())
}

/// Like [`discover_matches`], with explicit options.
pub fn discover_matches_with<'a, T, S>(
    template: &str,
    candidates: &'a [T],
    base_names: &[S],
    options: DiscoverOptions,
) -> NamingResult<Discovery<'a, T>>
where
    T: NamedItem,
    S: AsRef<str>,
{
    let mut consumed = vec![false; candidates.len()];
    let mut matches = Vec::new();

    for (base_index, base_name) in base_names.iter().enumerate() {
        let pattern = build_match_pattern(template, base_name.as_ref())?;

        for (candidate_index, candidate) in candidates.iter().enumerate().rev() {
            if consumed[candidate_index] || !pattern.is_match(candidate.name()) {
                continue;
            }
            if options.consume_matches {
                consumed[candidate_index] = true;
            }
            matches.push(DiscoveredItem {
                base_index,
                candidate_index,
                item: candidate,
            });
        }
    }

    let mut matched = consumed;
    if !options.consume_matches {
        for m in &matches {
            matched[m.candidate_index] = true;
        }
    }
    let unmatched = candidates
        .iter()
        .zip(&matched)
        .filter(|&(_, &hit)| !hit)
        .map(|(c, _)| c)
        .collect();

    log::debug!(
        "discovered {} hull(s) for {} base name(s) among {} candidate(s)",
        matches.len(),
        base_names.len(),
        candidates.len()
    );

    Ok(Discovery { matches, unmatched })
}
