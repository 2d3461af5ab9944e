//! Cascading name matcher.
//!
//! Tries a series of searches, exact first and then looser variations,
//! and returns every record found by the first search that succeeds:
//!
//! 1. first name (or its initial) and last name from the store
//! 2. suffix: exact, else fuzzy (a blank suffix on either side matches)
//! 3. middle name: exact, else abbreviation, else null in the record
//! 4. nothing found: the same passes for each first-name equivalent
//!
//! CHANGELOG:
//! - 01/12/2026 - Split into single pass + equivalence orchestrator
//! - 01/11/2026 - Initial implementation

use tracing::debug;

use super::abbrev::{self, AbbreviationPattern};
use super::compare::{compare_without_dot, is_blank, NameComparator};
use super::options::{CallOptions, ColumnMapping, MatchOptions, NameStyle};
use crate::error::{MatchError, Result};
use crate::names::{DefaultParser, EquivalenceExpander, NameEquivalence, NameParser, NameQuery};
use crate::store::{Clause, Predicate, Record, RecordStore};

/// Matches name queries against the records of a store.
///
/// Read operations take `&self`; [`MatchEngine::set_condition`] takes
/// `&mut self`, so the condition cannot change under an in-flight query.
pub struct MatchEngine<S: RecordStore> {
    store: S,
    mapping: ColumnMapping,
    options: MatchOptions,
    condition: Option<String>,
    parser: Box<dyn NameParser + Send + Sync>,
    expander: Box<dyn EquivalenceExpander + Send + Sync>,
}

impl<S: RecordStore> MatchEngine<S> {
    /// Engine with the default mapping and options, the default parser and
    /// the built-in equivalence table.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mapping: ColumnMapping::default(),
            options: MatchOptions::default(),
            condition: None,
            parser: Box::new(DefaultParser),
            expander: Box::new(NameEquivalence::builtin()),
        }
    }

    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_condition(mut self, condition: Option<String>) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_parser(mut self, parser: impl NameParser + Send + Sync + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_expander(mut self, expander: impl EquivalenceExpander + Send + Sync + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Extra store-specific condition ANDed into every query.
    pub fn set_condition(&mut self, condition: Option<String>) {
        self.condition = condition;
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn parser(&self) -> &dyn NameParser {
        self.parser.as_ref()
    }

    pub fn expander(&self) -> &dyn EquivalenceExpander {
        self.expander.as_ref()
    }

    /// All matches of the first successful search, or an empty list.
    pub fn get_matches(&self, query: &NameQuery) -> Result<Vec<S::Record>> {
        self.get_matches_with(query, CallOptions::default())
    }

    /// Parse `text` with the configured parser, then [`Self::get_matches`].
    pub fn match_fullname(&self, text: &str) -> Result<Vec<S::Record>> {
        let query = self.parser.parse_fullname(text);
        self.get_matches(&query)
    }

    /// Positional form: one full name, or first/middle/last/suffix.
    pub fn get_matches_from_args(
        &self,
        args: &[Option<&str>],
        call: CallOptions,
    ) -> Result<Vec<S::Record>> {
        let query = match args {
            [fullname] => self.parser.parse_fullname(fullname.unwrap_or("")),
            [first, middle, last, suffix] => NameQuery::new(*first, *middle, *last, *suffix),
            _ => return Err(MatchError::InvalidArity(args.len())),
        };
        self.get_matches_with(&query, call)
    }

    /// Single pass, then one pass per first-name equivalent when nothing
    /// matched and `call.recursive` is set.
    pub fn get_matches_with(&self, query: &NameQuery, call: CallOptions) -> Result<Vec<S::Record>> {
        let matches = self.match_once(query)?;
        if !matches.is_empty() || !call.recursive {
            return Ok(matches);
        }

        let Some(first) = query.first.as_deref() else {
            return Ok(matches);
        };
        let Some(alternates) = self.expander.expand(first) else {
            debug!(first, "no equivalents");
            return Ok(matches);
        };

        let mut matches = matches;
        for alternate in &alternates {
            let found = self.match_once(&query.with_first(alternate))?;
            debug!(first, alternate = alternate.as_str(), count = found.len(), "equivalent");
            matches.extend(found);
        }
        Ok(matches)
    }

    /// Steps 1-3 of the cascade; never expands first names.
    fn match_once(&self, query: &NameQuery) -> Result<Vec<S::Record>> {
        let (Some(first), Some(last)) = (query.first.as_deref(), query.last.as_deref()) else {
            return Ok(Vec::new());
        };

        let candidates = self.match_first_last_and_suffix(first, last, query.suffix.as_deref())?;
        if candidates.is_empty() {
            return Ok(candidates);
        }

        if self.options.skip_match_middle_name {
            debug!(count = candidates.len(), "middle name skipped");
            return Ok(candidates);
        }

        let middle_field = self.mapping.middle.as_str();
        let query_middle = query.middle.as_deref();

        let (exact, candidates): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|r| compare_without_dot(r.field(middle_field), query_middle));
        if !exact.is_empty() {
            debug!(count = exact.len(), "exact middle name");
            return Ok(exact);
        }

        let Some(middle) = query_middle else {
            debug!(count = candidates.len(), "middle name not given");
            return Ok(candidates);
        };

        // A middle without tokens (".") abbreviates nothing.
        let pattern = match AbbreviationPattern::build(middle) {
            Ok(pattern) => Some(pattern),
            Err(MatchError::EmptyName) => None,
            Err(e) => return Err(e),
        };
        let (abbreviated, candidates): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|r| {
            match (&pattern, r.field(middle_field)) {
                (Some(pattern), Some(m)) => pattern.is_match(m),
                _ => false,
            }
        });
        if !abbreviated.is_empty() {
            debug!(count = abbreviated.len(), "abbreviated middle name");
            return Ok(abbreviated);
        }

        let without_middle: Vec<_> = candidates
            .into_iter()
            .filter(|r| r.field(middle_field).is_none())
            .collect();
        debug!(count = without_middle.len(), "null middle name");
        Ok(without_middle)
    }

    /// Store query on first/last, then suffix narrowing.
    fn match_first_last_and_suffix(
        &self,
        first: &str,
        last: &str,
        suffix: Option<&str>,
    ) -> Result<Vec<S::Record>> {
        let predicate = Predicate::new()
            .with_condition(self.condition.as_deref())
            .and(Clause::AnyOf(vec![
                Clause::equals(&self.mapping.first, first),
                Clause::matches(&self.mapping.first, abbrev::first_name_pattern(first)?),
            ]))
            .and(Clause::equals(&self.mapping.last, last));

        let candidates = self.store.query_all(&predicate)?;
        debug!(first, last, count = candidates.len(), "first/last candidates");
        if self.options.skip_match_suffix {
            return Ok(candidates);
        }

        let suffix_field = self.mapping.suffix.as_str();
        let (exact, candidates): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|r| compare_without_dot(r.field(suffix_field), suffix));
        if !exact.is_empty() {
            debug!(count = exact.len(), "exact suffix");
            return Ok(exact);
        }

        let fuzzy: Vec<_> = candidates
            .into_iter()
            .filter(|r| is_blank(r.field(suffix_field)) || suffix.is_none())
            .collect();
        debug!(count = fuzzy.len(), "fuzzy suffix");
        Ok(fuzzy)
    }

    /// True when `a` and `b` name the same person.
    pub fn names_match(
        &self,
        a: &dyn Record,
        style_a: NameStyle,
        b: &dyn Record,
        style_b: NameStyle,
    ) -> bool {
        NameComparator::new(self.options).names_match(a, style_a, b, style_b)
    }

    /// See [`abbrev::abbr_match`].
    pub fn abbr_match(&self, source: &str, candidate: &str) -> bool {
        abbrev::abbr_match(source, candidate)
    }
}
