//! Matching commands: match, compare, abbr, equivalents, parse.
//!
//! CHANGELOG:
//! - 01/12/2026 - compare/abbr/equivalents/parse
//! - 01/11/2026 - Initial match command

use anyhow::Result;
use serde_json::json;

use crate::config::MatcherConfig;
use crate::matcher::{AbbreviationPattern, CallOptions, MatchEngine, NameStyle};
use crate::names::{DefaultParser, EquivalenceExpander, NameParser, NameQuery};
use crate::output::OutputControls;
use crate::store::{PersonRecord, Record, RecordStore};

/// Name parts given on the command line.
#[derive(Debug, Clone, Default)]
pub struct NameArgs {
    pub fullname: Vec<String>,
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub suffix: Option<String>,
}

impl NameArgs {
    /// Positional values for [`MatchEngine::get_matches_from_args`]:
    /// the joined full name, then the four parts if any was given.
    fn positional<'a>(&'a self, joined: &'a str) -> Vec<Option<&'a str>> {
        let parts = [&self.first, &self.middle, &self.last, &self.suffix];

        let mut args: Vec<Option<&str>> = Vec::new();
        if !self.fullname.is_empty() {
            args.push(Some(joined));
        }
        if parts.iter().any(|p| p.is_some()) {
            args.extend(parts.iter().map(|p| p.as_deref()));
        }
        args
    }
}

/// Find the records matching a name.
pub fn find(
    config: &MatcherConfig,
    name: &NameArgs,
    expand: bool,
    output: &OutputControls,
) -> Result<()> {
    let engine = config.build_engine()?;
    let joined = name.fullname.join(" ");
    let args = name.positional(&joined);

    let call = CallOptions { recursive: expand };
    let found = engine.get_matches_from_args(&args, call)?;

    if output.json {
        output.print(&found);
        return Ok(());
    }

    if found.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    println!("Matches ({}):", found.len());
    println!("{}", "-".repeat(50));
    for record in &found {
        println!("{}", describe(&engine, record));
    }
    Ok(())
}

/// Compare two free-text names.
pub fn compare(config: &MatcherConfig, a: &str, b: &str, output: &OutputControls) -> Result<()> {
    let engine = config.build_engine()?;
    let n1 = engine.parser().parse_fullname(a);
    let n2 = engine.parser().parse_fullname(b);
    let same = engine.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short);

    if output.json {
        output.print(&json!({ "a": n1, "b": n2, "match": same }));
    } else {
        println!("{}", if same { "match" } else { "no match" });
    }
    Ok(())
}

/// Test a candidate against the abbreviation pattern built from `source`.
pub fn abbr(source: &str, candidate: &str, output: &OutputControls) -> Result<()> {
    let pattern = AbbreviationPattern::build(source)?;
    let matched = pattern.is_match(candidate);

    if output.json {
        output.print(&json!({
            "source": source,
            "candidate": candidate,
            "pattern": pattern.as_str(),
            "match": matched,
        }));
    } else {
        println!("pattern: {}", pattern.as_str());
        println!("{}", if matched { "match" } else { "no match" });
    }
    Ok(())
}

/// Print the first-name equivalents the configured table knows.
pub fn equivalents(config: &MatcherConfig, first: &str, output: &OutputControls) -> Result<()> {
    let equivalence = config.load_equivalence()?;
    let names = equivalence.expand(first).unwrap_or_default();

    if output.json {
        output.print(&json!({ "name": first, "equivalents": names }));
    } else if names.is_empty() {
        println!("No equivalents for {}.", first);
    } else {
        println!("{}", names.join(", "));
    }
    Ok(())
}

/// Print how a full name is split into parts.
pub fn parse(text: &str, output: &OutputControls) -> Result<()> {
    let query: NameQuery = DefaultParser.parse_fullname(text);

    if output.json {
        output.print(&query);
    } else {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        println!("first:  {}", show(&query.first));
        println!("middle: {}", show(&query.middle));
        println!("last:   {}", show(&query.last));
        println!("suffix: {}", show(&query.suffix));
    }
    Ok(())
}

/// One-line description of a record under the engine's mapping.
fn describe<S: RecordStore>(engine: &MatchEngine<S>, record: &PersonRecord) -> String {
    let mapping = engine.mapping();
    let name: Vec<&str> = [&mapping.first, &mapping.middle, &mapping.last, &mapping.suffix]
        .iter()
        .filter_map(|f| record.field(f))
        .collect();
    match record.id {
        Some(id) => format!("#{}: {}", id, name.join(" ")),
        None => name.join(" "),
    }
}
