//! First-name equivalences: nicknames and alternate spellings.
//!
//! CHANGELOG:
//! - 01/12/2026 - JSON loading alongside the built-in table
//! - 01/11/2026 - Initial built-in table

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Looks up alternate spellings of a first name.
pub trait EquivalenceExpander {
    /// Known alternates for `first`, or `None` when the name is unknown.
    fn expand(&self, first: &str) -> Option<Vec<String>>;
}

impl<E: EquivalenceExpander + ?Sized> EquivalenceExpander for Box<E> {
    fn expand(&self, first: &str) -> Option<Vec<String>> {
        (**self).expand(first)
    }
}

/// Built-in nickname groups. A name may appear in more than one group.
const BUILTIN_GROUPS: &[&[&str]] = &[
    &["abigail", "abby", "gail"],
    &["albert", "al", "bert"],
    &["alexander", "alex", "al", "sandy", "xander"],
    &["alexandra", "alex", "sandra", "sandy", "lexi"],
    &["andrew", "andy", "drew"],
    &["anthony", "tony"],
    &["barbara", "barb", "babs"],
    &["benjamin", "ben", "benny"],
    &["catherine", "katherine", "kathryn", "cathy", "kathy", "kate", "katie", "kat"],
    &["charles", "charlie", "chuck", "chas"],
    &["christopher", "chris", "kit"],
    &["daniel", "dan", "danny"],
    &["david", "dave", "davey"],
    &["deborah", "debra", "debbie", "deb"],
    &["donald", "don", "donnie"],
    &["dorothy", "dot", "dottie"],
    &["edward", "ed", "eddie", "ted", "ned"],
    &["elizabeth", "liz", "beth", "betty", "eliza", "lisa", "libby"],
    &["frederick", "fred", "freddie"],
    &["gerald", "jerry"],
    &["gregory", "greg"],
    &["harold", "hal", "harry"],
    &["henry", "hank", "harry", "hal"],
    &["james", "jim", "jimmy", "jamie"],
    &["jennifer", "jen", "jenny"],
    &["jessica", "jess", "jessie"],
    &["john", "jack", "johnny", "jon"],
    &["jonathan", "jon", "jonny"],
    &["joseph", "joe", "joey"],
    &["kenneth", "ken", "kenny"],
    &["lawrence", "larry"],
    &["margaret", "maggie", "meg", "peggy", "marge"],
    &["matthew", "matt"],
    &["michael", "mike", "mikey", "mick"],
    &["nicholas", "nick", "nicky"],
    &["patricia", "pat", "patty", "trish"],
    &["patrick", "pat", "paddy"],
    &["peter", "pete"],
    &["rebecca", "becky", "becca"],
    &["richard", "rick", "rich", "dick", "ricky"],
    &["robert", "bob", "rob", "bobby", "robbie", "bert"],
    &["ronald", "ron", "ronnie"],
    &["samuel", "sam", "sammy"],
    &["stephen", "steven", "steve"],
    &["susan", "sue", "susie"],
    &["theodore", "ted", "teddy", "theo"],
    &["thomas", "tom", "tommy"],
    &["timothy", "tim", "timmy"],
    &["victoria", "vicky", "tori"],
    &["william", "bill", "billy", "will", "willy", "wm", "liam"],
];

/// Wrapper for equivalence files with a "groups" key.
#[derive(Debug, Deserialize)]
struct GroupsFile {
    groups: Vec<Vec<String>>,
}

/// Groups of equivalent first names, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct NameEquivalence {
    groups: Vec<Vec<String>>,
    index: HashMap<String, Vec<usize>>,
}

impl NameEquivalence {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        let groups: Vec<Vec<String>> = groups
            .into_iter()
            .map(|g| g.iter().map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()).collect())
            .collect();

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            for name in group {
                let slots = index.entry(name.clone()).or_default();
                if !slots.contains(&i) {
                    slots.push(i);
                }
            }
        }

        Self { groups, index }
    }

    /// The built-in nickname table.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_GROUPS
                .iter()
                .map(|g| g.iter().map(|n| n.to_string()).collect())
                .collect(),
        )
    }

    /// An expander that knows no names.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load groups from a JSON file.
    ///
    /// Supports both formats:
    /// - `{"groups": [["robert", "bob"], ...]}`
    /// - `[["robert", "bob"], ...]`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read equivalence file: {:?}", path.as_ref()))?;

        if let Ok(wrapper) = serde_json::from_str::<GroupsFile>(&content) {
            return Ok(Self::new(wrapper.groups));
        }

        let groups: Vec<Vec<String>> = serde_json::from_str(&content)
            .with_context(|| "Failed to parse equivalence JSON")?;
        Ok(Self::new(groups))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl EquivalenceExpander for NameEquivalence {
    fn expand(&self, first: &str) -> Option<Vec<String>> {
        let key = first.trim().trim_end_matches('.').to_lowercase();
        let slots = self.index.get(&key)?;

        let mut names: Vec<String> = Vec::new();
        for &slot in slots {
            for name in &self.groups[slot] {
                if *name == key {
                    continue;
                }
                let titled = title_case(name);
                if !names.contains(&titled) {
                    names.push(titled);
                }
            }
        }

        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
