//! Best-effort full-name parser.
//!
//! Handles titles, suffixes, "Last, First Middle" order and last-name
//! particles. Anything fancier belongs in a dedicated parser plugged in
//! through [`NameParser`].
//!
//! CHANGELOG:
//! - 01/12/2026 - Comma forms and last-name particles
//! - 01/11/2026 - Initial implementation

use super::NameQuery;

/// Turns free text into a structured name.
pub trait NameParser {
    fn parse_fullname(&self, text: &str) -> NameQuery;
}

impl<P: NameParser + ?Sized> NameParser for Box<P> {
    fn parse_fullname(&self, text: &str) -> NameQuery {
        (**self).parse_fullname(text)
    }
}

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "rev", "hon", "sir", "dame", "fr", "capt",
    "sgt", "col", "gen", "lt",
];

const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "v", "vi", "md", "phd", "dds", "dmd", "do", "esq", "cpa",
    "rn", "jd", "mba", "ret",
];

const PARTICLES: &[&str] = &[
    "van", "von", "der", "den", "de", "del", "della", "di", "da", "dos", "du", "la", "le", "st",
    "ste", "mac", "bin", "ibn", "al",
];

/// The parser used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl NameParser for DefaultParser {
    fn parse_fullname(&self, text: &str) -> NameQuery {
        let mut parts = text.split(',').map(str::trim).filter(|p| !p.is_empty());
        let head = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        let mut suffixes: Vec<String> = Vec::new();

        // "Smith, John A" or "Smith, John A, Jr." or "John Smith, Jr."
        let (last_first, mut given): (Option<Vec<String>>, Vec<String>) = match rest.first() {
            Some(second) if !is_suffix_phrase(second) => {
                let last = tokens(head);
                let given = tokens(second);
                for extra in &rest[1..] {
                    suffixes.extend(tokens(extra));
                }
                (Some(last), given)
            }
            _ => {
                for extra in &rest {
                    suffixes.extend(tokens(extra));
                }
                (None, tokens(head))
            }
        };

        while given.first().is_some_and(|t| is_title(t)) {
            given.remove(0);
        }

        let last = match last_first {
            Some(last) => {
                while given.last().is_some_and(|t| is_suffix(t)) {
                    if let Some(s) = given.pop() {
                        suffixes.insert(0, s);
                    }
                }
                last
            }
            None => {
                while given.len() > 1 && given.last().is_some_and(|t| is_suffix(t)) {
                    if let Some(s) = given.pop() {
                        suffixes.insert(0, s);
                    }
                }
                split_last(&mut given)
            }
        };

        let first = if given.is_empty() {
            None
        } else {
            Some(given.remove(0))
        };
        let middle = join(&given);
        let last = join(&last);
        let suffix = join(&suffixes);

        NameQuery::new(
            first.as_deref(),
            middle.as_deref(),
            last.as_deref(),
            suffix.as_deref(),
        )
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

fn join(parts: &[String]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn bare(token: &str) -> String {
    token.trim_matches('.').replace('.', "").to_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&bare(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&bare(token).as_str())
}

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&bare(token).as_str())
}

fn is_suffix_phrase(text: &str) -> bool {
    let parts = tokens(text);
    !parts.is_empty() && parts.iter().all(|t| is_suffix(t))
}

/// Split off the last name, pulling preceding particles ("van", "de la") along.
fn split_last(given: &mut Vec<String>) -> Vec<String> {
    let Some(last) = given.pop() else {
        return Vec::new();
    };
    let mut parts = vec![last];
    // Keep at least one token for the first name.
    while given.len() > 1 && given.last().is_some_and(|t| is_particle(t)) {
        if let Some(p) = given.pop() {
            parts.insert(0, p);
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> NameQuery {
        DefaultParser.parse_fullname(text)
    }

    #[test]
    fn test_first_middle_last() {
        let q = parse("Robert James Smith");
        assert_eq!(q, NameQuery::new(Some("Robert"), Some("James"), Some("Smith"), None));
    }

    #[test]
    fn test_title_and_suffix() {
        let q = parse("Dr. Martin Luther King Jr.");
        assert_eq!(
            q,
            NameQuery::new(Some("Martin"), Some("Luther"), Some("King"), Some("Jr."))
        );
    }

    #[test]
    fn test_comma_order() {
        let q = parse("Smith, John A.");
        assert_eq!(q, NameQuery::new(Some("John"), Some("A."), Some("Smith"), None));

        let q = parse("Smith, John A, III");
        assert_eq!(q, NameQuery::new(Some("John"), Some("A"), Some("Smith"), Some("III")));
    }

    #[test]
    fn test_trailing_suffix_after_comma() {
        let q = parse("John Smith, Jr.");
        assert_eq!(q, NameQuery::new(Some("John"), None, Some("Smith"), Some("Jr.")));
    }

    #[test]
    fn test_particles() {
        let q = parse("Ludwig van Beethoven");
        assert_eq!(q, NameQuery::new(Some("Ludwig"), None, Some("van Beethoven"), None));

        let q = parse("Maria de la Cruz");
        assert_eq!(q, NameQuery::new(Some("Maria"), None, Some("de la Cruz"), None));
    }

    #[test]
    fn test_single_word_is_last_name() {
        let q = parse("Cher");
        assert_eq!(q, NameQuery::new(None, None, Some("Cher"), None));
        assert!(!q.is_matchable());
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse("   "), NameQuery::default());
    }
}
