//! Daemon service - dispatches requests to the match engine.
//!
//! Keeps the engine hot: the SQLite connection stays open and the
//! equivalence table is loaded once.
//!
//! CHANGELOG:
//! - 01/12/2026 - set_condition, compare, abbr, equivalents
//! - 01/11/2026 - Initial implementation (health, match)

use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::config::MatcherConfig;
use crate::db::SqliteStore;
use crate::error::MatchError;
use crate::matcher::{AbbreviationPattern, CallOptions, MatchEngine, NameStyle};

type Params = HashMap<String, Value>;

/// Failure of a single daemon request.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl DispatchError {
    /// Protocol error code.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::UnknownMethod(_) => "UNKNOWN_METHOD",
            DispatchError::BadRequest(_) | DispatchError::Match(MatchError::InvalidArity(_)) => {
                "BAD_REQUEST"
            }
            DispatchError::Match(MatchError::EmptyName) => "EMPTY_NAME",
            DispatchError::Match(_) => "ERROR",
        }
    }
}

type DispatchResult = std::result::Result<Value, DispatchError>;

/// Daemon service with a hot engine.
pub struct DaemonService {
    engine: MatchEngine<SqliteStore>,
    started_at: String, // ISO timestamp
}

impl DaemonService {
    /// Build the engine described by `config`.
    pub fn new(config: &MatcherConfig) -> anyhow::Result<Self> {
        Ok(Self::with_engine(config.build_engine()?))
    }

    pub fn with_engine(engine: MatchEngine<SqliteStore>) -> Self {
        Self {
            engine,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn engine(&self) -> &MatchEngine<SqliteStore> {
        &self.engine
    }

    /// Dispatch request to appropriate handler.
    pub fn dispatch(&mut self, method: &str, params: Params) -> DispatchResult {
        debug!(method, "dispatch");
        match method {
            "health" => self.health(),
            "match" => self.find(&params),
            "compare" => self.compare(&params),
            "abbr" => self.abbr(&params),
            "equivalents" => self.equivalents(&params),
            "set_condition" => self.set_condition(&params),
            _ => Err(DispatchError::UnknownMethod(method.to_string())),
        }
    }

    fn health(&self) -> DispatchResult {
        Ok(json!({
            "pid": std::process::id(),
            "started_at": self.started_at,
            "version": env!("CARGO_PKG_VERSION"),
            "table": self.engine.store().table(),
            "condition": self.engine.condition(),
        }))
    }

    /// Params: fullname, or first/middle/last/suffix; expand (default true)
    fn find(&self, params: &Params) -> DispatchResult {
        let parts: Vec<Option<&str>> = ["first", "middle", "last", "suffix"]
            .iter()
            .map(|key| str_param(params, key))
            .collect::<Result<_, _>>()?;

        let mut args: Vec<Option<&str>> = Vec::new();
        if let Some(fullname) = str_param(params, "fullname")? {
            args.push(Some(fullname));
        }
        if parts.iter().any(Option::is_some) {
            args.extend(parts);
        }

        let call = CallOptions {
            recursive: bool_param(params, "expand")?.unwrap_or(true),
        };
        let matches = self.engine.get_matches_from_args(&args, call)?;

        Ok(json!({
            "count": matches.len(),
            "matches": matches,
        }))
    }

    /// Params: a, b
    fn compare(&self, params: &Params) -> DispatchResult {
        let a = required_str(params, "a")?;
        let b = required_str(params, "b")?;
        let n1 = self.engine.parser().parse_fullname(a);
        let n2 = self.engine.parser().parse_fullname(b);
        let same = self.engine.names_match(&n1, NameStyle::Short, &n2, NameStyle::Short);

        Ok(json!({ "a": n1, "b": n2, "match": same }))
    }

    /// Params: source, candidate
    fn abbr(&self, params: &Params) -> DispatchResult {
        let source = required_str(params, "source")?;
        let candidate = required_str(params, "candidate")?;
        let pattern = AbbreviationPattern::build(source)?;

        Ok(json!({
            "pattern": pattern.as_str(),
            "match": pattern.is_match(candidate),
        }))
    }

    /// Params: name
    fn equivalents(&self, params: &Params) -> DispatchResult {
        let name = required_str(params, "name")?;
        let names = self.engine.expander().expand(name).unwrap_or_default();

        Ok(json!({ "name": name, "equivalents": names }))
    }

    /// Params: condition (string, or null/absent to clear)
    fn set_condition(&mut self, params: &Params) -> DispatchResult {
        let condition = str_param(params, "condition")?.map(String::from);
        self.engine.set_condition(condition);

        Ok(json!({ "condition": self.engine.condition() }))
    }
}

fn str_param<'a>(params: &'a Params, key: &str) -> Result<Option<&'a str>, DispatchError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DispatchError::BadRequest(format!("{} must be a string", key))),
    }
}

fn required_str<'a>(params: &'a Params, key: &str) -> Result<&'a str, DispatchError> {
    str_param(params, key)?.ok_or_else(|| DispatchError::BadRequest(format!("missing {}", key)))
}

fn bool_param(params: &Params, key: &str) -> Result<Option<bool>, DispatchError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(DispatchError::BadRequest(format!("{} must be a boolean", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ColumnMapping;
    use crate::names::NameEquivalence;
    use crate::store::PersonRecord;

    fn service() -> DaemonService {
        let mut store = SqliteStore::in_memory("people").unwrap();
        store.create_table(&ColumnMapping::default()).unwrap();
        store
            .insert_all(&[
                PersonRecord::new()
                    .with("first", Some("Robert"))
                    .with("middle", Some("James"))
                    .with("last", Some("Smith")),
                PersonRecord::new()
                    .with("first", Some("Ann"))
                    .with("last", Some("Lee"))
                    .with("suffix", Some("Jr.")),
            ])
            .unwrap();
        let engine = MatchEngine::new(store)
            .with_expander(NameEquivalence::new(vec![vec!["Robert".into(), "Bob".into()]]));
        DaemonService::with_engine(engine)
    }

    fn params(value: Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_health() {
        let mut svc = service();
        let result = svc.dispatch("health", Params::new()).unwrap();
        assert_eq!(result["table"], "people");
        assert_eq!(result["condition"], Value::Null);
        assert!(result["pid"].as_u64().is_some());
    }

    #[test]
    fn test_match_fullname() {
        let mut svc = service();
        let result = svc
            .dispatch("match", params(json!({"fullname": "Bob J. Smith"})))
            .unwrap();
        assert_eq!(result["count"], 1);
        assert_eq!(result["matches"][0]["first"], "Robert");
    }

    #[test]
    fn test_match_without_expansion() {
        let mut svc = service();
        let result = svc
            .dispatch("match", params(json!({"fullname": "Bob Smith", "expand": false})))
            .unwrap();
        assert_eq!(result["count"], 0);
    }

    #[test]
    fn test_match_parts() {
        let mut svc = service();
        let result = svc
            .dispatch("match", params(json!({"first": "Ann", "last": "Lee", "suffix": "Jr"})))
            .unwrap();
        assert_eq!(result["count"], 1);
        assert_eq!(result["matches"][0]["id"], 2);
    }

    #[test]
    fn test_match_arity_error() {
        let mut svc = service();
        let err = svc.dispatch("match", Params::new()).unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");

        let err = svc
            .dispatch("match", params(json!({"fullname": "Ann Lee", "first": "Ann"})))
            .unwrap_err();
        assert!(matches!(err, DispatchError::Match(MatchError::InvalidArity(5))));
    }

    #[test]
    fn test_compare() {
        let mut svc = service();
        let result = svc
            .dispatch("compare", params(json!({"a": "Robert J. Smith", "b": "R. James Smith"})))
            .unwrap();
        assert_eq!(result["match"], true);
    }

    #[test]
    fn test_abbr() {
        let mut svc = service();
        let result = svc
            .dispatch("abbr", params(json!({"source": "abc edf", "candidate": "abc e"})))
            .unwrap();
        assert_eq!(result["match"], false);

        let err = svc
            .dispatch("abbr", params(json!({"source": " . ", "candidate": "x"})))
            .unwrap_err();
        assert_eq!(err.code(), "EMPTY_NAME");
    }

    #[test]
    fn test_equivalents() {
        let mut svc = service();
        let result = svc
            .dispatch("equivalents", params(json!({"name": "bob"})))
            .unwrap();
        assert_eq!(result["equivalents"], json!(["Robert"]));
    }

    #[test]
    fn test_set_condition() {
        let mut svc = service();
        svc.dispatch("set_condition", params(json!({"condition": "middle IS NULL"})))
            .unwrap();
        assert_eq!(svc.engine().condition(), Some("middle IS NULL"));

        let result = svc
            .dispatch("match", params(json!({"fullname": "Robert Smith"})))
            .unwrap();
        assert_eq!(result["count"], 0);

        svc.dispatch("set_condition", params(json!({"condition": null})))
            .unwrap();
        assert_eq!(svc.engine().condition(), None);
    }

    #[test]
    fn test_bad_params() {
        let mut svc = service();
        let err = svc.dispatch("compare", params(json!({"a": 1, "b": "x"}))).unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
        let err = svc.dispatch("abbr", params(json!({"source": "x"}))).unwrap_err();
        assert_eq!(err.to_string(), "missing candidate");
    }

    #[test]
    fn test_unknown_method() {
        let mut svc = service();
        let err = svc.dispatch("send", Params::new()).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_METHOD");
    }
}
