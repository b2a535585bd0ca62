//! Name normalizer: strip trailing price and decoration fragments from raw
//! listing names via an ordered, end-anchored rule list.

use crate::domain::CleanupRule;
use regex::Regex;
use tracing::warn;

/// A profile's cleanup rules, compiled once per source.
///
/// Invalid patterns are warned about and skipped rather than failing the
/// profile, matching how selector cascades degrade.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: Vec<Regex>,
}

impl CompiledRules {
    pub fn compile(rules: &[CleanupRule]) -> Self {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            match Regex::new(&rule.pattern) {
                Ok(regex) => compiled.push(regex),
                Err(e) => warn!("skipping invalid cleanup rule '{}': {e}", rule.pattern),
            }
        }
        Self { rules: compiled }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Apply the rules in declared order, each removing at most the matched tail,
/// then trim surrounding whitespace.
///
/// May return an empty string; the caller treats empty or too-short output as
/// extraction failure rather than fabricating a name.
pub fn normalize(raw: &str, rules: &CompiledRules) -> String {
    let mut name = raw.to_string();
    for rule in &rules.rules {
        name = rule.replace(&name, "").into_owned();
    }
    name.trim().to_string()
}
