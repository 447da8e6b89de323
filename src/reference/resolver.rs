//! Country-name resolution against a canonical key list.
//!
//! Input tables spell countries differently ("Rep. of Korea" vs "Korea").
//! A `NameResolver` maps every distinct raw name to a key once, up front:
//! an exact match always wins, otherwise the first key that contains or is
//! contained by the name is taken. Ambiguous and unresolved names are
//! logged and can be listed for diagnostics.

use log::{debug, warn};
use std::collections::HashMap;

/// Outcome of resolving one name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Name equals the key at this index
    Exact(usize),

    /// Name and key contain one another
    Fuzzy(usize),

    /// Several keys matched by containment; the first is used
    Ambiguous { chosen: usize, candidates: usize },

    Unresolved,
}

impl Resolution {
    /// Index of the selected key, if any
    pub fn index(&self) -> Option<usize> {
        match *self {
            Resolution::Exact(i) | Resolution::Fuzzy(i) => Some(i),
            Resolution::Ambiguous { chosen, .. } => Some(chosen),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.index().is_some()
    }
}

/// Whether two non-empty names contain one another
pub fn names_overlap(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Resolve a single name against `keys` without caching
pub fn match_name(keys: &[String], name: &str) -> Resolution {
    let name = name.trim();
    if name.is_empty() {
        return Resolution::Unresolved;
    }

    if let Some(i) = keys.iter().position(|k| k == name) {
        return Resolution::Exact(i);
    }

    let mut candidates = keys
        .iter()
        .enumerate()
        .filter(|(_, k)| names_overlap(name, k))
        .map(|(i, _)| i);

    match candidates.next() {
        None => Resolution::Unresolved,
        Some(first) => {
            let others = candidates.count();
            if others == 0 {
                Resolution::Fuzzy(first)
            } else {
                Resolution::Ambiguous {
                    chosen: first,
                    candidates: others + 1,
                }
            }
        }
    }
}

/// Canonical-name mapping built once per key list
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    keys: Vec<String>,
    resolved: HashMap<String, Resolution>,
}

impl NameResolver {
    /// Build a resolver and resolve every distinct name in `names`
    pub fn build<'a, I>(keys: Vec<String>, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut resolved = HashMap::new();

        for name in names {
            if resolved.contains_key(name) {
                continue;
            }

            let resolution = match_name(&keys, name);
            match resolution {
                Resolution::Exact(_) => {}
                Resolution::Fuzzy(i) => {
                    debug!("Resolved '{}' to '{}' by containment", name, keys[i]);
                }
                Resolution::Ambiguous { chosen, candidates } => {
                    warn!(
                        "'{}' matches {} names, using '{}'",
                        name, candidates, keys[chosen]
                    );
                }
                Resolution::Unresolved => {
                    warn!("No canonical name for '{}'", name);
                }
            }

            resolved.insert(name.to_string(), resolution);
        }

        Self { keys, resolved }
    }

    /// Resolution for `name` (computed on the fly for names not seen at build)
    pub fn resolve(&self, name: &str) -> Resolution {
        self.resolved
            .get(name)
            .copied()
            .unwrap_or_else(|| match_name(&self.keys, name))
    }

    /// Canonical key for `name`
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.resolve(name).index().map(|i| self.keys[i].as_str())
    }

    /// Names seen at build time that matched no key, sorted
    pub fn unresolved(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resolved
            .iter()
            .filter(|(_, r)| !r.is_resolved())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
