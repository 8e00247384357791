//! Key-path resolution into nested truth metadata.

use serde::Deserialize;
use serde_json::Value;

/// One step of a field path: either a single key or an ordered list of
/// alias keys where the first key *present* in the mapping wins, whatever
/// its value is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Key(String),
    Aliases(Vec<String>),
}

impl Selector {
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    pub fn aliases<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Aliases(names.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Key(k) => k.is_empty(),
            Self::Aliases(keys) => keys.is_empty() || keys.iter().any(String::is_empty),
        }
    }
}

/// Walk selectors left to right from `root`. Absent keys, exhausted alias
/// lists and non-mapping intermediate values all resolve to `None` — absent
/// data is expected and common, not an error.
pub fn resolve<'a>(root: &'a Value, path: &[Selector]) -> Option<&'a Value> {
    let mut cursor = root;
    for selector in path {
        let map = cursor.as_object()?;
        cursor = match selector {
            Selector::Key(key) => map.get(key)?,
            Selector::Aliases(keys) => keys.iter().find_map(|k| map.get(k))?,
        };
    }
    Some(cursor)
}
