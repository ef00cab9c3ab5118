use crate::errors::{invalid_input, AppResult};
use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeSet;

#[derive(Debug, Serialize, FromRow, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A tag plus whether the current listing filters on it.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TagSelection {
    pub id: i64,
    pub name: String,
    pub is_selected: bool,
}

impl TagSelection {
    pub fn new(tag: Tag, filter: &TagFilter) -> Self {
        let is_selected = filter.contains(tag.id);
        Self {
            id: tag.id,
            name: tag.name,
            is_selected,
        }
    }
}

/// A validated set of tag ids. Posts match when they carry any of them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagFilter(BTreeSet<i64>);

impl TagFilter {
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses a comma separated id list such as `"2,5"`.
    ///
    /// Blank tokens are skipped so `""`, `"2,"` and `" 2 , 5 "` are accepted.
    /// Anything that is not a positive integer is rejected.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let mut ids = BTreeSet::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let id = token
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| invalid_input(&format!("invalid tag id: {:?}", token)))?;
            ids.insert(id);
        }
        Ok(Self(ids))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Canonical form used when building listing links.
    pub fn to_query_value(&self) -> String {
        self.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<i64> for TagFilter {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|id| *id > 0).collect())
    }
}
