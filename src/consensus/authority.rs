//! Validator authority set
//!
//! Only members may mine. Grants are permanent; there is no revocation.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritySet {
    members: BTreeSet<String>,
}

impl AuthoritySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant mining rights; returns false if already granted
    pub fn grant(&mut self, name: impl Into<String>) -> bool {
        self.members.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }
}
