//! Document-scoped name/id lookup of embedded-content elements.
//!
//! The index has two independent domains. The [`NameDomain::Name`] domain
//! backs `document.someName` lookups from `name` attributes; the
//! [`NameDomain::Id`] domain backs the extra lookups HTML documents perform
//! for the `id` of applets and objects. Several elements may share a key.

use std::collections::{BTreeSet, HashMap};

use crate::document::NodeId;

/// Which of the two lookup tables a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameDomain {
    /// Keys taken from `name` attributes.
    Name,
    /// Keys taken from `id` attributes.
    Id,
}

/// Multimap from name/id keys to elements.
#[derive(Debug, Default, Clone)]
pub struct NamedItemIndex {
    names: HashMap<String, BTreeSet<NodeId>>,
    ids: HashMap<String, BTreeSet<NodeId>>,
}

impl NamedItemIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn table(&self, domain: NameDomain) -> &HashMap<String, BTreeSet<NodeId>> {
        match domain {
            NameDomain::Name => &self.names,
            NameDomain::Id => &self.ids,
        }
    }

    const fn table_mut(&mut self, domain: NameDomain) -> &mut HashMap<String, BTreeSet<NodeId>> {
        match domain {
            NameDomain::Name => &mut self.names,
            NameDomain::Id => &mut self.ids,
        }
    }

    /// Registers `node` under `key`. Empty keys are never registered.
    ///
    /// Returns `false` if the pair was already present.
    pub fn add(&mut self, domain: NameDomain, key: &str, node: NodeId) -> bool {
        if key.is_empty() {
            return false;
        }
        let added = self
            .table_mut(domain)
            .entry(key.to_owned())
            .or_default()
            .insert(node);
        if added {
            tracing::trace!(?domain, key, ?node, "named item added");
        }
        added
    }

    /// Unregisters `node` from `key`. Removing an absent pair is a no-op.
    ///
    /// Returns `true` if the pair was present.
    pub fn remove(&mut self, domain: NameDomain, key: &str, node: NodeId) -> bool {
        let table = self.table_mut(domain);
        let Some(nodes) = table.get_mut(key) else {
            return false;
        };
        let removed = nodes.remove(&node);
        if nodes.is_empty() {
            table.remove(key);
        }
        if removed {
            tracing::trace!(?domain, key, ?node, "named item removed");
        }
        removed
    }

    /// Elements registered under `key`, in node key order.
    pub fn get(&self, domain: NameDomain, key: &str) -> impl Iterator<Item = NodeId> + '_ {
        self.table(domain)
            .get(key)
            .into_iter()
            .flat_map(|nodes| nodes.iter().copied())
    }

    /// Whether `node` is registered under `key`.
    #[must_use]
    pub fn contains(&self, domain: NameDomain, key: &str, node: NodeId) -> bool {
        self.table(domain)
            .get(key)
            .is_some_and(|nodes| nodes.contains(&node))
    }

    /// All keys `node` is registered under, sorted.
    #[must_use]
    pub fn keys_of(&self, domain: NameDomain, node: NodeId) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .table(domain)
            .iter()
            .filter(|(_, nodes)| nodes.contains(&node))
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Number of distinct keys in a domain.
    #[must_use]
    pub fn len(&self, domain: NameDomain) -> usize {
        self.table(domain).len()
    }

    /// Whether both domains are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_multimap_semantics() {
        let ids = nodes(2);
        let mut index = NamedItemIndex::new();

        assert!(index.add(NameDomain::Name, "movie", ids[0]));
        assert!(index.add(NameDomain::Name, "movie", ids[1]));
        assert_eq!(index.get(NameDomain::Name, "movie").count(), 2);
        assert_eq!(index.len(NameDomain::Name), 1);

        assert!(index.remove(NameDomain::Name, "movie", ids[0]));
        assert_eq!(index.get(NameDomain::Name, "movie").collect::<Vec<_>>(), [ids[1]]);
    }

    #[test]
    fn test_double_add_and_remove_are_tolerated() {
        let ids = nodes(1);
        let mut index = NamedItemIndex::new();

        assert!(index.add(NameDomain::Id, "player", ids[0]));
        assert!(!index.add(NameDomain::Id, "player", ids[0]));
        assert!(index.remove(NameDomain::Id, "player", ids[0]));
        assert!(!index.remove(NameDomain::Id, "player", ids[0]));
        assert!(!index.remove(NameDomain::Id, "never-added", ids[0]));
        assert!(index.is_empty());
    }

    #[test]
    fn test_domains_are_independent() {
        let ids = nodes(1);
        let mut index = NamedItemIndex::new();

        index.add(NameDomain::Name, "x", ids[0]);
        assert!(index.contains(NameDomain::Name, "x", ids[0]));
        assert!(!index.contains(NameDomain::Id, "x", ids[0]));

        index.remove(NameDomain::Id, "x", ids[0]);
        assert!(index.contains(NameDomain::Name, "x", ids[0]));
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let ids = nodes(1);
        let mut index = NamedItemIndex::new();
        assert!(!index.add(NameDomain::Name, "", ids[0]));
        assert!(index.is_empty());
    }

    #[test]
    fn test_keys_of() {
        let ids = nodes(2);
        let mut index = NamedItemIndex::new();
        index.add(NameDomain::Name, "b", ids[0]);
        index.add(NameDomain::Name, "a", ids[0]);
        index.add(NameDomain::Name, "c", ids[1]);
        assert_eq!(index.keys_of(NameDomain::Name, ids[0]), ["a", "b"]);
        assert!(index.keys_of(NameDomain::Id, ids[0]).is_empty());
    }
}
