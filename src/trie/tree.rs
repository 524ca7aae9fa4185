//! The per-family binary radix trie (§4.2).

use crate::af::AddressFamily;
use crate::query::MatchMode;
use crate::record::RouteEntry;
use crate::trie::node::TrieNode;

/// One address family's routing trie.
///
/// A [`crate::store::RouteStore`] owns one of these per family behind a
/// reader-writer lock; the trie itself has no notion of concurrency.
pub struct Trie<AF> {
    root: TrieNode<AF>,
    count: usize,
}

impl<AF: AddressFamily> Default for Trie<AF> {
    fn default() -> Self {
        Self::new()
    }
}

impl<AF: AddressFamily> Trie<AF> {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
            count: 0,
        }
    }

    /// Number of `RouteEntry` values currently stored (I3).
    pub fn route_count(&self) -> usize {
        self.count
    }

    /// Appends `entry` at the node reached by walking `len` bits of
    /// `bits` from the most significant bit, creating nodes as needed.
    pub fn insert(&mut self, bits: AF, len: u8, entry: RouteEntry<AF>) {
        let mut node = &mut self.root;
        for pos in 0..len {
            node = if bits.bit(pos) {
                node.right.get_or_insert_with(|| Box::new(TrieNode::new()))
            } else {
                node.left.get_or_insert_with(|| Box::new(TrieNode::new()))
            };
        }
        node.routes.push(entry);
        self.count += 1;
    }

    /// Walks `addr` bit by bit from the root, collecting every entry on
    /// the path (the root's entries capture the default route). Returns
    /// entries in strictly non-decreasing `prefix_len` order, possibly
    /// empty.
    pub fn lookup(&self, addr: AF) -> Vec<RouteEntry<AF>> {
        let mut matches: Vec<RouteEntry<AF>> = self.root.routes.clone();
        let mut node = &self.root;
        for pos in 0..AF::BITS {
            let next = if addr.bit(pos) {
                node.right.as_deref()
            } else {
                node.left.as_deref()
            };
            match next {
                Some(n) => {
                    node = n;
                    matches.extend(n.routes.iter().cloned());
                }
                None => break,
            }
        }
        matches
    }

    /// Navigates to the node at `bits`/`len` and updates matching metrics
    /// under `mode`. Returns 0 (not an error) if the path doesn't exist.
    pub fn update_metric(
        &mut self,
        bits: AF,
        len: u8,
        prefix_str: &str,
        next_hop: &str,
        metric: u16,
        mode: MatchMode,
    ) -> usize {
        let Some(target) = navigate_mut(&mut self.root, bits, len) else {
            return 0;
        };
        match mode {
            MatchMode::Exact => {
                let mut count = 0;
                for route in target.routes.iter_mut() {
                    if route.next_hop_str == next_hop && route.prefix_str == prefix_str {
                        route.metric = metric;
                        count += 1;
                    }
                }
                count
            }
            MatchMode::OrLonger => update_subtree(target, next_hop, metric),
        }
    }
}

fn navigate_mut<AF: AddressFamily>(
    root: &mut TrieNode<AF>,
    bits: AF,
    len: u8,
) -> Option<&mut TrieNode<AF>> {
    let mut node = root;
    for pos in 0..len {
        let child = if bits.bit(pos) {
            node.right.as_mut()
        } else {
            node.left.as_mut()
        };
        node = child?.as_mut();
    }
    Some(node)
}

fn update_subtree<AF: AddressFamily>(
    node: &mut TrieNode<AF>,
    next_hop: &str,
    metric: u16,
) -> usize {
    let mut count = 0;
    for route in node.routes.iter_mut() {
        if route.next_hop_str == next_hop {
            route.metric = metric;
            count += 1;
        }
    }
    if let Some(left) = node.left.as_deref_mut() {
        count += update_subtree(left, next_hop, metric);
    }
    if let Some(right) = node.right.as_deref_mut() {
        count += update_subtree(right, next_hop, metric);
    }
    count
}
