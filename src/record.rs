//! The unit of data stored at a trie node.

use std::net::IpAddr;

use crate::af::AddressFamily;
use crate::prefix::{Family, Prefix};

/// The maximum permitted metric, and the default a freshly loaded route
/// gets if the CSV doesn't otherwise imply one.
pub const MAX_METRIC: u16 = 32768;

/// A single `(prefix, next_hop, metric)` row of the forwarding table.
///
/// Everything but `metric` is set once at insert time and never changes;
/// `metric` is mutated in place by [`crate::store::RouteStore::update_metric`].
#[derive(Debug, Clone)]
pub struct RouteEntry<AF> {
    /// Canonical CIDR text, e.g. `"192.168.1.0/24"`. Used for equality in
    /// `exact`-mode updates and returned verbatim as `dst` by the facade.
    pub prefix_str: String,
    pub family: Family,
    pub prefix_len: u8,
    /// Textual next hop, returned verbatim to callers.
    pub next_hop_str: String,
    /// The next hop as an integer of this family, used only as the final
    /// tie-breaker in §4.1's ordering. Defaults to zero when the next-hop
    /// text didn't parse (the loader tolerates this; see `insert_tolerant`).
    pub next_hop_numeric: AF,
    pub metric: u16,
}

impl<AF: AddressFamily> RouteEntry<AF> {
    pub fn new(prefix: &Prefix, next_hop: &str, metric: u16) -> Self {
        let next_hop_numeric = next_hop
            .parse::<IpAddr>()
            .ok()
            .and_then(AF::from_ip_addr)
            .unwrap_or_else(AF::zero);

        RouteEntry {
            prefix_str: prefix.to_string(),
            family: prefix.family(),
            prefix_len: prefix.len(),
            next_hop_str: next_hop.to_string(),
            next_hop_numeric,
            metric,
        }
    }
}
