//! The normative ordering of §4.1, and the match mode for metric updates.

use std::fmt;

use crate::af::AddressFamily;
use crate::errors::StoreError;
use crate::record::RouteEntry;

/// How an update request selects which routes in a subtree to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Only the entries at the exact target prefix.
    Exact,
    /// The target prefix and every entry in its subtree.
    OrLonger,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::OrLonger => write!(f, "orlonger"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchMode::Exact),
            "orlonger" => Ok(MatchMode::OrLonger),
            other => Err(StoreError::InvalidMode(other.to_string())),
        }
    }
}

/// Picks the best entry among `candidates` under the §4.1 ordering:
/// longest prefix first, then lowest metric, then lowest numeric next hop.
///
/// `candidates` is the full path collected by [`crate::trie::Trie::lookup`]
/// and may contain entries of more than one prefix length; it must not be
/// empty.
pub fn best_route<AF: AddressFamily>(candidates: &[RouteEntry<AF>]) -> Option<&RouteEntry<AF>> {
    candidates.iter().min_by(|a, b| {
        b.prefix_len
            .cmp(&a.prefix_len)
            .then(a.metric.cmp(&b.metric))
            .then(a.next_hop_numeric.cmp(&b.next_hop_numeric))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::Prefix;

    fn entry(prefix: &str, next_hop: &str, metric: u16) -> RouteEntry<u32> {
        let p: Prefix = prefix.parse().unwrap();
        RouteEntry::new(&p, next_hop, metric)
    }

    #[test]
    fn longer_prefix_wins() {
        let a = entry("10.0.0.0/8", "1.1.1.1", 100);
        let b = entry("10.1.0.0/16", "1.1.1.1", 999);
        let best = best_route(&[a, b]).unwrap();
        assert_eq!(best.prefix_len, 16);
    }

    #[test]
    fn lower_metric_wins_on_tied_length() {
        let a = entry("192.168.1.0/24", "10.0.0.2", 200);
        let b = entry("192.168.1.0/24", "10.0.0.1", 100);
        let best = best_route(&[a, b]).unwrap();
        assert_eq!(best.next_hop_str, "10.0.0.1");
    }

    #[test]
    fn lower_next_hop_wins_on_full_tie() {
        let a = entry("192.168.1.0/24", "10.0.0.2", 100);
        let b = entry("192.168.1.0/24", "10.0.0.1", 100);
        let best = best_route(&[a, b]).unwrap();
        assert_eq!(best.next_hop_str, "10.0.0.1");
    }

    #[test]
    fn match_mode_parses_only_known_values() {
        assert_eq!("exact".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert_eq!(
            "orlonger".parse::<MatchMode>().unwrap(),
            MatchMode::OrLonger
        );
        assert!("sideways".parse::<MatchMode>().is_err());
    }
}
