//! CIDR and bare-IP parsing.
//!
//! This is the parser component from the system overview: it turns the
//! text a caller hands us (a CSV field, a path segment) into a
//! [`Prefix`] with canonicalised network bits, or rejects it with
//! [`StoreError::InvalidPrefix`].

use std::net::IpAddr;
use std::str::FromStr;

use crate::af::AddressFamily;
use crate::errors::StoreError;

/// Which of the two disjoint tries a prefix or address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "v4"),
            Family::V6 => write!(f, "v6"),
        }
    }
}

/// A parsed, canonicalised CIDR prefix: host bits below `prefix_len` are
/// always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    V4 { bits: u32, len: u8 },
    V6 { bits: u128, len: u8 },
}

impl Prefix {
    pub fn family(&self) -> Family {
        match self {
            Prefix::V4 { .. } => Family::V4,
            Prefix::V6 { .. } => Family::V6,
        }
    }

    pub fn len(&self) -> u8 {
        match self {
            Prefix::V4 { len, .. } => *len,
            Prefix::V6 { len, .. } => *len,
        }
    }

    /// The network address of this prefix, as plain text (no `/len`).
    pub fn network_addr_string(&self) -> String {
        match self {
            Prefix::V4 { bits, .. } => bits.to_ip_addr().to_string(),
            Prefix::V6 { bits, .. } => bits.to_ip_addr().to_string(),
        }
    }

    /// Build a prefix directly from already-canonical bits, skipping the
    /// text round trip. Used by the trie when it needs to hand back a
    /// synthetic prefix (e.g. in tests).
    pub fn from_parts_v4(bits: u32, len: u8) -> Self {
        Prefix::V4 {
            bits: bits.mask(len),
            len,
        }
    }

    pub fn from_parts_v6(bits: u128, len: u8) -> Self {
        Prefix::V6 {
            bits: bits.mask(len),
            len,
        }
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network_addr_string(), self.len())
    }
}

impl FromStr for Prefix {
    type Err = StoreError;

    /// Parses `addr/len`, or a bare address (treated as a host route with
    /// `len == BITS`). Host bits below `len` are masked to zero rather
    /// than rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr_part, len_part) = match s.split_once('/') {
            Some((a, l)) => (a, Some(l)),
            None => (s, None),
        };

        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| StoreError::InvalidPrefix(s.to_string()))?;

        let max_len = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };

        let len: u8 = match len_part {
            Some(l) => l
                .parse()
                .ok()
                .filter(|&n| n <= max_len)
                .ok_or_else(|| StoreError::InvalidPrefix(s.to_string()))?,
            None => max_len,
        };

        Ok(match addr {
            IpAddr::V4(v4) => Prefix::from_parts_v4(u32::from(v4), len),
            IpAddr::V6(v6) => Prefix::from_parts_v6(u128::from(v6), len),
        })
    }
}

/// Parses a bare next-hop IP address (no prefix length).
pub fn parse_next_hop(s: &str) -> Result<IpAddr, StoreError> {
    s.trim()
        .parse()
        .map_err(|_| StoreError::InvalidNextHop(s.to_string()))
}
