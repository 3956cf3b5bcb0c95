// ── Channel point identifier ──
//
// A channel is identified by the outpoint that funded it:
// `<funding-txid>:<output-index>`. Parsing validates the shape before
// any close request is issued — a malformed point never reaches the
// node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Composite channel identifier: funding transaction id + output index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelPoint {
    funding_txid: String,
    output_index: u32,
}

impl ChannelPoint {
    /// The funding transaction id (big-endian hex, as displayed).
    pub fn funding_txid(&self) -> &str {
        &self.funding_txid
    }

    pub fn output_index(&self) -> u32 {
        self.output_index
    }
}

impl fmt::Display for ChannelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.funding_txid, self.output_index)
    }
}

impl FromStr for ChannelPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidChannelPoint {
            value: s.to_owned(),
        };

        let (txid, index) = s.split_once(':').ok_or_else(invalid)?;
        if txid.is_empty() || !txid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let output_index: u32 = index.parse().map_err(|_| invalid())?;

        Ok(Self {
            funding_txid: txid.to_owned(),
            output_index,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_point() {
        let point: ChannelPoint = "FFFF:1".parse().unwrap();
        assert_eq!(point.funding_txid(), "FFFF");
        assert_eq!(point.output_index(), 1);
    }

    #[test]
    fn display_round_trips() {
        let point: ChannelPoint = "abcdef012345:7".parse().unwrap();
        assert_eq!(point.to_string(), "abcdef012345:7");
    }

    #[test]
    fn rejects_missing_colon() {
        let err = "asdf".parse::<ChannelPoint>().unwrap_err();
        assert!(err.to_string().contains("Invalid channel point"));
    }

    #[test]
    fn rejects_non_numeric_index() {
        assert!("FFFF:x".parse::<ChannelPoint>().is_err());
    }

    #[test]
    fn rejects_non_hex_txid() {
        assert!("zzzz:1".parse::<ChannelPoint>().is_err());
    }

    #[test]
    fn rejects_empty_txid() {
        assert!(":1".parse::<ChannelPoint>().is_err());
    }
}
