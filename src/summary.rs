//! Compact description of a fetched chain, used for log lines.

use chains_client::{Chains, ExpDateMap, ExpDateOption};
use std::fmt;

/// Counts taken from one chain snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    /// Underlying symbol.
    pub symbol: String,
    /// Status reported by the broker.
    pub status: String,
    /// Distinct expirations across calls and puts.
    pub expirations: usize,
    /// Call contracts.
    pub calls: usize,
    /// Put contracts.
    pub puts: usize,
    /// Contracts with at least one greek the broker could not compute.
    pub undefined_greeks: usize,
}

impl ChainSummary {
    /// Summarizes a chain.
    #[must_use]
    pub fn from_chains(chains: &Chains) -> Self {
        Self {
            symbol: chains.symbol.clone(),
            status: chains.status.clone(),
            expirations: chains.expirations().len(),
            calls: count(&chains.call_exp_date_map),
            puts: count(&chains.put_exp_date_map),
            undefined_greeks: chains.contracts().filter(|c| has_undefined_greek(c)).count(),
        }
    }
}

impl fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} expirations, {} calls, {} puts, {} with undefined greeks",
            self.symbol, self.status, self.expirations, self.calls, self.puts, self.undefined_greeks
        )
    }
}

fn count(map: &ExpDateMap) -> usize {
    map.values().flat_map(|strikes| strikes.values()).map(Vec::len).sum()
}

fn has_undefined_greek(option: &ExpDateOption) -> bool {
    [
        option.volatility,
        option.delta,
        option.gamma,
        option.theta,
        option.vega,
        option.rho,
        option.theoretical_option_value,
        option.theoretical_volatility,
    ]
    .iter()
    .any(|greek| !greek.is_finite())
}
