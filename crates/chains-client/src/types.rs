//! Request and response types for the chains endpoint.

use crate::special_float::SpecialFloat;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;


/// Decodes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

type NullableExpDateMap =
    Option<HashMap<String, Option<HashMap<String, Option<Vec<Option<ExpDateOption>>>>>>>;

/// Decodes an [`ExpDateMap`], reading `null` at any level as empty.
fn exp_date_map<'de, D>(deserializer: D) -> Result<ExpDateMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NullableExpDateMap::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(expiration, strikes)| {
            let strikes = strikes
                .unwrap_or_default()
                .into_iter()
                .map(|(strike, contracts)| {
                    let contracts = contracts
                        .unwrap_or_default()
                        .into_iter()
                        .map(Option::unwrap_or_default)
                        .collect();
                    (strike, contracts)
                })
                .collect();
            (expiration, strikes)
        })
        .collect())
}

// ============================================================================
// Query Enums
// ============================================================================

/// Contract type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    /// Calls only.
    Call,
    /// Puts only.
    Put,
    /// Calls and puts.
    All,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
            Self::All => write!(f, "ALL"),
        }
    }
}

/// Chain strategy requested from the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Plain single-leg chain.
    Single,
    /// Chain with caller-supplied volatility and pricing inputs.
    Analytical,
    /// Covered call/put.
    Covered,
    /// Vertical spread.
    Vertical,
    /// Calendar spread.
    Calendar,
    /// Strangle.
    Strangle,
    /// Straddle.
    Straddle,
    /// Butterfly.
    Butterfly,
    /// Condor.
    Condor,
    /// Diagonal spread.
    Diagonal,
    /// Collar.
    Collar,
    /// Roll.
    Roll,
}

/// Moneyness range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeRange {
    /// In the money.
    #[serde(rename = "ITM")]
    InTheMoney,
    /// Near the money.
    #[serde(rename = "NTM")]
    NearTheMoney,
    /// Out of the money.
    #[serde(rename = "OTM")]
    OutOfTheMoney,
    /// Strikes above market.
    #[serde(rename = "SAK")]
    StrikesAboveMarket,
    /// Strikes below market.
    #[serde(rename = "SBK")]
    StrikesBelowMarket,
    /// Strikes near market.
    #[serde(rename = "SNK")]
    StrikesNearMarket,
    /// Every strike.
    #[serde(rename = "ALL")]
    All,
}

/// Standard versus non-standard contract filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Standard contracts.
    #[serde(rename = "S")]
    Standard,
    /// Non-standard contracts.
    #[serde(rename = "NS")]
    NonStandard,
    /// Both.
    #[serde(rename = "ALL")]
    All,
}

// ============================================================================
// Query
// ============================================================================

/// Query parameters for the chains endpoint.
///
/// Values are passed through as given; nothing is validated or defaulted.
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainsQuery {
    /// Underlying symbol.
    pub symbol: String,
    /// Contract type filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    /// Number of strikes above and below the at-the-money price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_count: Option<u32>,
    /// Include an underlying quote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_quotes: Option<bool>,
    /// Chain strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Strike interval for spread strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    /// Single strike price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<f64>,
    /// Moneyness range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<StrikeRange>,
    /// Earliest expiration, as the broker formats dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Latest expiration, as the broker formats dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Volatility for analytical calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Underlying price for analytical calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<f64>,
    /// Interest rate for analytical calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    /// Days to expiration for analytical calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_expiration: Option<i64>,
    /// Expiration month, e.g. `JAN` or `ALL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    /// Standard/non-standard filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
}

impl ChainsQuery {
    /// Creates a query for `symbol` with every filter unset.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Sets the contract type filter.
    #[must_use]
    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// Sets the strike count.
    #[must_use]
    pub fn strike_count(mut self, count: u32) -> Self {
        self.strike_count = Some(count);
        self
    }

    /// Requests an underlying quote.
    #[must_use]
    pub fn include_quotes(mut self, include: bool) -> Self {
        self.include_quotes = Some(include);
        self
    }

    /// Sets the chain strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the moneyness range.
    #[must_use]
    pub fn range(mut self, range: StrikeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Restricts expirations to the given window.
    #[must_use]
    pub fn dates(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_date = Some(from.into());
        self.to_date = Some(to.into());
        self
    }
}

// ============================================================================
// Response
// ============================================================================

/// Quote snapshot of the underlying instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Underlying {
    /// Symbol.
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Net change.
    #[serde(deserialize_with = "null_as_default")]
    pub change: f64,
    /// Percent change.
    #[serde(deserialize_with = "null_as_default")]
    pub percent_change: f64,
    /// Previous close.
    #[serde(deserialize_with = "null_as_default")]
    pub close: f64,
    /// Quote time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub quote_time: i64,
    /// Trade time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub trade_time: i64,
    /// Bid price.
    #[serde(deserialize_with = "null_as_default")]
    pub bid: f64,
    /// Ask price.
    #[serde(deserialize_with = "null_as_default")]
    pub ask: f64,
    /// Last price.
    #[serde(deserialize_with = "null_as_default")]
    pub last: f64,
    /// Mark price.
    #[serde(deserialize_with = "null_as_default")]
    pub mark: f64,
    /// Mark change.
    #[serde(deserialize_with = "null_as_default")]
    pub mark_change: f64,
    /// Mark percent change.
    #[serde(deserialize_with = "null_as_default")]
    pub mark_percent_change: f64,
    /// Bid size.
    #[serde(deserialize_with = "null_as_default")]
    pub bid_size: i64,
    /// Ask size.
    #[serde(deserialize_with = "null_as_default")]
    pub ask_size: i64,
    /// Session high.
    #[serde(deserialize_with = "null_as_default")]
    pub high_price: f64,
    /// Session low.
    #[serde(deserialize_with = "null_as_default")]
    pub low_price: f64,
    /// Session open.
    #[serde(deserialize_with = "null_as_default")]
    pub open_price: f64,
    /// Total volume.
    #[serde(deserialize_with = "null_as_default")]
    pub total_volume: i64,
    /// Exchange name.
    #[serde(deserialize_with = "null_as_default")]
    pub exchange_name: String,
    /// 52-week high.
    #[serde(deserialize_with = "null_as_default")]
    pub fifty_two_week_high: f64,
    /// 52-week low.
    #[serde(deserialize_with = "null_as_default")]
    pub fifty_two_week_low: f64,
    /// Whether the quote is delayed.
    #[serde(deserialize_with = "null_as_default")]
    pub delayed: bool,
}

/// Quote and greeks of one contract at one expiration and strike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpDateOption {
    /// `CALL` or `PUT`.
    #[serde(deserialize_with = "null_as_default")]
    pub put_call: String,
    /// Contract symbol.
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Exchange name.
    #[serde(deserialize_with = "null_as_default")]
    pub exchange_name: String,
    /// Bid price.
    #[serde(deserialize_with = "null_as_default")]
    pub bid: f64,
    /// Ask price.
    #[serde(deserialize_with = "null_as_default")]
    pub ask: f64,
    /// Last price.
    #[serde(deserialize_with = "null_as_default")]
    pub last: f64,
    /// Mark price.
    #[serde(deserialize_with = "null_as_default")]
    pub mark: f64,
    /// Bid size.
    #[serde(deserialize_with = "null_as_default")]
    pub bid_size: i64,
    /// Ask size.
    #[serde(deserialize_with = "null_as_default")]
    pub ask_size: i64,
    /// Bid and ask size, as the broker formats it.
    #[serde(deserialize_with = "null_as_default")]
    pub bid_ask_size: String,
    /// Last trade size.
    #[serde(deserialize_with = "null_as_default")]
    pub last_size: f64,
    /// Session high.
    #[serde(deserialize_with = "null_as_default")]
    pub high_price: f64,
    /// Session low.
    #[serde(deserialize_with = "null_as_default")]
    pub low_price: f64,
    /// Session open.
    #[serde(deserialize_with = "null_as_default")]
    pub open_price: f64,
    /// Previous close.
    #[serde(deserialize_with = "null_as_default")]
    pub close_price: f64,
    /// Total volume.
    #[serde(deserialize_with = "null_as_default")]
    pub total_volume: i64,
    /// Trade date.
    #[serde(deserialize_with = "null_as_default")]
    pub trade_date: String,
    /// Trade time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub trade_time_in_long: i64,
    /// Quote time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub quote_time_in_long: i64,
    /// Net change.
    #[serde(deserialize_with = "null_as_default")]
    pub net_change: f64,
    /// Implied volatility.
    pub volatility: SpecialFloat,
    /// Delta.
    pub delta: SpecialFloat,
    /// Gamma.
    pub gamma: SpecialFloat,
    /// Theta.
    pub theta: SpecialFloat,
    /// Vega.
    pub vega: SpecialFloat,
    /// Rho.
    pub rho: SpecialFloat,
    /// Open interest.
    #[serde(deserialize_with = "null_as_default")]
    pub open_interest: i64,
    /// Time value.
    #[serde(deserialize_with = "null_as_default")]
    pub time_value: f64,
    /// Theoretical option value.
    pub theoretical_option_value: SpecialFloat,
    /// Theoretical volatility.
    pub theoretical_volatility: SpecialFloat,
    /// Deliverables, as the broker formats them.
    #[serde(deserialize_with = "null_as_default")]
    pub option_deliverables_list: String,
    /// Strike price.
    #[serde(deserialize_with = "null_as_default")]
    pub strike_price: f64,
    /// Expiration in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub expiration_date: i64,
    /// Days to expiration.
    #[serde(deserialize_with = "null_as_default")]
    pub days_to_expiration: i64,
    /// Expiration type.
    #[serde(deserialize_with = "null_as_default")]
    pub expiration_type: String,
    /// Last trading day in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub last_trading_day: i64,
    /// Contract multiplier.
    #[serde(deserialize_with = "null_as_default")]
    pub multiplier: f64,
    /// Settlement type.
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_type: String,
    /// Deliverable note.
    #[serde(deserialize_with = "null_as_default")]
    pub deliverable_note: String,
    /// Whether the underlying is an index.
    #[serde(deserialize_with = "null_as_default")]
    pub is_index_option: bool,
    /// Percent change.
    #[serde(deserialize_with = "null_as_default")]
    pub percent_change: f64,
    /// Mark change.
    #[serde(deserialize_with = "null_as_default")]
    pub mark_change: f64,
    /// Mark percent change.
    #[serde(deserialize_with = "null_as_default")]
    pub mark_percent_change: f64,
    /// Whether the contract is in the money.
    #[serde(deserialize_with = "null_as_default")]
    pub in_the_money: bool,
    /// Mini contract.
    #[serde(deserialize_with = "null_as_default")]
    pub mini: bool,
    /// Non-standard contract.
    #[serde(deserialize_with = "null_as_default")]
    pub non_standard: bool,
}

impl ExpDateOption {
    /// Returns `true` for call contracts.
    #[must_use]
    pub fn is_call(&self) -> bool {
        self.put_call.eq_ignore_ascii_case("CALL")
    }
}

/// Expiration date, then strike price, to the contracts listed there.
///
/// Keys are the broker's own strings and are never parsed.
pub type ExpDateMap = HashMap<String, HashMap<String, Vec<ExpDateOption>>>;

/// Option chain snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chains {
    /// Underlying symbol.
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Request status reported by the broker.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Underlying quote.
    #[serde(deserialize_with = "null_as_default")]
    pub underlying: Underlying,
    /// Strategy of the chain.
    #[serde(deserialize_with = "null_as_default")]
    pub strategy: String,
    /// Strike interval.
    #[serde(deserialize_with = "null_as_default")]
    pub interval: f64,
    /// Whether the data is delayed.
    #[serde(deserialize_with = "null_as_default")]
    pub is_delayed: bool,
    /// Whether the underlying is an index.
    #[serde(deserialize_with = "null_as_default")]
    pub is_index: bool,
    /// Interest rate used for greeks.
    #[serde(deserialize_with = "null_as_default")]
    pub interest_rate: f64,
    /// Underlying price used for greeks.
    #[serde(deserialize_with = "null_as_default")]
    pub underlying_price: f64,
    /// Volatility used for greeks.
    #[serde(deserialize_with = "null_as_default")]
    pub volatility: f64,
    /// Days to expiration used for greeks.
    #[serde(deserialize_with = "null_as_default")]
    pub days_to_expiration: f64,
    /// Number of contracts in the chain.
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_contracts: i64,
    /// Call contracts.
    #[serde(deserialize_with = "exp_date_map")]
    pub call_exp_date_map: ExpDateMap,
    /// Put contracts.
    #[serde(deserialize_with = "exp_date_map")]
    pub put_exp_date_map: ExpDateMap,
}

impl Chains {
    /// Returns the calls listed at `expiration` and `strike`.
    #[must_use]
    pub fn call(&self, expiration: &str, strike: &str) -> Option<&[ExpDateOption]> {
        lookup(&self.call_exp_date_map, expiration, strike)
    }

    /// Returns the puts listed at `expiration` and `strike`.
    #[must_use]
    pub fn put(&self, expiration: &str, strike: &str) -> Option<&[ExpDateOption]> {
        lookup(&self.put_exp_date_map, expiration, strike)
    }

    /// Returns every expiration key found in either map, sorted and deduplicated.
    #[must_use]
    pub fn expirations(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .call_exp_date_map
            .keys()
            .chain(self.put_exp_date_map.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Iterates over every contract in both maps.
    pub fn contracts(&self) -> impl Iterator<Item = &ExpDateOption> {
        self.call_exp_date_map
            .values()
            .chain(self.put_exp_date_map.values())
            .flat_map(HashMap::values)
            .flatten()
    }
}

fn lookup<'a>(map: &'a ExpDateMap, expiration: &str, strike: &str) -> Option<&'a [ExpDateOption]> {
    map.get(expiration)
        .and_then(|strikes| strikes.get(strike))
        .map(Vec::as_slice)
}
