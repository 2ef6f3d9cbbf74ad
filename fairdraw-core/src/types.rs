use crate::algorithms::{
    BingoConfig, BingoResult, NamesConfig, NamesResult, NumbersConfig, NumbersResult,
    OrderConfig, OrderResult, TeamsConfig, TeamsResult,
};
use crate::error::{DrawError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Free-form caller keys carried alongside an algorithm's inputs.
pub type Metadata = serde_json::Map<String, Value>;

/// Version tag of the draw algorithms, embedded as `"{type}-v1.0"`.
pub const ALGORITHM_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawKind {
    Names,
    Numbers,
    Teams,
    Order,
    Bingo,
}

impl DrawKind {
    pub const ALL: [DrawKind; 5] = [
        DrawKind::Names,
        DrawKind::Numbers,
        DrawKind::Teams,
        DrawKind::Order,
        DrawKind::Bingo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DrawKind::Names => "names",
            DrawKind::Numbers => "numbers",
            DrawKind::Teams => "teams",
            DrawKind::Order => "order",
            DrawKind::Bingo => "bingo",
        }
    }

    pub fn algorithm_id(self) -> String {
        format!("{}-v{}", self.as_str(), ALGORITHM_VERSION)
    }

    /// Config keys consumed by the algorithm itself
    pub fn input_keys(self) -> &'static [&'static str] {
        match self {
            DrawKind::Names => &["items", "count"],
            DrawKind::Numbers => &["min", "max", "count", "allowRepeats"],
            DrawKind::Teams => &["players", "teamCount", "balanceTeams"],
            DrawKind::Order => &["items"],
            DrawKind::Bingo => &["type", "count"],
        }
    }
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        DrawKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DrawError::unsupported_type(s))
    }
}

/// Algorithm input, one variant per draw kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawConfig {
    Names(NamesConfig),
    Numbers(NumbersConfig),
    Teams(TeamsConfig),
    Order(OrderConfig),
    Bingo(BingoConfig),
}

impl DrawConfig {
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawConfig::Names(_) => DrawKind::Names,
            DrawConfig::Numbers(_) => DrawKind::Numbers,
            DrawConfig::Teams(_) => DrawKind::Teams,
            DrawConfig::Order(_) => DrawKind::Order,
            DrawConfig::Bingo(_) => DrawKind::Bingo,
        }
    }

    /// Parse an untyped JSON config for `kind`.
    pub fn from_value(kind: DrawKind, value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(DrawError::invalid_input(format!(
                "{} config must be a JSON object",
                kind
            )));
        }

        let parsed = match kind {
            DrawKind::Names => serde_json::from_value(value).map(DrawConfig::Names),
            DrawKind::Numbers => serde_json::from_value(value).map(DrawConfig::Numbers),
            DrawKind::Teams => serde_json::from_value(value).map(DrawConfig::Teams),
            DrawKind::Order => serde_json::from_value(value).map(DrawConfig::Order),
            DrawKind::Bingo => serde_json::from_value(value).map(DrawConfig::Bingo),
        };

        parsed.map_err(|e| DrawError::invalid_input(format!("invalid {} config: {}", kind, e)))
    }

    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            DrawConfig::Names(c) => serde_json::to_value(c)?,
            DrawConfig::Numbers(c) => serde_json::to_value(c)?,
            DrawConfig::Teams(c) => serde_json::to_value(c)?,
            DrawConfig::Order(c) => serde_json::to_value(c)?,
            DrawConfig::Bingo(c) => serde_json::to_value(c)?,
        };
        Ok(value)
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            DrawConfig::Names(c) => &c.metadata,
            DrawConfig::Numbers(c) => &c.metadata,
            DrawConfig::Teams(c) => &c.metadata,
            DrawConfig::Order(c) => &c.metadata,
            DrawConfig::Bingo(c) => &c.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        match self {
            DrawConfig::Names(c) => &mut c.metadata,
            DrawConfig::Numbers(c) => &mut c.metadata,
            DrawConfig::Teams(c) => &mut c.metadata,
            DrawConfig::Order(c) => &mut c.metadata,
            DrawConfig::Bingo(c) => &mut c.metadata,
        }
    }

    /// Check the algorithm's preconditions. Draws nothing.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        if let Some(key) = self
            .metadata()
            .keys()
            .find(|key| kind.input_keys().contains(&key.as_str()))
        {
            return Err(DrawError::invalid_input(format!(
                "metadata key '{}' shadows a {} input",
                key, kind
            )));
        }

        match self {
            DrawConfig::Names(c) => c.validate(),
            DrawConfig::Numbers(c) => c.validate(),
            DrawConfig::Teams(c) => c.validate(),
            DrawConfig::Order(c) => c.validate(),
            DrawConfig::Bingo(c) => c.validate(),
        }
    }
}

impl From<NamesConfig> for DrawConfig {
    fn from(config: NamesConfig) -> Self {
        DrawConfig::Names(config)
    }
}

impl From<NumbersConfig> for DrawConfig {
    fn from(config: NumbersConfig) -> Self {
        DrawConfig::Numbers(config)
    }
}

impl From<TeamsConfig> for DrawConfig {
    fn from(config: TeamsConfig) -> Self {
        DrawConfig::Teams(config)
    }
}

impl From<OrderConfig> for DrawConfig {
    fn from(config: OrderConfig) -> Self {
        DrawConfig::Order(config)
    }
}

impl From<BingoConfig> for DrawConfig {
    fn from(config: BingoConfig) -> Self {
        DrawConfig::Bingo(config)
    }
}

/// Algorithm output, one variant per draw kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawResult {
    Names(NamesResult),
    Numbers(NumbersResult),
    Teams(TeamsResult),
    Order(OrderResult),
    Bingo(BingoResult),
}

impl DrawResult {
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawResult::Names(_) => DrawKind::Names,
            DrawResult::Numbers(_) => DrawKind::Numbers,
            DrawResult::Teams(_) => DrawKind::Teams,
            DrawResult::Order(_) => DrawKind::Order,
            DrawResult::Bingo(_) => DrawKind::Bingo,
        }
    }

    pub fn from_value(kind: DrawKind, value: Value) -> Result<Self> {
        let parsed = match kind {
            DrawKind::Names => serde_json::from_value(value).map(DrawResult::Names),
            DrawKind::Numbers => serde_json::from_value(value).map(DrawResult::Numbers),
            DrawKind::Teams => serde_json::from_value(value).map(DrawResult::Teams),
            DrawKind::Order => serde_json::from_value(value).map(DrawResult::Order),
            DrawKind::Bingo => serde_json::from_value(value).map(DrawResult::Bingo),
        };

        parsed.map_err(|e| DrawError::malformed(format!("invalid {} result: {}", kind, e)))
    }

    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            DrawResult::Names(r) => serde_json::to_value(r)?,
            DrawResult::Numbers(r) => serde_json::to_value(r)?,
            DrawResult::Teams(r) => serde_json::to_value(r)?,
            DrawResult::Order(r) => serde_json::to_value(r)?,
            DrawResult::Bingo(r) => serde_json::to_value(r)?,
        };
        Ok(value)
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        fn join<T: ToString>(items: impl IntoIterator<Item = T>, sep: &str) -> String {
            items
                .into_iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(sep)
        }

        match self {
            DrawResult::Names(r) => join(&r.winners, ", "),
            DrawResult::Numbers(r) => join(&r.numbers, ", "),
            DrawResult::Teams(r) => join(
                r.teams
                    .iter()
                    .map(|t| format!("{}: {}", t.name, t.players.join(", "))),
                " | ",
            ),
            DrawResult::Order(r) => join(
                r.order.iter().map(|p| format!("{}. {}", p.position, p.item)),
                ", ",
            ),
            DrawResult::Bingo(r) => join(&r.calls, ", "),
        }
    }
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
