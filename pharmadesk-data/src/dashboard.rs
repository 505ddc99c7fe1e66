//! Read-only statistics served by the financial reports endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Comparison window for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "7d")]
    #[default]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl Timeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Timeframe::Week),
            "30d" => Ok(Timeframe::Month),
            other => Err(format!("unknown timeframe '{other}', expected 7d or 30d")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub sales: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Current period against the previous one; `variations` are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardComparison {
    pub timeframe: Timeframe,
    pub current: Totals,
    pub previous: Totals,
    pub variations: Totals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentStats {
    pub pending_delivery: u64,
    pub shipped_but_not_delivered: u64,
    pub pending_payment: u64,
    pub expiring_soon: u64,
}

impl FulfillmentStats {
    /// Sum of every open item, for the badge on the dashboard.
    pub fn outstanding(&self) -> u64 {
        self.pending_delivery
            .saturating_add(self.shipped_but_not_delivered)
            .saturating_add(self.pending_payment)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: EntityId,
    pub name: String,
    pub total_sold: f64,
    pub total_revenue: f64,
    pub sale_price: f64,
}
