use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use hongbao_common::types::PrizeTier;

pub const CONFIG: Item<CampaignConfig> = Item::new("config");
pub const STATS: Item<CampaignStats> = Item::new("stats");

/// Keyed `(draw_date, participant name)`. Saving under this key after a
/// `has` check is the single enforcement point for one-draw-per-name-per-day;
/// contract execution is serialized, so no two draws can race past it.
pub const DRAWS: Map<(&str, &str), DrawRecord> = Map::new("draws");

/// Per-day aggregates, updated on every draw.
pub const DAY_TOTALS: Map<&str, DayTotals> = Map::new("day_totals");

/// Times each tier was won per day, keyed `(draw_date, tier name)`.
pub const TIER_USED: Map<(&str, &str), u32> = Map::new("tier_used");

/// Cumulative leaderboard data, keyed by participant name.
pub const PARTICIPANT_TOTALS: Map<&str, ParticipantTotal> = Map::new("participant_totals");

#[cw_serde]
pub struct CampaignConfig {
    pub title: String,
    /// Max draws per day.
    pub total_participants: u32,
    /// Total payable per day (continuous mode only).
    pub daily_budget: Uint128,
    /// Per-draw bounds; ignored when tiers are configured.
    pub min_amount: Uint128,
    pub max_amount: Uint128,
    /// Empty means continuous mode.
    pub prize_tiers: Vec<PrizeTier>,
    /// Inclusive campaign window, canonical YYYY-MM-DD.
    pub start_date: String,
    pub end_date: String,
    /// Campaign-local timezone as a fixed offset from UTC.
    pub utc_offset_seconds: i32,
}

impl CampaignConfig {
    pub fn tiered(&self) -> bool {
        !self.prize_tiers.is_empty()
    }
}

#[cw_serde]
pub struct CampaignStats {
    pub total_draws: u64,
    pub total_distributed: Uint128,
}

/// One participant's draw for one day. Never mutated after creation.
#[cw_serde]
pub struct DrawRecord {
    pub name: String,
    pub amount: Uint128,
    pub draw_date: String,
    /// Present iff the campaign uses tiers.
    pub tier_name: Option<String>,
    /// Display ordering only; allocation never reads this.
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct DayTotals {
    pub count: u32,
    pub spent: Uint128,
}

#[cw_serde]
pub struct ParticipantTotal {
    pub total_won: Uint128,
    pub draw_count: u32,
}
