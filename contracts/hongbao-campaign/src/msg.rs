use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use hongbao_common::types::PrizeTier;

use crate::state::{CampaignConfig, CampaignStats, DrawRecord};

#[cw_serde]
pub struct InstantiateMsg {
    pub title: String,
    /// Max draws allowed per day.
    pub total_participants: u32,
    /// Total payable per day, whole currency units.
    pub daily_budget: Uint128,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
    /// Empty for continuous mode; non-empty switches the campaign to
    /// tiered mode entirely.
    pub prize_tiers: Vec<PrizeTier>,
    /// Inclusive window, canonical YYYY-MM-DD.
    pub start_date: String,
    pub end_date: String,
    /// Campaign-local timezone as a fixed offset from UTC.
    pub utc_offset_seconds: i32,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Draw today's envelope, or catch up on a missed past day when
    /// `draw_date` is given.
    Draw {
        name: String,
        draw_date: Option<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CampaignConfig)]
    Config {},
    /// Every calendar day in the campaign window, in order.
    #[returns(ScheduleResponse)]
    Schedule {},
    /// Draws recorded for one day, paginated by participant name.
    #[returns(DrawsResponse)]
    Draws {
        date: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Option<DrawRecord>)]
    Draw { date: String, name: String },
    /// Slots, budget and tier usage for one day.
    #[returns(DayStatusResponse)]
    DayStatus { date: String },
    #[returns(ParticipantTotalResponse)]
    ParticipantTotal { name: String },
    /// Cumulative per-participant totals, paginated by name.
    #[returns(TotalsResponse)]
    Totals {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(CampaignStats)]
    Stats {},
}

#[cw_serde]
pub struct ScheduleResponse {
    pub days: Vec<String>,
}

#[cw_serde]
pub struct DrawsResponse {
    pub draws: Vec<DrawRecord>,
}

#[cw_serde]
pub struct TierUsage {
    pub name: String,
    pub amount: Uint128,
    pub quota: u32,
    pub used: u32,
}

#[cw_serde]
pub struct DayStatusResponse {
    pub date: String,
    pub drawn: u32,
    pub remaining_slots: u32,
    pub spent: Uint128,
    pub left_budget: Uint128,
    /// Empty in continuous mode.
    pub tiers: Vec<TierUsage>,
}

#[cw_serde]
pub struct ParticipantTotalResponse {
    pub name: String,
    pub total_won: Uint128,
    pub draw_count: u32,
}

#[cw_serde]
pub struct TotalsResponse {
    pub totals: Vec<ParticipantTotalResponse>,
}
