use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// A fixed named prize level with a daily quota.
/// When a campaign configures tiers, they replace the continuous
/// budget-splitting algorithm entirely.
#[cw_serde]
pub struct PrizeTier {
    /// Unique within the campaign.
    pub name: String,
    /// Fixed payout for this tier, in whole currency units.
    pub amount: Uint128,
    /// How many times this tier may be won per day.
    pub quota: u32,
}

/// The outcome of a tiered draw.
#[cw_serde]
pub struct TierAward {
    pub tier_name: String,
    pub amount: Uint128,
}
