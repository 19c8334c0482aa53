use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;
use hongbao_common::date;

use crate::msg::{
    DayStatusResponse, DrawsResponse, ParticipantTotalResponse, ScheduleResponse, TierUsage,
    TotalsResponse,
};
use crate::state::{CONFIG, DAY_TOTALS, DRAWS, PARTICIPANT_TOTALS, STATS, TIER_USED};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_schedule(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let days = date::date_range(&config.start_date, &config.end_date)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    to_json_binary(&ScheduleResponse { days })
}

pub fn query_draws(
    deps: Deps,
    date: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let draws: Vec<_> = DRAWS
        .prefix(&date)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, record)| record)
        .collect();

    to_json_binary(&DrawsResponse { draws })
}

pub fn query_draw(deps: Deps, date: String, name: String) -> StdResult<Binary> {
    let record = DRAWS.may_load(deps.storage, (&date, name.trim()))?;
    to_json_binary(&record)
}

pub fn query_day_status(deps: Deps, date: String) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let totals = DAY_TOTALS.may_load(deps.storage, &date)?;
    let (drawn, spent) = totals
        .map(|t| (t.count, t.spent))
        .unwrap_or((0, Uint128::zero()));

    let mut tiers = Vec::with_capacity(config.prize_tiers.len());
    for tier in &config.prize_tiers {
        let used = TIER_USED
            .may_load(deps.storage, (&date, &tier.name))?
            .unwrap_or(0);
        tiers.push(TierUsage {
            name: tier.name.clone(),
            amount: tier.amount,
            quota: tier.quota,
            used,
        });
    }

    to_json_binary(&DayStatusResponse {
        date,
        drawn,
        remaining_slots: config.total_participants.saturating_sub(drawn),
        spent,
        left_budget: config.daily_budget.saturating_sub(spent),
        tiers,
    })
}

pub fn query_participant_total(deps: Deps, name: String) -> StdResult<Binary> {
    let name = name.trim().to_string();
    let total = PARTICIPANT_TOTALS.may_load(deps.storage, &name)?;
    let (total_won, draw_count) = total
        .map(|t| (t.total_won, t.draw_count))
        .unwrap_or((Uint128::zero(), 0));
    to_json_binary(&ParticipantTotalResponse {
        name,
        total_won,
        draw_count,
    })
}

pub fn query_totals(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let totals: Vec<_> = PARTICIPANT_TOTALS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(name, t)| ParticipantTotalResponse {
            name,
            total_won: t.total_won,
            draw_count: t.draw_count,
        })
        .collect();

    to_json_binary(&TotalsResponse { totals })
}

pub fn query_stats(deps: Deps) -> StdResult<Binary> {
    let stats = STATS.load(deps.storage)?;
    to_json_binary(&stats)
}
