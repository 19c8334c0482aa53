use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Order, Response, Uint128};
use hongbao_common::allocate::{self, AllocError, AllocationParams};
use hongbao_common::date;

use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::rng::BlockEntropy;
use crate::state::{
    DayTotals, DrawRecord, ParticipantTotal, CONFIG, DAY_TOTALS, DRAWS, PARTICIPANT_TOTALS, STATS,
    TIER_USED,
};

/// Longest allowed campaign window; bounds the Schedule query.
pub const MAX_CAMPAIGN_DAYS: i64 = 366;
/// Widest real-world UTC offset.
pub const MAX_UTC_OFFSET_SECONDS: i32 = 14 * 3600;

fn invalid(reason: &str) -> ContractError {
    ContractError::InvalidCampaign {
        reason: reason.to_string(),
    }
}

/// Validate campaign parameters at instantiation. Continuous-mode bounds
/// must be able to both reach and stay under the daily budget, otherwise
/// some day would be impossible to pay out exactly.
pub fn validate_campaign(msg: &InstantiateMsg) -> Result<(), ContractError> {
    if msg.total_participants < 1 {
        return Err(invalid("total_participants must be at least 1"));
    }
    if msg.daily_budget.is_zero() {
        return Err(invalid("daily_budget must be positive"));
    }
    if msg.utc_offset_seconds.abs() > MAX_UTC_OFFSET_SECONDS {
        return Err(invalid("utc_offset_seconds is not a real-world offset"));
    }

    let start = date::parse_date(&msg.start_date)?;
    let end = date::parse_date(&msg.end_date)?;
    if start > end {
        return Err(invalid("start_date must not be after end_date"));
    }
    if end - start + 1 > MAX_CAMPAIGN_DAYS {
        return Err(invalid("campaign window is longer than 366 days"));
    }

    if msg.prize_tiers.is_empty() {
        if msg.min_amount.is_zero() {
            return Err(invalid("min_amount must be positive"));
        }
        if msg.min_amount > msg.max_amount {
            return Err(invalid("min_amount must not exceed max_amount"));
        }
        let people = Uint128::from(msg.total_participants);
        let floor = msg
            .min_amount
            .checked_mul(people)
            .map_err(|_| invalid("min_amount times participants overflows"))?;
        let ceiling = msg
            .max_amount
            .checked_mul(people)
            .map_err(|_| invalid("max_amount times participants overflows"))?;
        if floor > msg.daily_budget {
            return Err(invalid(
                "min_amount times participants exceeds the daily budget",
            ));
        }
        if ceiling < msg.daily_budget {
            return Err(invalid(
                "max_amount times participants cannot reach the daily budget",
            ));
        }
    } else {
        let mut seen: Vec<&str> = Vec::new();
        for tier in &msg.prize_tiers {
            if tier.name.trim().is_empty() {
                return Err(invalid("tier names must not be empty"));
            }
            if seen.contains(&tier.name.as_str()) {
                return Err(invalid("tier names must be unique"));
            }
            seen.push(&tier.name);
            if tier.amount.is_zero() {
                return Err(invalid("tier amounts must be positive"));
            }
            if tier.quota < 1 {
                return Err(invalid("tier quotas must be at least 1"));
            }
        }
    }

    Ok(())
}

/// Record one draw: validate eligibility, run exactly one allocator,
/// persist the immutable record and bump aggregates.
pub fn draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    draw_date: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ContractError::EmptyName);
    }

    let today_day = date::local_day(env.block.time.seconds() as i64, config.utc_offset_seconds);
    let today = date::format_date(today_day);
    let draw_date = draw_date.unwrap_or_else(|| today.clone());
    let draw_day = date::parse_date(&draw_date)?;

    if draw_day < date::parse_date(&config.start_date)? || draw_day > date::parse_date(&config.end_date)? {
        return Err(ContractError::DateOutOfRange {
            date: draw_date,
            start: config.start_date,
            end: config.end_date,
        });
    }
    if draw_day > today_day {
        return Err(ContractError::FutureDraw {
            date: draw_date,
            today,
        });
    }

    if DRAWS.has(deps.storage, (&draw_date, &name)) {
        return Err(ContractError::AlreadyDrawn {
            name,
            date: draw_date,
        });
    }

    let mut totals = DAY_TOTALS
        .may_load(deps.storage, &draw_date)?
        .unwrap_or(DayTotals {
            count: 0,
            spent: Uint128::zero(),
        });
    if totals.count >= config.total_participants {
        return Err(ContractError::CapacityExhausted {
            date: draw_date,
            total: config.total_participants,
        });
    }

    let mut rng = BlockEntropy::new(&env, &info.sender, &name, &draw_date, totals.count);

    let (amount, tier_name) = if config.tiered() {
        let prior: Vec<String> = DRAWS
            .prefix(&draw_date)
            .range(deps.storage, None, None, Order::Ascending)
            .filter_map(|r| r.ok())
            .filter_map(|(_, record)| record.tier_name)
            .collect();
        let award = allocate::allocate_tier(&config.prize_tiers, &prior, &mut rng)
            .map_err(|_| ContractError::TiersExhausted {
                date: draw_date.clone(),
            })?;
        (award.amount, Some(award.tier_name))
    } else {
        let prior: Vec<u128> = DRAWS
            .prefix(&draw_date)
            .range(deps.storage, None, None, Order::Ascending)
            .filter_map(|r| r.ok())
            .map(|(_, record)| record.amount.u128())
            .collect();
        let params = AllocationParams {
            min_amount: config.min_amount.u128(),
            max_amount: config.max_amount.u128(),
            daily_budget: config.daily_budget.u128(),
            total_participants: config.total_participants,
        };
        let amount = allocate::allocate_amount(&params, &prior, &mut rng).map_err(|err| match err {
            AllocError::BudgetOverrun { spent, budget } => ContractError::BudgetInvariantBroken {
                date: draw_date.clone(),
                spent: Uint128::from(spent),
                budget: Uint128::from(budget),
            },
            AllocError::NoSlots => ContractError::CapacityExhausted {
                date: draw_date.clone(),
                total: config.total_participants,
            },
            AllocError::TiersExhausted => ContractError::TiersExhausted {
                date: draw_date.clone(),
            },
        })?;
        (Uint128::from(amount), None)
    };

    let record = DrawRecord {
        name: name.clone(),
        amount,
        draw_date: draw_date.clone(),
        tier_name: tier_name.clone(),
        created_at: env.block.time,
    };
    DRAWS.save(deps.storage, (&draw_date, &name), &record)?;

    totals.count += 1;
    totals.spent += amount;
    DAY_TOTALS.save(deps.storage, &draw_date, &totals)?;

    if let Some(tier) = &tier_name {
        let used = TIER_USED
            .may_load(deps.storage, (&draw_date, tier))?
            .unwrap_or(0);
        TIER_USED.save(deps.storage, (&draw_date, tier), &(used + 1))?;
    }

    let mut participant = PARTICIPANT_TOTALS
        .may_load(deps.storage, &name)?
        .unwrap_or(ParticipantTotal {
            total_won: Uint128::zero(),
            draw_count: 0,
        });
    participant.total_won += amount;
    participant.draw_count += 1;
    PARTICIPANT_TOTALS.save(deps.storage, &name, &participant)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_draws += 1;
    stats.total_distributed += amount;
    STATS.save(deps.storage, &stats)?;

    let remaining_slots = config.total_participants - totals.count;
    // Tiered payouts don't consult the budget, so this can floor at zero.
    let left_budget = config.daily_budget.saturating_sub(totals.spent);

    let mut event = Event::new("hongbao_draw")
        .add_attribute("name", name.clone())
        .add_attribute("draw_date", draw_date)
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining_slots", remaining_slots.to_string())
        .add_attribute("left_budget", left_budget.to_string());
    if let Some(tier) = &tier_name {
        event = event.add_attribute("tier", tier.clone());
    }

    Ok(Response::new()
        .add_attribute("action", "draw")
        .add_attribute("name", name)
        .add_attribute("amount", amount.to_string())
        .add_event(event))
}
