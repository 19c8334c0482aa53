use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{CampaignConfig, CampaignStats, CONFIG, STATS};

const CONTRACT_NAME: &str = "crates.io:hongbao-campaign";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_campaign(&msg)?;

    let config = CampaignConfig {
        title: msg.title,
        total_participants: msg.total_participants,
        daily_budget: msg.daily_budget,
        min_amount: msg.min_amount,
        max_amount: msg.max_amount,
        prize_tiers: msg.prize_tiers,
        start_date: msg.start_date,
        end_date: msg.end_date,
        utc_offset_seconds: msg.utc_offset_seconds,
    };
    CONFIG.save(deps.storage, &config)?;

    STATS.save(
        deps.storage,
        &CampaignStats {
            total_draws: 0,
            total_distributed: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "hongbao-campaign")
        .add_attribute("title", config.title)
        .add_attribute(
            "mode",
            if config.prize_tiers.is_empty() {
                "continuous"
            } else {
                "tiered"
            },
        ))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Draw { name, draw_date } => execute::draw(deps, env, info, name, draw_date),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Schedule {} => query::query_schedule(deps),
        QueryMsg::Draws {
            date,
            start_after,
            limit,
        } => query::query_draws(deps, date, start_after, limit),
        QueryMsg::Draw { date, name } => query::query_draw(deps, date, name),
        QueryMsg::DayStatus { date } => query::query_day_status(deps, date),
        QueryMsg::ParticipantTotal { name } => query::query_participant_total(deps, name),
        QueryMsg::Totals { start_after, limit } => query::query_totals(deps, start_after, limit),
        QueryMsg::Stats {} => query::query_stats(deps),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidCampaign {
            reason: "cannot migrate from a different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
