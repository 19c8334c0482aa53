use cosmwasm_std::{StdError, Uint128};
use hongbao_common::date::DateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("invalid campaign: {reason}")]
    InvalidCampaign { reason: String },

    #[error("participant name must not be empty")]
    EmptyName,

    #[error("invalid calendar date: {input}")]
    InvalidDate { input: String },

    #[error("{date} is outside the campaign window [{start}, {end}]")]
    DateOutOfRange {
        date: String,
        start: String,
        end: String,
    },

    #[error("cannot draw for future date {date} (today is {today})")]
    FutureDraw { date: String, today: String },

    #[error("{name} already drew on {date}")]
    AlreadyDrawn { name: String, date: String },

    #[error("all {total} envelopes for {date} are gone")]
    CapacityExhausted { date: String, total: u32 },

    #[error("every prize tier is at quota for {date}")]
    TiersExhausted { date: String },

    #[error("day {date} has {spent} recorded against a budget of {budget}")]
    BudgetInvariantBroken {
        date: String,
        spent: Uint128,
        budget: Uint128,
    },
}

impl From<DateError> for ContractError {
    fn from(err: DateError) -> Self {
        match err {
            DateError::Invalid { input } => ContractError::InvalidDate { input },
        }
    }
}
