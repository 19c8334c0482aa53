use cosmwasm_std::{Addr, Env};
use hongbao_common::allocate::RandomSource;
use sha2::{Digest, Sha256};

/// Hash-chain entropy folded from block data and the draw context.
///
/// This is not a security boundary: amounts only need to be unpredictable
/// enough that a participant cannot compute their payout before drawing.
/// Seeding with the participant name and the day's draw count keeps two
/// draws in the same block from sharing a stream.
pub struct BlockEntropy {
    state: [u8; 32],
    counter: u64,
}

impl BlockEntropy {
    pub fn new(env: &Env, sender: &Addr, name: &str, draw_date: &str, prior_count: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(env.block.height.to_be_bytes());
        hasher.update(env.block.time.nanos().to_be_bytes());
        hasher.update(env.block.chain_id.as_bytes());
        if let Some(tx) = &env.transaction {
            hasher.update(tx.index.to_be_bytes());
        }
        hasher.update(sender.as_bytes());
        hasher.update(name.as_bytes());
        hasher.update(draw_date.as_bytes());
        hasher.update(prior_count.to_be_bytes());
        Self {
            state: hasher.finalize().into(),
            counter: 0,
        }
    }
}

impl RandomSource for BlockEntropy {
    fn next_u128(&mut self) -> u128 {
        let mut hasher = Sha256::new();
        hasher.update(self.state);
        hasher.update(self.counter.to_be_bytes());
        self.counter += 1;
        self.state = hasher.finalize().into();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.state[0..16]);
        u128::from_be_bytes(bytes)
    }
}
