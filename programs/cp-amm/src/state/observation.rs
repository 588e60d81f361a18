// Observation State
//
// Fixed-capacity ring of timestamped reserve snapshots, written on every
// state-changing pool operation and read-only to price consumers.

use anchor_lang::prelude::*;

pub const OBSERVATION_NUM: usize = 100;

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Unix timestamp of the snapshot.
    pub block_timestamp: u64,
    /// Reserve of token 0 at time of write, excluding accrued fees.
    pub reserve_0: u64,
    /// Reserve of token 1 at time of write, excluding accrued fees.
    pub reserve_1: u64,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct ObservationState {
    pub initialized: bool,
    /// Slot holding the most recent snapshot.
    pub observation_index: u16,
    pub pool_id: Pubkey,
    pub observations: [Observation; OBSERVATION_NUM],
    pub padding: [u64; 4],
}

impl Default for ObservationState {
    fn default() -> Self {
        Self {
            initialized: false,
            observation_index: 0,
            pool_id: Pubkey::default(),
            observations: [Observation::default(); OBSERVATION_NUM],
            padding: [0u64; 4],
        }
    }
}

impl ObservationState {
    pub fn initialize(&mut self, pool_id: Pubkey) {
        *self = Self::default();
        self.pool_id = pool_id;
    }

    /// Record the pool's reserves. A second write within the same second
    /// overwrites the current slot so the ring holds distinct timestamps;
    /// otherwise the cursor advances and the oldest entry is overwritten.
    pub fn update(&mut self, block_timestamp: u64, reserve_0: u64, reserve_1: u64) {
        let observation = Observation {
            block_timestamp,
            reserve_0,
            reserve_1,
        };
        if !self.initialized {
            self.initialized = true;
            self.observations[self.observation_index as usize] = observation;
            return;
        }
        let last = self.observations[self.observation_index as usize];
        if last.block_timestamp == block_timestamp {
            self.observations[self.observation_index as usize] = observation;
            return;
        }
        let next_index = if self.observation_index as usize == OBSERVATION_NUM - 1 {
            0
        } else {
            self.observation_index + 1
        };
        self.observations[next_index as usize] = observation;
        self.observation_index = next_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_fills_slot_zero() {
        let mut state = ObservationState::default();
        state.update(100, 10, 20);
        assert!(state.initialized);
        assert_eq!(state.observation_index, 0);
        assert_eq!(
            state.observations[0],
            Observation {
                block_timestamp: 100,
                reserve_0: 10,
                reserve_1: 20
            }
        );
    }

    #[test]
    fn same_second_overwrites_current_slot() {
        let mut state = ObservationState::default();
        state.update(100, 10, 20);
        state.update(100, 11, 19);
        assert_eq!(state.observation_index, 0);
        assert_eq!(state.observations[0].reserve_0, 11);
        assert_eq!(state.observations[0].reserve_1, 19);
    }

    #[test]
    fn cursor_wraps_at_capacity() {
        let mut state = ObservationState::default();
        for i in 0..(OBSERVATION_NUM as u64 + 1) {
            state.update(100 + i, i, i);
        }
        // The ring wrapped: slot 0 now holds the newest snapshot.
        assert_eq!(state.observation_index, 0);
        assert_eq!(
            state.observations[0].block_timestamp,
            100 + OBSERVATION_NUM as u64
        );
        // The second-oldest surviving snapshot is in slot 1.
        assert_eq!(state.observations[1].block_timestamp, 101);
    }
}
