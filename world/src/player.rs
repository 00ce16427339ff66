use farm_dash_core::RejectionReason;

/// Scalar resources owned by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    score: u32,
    coins: u32,
}

impl Player {
    /// Creates a fresh player holding `coins` and no score.
    #[must_use]
    pub const fn new(coins: u32) -> Self {
        Self { score: 0, coins }
    }

    /// Score accumulated this session. Never decreases.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Coins currently available for planting.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Deducts `cost` coins, leaving the balance untouched when it is too low.
    pub(crate) fn try_spend(&mut self, cost: u32) -> Result<(), RejectionReason> {
        match self.coins.checked_sub(cost) {
            Some(remaining) => {
                self.coins = remaining;
                Ok(())
            }
            None => Err(RejectionReason::InsufficientFunds {
                required: cost,
                available: self.coins,
            }),
        }
    }

    pub(crate) fn reward(&mut self, score: u32, coins: u32) {
        self.score = self.score.saturating_add(score);
        self.coins = self.coins.saturating_add(coins);
    }
}
