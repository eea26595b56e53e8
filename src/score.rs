use log::info;

const POINTS_PER_FOOD: u32 = 3;

/// Running score for one round plus the best score seen this session.
///
/// The multiplier steps up with the number of foods eaten: x2 from the 10th,
/// x3 from the 20th.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    food_count: u32,
    multiplier: u32,
    best_score: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        ScoreBoard {
            score: 0,
            food_count: 0,
            multiplier: 1,
            best_score: 0,
        }
    }
}

impl ScoreBoard {
    pub fn new(best_score: u32) -> Self {
        ScoreBoard {
            best_score,
            ..Default::default()
        }
    }

    /// Counts one food. Returns true when the multiplier changed.
    pub fn add_food(&mut self) -> bool {
        self.food_count += 1;

        let old_multiplier = self.multiplier;
        self.multiplier = match self.food_count {
            20.. => 3,
            10.. => 2,
            _ => 1,
        };
        self.score += POINTS_PER_FOOD * self.multiplier;

        self.multiplier != old_multiplier
    }

    /// Closes the round. Returns true on a new best score.
    pub fn finish_round(&mut self) -> bool {
        if self.score > self.best_score {
            info!("New best score {} (was {})", self.score, self.best_score);
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = ScoreBoard::new(self.best_score);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food_count(&self) -> u32 {
        self.food_count
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }
}
