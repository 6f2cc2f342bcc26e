// Incremental building blocks used by the indicator calculators.
//
// Each accumulator lives for one calculator call over one series. History is
// kept in an append-only Vec so that the value leaving a window is found by
// position.
use shared::utils::precision::round4;

/// Rolling sum of the last `period` values.
#[derive(Debug, Clone)]
pub struct SumWindow {
    period: usize,
    history: Vec<f64>,
    sum: f64,
}

impl SumWindow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            history: Vec::new(),
            sum: 0.0,
        }
    }

    /// Adds `value` and returns the window sum once `period` values were seen.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.sum += value;
        self.history.push(value);

        let len = self.history.len();
        if len > self.period {
            self.sum -= self.history[len - 1 - self.period];
        }
        if len >= self.period {
            Some(self.sum)
        } else {
            None
        }
    }
}

/// Exponential moving average seeded with the simple average of the first
/// `period` values. Every step is rounded to 4 digits and the rounded value
/// feeds the next step.
#[derive(Debug, Clone)]
pub struct EmaAccumulator {
    period: usize,
    multiplier: f64,
    seen: usize,
    seed_sum: f64,
    previous: Option<f64>,
}

impl EmaAccumulator {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            multiplier: 2.0 / (1.0 + period as f64),
            seen: 0,
            seed_sum: 0.0,
            previous: None,
        }
    }

    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.seen += 1;

        let ema = match self.previous {
            Some(previous) => {
                round4(value * self.multiplier + previous * (1.0 - self.multiplier))
            }
            None => {
                self.seed_sum += value;
                if self.seen < self.period {
                    return None;
                }
                round4(self.seed_sum / self.period as f64)
            }
        };

        self.previous = Some(ema);
        Some(ema)
    }
}

/// `value[i] - value[i - lag]` over the pushed values.
#[derive(Debug, Clone)]
pub struct LaggedDifference {
    lag: usize,
    history: Vec<f64>,
}

impl LaggedDifference {
    pub fn new(lag: usize) -> Self {
        Self {
            lag,
            history: Vec::new(),
        }
    }

    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.history.push(value);
        let i = self.history.len() - 1;
        if i >= self.lag {
            Some(value - self.history[i - self.lag])
        } else {
            None
        }
    }
}
