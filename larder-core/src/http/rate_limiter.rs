//! Request pacing and daily budget for the recipe API.

use chrono::{NaiveDate, Utc};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::error::FetchError;

/// Spaces requests apart and refuses them once the day's budget is spent.
pub struct RateLimiter {
    /// Minimum delay between consecutive requests.
    min_delay: Duration,
    /// Requests allowed per UTC day. None means unlimited.
    daily_budget: Option<u32>,
    state: Mutex<LimiterState>,
}

struct LimiterState {
    last_request: Option<Instant>,
    day: NaiveDate,
    used: u32,
}

impl RateLimiter {
    pub fn new(min_delay: Duration, daily_budget: Option<u32>) -> Self {
        Self {
            min_delay,
            daily_budget,
            state: Mutex::new(LimiterState {
                last_request: None,
                day: Utc::now().date_naive(),
                used: 0,
            }),
        }
    }

    /// Wait for our turn, then count the request against today's budget.
    pub async fn acquire(&self) -> Result<(), FetchError> {
        let mut state = self.state.lock().await;

        let today = Utc::now().date_naive();
        if state.day != today {
            state.day = today;
            state.used = 0;
        }

        if let Some(budget) = self.daily_budget {
            if state.used >= budget {
                tracing::warn!(budget, "daily request budget exhausted");
                return Err(FetchError::BudgetExhausted(budget));
            }
        }

        if let Some(last) = state.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                sleep(self.min_delay - elapsed).await;
            }
        }

        state.last_request = Some(Instant::now());
        state.used += 1;
        Ok(())
    }

    /// Requests counted so far today.
    pub async fn used_today(&self) -> u32 {
        self.state.lock().await.used
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Some(150))
    }
}
