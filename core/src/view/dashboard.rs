//! Landing-page counters.

use tracing::warn;

use crate::context::Context;
use crate::transport::Transport;
use crate::types::Stats;
use crate::view::LoadState;

/// Patient and intervention counters. Zero until the first successful load.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: LoadState,
    stats: Stats,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            stats: Stats::default(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reload<T: Transport>(&mut self, ctx: &Context<'_, T>) -> bool {
        self.state = LoadState::Loading;
        match ctx.api.fetch_stats() {
            Ok(stats) => {
                self.stats = stats;
                self.state = LoadState::Ready;
                true
            }
            Err(err) => {
                warn!(error = %err, "stats reload failed");
                ctx.error("Failed to load statistics");
                self.state = LoadState::Error;
                false
            }
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
