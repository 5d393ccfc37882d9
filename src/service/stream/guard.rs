use dashmap::DashSet;
use std::sync::Arc;

/// Marks a guild as in flight for as long as the guard lives.
pub struct InFlightGuard {
    set: Arc<DashSet<String>>,
    guild_id: String,
}

impl InFlightGuard {
    /// Returns `None` when the guild is already in flight.
    pub fn acquire(set: &Arc<DashSet<String>>, guild_id: &str) -> Option<Self> {
        if !set.insert(guild_id.to_string()) {
            return None;
        }

        Some(Self {
            set: set.clone(),
            guild_id: guild_id.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.remove(&self.guild_id);
    }
}
