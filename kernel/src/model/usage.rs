/// Point-in-time counts published as gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub active_students: i64,
    pub total_spaces: i64,
    pub available_spaces: i64,
    pub occupied_spaces: i64,
    pub active_accesses: i64,
    pub completed_accesses: i64,
}
