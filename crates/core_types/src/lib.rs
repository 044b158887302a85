/// Sequence number of a watch cycle, assigned by the ticker. Starts at 1.
pub type CycleId = u64;
