#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-tick context handed to every phase step.
///
/// Ticks count host invocations, starting at `0`; there is no wall-clock
/// time anywhere in the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    pub tick: u64,
}

impl TickContext {
    pub fn new(tick: u64) -> Self {
        Self { tick }
    }
}
