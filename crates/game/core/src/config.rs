/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Upper bound on consecutive automatic phase transitions within a single
    /// submitted command. Exceeding it means the flow tree is looping.
    pub max_auto_transitions: u32,

    /// Upper bound on the `count` of a single spawn request.
    /// Larger requests are clamped to this value during preprocessing.
    pub max_spawn_count: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Maximum number of nodes a flow tree may hold (node ids are `u16`).
    pub const MAX_FLOW_NODES: usize = u16::MAX as usize;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_AUTO_TRANSITIONS: u32 = 100;
    pub const DEFAULT_MAX_SPAWN_COUNT: u32 = 64;

    pub fn new() -> Self {
        Self {
            max_auto_transitions: Self::DEFAULT_MAX_AUTO_TRANSITIONS,
            max_spawn_count: Self::DEFAULT_MAX_SPAWN_COUNT,
        }
    }

    pub fn with_max_auto_transitions(mut self, max_auto_transitions: u32) -> Self {
        self.max_auto_transitions = max_auto_transitions;
        self
    }

    pub fn with_max_spawn_count(mut self, max_spawn_count: u32) -> Self {
        self.max_spawn_count = max_spawn_count;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
