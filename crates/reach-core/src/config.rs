//! Grid construction settings.

/// Parameters for [`Grid::from_config`](crate::Grid::from_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of columns (x extent).
    pub columns: i32,
    /// Number of rows (y extent).
    pub rows: i32,
    /// Traversal costs are drawn uniformly from `1..=max_weight`.
    pub max_weight: i32,
    /// Seed for reproducible weights. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 128,
            rows: 80,
            max_weight: 10,
            seed: None,
        }
    }
}
