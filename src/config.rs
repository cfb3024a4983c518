//! Configuration for join operations

/// Order in which joined rows are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinOrder {
    /// Left rows in input order, each followed by its matches in right-encounter order
    #[default]
    Natural,
    /// Left-row batches in reverse input order; matches inside a batch keep right-encounter order
    ReversedLeft,
}

/// Configuration for hash joins
#[derive(Debug, Clone, Default)]
pub struct JoinConfig {
    /// Output ordering
    pub order: JoinOrder,
}

impl JoinConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output ordering
    pub fn with_order(mut self, order: JoinOrder) -> Self {
        self.order = order;
        self
    }
}
