//! # Fixed Rate Provider
//!
//! Serves a table from configuration. Used offline and in tests.

use async_trait::async_trait;

use crate::error::RatesResult;
use crate::provider::{RateProvider, RateTable};

/// Provider that always returns the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRateProvider {
    table: RateTable,
}

impl FixedRateProvider {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_rates(&self) -> RatesResult<RateTable> {
        Ok(self.table.clone())
    }
}
