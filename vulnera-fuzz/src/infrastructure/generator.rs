//! Fuzz case generation

use crate::domain::value_objects::{FuzzCase, Parameter};
use crate::infrastructure::catalog::ValueCatalog;

/// Default cap on cases dispatched per endpoint
pub const DEFAULT_MAX_CASES: usize = 50;

/// Builds the ordered fuzz cases for one endpoint
pub struct CaseGenerator;

impl CaseGenerator {
    /// All cases for `params`: the empty case first, then one case per
    /// (parameter, catalog value) with only that parameter set.
    ///
    /// Cases are not cross-producted, so the count is
    /// `1 + sum(catalog size of each parameter's kind)`.
    pub fn generate(params: &[Parameter]) -> Vec<FuzzCase> {
        let total = 1 + params
            .iter()
            .map(|p| ValueCatalog::values_for(p.kind).len())
            .sum::<usize>();

        let mut cases = Vec::with_capacity(total);
        cases.push(FuzzCase::empty());

        for param in params {
            cases.extend(
                ValueCatalog::values_for(param.kind)
                    .iter()
                    .map(|value| FuzzCase::single(param.name.clone(), value.clone())),
            );
        }

        cases
    }

    /// Generated cases truncated to `max_cases`, keeping the earliest ones
    pub fn generate_capped(params: &[Parameter], max_cases: usize) -> Vec<FuzzCase> {
        let mut cases = Self::generate(params);
        cases.truncate(max_cases);
        cases
    }
}
