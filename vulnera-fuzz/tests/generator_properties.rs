//! Property tests for case generation

use proptest::prelude::*;

use vulnera_fuzz::domain::{FuzzCase, Parameter, ParameterKind};
use vulnera_fuzz::infrastructure::{CaseGenerator, ValueCatalog};

fn kind_strategy() -> impl Strategy<Value = ParameterKind> {
    prop_oneof![
        Just(ParameterKind::Text),
        Just(ParameterKind::Integer),
        Just(ParameterKind::Float),
    ]
}

fn params_strategy() -> impl Strategy<Value = Vec<Parameter>> {
    prop::collection::vec(kind_strategy(), 0..6).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Parameter::new(format!("p{}", i), kind))
            .collect()
    })
}

proptest! {
    #[test]
    fn case_count_is_one_plus_catalog_sizes(params in params_strategy()) {
        let expected = 1 + params
            .iter()
            .map(|p| ValueCatalog::values_for(p.kind).len())
            .sum::<usize>();
        prop_assert_eq!(CaseGenerator::generate(&params).len(), expected);
    }

    #[test]
    fn first_case_is_empty_and_rest_set_one_parameter(params in params_strategy()) {
        let cases = CaseGenerator::generate(&params);
        prop_assert_eq!(&cases[0], &FuzzCase::empty());
        for case in &cases[1..] {
            prop_assert_eq!(case.len(), 1);
        }
    }

    #[test]
    fn capped_generation_keeps_prefix(params in params_strategy(), max_cases in 1usize..80) {
        let full = CaseGenerator::generate(&params);
        let capped = CaseGenerator::generate_capped(&params, max_cases);
        prop_assert_eq!(capped.len(), full.len().min(max_cases));
        for (a, b) in capped.iter().zip(full.iter()) {
            prop_assert_eq!(a.len(), b.len());
            let a_keys: Vec<&String> = a.iter().map(|(k, _)| k).collect();
            let b_keys: Vec<&String> = b.iter().map(|(k, _)| k).collect();
            prop_assert_eq!(a_keys, b_keys);
        }
    }
}
