//! Property-based tests for the DAI core.
//! Drives a device with arbitrary operation sequences and checks it against a
//! plain reference model after every step.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use dai::{Dai, DaiError, DaiFlags, DaiHandle, DaiRegistry, DaiTypeInfo, MAX_CONFIGS};
use platform::mocks::MockDaiOps;
use platform::DaiType;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Acquire { create: bool },
    Release(usize),
    Add(Vec<u8>),
    Select(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|create| Op::Acquire { create }),
        any::<usize>().prop_map(Op::Release),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(Op::Add),
        (0usize..MAX_CONFIGS + 2).prop_map(Op::Select),
    ]
}

/// What the device should look like.
#[derive(Default)]
struct Model {
    configs: Vec<Vec<u8>>,
    current: Option<usize>,
    probes: usize,
    removes: usize,
}

proptest! {
    /// ref_count always equals live handles; probe/remove follow its 0↔1 edges;
    /// the store obeys its bound, its order and its selection rules.
    #[test]
    fn device_matches_reference_model(ops_seq in proptest::collection::vec(op(), 1..64)) {
        let ops = MockDaiOps::leaked();
        let ssp: [Dai; 1] = [Dai::new(DaiType::SSP, 0, ops)];
        let types = [DaiTypeInfo::new(DaiType::SSP, &ssp)];
        let mut registry = DaiRegistry::new();
        registry.install(&types);

        let mut handles: Vec<DaiHandle<'_>> = Vec::new();
        let mut model = Model::default();

        for op in ops_seq {
            match op {
                Op::Acquire { create } => {
                    let flags = if create { DaiFlags::CREATE } else { DaiFlags::empty() };
                    let result = registry.acquire(DaiType::SSP, 0, flags);
                    if handles.is_empty() && !create {
                        prop_assert!(matches!(result, Err(DaiError::NotReady(_))));
                    } else {
                        if handles.is_empty() {
                            model.probes += 1;
                            model.configs.clear();
                            model.current = None;
                        }
                        handles.push(result.unwrap());
                    }
                }
                Op::Release(pick) => {
                    if !handles.is_empty() {
                        let handle = handles.swap_remove(pick % handles.len());
                        handle.release();
                        if handles.is_empty() {
                            model.removes += 1;
                            model.configs.clear();
                            model.current = None;
                        }
                    }
                }
                Op::Add(blob) => {
                    if let Some(handle) = handles.first() {
                        let result = handle.add_config(&blob);
                        if model.configs.len() == MAX_CONFIGS {
                            let is_capacity_error =
                                matches!(result, Err(DaiError::CapacityExceeded { .. }));
                            prop_assert!(is_capacity_error);
                        } else {
                            prop_assert_eq!(result.unwrap(), model.configs.len());
                            model.configs.push(blob);
                        }
                    }
                }
                Op::Select(index) => {
                    if let Some(handle) = handles.last() {
                        let result = handle.select_config(index);
                        if index < model.configs.len() {
                            prop_assert!(result.is_ok());
                            model.current = Some(index);
                            prop_assert_eq!(ops.last_applied(), Some(model.configs[index].clone()));
                        } else {
                            let is_invalid =
                                matches!(result, Err(DaiError::InvalidArgument { .. }));
                            prop_assert!(is_invalid);
                        }
                    }
                }
            }

            let dai = &ssp[0];
            prop_assert_eq!(dai.ref_count() as usize, handles.len());
            prop_assert_eq!(dai.config_count(), model.configs.len());
            prop_assert!(dai.config_count() <= MAX_CONFIGS);
            prop_assert_eq!(dai.current_config(), model.current);
            for (i, expected) in model.configs.iter().enumerate() {
                let stored = dai.with_config(i, <[u8]>::to_vec);
                prop_assert_eq!(stored.as_ref(), Some(expected));
            }
            prop_assert_eq!(ops.probe_count(), model.probes);
            prop_assert_eq!(ops.remove_count(), model.removes);
        }

        for handle in handles {
            handle.release();
        }
        prop_assert_eq!(ssp[0].ref_count(), 0);
        prop_assert_eq!(ops.probe_count(), ops.remove_count());
    }
}
