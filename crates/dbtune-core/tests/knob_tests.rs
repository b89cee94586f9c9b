//! Integration tests for knob collections

use dbtune_core::{KnobSet, KnobSpec, TuneError};

fn descriptor(name: &str, min: f64, max: f64, value: f64) -> KnobSpec {
    KnobSpec {
        name: name.to_string(),
        min_value: min,
        max_value: max,
        value,
    }
}

#[test]
fn test_postgres_knobs_sorted_ascending() {
    let requested: Vec<String> = [
        "work_mem",
        "maintenance_work_mem",
        "checkpoint_completion_target",
        "effective_cache_size",
        "wal_writer_delay",
        "checkpoint_timeout",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let descriptors = vec![
        descriptor("work_mem", 60.0, 2_147_483_650.0, 4096.0),
        descriptor("maintenance_work_mem", 1024.0, 2_147_483_650.0, 65536.0),
        descriptor("checkpoint_completion_target", 0.0, 1.0, 0.9),
        descriptor("effective_cache_size", 1.0, 2_147_483_650.0, 524_288.0),
        descriptor("wal_writer_delay", 1.0, 10000.0, 200.0),
        descriptor("checkpoint_timeout", 30.0, 86400.0, 300.0),
    ];

    let set = KnobSet::from_descriptors(&requested, descriptors).unwrap();
    assert_eq!(
        set.names(),
        vec![
            "checkpoint_completion_target",
            "checkpoint_timeout",
            "effective_cache_size",
            "maintenance_work_mem",
            "wal_writer_delay",
            "work_mem",
        ]
    );
}

#[test]
fn test_missing_descriptor_is_fatal() {
    let requested = vec!["work_mem".to_string(), "shared_buffers".to_string()];
    let descriptors = vec![descriptor("work_mem", 60.0, 100.0, 80.0)];

    let err = KnobSet::from_descriptors(&requested, descriptors).unwrap_err();
    assert!(matches!(err, TuneError::MissingKnob(_)));
    assert!(err.to_string().contains("shared_buffers"));
}
