use oddly_core::{HostValue, OddlyEven, StorageStrategy, StoreConfig, TaggedValue, ValueKind};
use oddly_test_utils::{registry, sample_values, store_with, MockValue, ObjectKind};

#[test]
fn fresh_store_is_empty() {
    let reg = registry();
    let store = OddlyEven::new(&reg);
    assert_eq!(store.size(), 2);
    assert_eq!(store.kind(0), ValueKind::None);
    assert_eq!(store.kind(1), ValueKind::None);
    assert_eq!(store.get(0), MockValue::Nil);
    assert_eq!(store.get(1), MockValue::Nil);
    assert!(store.held_handles().is_empty());
}

#[test]
fn hello_and_forty_two() {
    let reg = registry();
    let mut h = OddlyEven::new(&reg);
    h.set(0, MockValue::str("hello"));
    h.set(1, MockValue::Int(42));
    assert_eq!(h.get(0), MockValue::str("hello"));
    assert_eq!(h.get(1), MockValue::Int(42));
    assert_eq!(h.size(), 2);
}

#[test]
fn every_sample_round_trips_in_both_strategies() {
    for strategy in [StorageStrategy::Tagged, StorageStrategy::Registry] {
        let reg = registry();
        let mut store = store_with(&reg, strategy);
        for value in sample_values() {
            store.set(7, value.share());
            let back = store.get(7);
            assert!(
                back.is_same(&value),
                "{strategy}: stored {value}, got {back}"
            );
        }
    }
}

#[test]
fn tagged_strategy_keeps_scalars_inline() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    store.set(0, MockValue::Float(0.5));
    store.set(1, MockValue::Bool(false));
    assert_eq!(store.tagged(0), &TaggedValue::Float(0.5));
    assert_eq!(store.tagged(1), &TaggedValue::Bool(false));
    assert_eq!(reg.outstanding(), 0);

    store.set(0, MockValue::table("t"));
    assert_eq!(store.kind(0), ValueKind::Indirect);
    assert_eq!(reg.outstanding(), 1);
}

#[test]
fn registry_strategy_pins_scalars_too() {
    let reg = registry();
    let mut store = store_with(&reg, StorageStrategy::Registry);
    store.set(0, MockValue::Int(5));
    store.set(1, MockValue::Nil);
    assert_eq!(store.kind(0), ValueKind::Indirect);
    assert_eq!(store.kind(1), ValueKind::None);
    assert_eq!(reg.outstanding(), 1);
    assert_eq!(store.get(0), MockValue::Int(5));
    assert_eq!(store.get(1), MockValue::Nil);
}

#[test]
fn strings_keep_embedded_zero_bytes() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    let raw = b"\0a\0b\0".to_vec();
    store.set(0, MockValue::Str(raw.clone()));
    assert_eq!(store.get(0), MockValue::Str(raw));
}

#[test]
fn indirect_values_keep_identity() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    let f = MockValue::function("callback");
    store.set(1, f.share());
    let back = store.get(1);
    assert_eq!(back, f);
    assert_ne!(back, MockValue::function("callback"));
}

#[test]
fn parity_addresses_the_same_slot() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    store.set(0, MockValue::Int(1));
    store.set(2, MockValue::Int(2));
    assert_eq!(store.get(0), MockValue::Int(2));

    store.set(1, MockValue::Int(3));
    store.set(3, MockValue::Int(4));
    assert_eq!(store.get(1), MockValue::Int(4));
    assert_eq!(store.get(-1), MockValue::Int(4));
    assert_eq!(store.get(100), MockValue::Int(2));
}

#[test]
fn overwrite_releases_previous_handle() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    let first = MockValue::table("first");
    store.set(0, first.share());
    let held = store.held_handles();
    assert_eq!(held.len(), 1);
    assert_eq!(first.ref_count(), Some(2));

    store.set(0, MockValue::Int(9));
    assert!(!reg.contains(held[0]));
    assert_eq!(first.ref_count(), Some(1));
    assert_eq!(reg.outstanding(), 0);
}

#[test]
fn repeated_indirect_overwrites_do_not_leak() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    store.set(0, MockValue::table("seed"));
    let before = reg.outstanding();
    for i in 0..1000 {
        store.set(0, MockValue::table(&format!("t{i}")));
    }
    assert_eq!(reg.outstanding(), before);
    let stats = reg.stats();
    assert_eq!(stats.acquired_total, 1001);
    assert_eq!(stats.released_total, 1000);
    assert_eq!(stats.peak_outstanding, 1);
}

#[test]
fn same_value_in_both_slots_gets_two_handles() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    let t = MockValue::table("shared");
    store.set(0, t.share());
    store.set(1, t.share());
    let held = store.held_handles();
    assert_eq!(held.len(), 2);
    assert_ne!(held[0], held[1]);

    store.set(0, MockValue::Nil);
    assert_eq!(store.get(1), t);
}

#[test]
fn drop_releases_everything_the_store_held() {
    let reg = registry();
    let t = MockValue::table("t");
    let held = {
        let mut store = OddlyEven::new(&reg);
        store.set(0, t.share());
        store.set(1, MockValue::object(ObjectKind::Thread, "co"));
        assert_eq!(reg.outstanding(), 2);
        store.held_handles()
    };
    assert!(held.iter().all(|h| !reg.contains(*h)));
    assert_eq!(reg.outstanding(), 0);
    assert_eq!(t.ref_count(), Some(1));
    assert_eq!(reg.stats().stale_releases, 0);
}

#[test]
fn drop_after_overwrites_releases_each_handle_once() {
    let reg = registry();
    {
        let mut store = store_with(&reg, StorageStrategy::Registry);
        store.set(0, MockValue::table("a"));
        store.set(0, MockValue::str("b"));
        store.set(1, MockValue::Foreign(3));
        store.set(1, MockValue::Nil);
        store.set(1, MockValue::Int(4));
    }
    let stats = reg.stats();
    assert_eq!(stats.acquired_total, 4);
    assert_eq!(stats.released_total, 4);
    assert_eq!(stats.stale_releases, 0);
    assert_eq!(stats.outstanding, 0);
}

#[test]
fn drop_leaves_other_stores_alone() {
    let reg = registry();
    let mut keep = OddlyEven::new(&reg);
    keep.set(0, MockValue::table("kept"));
    {
        let mut gone = OddlyEven::new(&reg);
        gone.set(0, MockValue::table("gone"));
        gone.set(1, MockValue::str("inline"));
    }
    assert_eq!(reg.outstanding(), 1);
    assert!(reg.contains(keep.held_handles()[0]));
}

#[test]
fn unsupported_kinds_degrade_to_none() {
    let reg = registry();
    let mut store = OddlyEven::new(&reg);
    store.set(0, MockValue::Int(1));
    store.set(0, MockValue::Foreign(200));
    assert_eq!(store.kind(0), ValueKind::None);
    assert_eq!(store.get(0), MockValue::Nil);
    assert_eq!(store.degraded_total(), 1);
}

#[test]
fn registry_strategy_does_not_degrade() {
    let reg = registry();
    let mut store = store_with(&reg, StorageStrategy::Registry);
    store.set(0, MockValue::Foreign(200));
    assert_eq!(store.get(0), MockValue::Foreign(200));
    assert_eq!(store.degraded_total(), 0);
}

#[test]
fn display_names_label_and_identity() {
    let reg = registry();
    let a = OddlyEven::new(&reg);
    let b = OddlyEven::new(&reg);
    assert_eq!(a.to_string(), format!("OddlyEven(2) @ {}", a.id()));
    assert_ne!(a.to_string(), b.to_string());

    let config = StoreConfig {
        label: "ex08.OddlyEven".into(),
        ..StoreConfig::default()
    };
    let c = OddlyEven::with_config(&reg, config).unwrap();
    assert!(c.to_string().starts_with("ex08.OddlyEven(2) @ #"));
}

#[test]
fn invalid_config_is_rejected() {
    let reg = registry();
    let config = StoreConfig {
        label: String::new(),
        ..StoreConfig::default()
    };
    assert!(OddlyEven::with_config(&reg, config).is_err());
}

#[test]
fn stores_share_the_registry_handle() {
    let reg = registry();
    let a = OddlyEven::new(&reg);
    let b = OddlyEven::new(&reg);
    assert!(a.registry().ptr_eq(b.registry()));
}
