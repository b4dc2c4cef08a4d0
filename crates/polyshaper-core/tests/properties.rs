//! Property-based tests for polyshaper-core primitives.
//!
//! Tests history window integrity, parameter round-trips and lookup safety
//! using proptest for randomized input generation.

use core::sync::atomic::{AtomicI32, AtomicU32};

use proptest::prelude::*;
use polyshaper_core::{
    AtomicF32, AtomicF64, EnumIndex, HISTORY_LEN, HistoryBuffer, MAX_ORDER, ParamDescriptor,
    ParamError, ParamRef, ParamStore, ParamValue,
};

#[derive(Default)]
struct Params {
    gain: AtomicF32,
    ratio: AtomicF64,
    order: AtomicU32,
    offset: AtomicI32,
    shape: AtomicU32,
}

static SCHEMA: [ParamDescriptor; 5] = [
    ParamDescriptor::float("gain", "Gain", 0.0, 1.0, 1.0),
    ParamDescriptor::double("ratio", "Ratio", -100.0, 100.0, 1.0),
    ParamDescriptor::uint("order", "Order", 0, 10, 1),
    ParamDescriptor::int("offset", "Offset", -10, 10, -1),
    ParamDescriptor::enumeration("shape", "Shape", 4, 0),
];

fn store() -> ParamStore<Params> {
    let mut store = ParamStore::new(Params::default(), &SCHEMA);
    store
        .register("gain", |p| ParamRef::Float(&p.gain))
        .register("ratio", |p| ParamRef::Double(&p.ratio))
        .register("order", |p| ParamRef::UInt(&p.order))
        .register("offset", |p| ParamRef::Int(&p.offset))
        .register("shape", |p| ParamRef::Enum(&p.shape));
    store.reset_to_defaults();
    store
}

fn snapshot(store: &ParamStore<Params>) -> Vec<ParamValue> {
    store.iter().map(|(_, v)| v).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// After any number of pushes the active window holds exactly the last
    /// `order + 1` samples (zero-padded at the start), in arrival order.
    #[test]
    fn history_window_is_latest_samples(
        order in 0usize..=MAX_ORDER,
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..=256),
    ) {
        let mut history = HistoryBuffer::new();
        for &x in &samples {
            history.push(order, x);
        }

        let mut expected = vec![0.0f32; order + 1];
        expected.extend_from_slice(&samples);
        let expected = &expected[expected.len() - (order + 1)..];

        prop_assert_eq!(history.window(order), expected);
    }

    /// Arbitrary orders, including ones far above the maximum, never write
    /// outside the fixed capacity.
    #[test]
    fn history_stays_bounded(
        orders in prop::collection::vec(any::<usize>(), 1..=2048),
    ) {
        let mut history = HistoryBuffer::new();
        for (i, &order) in orders.iter().enumerate() {
            history.push(order, i as f32);
            prop_assert_eq!(history.as_slice().len(), HISTORY_LEN);
            prop_assert_eq!(history.tap(order.min(MAX_ORDER)), i as f32);
        }
    }

    /// Float round-trip across the declared range.
    #[test]
    fn float_round_trip(v in 0.0f32..=1.0f32) {
        let store = store();
        store.set_as("gain", v).unwrap();
        prop_assert_eq!(store.get_as::<f32>("gain").unwrap(), v);
    }

    /// Double round-trip across the declared range.
    #[test]
    fn double_round_trip(v in -100.0f64..=100.0f64) {
        let store = store();
        store.set("ratio", ParamValue::Double(v)).unwrap();
        prop_assert_eq!(store.get("ratio").unwrap(), ParamValue::Double(v));
    }

    /// Integer kinds round-trip exactly.
    #[test]
    fn integer_round_trip(order in 0u32..=10, offset in -10i32..=10, shape in 0u32..4) {
        let store = store();
        store.set_as("order", order).unwrap();
        store.set_as("offset", offset).unwrap();
        store.set_as("shape", EnumIndex(shape)).unwrap();
        prop_assert_eq!(store.get_as::<u32>("order").unwrap(), order);
        prop_assert_eq!(store.get_as::<i32>("offset").unwrap(), offset);
        prop_assert_eq!(store.get_as::<EnumIndex>("shape").unwrap(), EnumIndex(shape));
    }

    /// Names outside the table report NotFound and leave every binding as is.
    #[test]
    fn unknown_names_never_mutate(name in "[a-z]{1,12}", v in -10i32..=10) {
        prop_assume!(SCHEMA.iter().all(|d| d.name != name));

        let store = store();
        let before = snapshot(&store);

        prop_assert_eq!(store.set(&name, ParamValue::Int(v)), Err(ParamError::NotFound(name.clone())));
        prop_assert_eq!(store.get(&name), Err(ParamError::NotFound(name.clone())));
        prop_assert_eq!(snapshot(&store), before);
    }
}
