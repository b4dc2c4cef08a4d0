//! Waveshaper behaviour across calls, threads and extreme settings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use polyshaper_core::{
    AudioBuffer, MAX_ORDER, ParamError, ParamKind, ParamValue, StreamFormat, Transform,
    TransformError,
};
use polyshaper_effects::{WAVESHAPER_PARAMS, Waveshaper};

const SAMPLE_RATE: u32 = 48000;

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8
        })
        .collect()
}

fn configured() -> Waveshaper {
    let mut shaper = Waveshaper::new();
    shaper.configure(StreamFormat::mono(SAMPLE_RATE)).unwrap();
    shaper
}

#[test]
fn every_declared_param_is_bound() {
    let shaper = Waveshaper::new();
    let params = shaper.params();
    assert_eq!(params.len(), WAVESHAPER_PARAMS.len());
    for desc in &WAVESHAPER_PARAMS {
        assert_eq!(params.get(desc.name).unwrap(), desc.default, "{}", desc.name);
    }
}

#[test]
fn lookup_is_exact() {
    let shaper = Waveshaper::new();
    let params = shaper.params();
    assert_eq!(
        params.get("Order"),
        Err(ParamError::NotFound("Order".to_string()))
    );
    assert_eq!(
        params.set("gain ", ParamValue::Float(0.5)),
        Err(ParamError::NotFound("gain ".to_string()))
    );
    assert_eq!(params.get_as::<f32>("gain").unwrap(), 1.0);
}

#[test]
fn mistyped_set_is_rejected() {
    let shaper = Waveshaper::new();
    let err = shaper.params().set("order", ParamValue::Int(3)).unwrap_err();
    assert_eq!(
        err,
        ParamError::TypeMismatch {
            name: "order",
            expected: ParamKind::UInt,
            found: ParamKind::Int,
        }
    );
    assert_eq!(shaper.params().get("order").unwrap(), ParamValue::UInt(1));
}

#[test]
fn identical_runs_are_deterministic() {
    let input = generate_test_signal(4800);
    let run = || {
        let mut shaper = configured();
        shaper.params().set_as("order", 7u32).unwrap();
        shaper.params().set_as("scalepowbase", -2i32).unwrap();
        let mut block = input.clone();
        for chunk in block.chunks_mut(256) {
            shaper.process(chunk).unwrap();
        }
        block
    };
    assert_eq!(run(), run());
}

#[test]
fn reset_matches_fresh_engine() {
    let input = generate_test_signal(512);

    let mut used = configured();
    used.params().set_as("order", 5u32).unwrap();
    used.process(&mut generate_test_signal(300)).unwrap();
    used.reset();
    let mut after_reset = input.clone();
    used.process(&mut after_reset).unwrap();

    let mut fresh = configured();
    fresh.params().set_as("order", 5u32).unwrap();
    let mut expected = input;
    fresh.process(&mut expected).unwrap();

    assert_eq!(after_reset, expected);
}

#[test]
fn long_run_at_max_order_stays_bounded() {
    let mut shaper = configured();
    shaper.params().set_as("order", MAX_ORDER as u32).unwrap();
    shaper.params().set_as("scalepowbase", 2i32).unwrap();

    let mut block = generate_test_signal(SAMPLE_RATE as usize * 2);
    for chunk in block.chunks_mut(1024) {
        shaper.process(chunk).unwrap();
    }
    assert_eq!(shaper.history().as_slice().len(), MAX_ORDER + 1);
    assert!(block.iter().all(|s| s.is_finite()));
}

#[test]
fn out_of_range_order_is_clamped() {
    // the store does not validate ranges; the engine never reads past MAX_ORDER
    let mut shaper = configured();
    shaper.params().set_as("order", 1000u32).unwrap();
    let mut block = generate_test_signal(256);
    shaper.process(&mut block).unwrap();

    let mut reference = configured();
    reference.params().set_as("order", MAX_ORDER as u32).unwrap();
    let mut expected = generate_test_signal(256);
    reference.process(&mut expected).unwrap();

    assert_eq!(block, expected);
}

#[test]
fn extreme_exponent_offset_does_not_overflow() {
    let mut shaper = configured();
    let params = shaper.params();
    params.set_as("order", MAX_ORDER as u32).unwrap();
    params.set_as("scalepowbase", 1i32).unwrap();
    params.set_as("scaleoffset", 0i32).unwrap();

    for offset in [i32::MAX, i32::MIN] {
        shaper.params().set_as("scalepowexpoffset", offset).unwrap();
        let mut block = [0.5];
        shaper.process(&mut block).unwrap();
        assert!(block[0].is_finite(), "offset {offset} gave {}", block[0]);
    }
}

#[test]
fn read_only_buffer_is_reported() {
    let mut shaper = configured();
    let mut buffer = AudioBuffer::read_only(vec![0.5; 8]);
    let err = shaper.process_buffer(&mut buffer).unwrap_err();
    assert!(matches!(err, TransformError::BufferAccess(_)));
    assert_eq!(buffer.as_slice(), &[0.5; 8]);
}

#[test]
fn control_thread_updates_while_processing() {
    let mut shaper = configured();
    let params = shaper.shared_params();
    let done = AtomicBool::new(false);
    let mut all_finite = true;

    thread::scope(|s| {
        s.spawn(|| {
            let mut step = 0u32;
            while !done.load(Ordering::Relaxed) {
                params.set_as("order", step % (MAX_ORDER as u32 + 1)).unwrap();
                params.set_as("gain", (step % 10) as f32 / 10.0).unwrap();
                params
                    .set_as("scalepowexpoffset", (step % 11) as i32 - 5)
                    .unwrap();
                step = step.wrapping_add(1);
            }
        });

        let input = generate_test_signal(128);
        for _ in 0..2000 {
            let mut block = input.clone();
            let ok = shaper.process(&mut block).is_ok() && block.iter().all(|s| s.is_finite());
            if !ok {
                all_finite = false;
                break;
            }
        }
        done.store(true, Ordering::Relaxed);
    });

    assert!(all_finite, "processing failed or produced a non-finite sample");

    let order = shaper.params().get_as::<u32>("order").unwrap();
    assert!(order as usize <= MAX_ORDER);
}
