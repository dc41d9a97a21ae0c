//! Workload fixtures for benchmarking the OddlyEven store.
//!
//! - [`scalar_workload`]: inline-only writes (ints, floats, short strings)
//! - [`object_workload`]: heap objects only, every write pins a handle
//! - [`mixed_workload`]: roughly one heap object per four writes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use oddly_test_utils::MockValue;

/// Deterministic pseudo-random stream from `seed`.
fn stream(seed: u64) -> impl Iterator<Item = u64> {
    let mut state = seed;
    std::iter::repeat_with(move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 11
    })
}

fn scalar_from(x: u64) -> MockValue {
    match x % 4 {
        0 => MockValue::Bool(x & 8 != 0),
        1 => MockValue::Int(x as i64),
        2 => MockValue::Float((x % 10_000) as f64 / 7.0),
        _ => MockValue::Str(format!("value-{}", x % 1000).into_bytes()),
    }
}

/// `n` `(index, value)` writes of inline scalars.
pub fn scalar_workload(n: usize, seed: u64) -> Vec<(i64, MockValue)> {
    stream(seed)
        .take(n)
        .map(|x| ((x % 64) as i64 - 32, scalar_from(x >> 6)))
        .collect()
}

/// `n` `(index, value)` writes of fresh heap objects.
pub fn object_workload(n: usize, seed: u64) -> Vec<(i64, MockValue)> {
    stream(seed)
        .take(n)
        .enumerate()
        .map(|(i, x)| ((x % 64) as i64 - 32, MockValue::table(&format!("t{i}"))))
        .collect()
}

/// `n` writes, about a quarter of them heap objects.
pub fn mixed_workload(n: usize, seed: u64) -> Vec<(i64, MockValue)> {
    stream(seed)
        .take(n)
        .enumerate()
        .map(|(i, x)| {
            let value = if x % 4 == 0 {
                MockValue::function(&format!("f{i}"))
            } else {
                scalar_from(x >> 2)
            };
            ((x % 64) as i64 - 32, value)
        })
        .collect()
}
