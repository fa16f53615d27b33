use rdrand_core::{Bound, SampleSet};

use super::{HostDrng, OrExit, Output};

fn join(set: &SampleSet) -> String {
    set.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn range(drng: &HostDrng, length: usize, boundary: i32, out: Output) {
    let set = drng
        .sample_distinct(length, Bound::Boundary(boundary))
        .or_exit();
    out.emit(&set, || join(&set));
}

pub fn range_below(drng: &HostDrng, length: usize, below: i32, out: Output) {
    let set = drng.sample_distinct(length, Bound::Below(below)).or_exit();
    out.emit(&set, || join(&set));
}

pub fn batch(drng: &HostDrng, length: usize, below: i32, amount: usize, out: Output) {
    let batch = drng
        .sample_batch(length, Bound::Below(below), amount)
        .or_exit();
    out.emit(&batch, || {
        batch.iter().map(join).collect::<Vec<_>>().join("\n")
    });
}
