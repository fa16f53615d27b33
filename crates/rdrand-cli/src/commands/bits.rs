use super::{HostDrng, OrExit, Output};

pub fn run(drng: &HostDrng, k: u32, out: Output) {
    let value = drng.random_bits(k).or_exit();
    out.emit(&value, || value.to_string());
}
