use super::{HostDrng, OrExit, Output};

pub fn below(drng: &HostDrng, n: i32, out: Output) {
    let value = drng.uniform_below(n).or_exit();
    out.emit(&value, || value.to_string());
}

pub fn upto(drng: &HostDrng, n: i32, out: Output) {
    let value = drng.uniform_upto(n).or_exit();
    out.emit(&value, || value.to_string());
}
