use super::{HostDrng, OrExit, Output};

pub fn randint(drng: &HostDrng, a: i64, b: i64, out: Output) {
    let value = drng.randint(a, b).or_exit();
    out.emit(&value, || value.to_string());
}

pub fn bytes(drng: &HostDrng, n: usize, out: Output) {
    let hex: String = drng
        .randbytes(n)
        .or_exit()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    out.emit(&hex, || hex.clone());
}

pub fn real(drng: &HostDrng, kind: &str, out: Output) {
    let value = match kind {
        "32" => drng.real32(),
        "53" => drng.res53(),
        _ => drng.real64(),
    }
    .or_exit();
    out.emit(&value, || value.to_string());
}

pub fn choice(drng: &HostDrng, items: &[String], out: Output) {
    let item = drng.choice(items).or_exit();
    out.emit(item, || item.clone());
}

pub fn shuffle(drng: &HostDrng, mut items: Vec<String>, out: Output) {
    drng.shuffle(&mut items).or_exit();
    out.emit(&items, || items.join(" "));
}
