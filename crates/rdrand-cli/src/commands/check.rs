use rdrand_core::{Capabilities, Instruction, PlatformInfo, detect_available_sources, platform_info};
use serde::Serialize;

#[derive(Serialize)]
struct CheckReport {
    platform: PlatformInfo,
    capabilities: Capabilities,
    sources: Vec<Instruction>,
    version: &'static str,
}

pub fn run(out: super::Output) {
    let report = CheckReport {
        platform: platform_info(),
        capabilities: Capabilities::detect(),
        sources: detect_available_sources()
            .iter()
            .map(|s| s.instruction())
            .collect(),
        version: rdrand_core::VERSION,
    };

    out.emit(&report, || render(&report));
}

fn render(report: &CheckReport) -> String {
    let mut text = format!(
        "Platform: {} {} (Rust)\n\n",
        report.platform.system, report.platform.machine
    );
    text.push_str(&format!(
        "Found {} available source(s):\n\n",
        report.sources.len()
    ));
    for instruction in &report.sources {
        text.push_str(&format!("  \u{2705} {instruction}\n"));
    }
    if report.sources.is_empty() {
        text.push_str("  (none found)\n");
    }
    if report.capabilities.require_all().is_err() {
        text.push_str("\nSampling commands are unavailable on this CPU.");
    }
    text.trim_end().to_string()
}
