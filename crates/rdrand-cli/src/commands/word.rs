use rdrand_core::{Capabilities, Drng, EntropySource, Instruction, Result, RetryOutcome};

use super::{Output, fail};

pub fn run(caps: &Capabilities, source: &str, width: &str, attempts: u32, out: Output) {
    let instruction: Instruction = match source.parse() {
        Ok(i) => i,
        Err(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(1);
        }
    };
    let drng = super::make_drng(caps, instruction, attempts);
    let outcome = draw(&drng, width);

    // JSON reports the outcome even when the draw failed.
    if out.json {
        out.emit(&outcome, String::new);
    }
    match settle(&drng, outcome) {
        Ok(word) if !out.json => println!("{word}"),
        Ok(_) => {}
        Err(err) => fail(err),
    }
}

fn draw<S: EntropySource>(drng: &Drng<S>, width: &str) -> RetryOutcome<u64> {
    match width {
        "32" => drng.draw_word32().map(u64::from),
        _ => drng.draw_word(),
    }
}

/// Failures carry the budget the policy actually spent, not the raw flag.
fn settle<S: EntropySource>(drng: &Drng<S>, outcome: RetryOutcome<u64>) -> Result<u64> {
    outcome.into_result(drng.instruction(), drng.policy().max_attempts())
}
