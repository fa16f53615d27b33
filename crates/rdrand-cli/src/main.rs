//! CLI for rdrand: hardware random numbers from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use rdrand_core::{DEFAULT_BOUNDARY, DEFAULT_MAX_ATTEMPTS, Instruction};

#[derive(Parser)]
#[command(name = "rdrand")]
#[command(about = "rdrand: hardware random numbers from RDRAND/RDSEED")]
#[command(version = rdrand_core::VERSION)]
struct Cli {
    /// Attempts per hardware draw before giving up
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// Print machine-readable JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report RDRAND/RDSEED support on this CPU
    Check,

    /// Draw one raw word
    Word {
        /// Instruction to draw from
        #[arg(long, default_value = "rdrand", value_parser = ["rdrand", "rdseed"])]
        source: String,

        /// Word width in bits
        #[arg(long, default_value = "64", value_parser = ["32", "64"])]
        width: String,
    },

    /// Random unsigned integer of K bits
    Bits {
        /// Number of bits (0 prints 0)
        k: u32,
    },

    /// One integer in [0, N)
    Below {
        /// Exclusive upper bound (at least 1)
        #[arg(allow_hyphen_values = true)]
        n: i32,
    },

    /// One integer in [0, N]
    Upto {
        /// Inclusive upper bound (non-negative)
        #[arg(allow_hyphen_values = true)]
        n: i32,
    },

    /// Non-repeated integers in [0, BOUNDARY]
    Range {
        /// Number of values
        #[arg(allow_hyphen_values = true, value_parser = parse_length)]
        length: usize,

        /// Inclusive upper bound; LENGTH may not exceed it
        #[arg(long, default_value_t = DEFAULT_BOUNDARY, allow_hyphen_values = true)]
        boundary: i32,
    },

    /// Non-repeated integers in [0, BELOW)
    RangeBelow {
        /// Number of values
        #[arg(allow_hyphen_values = true, value_parser = parse_length)]
        length: usize,

        /// Exclusive upper bound; LENGTH may not exceed it
        #[arg(allow_hyphen_values = true)]
        below: i32,
    },

    /// AMOUNT independent sets of non-repeated integers in [0, BELOW)
    Batch {
        /// Values per set
        #[arg(allow_hyphen_values = true, value_parser = parse_length)]
        length: usize,

        /// Exclusive upper bound; LENGTH may not exceed it
        #[arg(allow_hyphen_values = true)]
        below: i32,

        /// Number of sets
        amount: usize,
    },

    /// Integer in [A, B], exactly uniform
    Randint {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// N random bytes as hex
    Bytes { n: usize },

    /// Random float in the unit interval
    Real {
        /// 64: [0,1) from one 64-bit word; 32: [0,1] from one 32-bit word;
        /// 53: [0,1) from two 32-bit words
        #[arg(long, default_value = "64", value_parser = ["64", "32", "53"])]
        kind: String,
    },

    /// Pick one of the given items
    Choice {
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Print the given items in random order
    Shuffle {
        #[arg(required = true)]
        items: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = commands::usage_exit_code(&err);
            let _ = err.print();
            std::process::exit(code);
        }
    };
    let out = commands::Output { json: cli.json };

    match cli.command {
        Commands::Check => commands::check::run(out),
        command => run(command, cli.attempts, out),
    }
}

/// Sample lengths are counts; a negative one gets a readable message
/// instead of clap's "unexpected argument".
fn parse_length(s: &str) -> Result<usize, String> {
    match s.parse::<i64>() {
        Ok(n) if n < 0 => Err(format!("length must not be negative (got {n})")),
        _ => s.parse::<usize>().map_err(|e| e.to_string()),
    }
}

fn run(command: Commands, attempts: u32, out: commands::Output) {
    // Refuse to do anything on a CPU missing either instruction.
    let caps = commands::require_capabilities();
    let drng = commands::make_drng(&caps, Instruction::RdRand, attempts);

    match command {
        Commands::Check => commands::check::run(out),
        Commands::Word { source, width } => {
            commands::word::run(&caps, &source, &width, attempts, out)
        }
        Commands::Bits { k } => commands::bits::run(&drng, k, out),
        Commands::Below { n } => commands::bounded::below(&drng, n, out),
        Commands::Upto { n } => commands::bounded::upto(&drng, n, out),
        Commands::Range { length, boundary } => {
            commands::range::range(&drng, length, boundary, out)
        }
        Commands::RangeBelow { length, below } => {
            commands::range::range_below(&drng, length, below, out)
        }
        Commands::Batch {
            length,
            below,
            amount,
        } => commands::range::batch(&drng, length, below, amount, out),
        Commands::Randint { a, b } => commands::rands::randint(&drng, a, b, out),
        Commands::Bytes { n } => commands::rands::bytes(&drng, n, out),
        Commands::Real { kind } => commands::rands::real(&drng, &kind, out),
        Commands::Choice { items } => commands::rands::choice(&drng, &items, out),
        Commands::Shuffle { items } => commands::rands::shuffle(&drng, items, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rdrand").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_usage_errors_exit_with_one() {
        for args in [
            &["below", "abc"][..],
            &["range", "-1"],
            &["batch", "-3", "10", "2"],
            &["word", "--width", "16"],
            &["bogus"],
        ] {
            let err = parse(args).err().expect("should be rejected");
            assert_eq!(commands::usage_exit_code(&err), 1, "{args:?}");
        }
    }

    #[test]
    fn test_negative_length_is_described() {
        let err = parse(&["range-below", "-2", "10"]).err().expect("rejected");
        assert!(err.to_string().contains("length must not be negative"), "{err}");
    }

    #[test]
    fn test_help_and_version_exit_cleanly() {
        for flag in ["--help", "--version"] {
            let err = parse(&[flag]).err().expect("help/version short-circuit");
            assert_eq!(commands::usage_exit_code(&err), 0);
        }
    }

    #[test]
    fn test_negative_bounds_reach_the_core() {
        let cli = parse(&["range", "5", "--boundary", "-3"]).expect("parses");
        assert!(matches!(
            cli.command,
            Commands::Range {
                length: 5,
                boundary: -3
            }
        ));
        let cli = parse(&["--attempts", "0", "below", "-7"]).expect("parses");
        assert_eq!(cli.attempts, 0);
        assert!(matches!(cli.command, Commands::Below { n: -7 }));
    }
}
