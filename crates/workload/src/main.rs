//! Replays the prime-key workload against the B-tree index.
//!
//! Usage:
//!   workload [--order N] [--summary]
//!
//! Builds a tree from the primes up to 10000, then runs three phases
//! (range query, prime deletion, even insertion) and prints a `<key> yes|no`
//! report for each. `--summary` prints hit counts instead of full reports.
//! Set `RUST_LOG=debug` to watch splits, borrows and merges.

mod phases;
mod utils;

use arbor_core::{TreeConfig, DEFAULT_ORDER};
use arbor_index::BTreeIndex;
use std::env;
use std::process::exit;

struct Options {
    order: usize,
    summary: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        order: DEFAULT_ORDER,
        summary: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--order" => {
                let value = iter.next().ok_or("--order needs a value")?;
                options.order = value
                    .parse()
                    .map_err(|_| format!("invalid order: {}", value))?;
            }
            "--summary" => options.summary = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(options)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("Usage: workload [--order N] [--summary]");
            exit(1);
        }
    };

    let mut tree: BTreeIndex = match BTreeIndex::with_config(TreeConfig::new(options.order)) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    };

    println!("B-tree workload (order {})", tree.order());
    phases::build(&mut tree);

    let results = [
        phases::query_range(&tree),
        phases::delete_primes(&mut tree),
        phases::insert_evens(&mut tree),
    ];

    for result in &results {
        println!();
        println!(
            "== {} ({} yes, {} no)",
            result.name,
            result.report.hits(),
            result.report.misses()
        );
        if !options.summary {
            print!("{}", result.report);
        }
    }

    let stats = tree.stats();
    println!();
    println!(
        "splits {} (root {}), borrows {} left / {} right, merges {}, root collapses {}",
        stats.splits(),
        stats.root_splits(),
        stats.left_rotations(),
        stats.right_rotations(),
        stats.merges(),
        stats.root_collapses()
    );
}
