//! `rbtree-sort`: inserts integer keys into a red-black tree and prints them
//! in order.
//!
//! Usage:
//!   rbtree-sort [--dump] [--demo] [KEY ...]
//!
//! Keys are read from stdin (whitespace-separated) when none are given.
//! Log verbosity follows `RUST_LOG` (default `warn`).

use rbtree_cli::{read_stdin_keys, run, Options};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let keys = if opts.demo || !opts.keys.is_empty() {
        opts.keys.clone()
    } else {
        match read_stdin_keys() {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    };

    println!("{}", run(&opts, &keys));
}
