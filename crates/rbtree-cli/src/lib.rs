//! Library half of the `rbtree-sort` binary: argument handling and output
//! formatting, kept out of `main` so it can be tested.

use std::io::{self, Read};

use rbtree::RbTree;
use thiserror::Error;
use tracing::{error, info};

/// Keys inserted by `--demo`.
pub const DEMO_KEYS: [i64; 8] = [5, 3, 7, 2, 4, 6, 8, 11];

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid key {0:?}: expected a signed 64-bit integer")]
    InvalidKey(String),
    #[error("unknown flag {0}")]
    UnknownFlag(String),
    #[error("failed to read keys from stdin: {0}")]
    Io(#[from] io::Error),
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Print the tree structure after the sorted keys.
    pub dump: bool,
    /// Ignore other input and use [`DEMO_KEYS`].
    pub demo: bool,
    /// Keys given as arguments; stdin is read when empty.
    pub keys: Vec<i64>,
}

impl Options {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Options::default();
        for arg in args {
            match arg.as_ref() {
                "--dump" => opts.dump = true,
                "--demo" => opts.demo = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnknownFlag(flag.to_string()));
                }
                key => opts.keys.push(parse_key(key)?),
            }
        }
        Ok(opts)
    }
}

fn parse_key(s: &str) -> Result<i64, CliError> {
    s.parse().map_err(|_| CliError::InvalidKey(s.to_string()))
}

/// Whitespace-separated keys.
pub fn parse_keys(input: &str) -> Result<Vec<i64>, CliError> {
    input.split_whitespace().map(parse_key).collect()
}

pub fn read_stdin_keys() -> Result<Vec<i64>, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    parse_keys(&buf)
}

/// Builds the tree and renders the output text.
pub fn run(opts: &Options, keys: &[i64]) -> String {
    let keys = if opts.demo { &DEMO_KEYS[..] } else { keys };
    let tree: RbTree<i64> = keys.iter().copied().collect();
    info!(keys = tree.len(), height = tree.height(), "tree built");
    if let Err(err) = tree.assert_valid() {
        error!(%err, "tree failed validation");
    }

    let mut out = String::from("inorder:");
    tree.traverse_inorder(|k| {
        out.push(' ');
        out.push_str(&k.to_string());
    });
    if opts.dump {
        out.push('\n');
        out.push_str(&tree.dump());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_keys() {
        let opts = Options::parse(["--dump", "3", "-1", "2"]).unwrap();
        assert_eq!(
            opts,
            Options {
                dump: true,
                demo: false,
                keys: vec![3, -1, 2],
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Options::parse(["x1"]),
            Err(CliError::InvalidKey(k)) if k == "x1"
        ));
        assert!(matches!(
            Options::parse(["--verbose"]),
            Err(CliError::UnknownFlag(f)) if f == "--verbose"
        ));
        assert!(parse_keys("1 2 three").is_err());
    }

    #[test]
    fn demo_output_matches_driver() {
        let opts = Options {
            demo: true,
            ..Options::default()
        };
        assert_eq!(run(&opts, &[]), "inorder: 2 3 4 5 6 7 8 11");
    }

    #[test]
    fn stdin_style_keys() {
        let keys = parse_keys("9\n1  5\t1\n").unwrap();
        assert_eq!(run(&Options::default(), &keys), "inorder: 1 1 5 9");
    }

    #[test]
    fn dump_appends_structure() {
        let opts = Options {
            dump: true,
            ..Options::default()
        };
        let out = run(&opts, &[2, 1]);
        assert!(out.starts_with("inorder: 1 2\nNode["));
        assert!(out.contains("black 2"));
        assert!(out.contains("red 1"));
    }
}
