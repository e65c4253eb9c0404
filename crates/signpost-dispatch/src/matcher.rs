//! Per-route option matching.
//!
//! Each option route is matched against the full argument vector on its own,
//! with getopt-style rules and nothing but its own long/short pair in view.
//! Matching is best-effort: an occurrence that cannot be read (a missing
//! value, a value given to a flag that takes none) is skipped, never
//! reported.

use crate::route::{OptionToken, ShortToken};

/// Finds every occurrence of one route's option in `args`.
///
/// `args` excludes the program name. Each returned entry is one occurrence,
/// in argument order: `Some(value)` for value-taking options, `None` for
/// plain flags.
///
/// Rules:
/// - `--name`, and `--name=value` / `--name value` when the long option
///   takes a value;
/// - `-x` anywhere in a short cluster (`-abx`); a value-taking short option
///   consumes the rest of the cluster (`-xVALUE`) or else the next argument;
/// - a bare `--` ends option scanning;
/// - everything else is skipped.
///
/// # Example
///
/// ```rust
/// use signpost_dispatch::{occurrences, OptionToken, ShortToken};
///
/// let long = OptionToken::parse("name:").unwrap();
/// let short = ShortToken::parse("n:").unwrap();
/// let args: Vec<String> = ["--name=Ann", "-n", "Bob"].map(String::from).to_vec();
///
/// let found = occurrences(&long, Some(&short), &args);
/// assert_eq!(found, vec![Some("Ann".to_string()), Some("Bob".to_string())]);
/// ```
pub fn occurrences(
    long: &OptionToken,
    short: Option<&ShortToken>,
    args: &[String],
) -> Vec<Option<String>> {
    let mut found = Vec::new();
    let mut next = 0;

    while next < args.len() {
        let arg = args[next].as_str();
        next += 1;

        if arg == "--" {
            break;
        }

        if let Some(body) = arg.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            if name != long.name() {
                continue;
            }

            match (long.takes_value(), inline) {
                (true, Some(value)) => found.push(Some(value.to_string())),
                (true, None) => {
                    if let Some(value) = args.get(next) {
                        found.push(Some(value.clone()));
                        next += 1;
                    }
                }
                (false, None) => found.push(None),
                (false, Some(_)) => {}
            }
            continue;
        }

        let Some(short) = short else {
            continue;
        };
        let Some(cluster) = arg.strip_prefix('-') else {
            continue;
        };

        for (offset, ch) in cluster.char_indices() {
            if ch != short.flag() {
                continue;
            }
            if !short.takes_value() {
                found.push(None);
                continue;
            }

            let rest = &cluster[offset + ch.len_utf8()..];
            if !rest.is_empty() {
                found.push(Some(rest.to_string()));
            } else if let Some(value) = args.get(next) {
                found.push(Some(value.clone()));
                next += 1;
            }
            break;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn long(token: &str) -> OptionToken {
        OptionToken::parse(token).unwrap()
    }

    fn short(token: &str) -> ShortToken {
        ShortToken::parse(token).unwrap()
    }

    #[test]
    fn test_long_value_as_next_argument() {
        let found = occurrences(&long("hello-world:"), None, &args(&["--hello-world", "Bob"]));
        assert_eq!(found, vec![Some("Bob".to_string())]);
    }

    #[test]
    fn test_long_value_inline() {
        let found = occurrences(&long("hello-world:"), None, &args(&["--hello-world=Alice"]));
        assert_eq!(found, vec![Some("Alice".to_string())]);
    }

    #[test]
    fn test_long_value_inline_keeps_later_equals() {
        let found = occurrences(&long("define:"), None, &args(&["--define=a=b"]));
        assert_eq!(found, vec![Some("a=b".to_string())]);
    }

    #[test]
    fn test_long_value_inline_empty() {
        let found = occurrences(&long("name:"), None, &args(&["--name="]));
        assert_eq!(found, vec![Some(String::new())]);
    }

    #[test]
    fn test_long_value_missing_is_skipped() {
        let found = occurrences(&long("name:"), None, &args(&["--name"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_long_value_may_look_like_a_flag() {
        let found = occurrences(&long("name:"), None, &args(&["--name", "-v"]));
        assert_eq!(found, vec![Some("-v".to_string())]);
    }

    #[test]
    fn test_long_flag() {
        let found = occurrences(&long("help"), None, &args(&["--help"]));
        assert_eq!(found, vec![None]);
    }

    #[test]
    fn test_long_flag_with_value_is_skipped() {
        let found = occurrences(&long("help"), None, &args(&["--help=yes"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_long_name_must_match_exactly() {
        let found = occurrences(&long("help"), None, &args(&["--hel", "--helpme", "-help"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_short_flag() {
        let found = occurrences(&long("help"), Some(&short("h")), &args(&["-h"]));
        assert_eq!(found, vec![None]);
    }

    #[test]
    fn test_short_flag_in_cluster() {
        let found = occurrences(&long("verbose"), Some(&short("v")), &args(&["-xvz"]));
        assert_eq!(found, vec![None]);
    }

    #[test]
    fn test_short_flag_repeated_in_cluster() {
        let found = occurrences(&long("verbose"), Some(&short("v")), &args(&["-vv", "-v"]));
        assert_eq!(found, vec![None, None, None]);
    }

    #[test]
    fn test_short_value_attached() {
        let found = occurrences(&long("name:"), Some(&short("n:")), &args(&["-nBob"]));
        assert_eq!(found, vec![Some("Bob".to_string())]);
    }

    #[test]
    fn test_short_value_next_argument() {
        let found = occurrences(&long("name:"), Some(&short("n:")), &args(&["-n", "Bob"]));
        assert_eq!(found, vec![Some("Bob".to_string())]);
    }

    #[test]
    fn test_short_value_ends_cluster() {
        // `v` is part of the value, not another flag.
        let found = occurrences(&long("name:"), Some(&short("n:")), &args(&["-xnv"]));
        assert_eq!(found, vec![Some("v".to_string())]);
    }

    #[test]
    fn test_short_value_missing_is_skipped() {
        let found = occurrences(&long("name:"), Some(&short("n:")), &args(&["-n"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_short_token_ignores_clusters() {
        let found = occurrences(&long("help"), None, &args(&["-h"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_lone_dash_is_not_an_option() {
        let found = occurrences(&long("stdin"), Some(&short("s")), &args(&["-"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_double_dash_ends_scanning() {
        let found = occurrences(&long("help"), Some(&short("h")), &args(&["--", "--help", "-h"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_positional_arguments_are_skipped() {
        let found = occurrences(&long("help"), None, &args(&["file.txt", "--help", "other"]));
        assert_eq!(found, vec![None]);
    }

    #[test]
    fn test_occurrences_in_argument_order() {
        let found = occurrences(
            &long("name:"),
            Some(&short("n:")),
            &args(&["-n", "one", "--name=two", "--name", "three"]),
        );
        assert_eq!(
            found,
            vec![
                Some("one".to_string()),
                Some("two".to_string()),
                Some("three".to_string())
            ]
        );
    }

    #[test]
    fn test_consumed_value_is_not_rescanned() {
        // The value `--name` belongs to the first occurrence.
        let found = occurrences(&long("name:"), None, &args(&["--name", "--name"]));
        assert_eq!(found, vec![Some("--name".to_string())]);
    }

    #[test]
    fn test_empty_arguments() {
        assert!(occurrences(&long("help"), Some(&short("h")), &[]).is_empty());
    }
}
