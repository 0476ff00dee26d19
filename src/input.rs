//! Reading and writing the contest text format.
//!
//! Input is whitespace-separated integers: the number of cases `T`, then for
//! each case the number of resources `N` followed by `N` groups of `faces`
//! values. Output is one `Case #i: L` line per case, numbered from 1.

use std::fmt::Write as _;

use crate::catalog::{Resource, ResourceCatalog};
use crate::error::{Error, Result};

/// Faces per die in the reference dice problem.
pub const DEFAULT_FACES: usize = 6;

struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().enumerate(),
            consumed: 0,
        }
    }

    fn next_i64(&mut self, what: &str) -> Result<i64> {
        let Some((pos, raw)) = self.inner.next() else {
            return Err(Error::Parse {
                token: self.consumed,
                message: format!("unexpected end of input, expected {what}"),
            });
        };
        self.consumed = pos + 1;
        raw.parse::<i64>().map_err(|_| Error::Parse {
            token: pos,
            message: format!("expected {what}, found '{raw}'"),
        })
    }

    fn next_count(&mut self, what: &str) -> Result<usize> {
        let pos = self.consumed;
        let value = self.next_i64(what)?;
        usize::try_from(value).map_err(|_| Error::Parse {
            token: pos,
            message: format!("{what} must be non-negative, found {value}"),
        })
    }
}

/// Parse every case of `text`, each resource offering `faces` values.
///
/// # Errors
/// [`Error::Parse`] on malformed or truncated input or trailing tokens,
/// [`Error::InvalidInput`] if `faces` is zero.
pub fn parse_instances(text: &str, faces: usize) -> Result<Vec<ResourceCatalog>> {
    if faces == 0 {
        return Err(Error::invalid_input("resources must offer at least one face"));
    }

    let mut tokens = Tokens::new(text);
    let cases = tokens.next_count("case count")?;
    let mut instances = Vec::with_capacity(cases.min(1 << 16));

    for _ in 0..cases {
        let count = tokens.next_count("resource count")?;
        let mut resources = Vec::with_capacity(count.min(1 << 16));
        for id in 0..count {
            let values = (0..faces)
                .map(|_| tokens.next_i64("face value"))
                .collect::<Result<Vec<_>>>()?;
            resources.push(Resource::new(id, values));
        }
        instances.push(ResourceCatalog::new(resources));
    }

    if let Some((pos, raw)) = tokens.inner.next() {
        return Err(Error::Parse {
            token: pos,
            message: format!("unexpected trailing token '{raw}'"),
        });
    }
    Ok(instances)
}

/// Render one `Case #i: L` line per length.
pub fn format_results(lengths: &[i64]) -> String {
    let mut out = String::new();
    for (idx, length) in lengths.iter().enumerate() {
        let _ = writeln!(out, "Case #{}: {}", idx + 1, length);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3
4
4 8 15 16 23 42
8 6 7 5 30 9
1 2 3 4 55 6
2 10 18 36 54 86
2
1 2 3 4 5 6
60 50 40 30 20 10
3
1 2 3 4 5 6
1 2 3 4 5 6
1 4 2 6 5 3
";

    #[test]
    fn parses_sample() {
        let instances = parse_instances(SAMPLE, DEFAULT_FACES).unwrap();
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].len(), 4);
        assert_eq!(instances[1].len(), 2);
        assert_eq!(
            instances[0].get(1).map(|r| r.values.clone()),
            Some(vec![8, 6, 7, 5, 30, 9])
        );
    }

    #[test]
    fn custom_face_count() {
        let instances = parse_instances("1 2  1 2  3 4", 2).unwrap();
        assert_eq!(instances[0].len(), 2);
        assert_eq!(instances[0].get(1).map(|r| r.values.clone()), Some(vec![3, 4]));
    }

    #[test]
    fn truncated_input() {
        let err = parse_instances("1 2 1 2 3", 2).unwrap_err();
        assert!(matches!(err, Error::Parse { token: 5, .. }), "{err}");
    }

    #[test]
    fn non_numeric_token() {
        let err = parse_instances("1 1 x", 1).unwrap_err();
        assert_eq!(
            err,
            Error::Parse {
                token: 2,
                message: "expected face value, found 'x'".into()
            }
        );
    }

    #[test]
    fn negative_count_rejected() {
        assert!(matches!(
            parse_instances("-1", 6),
            Err(Error::Parse { token: 0, .. })
        ));
    }

    #[test]
    fn trailing_tokens_rejected() {
        assert!(parse_instances("1 1 7 9", 1).is_err());
    }

    #[test]
    fn zero_faces_rejected() {
        assert!(matches!(
            parse_instances("0", 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn formats_cases_from_one() {
        assert_eq!(format_results(&[4, 1, 3]), "Case #1: 4\nCase #2: 1\nCase #3: 3\n");
        assert_eq!(format_results(&[]), "");
    }
}
