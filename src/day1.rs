use anyhow::{bail, Context, Result};
use rustc_hash::FxHashSet;

fn parse(input: &str) -> Result<Vec<i64>> {
    input.split_whitespace()
        .map(|change| change.parse().with_context(|| format!("bad frequency change {:?}", change)))
        .collect()
}

fn first_repeat(changes: &[i64]) -> Result<i64> {
    if changes.is_empty() {bail!("no frequency changes")}
    let mut seen = FxHashSet::default();
    let mut freq = 0;
    for change in changes.iter().cycle() {
        if !seen.insert(freq) {return Ok(freq)}
        freq += change;
    }
    unreachable!()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let changes = parse(input)?;
    if part == 1 {
        Ok(changes.iter().sum::<i64>().to_string())
    } else {
        Ok(first_repeat(&changes)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("+1\n-2\n+3\n+1" => "3")]
    #[test_case("+1\n+1\n+1" => "3")]
    #[test_case("+1\n+1\n-2" => "0")]
    #[test_case("-1\n-2\n-3" => "-6")]
    fn sums_changes(input: &str) -> String {
        solve(1, input).unwrap()
    }

    #[test_case("+1\n-2\n+3\n+1" => "2")]
    #[test_case("+1\n-1" => "0")]
    #[test_case("+3\n+3\n+4\n-2\n-4" => "10")]
    #[test_case("-6\n+3\n+8\n+5\n-6" => "5")]
    #[test_case("+7\n+7\n-2\n-7\n-4" => "14")]
    fn finds_first_repeat(input: &str) -> String {
        solve(2, input).unwrap()
    }

    #[test]
    fn rejects_garbage() {
        assert!(solve(1, "+1\nfoo").is_err());
        assert!(solve(2, "").is_err());
    }
}
