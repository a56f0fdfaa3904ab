use anyhow::{anyhow, Result};
use itertools::Itertools;

fn checksum(ids: &[&str]) -> usize {
    let (twos, threes) = ids.iter().fold((0, 0), |(twos, threes), id| {
        let counts = id.chars().counts();
        (
            twos + counts.values().any(|&n| n == 2) as usize,
            threes + counts.values().any(|&n| n == 3) as usize
        )
    });
    twos * threes
}

fn common_letters(ids: &[&str]) -> Option<String> {
    ids.iter().tuple_combinations().find_map(|(a, b)| {
        if a.len() != b.len() {return None}
        let common = a.chars().zip(b.chars()).filter(|(x, y)| x == y).map(|(x, _)| x).collect::<String>();
        (common.len() + 1 == a.len()).then_some(common)
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let ids = input.split_whitespace().collect::<Vec<_>>();
    if part == 1 {
        Ok(checksum(&ids).to_string())
    } else {
        common_letters(&ids).ok_or_else(|| anyhow!("no two ids differ by exactly one letter"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_multiplies_doubles_and_triples() {
        let ids = "abcdef\nbababc\nabbcde\nabcccd\naabcdd\nabcdee\nababab";
        assert_eq!(solve(1, ids).unwrap(), "12");
    }

    #[test]
    fn finds_near_twins() {
        let ids = "abcde\nfghij\nklmno\npqrst\nfguij\naxcye\nwvxyz";
        assert_eq!(solve(2, ids).unwrap(), "fgij");
        assert!(solve(2, "abc\nxyz").is_err());
    }
}
