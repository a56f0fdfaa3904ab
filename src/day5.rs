use anyhow::{bail, Result};

fn react(polymer: impl Iterator<Item = u8>) -> Vec<u8> {
    let mut stack = Vec::new();
    for unit in polymer {
        if stack.last().is_some_and(|&top: &u8| top ^ unit == 0x20) {
            stack.pop();
        } else {
            stack.push(unit);
        }
    }
    stack
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let polymer = input.trim().as_bytes();
    if let Some(bad) = polymer.iter().find(|b| !b.is_ascii_alphabetic()) {
        bail!("unexpected unit {:?} in polymer", *bad as char);
    }
    if part == 1 {
        Ok(react(polymer.iter().copied()).len().to_string())
    } else {
        // removing a letter never undoes a reaction, so start from the reacted polymer
        let reacted = react(polymer.iter().copied());
        let shortest = (b'a' ..= b'z')
            .map(|skip| react(reacted.iter().copied().filter(|b| b.to_ascii_lowercase() != skip)).len())
            .min()
            .unwrap_or(0);
        Ok(shortest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("aA" => "0")]
    #[test_case("abBA" => "0")]
    #[test_case("abAB" => "4")]
    #[test_case("aabAAB" => "6")]
    #[test_case("dabAcCaCBAcCcaDA" => "10")]
    fn reacts_fully(polymer: &str) -> String {
        solve(1, polymer).unwrap()
    }

    #[test]
    fn removes_worst_unit() {
        assert_eq!(solve(2, "dabAcCaCBAcCcaDA").unwrap(), "4");
    }

    #[test]
    fn rejects_non_letters() {
        assert!(solve(1, "ab1B").is_err());
    }
}
