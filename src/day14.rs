use anyhow::{bail, Context, Result};

/// Endless scoreboard of recipe scores, grown by the two elves one combination at a time.
struct Scoreboard {scores: Vec<u8>, elves: [usize; 2]}

impl Scoreboard {
    fn new() -> Self {Scoreboard {scores: vec![3, 7], elves: [0, 1]}}

    /// Appends the digits of the next combination; returns how many were added.
    fn combine(&mut self) -> usize {
        let sum = self.scores[self.elves[0]] + self.scores[self.elves[1]];
        if sum >= 10 {self.scores.push(sum / 10)}
        self.scores.push(sum % 10);
        for elf in &mut self.elves {
            *elf = (*elf + 1 + self.scores[*elf] as usize) % self.scores.len();
        }
        if sum >= 10 {2} else {1}
    }
}

fn ten_after(skip: usize) -> String {
    let mut board = Scoreboard::new();
    while board.scores.len() < skip + 10 {board.combine();}
    board.scores[skip .. skip + 10].iter().map(|&d| char::from(b'0' + d)).collect()
}

fn recipes_before(pattern: &[u8]) -> usize {
    let mut board = Scoreboard::new();
    // a combination may add two digits, and the pattern can end on either
    let mut checked = 0;
    loop {
        while checked + pattern.len() <= board.scores.len() {
            if board.scores[checked ..].starts_with(pattern) {return checked}
            checked += 1;
        }
        board.combine();
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let input = input.trim();
    if part == 1 {
        let skip = input.parse().with_context(|| format!("bad recipe count {:?}", input))?;
        Ok(ten_after(skip))
    } else {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            bail!("bad score sequence {:?}", input);
        }
        let pattern = input.bytes().map(|b| b - b'0').collect::<Vec<_>>();
        Ok(recipes_before(&pattern).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("9" => "5158916779")]
    #[test_case("5" => "0124515891")]
    #[test_case("18" => "9251071085")]
    #[test_case("2018" => "5941429882")]
    fn scores_after_recipes(input: &str) -> String {
        solve(1, input).unwrap()
    }

    #[test_case("51589" => "9")]
    #[test_case("01245" => "5")]
    #[test_case("92510" => "18")]
    #[test_case("59414" => "2018")]
    fn recipes_before_sequence(input: &str) -> String {
        solve(2, input).unwrap()
    }

    #[test]
    fn combination_adds_one_or_two_digits() {
        let mut board = Scoreboard::new();
        assert_eq!(board.combine(), 2);
        assert_eq!(board.scores, vec![3, 7, 1, 0]);
        assert_eq!(board.elves, [0, 1]);
        assert_eq!(board.combine(), 2);
        assert_eq!(board.elves, [4, 3]);
        assert_eq!(board.combine(), 1);
        assert_eq!(board.scores, vec![3, 7, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn rejects_non_digits() {
        assert!(solve(1, "twelve").is_err());
        assert!(solve(2, "12a").is_err());
    }
}
