use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::sync::LazyLock;

static GAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+) players; last marble is worth (\d+) points").unwrap()
});

/// Marble circle as a doubly-linked ring; marble `m` lives at index `m`, so
/// `cw[m]`/`ccw[m]` are its clockwise and counter-clockwise neighbours.
struct Circle {cw: Vec<u32>, ccw: Vec<u32>, current: u32}

impl Circle {
    fn with_capacity(marbles: usize) -> Self {
        let mut cw = Vec::with_capacity(marbles + 1);
        let mut ccw = Vec::with_capacity(marbles + 1);
        cw.push(0);
        ccw.push(0);
        Circle {cw, ccw, current: 0}
    }

    /// Places `marble` between the marbles one and two steps clockwise of the current one.
    fn place(&mut self, marble: u32) {
        let left = self.cw[self.current as usize];
        let right = self.cw[left as usize];
        debug_assert_eq!(self.cw.len(), marble as usize);
        self.cw.push(right);
        self.ccw.push(left);
        self.cw[left as usize] = marble;
        self.ccw[right as usize] = marble;
        self.current = marble;
    }

    /// Removes the marble `steps` counter-clockwise of the current one and returns it;
    /// the marble clockwise of it becomes current.
    fn take_back(&mut self, steps: usize) -> u32 {
        let mut taken = self.current;
        for _ in 0 .. steps {taken = self.ccw[taken as usize]}
        let (left, right) = (self.ccw[taken as usize], self.cw[taken as usize]);
        self.cw[left as usize] = right;
        self.ccw[right as usize] = left;
        self.current = right;
        // keep the index-equals-marble layout: the slot stays, unlinked
        self.cw.push(u32::MAX);
        self.ccw.push(u32::MAX);
        taken
    }
}

fn high_score(players: usize, last_marble: u32) -> u64 {
    let mut scores = vec![0u64; players];
    let mut circle = Circle::with_capacity(last_marble as usize);
    for (marble, player) in (1 ..= last_marble).zip((0 .. players).cycle()) {
        if marble % 23 == 0 {
            scores[player] += u64::from(marble) + u64::from(circle.take_back(7));
        } else {
            circle.place(marble);
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let caps = GAME.captures(input.trim()).ok_or_else(|| anyhow!("bad game description {:?}", input.trim()))?;
    let players: usize = caps[1].parse()?;
    let last_marble: u32 = caps[2].parse()?;
    if players == 0 {bail!("a game needs at least one player")}
    let last_marble = if part == 1 {
        last_marble
    } else {
        last_marble.checked_mul(100).ok_or_else(|| anyhow!("last marble {} is too large to play a hundredfold", last_marble))?
    };
    Ok(high_score(players, last_marble).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(9, 25 => 32)]
    #[test_case(10, 1618 => 8317)]
    #[test_case(13, 7999 => 146373)]
    #[test_case(17, 1104 => 2764)]
    #[test_case(21, 6111 => 54718)]
    #[test_case(30, 5807 => 37305)]
    fn scores_published_games(players: usize, last_marble: u32) -> u64 {
        high_score(players, last_marble)
    }

    #[test]
    fn parses_description() {
        assert_eq!(solve(1, "10 players; last marble is worth 1618 points\n").unwrap(), "8317");
        assert!(solve(1, "ten players").is_err());
        assert!(solve(1, "0 players; last marble is worth 25 points").is_err());
        assert!(solve(2, "10 players; last marble is worth 50000000 points").is_err());
    }

    #[test]
    fn ring_stays_consistent() {
        let mut circle = Circle::with_capacity(23);
        for marble in 1 ..= 22 {circle.place(marble)}
        assert_eq!(circle.current, 22);
        assert_eq!(circle.take_back(7), 9);
        assert_eq!(circle.current, 19);
        assert_eq!(circle.ccw[19], 18);
        assert_eq!(circle.cw[18], 19);
    }
}
