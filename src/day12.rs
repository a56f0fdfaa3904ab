use anyhow::{anyhow, bail, Result};
use bitvec::prelude::*;
use log::debug;

const SHORT_RUN: u64 = 20;
const LONG_RUN: u64 = 50_000_000_000;

type Rules = BitArr!(for 32);

/// Row of pots trimmed to the span between the outermost plants; `offset` is the pot number of bit 0.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pots {plants: BitVec, offset: i64}

impl Pots {
    fn trimmed(plants: &BitSlice, offset: i64) -> Pots {
        match (plants.first_one(), plants.last_one()) {
            (Some(first), Some(last)) => Pots {plants: plants[first ..= last].to_bitvec(), offset: offset + first as i64},
            _ => Pots {plants: BitVec::new(), offset},
        }
    }

    fn has_plant(&self, ix: isize) -> bool {
        usize::try_from(ix).ok().and_then(|ix| self.plants.get(ix).map(|bit| *bit)).unwrap_or(false)
    }

    fn step(&self, rules: &Rules) -> Pots {
        // a pot more than two away from every plant sees only empty neighbours and stays empty
        let mut next = BitVec::with_capacity(self.plants.len() + 4);
        for center in -2 .. self.plants.len() as isize + 2 {
            let pattern = (center - 2 ..= center + 2).fold(0, |acc, ix| acc << 1 | self.has_plant(ix) as usize);
            next.push(rules[pattern]);
        }
        Pots::trimmed(&next, self.offset - 2)
    }

    fn checksum(&self) -> i64 {
        self.plants.iter_ones().map(|ix| ix as i64 + self.offset).sum()
    }
}

fn parse(input: &str) -> Result<(Pots, Rules)> {
    let mut lines = input.trim().lines();
    let initial = lines.next()
        .and_then(|line| line.trim().strip_prefix("initial state: "))
        .ok_or_else(|| anyhow!("missing initial state"))?;
    let plants = initial.chars().map(|c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        _ => Err(anyhow!("bad pot {:?} in initial state", c)),
    }).collect::<Result<BitVec>>()?;

    let mut rules = bitarr![0; 32];
    for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
        let Some((pattern, outcome)) = line.split_once(" => ") else {bail!("bad rule {:?}", line)};
        if pattern.len() != 5 || !pattern.chars().chain(outcome.chars()).all(|c| c == '#' || c == '.') {
            bail!("bad rule {:?}", line);
        }
        let ix = pattern.chars().fold(0, |acc, c| acc << 1 | (c == '#') as usize);
        rules.set(ix, outcome == "#");
    }
    if rules[0] {bail!("empty pots sprouting would fill an infinite row")}
    Ok((Pots::trimmed(&plants, 0), rules))
}

/// Pot-number sum after `generations`; once a generation is the previous one shifted,
/// the shift repeats forever and the rest is extrapolated.
fn grow(mut pots: Pots, rules: &Rules, generations: u64) -> i64 {
    for generation in 1 ..= generations {
        let next = pots.step(rules);
        if next.plants == pots.plants {
            let shift = next.offset - pots.offset;
            debug!("pattern settles at generation {}, drifting {} per generation", generation, shift);
            let remaining = (generations - generation) as i64;
            return next.checksum() + remaining * shift * next.plants.count_ones() as i64;
        }
        pots = next;
    }
    pots.checksum()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (pots, rules) = parse(input)?;
    let generations = if part == 1 {SHORT_RUN} else {LONG_RUN};
    Ok(grow(pots, &rules, generations).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARDEN: &str = "\
initial state: #..#.#..##......###...###

...## => #
..#.. => #
.#... => #
.#.#. => #
.#.## => #
.##.. => #
.#### => #
#.#.# => #
#.### => #
##.#. => #
##.## => #
###.. => #
###.# => #
####. => #";

    #[test]
    fn first_generation_matches_worked_example() {
        let (pots, rules) = parse(GARDEN).unwrap();
        let next = pots.step(&rules);
        // "...#...#....#.....#..#..#..#..........." from pot -3
        assert_eq!(next.offset, 0);
        assert_eq!(next.plants.iter_ones().collect::<Vec<_>>(), vec![0, 4, 9, 15, 18, 21, 24]);
    }

    #[test]
    fn sums_after_twenty_generations() {
        assert_eq!(solve(1, GARDEN).unwrap(), "325");
    }

    #[test]
    fn extrapolates_drifting_pattern() {
        assert_eq!(solve(2, GARDEN).unwrap(), "999999999374");
    }

    #[test]
    fn rejects_bad_garden() {
        assert!(solve(1, "state: #..#").is_err());
        assert!(solve(1, "initial state: #..#\n\n..#. => #").is_err());
        assert!(solve(1, "initial state: #..#\n\n..... => #").is_err());
    }
}
