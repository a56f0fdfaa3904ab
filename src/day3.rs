use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::sync::LazyLock;

static CLAIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Claim {id: usize, left: usize, top: usize, width: usize, height: usize}

impl Claim {
    fn parse(line: &str) -> Result<Claim> {
        let caps = CLAIM.captures(line.trim()).ok_or_else(|| anyhow!("bad claim {:?}", line))?;
        let field = |i: usize| caps[i].parse::<usize>().with_context(|| format!("bad number in claim {:?}", line));
        Ok(Claim {id: field(1)?, left: field(2)?, top: field(3)?, width: field(4)?, height: field(5)?})
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.top .. self.top + self.height).flat_map(move |y| (self.left .. self.left + self.width).map(move |x| (x, y)))
    }
}

/// Claim count per square inch, row-major over the smallest sheet covering every claim.
struct Fabric {width: usize, cover: Vec<u16>}

impl Fabric {
    fn new(claims: &[Claim]) -> Self {
        let width = claims.iter().map(|c| c.left + c.width).max().unwrap_or(0);
        let height = claims.iter().map(|c| c.top + c.height).max().unwrap_or(0);
        let mut cover = vec![0u16; width * height];
        for (x, y) in claims.iter().flat_map(|claim| claim.cells()) {
            cover[y * width + x] += 1;
        }
        Fabric {width, cover}
    }

    fn at(&self, (x, y): (usize, usize)) -> u16 {self.cover[y * self.width + x]}
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let claims = input.trim().lines().map(Claim::parse).collect::<Result<Vec<_>>>()?;
    let fabric = Fabric::new(&claims);
    if part == 1 {
        Ok(fabric.cover.iter().filter(|&&n| n > 1).count().to_string())
    } else {
        claims.iter()
            .find(|claim| claim.cells().all(|cell| fabric.at(cell) == 1))
            .map(|claim| claim.id.to_string())
            .ok_or_else(|| anyhow!("every claim overlaps another"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAIMS: &str = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2";

    #[test]
    fn parses_claim() {
        assert_eq!(
            Claim::parse("#1 @ 2,3: 4x5").unwrap(),
            Claim {id: 1, left: 2, top: 3, width: 4, height: 5}
        );
        assert!(Claim::parse("abcde").is_err());
    }

    #[test]
    fn counts_contested_inches() {
        assert_eq!(solve(1, CLAIMS).unwrap(), "4");
        assert_eq!(solve(1, "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2\n#4 @ 3,4: 2x2").unwrap(), "6");
    }

    #[test]
    fn finds_intact_claim() {
        assert_eq!(solve(2, CLAIMS).unwrap(), "3");
        assert!(solve(2, "#1 @ 0,0: 2x2\n#2 @ 1,1: 2x2").is_err());
    }
}
