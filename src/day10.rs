use anyhow::{anyhow, bail, Result};
use itertools::{Itertools, MinMaxResult};
use log::debug;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

static STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^position=<\s*(-?\d+),\s*(-?\d+)>\s*velocity=<\s*(-?\d+),\s*(-?\d+)>$").unwrap()
});

#[derive(Debug, Clone, Copy)]
struct Star {x: i64, y: i64, vx: i64, vy: i64}

impl Star {
    fn at(&self, t: i64) -> (i64, i64) {(self.x + t * self.vx, self.y + t * self.vy)}
}

fn parse(input: &str) -> Result<Vec<Star>> {
    input.trim().lines().map(|line| -> Result<Star> {
        let caps = STAR.captures(line.trim()).ok_or_else(|| anyhow!("bad star {:?}", line))?;
        Ok(Star {x: caps[1].parse()?, y: caps[2].parse()?, vx: caps[3].parse()?, vy: caps[4].parse()?})
    }).collect()
}

fn span(values: impl Iterator<Item = i64>) -> (i64, i64) {
    match values.minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}

fn height_at(stars: &[Star], t: i64) -> i64 {
    let (top, bottom) = span(stars.iter().map(|s| s.at(t).1));
    bottom - top
}

/// The second at which the sky is shortest; the stars converge until then and scatter after.
fn alignment(stars: &[Star]) -> Result<i64> {
    if stars.is_empty() {bail!("no stars")}
    let mut t = 0;
    let mut height = height_at(stars, 0);
    loop {
        let next = height_at(stars, t + 1);
        if next >= height {break}
        (t, height) = (t + 1, next);
    }
    debug!("stars align after {} s, message is {} rows tall", t, height + 1);
    Ok(t)
}

fn render(stars: &[Star], t: i64) -> String {
    let lit = stars.iter().map(|s| s.at(t)).collect::<FxHashSet<_>>();
    let (left, right) = span(lit.iter().map(|p| p.0));
    let (top, bottom) = span(lit.iter().map(|p| p.1));
    (top ..= bottom).map(|y|
        (left ..= right).map(|x| if lit.contains(&(x, y)) {'#'} else {'.'}).collect::<String>()
    ).join("\n")
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let stars = parse(input)?;
    let t = alignment(&stars)?;
    Ok(if part == 1 {render(&stars, t)} else {t.to_string()})
}
