use anyhow::{Context, Result};

const GRID: usize = 300;

fn power_level(x: usize, y: usize, serial: i64) -> i64 {
    let rack = x as i64 + 10;
    ((rack * y as i64 + serial) * rack).div_euclid(100).rem_euclid(10) - 5
}

/// Summed-area table: `sums[y][x]` is the total of every cell above and left of
/// (x, y) inclusive, with a zero row and column in front so queries need no edge cases.
struct SummedArea {size: usize, sums: Vec<Vec<i64>>}

impl SummedArea {
    fn new(size: usize, cell: impl Fn(usize, usize) -> i64) -> Self {
        let mut sums = vec![vec![0; size + 1]; size + 1];
        for y in 1 ..= size {
            for x in 1 ..= size {
                sums[y][x] = cell(x, y) + sums[y - 1][x] + sums[y][x - 1] - sums[y - 1][x - 1];
            }
        }
        SummedArea {size, sums}
    }

    /// Total of the `side`×`side` square whose top-left cell is (x, y), 1-based.
    fn square(&self, x: usize, y: usize, side: usize) -> i64 {
        let (x0, y0, x1, y1) = (x - 1, y - 1, x + side - 1, y + side - 1);
        self.sums[y1][x1] - self.sums[y0][x1] - self.sums[y1][x0] + self.sums[y0][x0]
    }

    /// Best square of the given side as (power, x, y); the first one in reading order wins ties.
    fn best_square(&self, side: usize) -> (i64, usize, usize) {
        let mut best = (i64::MIN, 0, 0);
        for y in 1 ..= self.size + 1 - side {
            for x in 1 ..= self.size + 1 - side {
                let power = self.square(x, y, side);
                if power > best.0 {best = (power, x, y)}
            }
        }
        best
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let serial: i64 = input.trim().parse().with_context(|| format!("bad grid serial {:?}", input.trim()))?;
    let table = SummedArea::new(GRID, |x, y| power_level(x, y, serial));
    if part == 1 {
        let (_, x, y) = table.best_square(3);
        Ok(format!("{},{}", x, y))
    } else {
        let (_, x, y, side) = (1 ..= GRID)
            .map(|side| {let (power, x, y) = table.best_square(side); (power, x, y, side)})
            .fold((i64::MIN, 0, 0, 0), |best, cand| if cand.0 > best.0 {cand} else {best});
        Ok(format!("{},{},{}", x, y, side))
    }
}
