use anyhow::{anyhow, bail, Context, Result};
use itertools::{Itertools, MinMaxResult};

const SAFE_DISTANCE: i64 = 10000;

type Point = (i64, i64);

fn parse(input: &str) -> Result<Vec<Point>> {
    input.trim().lines().map(|line| -> Result<Point> {
        let (x, y) = line.split_once(',').ok_or_else(|| anyhow!("bad coordinate {:?}", line))?;
        Ok((
            x.trim().parse().with_context(|| format!("bad x in {:?}", line))?,
            y.trim().parse().with_context(|| format!("bad y in {:?}", line))?
        ))
    }).collect()
}

fn bounds(points: &[Point], axis: impl Fn(&Point) -> i64) -> Result<(i64, i64)> {
    match points.iter().map(axis).minmax() {
        MinMaxResult::NoElements => bail!("no coordinates"),
        MinMaxResult::OneElement(v) => Ok((v, v)),
        MinMaxResult::MinMax(min, max) => Ok((min, max)),
    }
}

fn manhattan((ax, ay): Point, (bx, by): Point) -> i64 {(ax - bx).abs() + (ay - by).abs()}

/// Size of the largest area whose cells all have one unique nearest point,
/// ignoring areas that reach the bounding box and hence extend forever.
fn largest_finite_area(points: &[Point]) -> Result<usize> {
    let (x0, x1) = bounds(points, |p| p.0)?;
    let (y0, y1) = bounds(points, |p| p.1)?;
    let mut areas = vec![Some(0usize); points.len()];
    for (x, y) in (x0 ..= x1).cartesian_product(y0 ..= y1) {
        let nearest = points.iter().map(|&p| manhattan(p, (x, y))).enumerate().min_set_by_key(|&(_, d)| d);
        let &[(owner, _)] = &nearest[..] else {continue};
        if x == x0 || x == x1 || y == y0 || y == y1 {
            areas[owner] = None;
        } else if let Some(area) = &mut areas[owner] {
            *area += 1;
        }
    }
    areas.into_iter().flatten().max().ok_or_else(|| anyhow!("every area is infinite"))
}

/// Number of cells whose total distance to every point stays under `budget`.
fn safe_region_size(points: &[Point], budget: i64) -> Result<usize> {
    let (x0, x1) = bounds(points, |p| p.0)?;
    let (y0, y1) = bounds(points, |p| p.1)?;
    // past this margin a cell is over budget on distance to the box alone
    let margin = budget / points.len() as i64 + 1;
    Ok((x0 - margin ..= x1 + margin).cartesian_product(y0 - margin ..= y1 + margin)
        .filter(|&cell| points.iter().map(|&p| manhattan(p, cell)).sum::<i64>() < budget)
        .count())
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let points = parse(input)?;
    if part == 1 {
        Ok(largest_finite_area(&points)?.to_string())
    } else {
        Ok(safe_region_size(&points, SAFE_DISTANCE)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = "1, 1\n1, 6\n8, 3\n3, 4\n5, 5\n8, 9";

    #[test]
    fn largest_area_ignores_infinite_ones() {
        assert_eq!(solve(1, POINTS).unwrap(), "17");
        let shuffled = "8, 9\n5, 5\n1, 1\n3, 4\n8, 3\n1, 6";
        assert_eq!(solve(1, shuffled).unwrap(), "17");
    }

    #[test]
    fn safe_region_within_budget() {
        assert_eq!(safe_region_size(&parse(POINTS).unwrap(), 32).unwrap(), 16);
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(solve(1, "1; 2").is_err());
        assert!(solve(1, "").is_err());
    }
}
