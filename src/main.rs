use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod day1;
mod day2;
mod day3;
mod day4;
mod day5;
mod day6;
mod day8;
mod day9;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;

type Solver = fn(u8, &str) -> Result<String>;

#[derive(Debug, Parser)]
#[command(about = "Solutions to the 2018 puzzles")]
struct Args {
    /// Day to run
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Part to run, 1 or 2
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Read `day{D}test{N}.in` instead of the real input
    #[arg(short, long)]
    test: Option<u32>,

    /// Explicit input file, overrides the naming convention
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        match (&self.input, self.test) {
            (Some(path), _) => path.clone(),
            (None, Some(test)) => format!("day{}test{}.in", self.day, test).into(),
            (None, None) => format!("day{}.in", self.day).into(),
        }
    }
}

fn solver(day: u8) -> Option<Solver> {
    let days: [Option<Solver>; 15] = [
        Some(day1::solve), Some(day2::solve), Some(day3::solve), Some(day4::solve),
        Some(day5::solve), Some(day6::solve), None, Some(day8::solve), Some(day9::solve),
        Some(day10::solve), Some(day11::solve), Some(day12::solve), Some(day13::solve),
        Some(day14::solve), Some(day15::solve)
    ];
    days.get(usize::from(day).checked_sub(1)?).copied().flatten()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let solve = solver(args.day).ok_or_else(|| anyhow!("no solution for day {}", args.day))?;
    let fname = args.input_path();
    info!("reading {}", fname.display());
    let input = std::fs::read_to_string(&fname)
        .with_context(|| format!("cannot read {}", fname.display()))?;

    let time = std::time::Instant::now();
    let answer = solve(args.part, &input).with_context(|| format!("day {} part {}", args.day, args.part))?;
    println!("{}", answer);
    info!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsolved_days_have_no_solver() {
        assert!(solver(0).is_none());
        assert!(solver(7).is_none());
        assert!(solver(16).is_none());
        assert!(solver(15).is_some());
    }

    #[test]
    fn input_path_follows_naming_convention() {
        let args = Args::parse_from(["aoc2018", "9", "2"]);
        assert_eq!(args.input_path(), PathBuf::from("day9.in"));
        let args = Args::parse_from(["aoc2018", "15", "1", "--test", "3"]);
        assert_eq!(args.input_path(), PathBuf::from("day15test3.in"));
        let args = Args::parse_from(["aoc2018", "15", "1", "-t", "3", "-i", "maps/arena.txt"]);
        assert_eq!(args.input_path(), PathBuf::from("maps/arena.txt"));
    }

    #[test]
    fn part_outside_range_is_rejected() {
        assert!(Args::try_parse_from(["aoc2018", "1", "3"]).is_err());
        assert!(Args::try_parse_from(["aoc2018", "26", "1"]).is_err());
    }
}
