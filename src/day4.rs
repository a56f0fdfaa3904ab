use anyhow::{anyhow, bail, Result};
use itertools::Itertools;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d+-\d+-\d+ \d+:(\d+)\] (?:Guard #(\d+) begins shift|(falls asleep)|(wakes up))$").unwrap()
});

type Naps = FxHashMap<u32, [u32; 60]>;

/// Tallies, per guard, how often they were asleep at each minute of the midnight hour.
fn tally(input: &str) -> Result<Naps> {
    let mut naps = Naps::default();
    let mut guard = None;
    let mut asleep_since = None;
    for line in input.trim().lines().map(str::trim).sorted_unstable() {
        let caps = ENTRY.captures(line).ok_or_else(|| anyhow!("bad log entry {:?}", line))?;
        let minute: usize = caps[1].parse()?;
        if let Some(id) = caps.get(2) {
            if asleep_since.is_some() {bail!("guard change while asleep at {:?}", line)}
            let id = id.as_str().parse()?;
            naps.entry(id).or_insert([0; 60]);
            guard = Some(id);
        } else if caps.get(3).is_some() {
            if guard.is_none() {bail!("nobody on shift falls asleep at {:?}", line)}
            asleep_since = Some(minute);
        } else {
            let (Some(id), Some(from)) = (guard, asleep_since.take()) else {
                bail!("wake up without falling asleep at {:?}", line)
            };
            if minute < from {bail!("wakes up before falling asleep at {:?}", line)}
            if let Some(minutes) = naps.get_mut(&id) {
                for m in &mut minutes[from .. minute.min(60)] {*m += 1}
            }
        }
    }
    Ok(naps)
}

fn sleepiest_minute(minutes: &[u32; 60]) -> (usize, u32) {
    minutes.iter().copied().enumerate().max_by_key(|&(m, n)| (n, std::cmp::Reverse(m))).unwrap_or((0, 0))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let naps = tally(input)?;
    let (guard, minute) = if part == 1 {
        let (&guard, minutes) = naps.iter()
            .max_by_key(|(_, minutes)| minutes.iter().sum::<u32>())
            .ok_or_else(|| anyhow!("no guards on record"))?;
        (guard, sleepiest_minute(minutes).0)
    } else {
        naps.iter()
            .map(|(&guard, minutes)| (guard, sleepiest_minute(minutes)))
            .max_by_key(|&(_, (_, n))| n)
            .map(|(guard, (minute, _))| (guard, minute))
            .ok_or_else(|| anyhow!("no guards on record"))?
    };
    Ok((guard as usize * minute).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // deliberately shuffled; the log is sorted before tallying
    const LOG: &str = "\
[1518-11-01 00:05] falls asleep
[1518-11-01 00:00] Guard #10 begins shift
[1518-11-01 00:25] wakes up
[1518-11-01 00:30] falls asleep
[1518-11-01 00:55] wakes up
[1518-11-01 23:58] Guard #99 begins shift
[1518-11-02 00:40] falls asleep
[1518-11-02 00:50] wakes up
[1518-11-03 00:05] Guard #10 begins shift
[1518-11-03 00:24] falls asleep
[1518-11-03 00:29] wakes up
[1518-11-04 00:02] Guard #99 begins shift
[1518-11-04 00:36] falls asleep
[1518-11-04 00:46] wakes up
[1518-11-05 00:03] Guard #99 begins shift
[1518-11-05 00:45] falls asleep
[1518-11-05 00:55] wakes up";

    #[test]
    fn tallies_naps() {
        let naps = tally(LOG).unwrap();
        assert_eq!(naps[&10].iter().sum::<u32>(), 50);
        assert_eq!(naps[&10][24], 2);
        assert_eq!(naps[&99][45], 3);
    }

    #[test]
    fn picks_sleepiest_guard() {
        assert_eq!(solve(1, LOG).unwrap(), "240");
    }

    #[test]
    fn picks_most_predictable_guard() {
        assert_eq!(solve(2, LOG).unwrap(), "4455");
    }

    #[test]
    fn rejects_orphan_wake() {
        assert!(solve(1, "[1518-11-01 00:25] wakes up").is_err());
        assert!(solve(1, "[1518-11-01 00:00] Guard #10 begins shift\n[1518-11-01 00:25] wakes up").is_err());
    }

    #[test]
    fn rejects_wake_before_sleep() {
        let log = "\
[1518-11-01 00:00] Guard #1 begins shift
[1518-11-01 00:50] falls asleep
[1518-11-02 00:10] wakes up";
        assert!(solve(1, log).is_err());
    }
}
