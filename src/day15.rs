//! Elves and Goblins fighting it out on a walled grid.
//!
//! Units act one at a time in reading order: attack an adjacent enemy if there is
//! one, otherwise step once toward the nearest square next to an enemy and try again.
//! Combat ends the moment a unit finds no enemy left; that round does not count.

use anyhow::{anyhow, Result};
use arrayvec::ArrayVec;
use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HIT_POINTS: i32 = 200;
pub const ATTACK_POWER: i32 = 3;

/// Grid position. The derived ordering is reading order: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {pub row: usize, pub col: usize}

impl Pos {
    pub fn new(row: usize, col: usize) -> Pos {Pos {row, col}}

    /// Orthogonal neighbours, in reading order.
    fn neighbours(self) -> ArrayVec<Pos, 4> {
        let mut around = ArrayVec::new();
        if self.row > 0 {around.push(Pos::new(self.row - 1, self.col))}
        if self.col > 0 {around.push(Pos::new(self.row, self.col - 1))}
        around.push(Pos::new(self.row, self.col + 1));
        around.push(Pos::new(self.row + 1, self.col));
        around
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terrain {Wall, Floor}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {Elf, Goblin}

impl Faction {
    fn symbol(self) -> char {match self {Faction::Elf => 'E', Faction::Goblin => 'G'}}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("the map is empty")]
    Empty,
    #[error("unexpected symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {symbol: char, row: usize, col: usize},
    #[error("row {row} is {found} wide, expected {expected}")]
    Ragged {row: usize, expected: usize, found: usize},
}

/// Terrain only; fixed once loaded. Anything off the map counts as wall.
#[derive(Debug, Clone)]
struct Board {width: usize, cells: Vec<Terrain>}

impl Board {
    fn height(&self) -> usize {self.cells.len() / self.width}

    fn terrain(&self, pos: Pos) -> Terrain {
        if pos.col >= self.width {return Terrain::Wall}
        self.cells.get(pos.row * self.width + pos.col).copied().unwrap_or(Terrain::Wall)
    }
}

/// A loaded map: the board plus who starts where, in reading order.
#[derive(Debug, Clone)]
pub struct Scenario {board: Board, roster: Vec<(Faction, Pos)>}

impl FromStr for Scenario {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Scenario, MapError> {
        // blank lines around the map are dropped; a blank line inside it is a zero-width row
        let lines = s.lines().map(str::trim).collect::<Vec<_>>();
        let Some(top) = lines.iter().position(|line| !line.is_empty()) else {return Err(MapError::Empty)};
        let bottom = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(top);
        let rows = &lines[top ..= bottom];
        let width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        let mut roster = vec![];
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {return Err(MapError::Ragged {row, expected: width, found})}
            for (col, symbol) in line.chars().enumerate() {
                cells.push(match symbol {
                    '#' => Terrain::Wall,
                    '.' => Terrain::Floor,
                    'E' => {roster.push((Faction::Elf, Pos::new(row, col))); Terrain::Floor},
                    'G' => {roster.push((Faction::Goblin, Pos::new(row, col))); Terrain::Floor},
                    _ => return Err(MapError::UnknownSymbol {symbol, row, col}),
                });
            }
        }
        Ok(Scenario {board: Board {width, cells}, roster})
    }
}

/// Attack power per faction for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Powers {pub elf: i32, pub goblin: i32}

impl Default for Powers {
    fn default() -> Self {Powers {elf: ATTACK_POWER, goblin: ATTACK_POWER}}
}

impl Powers {
    fn of(&self, faction: Faction) -> i32 {match faction {Faction::Elf => self.elf, Faction::Goblin => self.goblin}}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {pub id: usize, pub faction: Faction, pub pos: Pos, pub hp: i32, pub attack: i32}

impl Unit {
    pub fn alive(&self) -> bool {self.hp > 0}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {pub rounds: u32, pub hit_points: i32, pub winner: Option<Faction>, pub elf_losses: usize}

impl Outcome {
    /// Full rounds times the hit points left standing.
    pub fn score(&self) -> i64 {i64::from(self.rounds) * i64::from(self.hit_points)}
}

/// One run of combat. Units are indexed by id and never removed; the dead just
/// drop out of `occupancy`, which maps every square to the living unit on it.
pub struct Battle<'a> {board: &'a Board, units: Vec<Unit>, occupancy: FxHashMap<Pos, usize>, rounds: u32}

impl<'a> Battle<'a> {
    pub fn new(scenario: &'a Scenario, powers: Powers) -> Self {
        let mut battle = Battle {board: &scenario.board, units: vec![], occupancy: FxHashMap::default(), rounds: 0};
        for &(faction, pos) in &scenario.roster {
            battle.spawn(faction, pos, powers.of(faction));
        }
        battle
    }

    /// Adds a fresh unit; ids count up from zero in creation order.
    fn spawn(&mut self, faction: Faction, pos: Pos, attack: i32) -> usize {
        let id = self.units.len();
        self.units.push(Unit {id, faction, pos, hp: HIT_POINTS, attack});
        self.occupancy.insert(pos, id);
        id
    }

    pub fn rounds(&self) -> u32 {self.rounds}

    pub fn living(&self) -> impl Iterator<Item = &Unit> {self.units.iter().filter(|unit| unit.alive())}

    pub fn losses(&self, faction: Faction) -> usize {
        self.units.iter().filter(|unit| unit.faction == faction && !unit.alive()).count()
    }

    fn is_free(&self, pos: Pos) -> bool {
        self.board.terrain(pos) == Terrain::Floor && !self.occupancy.contains_key(&pos)
    }

    fn enemy_at(&self, pos: Pos, faction: Faction) -> Option<usize> {
        self.occupancy.get(&pos).copied().filter(|&id| self.units[id].faction != faction)
    }

    /// Adjacent enemy with the fewest hit points; reading order breaks ties.
    fn target(&self, id: usize) -> Option<usize> {
        let unit = &self.units[id];
        unit.pos.neighbours().into_iter()
            .filter_map(|pos| self.enemy_at(pos, unit.faction))
            .min_by_key(|&enemy| (self.units[enemy].hp, self.units[enemy].pos))
    }

    /// Breadth-first step counts from `from` over free floor.
    fn distances(&self, from: Pos) -> FxHashMap<Pos, u32> {
        let mut dist = FxHashMap::default();
        dist.insert(from, 0);
        let mut queue = VecDeque::from([(from, 0)]);
        while let Some((pos, d)) = queue.pop_front() {
            for next in pos.neighbours() {
                if self.is_free(next) && !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }
        dist
    }

    /// Where the unit steps toward the closest reachable square next to an enemy.
    /// Ties go to the destination first in reading order, then to the first such step.
    fn step_toward_enemy(&self, id: usize) -> Option<Pos> {
        let unit = &self.units[id];
        let reach = self.distances(unit.pos);
        let (dist, dest) = self.living()
            .filter(|other| other.faction != unit.faction)
            .flat_map(|enemy| enemy.pos.neighbours())
            .filter_map(|pos| Some((*reach.get(&pos)?, pos)))
            .filter(|&(d, _)| d > 0)
            .min()?;
        let back = self.distances(dest);
        unit.pos.neighbours().into_iter().filter(|pos| back.get(pos) == Some(&(dist - 1))).min()
    }

    fn relocate(&mut self, id: usize, to: Pos) {
        let from = std::mem::replace(&mut self.units[id].pos, to);
        self.occupancy.remove(&from);
        self.occupancy.insert(to, id);
        trace!("unit {} moves {:?} -> {:?}", id, from, to);
    }

    fn strike(&mut self, attacker: usize, victim: usize) {
        let power = self.units[attacker].attack;
        let unit = &mut self.units[victim];
        unit.hp -= power;
        let (pos, faction, hp) = (unit.pos, unit.faction, unit.hp);
        trace!("unit {} hits unit {} for {}, {} hp left", attacker, victim, power, hp);
        if hp <= 0 {
            self.occupancy.remove(&pos);
            debug!("round {}: {:?} {} falls at {:?}", self.rounds + 1, faction, victim, pos);
        }
    }

    /// Plays out one unit's turn. Returns false, doing nothing, when no enemy is left anywhere.
    fn take_turn(&mut self, id: usize) -> bool {
        let faction = self.units[id].faction;
        if !self.living().any(|unit| unit.faction != faction) {return false}
        let target = self.target(id).or_else(|| {
            let step = self.step_toward_enemy(id)?;
            self.relocate(id, step);
            self.target(id)
        });
        if let Some(victim) = target {self.strike(id, victim)}
        true
    }

    /// Plays one round. Returns false if combat ended partway, in which case the round is not counted.
    pub fn round(&mut self) -> bool {
        let order = self.living().sorted_by_key(|unit| unit.pos).map(|unit| unit.id).collect_vec();
        for id in order {
            if !self.units[id].alive() {continue}
            if !self.take_turn(id) {return false}
        }
        self.rounds += 1;
        true
    }

    fn outcome(&self) -> Outcome {
        Outcome {
            rounds: self.rounds,
            hit_points: self.living().map(|unit| unit.hp).sum(),
            winner: self.living().next().map(|unit| unit.faction),
            elf_losses: self.losses(Faction::Elf),
        }
    }

    fn log_round(&self) {
        let (elves, goblins) = self.living().fold((0, 0), |(e, g), unit| match unit.faction {
            Faction::Elf => (e + 1, g),
            Faction::Goblin => (e, g + 1),
        });
        debug!("after round {}: {} elves, {} goblins", self.rounds(), elves, goblins);
    }

    /// Fights until one faction is gone.
    pub fn fight(mut self) -> Outcome {
        while self.round() {self.log_round()}
        self.outcome()
    }

    /// Fights like `fight`, but abandons the run once `faction` has lost anyone.
    pub fn fight_without_losses(mut self, faction: Faction) -> Option<Outcome> {
        loop {
            let more = self.round();
            if self.losses(faction) > 0 {return None}
            if !more {return Some(self.outcome())}
            self.log_round();
        }
    }
}

impl fmt::Display for Battle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = (0 .. self.board.height()).map(|row| {
            (0 .. self.board.width).map(|col| {
                let pos = Pos::new(row, col);
                match (self.occupancy.get(&pos), self.board.terrain(pos)) {
                    (Some(&id), _) => self.units[id].faction.symbol(),
                    (None, Terrain::Wall) => '#',
                    (None, Terrain::Floor) => '.',
                }
            }).collect::<String>()
        });
        write!(f, "{}", rows.format("\n"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {pub elf_power: i32, pub outcome: Outcome}

/// Lowest Elf attack power above the default at which every Elf survives; Goblins keep the default.
pub fn calibrate(scenario: &Scenario) -> Option<Calibration> {
    (ATTACK_POWER + 1 ..= HIT_POINTS).find_map(|elf_power| {
        let powers = Powers {elf: elf_power, goblin: ATTACK_POWER};
        let outcome = Battle::new(scenario, powers).fight_without_losses(Faction::Elf);
        debug!("elf power {}: {}", elf_power, if outcome.is_some() {"no losses"} else {"an elf falls"});
        outcome.map(|outcome| Calibration {elf_power, outcome})
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let scenario: Scenario = input.parse()?;
    let score = if part == 1 {
        let outcome = Battle::new(&scenario, Powers::default()).fight();
        debug!("{:?} win after {} rounds, {} elves lost", outcome.winner, outcome.rounds, outcome.elf_losses);
        outcome.score()
    } else {
        let calibration = calibrate(&scenario).ok_or_else(|| anyhow!("the elves cannot win without losses"))?;
        debug!("elves need attack power {}", calibration.elf_power);
        calibration.outcome.score()
    };
    Ok(score.to_string())
}
