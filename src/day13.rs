use anyhow::{anyhow, bail, Result};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {Up, Right, Down, Left}

impl Dir {
    fn left(self) -> Dir {match self {Dir::Up => Dir::Left, Dir::Left => Dir::Down, Dir::Down => Dir::Right, Dir::Right => Dir::Up}}
    fn right(self) -> Dir {match self {Dir::Up => Dir::Right, Dir::Right => Dir::Down, Dir::Down => Dir::Left, Dir::Left => Dir::Up}}
    fn vertical(self) -> bool {matches!(self, Dir::Up | Dir::Down)}
}

#[derive(Debug, Clone)]
struct Cart {y: usize, x: usize, dir: Dir, crossings: u8, crashed: bool}

struct Mine {track: Vec<Vec<u8>>, carts: Vec<Cart>}

impl Mine {
    fn parse(input: &str) -> Result<Mine> {
        let mut carts = vec![];
        let track = input.lines().enumerate().map(|(y, line)| {
            line.bytes().enumerate().map(|(x, cell)| {
                let (piece, dir) = match cell {
                    b'^' => (b'|', Some(Dir::Up)),
                    b'v' => (b'|', Some(Dir::Down)),
                    b'<' => (b'-', Some(Dir::Left)),
                    b'>' => (b'-', Some(Dir::Right)),
                    b'|' | b'-' | b'/' | b'\\' | b'+' | b' ' => (cell, None),
                    _ => bail!("unexpected track piece {:?} at {},{}", cell as char, x, y)
                };
                if let Some(dir) = dir {carts.push(Cart {y, x, dir, crossings: 0, crashed: false})}
                Ok(piece)
            }).collect::<Result<Vec<_>>>()
        }).collect::<Result<Vec<_>>>()?;
        Ok(Mine {track, carts})
    }

    fn live_carts(&self) -> impl Iterator<Item = &Cart> {self.carts.iter().filter(|cart| !cart.crashed)}

    fn advance(&self, cart: &mut Cart) -> Result<()> {
        let (y, x) = match cart.dir {
            Dir::Up => (cart.y.checked_sub(1), Some(cart.x)),
            Dir::Down => (Some(cart.y + 1), Some(cart.x)),
            Dir::Left => (Some(cart.y), cart.x.checked_sub(1)),
            Dir::Right => (Some(cart.y), Some(cart.x + 1)),
        };
        let (Some(y), Some(x)) = (y, x) else {bail!("cart at {},{} runs off the map", cart.x, cart.y)};
        let piece = self.track.get(y).and_then(|row| row.get(x)).copied().unwrap_or(b' ');
        cart.dir = match (piece, cart.dir) {
            (b'|', dir) if dir.vertical() => dir,
            (b'-', dir) if !dir.vertical() => dir,
            (b'/', dir) => if dir.vertical() {dir.right()} else {dir.left()},
            (b'\\', dir) => if dir.vertical() {dir.left()} else {dir.right()},
            (b'+', dir) => {
                cart.crossings = (cart.crossings + 1) % 3;
                match cart.crossings {1 => dir.left(), 2 => dir, _ => dir.right()}
            },
            _ => bail!("cart heading {:?} derails at {},{}", cart.dir, x, y)
        };
        (cart.y, cart.x) = (y, x);
        Ok(())
    }

    /// Moves every cart once in reading order. Returns where carts collided this tick;
    /// with `clear_wrecks` both carts leave the track immediately, otherwise the tick stops at the first crash.
    fn tick(&mut self, clear_wrecks: bool) -> Result<Vec<(usize, usize)>> {
        let mut crashes = vec![];
        self.carts.sort_by_key(|cart| (cart.y, cart.x));
        for i in 0 .. self.carts.len() {
            if self.carts[i].crashed {continue}
            let mut cart = self.carts[i].clone();
            self.advance(&mut cart)?;
            self.carts[i] = cart;
            let (y, x) = (self.carts[i].y, self.carts[i].x);
            let hit = (0 .. self.carts.len()).find(|&j| {
                j != i && !self.carts[j].crashed && (self.carts[j].y, self.carts[j].x) == (y, x)
            });
            if let Some(j) = hit {
                debug!("carts crash at {},{}", x, y);
                crashes.push((x, y));
                if !clear_wrecks {break}
                self.carts[i].crashed = true;
                self.carts[j].crashed = true;
            }
        }
        Ok(crashes)
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut mine = Mine::parse(input)?;
    if mine.carts.len() < 2 {bail!("need at least two carts for a crash")}
    if part == 1 {
        loop {
            if let Some(&(x, y)) = mine.tick(false)?.first() {return Ok(format!("{},{}", x, y))}
        }
    } else {
        while mine.live_carts().count() > 1 {
            mine.tick(true)?;
        }
        let last = mine.live_carts().next().ok_or_else(|| anyhow!("every cart crashed"))?;
        Ok(format!("{},{}", last.x, last.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_CRASH: &str = r"/->-\
|   |  /----\
| /-+--+-\  |
| | |  | v  |
\-+-/  \-+--/
  \------/
";

    const LAST_CART: &str = r"/>-<\
|   |
| /<+-\
| | | v
\>+</ |
  |   ^
  \<->/
";

    #[test]
    fn finds_first_crash() {
        assert_eq!(solve(1, FIRST_CRASH).unwrap(), "7,3");
    }

    #[test]
    fn finds_last_cart() {
        assert_eq!(solve(2, LAST_CART).unwrap(), "6,4");
    }

    #[test]
    fn straight_line_crash() {
        assert_eq!(solve(1, "->---<-").unwrap(), "3,0");
        assert!(solve(2, "->---<-").is_err());
    }

    #[test]
    fn blank_row_keeps_row_numbers() {
        let mine = "/----\\\n\\----/\n       \n->---<-";
        assert_eq!(solve(1, mine).unwrap(), "3,3");
    }

    #[test]
    fn rejects_broken_mines() {
        assert!(solve(1, "-->  <-").is_err());
        assert!(solve(1, "->-x-<-").is_err());
        assert!(solve(1, "-->--").is_err());
    }
}
