use anyhow::{anyhow, bail, Context, Result};

struct Node {children: Vec<Node>, metadata: Vec<usize>}

impl Node {
    fn read(nums: &mut impl Iterator<Item = usize>) -> Result<Node> {
        let mut next = || nums.next().ok_or_else(|| anyhow!("license ends mid-node"));
        let (n_children, n_metadata) = (next()?, next()?);
        let children = (0 .. n_children).map(|_| Node::read(nums)).collect::<Result<Vec<_>>>()?;
        let metadata = nums.take(n_metadata).collect::<Vec<_>>();
        if metadata.len() < n_metadata {bail!("license ends mid-metadata")}
        Ok(Node {children, metadata})
    }

    fn metadata_sum(&self) -> usize {
        self.metadata.iter().sum::<usize>() + self.children.iter().map(Node::metadata_sum).sum::<usize>()
    }

    fn value(&self) -> usize {
        if self.children.is_empty() {return self.metadata.iter().sum()}
        self.metadata.iter()
            .filter_map(|&i| self.children.get(i.checked_sub(1)?))
            .map(Node::value)
            .sum()
    }
}

fn parse(input: &str) -> Result<Node> {
    let nums = input.split_whitespace()
        .map(|n| n.parse().with_context(|| format!("bad license number {:?}", n)))
        .collect::<Result<Vec<usize>>>()?;
    let mut nums = nums.into_iter();
    let root = Node::read(&mut nums)?;
    if nums.next().is_some() {bail!("trailing numbers after the root node")}
    Ok(root)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let root = parse(input)?;
    Ok((if part == 1 {root.metadata_sum()} else {root.value()}).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LICENSE: &str = "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2";

    #[test]
    fn sums_metadata() {
        assert_eq!(solve(1, LICENSE).unwrap(), "138");
    }

    #[test]
    fn values_root() {
        assert_eq!(solve(2, LICENSE).unwrap(), "66");
    }

    #[test]
    fn rejects_malformed_trees() {
        assert!(solve(1, "2 3 0 3 10 11").is_err());
        assert!(solve(1, "0 1 5 7").is_err());
    }
}
