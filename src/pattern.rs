//! Cutting patterns and the pool of generated patterns.

use std::fmt;

use itertools::Itertools;

use crate::instance::Instance;
use crate::variable::Variable;

/// Number of copies of each item type cut from one stock unit.
#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct Pattern {
    counts : Vec<u32>,
}

impl Pattern {
    pub fn new(counts : Vec<u32>) -> Pattern { Pattern{ counts } }

    /// The greedy single-type seed for item `i`: as many copies of `i` as fit, nothing else.
    pub fn greedy(instance : &Instance, i : usize) -> Pattern {
        let mut counts = vec![0; instance.num_items()];
        counts[i] = instance.max_copies(i);
        Pattern{ counts }
    }

    pub fn counts(&self) -> &[u32] { self.counts.as_slice() }

    /// Counts as floating point column coefficients.
    pub fn coefficients(&self) -> Vec<f64> { self.counts.iter().map(|&c| c as f64).collect() }

    pub fn total_pieces(&self) -> u32 { self.counts.iter().sum() }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.counts.iter().join("-"))
    }
}

/// A pattern and the master problem variable counting how many stock units are cut with it.
#[derive(Clone,Debug)]
pub struct PooledPattern {
    pub pattern : Pattern,
    pub var     : Variable,
}

/// Append-only pool of generated patterns. Each entry carries its own usage variable, so
/// patterns and variables cannot drift apart.
#[derive(Clone,Debug,Default)]
pub struct PatternPool {
    entries : Vec<PooledPattern>,
}

impl PatternPool {
    pub fn new() -> PatternPool { Default::default() }

    pub(crate) fn push(& mut self, pattern : Pattern, var : Variable) {
        self.entries.push(PooledPattern{ pattern, var });
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn get(&self, j : usize) -> Option<&PooledPattern> { self.entries.get(j) }
    pub fn iter(&self) -> std::slice::Iter<'_,PooledPattern> { self.entries.iter() }

    pub fn contains(&self, pattern : &Pattern) -> bool {
        self.entries.iter().any(|e| &e.pattern == pattern)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> { self.entries.iter().map(|e| &e.pattern) }

    /// All usage variables, in pool order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> { self.entries.iter().map(|e| &e.var) }
}

impl<'a> IntoIterator for &'a PatternPool {
    type Item = &'a PooledPattern;
    type IntoIter = std::slice::Iter<'a,PooledPattern>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn greedy_seeds() {
        let inst = Instance::new(17.0,vec![3.0,4.0,5.0],vec![20.0,25.0,30.0]).unwrap();
        let seeds : Vec<Pattern> = (0..3).map(|i| Pattern::greedy(&inst,i)).collect();
        assert_eq!(seeds[0].counts(),&[5,0,0]);
        assert_eq!(seeds[1].counts(),&[0,4,0]);
        assert_eq!(seeds[2].counts(),&[0,0,3]);
        assert!(seeds.iter().all(|p| inst.fits(p.counts())));
        assert_eq!(seeds[2].to_string(),"0-0-3");
        assert_eq!(seeds[1].coefficients(),vec![0.0,4.0,0.0]);
    }

    #[test]
    fn pool_is_aligned() {
        let mut pool = PatternPool::new();
        assert!(pool.is_empty());
        pool.push(Pattern::new(vec![1,2]), Variable::new(vec![7]));
        pool.push(Pattern::new(vec![3,0]), Variable::new(vec![8]));
        assert_eq!(pool.len(),2);
        assert!(pool.contains(&Pattern::new(vec![3,0])));
        assert!(!pool.contains(&Pattern::new(vec![0,3])));
        let vars : Vec<usize> = pool.variables().map(|v| v.indexes()[0]).collect();
        assert_eq!(vars,vec![7,8]);
        assert_eq!(pool.get(1).unwrap().pattern.total_pieces(),3);
    }
}
