//! The result of a column generation run.

use std::fmt;

use itertools::{izip, Itertools};

use crate::config::EPSILON;
use crate::instance::Instance;
use crate::model::SolutionStatus;
use crate::pattern::Pattern;

/// A generated pattern and the number of stock units cut with it in the integer solution.
#[derive(Clone,Debug,PartialEq)]
pub struct PlanEntry {
    pub pattern : Pattern,
    pub usage   : u64,
}

/// Patterns generated by column generation with their integer usage.
#[derive(Clone,Debug)]
pub struct CuttingPlan {
    /// Status of the final integer solve
    pub status           : SolutionStatus,
    /// Number of times the master relaxation was solved
    pub iterations       : usize,
    /// Objective of the last master relaxation
    pub relaxation_bound : f64,
    /// Objective of the integer master problem, the number of stock units used
    pub stock_used       : f64,
    /// All generated patterns in generation order, the greedy seeds first
    pub entries          : Vec<PlanEntry>,
}

impl CuttingPlan {
    /// Number of stock units used, as an integer.
    pub fn stock_units(&self) -> u64 { self.stock_used.round().max(0.0) as u64 }

    /// Rounded-up relaxation bound. No integer solution over the generated patterns can use fewer
    /// stock units.
    pub fn lower_bound(&self) -> u64 { (self.relaxation_bound - EPSILON).ceil().max(0.0) as u64 }

    pub fn num_patterns(&self) -> usize { self.entries.len() }

    /// Entries with non-zero usage.
    pub fn used(&self) -> impl Iterator<Item = &PlanEntry> { self.entries.iter().filter(|e| e.usage > 0) }

    /// Number of pieces produced of each item type.
    pub fn produced(&self) -> Vec<u64> {
        let n = self.entries.first().map(|e| e.pattern.counts().len()).unwrap_or(0);
        let mut res = vec![0u64; n];
        for e in self.entries.iter() {
            for (r,&c) in izip!(res.iter_mut(),e.pattern.counts().iter()) { *r += c as u64 * e.usage; }
        }
        res
    }

    /// True if every demand of `instance` is covered.
    pub fn satisfies(&self, instance : &Instance) -> bool {
        let produced = self.produced();
        produced.len() == instance.num_items()
            && izip!(produced.iter(),instance.item_demand().iter()).all(|(&p,&d)| p as f64 >= d)
    }
}

impl fmt::Display for CuttingPlan {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f,"Solution status: {:?}",self.status)?;
        writeln!(f,"A total of {} patterns are generated:",self.entries.len())?;
        for (j,e) in self.entries.iter().enumerate() {
            writeln!(f,"Pat {}:\t{}",j,e.pattern.counts().iter().join("\t"))?;
        }
        writeln!(f,"Best integer solution uses {} rolls (relaxation {:.4})",self.stock_units(),self.relaxation_bound)?;
        for (j,e) in self.entries.iter().enumerate() {
            if e.usage > 0 {
                writeln!(f,"Pattern {} = {} [{}]",j,e.usage,e.pattern.counts().iter().join(", "))?;
            }
            else {
                writeln!(f,"Pattern {} = 0",j)?;
            }
        }
        Ok(())
    }
}
