//! The column generation driver.
//!
//! The run moves through four phases:
//! - `Seeding`: build the master problem with the greedy single-type patterns and the pricing
//!   problem with its capacity row.
//! - `Iterating`: solve the master relaxation, price its duals, and add the priced pattern as a
//!   new column as long as its reduced cost `1 - value` is below `-tolerance`.
//! - `Converting`: make all usage variables integer and solve the master once more.
//! - `Done`: the plan is handed to the reporter and returned.
//!
//! The integer solve only uses the columns generated for the relaxation, so the plan is a
//! heuristic solution; it is not proven optimal.

use crate::config::Config;
use crate::error::Result;
use crate::instance::Instance;
use crate::master::RestrictedMaster;
use crate::model::BaseModelTrait;
use crate::plan::{CuttingPlan, PlanEntry};
use crate::pricing::{PricingProblem, PricingSolution};
use crate::pattern::PatternPool;
use crate::report::{LogReporter, Reporter};

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Phase {
    Seeding,
    Iterating,
    Converting,
    Done
}

fn enter(phase : & mut Phase, next : Phase) {
    log::debug!("{:?} -> {:?}",phase,next);
    *phase = next;
}

/// Gilmore-Gomory column generation for one instance.
#[derive(Clone,Debug)]
pub struct ColumnGeneration {
    instance : Instance,
    config   : Config,
}

impl ColumnGeneration {
    pub fn new(instance : Instance, config : Config) -> ColumnGeneration {
        ColumnGeneration{ instance, config }
    }

    pub fn instance(&self) -> &Instance { &self.instance }
    pub fn config(&self) -> &Config { &self.config }

    /// True if a pattern with dual-weighted `value` has negative reduced cost beyond the
    /// tolerance.
    pub fn improves(&self, value : f64) -> bool {
        value > 1.0 + self.config.tolerance
    }

    /// Decide whether the priced pattern becomes a new column.
    fn accept(&self, pool : &PatternPool, priced : &PricingSolution) -> bool {
        if !self.improves(priced.value) {
            return false;
        }
        if self.config.skip_duplicates && pool.contains(&priced.pattern) {
            log::warn!("Pricing returned pattern {} which is already in the pool (value {}), stopping",priced.pattern,priced.value);
            return false;
        }
        true
    }

    /// Run with default constructed backends and log reporting.
    pub fn solve<T>(&self) -> Result<CuttingPlan> where T : BaseModelTrait+Default {
        self.run(T::default(), T::default(), & mut LogReporter)
    }

    /// Run column generation.
    ///
    /// # Arguments
    /// - `master_backend` Backend for the master problem; it must provide dual values for
    ///   continuous problems and solve the final integer problem.
    /// - `pricing_backend` Backend for the integer knapsack pricing problem.
    /// - `reporter` Receives iteration values, new columns and the final plan.
    ///
    /// # Returns
    /// The generated patterns with their integer usage. Both backends are dropped before
    /// returning, also on errors.
    pub fn run<M,P,R>(&self, master_backend : M, pricing_backend : P, reporter : & mut R) -> Result<CuttingPlan>
        where
            M : BaseModelTrait,
            P : BaseModelTrait,
            R : Reporter+?Sized
    {
        let mut phase = Phase::Seeding;
        let mut master = RestrictedMaster::new(&self.instance, master_backend)?;
        let mut pricing = PricingProblem::new(&self.instance, pricing_backend)?;
        enter(& mut phase, Phase::Iterating);

        let mut iterations = 0;
        let mut relaxation_bound = f64::INFINITY;
        while phase == Phase::Iterating {
            iterations += 1;
            let relaxation = master.solve_relaxation()?;
            relaxation_bound = relaxation.objective;
            reporter.iteration(iterations, &relaxation);

            let priced = pricing.solve(relaxation.duals.as_slice())?;
            if self.accept(master.pool(), &priced) {
                reporter.new_column(iterations, &priced);
                master.add_column(priced.pattern)?;
            }
            else {
                log::debug!("Iteration {}: best pattern value {} does not improve",iterations,priced.value);
                enter(& mut phase, Phase::Converting);
            }
        }

        let fin = master.finalize_integer()?;
        if let Some(dir) = &self.config.dump_dir {
            fin.write_problem(dir.join("master.lp"))?;
            pricing.write_problem(dir.join("pricing.lp"))?;
        }
        drop(pricing);

        let (pool,solution) = fin.into_parts();
        let entries = pool.iter()
            .zip(solution.usage.iter())
            .map(|(e,&u)| PlanEntry{ pattern : e.pattern.clone(), usage : u.round().max(0.0) as u64 })
            .collect();
        let plan = CuttingPlan{
            status : solution.status,
            iterations,
            relaxation_bound,
            stock_used : solution.objective,
            entries,
        };
        enter(& mut phase, Phase::Done);
        reporter.done(&plan);
        Ok(plan)
    }
}
