//! Progress reporting hooks for column generation.

use itertools::Itertools;

use crate::master::RelaxationSolution;
use crate::plan::CuttingPlan;
use crate::pricing::PricingSolution;

/// Receives the values produced during a run. All hooks default to doing nothing.
pub trait Reporter {
    /// Called after the master relaxation of iteration `iter` (counting from 1) was solved.
    fn iteration(& mut self, _iter : usize, _relaxation : &RelaxationSolution) {}
    /// Called when the pricing pattern of iteration `iter` is added as a new column.
    fn new_column(& mut self, _iter : usize, _priced : &PricingSolution) {}
    /// Called once with the final plan.
    fn done(& mut self, _plan : &CuttingPlan) {}
}

/// The silent reporter.
impl Reporter for () {}

/// Reports through the `log` facade: iterations and columns at debug level, the final plan at
/// info level.
#[derive(Clone,Copy,Debug,Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn iteration(& mut self, iter : usize, relaxation : &RelaxationSolution) {
        log::debug!("Iteration {}: using {:.6} rolls",iter,relaxation.objective);
        log::debug!("  usage  = [{}]",relaxation.usage.iter().map(|u| format!("{:.4}",u)).join(", "));
        log::debug!("  prices = [{}]",relaxation.duals.iter().map(|y| format!("{:.6}",y)).join(", "));
    }

    fn new_column(& mut self, iter : usize, priced : &PricingSolution) {
        log::debug!("Iteration {}: pattern {} has value {:.6} (reduced cost {:.6})",iter,priced.pattern,priced.value,priced.reduced_cost());
    }

    fn done(& mut self, plan : &CuttingPlan) {
        log::info!("{:?}: {} rolls with {} patterns after {} iterations (relaxation {:.4})",
                   plan.status,plan.stock_units(),plan.num_patterns(),plan.iterations,plan.relaxation_bound);
    }
}
