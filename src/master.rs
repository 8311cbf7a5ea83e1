//! The restricted master problem.
//!
//! ```text
//!   min  sum_j x_j
//!   s.t. sum_j counts_j[i] x_j >= demand[i]    [dual y_i]   for every item type i
//!        x_j >= 0
//! ```
//!
//! over the patterns generated so far. The `x_j` are continuous while columns are being
//! generated, and are converted to integers once by [RestrictedMaster::finalize_integer].

use std::path::Path;

use crate::domain::*;
use crate::error::{CutStockError, Result};
use crate::expr::Expr;
use crate::instance::Instance;
use crate::model::{BaseModelTrait, Model, SolutionStatus};
use crate::constraint::Constraint;
use crate::pattern::{Pattern, PatternPool};
use crate::variable::Variable;

/// Optimal solution of the continuous relaxation of the master problem.
#[derive(Clone,Debug)]
pub struct RelaxationSolution {
    /// Number of stock units used, fractional
    pub objective : f64,
    /// Usage per pattern, in pool order
    pub usage     : Vec<f64>,
    /// Dual value per demand constraint
    pub duals     : Vec<f64>,
}

/// Solution of the master problem after conversion to integer usage.
#[derive(Clone,Debug)]
pub struct IntegerSolution {
    pub status    : SolutionStatus,
    pub objective : f64,
    pub usage     : Vec<f64>,
}

/// Owns the master model, its demand constraints and the pattern pool.
pub struct RestrictedMaster<T> where T : BaseModelTrait {
    model  : Model<T>,
    demand : Constraint,
    pool   : PatternPool,
}

fn column_name(pattern : &Pattern) -> String { format!("pattern_{}",pattern) }

impl<T> RestrictedMaster<T> where T : BaseModelTrait {
    /// Build the master problem and seed it with one greedy single-type pattern per item type.
    ///
    /// Fails with [CutStockError::ItemTooLarge] before anything is built if an item does not fit
    /// in one stock unit.
    pub fn new(instance : &Instance, backend : T) -> Result<RestrictedMaster<T>> {
        instance.check_seedable()?;

        let mut model = Model::with_backend(Some("master"), backend);
        let n = instance.num_items();
        let demand = model.constraint(Some("demand"), Expr::zeros(n), greater_than(instance.item_demand().to_vec()))
            .map_err(CutStockError::Solver)?;
        model.objective(Some("stock_used"), crate::model::Sense::Minimize, Expr::zeros(1))
            .map_err(CutStockError::Solver)?;

        let mut master = RestrictedMaster{ model, demand, pool : PatternPool::new() };
        for i in 0..n {
            master.add_column(Pattern::greedy(instance, i))?;
        }
        Ok(master)
    }

    pub fn pool(&self) -> &PatternPool { &self.pool }
    pub fn model(&self) -> &Model<T> { &self.model }
    pub fn demand(&self) -> &Constraint { &self.demand }

    fn usage_variable(&self) -> Variable {
        Variable::new(self.pool.variables().map(|v| v.indexes()[0]).collect())
    }

    /// Append a usage variable for `pattern` with objective coefficient 1 and the pattern counts
    /// as coefficients in the demand constraints.
    pub fn add_column(& mut self, pattern : Pattern) -> Result<()> {
        if pattern.counts().len() != self.demand.len() {
            return Err(CutStockError::InvalidPattern(format!("pattern {} has {} entries, expected {}",pattern,pattern.counts().len(),self.demand.len())));
        }
        let var = self.model.column(Some(column_name(&pattern).as_str()), greater_than(0.0), 1.0, &self.demand, pattern.coefficients().as_slice())
            .map_err(CutStockError::Solver)?;
        log::trace!("master column {} for pattern {}",var.indexes()[0],pattern);
        self.pool.push(pattern, var);
        debug_assert_eq!(self.pool.len(), self.model.num_variables());
        Ok(())
    }

    /// Solve the continuous relaxation and return objective, usage and demand duals.
    pub fn solve_relaxation(& mut self) -> Result<RelaxationSolution> {
        self.model.solve().map_err(CutStockError::Solver)?;
        let (psta,dsta) = self.model.solution_status();
        if psta != SolutionStatus::Optimal || dsta != SolutionStatus::Optimal {
            return Err(CutStockError::solver(format!("master relaxation not solved to optimality (status {:?}/{:?})",psta,dsta)));
        }
        let objective = self.model.primal_objective_value().ok_or_else(|| CutStockError::solver("master objective unavailable"))?;
        let usage = self.model.primal_solution(&self.usage_variable()).map_err(CutStockError::Solver)?;
        let duals = self.model.dual_solution(&self.demand).map_err(CutStockError::Solver)?;
        Ok(RelaxationSolution{ objective, usage, duals })
    }

    /// Convert every usage variable to integer and solve again. Consumes the manager, so no
    /// column can be added afterwards.
    pub fn finalize_integer(mut self) -> Result<IntegerMaster<T>> {
        let usage_var = self.usage_variable();
        self.model.make_integer(&usage_var).map_err(CutStockError::Solver)?;
        self.model.solve().map_err(CutStockError::Solver)?;

        let (status,_) = self.model.solution_status();
        if !status.is_usable() {
            return Err(CutStockError::solver(format!("integer master has no solution (status {:?})",status)));
        }
        let objective = self.model.primal_objective_value().ok_or_else(|| CutStockError::solver("integer master objective unavailable"))?;
        let usage = self.model.primal_solution(&usage_var).map_err(CutStockError::Solver)?;

        Ok(IntegerMaster{
            model    : self.model,
            pool     : self.pool,
            solution : IntegerSolution{ status, objective, usage },
        })
    }

    pub fn write_problem<P>(&self, filename : P) -> Result<()> where P : AsRef<Path> {
        self.model.write_problem(filename).map_err(CutStockError::Solver)
    }
}

/// The master problem after integer conversion.
pub struct IntegerMaster<T> where T : BaseModelTrait {
    model    : Model<T>,
    pool     : PatternPool,
    solution : IntegerSolution,
}

impl<T> IntegerMaster<T> where T : BaseModelTrait {
    pub fn pool(&self) -> &PatternPool { &self.pool }
    pub fn solution(&self) -> &IntegerSolution { &self.solution }
    pub fn model(&self) -> &Model<T> { &self.model }
    pub fn into_parts(self) -> (PatternPool,IntegerSolution) { (self.pool,self.solution) }

    pub fn write_problem<P>(&self, filename : P) -> Result<()> where P : AsRef<Path> {
        self.model.write_problem(filename).map_err(CutStockError::Solver)
    }
}
