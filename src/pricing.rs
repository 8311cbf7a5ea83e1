//! The pricing problem: a bounded integer knapsack
//!
//! ```text
//!   max  sum_i y_i u_i
//!   s.t. sum_i size_i u_i <= stock_length
//!        u_i >= 0, integer
//! ```
//!
//! where `y` are the current demand duals of the master problem. The capacity row is built once;
//! only the objective changes between calls.

use std::path::Path;

use crate::constraint::Constraint;
use crate::domain::*;
use crate::error::{CutStockError, Result};
use crate::instance::Instance;
use crate::model::{BaseModelTrait, Model, Sense};
use crate::pattern::Pattern;
use crate::variable::Variable;

/// Best pattern for the given dual prices, and its dual-weighted value.
#[derive(Clone,Debug)]
pub struct PricingSolution {
    pub value   : f64,
    pub pattern : Pattern,
}

impl PricingSolution {
    /// Reduced cost of the pattern as a master column with objective coefficient 1.
    pub fn reduced_cost(&self) -> f64 { 1.0 - self.value }
}

pub struct PricingProblem<T> where T : BaseModelTrait {
    model    : Model<T>,
    uses     : Variable,
    capacity : Constraint,
    instance : Instance,
}

impl<T> PricingProblem<T> where T : BaseModelTrait {
    /// Build the integer variables and the capacity constraint.
    pub fn new(instance : &Instance, backend : T) -> Result<PricingProblem<T>> {
        let n = instance.num_items();
        let mut model = Model::with_backend(Some("pricing"), backend);
        let uses = model.variable(Some("use"), greater_than(0.0).with_shape(n).integer())
            .map_err(CutStockError::Solver)?;
        let capacity = model.constraint(Some("capacity"), uses.dot(instance.item_sizes()), less_than(instance.stock_length()))
            .map_err(CutStockError::Solver)?;
        Ok(PricingProblem{ model, uses, capacity, instance : instance.clone() })
    }

    pub fn model(&self) -> &Model<T> { &self.model }

    /// Set the objective to the dual prices and solve for the most valuable pattern.
    ///
    /// Solution values are rounded to the nearest integer. A rounded pattern that does not fit
    /// in the stock, within [crate::instance::FIT_TOLERANCE], is reported as
    /// [CutStockError::InvalidPattern].
    pub fn solve(& mut self, duals : &[f64]) -> Result<PricingSolution> {
        if duals.len() != self.uses.len() {
            return Err(CutStockError::solver(format!("got {} dual prices for {} item types",duals.len(),self.uses.len())));
        }
        self.model.objective(Some("value"), Sense::Maximize, self.uses.dot(duals)).map_err(CutStockError::Solver)?;
        self.model.solve().map_err(CutStockError::Solver)?;

        let (status,_) = self.model.solution_status();
        if !status.is_usable() {
            return Err(CutStockError::solver(format!("pricing problem has no solution (status {:?})",status)));
        }
        let value = self.model.primal_objective_value().ok_or_else(|| CutStockError::solver("pricing objective unavailable"))?;
        let counts : Vec<u32> = self.model.primal_solution(&self.uses).map_err(CutStockError::Solver)?
            .iter()
            .map(|&u| u.round().max(0.0) as u32)
            .collect();
        let pattern = Pattern::new(counts);
        if let Ok(used) = self.model.primal_solution(&self.capacity) {
            log::trace!("pricing pattern {} uses length {} of {}",pattern,used[0],self.instance.stock_length());
        }
        if !self.instance.fits(pattern.counts()) {
            return Err(CutStockError::InvalidPattern(format!("pattern {} uses length {} of {}",pattern,self.instance.used_length(pattern.counts()),self.instance.stock_length())));
        }
        Ok(PricingSolution{ value, pattern })
    }

    pub fn write_problem<P>(&self, filename : P) -> Result<()> where P : AsRef<Path> {
        self.model.write_problem(filename).map_err(CutStockError::Solver)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::testing::{EnumerationModel, ScriptedModel};

    fn reference() -> Instance {
        Instance::new(17.0,vec![3.0,4.0,5.0],vec![20.0,25.0,30.0]).unwrap()
    }

    #[test]
    fn model_structure() {
        let p = PricingProblem::new(&reference(), ScriptedModel::new()).unwrap();
        let d = p.model().data();
        assert_eq!(d.num_var(),3);
        assert_eq!(d.num_con(),1);
        assert_eq!(d.var_int,vec![true,true,true]);
        assert_eq!(d.var_lb,vec![0.0,0.0,0.0]);
        assert!(d.var_ub.iter().all(|u| u.is_infinite()));
        assert_eq!(d.con_ub,vec![17.0]);
        assert!(d.con_lb[0].is_infinite());
        assert_eq!(d.column(2),&[(0,5.0)]);
    }

    #[test]
    fn knapsack_by_enumeration() {
        let mut p = PricingProblem::new(&reference(), EnumerationModel::default()).unwrap();
        // duals of the greedy seeds: 1/5, 1/4, 1/3
        let sol = p.solve(&[0.2,0.25,1.0/3.0]).unwrap();
        assert!((sol.value - (0.2*4.0 + 1.0/3.0)).abs() < 1e-12);
        assert_eq!(sol.pattern.counts(),&[4,0,1]);
        assert!(sol.reduced_cost() < -1e-6);

        // the objective is rebuilt, the capacity row stays
        let sol = p.solve(&[0.0,0.0,0.0]).unwrap();
        assert_eq!(sol.value,0.0);
        assert_eq!(p.model().data().num_con(),1);
        assert_eq!(p.model().backend().solves,2);
    }

    #[test]
    fn rounding_noise_is_removed() {
        let backend = ScriptedModel::new();
        let mut p = PricingProblem::new(&reference(), backend.clone()).unwrap();
        backend.push_mip(vec![1.0000001,1.9999999,-0.0000002]);
        let sol = p.solve(&[0.2,0.25,0.3]).unwrap();
        assert_eq!(sol.pattern.counts(),&[1,2,0]);
    }

    #[test]
    fn overfull_pattern_rejected() {
        let backend = ScriptedModel::new();
        let mut p = PricingProblem::new(&reference(), backend.clone()).unwrap();
        backend.push_mip(vec![0.0,0.0,4.0]);
        assert!(matches!(p.solve(&[0.2,0.25,0.3]),Err(CutStockError::InvalidPattern(_))));
        assert!(matches!(p.solve(&[0.2,0.25]),Err(CutStockError::Solver(_))));
    }

    #[test]
    fn decimal_sizes() {
        let inst = Instance::new(0.3,vec![0.1,0.2],vec![10.0,10.0]).unwrap();

        // filling the stock exactly, although 0.1+0.2 > 0.3 in floating point
        let backend = ScriptedModel::new();
        let mut p = PricingProblem::new(&inst, backend.clone()).unwrap();
        backend.push_mip(vec![1.0,1.0]);
        let sol = p.solve(&[0.5,1.0]).unwrap();
        assert_eq!(sol.pattern.counts(),&[1,1]);
        assert!((sol.value - 1.5).abs() < 1e-12);

        // three copies of 0.1 are found even though 0.3/0.1 rounds below 3
        let mut p = PricingProblem::new(&inst, EnumerationModel::default()).unwrap();
        let sol = p.solve(&[0.4,0.5]).unwrap();
        assert_eq!(sol.pattern.counts(),&[3,0]);
        assert!((sol.value - 1.2).abs() < 1e-12);
    }
}
