//! Backends for unit tests: a scripted backend replaying canned solutions, and a brute force
//! backend for small bounded integer problems.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use itertools::izip;

use super::*;

pub(crate) enum Step {
    Lp{ x : Vec<f64>, y : Vec<f64> },
    Mip{ x : Vec<f64> },
    Infeasible,
    Fail(String),
}

/// Replays pushed solutions in order. Clones share the script and the record of solved models,
/// so a test can keep a handle after moving the backend into a model.
#[derive(Clone,Default)]
pub(crate) struct ScriptedModel {
    steps  : Rc<RefCell<VecDeque<Step>>>,
    seen   : Rc<RefCell<Vec<ModelData>>>,
    params : Rc<RefCell<Vec<(String,String)>>>,
}

impl ScriptedModel {
    pub(crate) fn new() -> ScriptedModel { Default::default() }

    pub(crate) fn push_lp(&self, x : Vec<f64>, y : Vec<f64>) { self.steps.borrow_mut().push_back(Step::Lp{ x, y }) }
    pub(crate) fn push_mip(&self, x : Vec<f64>) { self.steps.borrow_mut().push_back(Step::Mip{ x }) }
    pub(crate) fn push_infeasible(&self) { self.steps.borrow_mut().push_back(Step::Infeasible) }
    pub(crate) fn push_failure(&self, msg : &str) { self.steps.borrow_mut().push_back(Step::Fail(msg.to_string())) }

    pub(crate) fn remaining(&self) -> usize { self.steps.borrow().len() }
    pub(crate) fn seen(&self) -> Vec<ModelData> { self.seen.borrow().clone() }
    pub(crate) fn params(&self) -> Vec<(String,String)> { self.params.borrow().clone() }
}

impl BaseModelTrait for ScriptedModel {
    fn solve(& mut self, data : &ModelData, sol : & mut Solution) -> Result<(),String> {
        self.seen.borrow_mut().push(data.clone());
        let step = self.steps.borrow_mut().pop_front().ok_or_else(|| "Script exhausted".to_string())?;
        match step {
            Step::Lp{ x, y } => {
                sol.primal.status = SolutionStatus::Optimal;
                sol.primal.con = data.row_activities(x.as_slice());
                sol.dual.status = SolutionStatus::Optimal;
                sol.dual.var = izip!(data.obj_cof.iter(),data.a_cols.iter())
                    .map(|(&c,col)| c - col.iter().map(|&(i,a)| a * y.get(i).copied().unwrap_or(0.0)).sum::<f64>())
                    .collect();
                sol.primal.var = x;
                sol.dual.con = y;
            },
            Step::Mip{ x } => {
                sol.primal.status = SolutionStatus::Optimal;
                sol.primal.con = data.row_activities(x.as_slice());
                sol.primal.var = x;
                sol.dual.status = SolutionStatus::Undefined;
            },
            Step::Infeasible => {
                sol.primal.status = SolutionStatus::Undefined;
                sol.dual.status = SolutionStatus::CertInfeas;
                sol.dual.resize(data.num_var(),data.num_con());
            },
            Step::Fail(msg) => return Err(msg)
        }
        Ok(())
    }

    fn set_double_parameter(&mut self, parname : &str, parval : f64) -> Result<(),String> {
        self.params.borrow_mut().push((parname.to_string(),parval.to_string())); Ok(())
    }
    fn set_int_parameter(&mut self, parname : &str, parval : i32) -> Result<(),String> {
        self.params.borrow_mut().push((parname.to_string(),parval.to_string())); Ok(())
    }
    fn set_str_parameter(&mut self, parname : &str, parval : &str) -> Result<(),String> {
        self.params.borrow_mut().push((parname.to_string(),parval.to_string())); Ok(())
    }
}

const FEAS_TOL : f64 = 1.0e-9;

/// Tighten infinite upper bounds of non-negative variables through rows with non-negative
/// coefficients and a finite upper bound, like a knapsack capacity row.
fn implied_upper_bounds(data : &ModelData) -> Vec<f64> {
    let mut ub = data.var_ub.clone();
    let nonneg_var : Vec<bool> = data.var_lb.iter().map(|&l| l >= 0.0).collect();
    let mut packing = vec![true; data.num_con()];
    for (j,col) in data.a_cols.iter().enumerate() {
        for &(i,a) in col.iter() {
            if a < 0.0 || !nonneg_var[j] { packing[i] = false; }
        }
    }
    for (j,col) in data.a_cols.iter().enumerate() {
        if !nonneg_var[j] { continue; }
        for &(i,a) in col.iter() {
            if packing[i] && a > 0.0 && data.con_ub[i].is_finite() {
                ub[j] = ub[j].min(data.con_ub[i] / a);
            }
        }
    }
    ub
}

/// Exhaustive search over all integer points of a small, bounded, pure integer problem. Ties
/// are broken by taking the first point in lexicographic order. Rows are satisfied up to an
/// absolute tolerance of `FEAS_TOL`.
#[derive(Clone,Default)]
pub(crate) struct EnumerationModel {
    pub(crate) solves : usize,
}

impl BaseModelTrait for EnumerationModel {
    fn solve(& mut self, data : &ModelData, sol : & mut Solution) -> Result<(),String> {
        self.solves += 1;
        if data.var_int.iter().any(|&b| !b) {
            return Err("Enumeration requires integer variables".to_string());
        }
        let var_ub = implied_upper_bounds(data);
        if var_ub.iter().chain(data.var_lb.iter()).any(|b| b.is_infinite()) {
            return Err("Enumeration requires bounded variables".to_string());
        }
        let lb : Vec<i64> = data.var_lb.iter().map(|&l| l.ceil() as i64).collect();
        let ub : Vec<i64> = var_ub.iter().map(|&u| (u + FEAS_TOL).floor() as i64).collect();

        let sign = match data.sense { Sense::Minimize => -1.0, Sense::Maximize => 1.0 };
        let mut best : Option<(f64,Vec<f64>)> = None;
        let mut point = lb.clone();
        loop {
            if point.iter().zip(ub.iter()).all(|(p,u)| p <= u) {
                let x : Vec<f64> = point.iter().map(|&p| p as f64).collect();
                let act = data.row_activities(x.as_slice());
                let feasible = izip!(act.iter(),data.con_lb.iter(),data.con_ub.iter()).all(|(&a,&l,&u)| a >= l - FEAS_TOL && a <= u + FEAS_TOL);
                if feasible {
                    let obj = sign * data.objective_value(x.as_slice());
                    if best.as_ref().is_none_or(|(b,_)| obj > *b) {
                        best = Some((obj,x));
                    }
                }
            }
            // advance odometer, last index fastest
            let mut k = point.len();
            loop {
                if k == 0 { break; }
                k -= 1;
                if point[k] < ub[k] { point[k] += 1; break; }
                point[k] = lb[k];
                if k == 0 { k = usize::MAX; break; }
            }
            if k == usize::MAX || point.is_empty() { break; }
        }

        match best {
            Some((_,x)) => {
                sol.primal.status = SolutionStatus::Optimal;
                sol.primal.con = data.row_activities(x.as_slice());
                sol.primal.var = x;
            },
            None => {
                sol.primal.status = SolutionStatus::Undefined;
            }
        }
        sol.dual.status = SolutionStatus::Undefined;
        Ok(())
    }

    fn set_double_parameter(&mut self, _parname : &str, _parval : f64) -> Result<(),String> { Ok(()) }
    fn set_int_parameter(&mut self, _parname : &str, _parval : i32) -> Result<(),String> { Ok(()) }
    fn set_str_parameter(&mut self, _parname : &str, _parval : &str) -> Result<(),String> { Ok(()) }
}
