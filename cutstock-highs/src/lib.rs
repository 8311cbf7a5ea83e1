//! HiGHS backend for `cutstock`.
//!
//! The [HighsModel] rebuilds a HiGHS column-wise problem from the model data on every solve.
//! Continuous problems are solved by simplex and return both primal values and duals; problems
//! with integer variables go to the HiGHS branch-and-cut solver and only return primal values.

use std::ops::Bound;

use highs::{ColProblem, HighsModelStatus, Row};
use itertools::izip;

use cutstock::{BaseModelTrait, ModelData, Sense, Solution, SolutionStatus};

#[derive(Clone,Debug)]
enum OptionValue {
    Double(f64),
    Int(i32),
    Str(String),
}

/// Solver backend using HiGHS.
///
/// Parameters set through [BaseModelTrait] are HiGHS option names, for example `time_limit`
/// or `mip_rel_gap`. They are applied to every following solve. The solver is quiet unless
/// [HighsModel::verbose] was used.
///
/// The relative MIP gap defaults to zero, so integer problems are solved to optimality.
#[derive(Clone,Debug)]
pub struct HighsModel {
    options     : Vec<(String,OptionValue)>,
    quiet       : bool,
    last_status : Option<HighsModelStatus>,
}

impl Default for HighsModel {
    fn default() -> Self {
        HighsModel{
            options     : vec![("mip_rel_gap".to_string(),OptionValue::Double(0.0))],
            quiet       : true,
            last_status : None
        }
    }
}

impl HighsModel {
    pub fn new() -> HighsModel { Default::default() }

    /// Let HiGHS write its log output.
    pub fn verbose(mut self) -> HighsModel { self.quiet = false; self }

    /// The HiGHS model status of the most recent solve.
    pub fn last_status(&self) -> Option<HighsModelStatus> { self.last_status }

    fn push_option(& mut self, parname : &str, value : OptionValue) {
        match self.options.iter_mut().find(|(n,_)| n == parname) {
            Some((_,v)) => *v = value,
            None => self.options.push((parname.to_string(),value))
        }
    }
}

fn bounds(lb : f64, ub : f64) -> (Bound<f64>,Bound<f64>) {
    (if lb == f64::NEG_INFINITY { Bound::Unbounded } else { Bound::Included(lb) },
     if ub == f64::INFINITY { Bound::Unbounded } else { Bound::Included(ub) })
}

fn build(data : &ModelData) -> ColProblem {
    let mut pb = ColProblem::default();
    let rows : Vec<Row> = data.con_lb.iter().zip(data.con_ub.iter())
        .map(|(&l,&u)| pb.add_row(bounds(l,u)))
        .collect();
    for (&c,&l,&u,&int,col) in izip!(data.obj_cof.iter(),data.var_lb.iter(),data.var_ub.iter(),data.var_int.iter(),data.a_cols.iter()) {
        let factors = col.iter().map(|&(i,a)| (rows[i],a));
        if int {
            pb.add_integer_column(c, bounds(l,u), factors);
        }
        else {
            pb.add_column(c, bounds(l,u), factors);
        }
    }
    pb
}

impl BaseModelTrait for HighsModel {
    fn solve(& mut self, data : &ModelData, sol : & mut Solution) -> Result<(),String> {
        let (numvar,numcon) = (data.num_var(),data.num_con());
        let is_mip = data.is_integer();
        log::trace!("HiGHS: {} variables, {} constraints, integer: {}",numvar,numcon,is_mip);

        let sense = match data.sense {
            Sense::Minimize => highs::Sense::Minimise,
            Sense::Maximize => highs::Sense::Maximise,
        };
        let mut model = build(data).optimise(sense);
        if self.quiet {
            model.make_quiet();
        }
        for (name,value) in self.options.iter() {
            match value {
                OptionValue::Double(v) => model.set_option(name.as_str(), *v),
                OptionValue::Int(v)    => model.set_option(name.as_str(), *v),
                OptionValue::Str(v)    => model.set_option(name.as_str(), v.as_str()),
            }
        }

        let solved = model.try_solve().map_err(|e| format!("HiGHS failed: {:?}",e))?;
        let status = solved.status();
        self.last_status = Some(status);
        log::debug!("HiGHS model status: {:?}",status);

        sol.primal.status = SolutionStatus::Undefined;
        sol.dual.status = SolutionStatus::Undefined;
        let (psta,dsta) = match status {
            HighsModelStatus::Optimal if is_mip => (SolutionStatus::Optimal,SolutionStatus::Undefined),
            HighsModelStatus::Optimal => (SolutionStatus::Optimal,SolutionStatus::Optimal),
            HighsModelStatus::Infeasible |
            HighsModelStatus::Unbounded |
            HighsModelStatus::UnboundedOrInfeasible => return Ok(()),
            _ => (SolutionStatus::Unknown,SolutionStatus::Undefined)
        };

        let solution = solved.get_solution();
        if solution.columns().len() != numvar || solution.rows().len() != numcon {
            return Ok(());
        }
        sol.primal.status = psta;
        sol.primal.var = solution.columns().to_vec();
        sol.primal.con = solution.rows().to_vec();
        if dsta != SolutionStatus::Undefined
            && solution.dual_columns().len() == numvar
            && solution.dual_rows().len() == numcon {
            sol.dual.status = dsta;
            sol.dual.var = solution.dual_columns().to_vec();
            sol.dual.con = solution.dual_rows().to_vec();
        }
        Ok(())
    }

    fn set_double_parameter(&mut self, parname : &str, parval : f64) -> Result<(),String> {
        self.push_option(parname, OptionValue::Double(parval));
        Ok(())
    }
    fn set_int_parameter(&mut self, parname : &str, parval : i32) -> Result<(),String> {
        self.push_option(parname, OptionValue::Int(parval));
        Ok(())
    }
    fn set_str_parameter(&mut self, parname : &str, parval : &str) -> Result<(),String> {
        self.push_option(parname, OptionValue::Str(parval.to_string()));
        Ok(())
    }
}
