//! The [Model] keeps an explicit description of a linear or mixed integer problem: objective
//! coefficients, variable bounds and integrality, constraint bounds and a column-major sparse
//! coefficient matrix. Solving is delegated to a backend implementing [BaseModelTrait], which
//! is the only place a concrete solver library is touched.
//!
//! ```
//! use cutstock::*;
//!
//! # fn build<T : BaseModelTrait+Default>() -> Result<Model<T>,String> {
//! let mut m : Model<T> = Model::new(Some("knapsack"));
//! let x = m.variable(Some("x"), greater_than(0.0).with_shape(3).integer())?;
//! m.constraint(Some("capacity"), x.dot(&[3.0,4.0,5.0]), less_than(17.0))?;
//! m.objective(Some("value"), Sense::Maximize, x.dot(&[0.2,0.25,0.33]))?;
//! # Ok(m)
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::izip;

use crate::constraint::Constraint;
use crate::domain::LinearDomain;
use crate::expr::Expr;
use crate::variable::Variable;

#[cfg(test)]
pub(crate) mod testing;

/// Objective sense
#[derive(Clone,Copy,Debug,PartialEq,Eq,Default)]
pub enum Sense {
    Maximize,
    #[default]
    Minimize
}

/*************************************************************************************************
 *
 * Solution structs and enums
 *
 *************************************************************************************************/

/// Solution status indicator. It is used to indicate the status of either the primal or the dual
/// part of a solution.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Default)]
pub enum SolutionStatus {
    /// Indicates that the solution is optimal within tolerances.
    Optimal,
    /// Indicates that the solution is feasible within tolerances.
    Feasible,
    /// Indicates that the solution is a certificate of either primal or dual infeasibility. A
    /// primal certificate proves dual infeasibility, and a dual certificate indicates primal
    /// infeasibility.
    CertInfeas,
    /// Indicates that the solution status is not known, basically it can be arbitrary values.
    Unknown,
    /// Indicates that the solution is not available.
    #[default]
    Undefined
}

impl SolutionStatus {
    /// True if values of this solution part can be used.
    pub fn is_usable(self) -> bool {
        matches!(self, SolutionStatus::Optimal | SolutionStatus::Feasible)
    }
}

/// One part (primal or dual) of a solution. For the primal part `var` are variable levels and
/// `con` are row activities; for the dual part `var` are reduced costs and `con` are the dual
/// values of the constraints.
#[derive(Clone,Debug,Default)]
pub struct SolutionPart {
    pub status : SolutionStatus,
    pub var    : Vec<f64>,
    pub con    : Vec<f64>,
    pub obj    : f64,
}

impl SolutionPart {
    pub fn resize(& mut self,numvar : usize, numcon : usize) {
        self.var.resize(numvar, 0.0);
        self.con.resize(numcon, 0.0);
    }
}

#[derive(Clone,Debug,Default)]
pub struct Solution {
    pub primal : SolutionPart,
    pub dual   : SolutionPart
}

/*************************************************************************************************
 *
 * Model data
 *
 *************************************************************************************************/

/// Explicit problem description handed to a backend.
#[derive(Clone,Debug,Default)]
pub struct ModelData {
    pub name      : Option<String>,
    pub sense     : Sense,
    pub obj_name  : Option<String>,
    /// Objective coefficient per variable
    pub obj_cof   : Vec<f64>,

    pub var_lb    : Vec<f64>,
    pub var_ub    : Vec<f64>,
    pub var_int   : Vec<bool>,
    pub var_names : Vec<Option<String>>,

    pub con_lb    : Vec<f64>,
    pub con_ub    : Vec<f64>,
    pub con_names : Vec<Option<String>>,

    /// Column-major coefficient matrix: `a_cols[j]` holds `(row,coefficient)` for variable `j`.
    pub a_cols    : Vec<Vec<(usize,f64)>>,
}

impl ModelData {
    pub fn num_var(&self) -> usize { self.var_lb.len() }
    pub fn num_con(&self) -> usize { self.con_lb.len() }
    pub fn is_integer(&self) -> bool { self.var_int.iter().any(|&b| b) }
    pub fn column(&self, j : usize) -> &[(usize,f64)] { self.a_cols[j].as_slice() }

    /// Evaluate the objective in the point `x`.
    pub fn objective_value(&self, x : &[f64]) -> f64 {
        izip!(self.obj_cof.iter(),x.iter()).map(|(&c,&x)| c*x).sum()
    }

    /// Evaluate all row activities in the point `x`.
    pub fn row_activities(&self, x : &[f64]) -> Vec<f64> {
        let mut res = vec![0.0; self.num_con()];
        for (col,&xj) in izip!(self.a_cols.iter(),x.iter()) {
            for &(i,c) in col.iter() { res[i] += c * xj; }
        }
        res
    }
}

fn element_names(name : Option<&str>, n : usize) -> Vec<Option<String>> {
    match name {
        None => vec![None; n],
        Some(name) if n == 1 => vec![Some(name.to_string())],
        Some(name) => (0..n).map(|i| Some(format!("{}[{}]",name,i))).collect()
    }
}

//======================================================
// Backend
//======================================================

/// The solver seam. A backend receives the complete problem description each time it is asked
/// to solve, and writes the primal and (for continuous problems) dual solution into `sol`.
///
/// Not finding an optimal solution is *not* an error, it is reported through the solution
/// status. Errors are reserved for failures of the optimizer itself.
pub trait BaseModelTrait {
    fn solve(& mut self, data : &ModelData, sol : & mut Solution) -> Result<(),String>;

    fn set_double_parameter(&mut self, parname : &str, parval : f64) -> Result<(),String>;
    fn set_int_parameter(&mut self, parname : &str, parval : i32) -> Result<(),String>;
    fn set_str_parameter(&mut self, parname : &str, parval : &str) -> Result<(),String>;
}

pub trait SolverParameterValue {
    fn set<M : BaseModelTrait>(self,parname : &str, model : & mut Model<M>) -> Result<(),String>;
}

impl SolverParameterValue for f64 {
    fn set<M : BaseModelTrait>(self, parname : &str,model : & mut Model<M>) -> Result<(),String> { model.inner.set_double_parameter(parname,self) }
}

impl SolverParameterValue for i32 {
    fn set<M : BaseModelTrait>(self, parname : &str,model : & mut Model<M>) -> Result<(),String> { model.inner.set_int_parameter(parname,self) }
}

impl SolverParameterValue for &str {
    fn set<M : BaseModelTrait>(self, parname : &str,model : & mut Model<M>) -> Result<(),String> { model.inner.set_str_parameter(parname,self) }
}

//======================================================
// ModelItem
//======================================================

/// The `ModelItem` represents either a variable or a constraint belonging to a [Model]. It is
/// used by the [Model] object to determine which solution part to access.
pub trait ModelItem {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool { self.len() == 0 }
    fn primal_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String>;
    fn dual_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String>;
}

fn gather(status : SolutionStatus, src : &[f64], idxs : &[usize], res : & mut [f64]) -> Result<usize,String> {
    if let SolutionStatus::Undefined = status {
        return Err("Solution part is not defined".to_string());
    }
    if res.len() < idxs.len() {
        return Err("Result array too small".to_string());
    }
    if let Some(&i) = idxs.iter().max() {
        if i >= src.len() {
            return Err("Index out of bounds for this solution".to_string());
        }
    }
    for (r,&i) in res.iter_mut().zip(idxs.iter()) { *r = src[i]; }
    Ok(idxs.len())
}

impl ModelItem for Variable {
    fn len(&self) -> usize { self.idxs.len() }
    fn primal_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String> {
        gather(sol.primal.status, sol.primal.var.as_slice(), self.idxs.as_slice(), res)
    }
    fn dual_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String> {
        gather(sol.dual.status, sol.dual.var.as_slice(), self.idxs.as_slice(), res)
    }
}

impl ModelItem for Constraint {
    fn len(&self) -> usize { self.idxs.len() }
    fn primal_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String> {
        gather(sol.primal.status, sol.primal.con.as_slice(), self.idxs.as_slice(), res)
    }
    fn dual_into(&self, sol : &Solution, res : & mut [f64]) -> Result<usize,String> {
        gather(sol.dual.status, sol.dual.con.as_slice(), self.idxs.as_slice(), res)
    }
}

//======================================================
// Model
//======================================================

/// The `Model` object encapsulates an optimization problem and the backend used to solve it.
///
/// Variables and constraints are created through the `Model` object and belong to exactly that
/// model.
pub struct Model<T> where T : BaseModelTrait {
    inner : T,
    data  : ModelData,
    sol   : Solution,
}

impl<T> Model<T> where T : BaseModelTrait {
    /// Create an empty model with a default constructed backend.
    pub fn new(name : Option<&str>) -> Model<T> where T : Default {
        Model::with_backend(name,T::default())
    }

    /// Create an empty model on the given backend.
    pub fn with_backend(name : Option<&str>, inner : T) -> Model<T> {
        Model{
            inner,
            data : ModelData{ name : name.map(|s| s.to_string()), ..Default::default() },
            sol  : Default::default(),
        }
    }

    pub fn data(&self) -> &ModelData { &self.data }
    pub fn backend(&self) -> &T { &self.inner }
    pub fn num_variables(&self) -> usize { self.data.num_var() }
    pub fn num_constraints(&self) -> usize { self.data.num_con() }

    /// Set a solver parameter on the backend.
    pub fn set_parameter<V>(& mut self, parname : &str, parval : V) -> Result<(),String> where V : SolverParameterValue {
        parval.set(parname,self)
    }

    /// Add a variable.
    ///
    /// # Arguments
    /// - `name` Optional variable name, used when writing the problem.
    /// - `dom` The domain of the variable. A scalable domain, like `greater_than(0.0)`, produces a
    ///   single variable element.
    ///
    /// # Returns
    /// A variable object, or an error if the domain is invalid.
    pub fn variable(& mut self, name : Option<&str>, dom : LinearDomain) -> Result<Variable,String> {
        let n = dom.len();
        let (lb,ub,is_integer) = dom.try_into_sized(n)?.dissolve();
        Ok(self.push_variables(name, lb, ub, is_integer, 0.0))
    }

    fn push_variables(& mut self, name : Option<&str>, lb : Vec<f64>, ub : Vec<f64>, is_integer : bool, obj : f64) -> Variable {
        let n = lb.len();
        let first = self.data.num_var();
        self.data.var_lb.extend(lb);
        self.data.var_ub.extend(ub);
        self.data.var_int.resize(first+n, is_integer);
        self.data.obj_cof.resize(first+n, obj);
        self.data.var_names.extend(element_names(name,n));
        self.data.a_cols.resize(first+n, Vec::new());
        self.invalidate();
        Variable::new((first..first+n).collect())
    }

    /// Add a constraint `expr ∈ dom`, one model row per expression row.
    ///
    /// # Arguments
    /// - `name` Optional constraint name.
    /// - `expr` Constraint expression. May consist of empty rows.
    /// - `dom`  Bounds of the rows. A scalable domain is expanded to the number of rows.
    pub fn constraint(& mut self, name : Option<&str>, expr : Expr, dom : LinearDomain) -> Result<Constraint,String> {
        let n = expr.num_rows();
        if let Some(j) = expr.max_index() {
            if j >= self.data.num_var() {
                return Err(format!("Expression refers to variable {} but the model has {}",j,self.data.num_var()));
            }
        }
        let (lb,ub,_) = dom.try_into_sized(n)?.dissolve();

        let first = self.data.num_con();
        for (i,(subj,cof)) in expr.rows().enumerate() {
            let row = first + i;
            for (&j,&c) in izip!(subj.iter(),cof.iter()) {
                let col = &mut self.data.a_cols[j];
                match col.last_mut() {
                    Some(last) if last.0 == row => last.1 += c,
                    _ => col.push((row,c))
                }
            }
        }
        self.data.con_lb.extend(lb);
        self.data.con_ub.extend(ub);
        self.data.con_names.extend(element_names(name,n));
        self.invalidate();
        Ok(Constraint::new((first..first+n).collect()))
    }

    /// Replace the objective. Variables not present in `expr` get coefficient zero.
    pub fn objective(& mut self, name : Option<&str>, sense : Sense, expr : Expr) -> Result<(),String> {
        if expr.num_rows() != 1 {
            return Err(format!("Objective must be a single row, got {}",expr.num_rows()));
        }
        if let Some(j) = expr.max_index() {
            if j >= self.data.num_var() {
                return Err(format!("Objective refers to variable {} but the model has {}",j,self.data.num_var()));
            }
        }
        self.data.obj_cof.iter_mut().for_each(|c| *c = 0.0);
        for (subj,cof) in expr.rows() {
            for (&j,&c) in izip!(subj.iter(),cof.iter()) { self.data.obj_cof[j] += c; }
        }
        self.data.sense = sense;
        self.data.obj_name = name.map(|s| s.to_string());
        self.invalidate();
        Ok(())
    }

    /// Append a single variable together with its objective coefficient and its coefficients in
    /// an existing constraint. The rest of the model is left untouched.
    ///
    /// # Arguments
    /// - `name` Optional variable name.
    /// - `dom` Scalar domain of the new variable.
    /// - `obj` Objective coefficient.
    /// - `con` The constraint receiving the coefficients.
    /// - `cof` One coefficient per element of `con`.
    pub fn column(& mut self, name : Option<&str>, dom : LinearDomain, obj : f64, con : &Constraint, cof : &[f64]) -> Result<Variable,String> {
        if cof.len() != con.len() {
            return Err(format!("Column has {} coefficients for a constraint of size {}",cof.len(),con.len()));
        }
        if let Some(&i) = con.idxs.iter().max() {
            if i >= self.data.num_con() {
                return Err(format!("Constraint index {} out of bounds",i));
            }
        }
        let (lb,ub,is_integer) = dom.try_into_sized(1)?.dissolve();
        let v = self.push_variables(name, lb, ub, is_integer, obj);
        self.data.a_cols[v.idxs[0]] = izip!(con.idxs.iter(),cof.iter())
            .filter(|(_,c)| **c != 0.0)
            .map(|(&i,&c)| (i,c))
            .collect();
        Ok(v)
    }

    /// Change the domain of the variable elements from continuous to integer. Bounds and
    /// coefficients are not changed.
    pub fn make_integer(& mut self, v : &Variable) -> Result<(),String> {
        if let Some(&j) = v.idxs.iter().max() {
            if j >= self.data.num_var() {
                return Err(format!("Variable index {} out of bounds",j));
            }
        }
        for &j in v.idxs.iter() { self.data.var_int[j] = true; }
        self.invalidate();
        Ok(())
    }

    fn invalidate(& mut self) {
        self.sol.primal.status = SolutionStatus::Undefined;
        self.sol.dual.status   = SolutionStatus::Undefined;
    }

    /// Solve the problem and extract the solution.
    ///
    /// This will fail if the optimizer fails with an error or returns a solution of the wrong
    /// size. Not producing an optimal solution or producing a certificate of infeasibility is
    /// *not* an error.
    pub fn solve(& mut self) -> Result<(),String> {
        self.invalidate();
        self.inner.solve(&self.data, & mut self.sol)?;

        let (numvar,numcon) = (self.data.num_var(),self.data.num_con());
        if self.sol.primal.status != SolutionStatus::Undefined {
            if self.sol.primal.var.len() != numvar || self.sol.primal.con.len() != numcon {
                return Err("Backend returned a primal solution of the wrong size".to_string());
            }
            self.sol.primal.obj = self.data.objective_value(self.sol.primal.var.as_slice());
        }
        if self.sol.dual.status != SolutionStatus::Undefined
            && (self.sol.dual.var.len() != numvar || self.sol.dual.con.len() != numcon) {
            return Err("Backend returned a dual solution of the wrong size".to_string());
        }
        Ok(())
    }

    /// Get solution status as a pair: status of the primal and of the dual solution.
    pub fn solution_status(&self) -> (SolutionStatus,SolutionStatus) {
        (self.sol.primal.status,self.sol.dual.status)
    }

    /// Get primal objective value, if available.
    pub fn primal_objective_value(&self) -> Option<f64> {
        if let SolutionStatus::Undefined = self.sol.primal.status { None }
        else { Some(self.sol.primal.obj) }
    }

    /// Get primal solution values for a variable or constraint.
    pub fn primal_solution<I : ModelItem>(&self, item : &I) -> Result<Vec<f64>,String> {
        let mut res = vec![0.0; item.len()];
        item.primal_into(&self.sol, res.as_mut_slice())?;
        Ok(res)
    }

    /// Get dual solution values for a variable (reduced costs) or constraint (dual values).
    pub fn dual_solution<I : ModelItem>(&self, item : &I) -> Result<Vec<f64>,String> {
        let mut res = vec![0.0; item.len()];
        item.dual_into(&self.sol, res.as_mut_slice())?;
        Ok(res)
    }

    /// Write problem to a file in CPLEX LP format.
    pub fn write_problem<P>(&self, filename : P) -> Result<(),String> where P : AsRef<Path> {
        let f = File::create(filename.as_ref()).map_err(|e| format!("{}: {}",filename.as_ref().display(),e))?;
        let mut w = BufWriter::new(f);
        self.write_lp(& mut w).and_then(|_| w.flush()).map_err(|e| e.to_string())
    }

    /// Write problem in CPLEX LP format.
    pub fn write_lp<W : Write>(&self, w : & mut W) -> std::io::Result<()> {
        let d = &self.data;
        let varname = |j : usize| lp_name(d.var_names[j].as_deref(),'x',j);

        if let Some(name) = &d.name { writeln!(w,"\\ Problem name: {}",name)?; }
        writeln!(w,"{}",match d.sense { Sense::Minimize => "Minimize", Sense::Maximize => "Maximize" })?;
        write!(w," {}:",lp_name(d.obj_name.as_deref(),'o',0))?;
        write_terms(w, d.obj_cof.iter().enumerate().filter(|(_,c)| **c != 0.0).map(|(j,&c)| (varname(j),c)))?;
        writeln!(w)?;

        // row-wise view of the matrix
        let mut rows : Vec<Vec<(usize,f64)>> = vec![Vec::new(); d.num_con()];
        for (j,col) in d.a_cols.iter().enumerate() {
            for &(i,c) in col.iter() { rows[i].push((j,c)); }
        }

        writeln!(w,"Subject To")?;
        for (i,(row,&lb,&ub)) in izip!(rows.iter(),d.con_lb.iter(),d.con_ub.iter()).enumerate() {
            let name = lp_name(d.con_names[i].as_deref(),'c',i);
            let bounds : Vec<(&str,&str,f64)> =
                if lb == ub { vec![("","=",lb)] }
                else {
                    let mut b = Vec::new();
                    if lb.is_finite() { b.push((if ub.is_finite() { "_lo" } else { "" },">=",lb)); }
                    if ub.is_finite() { b.push((if lb.is_finite() { "_up" } else { "" },"<=",ub)); }
                    b
                };
            for (suffix,op,rhs) in bounds {
                write!(w," {}{}:",name,suffix)?;
                write_terms(w, row.iter().map(|&(j,c)| (varname(j),c)))?;
                writeln!(w," {} {}",op,rhs)?;
            }
        }

        writeln!(w,"Bounds")?;
        for (j,(&lb,&ub)) in izip!(d.var_lb.iter(),d.var_ub.iter()).enumerate() {
            let name = varname(j);
            match (lb.is_finite(),ub.is_finite()) {
                (false,false) => writeln!(w," {} free",name)?,
                (true,false)  => writeln!(w," {} >= {}",name,lb)?,
                (false,true)  => writeln!(w," -inf <= {} <= {}",name,ub)?,
                (true,true)   => writeln!(w," {} <= {} <= {}",lb,name,ub)?,
            }
        }

        if d.is_integer() {
            writeln!(w,"General")?;
            for j in (0..d.num_var()).filter(|&j| d.var_int[j]) {
                writeln!(w," {}",varname(j))?;
            }
        }
        writeln!(w,"End")
    }
}

fn lp_name(name : Option<&str>, prefix : char, i : usize) -> String {
    match name {
        Some(name) => name.chars().map(|c| if c.is_ascii_alphanumeric() || "_[].".contains(c) { c } else { '_' }).collect(),
        None => format!("{}{}",prefix,i)
    }
}

fn write_terms<W : Write, I : Iterator<Item = (String,f64)>>(w : & mut W, terms : I) -> std::io::Result<()> {
    let mut any = false;
    for (name,c) in terms {
        if c < 0.0 { write!(w," - {} {}",-c,name)?; }
        else if any { write!(w," + {} {}",c,name)?; }
        else { write!(w," {} {}",c,name)?; }
        any = true;
    }
    if ! any { write!(w," 0 x0")?; }
    Ok(())
}
