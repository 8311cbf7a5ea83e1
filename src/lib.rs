//! One-dimensional cutting stock by Gilmore-Gomory column generation.
//!
//! Stock comes in units of one fixed length. Items of several sizes are demanded in given
//! quantities, and the goal is to cut all demanded items from as few stock units as possible.
//! A *pattern* says how many copies of each item type are cut from one stock unit.
//!
//! The crate is split in two layers:
//! - A small modeling layer ([Model], [Variable], [Constraint], [Expr] and the domain builders
//!   like [greater_than] and [in_range]). A model is solved by a backend implementing
//!   [BaseModelTrait]; no solver library is linked by this crate.
//! - The column generation on top: the [RestrictedMaster] holding the generated patterns, the
//!   knapsack [PricingProblem] finding the most valuable new pattern, and the
//!   [ColumnGeneration] driver alternating between the two until no pattern with negative
//!   reduced cost is left. The master is then solved once with integer usage, giving a
//!   [CuttingPlan].
//!
//! # Example
//! ```
//! use cutstock::*;
//!
//! # fn run<T : BaseModelTrait+Default>() -> cutstock::error::Result<()> {
//! let instance = Instance::new(17.0, vec![3.0,4.0,5.0], vec![20.0,25.0,30.0])?;
//! let plan = ColumnGeneration::new(instance, Config::default()).solve::<T>()?;
//! println!("{}", plan);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod expr;
pub mod variable;
pub mod constraint;
pub mod model;
pub mod error;

pub mod config;
pub mod instance;
pub mod pattern;
pub mod master;
pub mod pricing;
pub mod plan;
pub mod report;
pub mod colgen;

pub use domain::*;
pub use expr::Expr;
pub use variable::Variable;
pub use constraint::Constraint;
pub use model::*;
pub use error::CutStockError;

pub use config::{Config, EPSILON};
pub use instance::{Instance, FIT_TOLERANCE};
pub use pattern::{Pattern, PatternPool, PooledPattern};
pub use master::{IntegerMaster, IntegerSolution, RelaxationSolution, RestrictedMaster};
pub use pricing::{PricingProblem, PricingSolution};
pub use plan::{CuttingPlan, PlanEntry};
pub use report::{LogReporter, Reporter};
pub use colgen::{ColumnGeneration, Phase};
