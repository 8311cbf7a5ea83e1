//! Problem instance and its text format.
//!
//! The text format has four lines:
//! ```text
//! 17          -- stock length
//! 3           -- number of item types T
//! 3,4,5       -- T item sizes
//! 20,25,30    -- T demands
//! ```

use std::path::Path;
use std::str::FromStr;

use itertools::izip;

use crate::error::{CutStockError, Result};

/// Relative tolerance of the stock length when testing if a pattern fits. It absorbs rounding
/// in sums of item sizes and matches the feasibility tolerance of LP/MIP solvers.
pub const FIT_TOLERANCE : f64 = 1.0e-7;

/// Immutable description of a cutting stock problem: stock length, and per item type the size
/// and the demand. The item arrays are parallel.
#[derive(Clone,Debug,PartialEq)]
pub struct Instance {
    stock_length : f64,
    item_sizes   : Vec<f64>,
    item_demand  : Vec<f64>,
}

impl Instance {
    /// Create a validated instance.
    ///
    /// Fails if there are no item types, the arrays have different lengths, the stock length or
    /// an item size is not positive and finite, or a demand is negative or not finite.
    pub fn new(stock_length : f64, item_sizes : Vec<f64>, item_demand : Vec<f64>) -> Result<Instance> {
        if item_sizes.is_empty() {
            return Err(CutStockError::InvalidInstance("at least one item type is required".to_string()));
        }
        if item_sizes.len() != item_demand.len() {
            return Err(CutStockError::InvalidInstance(format!("{} item sizes but {} demands",item_sizes.len(),item_demand.len())));
        }
        if !(stock_length.is_finite() && stock_length > 0.0) {
            return Err(CutStockError::InvalidInstance(format!("stock length must be positive, got {}",stock_length)));
        }
        if let Some(i) = item_sizes.iter().position(|&s| !(s.is_finite() && s > 0.0)) {
            return Err(CutStockError::InvalidInstance(format!("item {} has invalid size {}",i,item_sizes[i])));
        }
        if let Some(i) = item_demand.iter().position(|&d| !(d.is_finite() && d >= 0.0)) {
            return Err(CutStockError::InvalidInstance(format!("item {} has invalid demand {}",i,item_demand[i])));
        }
        Ok(Instance{ stock_length, item_sizes, item_demand })
    }

    /// Read an instance from a file in the four-line text format.
    pub fn from_file<P : AsRef<Path>>(path : P) -> Result<Instance> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn stock_length(&self) -> f64 { self.stock_length }
    pub fn item_sizes(&self) -> &[f64] { self.item_sizes.as_slice() }
    pub fn item_demand(&self) -> &[f64] { self.item_demand.as_slice() }
    pub fn num_items(&self) -> usize { self.item_sizes.len() }

    /// Check that every item fits in one stock unit, so that single-type seed patterns exist.
    pub fn check_seedable(&self) -> Result<()> {
        match self.item_sizes.iter().position(|&s| s > self.stock_length) {
            Some(item) => Err(CutStockError::ItemTooLarge{ item, size : self.item_sizes[item], stock_length : self.stock_length }),
            None => Ok(())
        }
    }

    /// Maximum number of copies of item `i` cut from a single stock unit.
    pub fn max_copies(&self, i : usize) -> u32 {
        let size = self.item_sizes[i];
        let k = (self.stock_length / size).floor() as u32;
        // the quotient may round below an exact integer, as in 0.3/0.1
        if self.length_fits(size * (k + 1) as f64) { k + 1 } else { k }
    }

    /// Length of stock consumed by cutting `counts[i]` copies of each item `i`.
    pub fn used_length(&self, counts : &[u32]) -> f64 {
        izip!(self.item_sizes.iter(),counts.iter()).map(|(&s,&c)| s * c as f64).sum()
    }

    fn length_fits(&self, length : f64) -> bool {
        length <= self.stock_length + FIT_TOLERANCE * self.stock_length.max(1.0)
    }

    /// True if `counts` has one entry per item type and fits in one stock unit, up to
    /// [FIT_TOLERANCE].
    pub fn fits(&self, counts : &[u32]) -> bool {
        counts.len() == self.num_items() && self.length_fits(self.used_length(counts))
    }
}

fn parse_list(line : usize, text : &str, expected : usize) -> Result<Vec<f64>> {
    let values = text.split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| CutStockError::Parse{ line, msg : format!("'{}': {}",v.trim(),e) }))
        .collect::<Result<Vec<f64>>>()?;
    if values.len() != expected {
        return Err(CutStockError::Parse{ line, msg : format!("expected {} values, got {}",expected,values.len()) });
    }
    Ok(values)
}

impl FromStr for Instance {
    type Err = CutStockError;

    fn from_str(s : &str) -> Result<Instance> {
        let mut lines = s.lines().map(str::trim).enumerate().map(|(i,l)| (i+1,l));
        let mut next = |what : &str| lines.next().ok_or_else(|| CutStockError::Parse{ line : 0, msg : format!("missing {}",what) });

        let (ln,text) = next("stock length")?;
        let stock_length = text.parse::<f64>().map_err(|e| CutStockError::Parse{ line : ln, msg : format!("stock length '{}': {}",text,e) })?;

        let (ln,text) = next("item type count")?;
        let num_items = text.parse::<usize>().map_err(|e| CutStockError::Parse{ line : ln, msg : format!("item type count '{}': {}",text,e) })?;

        let (ln,text) = next("item sizes")?;
        let item_sizes = parse_list(ln, text, num_items)?;

        let (ln,text) = next("item demands")?;
        let item_demand = parse_list(ln, text, num_items)?;

        if let Some((ln,_)) = lines.find(|(_,l)| !l.is_empty()) {
            return Err(CutStockError::Parse{ line : ln, msg : "unexpected trailing data".to_string() });
        }

        Instance::new(stock_length, item_sizes, item_demand)
    }
}
