//! Configuration for the column generation loop.

use std::path::PathBuf;

/// Tolerance of the reduced cost test. A pattern is only added if its dual-weighted value
/// exceeds its cost of 1 by more than this.
pub const EPSILON : f64 = 1.0e-6;

/// Configuration parameters for column generation.
#[derive(Debug,Clone)]
pub struct Config {
    /// Tolerance of the termination test: continue while `value > 1 + tolerance`.
    pub tolerance : f64,

    /// Do not add a pattern that is already in the pool. Because the relaxation would not
    /// change, a repeated pattern then ends column generation.
    pub skip_duplicates : bool,

    /// If set, the final master problem and the last pricing problem are written to
    /// `master.lp` and `pricing.lp` in this directory.
    pub dump_dir : Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance       : EPSILON,
            skip_duplicates : true,
            dump_dir        : None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerance of the termination test.
    pub fn with_tolerance(mut self, tolerance : f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets whether repeated patterns are skipped.
    pub fn with_skip_duplicates(mut self, skip : bool) -> Self {
        self.skip_duplicates = skip;
        self
    }

    /// Sets the directory receiving LP dumps of the final models.
    pub fn with_dump_dir<P : Into<PathBuf>>(mut self, dir : P) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }
}
