//! Sparse linear expressions.
//!
//! An [Expr] is a vector of linear rows stored in compressed row form: row `i` consists of the
//! entries `subj[ptr[i]..ptr[i+1]]` with coefficients `cof[ptr[i]..ptr[i+1]]`.

use itertools::izip;

#[derive(Clone,Debug,Default)]
pub struct Expr {
    ptr  : Vec<usize>,
    subj : Vec<usize>,
    cof  : Vec<f64>,
}

impl Expr {
    /// An expression of `n` empty rows. Used for constraints whose coefficients arrive later
    /// through column addition.
    pub fn zeros(n : usize) -> Expr {
        Expr{ ptr : vec![0; n+1], subj : Vec::new(), cof : Vec::new() }
    }

    /// A single row `sum_k cof[k] x[subj[k]]`. Zero coefficients are dropped.
    pub fn row(subj : &[usize], cof : &[f64]) -> Expr {
        let (subj,cof) : (Vec<usize>,Vec<f64>) = izip!(subj.iter(),cof.iter())
            .filter(|(_,c)| **c != 0.0)
            .map(|(&j,&c)| (j,c))
            .unzip();
        Expr{ ptr : vec![0,subj.len()], subj, cof }
    }

    /// One row per index, each with coefficient 1.
    pub fn diagonal(subj : &[usize]) -> Expr {
        Expr{ ptr : (0..subj.len()+1).collect(), subj : subj.to_vec(), cof : vec![1.0; subj.len()] }
    }

    /// Stack the rows of `other` below the rows of `self`.
    pub fn vstack(mut self, other : Expr) -> Expr {
        let base = self.subj.len();
        self.ptr.extend(other.ptr[1..].iter().map(|&p| p + base));
        self.subj.extend_from_slice(other.subj.as_slice());
        self.cof.extend_from_slice(other.cof.as_slice());
        self
    }

    pub fn num_rows(&self) -> usize { self.ptr.len() - 1 }

    pub fn nnz(&self) -> usize { self.subj.len() }

    /// Iterate over rows as `(subj,cof)` slice pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&[usize],&[f64])> {
        izip!(self.ptr.iter(),self.ptr[1..].iter())
            .map(|(&p0,&p1)| (&self.subj[p0..p1],&self.cof[p0..p1]))
    }

    /// Largest variable index referenced, if any.
    pub(crate) fn max_index(&self) -> Option<usize> { self.subj.iter().max().copied() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_drops_zeros() {
        let e = Expr::row(&[0,1,2],&[3.0,0.0,5.0]);
        assert_eq!(e.num_rows(),1);
        assert_eq!(e.nnz(),2);
        let (subj,cof) = e.rows().next().unwrap();
        assert_eq!(subj,&[0,2]);
        assert_eq!(cof,&[3.0,5.0]);
    }

    #[test]
    fn stacking() {
        let e = Expr::zeros(2).vstack(Expr::row(&[4],&[1.5])).vstack(Expr::diagonal(&[1,2]));
        assert_eq!(e.num_rows(),5);
        let rows : Vec<_> = e.rows().map(|(s,_)| s.to_vec()).collect();
        assert_eq!(rows,vec![vec![],vec![],vec![4],vec![1],vec![2]]);
        assert_eq!(e.max_index(),Some(4));
    }
}
