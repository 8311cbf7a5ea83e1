//! Linear domains for variables and constraints.
//!
//! A domain carries one lower and one upper bound per element, plus a flag telling whether the
//! elements are integer. Infinite bounds mean "unbounded" on that side.
//!
//! ```
//! use cutstock::*;
//!
//! // Three non-negative integers
//! let d = greater_than(0.0).with_shape(3).integer();
//! assert_eq!(d.len(), 3);
//! assert!(d.is_integer());
//! ```

/// Bounds and integrality of a vector of model items.
#[derive(Clone,Debug)]
pub struct LinearDomain {
    /// Lower bounds, `f64::NEG_INFINITY` if unbounded below
    lower : Vec<f64>,
    /// Upper bounds, `f64::INFINITY` if unbounded above
    upper : Vec<f64>,
    /// Indicates if the domain in integer or continuous.
    is_integer : bool,
    /// A scalar domain can be expanded to any length
    scalable : bool,
}

impl LinearDomain {
    fn scalar(lower : f64, upper : f64) -> LinearDomain {
        LinearDomain{ lower : vec![lower], upper : vec![upper], is_integer : false, scalable : true }
    }

    fn vector(lower : Vec<f64>, upper : Vec<f64>) -> LinearDomain {
        LinearDomain{ lower, upper, is_integer : false, scalable : false }
    }

    pub fn integer(self) -> LinearDomain { LinearDomain{ is_integer : true, ..self } }

    /// Expand a scalar domain to `n` elements. A domain that already has a length is left as it
    /// is, and will be checked against the item it is used for.
    pub fn with_shape(self, n : usize) -> LinearDomain {
        if self.scalable {
            LinearDomain{
                lower    : vec![self.lower[0]; n],
                upper    : vec![self.upper[0]; n],
                scalable : false,
                ..self
            }
        }
        else {
            self
        }
    }

    pub fn len(&self) -> usize { self.lower.len() }
    pub fn is_empty(&self) -> bool { self.lower.is_empty() }
    pub fn is_integer(&self) -> bool { self.is_integer }
    pub fn lower(&self) -> &[f64] { self.lower.as_slice() }
    pub fn upper(&self) -> &[f64] { self.upper.as_slice() }

    /// Finalize the domain against the size of the item it is applied to.
    pub(crate) fn try_into_sized(self, n : usize) -> Result<LinearDomain,String> {
        let dom = self.with_shape(n);
        if dom.lower.len() != n || dom.upper.len() != n {
            return Err(format!("Domain size does not match the expected size: {} vs {}",dom.lower.len(),n));
        }
        if let Some(i) = dom.lower.iter().zip(dom.upper.iter()).position(|(&l,&u)| l.is_nan() || u.is_nan() || l > u) {
            return Err(format!("Invalid bounds at element {}: [{}, {}]",i,dom.lower[i],dom.upper[i]));
        }
        Ok(dom)
    }

    pub(crate) fn dissolve(self) -> (Vec<f64>,Vec<f64>,bool) { (self.lower,self.upper,self.is_integer) }
}

/// The OffsetTrait represents something that can act as a bound value for a domain.
pub trait OffsetTrait {
    fn greater_than(self) -> LinearDomain;
    fn less_than(self)    -> LinearDomain;
}

impl OffsetTrait for f64 {
    fn greater_than(self) -> LinearDomain { LinearDomain::scalar(self,f64::INFINITY) }
    fn less_than(self)    -> LinearDomain { LinearDomain::scalar(f64::NEG_INFINITY,self) }
}

impl OffsetTrait for Vec<f64> {
    fn greater_than(self) -> LinearDomain { let n = self.len(); LinearDomain::vector(self,vec![f64::INFINITY; n]) }
    fn less_than(self)    -> LinearDomain { let n = self.len(); LinearDomain::vector(vec![f64::NEG_INFINITY; n],self) }
}

impl OffsetTrait for &[f64] {
    fn greater_than(self) -> LinearDomain { self.to_vec().greater_than() }
    fn less_than(self)    -> LinearDomain { self.to_vec().less_than() }
}

////////////////////////////////////////////////////////////
// Domain constructors
////////////////////////////////////////////////////////////

/// Domain of values greater than the offset `v`.
///
/// # Arguments
/// - `v` - Offset, the size of the domain is taken from the size of `v`. If `v` is a scalar, the
///   result is a scalable domain.
pub fn greater_than<T : OffsetTrait>(v : T) -> LinearDomain { v.greater_than() }

/// Domain of values less than the offset `v`.
///
/// # Arguments
/// - `v` - Offset, the size of the domain is taken from the size of `v`. If `v` is a scalar, the
///   result is a scalable domain.
pub fn less_than<T : OffsetTrait>(v : T) -> LinearDomain { v.less_than() }

/// Something that can act as the pair of bounds of a range domain.
pub trait IntoRangeBound {
    fn make(self, upper : Self) -> LinearDomain;
}

impl IntoRangeBound for f64 {
    fn make(self, upper : f64) -> LinearDomain { LinearDomain::scalar(self,upper) }
}

impl IntoRangeBound for Vec<f64> {
    fn make(self, upper : Vec<f64>) -> LinearDomain { LinearDomain::vector(self,upper) }
}

/// Domain of values between `lower` and `upper`. Scalar bounds give a scalable domain; vector
/// bounds must have equal lengths, which is checked when the domain is used.
pub fn in_range<T>(lower : T, upper : T) -> LinearDomain where T : IntoRangeBound {
    lower.make(upper)
}

/// Scalable domain of free values.
pub fn unbounded() -> LinearDomain { LinearDomain::scalar(f64::NEG_INFINITY,f64::INFINITY) }
