use std::fmt::Debug;

use num_traits::Float;

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only `f32` and `f64` are
/// supported, since region clipping and squared distances need exact floating point comparisons
/// and a notion of finiteness.
pub trait CoordFloat: private::Sealed + Float + Debug + Send + Sync + 'static {}

impl CoordFloat for f32 {}

impl CoordFloat for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
