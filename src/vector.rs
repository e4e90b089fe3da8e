use glam::DVec3;

/// Arbitrary 3D vectors that can be converted from and into an array of three `f64`s.
///
/// Relativistic corrections are orders of magnitude smaller than the Newtonian
/// accelerations they are added to, so all internal computations are carried
/// out in double precision regardless of the user's vector type.
pub trait Vector: Into<[f64; 3]> + From<[f64; 3]> {
    /// Convert the arbitrary vector into the internal representation used for computations.
    fn into_internal(self) -> DVec3;

    /// Convert the internal representation back into the arbitrary vector.
    fn from_internal(vector: DVec3) -> Self;
}

impl<V> Vector for V
where
    V: Into<[f64; 3]> + From<[f64; 3]>,
{
    #[inline]
    fn into_internal(self) -> DVec3 {
        DVec3::from(self.into())
    }

    #[inline]
    fn from_internal(vector: DVec3) -> Self {
        Self::from(vector.into())
    }
}
