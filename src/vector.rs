//! 2D vector arithmetic
//!
//! All geometry uses `glam::Vec2`, which already provides addition,
//! subtraction, negation, scalar multiplication (both orders), scalar
//! division and the in-place `+=`/`-=`/`*=`/`/=` forms. This module adds the
//! pieces glam does not: component-wise floor division and component
//! iteration.

use glam::Vec2;

/// Extra vector operations used by layout and motion code
pub trait VectorExt {
    /// Component-wise `floor(c / scalar)`
    fn floor_div(self, scalar: f32) -> Self;

    /// In-place floor division
    fn floor_div_assign(&mut self, scalar: f32) -> &mut Self;

    /// Euclidean length, `sqrt(x² + y²)`
    fn magnitude(self) -> f32;

    /// Iterate the components, x then y
    fn components(self) -> std::array::IntoIter<f32, 2>;
}

impl VectorExt for Vec2 {
    #[inline]
    fn floor_div(self, scalar: f32) -> Self {
        (self / scalar).floor()
    }

    #[inline]
    fn floor_div_assign(&mut self, scalar: f32) -> &mut Self {
        *self = self.floor_div(scalar);
        self
    }

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn components(self) -> std::array::IntoIter<f32, 2> {
        self.to_array().into_iter()
    }
}
