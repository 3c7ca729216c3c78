//! Fixed-size float vectors for geometry, colors and texture coordinates
//!
//! Each vector stores its components in a single array. The positional
//! (`x`, `y`, `z`, `w`), color (`r`, `g`, `b`, `a`) and texture (`u`, `v`,
//! `w`) accessors are different names for the same slots, so writing `r`
//! is observable through `x` and through index 0.

use approx::{AbsDiffEq, RelativeEq};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 2-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    data: [f32; 2],
}

/// A 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    data: [f32; 3],
}

/// A 4-component (homogeneous) vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector4 {
    data: [f32; 4],
}

/// Generates a getter and a setter for each named view of a slot.
macro_rules! component_accessors {
    ($($index:literal => $get:ident, $set:ident;)+) => {
        $(
            #[inline]
            pub fn $get(&self) -> f32 {
                self.data[$index]
            }

            #[inline]
            pub fn $set(&mut self, value: f32) {
                self.data[$index] = value;
            }
        )+
    };
}

/// Everything the three arities share: construction, indexing, arithmetic,
/// tolerant comparison and `nalgebra` conversions.
macro_rules! impl_vector {
    ($name:ident, $dim:literal, $na:ident) => {
        impl $name {
            /// Creates a vector with every component set to zero.
            #[inline]
            pub const fn zeros() -> Self {
                Self { data: [0.0; $dim] }
            }

            /// Creates a vector with every component set to `value`.
            #[inline]
            pub const fn splat(value: f32) -> Self {
                Self { data: [value; $dim] }
            }

            /// Sum of the componentwise products.
            #[inline]
            pub fn dot(&self, other: &Self) -> f32 {
                self.data
                    .iter()
                    .zip(&other.data)
                    .map(|(a, b)| a * b)
                    .sum()
            }

            #[inline]
            pub fn norm_squared(&self) -> f32 {
                self.dot(self)
            }

            #[inline]
            pub fn norm(&self) -> f32 {
                self.norm_squared().sqrt()
            }

            /// Returns the vector scaled to unit length. A zero vector yields
            /// NaN components.
            #[inline]
            pub fn normalize(&self) -> Self {
                *self / self.norm()
            }

            #[inline]
            fn map(self, f: impl Fn(f32) -> f32) -> Self {
                Self {
                    data: self.data.map(f),
                }
            }

            #[inline]
            fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
                Self {
                    data: std::array::from_fn(|i| f(self.data[i], other.data[i])),
                }
            }
        }

        impl Index<usize> for $name {
            type Output = f32;

            #[inline]
            fn index(&self, index: usize) -> &f32 {
                &self.data[index]
            }
        }

        impl IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                &mut self.data[index]
            }
        }

        impl From<[f32; $dim]> for $name {
            #[inline]
            fn from(data: [f32; $dim]) -> Self {
                Self { data }
            }
        }

        impl From<$name> for [f32; $dim] {
            #[inline]
            fn from(vector: $name) -> Self {
                vector.data
            }
        }

        impl From<nalgebra::$na<f32>> for $name {
            #[inline]
            fn from(vector: nalgebra::$na<f32>) -> Self {
                Self { data: vector.into() }
            }
        }

        impl From<$name> for nalgebra::$na<f32> {
            #[inline]
            fn from(vector: $name) -> Self {
                nalgebra::$na::from(vector.data)
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.zip_map(rhs, |a, b| a + b)
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.zip_map(rhs, |a, b| a - b)
            }
        }

        impl Add<f32> for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: f32) -> Self {
                self.map(|a| a + rhs)
            }
        }

        impl Sub<f32> for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: f32) -> Self {
                self.map(|a| a - rhs)
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                self.map(|a| a * rhs)
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Div<f32> for $name {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                self.map(|a| a / rhs)
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                self.map(|a| -a)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.data
                    .iter()
                    .zip(&other.data)
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl RelativeEq for $name {
            fn default_max_relative() -> f32 {
                f32::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.data
                    .iter()
                    .zip(&other.data)
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }
    };
}

impl_vector!(Vector2, 2, Vector2);
impl_vector!(Vector3, 3, Vector3);
impl_vector!(Vector4, 4, Vector4);

impl Vector2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    component_accessors! {
        0 => x, set_x;
        1 => y, set_y;
        0 => r, set_r;
        1 => g, set_g;
        0 => u, set_u;
        1 => v, set_v;
    }
}

impl Vector3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    component_accessors! {
        0 => x, set_x;
        1 => y, set_y;
        2 => z, set_z;
        0 => r, set_r;
        1 => g, set_g;
        2 => b, set_b;
        0 => u, set_u;
        1 => v, set_v;
        2 => w, set_w;
    }

    /// Standard right-handed cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Appends a fourth component, e.g. `1.0` for a point or `0.0` for a
    /// direction.
    #[inline]
    pub const fn extend(self, w: f32) -> Vector4 {
        let [x, y, z] = self.data;
        Vector4::new(x, y, z, w)
    }
}

impl Vector4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    component_accessors! {
        0 => x, set_x;
        1 => y, set_y;
        2 => z, set_z;
        3 => w, set_w;
        0 => r, set_r;
        1 => g, set_g;
        2 => b, set_b;
        3 => a, set_a;
    }

    /// Drops the fourth component.
    #[inline]
    pub const fn xyz(self) -> Vector3 {
        let [x, y, z, _] = self.data;
        Vector3::new(x, y, z)
    }

    /// Performs the homogeneous divide. A zero `w` produces infinities or NaN.
    #[inline]
    pub fn to_point(self) -> Vector3 {
        self.xyz() / self.w()
    }
}
