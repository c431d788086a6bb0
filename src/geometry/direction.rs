use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// DirectionCosines – a vector in (north, east, down) space
// ---------------------------------------------------------------------------

/// North, east and down components of a direction.
///
/// Not necessarily unit length: sums and differences of direction cosines
/// are used as intermediate vectors in the fold analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionCosines {
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

impl DirectionCosines {
    pub const fn new(north: f64, east: f64, down: f64) -> Self {
        Self { north, east, down }
    }

    pub fn dot_product(&self, other: &Self) -> f64 {
        self.north * other.north + self.east * other.east + self.down * other.down
    }

    pub fn cross_product(&self, other: &Self) -> Self {
        Self {
            north: self.east * other.down - self.down * other.east,
            east: self.down * other.north - self.north * other.down,
            down: self.north * other.east - self.east * other.north,
        }
    }

    /// Euclidean length of the vector.
    pub fn magnitude(&self) -> f64 {
        self.dot_product(self).sqrt()
    }

    /// Unit-length copy. A zero vector is returned unchanged.
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            *self
        } else {
            *self / magnitude
        }
    }

    /// Whether every component is within `tolerance` of `other`'s.
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.north - other.north).abs() <= tolerance
            && (self.east - other.east).abs() <= tolerance
            && (self.down - other.down).abs() <= tolerance
    }
}

impl fmt::Display for DirectionCosines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.north, self.east, self.down)
    }
}

impl Add for DirectionCosines {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.north + rhs.north, self.east + rhs.east, self.down + rhs.down)
    }
}

impl Sub for DirectionCosines {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.north - rhs.north, self.east - rhs.east, self.down - rhs.down)
    }
}

impl Neg for DirectionCosines {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.north, -self.east, -self.down)
    }
}

impl Mul<f64> for DirectionCosines {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.north * rhs, self.east * rhs, self.down * rhs)
    }
}

impl Mul<DirectionCosines> for f64 {
    type Output = DirectionCosines;

    fn mul(self, rhs: DirectionCosines) -> DirectionCosines {
        rhs * self
    }
}

impl Div<f64> for DirectionCosines {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.north / rhs, self.east / rhs, self.down / rhs)
    }
}

impl Sum for DirectionCosines {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a DirectionCosines> for DirectionCosines {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn dircos_strategy() -> impl Strategy<Value = DirectionCosines> {
        (0.01f64..1.0, 0.01f64..1.0, 0.01f64..1.0)
            .prop_map(|(n, e, d)| DirectionCosines::new(n, e, d))
    }

    #[test]
    fn dot_product_with_unit_axes_selects_component() {
        let dc = DirectionCosines::new(0.3, -0.7, 0.2);
        assert_eq!(dc.dot_product(&DirectionCosines::new(1.0, 0.0, 0.0)), 0.3);
        assert_eq!(dc.dot_product(&DirectionCosines::new(0.0, 1.0, 0.0)), -0.7);
        assert_eq!(dc.dot_product(&DirectionCosines::new(0.0, 0.0, 1.0)), 0.2);
    }

    #[test]
    fn cross_product_of_north_and_east_is_down() {
        let north = DirectionCosines::new(1.0, 0.0, 0.0);
        let east = DirectionCosines::new(0.0, 1.0, 0.0);
        assert_eq!(north.cross_product(&east), DirectionCosines::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn zero_vector_normalises_to_itself() {
        assert_eq!(DirectionCosines::default().normalised(), DirectionCosines::default());
    }

    #[test]
    fn sum_adds_componentwise() {
        let total: DirectionCosines = [
            DirectionCosines::new(1.0, 2.0, 3.0),
            DirectionCosines::new(-1.0, 0.5, 1.0),
        ]
        .iter()
        .sum();
        assert_eq!(total, DirectionCosines::new(0.0, 2.5, 4.0));
    }

    proptest! {
        #[test]
        fn normalised_has_unit_length(dc in dircos_strategy()) {
            prop_assert!((dc.normalised().magnitude() - 1.0).abs() < 1e-12);
        }

        #[test]
        fn multiplying_by_one_is_identity(dc in dircos_strategy()) {
            prop_assert_eq!(dc * 1.0, dc);
            prop_assert_eq!(1.0 * dc, dc);
            prop_assert_eq!(dc / 1.0, dc);
        }

        #[test]
        fn cross_product_is_perpendicular(a in dircos_strategy(), b in dircos_strategy()) {
            let c = a.cross_product(&b);
            prop_assert!(c.dot_product(&a).abs() < 1e-9);
            prop_assert!(c.dot_product(&b).abs() < 1e-9);
        }
    }
}
