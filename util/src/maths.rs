//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + std::ops::AddAssign
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    let mut sum = T::zero();

    for i in 0..point_0.len() {
        sum += (point_0[i] - point_1[i]).powi(2);
    }

    Some(sum.sqrt())
}

/// Find the real roots of `a*x^2 + b*x + c = 0`.
///
/// The roots are returned in ascending order for positive `a`, i.e. `(-b - sqrt(d)) / 2a` first.
/// `None` is returned if the discriminant is negative or if `a` is zero (the equation is not
/// quadratic).
pub fn quadratic_roots<T>(a: T, b: T, c: T) -> Option<(T, T)>
where
    T: Float
{
    let two = T::one() + T::one();
    let four = two + two;

    let discr = b.powi(2) - four * a * c;

    if discr < T::zero() || a == T::zero() {
        return None;
    }

    let discr_sqrt = discr.sqrt();

    Some((
        (-b - discr_sqrt) / (two * a),
        (-b + discr_sqrt) / (two * a)
    ))
}

/// Returns true if the value lies in the closed interval `[0, 1]`.
pub fn in_unit_interval<T>(value: T) -> bool
where
    T: Float
{
    value >= T::zero() && value <= T::one()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[0f64, 0f64], &[3f64, 4f64]), Some(5f64));
        assert_eq!(norm(&[1f64], &[1f64, 2f64]), None);
    }

    #[test]
    fn test_quadratic_roots() {
        // (x - 1)(x - 3)
        assert_eq!(quadratic_roots(1f64, -4f64, 3f64), Some((1f64, 3f64)));

        // Repeated root
        assert_eq!(quadratic_roots(1f64, -2f64, 1f64), Some((1f64, 1f64)));

        // No real roots
        assert_eq!(quadratic_roots(1f64, 0f64, 1f64), None);

        // Not quadratic
        assert_eq!(quadratic_roots(0f64, 1f64, 1f64), None);
    }

    #[test]
    fn test_in_unit_interval() {
        assert!(in_unit_interval(0f64));
        assert!(in_unit_interval(1f64));
        assert!(in_unit_interval(0.5f64));
        assert!(!in_unit_interval(-1e-9f64));
        assert!(!in_unit_interval(1.000001f64));
        assert!(!in_unit_interval(f64::NAN));
    }
}
