//! Tour representation.
//!
//! A [`Tour`] is a closed route visiting every city exactly once, stored as
//! a permutation of `0..n` together with its cyclic cost. Tours borrow the
//! [`DistanceMatrix`] they were built against and are never modified after
//! construction: every operator builds a new tour from a new route.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;

/// A permutation of city indices plus its precomputed cyclic cost.
///
/// # Examples
///
/// ```
/// use u_tsp::{DistanceMatrix, Tour};
///
/// let m = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
/// ]).unwrap();
///
/// let tour = Tour::new(vec![0, 1, 2], &m).unwrap();
/// assert_eq!(tour.cost(), 6.0);
/// assert_eq!(tour.to_string(), "Route: 0-1-2, Distance: 6");
/// ```
#[derive(Debug, Clone)]
pub struct Tour<'m> {
    route: Vec<usize>,
    cost: f64,
    distances: &'m DistanceMatrix,
}

impl<'m> Tour<'m> {
    /// Builds a tour from an explicit route.
    ///
    /// # Errors
    /// - [`TspError::DimensionMismatch`] if `route.len()` differs from the
    ///   matrix dimension.
    /// - [`TspError::InvalidPermutation`] if a city is out of range or
    ///   appears twice.
    pub fn new(route: Vec<usize>, distances: &'m DistanceMatrix) -> Result<Self> {
        let n = distances.len();
        if route.len() != n {
            return Err(TspError::DimensionMismatch {
                expected: n,
                actual: route.len(),
            });
        }
        let mut seen = vec![false; n];
        for (pos, &city) in route.iter().enumerate() {
            if city >= n {
                return Err(TspError::InvalidPermutation(format!(
                    "city {city} at position {pos} is out of range 0..{n}"
                )));
            }
            if seen[city] {
                return Err(TspError::InvalidPermutation(format!(
                    "city {city} appears more than once"
                )));
            }
            seen[city] = true;
        }
        Ok(Self::from_route(route, distances))
    }

    /// Builds a uniformly random tour over all cities of the matrix.
    pub fn random<R: Rng>(distances: &'m DistanceMatrix, rng: &mut R) -> Self {
        let mut route: Vec<usize> = (0..distances.len()).collect();
        route.shuffle(rng);
        Self::from_route(route, distances)
    }

    /// Wraps a route that is a permutation by construction.
    pub(crate) fn from_route(route: Vec<usize>, distances: &'m DistanceMatrix) -> Self {
        debug_assert!(
            is_permutation(&route, distances.len()),
            "operator produced an invalid route: {route:?}"
        );
        let cost = route_cost(&route, distances);
        Self {
            route,
            cost,
            distances,
        }
    }

    /// The visiting order.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Total cyclic travel cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Whether the tour visits no cities.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// The matrix this tour was built against.
    pub fn distances(&self) -> &'m DistanceMatrix {
        self.distances
    }

    /// Consumes the tour, returning its route.
    pub fn into_route(self) -> Vec<usize> {
        self.route
    }
}

impl fmt::Display for Tour<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route: ")?;
        for (i, city) in self.route.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{city}")?;
        }
        write!(f, ", Distance: {}", self.cost)
    }
}

/// Cyclic cost `sum(d(route[i], route[(i + 1) % n]))`.
///
/// Routes with fewer than two cities have no edges and cost `0.0`.
pub fn route_cost(route: &[usize], distances: &DistanceMatrix) -> f64 {
    let n = route.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n - 1 {
        sum += distances.get(route[i], route[i + 1]);
    }
    sum + distances.get(route[n - 1], route[0])
}

/// Checks that `route` is a permutation of `0..n`.
pub fn is_permutation(route: &[usize], n: usize) -> bool {
    if route.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in route {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
