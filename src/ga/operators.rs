//! Permutation crossover and mutation operators for tours.
//!
//! Operators work on `&[usize]` routes and always return a permutation of
//! the same cities; no repair step is needed afterwards.
//!
//! # Crossover Operators
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`edge_recombination`] (EX): Whitley et al. (1989), preserves adjacency
//!
//! [`Crossover`] selects one of them for the genetic runner.
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Whitley, Starkweather & Fuquay (1989), "Scheduling Problems and Traveling
//!   Salesmen: The Genetic Edge Recombination Operator"

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use smallvec::SmallVec;

use crate::error::TspError;
use crate::tour::is_permutation;

/// Recombination operator used by the genetic runner.
///
/// ```
/// use u_tsp::Crossover;
///
/// assert_eq!("ox".parse::<Crossover>().unwrap(), Crossover::Ox);
/// assert!("cx".parse::<Crossover>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Partially Mapped Crossover.
    #[default]
    Pmx,
    /// Order Crossover.
    Ox,
    /// Edge Recombination.
    Edge,
}

impl Crossover {
    /// Produces one child route from two parent routes.
    ///
    /// # Panics
    /// Panics if the parents have different lengths. Debug builds also
    /// panic if either parent is not a permutation of `0..n`.
    pub fn recombine<R: Rng>(&self, parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Crossover::Pmx => pmx_crossover(parent1, parent2, rng),
            Crossover::Ox => order_crossover(parent1, parent2, rng),
            Crossover::Edge => edge_recombination(parent1, parent2, rng),
        }
    }
}

impl FromStr for Crossover {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PMX" => Ok(Crossover::Pmx),
            "OX" => Ok(Crossover::Ox),
            "EX" | "ERX" => Ok(Crossover::Edge),
            _ => Err(TspError::UnknownCrossover(s.to_string())),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Crossover::Pmx => "PMX",
            Crossover::Ox => "OX",
            Crossover::Edge => "EX",
        })
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX).
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Starting after `end` and wrapping around, fill the remaining
///    positions with parent2's cities in parent2's order (read from
///    position `end + 1` onwards), skipping cities already in the child
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths. Debug builds also panic if
/// either parent is not a permutation of `0..n`.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    ox_build_child(parent1, parent2, start, end)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    debug_assert_parents(template, donor);
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Partially Mapped Crossover (PMX).
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. For each city in parent2's segment that isn't in the child yet,
///    follow the mapping chain to a position outside the segment and
///    place it there
/// 4. Fill remaining positions from parent2
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths. Debug builds also panic if
/// either parent is not a permutation of `0..n`.
pub fn pmx_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    pmx_build_child(parent1, parent2, start, end)
}

/// Build one PMX child: copy segment from `template`, map from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    // A city missing from `donor` would make the mapping chain cycle forever.
    debug_assert_parents(template, donor);
    let n = template.len();
    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut placed = vec![false; n];

    let mut donor_pos = vec![0; n];
    for (pos, &city) in donor.iter().enumerate() {
        donor_pos[city] = pos;
    }

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    for i in start..=end {
        let donor_val = donor[i];
        if placed[donor_val] {
            continue;
        }
        // template[pos] displaced donor_val; find where donor keeps it.
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < start || target > end {
                child[target] = donor_val;
                placed[donor_val] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == sentinel {
            child[i] = donor[i];
        }
    }

    child
}

/// Edge Recombination Crossover (EX).
///
/// # Algorithm (Whitley et al., 1989)
///
/// 1. For every city, collect the union of its two cyclic neighbors in
///    each parent (at most four distinct cities)
/// 2. Start at a uniformly random city
/// 3. Append the current city and remove it from every neighbor list
/// 4. Move to the current city's remaining neighbor with the fewest
///    remaining neighbors of its own, lowest city id on ties; if the
///    current city has no neighbors left, jump to a uniformly random
///    unvisited city
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths. Debug builds also panic if
/// either parent is not a permutation of `0..n`.
pub fn edge_recombination<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }
    debug_assert_parents(parent1, parent2);

    let mut neighbors: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); n];
    for parent in [parent1, parent2] {
        for i in 0..n {
            let city = parent[i];
            for adjacent in [parent[(i + n - 1) % n], parent[(i + 1) % n]] {
                if !neighbors[city].contains(&adjacent) {
                    neighbors[city].push(adjacent);
                }
            }
        }
    }

    // Unvisited cities with O(1) removal: `slot[c]` is c's index in `remaining`.
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut slot: Vec<usize> = (0..n).collect();

    let mut child = Vec::with_capacity(n);
    let mut current = rng.random_range(0..n);

    loop {
        child.push(current);
        let idx = slot[current];
        remaining.swap_remove(idx);
        if idx < remaining.len() {
            slot[remaining[idx]] = idx;
        }
        if remaining.is_empty() {
            break;
        }

        // Adjacency is symmetric, so only current's neighbors list it.
        let adjacent = std::mem::take(&mut neighbors[current]);
        for &other in &adjacent {
            neighbors[other].retain(|c| *c != current);
        }

        current = match adjacent
            .iter()
            .copied()
            .min_by_key(|&c| (neighbors[c].len(), c))
        {
            Some(next) => next,
            None => remaining[rng.random_range(0..remaining.len())],
        };
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two random positions.
///
/// Both positions are drawn independently, so they may coincide.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(route: &mut [usize], rng: &mut R) {
    let n = route.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    route.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

fn debug_assert_parents(parent1: &[usize], parent2: &[usize]) {
    debug_assert!(
        is_permutation(parent1, parent1.len()),
        "parent is not a permutation: {parent1:?}"
    );
    debug_assert!(
        is_permutation(parent2, parent2.len()),
        "parent is not a permutation: {parent2:?}"
    );
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
