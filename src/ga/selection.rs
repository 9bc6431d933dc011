//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

use crate::tour::Tour;

/// Tournament selection: sample `k` tours with replacement, return the
/// index of the cheapest.
///
/// Earlier samples win ties. When `k` is at least the population size the
/// tournament covers the whole population and the index of its cheapest
/// tour (lowest index on ties) is returned without sampling.
///
/// Higher `k` = stronger selection pressure.
///
/// # Complexity
/// O(k) per selection, O(n) when `k >= n`
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Tour<'_>], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    if k >= n {
        return best_index(population);
    }

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].cost() < population[best_idx].cost() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Index of the cheapest tour, lowest index on ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn best_index(population: &[Tour<'_>]) -> usize {
    assert!(!population.is_empty(), "population must not be empty");
    let mut best = 0;
    for (i, tour) in population.iter().enumerate().skip(1) {
        if tour.cost() < population[best].cost() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DistanceMatrix;
    use crate::random::create_rng;

    /// Line of 5 cities: tour cost depends only on route shape.
    fn line() -> DistanceMatrix {
        DistanceMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs()).unwrap()
    }

    fn make_population(m: &DistanceMatrix) -> Vec<Tour<'_>> {
        // Costs: 8, 10, 12, 10.
        vec![
            Tour::new(vec![0, 1, 2, 3, 4], m).unwrap(),
            Tour::new(vec![0, 2, 1, 4, 3], m).unwrap(),
            Tour::new(vec![0, 4, 1, 3, 2], m).unwrap(),
            Tour::new(vec![0, 1, 3, 2, 4], m).unwrap(),
        ]
    }

    #[test]
    fn test_population_costs() {
        let m = line();
        let costs: Vec<f64> = make_population(&m).iter().map(|t| t.cost()).collect();
        assert_eq!(costs, vec![8.0, 10.0, 12.0, 10.0]);
    }

    #[test]
    fn test_full_tournament_always_picks_best() {
        let m = line();
        let pop = make_population(&m);
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert_eq!(tournament(&pop, pop.len(), &mut rng), 0);
        }
        assert_eq!(tournament(&pop, 100, &mut rng), 0);
    }

    #[test]
    fn test_tournament_favors_best() {
        let m = line();
        let pop = make_population(&m);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 3, &mut rng)] += 1;
        }
        // P(best in 3 draws) = 1 - (3/4)^3 ~ 0.58
        assert!(
            counts[0] > 5000,
            "expected best to be selected >50% of the time, got {counts:?}"
        );
        assert!(counts[2] < counts[0]);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let m = line();
        let pop = make_population(&m);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_single_individual() {
        let m = line();
        let pop = vec![Tour::new(vec![4, 3, 2, 1, 0], &m).unwrap()];
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
        assert_eq!(tournament(&pop, 1, &mut rng), 0);
    }

    #[test]
    fn test_best_index_ties_pick_first() {
        let m = line();
        let pop = vec![
            Tour::new(vec![0, 2, 1, 4, 3], &m).unwrap(),
            Tour::new(vec![0, 1, 2, 3, 4], &m).unwrap(),
            Tour::new(vec![4, 3, 2, 1, 0], &m).unwrap(),
        ];
        assert_eq!(best_index(&pop), 1);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Tour<'_>> = vec![];
        let mut rng = create_rng(42);
        tournament(&pop, 3, &mut rng);
    }
}
