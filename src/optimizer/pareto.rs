//! Pareto dominance, front partitioning and crowding distance.
//!
//! Every objective is maximized. Functions work on index positions into
//! a slice of fitness vectors, so fronts never hold the plans themselves.

use std::cmp::Ordering;

/// Whether `a` dominates `b`: no worse on every objective and strictly
/// better on at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        match x.partial_cmp(y) {
            Some(Ordering::Less) | None => return false,
            Some(Ordering::Greater) => strictly_better = true,
            Some(Ordering::Equal) => {}
        }
    }
    strictly_better
}

/// Fast non-dominated sort.
///
/// Returns fronts of indices into `fitnesses`: front 0 is dominated by
/// nothing, front k only by members of earlier fronts. Empty fronts are
/// never returned. O(n² · m) for n vectors of m objectives.
pub fn non_dominated_sort<F: AsRef<[f64]>>(fitnesses: &[F]) -> Vec<Vec<usize>> {
    let n = fitnesses.len();
    let mut domination_counts = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut current = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (fitnesses[i].as_ref(), fitnesses[j].as_ref());
            if dominates(a, b) {
                dominated[i].push(j);
                domination_counts[j] += 1;
            } else if dominates(b, a) {
                dominated[j].push(i);
                domination_counts[i] += 1;
            }
        }

        // Later pairs only touch j > i, so i's count is final here.
        if domination_counts[i] == 0 {
            current.push(i);
        }
    }

    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated[i] {
                domination_counts[j] -= 1;
                if domination_counts[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Indices of the non-dominated vectors (front 0).
pub fn pareto_front<F: AsRef<[f64]>>(fitnesses: &[F]) -> Vec<usize> {
    non_dominated_sort(fitnesses)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Crowding distance of each member of one front, in input order.
///
/// Per objective, the extreme members get infinity and interior members
/// accumulate the normalized gap between their neighbours. Objectives with
/// no spread add nothing.
pub fn crowding_distance<F: AsRef<[f64]>>(front: &[F]) -> Vec<f64> {
    let n = front.len();
    let mut distances = vec![0.0; n];
    if n == 0 {
        return distances;
    }

    let objectives = front[0].as_ref().len();
    let mut order: Vec<usize> = (0..n).collect();

    for m in 0..objectives {
        let value = |i: usize| front[i].as_ref()[m];
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let (first, last) = (order[0], order[n - 1]);
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        let spread = value(last) - value(first);
        if spread == 0.0 || !spread.is_finite() {
            continue;
        }

        for k in 1..n.saturating_sub(1) {
            distances[order[k]] += (value(order[k + 1]) - value(order[k - 1])) / spread;
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates() {
        assert!(dominates(&[2.0, 2.0], &[1.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[2.0, 2.0]));
        assert!(!dominates(&[3.0, 1.0], &[1.0, 3.0]));
        assert!(!dominates(&[1.0, 2.0], &[2.0, 2.0]));
    }

    #[test]
    fn test_dominates_nan_never_dominates() {
        assert!(!dominates(&[f64::NAN, 5.0], &[1.0, 1.0]));
        assert!(!dominates(&[5.0, 5.0], &[f64::NAN, 1.0]));
    }

    #[test]
    fn test_non_dominated_sort_layers() {
        let fitnesses = vec![
            vec![1.0, 5.0], // front 0
            vec![3.0, 3.0], // front 0
            vec![5.0, 1.0], // front 0
            vec![2.0, 2.0], // dominated by 1
            vec![1.0, 1.0], // dominated by 3
        ];
        let fronts = non_dominated_sort(&fitnesses);
        assert_eq!(fronts, vec![vec![0, 1, 2], vec![3], vec![4]]);
        assert_eq!(pareto_front(&fitnesses), vec![0, 1, 2]);
    }

    #[test]
    fn test_non_dominated_sort_empty() {
        let fitnesses: Vec<Vec<f64>> = vec![];
        assert!(non_dominated_sort(&fitnesses).is_empty());
        assert!(pareto_front(&fitnesses).is_empty());
    }

    #[test]
    fn test_equal_vectors_share_front() {
        let fitnesses = vec![[1.0, 1.0], [1.0, 1.0]];
        assert_eq!(non_dominated_sort(&fitnesses), vec![vec![0, 1]]);
    }

    #[test]
    fn test_crowding_distance_boundaries_infinite() {
        let front = vec![vec![0.0, 4.0], vec![1.0, 3.0], vec![3.0, 1.0], vec![4.0, 0.0]];
        let d = crowding_distance(&front);
        assert!(d[0].is_infinite());
        assert!(d[3].is_infinite());
        // Interior: (3 - 0) / 4 on each objective.
        assert!((d[1] - 1.5).abs() < 1e-9);
        assert!((d[2] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_crowding_distance_small_fronts() {
        assert!(crowding_distance::<Vec<f64>>(&[]).is_empty());
        let one = crowding_distance(&[vec![1.0, 2.0]]);
        assert!(one[0].is_infinite());
        let two = crowding_distance(&[vec![1.0, 2.0], vec![2.0, 1.0]]);
        assert!(two.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_distance_flat_objective_skipped() {
        let front = vec![vec![0.0, 7.0], vec![1.0, 7.0], vec![2.0, 7.0]];
        let d = crowding_distance(&front);
        assert!((d[1] - 1.0).abs() < 1e-9);
    }
}
