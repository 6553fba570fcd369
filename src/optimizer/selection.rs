use crate::optimizer::pareto::{crowding_distance, non_dominated_sort};

/// Indices admitted to the parent pool.
///
/// Whole fronts are admitted in rank order while they fit into `budget`;
/// the first front that does not fit is cut by descending crowding
/// distance to fill the remaining places, and later fronts are ignored.
pub fn select_indices<F: AsRef<[f64]>>(fitnesses: &[F], budget: usize) -> Vec<usize> {
    let mut selected = Vec::with_capacity(budget);

    for front in non_dominated_sort(fitnesses) {
        let remaining = budget - selected.len();
        if remaining == 0 {
            break;
        }
        if front.len() <= remaining {
            selected.extend(front);
            continue;
        }

        let members: Vec<&F> = front.iter().map(|&i| &fitnesses[i]).collect();
        let distances = crowding_distance(&members);

        let mut ranked: Vec<(usize, f64)> = front.into_iter().zip(distances).collect();
        // Stable: equal distances keep front order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        selected.extend(ranked.into_iter().take(remaining).map(|(i, _)| i));
        break;
    }

    selected
}

/// Parent pool of `population_size / 2` members drawn from `population`.
pub fn select<T: Clone, F: AsRef<[f64]>>(population: &[T], fitnesses: &[F]) -> Vec<T> {
    select_indices(fitnesses, population.len() / 2)
        .into_iter()
        .map(|i| population[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_fronts_admitted_first() {
        let fitnesses = vec![
            vec![5.0, 5.0], // front 0
            vec![4.0, 4.0], // front 1
            vec![3.0, 3.0], // front 2
            vec![2.0, 2.0], // front 3
        ];
        assert_eq!(select_indices(&fitnesses, 2), vec![0, 1]);
    }

    #[test]
    fn test_partial_front_prefers_extremes() {
        let fitnesses = vec![
            vec![0.0, 4.0],
            vec![1.9, 2.1],
            vec![2.0, 2.0],
            vec![4.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        ];
        // Front 0 has four members, budget three: the two extremes keep
        // infinite distance; the more isolated interior member wins.
        let selected = select_indices(&fitnesses, 3);
        assert_eq!(selected.len(), 3);
        assert!(selected.contains(&0));
        assert!(selected.contains(&3));
    }

    #[test]
    fn test_select_halves_population() {
        let population = vec!["a", "b", "c", "d", "e"];
        let fitnesses = vec![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let parents = select(&population, &fitnesses);
        assert_eq!(parents, vec!["e", "d"]);
    }

    #[test]
    fn test_select_empty_population() {
        let population: Vec<&str> = vec![];
        let fitnesses: Vec<[f64; 1]> = vec![];
        assert!(select(&population, &fitnesses).is_empty());
    }
}
