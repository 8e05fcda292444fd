//! Linear assignment solver (Hungarian algorithm, shortest augmenting path).
//!
//! Dense O(n^3) implementation over square `f64` matrices. Callers pad
//! rectangular problems and clamp non-finite cells before solving.

/// Returns `assignment[row] = column` minimizing the total cost.
pub fn solve(costs: &[Vec<f64>]) -> Vec<usize> {
    let n = costs.len();
    if n == 0 {
        return Vec::new();
    }

    debug_assert!(costs.iter().all(|row| row.len() == n));
    debug_assert!(costs.iter().flatten().all(|c| c.is_finite()));

    let inf = f64::INFINITY;
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = inf;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = costs[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=n {
        if p[j] > 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(costs: &[Vec<f64>], assignment: &[usize]) -> f64 {
        assignment.iter().enumerate().map(|(i, &j)| costs[i][j]).sum()
    }

    #[test]
    fn test_solves_small_assignment() {
        let costs = vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ];
        let assignment = solve(&costs);
        assert_eq!(assignment.len(), 3);
        assert!((total(&costs, &assignment) - 5.0).abs() < 1e-9, "expected minimal total cost");
    }

    #[test]
    fn test_negative_costs() {
        let costs = vec![vec![-300.0, -250.0], vec![-300.0, 5000.0]];
        let assignment = solve(&costs);
        assert_eq!(assignment, vec![1, 0]);
    }

    #[test]
    fn test_empty() {
        assert!(solve(&[]).is_empty());
    }

    #[test]
    fn test_matches_brute_force_on_4x4() {
        let costs = vec![
            vec![9.0, 2.0, 7.0, 8.0],
            vec![6.0, 4.0, 3.0, 7.0],
            vec![5.0, 8.0, 1.0, 8.0],
            vec![7.0, 6.0, 9.0, 4.0],
        ];
        let mut best = f64::INFINITY;
        let mut perm = [0usize, 1, 2, 3];
        permute(&mut perm, 0, &mut |p| best = best.min(total(&costs, p)));
        let assignment = solve(&costs);
        assert!((total(&costs, &assignment) - best).abs() < 1e-9);
    }

    fn permute(items: &mut [usize; 4], k: usize, visit: &mut impl FnMut(&[usize])) {
        if k == items.len() {
            visit(items);
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            permute(items, k + 1, visit);
            items.swap(k, i);
        }
    }
}
