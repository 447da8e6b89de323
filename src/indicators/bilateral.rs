//! Pairwise trade relationships from the bilateral matrix.

use crate::parser::{BilateralRelationship, TradeMatrix};
use log::debug;

/// All ordered pairs (i, j), i != j, with any trade in either direction
///
/// # Returns
/// Relationships in matrix order (row-major)
pub fn bilateral_relationships(matrix: &TradeMatrix) -> Vec<BilateralRelationship> {
    let n = matrix.len();
    let mut relationships = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }

            let exports = matrix.value(i, j);
            let imports = matrix.value(j, i);
            if exports <= 0.0 && imports <= 0.0 {
                continue;
            }

            let net_balance = exports - imports;
            let total_trade = exports + imports;

            relationships.push(BilateralRelationship {
                source: matrix.countries[i].clone(),
                target: matrix.countries[j].clone(),
                exports,
                imports,
                net_balance,
                total_trade,
                imbalance_ratio: net_balance.abs() / total_trade,
            });
        }
    }

    debug!("Found {} bilateral relationships", relationships.len());
    relationships
}

/// The `n` relationships with the largest total trade
pub fn top_relationships(
    relationships: &[BilateralRelationship],
    n: usize,
) -> Vec<BilateralRelationship> {
    let mut sorted = relationships.to_vec();
    sorted.sort_by(|a, b| b.total_trade.total_cmp(&a.total_trade));
    sorted.truncate(n);
    sorted
}

/// Restrict the matrix to the `n` countries with the largest row totals
///
/// Countries are ordered by row total, descending; ties keep matrix order.
pub fn top_n_matrix(matrix: &TradeMatrix, n: usize) -> TradeMatrix {
    let totals: Vec<f64> = (0..matrix.len()).map(|i| matrix.row_total(i)).collect();

    let mut indices: Vec<usize> = (0..matrix.len()).collect();
    indices.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    indices.truncate(n);

    TradeMatrix {
        countries: indices.iter().map(|&i| matrix.countries[i].clone()).collect(),
        matrix: indices
            .iter()
            .map(|&i| indices.iter().map(|&j| matrix.value(i, j)).collect())
            .collect(),
    }
}
