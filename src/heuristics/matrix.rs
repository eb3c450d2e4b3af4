//! Square value matrix built from the leading numeric tokens.

use super::extract_numbers;
use crate::models::{HeatmapChart, Provenance};

/// Fewest numbers that still make a 3x3 matrix.
pub const MIN_MATRIX_VALUES: usize = 9;
pub const MAX_MATRIX_SIDE: usize = 5;

/// Reshape the first `side * side` numbers row-major into a square matrix.
///
/// The result is a structural placeholder, not a statistical correlation,
/// and is always tagged illustrative.
pub fn heatmap_chart(text: &str) -> Option<HeatmapChart> {
    let numbers = extract_numbers(text);
    if numbers.len() < MIN_MATRIX_VALUES {
        return None;
    }

    let side = MAX_MATRIX_SIDE.min(integer_sqrt(numbers.len()));
    let z = numbers[..side * side]
        .chunks(side)
        .map(<[f64]>::to_vec)
        .collect();

    Some(HeatmapChart {
        z,
        x: (1..=side).map(|i| format!("Metric {}", i)).collect(),
        y: (1..=side).map(|i| format!("Category {}", i)).collect(),
        colorscale: "Viridis".to_string(),
        provenance: Provenance::Illustrative,
    })
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
