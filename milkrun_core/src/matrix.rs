use thiserror::Error;

use crate::{location::Location, problem::NodeIdx};

pub type Distance = f64;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("matrix is not square: {rows} rows for {expected} locations")]
    NotSquare { rows: usize, expected: usize },

    #[error("flat matrix has {len} entries, expected {expected}")]
    BadLength { len: usize, expected: usize },

    #[error("negative distance {value} between locations {from} and {to}")]
    NegativeEntry { from: usize, to: usize, value: f64 },
}

/// Pairwise travel distances over all nodes (depot + customers), stored as a
/// flat row-major vector. `index = from * num_locations + to`. Not required
/// to be symmetric; the diagonal is always zero.
#[derive(Debug, Clone)]
pub struct TravelCostMatrix {
    distances: Vec<Distance>,
    num_locations: usize,
}

impl TravelCostMatrix {
    pub fn from_rows(rows: Vec<Vec<Distance>>) -> Result<Self, MatrixError> {
        let num_locations = rows.len();

        for row in &rows {
            if row.len() != num_locations {
                return Err(MatrixError::NotSquare {
                    rows: row.len(),
                    expected: num_locations,
                });
            }
        }

        Self::from_flat(rows.into_iter().flatten().collect(), num_locations)
    }

    pub fn from_flat(
        distances: Vec<Distance>,
        num_locations: usize,
    ) -> Result<Self, MatrixError> {
        let expected = num_locations * num_locations;
        if distances.len() != expected {
            return Err(MatrixError::BadLength {
                len: distances.len(),
                expected,
            });
        }

        for (index, &value) in distances.iter().enumerate() {
            if value < 0.0 {
                return Err(MatrixError::NegativeEntry {
                    from: index / num_locations,
                    to: index % num_locations,
                    value,
                });
            }
        }

        Ok(Self {
            distances,
            num_locations,
        })
    }

    /// Straight-line fallback matrix, symmetric by construction.
    pub fn from_haversine(locations: &[Location]) -> Self {
        let num_locations = locations.len();
        let mut distances = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                distances[i * num_locations + j] = from.haversine_distance(to);
            }
        }

        Self {
            distances,
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Distance {
        if from == to {
            return 0.0;
        }

        self.distances[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.num_locations {
            for j in 0..self.num_locations {
                if self.distances[i * self.num_locations + j]
                    != self.distances[j * self.num_locations + i]
                {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = TravelCostMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NotSquare { rows: 1, .. }));
    }

    #[test]
    fn from_rows_rejects_negative_entries() {
        let err =
            TravelCostMatrix::from_rows(vec![vec![0.0, -2.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NegativeEntry { value, .. } if value == -2.0));
    }

    #[test]
    fn distance_lookup_uses_row_major_order() {
        let matrix =
            TravelCostMatrix::from_rows(vec![vec![0.0, 3.0], vec![7.0, 0.0]]).unwrap();

        assert_eq!(matrix.distance(NodeIdx::new(0), NodeIdx::new(1)), 3.0);
        assert_eq!(matrix.distance(NodeIdx::new(1), NodeIdx::new(0)), 7.0);
        assert_eq!(matrix.distance(NodeIdx::new(1), NodeIdx::new(1)), 0.0);
        assert!(!matrix.is_symmetric());
    }

    #[test]
    fn haversine_matrix_is_symmetric_with_zero_diagonal() {
        let locations = vec![
            Location::from_lon_lat(77.5946, 12.9716),
            Location::from_lon_lat(77.7, 13.1),
            Location::from_lon_lat(77.3, 12.8),
        ];

        let matrix = TravelCostMatrix::from_haversine(&locations);

        assert!(matrix.is_symmetric());
        for i in 0..3 {
            assert_eq!(matrix.distance(NodeIdx::new(i), NodeIdx::new(i)), 0.0);
        }
        assert!(matrix.distance(NodeIdx::new(0), NodeIdx::new(1)) > 0.0);
    }
}
