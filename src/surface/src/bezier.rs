use springs::model::GRID;

fn bernstein(k: usize, t: f32) -> f32 {
	const BINOMIAL: [f32; GRID] = [1., 3., 3., 1.];
	BINOMIAL[k] * t.powi(k as i32) * (1. - t).powi((GRID - 1 - k) as i32)
}

/// Per-vertex bicubic blending weights, precomputed once per deformer.
/// Purely a function of the tile counts; every frame after that is a
/// 16-term weighted sum per vertex, no basis re-evaluation.
pub struct BezierTable {
	x_tiles: usize,
	y_tiles: usize,
	weights: Vec<[f32; GRID * GRID]>,
}

impl BezierTable {
	pub fn new(x_tiles: usize, y_tiles: usize) -> Self {
		let x_tiles = x_tiles.max(1);
		let y_tiles = y_tiles.max(1);
		let mut weights = Vec::with_capacity((x_tiles + 1) * (y_tiles + 1));
		for iy in 0..=y_tiles {
			let ty = iy as f32 / y_tiles as f32;
			for ix in 0..=x_tiles {
				let tx = ix as f32 / x_tiles as f32;
				let mut w = [0f32; GRID * GRID];
				for row in 0..GRID {
					for col in 0..GRID {
						w[row * GRID + col] =
							bernstein(row, ty) * bernstein(col, tx);
					}
				}
				weights.push(w);
			}
		}
		Self {
			x_tiles,
			y_tiles,
			weights,
		}
	}

	pub fn x_tiles(&self) -> usize {
		self.x_tiles
	}

	pub fn y_tiles(&self) -> usize {
		self.y_tiles
	}

	pub fn weights(&self) -> &[[f32; GRID * GRID]] {
		&self.weights
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_bernstein_endpoints() {
		assert!((bernstein(0, 0.) - 1.).abs() < 1e-6);
		assert!((bernstein(3, 1.) - 1.).abs() < 1e-6);
		assert!(bernstein(1, 0.).abs() < 1e-6);
		assert!(bernstein(2, 1.).abs() < 1e-6);
	}

	#[test]
	fn test_partition_of_unity() {
		let table = BezierTable::new(20, 20);
		for w in table.weights() {
			let sum: f32 = w.iter().sum();
			assert!((sum - 1.).abs() < 1e-4, "weight sum {}", sum);
		}
	}

	#[test]
	fn test_degenerate_tiles() {
		let table = BezierTable::new(0, 0);
		assert_eq!(table.x_tiles(), 1);
		assert_eq!(table.weights().len(), 4);
	}
}
