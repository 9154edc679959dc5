use scene::actor::ActorId;
use scene::pr_frame::PrFrame;
use springs::particle::Particle;

use crate::bezier::BezierTable;
use crate::V2;

/// Deformed vertex positions for one frame, recomputed in place from the
/// 16 control particles weighted by the precomputed Bezier table.
pub struct DeformGrid {
	x_tiles: usize,
	y_tiles: usize,
	cells: Vec<V2>,
}

impl DeformGrid {
	pub fn new(x_tiles: usize, y_tiles: usize) -> Self {
		let x_tiles = x_tiles.max(1);
		let y_tiles = y_tiles.max(1);
		Self {
			x_tiles,
			y_tiles,
			cells: vec![V2::zeros(); (x_tiles + 1) * (y_tiles + 1)],
		}
	}

	pub fn recompute(&mut self, table: &BezierTable, particles: &[Particle]) {
		for (cell, w) in self.cells.iter_mut().zip(table.weights().iter()) {
			let mut acc = V2::zeros();
			for (k, p) in particles.iter().enumerate() {
				acc += p.pos * w[k];
			}
			*cell = acc;
		}
	}

	/// Truncating index into the table; clamped so a parametric 1.0
	/// never runs past the last vertex.
	pub fn cell_index(&self, u: f32, v: f32) -> (usize, usize) {
		let ix = ((u * self.x_tiles as f32) as usize).min(self.x_tiles);
		let iy = ((v * self.y_tiles as f32) as usize).min(self.y_tiles);
		(ix, iy)
	}

	pub fn cell(&self, u: f32, v: f32) -> V2 {
		let (ix, iy) = self.cell_index(u, v);
		self.cells[iy * (self.x_tiles + 1) + ix]
	}

	pub fn render(&self, actor: ActorId) -> PrFrame {
		PrFrame {
			actor,
			x_tiles: self.x_tiles as u32,
			y_tiles: self.y_tiles as u32,
			cells: self.cells.iter().map(|c| [c[0], c[1]]).collect(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use springs::model::SpringModel;

	#[test]
	fn test_identity_at_rest() {
		let model = SpringModel::new(300., 200., 2.5, 8., 50.);
		let table = BezierTable::new(20, 20);
		let mut grid = DeformGrid::new(20, 20);
		grid.recompute(&table, model.particles());
		for iy in 0..=20usize {
			for ix in 0..=20usize {
				let expect = V2::new(
					300. * ix as f32 / 20.,
					200. * iy as f32 / 20.,
				);
				let got = grid.cells[iy * 21 + ix];
				assert!(
					(got - expect).magnitude() < 1e-3,
					"vertex ({}, {}): {:?} vs {:?}",
					ix,
					iy,
					got,
					expect
				);
			}
		}
	}

	#[test]
	fn test_cell_indexing() {
		let grid = DeformGrid::new(20, 20);
		assert_eq!(grid.cell_index(0., 0.), (0, 0));
		assert_eq!(grid.cell_index(0.999, 0.999), (19, 19));
		assert_eq!(grid.cell_index(1., 1.), (20, 20));
		assert_eq!(grid.cell_index(1.5, 2.), (20, 20));
		assert_eq!(grid.cell_index(-0.5, -0.1), (0, 0));
	}

	#[test]
	fn test_render_snapshot() {
		let model = SpringModel::new(100., 100., 2.5, 8., 50.);
		let table = BezierTable::new(4, 4);
		let mut grid = DeformGrid::new(4, 4);
		grid.recompute(&table, model.particles());
		let frame = grid.render(3);
		assert_eq!(frame.actor, 3);
		assert_eq!(frame.cells.len(), 25);
		assert!((frame.cells[24][0] - 100.).abs() < 1e-3);
	}
}
