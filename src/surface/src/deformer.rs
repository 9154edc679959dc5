use scene::actor::{ActorBox, ActorRef};
use scene::config::WobblyConfig;
use scene::event::GrabOp;
use springs::model::SpringModel;

use crate::bezier::BezierTable;
use crate::clock::FrameClock;
use crate::grid::DeformGrid;
use crate::V2;

/// Maximize and unmaximize run unattended and are never queried at fine
/// granularity, so they get a coarser fixed tessellation.
pub const REDUCED_TILES: u32 = 10;

const RESIZE_DECAY: f32 = 0.9;
const DELTA_EPS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Initialized,
	Animating,
	Ending,
	Disposed,
}

/// One active window deformation: owns the spring model, the Bezier
/// weight table and the per-frame lookup grid. Driven by `tick` from the
/// frame clock; queried per tessellation vertex by the renderer.
pub struct Deformer {
	phase: Phase,
	op: GrabOp,
	config: WobblyConfig,
	clock: Box<dyn FrameClock>,
	actor: Option<ActorRef>,
	init_size: V2,
	init_pos: V2,
	bezier: BezierTable,
	grid: DeformGrid,
	model: Option<SpringModel>,
	/// Frame-global translation, only ever nonzero for resize grabs
	/// after release; decays to zero while ending.
	delta: V2,
}

impl Deformer {
	pub fn new(
		op: GrabOp,
		config: WobblyConfig,
		clock: Box<dyn FrameClock>,
	) -> Self {
		let config = config.sanitized();
		let (xt, yt) = if op.is_maximize() {
			(REDUCED_TILES as usize, REDUCED_TILES as usize)
		} else {
			(config.x_tiles as usize, config.y_tiles as usize)
		};
		Self {
			phase: Phase::Idle,
			op,
			config,
			clock,
			actor: None,
			init_size: V2::zeros(),
			init_pos: V2::zeros(),
			bezier: BezierTable::new(xt, yt),
			grid: DeformGrid::new(xt, yt),
			model: None,
			delta: V2::zeros(),
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn op(&self) -> GrabOp {
		self.op
	}

	/// Bind to a window actor: capture its geometry, build the spring
	/// model and issue the initial anchor command. `pointer` is the
	/// global grab point, only meaningful for move grabs.
	pub fn attach(&mut self, actor: ActorRef, pointer: (f32, f32)) {
		if self.phase != Phase::Idle {
			return;
		}
		let frame = actor.read().unwrap().frame;
		self.init_size = frame.size();
		self.init_pos = frame.pos();
		let mut model = SpringModel::new(
			frame.width,
			frame.height,
			self.config.friction,
			self.config.spring_k,
			self.config.mass,
		);
		match self.op {
			GrabOp::Move => {
				model.grab(pointer.0 - frame.x, pointer.1 - frame.y);
			}
			GrabOp::Maximized => model.maximize(),
			GrabOp::Unmaximized => model.unmaximize(),
			_ => {
				let (x, y) = self.op.anchor_point(frame.width, frame.height);
				model.grab(x, y);
			}
		}
		self.grid.recompute(&self.bezier, model.particles());
		self.model = Some(model);
		self.actor = Some(actor);
		self.phase = Phase::Initialized;
	}

	/// Start the frame-driven animation. Maximize-family operations are
	/// not interactively trailed and go straight to ending.
	pub fn start(&mut self) {
		if self.phase != Phase::Initialized {
			return;
		}
		self.clock.restart();
		self.phase = if self.op.is_maximize() {
			Phase::Ending
		} else {
			Phase::Animating
		};
	}

	/// The interactive grab released. The animation keeps running until
	/// the model settles; the timer loop decides when to stop.
	pub fn end_grab(&mut self) {
		if self.phase != Phase::Animating {
			return;
		}
		if self.op.is_resize() {
			if let Some(actor) = &self.actor {
				let frame = actor.read().unwrap().frame;
				self.delta = self.init_pos - frame.pos();
			}
		}
		self.phase = Phase::Ending;
	}

	/// Actor frame changed during the grab: drag the anchor with it.
	pub fn actor_moved(&mut self, old: &ActorBox, new: &ActorBox) {
		if self.phase != Phase::Animating {
			return;
		}
		let model = match self.model.as_mut() {
			Some(m) => m,
			None => return,
		};
		if self.op == GrabOp::Move {
			model.move_anchor(new.x - old.x, new.y - old.y);
		} else if self.op.is_resize() {
			let (ox, oy) = self.op.anchor_point(old.width, old.height);
			let (nx, ny) = self.op.anchor_point(new.width, new.height);
			model.move_anchor(
				new.x + nx - old.x - ox,
				new.y + ny - old.y - oy,
			);
		}
	}

	/// One frame: step the model by the elapsed time and rebuild the
	/// lookup grid. Returns false once the effect is finished.
	pub fn tick(&mut self) -> bool {
		match self.phase {
			Phase::Animating | Phase::Ending => {}
			_ => return false,
		}
		let elapsed = self.clock.take_ms();
		if !elapsed.is_finite() || elapsed < 0. {
			eprintln!("WARN: bad frame delta {}", elapsed);
			return true;
		}
		let steps = (elapsed / self.config.speedup_factor) as u32;
		let model = match self.model.as_mut() {
			Some(m) => m,
			None => {
				self.dispose();
				return false;
			}
		};
		model.step(steps);
		self.grid.recompute(&self.bezier, model.particles());
		if self.phase == Phase::Ending {
			self.delta *= RESIZE_DECAY;
			if !model.movement() && self.delta.magnitude() < DELTA_EPS {
				self.dispose();
				return false;
			}
		}
		true
	}

	/// Safe to call any number of times, from any state.
	pub fn dispose(&mut self) {
		if self.phase == Phase::Disposed {
			return;
		}
		self.model = None;
		self.actor = None;
		self.delta = V2::zeros();
		self.phase = Phase::Disposed;
	}

	/// Per-vertex query: (normalized u, v) to deformed local position.
	/// Rescaled by the actor's current render size so the table stays
	/// valid if the compositor renders at a different pixel size.
	pub fn deform_vertex(&self, u: f32, v: f32) -> V2 {
		match self.phase {
			Phase::Idle | Phase::Disposed => {
				return V2::new(u * self.init_size[0], v * self.init_size[1]);
			}
			_ => {}
		}
		let mut pos = self.grid.cell(u, v) + self.delta;
		if let Some(actor) = &self.actor {
			let render = actor.read().unwrap().render_size;
			if self.init_size[0] > 0. && self.init_size[1] > 0. {
				pos[0] *= render[0] / self.init_size[0];
				pos[1] *= render[1] / self.init_size[1];
			}
		}
		pos
	}

	/// The deformation can move geometry outside the actor's nominal
	/// box; the renderer must not clip conservatively.
	pub fn unbounded_paint_volume(&self) -> bool {
		true
	}

	pub fn grid(&self) -> &DeformGrid {
		&self.grid
	}
}
