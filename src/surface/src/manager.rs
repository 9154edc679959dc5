use std::sync::mpsc::Receiver;

use fnv::FnvHashMap;

use scene::actor::{ActorBox, ActorId, ActorRef, ActorState};
use scene::config::WobblyConfig;
use scene::event::{GrabOp, SceneEvent};
use scene::pr_frame::PrFrame;

use crate::clock::{FrameClock, WallClock};
use crate::deformer::Deformer;

type ClockFactory = Box<dyn Fn() -> Box<dyn FrameClock>>;

/// Owns every live deformation. Once per display frame the host calls
/// `frame()`: pending scene events are drained, each live effect is
/// ticked, finished effects are retired.
pub struct WobblyManager {
	config: WobblyConfig,
	rx: Receiver<SceneEvent>,
	clocks: ClockFactory,
	actors: FnvHashMap<ActorId, ActorRef>,
	effects: FnvHashMap<ActorId, Deformer>,
}

impl WobblyManager {
	pub fn new(config: WobblyConfig, rx: Receiver<SceneEvent>) -> Self {
		Self {
			config: config.sanitized(),
			rx,
			clocks: Box::new(|| Box::<WallClock>::default()),
			actors: FnvHashMap::default(),
			effects: FnvHashMap::default(),
		}
	}

	pub fn with_clocks(mut self, clocks: ClockFactory) -> Self {
		self.clocks = clocks;
		self
	}

	pub fn active(&self) -> usize {
		self.effects.len()
	}

	pub fn deformer(&self, actor: ActorId) -> Option<&Deformer> {
		self.effects.get(&actor)
	}

	fn actor_ref(&mut self, actor: ActorId, frame: ActorBox) -> ActorRef {
		self.actors
			.entry(actor)
			.or_insert_with(|| ActorState::new_ref(frame))
			.clone()
	}

	fn begin(
		&mut self,
		actor: ActorId,
		op: GrabOp,
		pointer: (f32, f32),
		frame: ActorBox,
	) {
		let aref = self.actor_ref(actor, frame);
		aref.write().unwrap().set_frame(frame);
		let mut deformer =
			Deformer::new(op, self.config.clone(), (self.clocks)());
		deformer.attach(aref, pointer);
		deformer.start();
		eprintln!("INFO: wobble begin: actor {} {:?}", actor, op);
		if let Some(mut old) = self.effects.insert(actor, deformer) {
			old.dispose();
		}
	}

	fn handle(&mut self, event: SceneEvent) {
		match event {
			SceneEvent::GrabBegin {
				actor,
				op,
				pointer,
				frame,
			} => {
				if op.is_resize() && !self.config.resize_effect {
					return;
				}
				self.begin(actor, op, pointer, frame);
			}
			SceneEvent::GrabEnd { actor } => {
				if let Some(d) = self.effects.get_mut(&actor) {
					d.end_grab();
				}
			}
			SceneEvent::FrameChanged { actor, old, new } => {
				if let Some(aref) = self.actors.get(&actor) {
					aref.write().unwrap().set_frame(new);
				}
				if let Some(d) = self.effects.get_mut(&actor) {
					d.actor_moved(&old, &new);
				}
			}
			SceneEvent::Maximized { actor, frame } => {
				if self.config.maximize_effect {
					self.begin(actor, GrabOp::Maximized, (0., 0.), frame);
				}
			}
			SceneEvent::Unmaximized { actor, frame } => {
				if self.config.maximize_effect {
					self.begin(actor, GrabOp::Unmaximized, (0., 0.), frame);
				}
			}
			SceneEvent::ActorDestroyed { actor } => {
				if let Some(mut d) = self.effects.remove(&actor) {
					d.dispose();
				}
				self.actors.remove(&actor);
			}
			SceneEvent::OverviewShown => {
				if !self.effects.is_empty() {
					eprintln!(
						"INFO: overview shown, aborting {} effects",
						self.effects.len()
					);
				}
				for d in self.effects.values_mut() {
					d.dispose();
				}
				self.effects.clear();
			}
		}
	}

	pub fn pump(&mut self) {
		while let Ok(event) = self.rx.try_recv() {
			self.handle(event);
		}
	}

	pub fn frame(&mut self) {
		self.pump();
		self.effects.retain(|actor, d| {
			let alive = d.tick();
			if !alive {
				eprintln!("INFO: wobble settled: actor {}", actor);
			}
			alive
		});
	}

	pub fn snapshots(&self) -> Vec<PrFrame> {
		self.effects
			.iter()
			.map(|(actor, d)| d.grid().render(*actor))
			.collect()
	}
}
