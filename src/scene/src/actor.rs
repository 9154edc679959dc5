use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::V2;

pub type ActorId = u64;
pub type ActorRef = Arc<RwLock<ActorState>>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorBox {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl ActorBox {
	pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn pos(&self) -> V2 {
		V2::new(self.x, self.y)
	}

	pub fn size(&self) -> V2 {
		V2::new(self.width, self.height)
	}
}

/// Compositor-side view of one window actor, shared with the deformer.
/// The scene glue writes it on frame changes, effects only read.
#[derive(Clone, Debug)]
pub struct ActorState {
	pub frame: ActorBox,
	pub render_size: V2,
}

impl ActorState {
	pub fn new_ref(frame: ActorBox) -> ActorRef {
		let result = Self {
			frame,
			render_size: frame.size(),
		};
		Arc::new(RwLock::new(result))
	}

	pub fn set_frame(&mut self, frame: ActorBox) {
		self.frame = frame;
		self.render_size = frame.size();
	}
}
