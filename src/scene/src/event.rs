use serde::{Deserialize, Serialize};

use crate::actor::{ActorBox, ActorId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrabOp {
	Move,
	ResizeN,
	ResizeS,
	ResizeE,
	ResizeW,
	ResizeNw,
	ResizeNe,
	ResizeSw,
	ResizeSe,
	Maximized,
	Unmaximized,
}

impl GrabOp {
	pub fn is_resize(&self) -> bool {
		!matches!(self, Self::Move | Self::Maximized | Self::Unmaximized)
	}

	pub fn is_maximize(&self) -> bool {
		matches!(self, Self::Maximized | Self::Unmaximized)
	}

	/// Local point the grab drags: the resized edge midpoint or corner.
	/// Move and maximize grabs anchor elsewhere and never call this.
	pub fn anchor_point(&self, width: f32, height: f32) -> (f32, f32) {
		match self {
			Self::ResizeN => (width * 0.5, 0.),
			Self::ResizeS => (width * 0.5, height),
			Self::ResizeE => (width, height * 0.5),
			Self::ResizeW => (0., height * 0.5),
			Self::ResizeNw => (0., 0.),
			Self::ResizeNe => (width, 0.),
			Self::ResizeSw => (0., height),
			Self::ResizeSe => (width, height),
			_ => (width * 0.5, height * 0.5),
		}
	}
}

/// Events reported by the compositor glue. The manager drains these once
/// per frame; the enum is the whole surface the engine sees of the
/// window system.
#[derive(Clone, Copy, Debug)]
pub enum SceneEvent {
	GrabBegin {
		actor: ActorId,
		op: GrabOp,
		pointer: (f32, f32),
		frame: ActorBox,
	},
	GrabEnd {
		actor: ActorId,
	},
	FrameChanged {
		actor: ActorId,
		old: ActorBox,
		new: ActorBox,
	},
	Maximized {
		actor: ActorId,
		frame: ActorBox,
	},
	Unmaximized {
		actor: ActorId,
		frame: ActorBox,
	},
	ActorDestroyed {
		actor: ActorId,
	},
	OverviewShown,
}
