use std::sync::mpsc;
use std::time::SystemTime;

use rand::Rng;

use scene::actor::ActorBox;
use scene::config::WobblyConfig;
use scene::event::{GrabOp, SceneEvent};
use surface::clock::ManualClock;
use surface::manager::WobblyManager;

fn main() {
	let start = SystemTime::now();
	let (tx, rx) = mpsc::channel();
	let mut manager = WobblyManager::new(WobblyConfig::default(), rx)
		.with_clocks(Box::new(|| Box::new(ManualClock { step_ms: 16. })));
	let mut rng = rand::thread_rng();
	let mut frame = ActorBox::new(100., 100., 640., 480.);
	tx.send(SceneEvent::GrabBegin {
		actor: 1,
		op: GrabOp::Move,
		pointer: (150., 150.),
		frame,
	})
	.unwrap();
	let drag_frames = 120;
	for _ in 0..drag_frames {
		let old = frame;
		frame.x += 4. + rng.gen_range(-2f32..2f32);
		frame.y += rng.gen_range(-2f32..2f32);
		tx.send(SceneEvent::FrameChanged {
			actor: 1,
			old,
			new: frame,
		})
		.unwrap();
		manager.frame();
	}
	tx.send(SceneEvent::GrabEnd { actor: 1 }).unwrap();
	let mut settle_frames = 0u32;
	while manager.active() > 0 {
		manager.frame();
		settle_frames += 1;
		if settle_frames > 100000 {
			eprintln!("WARN: did not settle");
			break;
		}
	}
	let duration =
		SystemTime::now().duration_since(start).unwrap().as_micros();
	let simulated = (drag_frames + settle_frames) as f32 * 16.;
	eprintln!(
		"{} drag + {} settle frames, {:.1} ms simulated, {:.3} ms wall",
		drag_frames,
		settle_frames,
		simulated,
		duration as f32 / 1e3
	);
}
