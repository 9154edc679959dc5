pub mod bezier;
pub mod clock;
pub mod deformer;
pub mod grid;
pub mod manager;

pub type V2 = nalgebra::Vector2<f32>;
