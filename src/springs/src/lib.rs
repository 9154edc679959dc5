pub mod model;
pub mod particle;
pub mod spring;

pub type V2 = nalgebra::Vector2<f32>;
