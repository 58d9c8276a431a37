pub mod camera;
pub mod observation;
pub mod render;
