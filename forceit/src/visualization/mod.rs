pub mod viewer3d;
pub mod headless;
