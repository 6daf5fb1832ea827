mod alert;
mod cluster;
mod coverage;
mod picture;
mod render;
mod vessel;
mod viewport;

pub use alert::*;
pub use cluster::*;
pub use coverage::*;
pub use picture::*;
pub use render::*;
pub use vessel::*;
pub use viewport::*;
