pub mod color;
pub mod composite;
pub mod consts;
pub mod detection;
pub mod error;
pub mod frame;
pub mod geography;
pub mod io;
pub mod pipeline;
