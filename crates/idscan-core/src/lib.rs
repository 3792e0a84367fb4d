pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod extract;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod io;
pub mod payload;
pub mod qr;
pub mod raster;
pub mod scan;
pub mod selection;
pub mod session;
pub mod transform;
