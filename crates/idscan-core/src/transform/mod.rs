mod mapper;
mod state;

pub use mapper::CoordinateMapper;
pub use state::TransformState;
