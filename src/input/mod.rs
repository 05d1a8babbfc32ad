pub mod frame_gate;
pub mod mapper;
pub mod sample;
pub mod smoother;
pub mod tap;

pub use frame_gate::FrameGate;
pub use mapper::CoordinateMapper;
pub use sample::HandSample;
pub use smoother::PointerSmoother;
pub use tap::TapDetector;
