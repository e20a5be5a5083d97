//! wgpu device + window surface.
//!
//! One `Gpu` per window: it owns the adapter/device/queue, keeps the surface
//! configured across resizes, and hands out one `GpuFrame` per presented frame.

mod error;
mod gpu;
mod init;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
