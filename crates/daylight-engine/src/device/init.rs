/// GPU setup options.
///
/// The visualization draws a handful of quads per frame, so the defaults are
/// tuned for portability rather than throughput.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behaviour. FIFO is available everywhere and paces frames to vsync.
    pub present_mode: wgpu::PresentMode,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,

    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            power_preference: wgpu::PowerPreference::LowPower,
        }
    }
}
