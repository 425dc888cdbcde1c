use crate::error::RenderError;

/// Holds the wgpu surface, device and queue for one window.
pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire an adapter and device able to present to `target`.
    ///
    /// Any failure along the way (surface creation, adapter lookup,
    /// device request) maps to [`RenderError::ContextUnavailable`].
    pub fn new(target: impl Into<wgpu::SurfaceTarget<'static>>) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::ContextUnavailable(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| RenderError::ContextUnavailable("no GPU adapter found".into()))?;

        let info = adapter.get_info();
        tracing::info!("GPU adapter: {} ({})", info.name, info.backend.to_str());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("mandelview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::ContextUnavailable(e.to_string()))?;

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
        })
    }
}
