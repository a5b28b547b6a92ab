//! The wgpu device, queue, and window surface, plus per-frame acquisition.

use std::fmt;

/// Why the GPU could not be brought up for a window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused a device with default limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter reports no configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::SurfaceCreation(_) => "cannot create a window surface",
            Self::AdapterRequest(_) => "no GPU adapter can present to the window",
            Self::DeviceRequest(_) => "GPU device request was refused",
            Self::UnsupportedSurface => "window surface has no supported configuration",
        };
        match std::error::Error::source(self) {
            Some(cause) => write!(f, "{what}: {cause}"),
            None => f.write_str(what),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// First sRGB format in the adapter's preference order, if any.
///
/// Shaders output linear light; an sRGB target encodes it on write.
#[must_use]
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats.iter().copied().find(wgpu::TextureFormat::is_srgb)
}

/// A swapchain image being drawn, with its view and command encoder.
pub struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    /// Color attachment view of the swapchain image.
    pub view: wgpu::TextureView,
    /// Encoder recording this frame's passes.
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue, and the window surface it presents to.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Bring up a device for `window` and configure its surface at
    /// `size` (each dimension at least 1) with vsync.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] naming the step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        log::debug!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("City Device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let (width, height) = (size.0.max(1), size.1.max(1));
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        let capabilities = surface.get_capabilities(&adapter);
        match pick_surface_format(&capabilities.formats) {
            Some(format) => config.format = format,
            None => log::warn!(
                "no sRGB surface format, colors will look dark ({:?})",
                config.format
            ),
        }
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);
        log::info!("surface {:?} at {width}x{height}", config.format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color format of the surface.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Configured surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface. Zero dimensions are ignored; the same size
    /// reconfigures in place (recovery from `Lost` or `Outdated`).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain image and start recording.
    ///
    /// # Errors
    ///
    /// Returns the surface error when no image is available.
    pub fn begin_frame(&self) -> Result<Frame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("City Frame"),
            });
        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submit the frame's commands and present its image.
    pub fn present(&self, frame: Frame) {
        let Frame {
            surface_texture,
            encoder,
            ..
        } = frame;
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }
}
