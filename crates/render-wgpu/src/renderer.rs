use crate::error::RenderError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use mandelview_viewport::ViewportState;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    viewport_size: [f32; 2],
    _pad: [f32; 2],
    region_bounds: [f32; 4],
}

impl Uniforms {
    fn from_viewport(viewport: &ViewportState) -> Self {
        let (width, height) = viewport.framebuffer_size;
        Self {
            viewport_size: [width as f32, height as f32],
            _pad: [0.0; 2],
            region_bounds: [
                viewport.imag.0 as f32,
                viewport.imag.1 as f32,
                viewport.real.0 as f32,
                viewport.real.1 as f32,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
}

/// Two triangles covering the full clip-space square.
#[rustfmt::skip]
const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { position: [-1.0,  1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [ 1.0, -1.0] },

    QuadVertex { position: [-1.0,  1.0] },
    QuadVertex { position: [ 1.0,  1.0] },
    QuadVertex { position: [ 1.0, -1.0] },
];

/// Owns the escape-time render pipeline and its static resources.
///
/// Built once at startup; [`EscapeRenderer::draw`] then pushes a viewport
/// snapshot as uniforms and issues one full-screen draw per frame.
pub struct EscapeRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
}

impl EscapeRenderer {
    /// Compile the shader module and build the pipeline.
    ///
    /// Shader validation failures surface as [`RenderError::ShaderCompile`]
    /// and pipeline creation failures as [`RenderError::PipelineLink`],
    /// both carrying the driver's diagnostic text.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::ESCAPE_SHADER.into()),
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderCompile(error.to_string()));
        }

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                viewport_size: [1.0, 1.0],
                _pad: [0.0; 2],
                region_bounds: [-2.0, 2.0, -2.0, 2.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("escape_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::PipelineLink(error.to_string()));
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
        })
    }

    /// Render one frame: clear the target and evaluate the escape
    /// function for every pixel of the given viewport snapshot.
    pub fn draw(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        viewport: &ViewportState,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_viewport(viewport)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("escape_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("escape_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_wgsl_layout() {
        // vec2 + pad + vec4, all f32: 32 bytes with the vec4 at offset 16.
        assert_eq!(std::mem::size_of::<Uniforms>(), 32);
        assert_eq!(std::mem::offset_of!(Uniforms, region_bounds), 16);
    }

    #[test]
    fn uniforms_pack_viewport_fields_in_bounds_order() {
        let viewport = ViewportState {
            framebuffer_size: (800, 600),
            imag: (-2.0, 2.0),
            real: (-8.0 / 3.0, 8.0 / 3.0),
        };
        let uniforms = Uniforms::from_viewport(&viewport);

        assert_eq!(uniforms.viewport_size, [800.0, 600.0]);
        assert_eq!(uniforms.region_bounds[0], -2.0);
        assert_eq!(uniforms.region_bounds[1], 2.0);
        assert!((uniforms.region_bounds[2] - (-8.0 / 3.0) as f32).abs() < 1e-6);
        assert!((uniforms.region_bounds[3] - (8.0 / 3.0) as f32).abs() < 1e-6);
    }

    #[test]
    fn quad_covers_the_clip_space_square() {
        for corner in [[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]] {
            assert!(
                QUAD_VERTICES.iter().any(|v| v.position == corner),
                "corner {corner:?} missing from quad"
            );
        }
        assert_eq!(QUAD_VERTICES.len(), 6);
    }
}
