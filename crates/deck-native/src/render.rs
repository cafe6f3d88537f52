use wgpu::util::DeviceExt;

use deck_core::{FaceImage, Session, CARD_HEIGHT, CARD_WIDTH};
use glam::{Mat4, Vec3};

const STAR_SIZE: f32 = 0.15;
const CURSOR_SIZE: f32 = 0.35;

// fragment styles understood by sprite.wgsl
const STYLE_FLAT: f32 = 0.0;
const STYLE_CARD: f32 = 1.0;
const STYLE_RING: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SpriteInstance {
    model: [[f32; 4]; 4],
    size: [f32; 2],
    color: [f32; 4],
    style: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct AshInstance {
    pos: [f32; 3],
    seed: f32,
    color: [f32; 3],
    age: f32,
}

const SPRITE_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x2,
    6 => Float32x4,
    7 => Float32
];

const ASH_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    1 => Float32x3,
    2 => Float32,
    3 => Float32x3,
    4 => Float32
];

/// Instance buffer that grows to fit whatever a frame needs.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("[render] {} grown to {} bytes", self.label, self.capacity);
        }
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    ash_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    sprites: InstanceBuffer,
    ash: InstanceBuffer,
    bind_group: wgpu::BindGroup,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sprites = InstanceBuffer::new(
            &device,
            "sprite_instances",
            (std::mem::size_of::<SpriteInstance>() * 2048) as u64,
        );
        let ash = InstanceBuffer::new(
            &device,
            "ash_instances",
            (std::mem::size_of::<AshInstance>() * 8192) as u64,
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let sprite_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            format,
            "sprite",
            deck_core::SPRITE_WGSL,
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SPRITE_ATTRS,
            },
        );
        let ash_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            format,
            "ash",
            deck_core::ASH_WGSL,
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<AshInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &ASH_ATTRS,
            },
        );
        log::info!(
            "[render] surface {}x{} format {:?}",
            config.width,
            config.height,
            format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            ash_pipeline,
            uniform_buffer,
            quad_vb,
            sprites,
            ash,
            bind_group,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, session: &Session) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: session.camera().view_proj().to_cols_array_2d(),
            }),
        );

        let sprites = sprite_instances(session);
        let ash = ash_instances(session);
        self.sprites
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&sprites));
        self.ash
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&ash));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            if !sprites.is_empty() {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_vertex_buffer(1, self.sprites.buffer.slice(..));
                rpass.draw(0..6, 0..sprites.len() as u32);
            }
            if !ash.is_empty() {
                rpass.set_pipeline(&self.ash_pipeline);
                rpass.set_vertex_buffer(1, self.ash.buffer.slice(..));
                rpass.draw(0..6, 0..ash.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    label: &str,
    source: &str,
    instances: wgpu::VertexBufferLayout<'_>,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: per-instance data
        instances,
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn face_color(image: &FaceImage) -> [f32; 4] {
    match image {
        FaceImage::Blank => [0.0, 0.0, 0.0, 1.0],
        FaceImage::Procedural(p) => [p.background[0], p.background[1], p.background[2], 1.0],
        FaceImage::Loaded(_) => [0.92, 0.88, 0.78, 1.0],
    }
}

fn back_color(image: &FaceImage) -> [f32; 4] {
    match image {
        FaceImage::Loaded(_) => [0.16, 0.10, 0.26, 1.0],
        other => face_color(other),
    }
}

/// Stars first, then card faces far to near, then the cursor ring on top.
fn sprite_instances(session: &Session) -> Vec<SpriteInstance> {
    let mut out = Vec::with_capacity(session.stars().len() + session.deck().len() * 2 + 1);

    let star_size = [STAR_SIZE, STAR_SIZE];
    out.extend(session.stars().positions().map(|p| SpriteInstance {
        model: Mat4::from_translation(p).to_cols_array_2d(),
        size: star_size,
        color: [0.53, 0.53, 0.53, 0.8],
        style: STYLE_FLAT,
    }));

    let back = back_color(session.back_image());
    let mut faces: Vec<(f32, SpriteInstance)> = Vec::with_capacity(session.deck().len() * 2);
    for card in session.deck().iter() {
        let faces_of = [(&card.back, back), (&card.front, face_color(&card.front_image))];
        for (part, color) in faces_of {
            if !part.visible {
                continue;
            }
            let model = part.matrix(&card.transform);
            faces.push((
                model.w_axis.z,
                SpriteInstance {
                    model: model.to_cols_array_2d(),
                    size: [CARD_WIDTH, CARD_HEIGHT],
                    color,
                    style: STYLE_CARD,
                },
            ));
        }
    }
    faces.sort_by(|a, b| a.0.total_cmp(&b.0));
    out.extend(faces.into_iter().map(|(_, s)| s));

    let cursor = session.cursor();
    if cursor.visible {
        out.push(SpriteInstance {
            model: Mat4::from_translation(cursor.world + Vec3::Z * 0.05).to_cols_array_2d(),
            size: [CURSOR_SIZE, CURSOR_SIZE],
            color: [0.83, 0.69, 0.22, 0.8],
            style: STYLE_RING,
        });
    }
    out
}

fn ash_instances(session: &Session) -> Vec<AshInstance> {
    session
        .ash()
        .bursts()
        .iter()
        .flat_map(|burst| {
            burst.points.iter().map(move |p| AshInstance {
                pos: (burst.origin + p.offset).to_array(),
                seed: p.seed,
                color: p.color,
                age: burst.age,
            })
        })
        .collect()
}
