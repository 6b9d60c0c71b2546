use bevy::{
    core_pipeline::{
        core_3d::graph::{Core3d, Node3d},
        fullscreen_vertex_shader::fullscreen_shader_vertex_state,
        prepass::ViewPrepassTextures,
    },
    ecs::query::QueryItem,
    prelude::*,
    render::{
        RenderApp,
        extract_component::{
            ComponentUniforms, DynamicUniformIndex, ExtractComponent, ExtractComponentPlugin,
            UniformComponentPlugin,
        },
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        render_resource::{
            binding_types::{texture_2d, texture_depth_2d, uniform_buffer},
            *,
        },
        renderer::{RenderContext, RenderDevice},
        view::ViewTarget,
    },
};

use crate::constants::path::OUTLINE_SHADER_PATH;

/// Glow around the globe silhouette, drawn from the camera's depth prepass.
///
/// Only geometry that writes depth is outlined, so the background sprite and
/// the translucent country highlight never produce edges.
#[derive(Component, Debug, Clone, Copy, PartialEq, ExtractComponent, ShaderType)]
pub struct OutlineSettings {
    /// Outline colour, alpha scales the whole effect.
    pub edge_colour: Vec4,
    /// Gain on the share of neighbours that fall across the silhouette.
    pub edge_strength: f32,
    /// Reach in pixels of the silhouette search.
    pub edge_thickness: f32,
}

pub struct OutlinePostProcessPlugin;

impl Plugin for OutlinePostProcessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ExtractComponentPlugin::<OutlineSettings>::default(),
            UniformComponentPlugin::<OutlineSettings>::default(),
        ));

        if let Some(render_app) = app.get_sub_app_mut(RenderApp) {
            render_app
                .add_render_graph_node::<ViewNodeRunner<GlobeOutlineNode>>(Core3d, GlobeOutline)
                .add_render_graph_edges(
                    Core3d,
                    (
                        Node3d::Tonemapping,
                        GlobeOutline,
                        Node3d::EndMainPassPostProcessing,
                    ),
                );
        }
    }

    fn finish(&self, app: &mut App) {
        if let Some(render_app) = app.get_sub_app_mut(RenderApp) {
            render_app.init_resource::<GlobeOutlinePipeline>();
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
struct GlobeOutline;

#[derive(Default)]
struct GlobeOutlineNode;

impl ViewNode for GlobeOutlineNode {
    type ViewQuery = (
        &'static ViewTarget,
        &'static ViewPrepassTextures,
        &'static DynamicUniformIndex<OutlineSettings>,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, prepass, settings_index): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let outline = world.resource::<GlobeOutlinePipeline>();
        let Some(pipeline) = world
            .resource::<PipelineCache>()
            .get_render_pipeline(outline.pipeline_id)
        else {
            return Ok(());
        };
        // Cameras without a depth prepass have no silhouette to trace.
        let Some(depth) = prepass.depth_view() else {
            return Ok(());
        };
        let Some(settings) = world
            .resource::<ComponentUniforms<OutlineSettings>>()
            .uniforms()
            .binding()
        else {
            return Ok(());
        };

        let target = view_target.post_process_write();
        let bind_group = outline.bind_group(
            render_context.render_device(),
            target.source,
            depth,
            settings,
        );

        let mut pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
            label: Some("globe_outline_pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: target.destination,
                resolve_target: None,
                ops: Operations::default(),
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_render_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[settings_index.index()]);
        pass.draw(0..3, 0..1);

        Ok(())
    }
}

/// Colour and depth are read texel by texel, so the pass needs no sampler.
#[derive(Resource)]
struct GlobeOutlinePipeline {
    layout: BindGroupLayout,
    pipeline_id: CachedRenderPipelineId,
}

impl GlobeOutlinePipeline {
    fn bind_group(
        &self,
        device: &RenderDevice,
        colour: &TextureView,
        depth: &TextureView,
        settings: BindingResource,
    ) -> BindGroup {
        device.create_bind_group(
            "globe_outline_bind_group",
            &self.layout,
            &BindGroupEntries::sequential((colour, depth, settings)),
        )
    }
}

impl FromWorld for GlobeOutlinePipeline {
    fn from_world(world: &mut World) -> Self {
        let layout = world.resource::<RenderDevice>().create_bind_group_layout(
            "globe_outline_bind_group_layout",
            &BindGroupLayoutEntries::sequential(
                ShaderStages::FRAGMENT,
                (
                    texture_2d(TextureSampleType::Float { filterable: false }),
                    texture_depth_2d(),
                    uniform_buffer::<OutlineSettings>(true),
                ),
            ),
        );

        let shader = world.load_asset(OUTLINE_SHADER_PATH);
        let pipeline_id = world
            .resource_mut::<PipelineCache>()
            .queue_render_pipeline(outline_pipeline_descriptor(layout.clone(), shader));

        Self {
            layout,
            pipeline_id,
        }
    }
}

fn outline_pipeline_descriptor(
    layout: BindGroupLayout,
    shader: Handle<Shader>,
) -> RenderPipelineDescriptor {
    RenderPipelineDescriptor {
        label: Some("globe_outline_pipeline".into()),
        layout: vec![layout],
        vertex: fullscreen_shader_vertex_state(),
        fragment: Some(FragmentState {
            shader,
            shader_defs: Vec::new(),
            entry_point: "fragment".into(),
            targets: vec![Some(ColorTargetState {
                format: TextureFormat::bevy_default(),
                blend: None,
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        push_constant_ranges: Vec::new(),
        zero_initialize_workgroup_memory: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::render_settings::OUTLINE_SETTINGS;

    #[test]
    fn globe_outline_is_a_white_ten_pixel_glow() {
        assert_eq!(OUTLINE_SETTINGS.edge_colour, Vec4::ONE);
        assert_eq!(OUTLINE_SETTINGS.edge_strength, 5.0);
        assert_eq!(OUTLINE_SETTINGS.edge_thickness, 10.0);
    }

    #[test]
    fn settings_fit_one_uniform_slot() {
        // vec4 plus two floats, padded to the 16-byte uniform alignment.
        assert_eq!(OutlineSettings::min_size().get(), 32);
    }
}
