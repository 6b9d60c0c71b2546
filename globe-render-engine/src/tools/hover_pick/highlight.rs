use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::constants::interaction::HIGHLIGHT_SCALE_FACTOR;
use crate::constants::render_settings::HIGHLIGHT_COLOUR;

use super::controller::HoverOutcome;

/// The single overlay drawn over the hovered country.
#[derive(Component)]
pub struct CountryHighlight;

/// Spawn the highlight at the scene root, collapsed and hidden.
pub fn spawn_country_highlight(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: HIGHLIGHT_COLOUR,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: Some(Face::Back),
        ..default()
    });

    commands.spawn((
        Name::new("CountryHighlight"),
        CountryHighlight,
        Mesh3d::default(),
        MeshMaterial3d(material),
        Transform::from_scale(Vec3::ZERO),
        Visibility::Hidden,
    ));
}

/// World transform of the hovered mesh, grown slightly so its rim shows
/// around the country.
///
/// The highlight lives at the scene root, so copying the full world transform
/// keeps it aligned no matter how deep the mesh sits in the glTF hierarchy.
pub fn highlight_transform(hit_transform: &GlobalTransform) -> Transform {
    let mut transform = hit_transform.compute_transform();
    transform.scale *= HIGHLIGHT_SCALE_FACTOR;
    transform
}

pub fn apply_highlight(
    outcome: &HoverOutcome,
    transform: &mut Transform,
    mesh: &mut Mesh3d,
    visibility: &mut Visibility,
) {
    match outcome {
        HoverOutcome::Cleared => {
            transform.scale = Vec3::ZERO;
            *visibility = Visibility::Hidden;
        }
        HoverOutcome::Highlighted {
            mesh: hit_mesh,
            transform: hit_transform,
            ..
        } => {
            if mesh.0 != *hit_mesh {
                mesh.0 = hit_mesh.clone();
            }
            *transform = *hit_transform;
            *visibility = Visibility::Visible;
        }
    }
}
