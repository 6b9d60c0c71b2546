use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;

use super::state::CandidateMeshes;

/// One intersection between a pick ray and a candidate mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Casts rays against the candidate meshes of the loaded scene.
pub trait SceneRayCaster {
    /// All hits on `candidates`, nearest first.
    fn intersect(&mut self, ray: Ray3d, candidates: &CandidateMeshes) -> Vec<PickHit>;
}

impl SceneRayCaster for MeshRayCast<'_, '_> {
    fn intersect(&mut self, ray: Ray3d, candidates: &CandidateMeshes) -> Vec<PickHit> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let filter = |entity: Entity| candidates.contains(entity);
        // Scene visibility only; the highlight overlay is never a candidate.
        let settings = MeshRayCastSettings::default()
            .with_visibility(RayCastVisibility::Visible)
            .with_filter(&filter)
            .never_early_exit();

        self.cast_ray(ray, &settings)
            .iter()
            .map(|(entity, hit)| PickHit {
                entity: *entity,
                distance: hit.distance,
                point: hit.point,
            })
            .collect()
    }
}

/// Build a world-space ray through a point given in normalised device coordinates.
pub fn ray_from_ndc(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<Ray3d> {
    // Reverse-Z: depth 1 is the near plane.
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;

    Some(Ray3d::new(near, direction))
}

/// Only the nearest hit is used, even when the ray pierces several meshes.
pub fn nearest_hit(hits: impl IntoIterator<Item = PickHit>) -> Option<PickHit> {
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports a fixed list of hits for whichever candidates are registered.
    struct FixedHits(Vec<PickHit>);

    impl SceneRayCaster for FixedHits {
        fn intersect(&mut self, _ray: Ray3d, candidates: &CandidateMeshes) -> Vec<PickHit> {
            self.0
                .iter()
                .copied()
                .filter(|hit| candidates.contains(hit.entity))
                .collect()
        }
    }

    fn hit(entity: Entity, distance: f32) -> PickHit {
        PickHit {
            entity,
            distance,
            point: Vec3::ZERO,
        }
    }

    #[test]
    fn nearest_hit_wins_regardless_of_order() {
        let mut world = World::new();
        let far = world.spawn_empty().id();
        let near = world.spawn_empty().id();

        let picked = nearest_hit([hit(far, 3.2), hit(near, 2.1)]);
        assert_eq!(picked.map(|h| h.entity), Some(near));
        assert_eq!(nearest_hit(Vec::new()), None);
    }

    #[test]
    fn hits_outside_the_candidate_set_are_ignored() {
        let mut world = World::new();
        let ocean = world.spawn_empty().id();
        let italy = world.spawn_empty().id();

        let mut candidates = CandidateMeshes::default();
        candidates.register(italy, Some("italy"), None, "globe");

        let mut caster = FixedHits(vec![hit(ocean, 1.0), hit(italy, 1.1)]);
        let hits = caster.intersect(Ray3d::new(Vec3::ZERO, Dir3::Z), &candidates);

        assert_eq!(nearest_hit(hits).map(|h| h.entity), Some(italy));
    }
}
