use std::collections::HashMap;

use bevy::prelude::*;
use country_data::{CountryRecord, lookup_node_name};

use super::controller::HoverOutcome;

/// One pickable mesh from the globe model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateMesh {
    pub entity: Entity,
    /// `None` for meshes whose names are not in the country table.
    pub country: Option<&'static CountryRecord>,
}

/// Meshes eligible for hit testing, in scene traversal order.
/// Filled once when the globe scene is ready, read-only afterwards.
#[derive(Resource, Default, Debug)]
pub struct CandidateMeshes {
    meshes: Vec<CandidateMesh>,
    index: HashMap<Entity, usize>,
}

impl CandidateMeshes {
    /// Register a mesh unless it belongs to the excluded node.
    ///
    /// glTF meshes are spawned as children of their node, so the country key
    /// is looked up on the mesh's own name first and then on its parent's.
    pub fn register(
        &mut self,
        entity: Entity,
        own_name: Option<&str>,
        parent_name: Option<&str>,
        excluded_node: &str,
    ) -> bool {
        if own_name == Some(excluded_node) || parent_name == Some(excluded_node) {
            return false;
        }
        if self.index.contains_key(&entity) {
            return false;
        }

        let country = own_name
            .and_then(lookup_node_name)
            .or_else(|| parent_name.and_then(lookup_node_name));

        self.index.insert(entity, self.meshes.len());
        self.meshes.push(CandidateMesh { entity, country });
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&CandidateMesh> {
        self.index.get(&entity).map(|&i| &self.meshes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateMesh> {
        self.meshes.iter()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Distinct countries reachable by hovering.
    pub fn country_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .meshes
            .iter()
            .filter_map(|mesh| mesh.country.map(|c| c.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// What the pointer is over right now.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HoverState {
    pub entity: Option<Entity>,
    pub country: Option<&'static CountryRecord>,
}

impl HoverState {
    /// Record the outcome of a pointer event.
    ///
    /// Returns true when the hovered country changed, or when the highlight
    /// appeared or disappeared over a mesh without a country.
    pub fn update(&mut self, outcome: &HoverOutcome) -> bool {
        let previous = (self.entity.is_some(), self.country.map(|c| c.id));
        self.entity = outcome.entity();
        self.country = outcome.country();
        previous != (self.entity.is_some(), self.country.map(|c| c.id))
    }

    /// Entity index of the highlighted mesh, as reported to the page.
    pub fn mesh_index(&self) -> Option<u32> {
        self.entity.map(Entity::index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_node_is_never_registered() {
        let mut candidates = CandidateMeshes::default();
        let mut world = World::new();
        let ocean = world.spawn_empty().id();
        let ocean_primitive = world.spawn_empty().id();

        assert!(!candidates.register(ocean, Some("globe"), None, "globe"));
        assert!(!candidates.register(ocean_primitive, Some("Sphere"), Some("globe"), "globe"));
        assert!(candidates.is_empty());
    }

    #[test]
    fn country_resolves_from_own_or_parent_name() {
        let mut candidates = CandidateMeshes::default();
        let mut world = World::new();
        let france = world.spawn_empty().id();
        let spain = world.spawn_empty().id();
        let frame = world.spawn_empty().id();

        assert!(candidates.register(france, Some("france"), None, "globe"));
        assert!(candidates.register(spain, Some("Mesh.004"), Some("Spain"), "globe"));
        assert!(candidates.register(frame, Some("border_frame"), None, "globe"));

        assert_eq!(candidates.get(france).and_then(|c| c.country).map(|c| c.id), Some("france"));
        assert_eq!(candidates.get(spain).and_then(|c| c.country).map(|c| c.id), Some("spain"));
        assert!(candidates.get(frame).is_some_and(|c| c.country.is_none()));
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates.country_count(), 2);
    }

    #[test]
    fn registration_is_idempotent_per_entity() {
        let mut candidates = CandidateMeshes::default();
        let entity = World::new().spawn_empty().id();

        assert!(candidates.register(entity, Some("italy"), None, "globe"));
        assert!(!candidates.register(entity, Some("italy"), None, "globe"));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.iter().next().map(|c| c.entity), Some(entity));
    }

    #[test]
    fn hover_changes_include_meshes_without_a_country() {
        let mut world = World::new();
        let france = world.spawn_empty().id();
        let frame = world.spawn_empty().id();
        let highlighted = |entity, country| HoverOutcome::Highlighted {
            entity,
            mesh: Handle::default(),
            transform: Transform::IDENTITY,
            country,
        };

        let mut state = HoverState::default();
        assert!(state.update(&highlighted(france, lookup_node_name("france"))));
        assert!(!state.update(&highlighted(france, lookup_node_name("france"))));
        assert!(state.update(&highlighted(frame, None)));
        assert_eq!(state.mesh_index(), Some(frame.index()));
        assert!(state.update(&HoverOutcome::Cleared));
        assert_eq!(state.mesh_index(), None);
        assert!(!state.update(&HoverOutcome::Cleared));
    }
}
