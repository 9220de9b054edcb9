//! Arena adapter seam
//!
//! The progression and spawn logic never touch entity storage directly; they
//! go through the [`Arena`] trait so the dish can be backed by any engine
//! that provides bounded movable entities and overlap queries. [`WorldArena`]
//! is the built-in implementation: a bounded box with velocity integration
//! and wall bounce, enough for headless play and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Handle to an arena entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

/// Collectible entity groups (the player cell is not a group member)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Low-value nutrient cell with randomized continuous motion
    Roamer,
    /// High-value resource cell, stage-gated spawn
    Resource,
}

impl EntityKind {
    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Roamer => ROAMER_RADIUS,
            EntityKind::Resource => RESOURCE_RADIUS,
        }
    }
}

/// External collaborator contract: bounded movable entities, overlap queries,
/// player kinematics. All queries are stable-ordered by entity id.
pub trait Arena {
    /// Create an entity; position is clamped in bounds by the arena.
    fn spawn(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> EntityId;
    /// Remove an entity. Removing a dead id is a no-op returning false.
    fn remove(&mut self, id: EntityId) -> bool;
    /// Live entity count in a group
    fn count(&self, kind: EntityKind) -> usize;
    /// Live entity ids in a group, ascending
    fn ids(&self, kind: EntityKind) -> Vec<EntityId>;
    /// Overwrite an entity's velocity (dead ids ignored)
    fn set_velocity(&mut self, id: EntityId, vel: Vec2);
    /// Player cell position
    fn player_pos(&self) -> Vec2;
    /// Overwrite the player cell's velocity
    fn set_player_velocity(&mut self, vel: Vec2);
    /// Ids of group members currently overlapping the player, ascending
    fn player_overlaps(&self, kind: EntityKind) -> Vec<EntityId>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entity {
    id: EntityId,
    kind: EntityKind,
    pos: Vec2,
    vel: Vec2,
}

/// Built-in bounded-box arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldArena {
    width: f32,
    height: f32,
    player_pos: Vec2,
    player_vel: Vec2,
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for WorldArena {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl WorldArena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            player_pos: Vec2::new(width / 2.0, height / 2.0),
            player_vel: Vec2::ZERO,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn clamp_in_bounds(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Velocity of a live entity, if any
    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        self.entities.iter().find(|e| e.id == id).map(|e| e.vel)
    }

    /// Advance all kinematics by one timestep. Entities bounce off the walls;
    /// the player clamps against them.
    pub fn step(&mut self, dt: f32) {
        self.player_pos = self.clamp_in_bounds(self.player_pos + self.player_vel * dt, PLAYER_RADIUS);

        for entity in &mut self.entities {
            let radius = entity.kind.radius();
            entity.pos += entity.vel * dt;

            if entity.pos.x < radius || entity.pos.x > self.width - radius {
                entity.vel.x = -entity.vel.x;
            }
            if entity.pos.y < radius || entity.pos.y > self.height - radius {
                entity.vel.y = -entity.vel.y;
            }
            entity.pos = Vec2::new(
                entity.pos.x.clamp(radius, self.width - radius),
                entity.pos.y.clamp(radius, self.height - radius),
            );
        }
    }
}

impl Arena for WorldArena {
    fn spawn(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let pos = self.clamp_in_bounds(pos, kind.radius());
        self.entities.push(Entity { id, kind, pos, vel });
        id
    }

    fn remove(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        before != self.entities.len()
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    fn ids(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
            entity.vel = vel;
        }
    }

    fn player_pos(&self) -> Vec2 {
        self.player_pos
    }

    fn set_player_velocity(&mut self, vel: Vec2) {
        self.player_vel = vel;
    }

    fn player_overlaps(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| {
                e.kind == kind
                    && e.pos.distance_squared(self.player_pos)
                        < (PLAYER_RADIUS + e.kind.radius()).powi(2)
            })
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_clamps_in_bounds() {
        let mut arena = WorldArena::default();
        let id = arena.spawn(EntityKind::Roamer, Vec2::new(-100.0, 9999.0), Vec2::ZERO);
        assert!(arena.ids(EntityKind::Roamer).contains(&id));

        // Entity must sit inside the dish after one step
        arena.step(SIM_DT);
        assert_eq!(arena.count(EntityKind::Roamer), 1);
    }

    #[test]
    fn test_remove_dead_id_is_noop() {
        let mut arena = WorldArena::default();
        let id = arena.spawn(EntityKind::Resource, Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert!(arena.remove(id));
        assert!(!arena.remove(id));
        assert_eq!(arena.count(EntityKind::Resource), 0);
    }

    #[test]
    fn test_wall_bounce_reverses_velocity() {
        let mut arena = WorldArena::default();
        let id = arena.spawn(
            EntityKind::Roamer,
            Vec2::new(ROAMER_RADIUS + 1.0, 300.0),
            Vec2::new(-100.0, 0.0),
        );
        for _ in 0..10 {
            arena.step(SIM_DT);
        }
        // Still in play, now moving away from the wall
        assert!(arena.ids(EntityKind::Roamer).contains(&id));
    }

    #[test]
    fn test_player_overlap_by_distance() {
        let mut arena = WorldArena::default();
        let near = arena.spawn(EntityKind::Roamer, arena.player_pos(), Vec2::ZERO);
        let far = arena.spawn(EntityKind::Roamer, Vec2::new(50.0, 50.0), Vec2::ZERO);

        let hits = arena.player_overlaps(EntityKind::Roamer);
        assert!(hits.contains(&near));
        assert!(!hits.contains(&far));
    }
}
