//! Projectile lifecycle: spawn from [`SpawnRequest`] messages, fixed-step
//! flight along local +Y, despawn at end of life.
//!
//! Projectiles are kinematic Rapier sensors.  Contacts are observed by
//! [`projectile_contact_system`] and have no gameplay effect yet; damage
//! resolution belongs to whatever owns the targets.
//!
//! Collision groups:
//! - `GROUP_3` — projectiles belong to this group
//! - collide with `GROUP_1` (targets) only; never with the ship (`GROUP_2`)

use crate::config::ShipConfig;
use crate::ship::fire::SpawnRequest;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Per-projectile flight state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub speed: f32,
    /// Seconds since this projectile was spawned.
    pub age: f32,
    pub time_to_live: f32,
}

impl Projectile {
    pub fn new(speed: f32, time_to_live: f32) -> Self {
        Self {
            speed,
            age: 0.0,
            time_to_live,
        }
    }

    /// Advance one physics step and return the new position.
    ///
    /// Travels along the rotated local +Y.
    pub fn advance(&mut self, position: Vec2, rotation: Quat, dt: f32) -> Vec2 {
        let forward = rotation.mul_vec3(Vec3::Y).truncate();
        self.age += dt;
        position + forward * self.speed * dt
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.time_to_live
    }
}

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnRequest>()
            .add_systems(
                Update,
                spawn_projectile_system.after(crate::ship::ship_tick_system),
            )
            .add_systems(FixedUpdate, projectile_flight_system)
            .add_systems(PostUpdate, projectile_contact_system);
    }
}

/// Turn each [`SpawnRequest`] into a projectile entity.
pub fn spawn_projectile_system(
    mut commands: Commands,
    mut requests: MessageReader<SpawnRequest>,
    config: Res<ShipConfig>,
) {
    if requests.is_empty() {
        return;
    }
    let config = config.sanitized();
    for request in requests.read() {
        commands.spawn((
            Projectile::new(config.projectile_speed, config.projectile_lifetime),
            Transform::from_translation(request.position.extend(0.0))
                .with_rotation(request.rotation),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::ball(config.projectile_collider_radius),
            Sensor,
            CollisionGroups::new(
                bevy_rapier2d::geometry::Group::GROUP_3,
                bevy_rapier2d::geometry::Group::GROUP_1,
            ),
            ActiveCollisionTypes::DYNAMIC_KINEMATIC | ActiveCollisionTypes::KINEMATIC_STATIC,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Fixed-step flight and expiry.  Expired projectiles are despawned the same
/// step their age reaches the time-to-live.
pub fn projectile_flight_system(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Projectile, &mut Transform)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (entity, mut proj, mut transform) in q.iter_mut() {
        let next = proj.advance(transform.translation.truncate(), transform.rotation, dt);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
        if proj.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

/// Observe projectile contacts.  No damage is applied.
pub fn projectile_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    q_projectiles: Query<(), With<Projectile>>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        let (projectile, other) = if q_projectiles.contains(e1) {
            (e1, e2)
        } else if q_projectiles.contains(e2) {
            (e2, e1)
        } else {
            continue;
        };
        debug!("[projectile] {projectile:?} touched {other:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_along_local_up() {
        let mut p = Projectile::new(100.0, 1.0);
        let pos = p.advance(Vec2::ZERO, Quat::IDENTITY, 0.5);
        assert!((pos - Vec2::new(0.0, 50.0)).length() < 1e-4);
        assert_eq!(p.age, 0.5);
    }

    #[test]
    fn rotated_projectile_follows_rotation() {
        let mut p = Projectile::new(10.0, 1.0);
        // +90° about Z turns local +Y toward world −X.
        let pos = p.advance(
            Vec2::ZERO,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            1.0,
        );
        assert!((pos - Vec2::new(-10.0, 0.0)).length() < 1e-4, "got {pos:?}");
    }

    #[test]
    fn expires_once_age_reaches_ttl() {
        let mut p = Projectile::new(1.0, 0.5);
        p.advance(Vec2::ZERO, Quat::IDENTITY, 0.25);
        assert!(!p.is_expired());
        p.advance(Vec2::ZERO, Quat::IDENTITY, 0.25);
        assert!(p.is_expired());
    }

    #[test]
    fn contact_with_projectile_has_no_effect() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<CollisionEvent>();
        app.add_systems(PostUpdate, projectile_contact_system);

        let projectile = app.world_mut().spawn(Projectile::new(1.0, 5.0)).id();
        let target = app.world_mut().spawn(Transform::default()).id();

        app.world_mut().write_message(CollisionEvent::Started(
            target,
            projectile,
            bevy_rapier2d::rapier::geometry::CollisionEventFlags::empty(),
        ));
        app.update();

        assert!(app.world().get_entity(projectile).is_ok());
        assert!(app.world().get_entity(target).is_ok());
        assert_eq!(app.world().get::<Projectile>(projectile).unwrap().age, 0.0);
    }
}
