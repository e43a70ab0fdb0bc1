//! Collision detection and response for axis-aligned vehicle sprites
//!
//! Overlapping vehicles are pushed apart along the axis of least penetration,
//! then exchange a 1-D elastic impulse along that axis. The player is far
//! lighter than the traffic, so most of the impulse lands on the player.

use glam::Vec2;

use super::entity::{Entity, Tag};
use super::scene::Scene;

/// Separation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

/// Overlap between two boxes along the shallow axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub axis: Axis,
    /// Penetration depth along `axis` (always positive)
    pub depth: f32,
    /// +1 when `b` lies toward the positive side of `a`, -1 otherwise
    pub direction: f32,
}

/// Overlap of two boxes on each axis (positive means overlapping)
#[inline]
pub fn overlap(a: &Entity, b: &Entity) -> Vec2 {
    let a_max = a.pos + a.size;
    let b_max = b.pos + b.size;
    a_max.min(b_max) - a.pos.max(b.pos)
}

/// Check two entities for a collision
///
/// Returns `None` unless the boxes overlap strictly on both axes.
pub fn contact(a: &Entity, b: &Entity) -> Option<Contact> {
    let o = overlap(a, b);
    if o.x <= 0.0 || o.y <= 0.0 {
        return None;
    }

    let axis = if o.x < o.y { Axis::X } else { Axis::Y };
    let delta = axis.of(b.center()) - axis.of(a.center());
    Some(Contact {
        axis,
        depth: axis.of(o),
        direction: if delta < 0.0 { -1.0 } else { 1.0 },
    })
}

/// Separate two overlapping bodies and exchange momentum
///
/// The impulse is only applied while the bodies are still closing, so a
/// pair that is already separating is not bounced back together.
pub fn resolve(a: &mut Entity, b: &mut Entity, contact: &Contact) {
    let axis = contact.axis;
    let push = contact.direction * contact.depth * 0.5;
    *axis.of_mut(&mut a.pos) -= push;
    *axis.of_mut(&mut b.pos) += push;

    let total_mass = a.mass + b.mass;
    if total_mass <= 0.0 {
        return;
    }

    let va = axis.of(a.vel);
    let vb = axis.of(b.vel);
    let impulse = 2.0 * (vb - va) / total_mass;
    // Closing when the relative velocity points against the separation direction
    if impulse * contact.direction < 0.0 {
        *axis.of_mut(&mut a.vel) += impulse * b.mass;
        *axis.of_mut(&mut b.vel) -= impulse * a.mass;
    }
}

/// Resolve every colliding pair of vehicles in the scene
///
/// Returns true when the player took part in at least one collision.
pub fn resolve_vehicles(scene: &mut Scene) -> bool {
    let vehicles: Vec<usize> = scene
        .iter()
        .enumerate()
        .filter(|(_, e)| e.tag.is_vehicle())
        .map(|(i, _)| i)
        .collect();

    let mut player_hit = false;
    for (n, &i) in vehicles.iter().enumerate() {
        for &j in &vehicles[n + 1..] {
            let (a, b) = scene.pair_mut(i, j);
            if let Some(c) = contact(a, b) {
                resolve(a, b, &c);
                if a.tag == Tag::Player || b.tag == Tag::Player {
                    player_hit = true;
                }
            }
        }
    }
    player_hit
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::{ENEMY_MASS, PLAYER_MASS};
    use crate::sim::entity::{ImageId, SpriteSizes};

    fn car(tag: Tag, pos: Vec2, vel: Vec2, mass: f32) -> Entity {
        let mut sizes = SpriteSizes::new();
        sizes.insert(ImageId::Car(0), 60.0, 30.0);
        Entity::sprite(ImageId::Car(0), pos, &sizes)
            .with_tag(tag)
            .with_body(mass, vel)
    }

    #[test]
    fn test_no_contact_when_touching_edges() {
        let a = car(Tag::Enemy, Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0);
        let b = car(Tag::Enemy, Vec2::new(60.0, 0.0), Vec2::ZERO, 1.0);
        assert!(contact(&a, &b).is_none());
        let c = car(Tag::Enemy, Vec2::new(0.0, 30.0), Vec2::ZERO, 1.0);
        assert!(contact(&a, &c).is_none());
    }

    #[test]
    fn test_shallow_axis_is_chosen() {
        // 10 px overlap on x, 25 px on y
        let a = car(Tag::Enemy, Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0);
        let b = car(Tag::Enemy, Vec2::new(50.0, 5.0), Vec2::ZERO, 1.0);
        let c = contact(&a, &b).unwrap();
        assert_eq!(c.axis, Axis::X);
        assert_eq!(c.depth, 10.0);
        assert_eq!(c.direction, 1.0);

        // 58 px overlap on x, 4 px on y, b above a
        let b = car(Tag::Enemy, Vec2::new(2.0, -26.0), Vec2::ZERO, 1.0);
        let c = contact(&a, &b).unwrap();
        assert_eq!(c.axis, Axis::Y);
        assert_eq!(c.depth, 4.0);
        assert_eq!(c.direction, -1.0);
    }

    #[test]
    fn test_equal_masses_swap_closing_velocities() {
        let mut a = car(Tag::Enemy, Vec2::new(0.0, 0.0), Vec2::new(0.3, 0.0), 1.0);
        let mut b = car(Tag::Enemy, Vec2::new(55.0, 0.0), Vec2::new(0.1, 0.0), 1.0);
        let c = contact(&a, &b).unwrap();
        resolve(&mut a, &mut b, &c);
        assert!((a.vel.x - 0.1).abs() < 1e-6);
        assert!((b.vel.x - 0.3).abs() < 1e-6);
        assert!(overlap(&a, &b).x <= 1e-4);
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let mut a = car(Tag::Enemy, Vec2::new(0.0, 0.0), Vec2::new(0.1, 0.0), 1.0);
        let mut b = car(Tag::Enemy, Vec2::new(55.0, 0.0), Vec2::new(0.3, 0.0), 1.0);
        let c = contact(&a, &b).unwrap();
        resolve(&mut a, &mut b, &c);
        assert_eq!(a.vel.x, 0.1);
        assert_eq!(b.vel.x, 0.3);
    }

    #[test]
    fn test_light_player_takes_most_of_impulse() {
        let mut player = car(Tag::Player, Vec2::new(0.0, 0.0), Vec2::new(0.4, 0.0), PLAYER_MASS);
        let mut enemy = car(Tag::Enemy, Vec2::new(55.0, 0.0), Vec2::new(0.2, 0.0), ENEMY_MASS);
        let c = contact(&player, &enemy).unwrap();
        resolve(&mut player, &mut enemy, &c);
        let player_dv = (player.vel.x - 0.4).abs();
        let enemy_dv = (enemy.vel.x - 0.2).abs();
        assert!(player_dv > 10.0 * enemy_dv);
        // Momentum conserved
        let before = PLAYER_MASS * 0.4 + ENEMY_MASS * 0.2;
        let after = PLAYER_MASS * player.vel.x + ENEMY_MASS * enemy.vel.x;
        assert!((before - after).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_vehicles_flags_player_only() {
        let mut scene = Scene::new();
        scene.push(car(Tag::Enemy, Vec2::new(200.0, 0.0), Vec2::ZERO, 1.0));
        scene.push(car(Tag::Enemy, Vec2::new(210.0, 0.0), Vec2::ZERO, 1.0));
        scene.push(car(Tag::Player, Vec2::new(0.0, 100.0), Vec2::ZERO, PLAYER_MASS));
        assert!(!resolve_vehicles(&mut scene));

        scene.push(car(Tag::Enemy, Vec2::new(20.0, 110.0), Vec2::ZERO, 1.0));
        assert!(resolve_vehicles(&mut scene));
    }

    #[test]
    fn test_non_vehicles_ignored() {
        let mut scene = Scene::new();
        scene.push(car(Tag::Road, Vec2::ZERO, Vec2::ZERO, 0.0));
        scene.push(car(Tag::Player, Vec2::ZERO, Vec2::ZERO, PLAYER_MASS));
        assert!(!resolve_vehicles(&mut scene));
        assert_eq!(scene.as_slice()[1].pos, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_resolution_leaves_no_overlap_on_resolved_axis(
            bx in -59.0f32..59.0,
            by in -29.0f32..29.0,
            avx in -0.5f32..0.5,
            avy in -0.3f32..0.3,
            bvx in -0.5f32..0.5,
            bvy in -0.3f32..0.3,
            light_a in any::<bool>()
        ) {
            let mass_a = if light_a { PLAYER_MASS } else { ENEMY_MASS };
            let mut a = car(Tag::Player, Vec2::new(100.0, 100.0), Vec2::new(avx, avy), mass_a);
            let b_pos = Vec2::new(100.0 + bx, 100.0 + by);
            let mut b = car(Tag::Enemy, b_pos, Vec2::new(bvx, bvy), ENEMY_MASS);
            if let Some(c) = contact(&a, &b) {
                resolve(&mut a, &mut b, &c);
                let o = overlap(&a, &b);
                let remaining = match c.axis { Axis::X => o.x, Axis::Y => o.y };
                prop_assert!(remaining <= 1e-3, "residual overlap {remaining}");
            }
        }
    }
}
