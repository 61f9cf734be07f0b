//! Minimal arcade physics world: explicit Euler integration of the dynamic
//! body plus begin-contact detection. There is no collision response; the
//! player passes through everything and the game reacts to contact events.

use super::{Body, BodyId, Contact, ContactBody, PhysicsWorld, Shape, Vec2};
use std::collections::BTreeSet;

/// Scene points per physics meter.
pub const DEFAULT_POINTS_PER_METER: f64 = 150.0;

#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    gravity: Vec2,
    points_per_meter: f64,
    /// Obstacles the player overlapped at the end of the previous step.
    touching: BTreeSet<BodyId>,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_METER)
    }
}

impl ArcadePhysics {
    pub fn new(points_per_meter: f64) -> Self {
        Self {
            gravity: Vec2::ZERO,
            points_per_meter,
            touching: BTreeSet::new(),
        }
    }

    pub fn points_per_meter(&self) -> f64 {
        self.points_per_meter
    }
}

impl PhysicsWorld for ArcadePhysics {
    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn step(&mut self, player: &mut Body, obstacles: &[(BodyId, Body)], dt: f64) -> Vec<Contact> {
        if player.dynamic {
            player.velocity += self.gravity * (self.points_per_meter * dt);
            player.position += player.velocity * dt;
        }

        let mut began = Vec::new();
        let mut now_touching = BTreeSet::new();

        for (id, obstacle) in obstacles {
            if obstacle.category & player.contact_test == 0 {
                continue;
            }
            if !overlaps(player, obstacle) {
                continue;
            }
            now_touching.insert(*id);
            if !self.touching.contains(id) {
                began.push(Contact {
                    body_a: ContactBody {
                        id: BodyId::Player,
                        category: player.category,
                    },
                    body_b: ContactBody {
                        id: *id,
                        category: obstacle.category,
                    },
                });
            }
        }

        self.touching = now_touching;
        began
    }

    fn reset(&mut self) {
        self.gravity = Vec2::ZERO;
        self.touching.clear();
    }
}

/// Shape overlap test. Only circle/rect and rect/rect pairs occur in the game.
fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius }, Shape::Rect { width, height }) => {
            circle_rect(a.position, radius, b.position, width, height)
        }
        (Shape::Rect { width, height }, Shape::Circle { radius }) => {
            circle_rect(b.position, radius, a.position, width, height)
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let d = a.position - b.position;
            d.x * d.x + d.y * d.y < (ra + rb) * (ra + rb)
        }
        (
            Shape::Rect {
                width: wa,
                height: ha,
            },
            Shape::Rect {
                width: wb,
                height: hb,
            },
        ) => {
            (a.position.x - b.position.x).abs() * 2.0 < wa + wb
                && (a.position.y - b.position.y).abs() * 2.0 < ha + hb
        }
    }
}

fn circle_rect(center: Vec2, radius: f64, rect_center: Vec2, width: f64, height: f64) -> bool {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let closest_x = center
        .x
        .clamp(rect_center.x - half_w, rect_center.x + half_w);
    let closest_y = center
        .y
        .clamp(rect_center.y - half_h, rect_center.y + half_h);
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx * dx + dy * dy < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::category;

    fn ball(x: f64, y: f64) -> Body {
        Body {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            shape: Shape::Circle { radius: 10.0 },
            category: category::PLAYER,
            contact_test: category::PALLET | category::DIRT | category::GRASS,
            dynamic: true,
        }
    }

    fn ledge(x: f64, y: f64, cat: u32) -> Body {
        Body::new_static(
            Vec2::new(x, y),
            Shape::Rect {
                width: 60.0,
                height: 1.0,
            },
            cat,
        )
    }

    #[test]
    fn test_gravity_integrates_in_points() {
        let mut world = ArcadePhysics::default();
        world.set_gravity(Vec2::new(0.0, -9.8));
        let mut player = ball(100.0, 300.0);

        world.step(&mut player, &[], 1.0 / 60.0);

        let expected_vy = -9.8 * DEFAULT_POINTS_PER_METER / 60.0;
        assert!((player.velocity.y - expected_vy).abs() < 1e-9);
        assert!(player.position.y < 300.0);
    }

    #[test]
    fn test_static_body_not_integrated() {
        let mut world = ArcadePhysics::default();
        world.set_gravity(Vec2::new(3.0, -9.8));
        let mut body = ball(10.0, 10.0);
        body.dynamic = false;

        world.step(&mut body, &[], 0.5);

        assert_eq!(body.position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_contact_reported_once_while_overlapping() {
        let mut world = ArcadePhysics::default();
        let mut player = ball(100.0, 105.0);
        let obstacles = [(BodyId::Platform(0), ledge(100.0, 100.0, category::PALLET))];

        let first = world.step(&mut player, &obstacles, 1.0 / 60.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].body_b.id, BodyId::Platform(0));

        let second = world.step(&mut player, &obstacles, 1.0 / 60.0);
        assert!(second.is_empty());
    }

    #[test]
    fn test_contact_begins_again_after_separation() {
        let mut world = ArcadePhysics::default();
        let mut player = ball(100.0, 105.0);
        let obstacles = [(BodyId::Platform(0), ledge(100.0, 100.0, category::PALLET))];

        assert_eq!(world.step(&mut player, &obstacles, 0.0).len(), 1);
        player.position.y = 200.0;
        assert!(world.step(&mut player, &obstacles, 0.0).is_empty());
        player.position.y = 105.0;
        assert_eq!(world.step(&mut player, &obstacles, 0.0).len(), 1);
    }

    #[test]
    fn test_untested_category_ignored() {
        let mut world = ArcadePhysics::default();
        let mut player = ball(100.0, 100.0);
        let obstacles = [(BodyId::Platform(1), ledge(100.0, 100.0, category::NONE))];

        assert!(world.step(&mut player, &obstacles, 0.0).is_empty());
    }

    #[test]
    fn test_reset_clears_gravity_and_contacts() {
        let mut world = ArcadePhysics::default();
        world.set_gravity(Vec2::new(1.0, -9.8));
        let mut player = ball(100.0, 105.0);
        let obstacles = [(BodyId::Floor, ledge(100.0, 100.0, category::PALLET))];
        world.step(&mut player, &obstacles, 0.0);

        world.reset();

        assert_eq!(world.gravity(), Vec2::ZERO);
        assert_eq!(world.step(&mut player, &obstacles, 0.0).len(), 1);
    }

    #[test]
    fn test_circle_misses_rect_corner() {
        assert!(!circle_rect(
            Vec2::new(0.0, 0.0),
            1.0,
            Vec2::new(2.0, 2.0),
            2.0,
            2.0
        ));
        assert!(circle_rect(
            Vec2::new(0.0, 0.0),
            1.5,
            Vec2::new(2.0, 2.0),
            2.0,
            2.0
        ));
    }
}
