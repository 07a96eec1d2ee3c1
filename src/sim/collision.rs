//! Collision detection and response for the puck
//!
//! The puck is the only body that moves in response to contact. Mallets are
//! treated as infinite mass: they are read, never pushed. Left/right walls are
//! always solid; top/bottom walls let the puck through the goal opening.

use glam::Vec2;

use super::arena::Arena;
use super::entity::{Mallet, Puck};
use crate::consts::RESTITUTION;

/// What the resolver touched this call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Puck touches the left or right wall: clamped this call, or resting
    /// exactly on the bound
    pub side_wall: bool,
    /// Puck was clamped against the top or bottom wall (outside the goal span)
    pub end_wall: bool,
    /// Index of the last mallet that applied an impulse
    pub mallet_hit: Option<usize>,
    /// Puck's leading edge crossed an end wall inside the goal opening
    pub goal_passthrough: bool,
}

/// Contact between the puck and a single mallet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MalletContact {
    /// Unit normal pointing from the mallet toward the puck
    pub normal: Vec2,
    /// Overlap depth before correction
    pub penetration: f32,
    /// Relative velocity along the normal (negative = approaching)
    pub closing_speed: f32,
    /// Whether an impulse was applied
    pub impulse: bool,
}

/// Resolve the puck against the arena walls and every mallet, in mallet order
pub fn resolve(puck: &mut Puck, mallets: &[Mallet], arena: &Arena) -> CollisionReport {
    let mut report = CollisionReport::default();

    report.side_wall = resolve_side_walls(puck, arena);
    let (end_wall, passthrough) = resolve_end_walls(puck, arena);
    report.end_wall = end_wall;
    report.goal_passthrough = passthrough;

    for (i, mallet) in mallets.iter().enumerate() {
        if let Some(contact) = resolve_mallet(puck, mallet, arena) {
            log::trace!(
                "mallet {} contact: depth {:.2}, closing {:.2}",
                i,
                contact.penetration,
                contact.closing_speed
            );
            if contact.impulse {
                report.mallet_hit = Some(i);
            }
        }
    }

    report
}

/// Left/right walls: clamp and reflect the normal component. Reports a touch
/// whenever the puck ends on a bound, including an exact landing with no clamp.
fn resolve_side_walls(puck: &mut Puck, arena: &Arena) -> bool {
    let r = puck.body.radius;
    if puck.body.pos.x - r < 0.0 {
        puck.body.pos.x = r;
        puck.vel.x = -puck.vel.x;
    } else if puck.body.pos.x + r > arena.width {
        puck.body.pos.x = arena.width - r;
        puck.vel.x = -puck.vel.x;
    }
    puck.body.pos.x <= r || puck.body.pos.x >= arena.width - r
}

/// Top/bottom walls, goal-aware. Returns `(bounced, passed_through)`.
fn resolve_end_walls(puck: &mut Puck, arena: &Arena) -> (bool, bool) {
    let r = puck.body.radius;
    let crossing_top = puck.body.pos.y - r < 0.0;
    let crossing_bottom = !crossing_top && puck.body.pos.y + r > arena.height;

    if !crossing_top && !crossing_bottom {
        return (false, false);
    }

    // Inside the opening the puck is left alone; scoring is decided by the tick
    if arena.in_goal_span(puck.body.pos.x) {
        return (false, true);
    }

    puck.body.pos.y = if crossing_top { r } else { arena.height - r };
    puck.vel.y = -puck.vel.y;
    (true, false)
}

/// Resolve overlap with one mallet. Returns `None` when not touching.
///
/// Penetration is corrected before any velocity change so the puck cannot stick.
/// An impulse is only applied while the bodies are approaching; a puck already
/// separating from the mallet is never re-accelerated by it.
pub fn resolve_mallet(puck: &mut Puck, mallet: &Mallet, arena: &Arena) -> Option<MalletContact> {
    let delta = puck.body.pos - mallet.body.pos;
    let distance = delta.length();
    let min_dist = puck.body.radius + mallet.body.radius;

    if distance >= min_dist {
        return None;
    }

    let penetration = min_dist - distance;

    if distance <= f32::EPSILON {
        // Centres coincide: no defined normal. Push out away from the mallet's
        // own goal and skip the impulse this frame.
        let normal = if mallet.body.pos.y < arena.half_height() {
            Vec2::Y
        } else {
            Vec2::NEG_Y
        };
        puck.body.pos += normal * penetration;
        log::debug!("degenerate puck/mallet overlap resolved without impulse");
        return Some(MalletContact {
            normal,
            penetration,
            closing_speed: 0.0,
            impulse: false,
        });
    }

    let normal = delta / distance;
    puck.body.pos += normal * penetration;

    let closing_speed = (puck.vel - mallet.vel).dot(normal);
    let impulse = closing_speed < 0.0;
    if impulse {
        let j = -(1.0 + RESTITUTION) * closing_speed;
        puck.vel += j * normal;
    }

    Some(MalletContact {
        normal,
        penetration,
        closing_speed,
        impulse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Player;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(1000.0, 1000.0, 400.0)
    }

    fn puck_at(x: f32, y: f32, vx: f32, vy: f32) -> Puck {
        let mut puck = Puck::new(Vec2::new(x, y));
        puck.vel = Vec2::new(vx, vy);
        puck
    }

    fn far_mallets(arena: &Arena) -> [Mallet; 2] {
        // Parked in the corners, out of the way of wall tests
        [
            Mallet::new(Player::One, Vec2::new(arena.width - 40.0, arena.height - 40.0)),
            Mallet::new(Player::Two, Vec2::new(arena.width - 40.0, 40.0)),
        ]
    }

    #[test]
    fn test_left_wall_bounce() {
        let arena = arena();
        let mut puck = puck_at(10.0, 500.0, -30.0, 0.0);
        let report = resolve(&mut puck, &far_mallets(&arena), &arena);

        assert!(report.side_wall);
        assert_eq!(puck.body.pos.x, 20.0);
        assert_eq!(puck.vel.x, 30.0);
    }

    #[test]
    fn test_right_wall_bounce_keeps_tangent() {
        let arena = arena();
        let mut puck = puck_at(995.0, 500.0, 80.0, -45.0);
        resolve(&mut puck, &[], &arena);

        assert_eq!(puck.body.pos.x, 980.0);
        assert_eq!(puck.vel, Vec2::new(-80.0, -45.0));
    }

    #[test]
    fn test_exact_wall_contact_reported_without_bounce() {
        let arena = arena();
        let mut puck = puck_at(20.0, 500.0, 0.0, 120.0);
        let report = resolve(&mut puck, &[], &arena);

        assert!(report.side_wall);
        assert_eq!(puck.body.pos.x, 20.0);
        assert_eq!(puck.vel, Vec2::new(0.0, 120.0));

        let mut puck = puck_at(980.0, 500.0, 0.0, -60.0);
        assert!(resolve(&mut puck, &[], &arena).side_wall);
    }

    #[test]
    fn test_puck_clear_of_walls_untouched() {
        let arena = arena();
        let mut puck = puck_at(50.0, 500.0, -30.0, 0.0);
        let report = resolve(&mut puck, &[], &arena);

        assert_eq!(report, CollisionReport::default());
        assert_eq!(puck.body.pos, Vec2::new(50.0, 500.0));
        assert_eq!(puck.vel.x, -30.0);
    }

    #[test]
    fn test_goal_passthrough_not_deflected() {
        let arena = arena();
        let mut puck = puck_at(500.0, 5.0, 0.0, -50.0);
        let report = resolve(&mut puck, &[], &arena);

        assert!(report.goal_passthrough);
        assert!(!report.end_wall);
        assert_eq!(puck.body.pos.y, 5.0);
        assert_eq!(puck.vel.y, -50.0);
    }

    #[test]
    fn test_outside_goal_deflected() {
        let arena = arena();
        let mut puck = puck_at(200.0, 5.0, 0.0, -50.0);
        let report = resolve(&mut puck, &[], &arena);

        assert!(report.end_wall);
        assert_eq!(puck.body.pos.y, 20.0);
        assert_eq!(puck.vel.y, 50.0);
    }

    #[test]
    fn test_goal_post_is_wall() {
        let arena = arena();
        let mut puck = puck_at(300.0, 990.0, 0.0, 70.0);
        let report = resolve(&mut puck, &[], &arena);

        assert!(report.end_wall);
        assert!(!report.goal_passthrough);
        assert_eq!(puck.body.pos.y, 980.0);
        assert_eq!(puck.vel.y, -70.0);
    }

    #[test]
    fn test_bottom_goal_passthrough() {
        let arena = arena();
        let mut puck = puck_at(650.0, 1010.0, 0.0, 70.0);
        let report = resolve(&mut puck, &[], &arena);

        assert!(report.goal_passthrough);
        assert_eq!(puck.body.pos.y, 1010.0);
    }

    #[test]
    fn test_mallet_impulse_reverses_normal_velocity() {
        let arena = arena();
        let mallet = Mallet::new(Player::One, Vec2::new(500.0, 500.0));
        let mut puck = puck_at(500.0, 550.0, 0.0, -30.0);

        let report = resolve(&mut puck, &[mallet], &arena);
        assert_eq!(report.mallet_hit, Some(0));
        // Pushed out to touching distance
        assert!((puck.body.pos.y - 560.0).abs() < 1e-4);
        // Elastic: normal component flipped
        assert!((puck.vel.y - 30.0).abs() < 1e-4);
        assert!(puck.vel.x.abs() < 1e-4);
    }

    #[test]
    fn test_separating_puck_gets_no_impulse() {
        let arena = arena();
        let mallet = Mallet::new(Player::One, Vec2::new(500.0, 500.0));
        let mut puck = puck_at(500.0, 550.0, 0.0, 30.0);

        let contact = resolve_mallet(&mut puck, &mallet, &arena).unwrap();
        assert!(!contact.impulse);
        assert!((contact.closing_speed - 30.0).abs() < 1e-4);
        assert_eq!(puck.vel, Vec2::new(0.0, 30.0));
        // Overlap still corrected
        assert!((puck.body.pos.y - 560.0).abs() < 1e-4);
    }

    #[test]
    fn test_moving_mallet_adds_kick() {
        let arena = arena();
        let mut mallet = Mallet::new(Player::One, Vec2::new(500.0, 500.0));
        mallet.vel = Vec2::new(0.0, 100.0);
        let mut puck = puck_at(500.0, 550.0, 0.0, 0.0);

        resolve(&mut puck, &[mallet], &arena);
        // closing = (0 - 100) = -100 => j = 200 along +y
        assert!((puck.vel.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_overlap_does_not_panic() {
        let arena = arena();
        let mallet = Mallet::new(Player::Two, Vec2::new(500.0, 200.0));
        let mut puck = puck_at(500.0, 200.0, 10.0, -10.0);

        let contact = resolve_mallet(&mut puck, &mallet, &arena).unwrap();
        assert!(!contact.impulse);
        assert!(puck.body.pos.is_finite());
        assert_eq!(puck.vel, Vec2::new(10.0, -10.0));
        // Pushed toward the centre line, out of the mallet
        assert!((puck.body.pos.y - 260.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_no_residual_penetration(
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 1.0f32..59.0,
            vx in -1500.0f32..1500.0,
            vy in -1500.0f32..1500.0,
        ) {
            let arena = arena();
            let mallet = Mallet::new(Player::One, Vec2::new(500.0, 700.0));
            let offset = Vec2::new(angle.cos(), angle.sin()) * dist;
            let mut puck = puck_at(500.0 + offset.x, 700.0 + offset.y, vx, vy);

            resolve_mallet(&mut puck, &mallet, &arena);
            let after = puck.body.pos.distance(mallet.body.pos);
            prop_assert!(after >= 60.0 - 1e-3);
        }

        #[test]
        fn prop_side_wall_reflection_exact(
            y in 100.0f32..900.0,
            vx in 1.0f32..1500.0,
            vy in -1500.0f32..1500.0,
            depth in 0.1f32..19.0,
        ) {
            let arena = arena();
            let mut puck = puck_at(20.0 - depth, y, -vx, vy);
            resolve(&mut puck, &[], &arena);
            prop_assert_eq!(puck.vel, Vec2::new(vx, vy));
            prop_assert_eq!(puck.body.pos.x, 20.0);
        }
    }
}
