//! Integration test: contacts through the physics world
//!
//! Stages a falling player onto each platform kind and checks the bounce,
//! break and super-jump outcomes that reach the event stream.

use cutejump::core::config::GameConfig;
use cutejump::jump::{GameEvent, JumpGame, Platform, PlatformKind, Sound};
use cutejump::physics::{PhysicsWorld, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Started game with one platform of `kind` right under a falling player and
/// every other platform parked far above the camera.
fn staged(kind: PlatformKind) -> (JumpGame, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut game = JumpGame::with_arcade_physics(GameConfig::default(), &mut rng);
    game.start();
    game.drain_events();

    let config = game.config.clone();
    game.platforms[0] = Platform::new(kind, Vec2::new(160.0, 100.0), &config);
    for platform in game.platforms.iter_mut().skip(1) {
        platform.body.position.y = 5_000.0;
    }
    game.player.body.position = Vec2::new(160.0, 118.0);
    game.player.body.velocity = Vec2::new(0.0, -100.0);
    (game, rng)
}

#[test]
fn test_normal_platform_bounces() {
    let (mut game, mut rng) = staged(PlatformKind::Normal);
    game.tick_frame(Some(0.0), &mut rng);

    let events = game.drain_events();
    assert_eq!(events, vec![GameEvent::Sound(Sound::Jump), GameEvent::Haptic]);
    assert!(game.player.velocity().y > 400.0);
}

#[test]
fn test_dirt_platform_breaks() {
    let (mut game, mut rng) = staged(PlatformKind::Breakable);
    game.tick_frame(Some(0.0), &mut rng);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Sound(Sound::Break)));
    assert!(events.contains(&GameEvent::PlatformBroken { index: 0 }));
    assert_eq!(events.last(), Some(&GameEvent::Haptic));
    assert!(game.platforms[0].is_broken());
    assert!(game.player.velocity().y > 400.0);
}

#[test]
fn test_grass_platform_super_jumps_then_expires() {
    let (mut game, mut rng) = staged(PlatformKind::Bouncy);
    game.tick_frame(Some(0.0), &mut rng);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::SuperJumpStarted));
    assert!(game.super_jump.is_active());
    assert!((game.player.velocity().y - 10.0).abs() < 1e-9);

    game.tick_frame(Some(0.0), &mut rng);
    assert!((game.world.gravity().y - 0.1).abs() < 1e-9);

    let mut ended = false;
    for _ in 0..130 {
        game.tick_frame(Some(0.0), &mut rng);
        if game.drain_events().contains(&GameEvent::SuperJumpEnded) {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert!(!game.super_jump.is_active());
    assert_eq!(game.super_jump.scroll_counter, 0.0);
}

#[test]
fn test_rising_player_passes_through() {
    let (mut game, mut rng) = staged(PlatformKind::Breakable);
    game.player.body.position.y = 110.0;
    game.player.body.velocity = Vec2::new(0.0, 300.0);
    game.tick_frame(Some(0.0), &mut rng);

    let events = game.drain_events();
    assert_eq!(events, vec![GameEvent::Haptic]);
    assert!(!game.platforms[0].is_broken());
}
