//! Contact resolution: classify a begun contact by its category pair and
//! apply the matching bounce.

use super::events::{GameEvent, Sound};
use super::platform::Platform;
use super::player::{Player, SuperJump};
use crate::core::config::GameConfig;
use crate::physics::{category, BodyId, Contact};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Bounce,
    BreakableBounce,
    SuperJump,
}

impl ContactKind {
    /// Classify by the union of both bodies' categories.
    pub fn classify(mask: u32) -> Option<Self> {
        if mask == category::PLAYER | category::PALLET {
            Some(Self::Bounce)
        } else if mask == category::PLAYER | category::DIRT {
            Some(Self::BreakableBounce)
        } else if mask == category::PLAYER | category::GRASS {
            Some(Self::SuperJump)
        } else {
            None
        }
    }
}

/// Mutable scene state a contact may touch.
pub struct ContactTarget<'a> {
    pub player: &'a mut Player,
    pub platforms: &'a mut [Platform],
    pub super_jump: &'a mut SuperJump,
}

/// Resolve one begun contact. Only a falling player bounces; every contact
/// still produces haptic feedback.
pub fn resolve_contact(
    contact: &Contact,
    target: ContactTarget<'_>,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> Option<ContactKind> {
    let ContactTarget {
        player,
        platforms,
        super_jump,
    } = target;

    let resolved = if player.velocity().y < 0.0 {
        ContactKind::classify(contact.mask())
    } else {
        None
    };

    match resolved {
        Some(ContactKind::Bounce) => {
            events.push(GameEvent::Sound(Sound::Jump));
            player.jump(config);
        }
        Some(ContactKind::BreakableBounce) => {
            events.push(GameEvent::Sound(Sound::Jump));
            events.push(GameEvent::Sound(Sound::Break));
            player.jump(config);
            if let Some(BodyId::Platform(index)) = contact.other_than_player() {
                if let Some(platform) = platforms.get_mut(index) {
                    platform.break_apart(config.break_fade_secs);
                    tracing::debug!(index, "Platform broke");
                    events.push(GameEvent::PlatformBroken { index });
                }
            }
        }
        Some(ContactKind::SuperJump) => {
            events.push(GameEvent::Sound(Sound::SuperJump));
            player.super_jump(config);
            super_jump.activate(config.super_jump_secs);
            tracing::debug!(secs = config.super_jump_secs, "Super-jump started");
            events.push(GameEvent::SuperJumpStarted);
        }
        None => {}
    }

    events.push(GameEvent::Haptic);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jump::platform::PlatformKind;
    use crate::physics::{ContactBody, Vec2};

    fn contact_with(index: usize, cat: u32) -> Contact {
        Contact {
            body_a: ContactBody {
                id: BodyId::Platform(index),
                category: cat,
            },
            body_b: ContactBody {
                id: BodyId::Player,
                category: category::PLAYER,
            },
        }
    }

    fn falling_player(config: &GameConfig) -> Player {
        let mut player = Player::new(config);
        player.body.position.y = 200.0;
        player.body.velocity.y = -50.0;
        player
    }

    #[test]
    fn test_classify_pairs() {
        use crate::physics::category::*;
        assert_eq!(ContactKind::classify(PLAYER | PALLET), Some(ContactKind::Bounce));
        assert_eq!(
            ContactKind::classify(PLAYER | DIRT),
            Some(ContactKind::BreakableBounce)
        );
        assert_eq!(
            ContactKind::classify(PLAYER | GRASS),
            Some(ContactKind::SuperJump)
        );
        assert_eq!(ContactKind::classify(PLAYER), None);
        assert_eq!(ContactKind::classify(PALLET | DIRT), None);
        assert_eq!(ContactKind::classify(PLAYER | PALLET | DIRT), None);
    }

    #[test]
    fn test_bounce_sets_jump_velocity() {
        let config = GameConfig::default();
        let mut player = falling_player(&config);
        let mut platforms = vec![Platform::new(
            PlatformKind::Normal,
            Vec2::new(160.0, 180.0),
            &config,
        )];
        let mut sj = SuperJump::default();
        let mut events = Vec::new();

        let kind = resolve_contact(
            &contact_with(0, category::PALLET),
            ContactTarget {
                player: &mut player,
                platforms: &mut platforms,
                super_jump: &mut sj,
            },
            &config,
            &mut events,
        );

        assert_eq!(kind, Some(ContactKind::Bounce));
        assert!((player.velocity().y - (568.0 * 1.2 - 200.0)).abs() < 1e-9);
        assert_eq!(
            events,
            vec![GameEvent::Sound(Sound::Jump), GameEvent::Haptic]
        );
    }

    #[test]
    fn test_rising_player_ignores_contact_but_buzzes() {
        let config = GameConfig::default();
        let mut player = falling_player(&config);
        player.body.velocity.y = 120.0;
        let mut platforms = vec![Platform::new(
            PlatformKind::Breakable,
            Vec2::new(160.0, 180.0),
            &config,
        )];
        let mut sj = SuperJump::default();
        let mut events = Vec::new();

        let kind = resolve_contact(
            &contact_with(0, category::DIRT),
            ContactTarget {
                player: &mut player,
                platforms: &mut platforms,
                super_jump: &mut sj,
            },
            &config,
            &mut events,
        );

        assert_eq!(kind, None);
        assert_eq!(player.velocity().y, 120.0);
        assert!(!platforms[0].is_broken());
        assert_eq!(events, vec![GameEvent::Haptic]);
    }

    #[test]
    fn test_dirt_bounce_breaks_platform() {
        let config = GameConfig::default();
        let mut player = falling_player(&config);
        let mut platforms = vec![
            Platform::new(PlatformKind::Normal, Vec2::new(10.0, 50.0), &config),
            Platform::new(PlatformKind::Breakable, Vec2::new(160.0, 180.0), &config),
        ];
        let mut sj = SuperJump::default();
        let mut events = Vec::new();

        let kind = resolve_contact(
            &contact_with(1, category::DIRT),
            ContactTarget {
                player: &mut player,
                platforms: &mut platforms,
                super_jump: &mut sj,
            },
            &config,
            &mut events,
        );

        assert_eq!(kind, Some(ContactKind::BreakableBounce));
        assert!(player.velocity().y > 0.0);
        assert!(platforms[1].is_broken());
        assert!(platforms[1].fade.is_some());
        assert!(!platforms[0].is_broken());
        assert!(events.contains(&GameEvent::Sound(Sound::Break)));
        assert!(events.contains(&GameEvent::PlatformBroken { index: 1 }));
    }

    #[test]
    fn test_grass_starts_super_jump() {
        let config = GameConfig::default();
        let mut player = falling_player(&config);
        let mut platforms = vec![Platform::new(
            PlatformKind::Bouncy,
            Vec2::new(160.0, 180.0),
            &config,
        )];
        let mut sj = SuperJump::default();
        let mut events = Vec::new();

        let kind = resolve_contact(
            &contact_with(0, category::GRASS),
            ContactTarget {
                player: &mut player,
                platforms: &mut platforms,
                super_jump: &mut sj,
            },
            &config,
            &mut events,
        );

        assert_eq!(kind, Some(ContactKind::SuperJump));
        assert_eq!(player.velocity().y, config.super_jump_impulse);
        assert!(sj.is_active());
        assert!((sj.remaining_secs() - 2.0).abs() < 1e-9);
        assert_eq!(
            events,
            vec![
                GameEvent::Sound(Sound::SuperJump),
                GameEvent::SuperJumpStarted,
                GameEvent::Haptic
            ]
        );
    }
}
