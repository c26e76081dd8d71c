//! Game state and core simulation types
//!
//! Float positions are authoritative; integer rects are derived projections
//! recomputed on demand, never written directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, toggled off by the pause command
    Paused,
    /// Run ended; terminal until an explicit reset
    GameOver,
}

/// Opaque handle to a loaded sprite, owned by the rendering collaborator.
///
/// Entities carry it untouched; hitboxes always come from the fallback sizes
/// in [`crate::consts`], so a missing sprite never changes gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteId(pub u32);

/// Axis-aligned integer rectangle used for collision and draw placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal center, clamped to `[PLAYER_MIN_X, PLAYER_MAX_X]`
    pub center_x: i32,
    pub lives: u8,
    /// Seconds until the next shot is allowed, counted down by capped dt
    pub shot_timer: f32,
    pub sprite: Option<SpriteId>,
}

impl Player {
    pub fn new(sprite: Option<SpriteId>) -> Self {
        Self {
            center_x: WIDTH / 2,
            lives: START_LIVES,
            shot_timer: 0.0,
            sprite,
        }
    }

    /// Move toward a normalized position. Smoothing already happened
    /// upstream, so this is a direct set.
    pub fn move_to(&mut self, x_norm: f32) {
        let target = (x_norm * WIDTH as f32) as i32;
        self.center_x = target.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
    }

    pub fn can_shoot(&self) -> bool {
        self.shot_timer <= 0.0
    }

    pub fn make_shot(&mut self, cooldown: f32) {
        self.shot_timer = cooldown;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.center_x - PLAYER_WIDTH / 2,
            HEIGHT - 30 - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }
}

/// Who fired a bullet; decides travel direction and collision partners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A bullet in flight. Player bullets travel up-screen, enemy bullets down.
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Center position, float-authoritative
    pub pos: Vec2,
    /// Vertical velocity in px per tick (negative = up-screen)
    pub vel_y: f32,
    pub owner: BulletOwner,
    pub sprite: Option<SpriteId>,
}

impl Bullet {
    pub fn player_shot(x: i32, y: i32) -> Self {
        Self {
            pos: Vec2::new(x as f32, y as f32),
            vel_y: PLAYER_BULLET_VEL,
            owner: BulletOwner::Player,
            sprite: None,
        }
    }

    pub fn enemy_shot(x: i32, y: i32) -> Self {
        Self {
            pos: Vec2::new(x as f32, y as f32),
            vel_y: ENEMY_BULLET_VEL,
            owner: BulletOwner::Enemy,
            sprite: None,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32 - BULLET_WIDTH / 2,
            self.pos.y as i32 - BULLET_HEIGHT / 2,
            BULLET_WIDTH,
            BULLET_HEIGHT,
        )
    }
}

/// One enemy in the formation
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Authoritative position (top-left corner)
    pub float_pos: Vec2,
    pub alive: bool,
    pub sprite: Option<SpriteId>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, sprite: Option<SpriteId>) -> Self {
        Self {
            float_pos: Vec2::new(x, y),
            alive: true,
            sprite,
        }
    }

    /// Integer projection of the float position, derived on every read
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.float_pos.x as i32,
            self.float_pos.y as i32,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
        )
    }
}

/// Events emitted during a tick, consumed by the audio/render shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// An enemy was destroyed by a player bullet (explosion cue)
    EnemyDestroyed { x: i32, y: i32 },
    /// The player lost a life
    PlayerHit { lives_left: u8 },
    /// Every enemy in the formation is dead; a new wave was spawned
    WaveCleared { new_level: u32 },
    /// Lives reached zero
    GameOver { score: u64 },
}

/// Complete simulation state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for reproducibility
    pub seed: u64,
    /// Seeded RNG for enemy fire rolls and spawn jitter
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Current formation, replaced wholesale on each new wave
    pub enemies: Vec<Enemy>,
    /// Horizontal march direction, -1.0 or +1.0
    pub direction: f32,
    /// Formation speed in px/s for the current level
    pub enemy_speed: f32,
}

impl GameState {
    /// Create a fresh session at level 1. The first wave is spawned by
    /// [`super::wave::spawn_wave`], called from [`super::wave::reset_game`]
    /// or the session shell.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            player: Player::new(None),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            direction: 1.0,
            enemy_speed: 0.0,
        }
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    /// Per-frame snapshot handed to the rendering collaborator
    pub fn snapshot(&self) -> FrameResult {
        FrameResult {
            phase: self.phase,
            player: self.player.rect(),
            enemies: self.living_enemies().map(|e| e.rect()).collect(),
            bullets: self.bullets.iter().map(|b| b.rect()).collect(),
            enemy_bullets: self.enemy_bullets.iter().map(|b| b.rect()).collect(),
            score: self.score,
            lives: self.player.lives,
            level: self.level,
        }
    }
}

/// Read-only frame record for rendering: positions plus the HUD numbers
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub phase: GamePhase,
    pub player: Rect,
    pub enemies: Vec<Rect>,
    pub bullets: Vec<Rect>,
    pub enemy_bullets: Vec<Rect>,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges do not overlap
        assert!(!a.intersects(&c));
    }

    #[test]
    fn player_position_is_clamped() {
        let mut player = Player::new(None);
        player.move_to(0.0);
        assert_eq!(player.center_x, PLAYER_MIN_X);
        player.move_to(1.0);
        assert_eq!(player.center_x, PLAYER_MAX_X);
        player.move_to(0.5);
        assert_eq!(player.center_x, WIDTH / 2);
    }

    #[test]
    fn enemy_rect_is_derived_from_float_position() {
        let mut enemy = Enemy::new(10.7, 20.2, None);
        assert_eq!(enemy.rect().x, 10);
        assert_eq!(enemy.rect().y, 20);
        enemy.float_pos.x += 5.0;
        assert_eq!(enemy.rect().x, 15);
    }

    #[test]
    fn bullet_directions_match_owner() {
        assert!(Bullet::player_shot(0, 0).vel_y < 0.0);
        assert!(Bullet::enemy_shot(0, 0).vel_y > 0.0);
    }
}
