use raylib::prelude::*;

use crate::bullet::Bullet;
use crate::process_events::FrameInput;
use crate::textures::{self, SpriteManager, SpriteSizes};
use crate::timer::Timer;

/// Tiempo mínimo entre disparos (s).
pub const SHOOT_COOLDOWN: f32 = 0.03;
/// Velocidad angular de giro (rad/s).
pub const ROTATION_PER_SECOND: f32 = std::f32::consts::PI;
/// Velocidad de empuje (px/s).
pub const MOV_SPEED: f32 = 420.0;
/// Distancia radial desde el centro de la nave a la boca del cañón (px).
pub const BULLET_SPAWN_OFFSET: f32 = 50.0;
/// Factor de decaimiento de la deriva residual por aplicación.
const DRIFT_DECAY: f32 = 0.1;

/// La nave del jugador: gira, empuja con deriva inercial y dispara con
/// cooldown. La rotación no se normaliza nunca; sin/cos la envuelven solos.
pub struct Player {
    pub position: Vector2,
    pub rotation: f32,
    sprite_size: Vector2,
    laser_size: Vector2,
    last_angle: Vector2,
    shoot_cooldown: Timer,
    mov_speed: f32,
    freeze_meteors: bool,
}

impl Player {
    /// Nave centrada en pantalla, mirando hacia arriba, sin deriva.
    pub fn new(sizes: &SpriteSizes) -> Self {
        let half_w = sizes.player.x / 2.0;
        let half_h = sizes.player.y / 2.0;
        let position = Vector2::new(
            crate::SCREEN_WIDTH as f32 / 2.0 - half_w,
            crate::SCREEN_HEIGHT as f32 / 2.0 - half_h,
        );
        Self {
            position,
            rotation: 0.0,
            sprite_size: sizes.player,
            laser_size: sizes.laser,
            last_angle: Vector2::zero(),
            shoot_cooldown: Timer::new(SHOOT_COOLDOWN),
            mov_speed: MOV_SPEED,
            freeze_meteors: false,
        }
    }

    /// Un frame de simulación. Devuelve la bala recién disparada (si hubo)
    /// para que el agregado la guarde.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Option<Bullet> {
        if input.rotate_left {
            self.rotation -= ROTATION_PER_SECOND * dt;
        }
        if input.rotate_right {
            self.rotation += ROTATION_PER_SECOND * dt;
        }

        if input.toggle_freeze {
            self.freeze_meteors = !self.freeze_meteors;
        }

        // Empuje hacia adelante. Con la tecla suelta queda una deriva
        // residual: el último vector decae a un décimo por aplicación.
        if input.thrust_forward {
            let dx = self.rotation.sin() * self.mov_speed;
            let dy = -self.rotation.cos() * self.mov_speed;
            self.last_angle = Vector2::new(dx, dy);
            self.position.x += dx * dt;
            self.position.y += dy * dt;
        } else {
            self.last_angle.x *= DRIFT_DECAY;
            self.last_angle.y *= DRIFT_DECAY;
            self.position.x += self.last_angle.x * dt;
            self.position.y += self.last_angle.y * dt;
        }

        // Empuje hacia atrás, misma forma pero restando. Las dos ramas son
        // independientes: sin ninguna tecla de empuje, la deriva se aplica
        // dos veces en el mismo frame.
        if input.thrust_backward {
            let dx = self.rotation.sin() * self.mov_speed;
            let dy = -self.rotation.cos() * self.mov_speed;
            self.last_angle = Vector2::new(dx, dy);
            self.position.x -= dx * dt;
            self.position.y -= dy * dt;
        } else {
            self.last_angle.x *= DRIFT_DECAY;
            self.last_angle.y *= DRIFT_DECAY;
            self.position.x += self.last_angle.x * dt;
            self.position.y += self.last_angle.y * dt;
        }

        self.shoot_cooldown.update(dt);
        if self.shoot_cooldown.is_ready() && input.fire {
            self.shoot_cooldown.reset();

            let half_w = self.sprite_size.x / 2.0;
            let half_h = self.sprite_size.y / 2.0;
            let spawn = Vector2::new(
                self.position.x + half_w + self.rotation.sin() * BULLET_SPAWN_OFFSET,
                self.position.y + half_h - self.rotation.cos() * BULLET_SPAWN_OFFSET,
            );
            return Some(Bullet::new(spawn, self.rotation, self.laser_size));
        }
        None
    }

    /// Blit del sprite rotado sobre su propio centro y trasladado a la
    /// posición (esquina superior izquierda).
    pub fn draw(&self, d: &mut RaylibDrawHandle, sprites: &SpriteManager) {
        if let Some(tex) = sprites.texture(textures::PLAYER_KEY) {
            let half_w = self.sprite_size.x / 2.0;
            let half_h = self.sprite_size.y / 2.0;
            let src = Rectangle::new(0.0, 0.0, self.sprite_size.x, self.sprite_size.y);
            let dest = Rectangle::new(
                self.position.x + half_w,
                self.position.y + half_h,
                self.sprite_size.x,
                self.sprite_size.y,
            );
            d.draw_texture_pro(
                tex,
                src,
                dest,
                Vector2::new(half_w, half_h),
                self.rotation.to_degrees(),
                Color::WHITE,
            );
        }
    }

    /// AABB al tamaño del sprite en la posición actual.
    /// La rotación no se refleja en el collider.
    pub fn collider(&self) -> Rectangle {
        Rectangle::new(
            self.position.x,
            self.position.y,
            self.sprite_size.x,
            self.sprite_size.y,
        )
    }

    #[inline]
    pub fn freeze_meteors(&self) -> bool {
        self.freeze_meteors
    }
}
