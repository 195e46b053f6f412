use raylib::prelude::*;

use crate::textures::{self, SpriteManager};

/// Velocidad del láser en px/s.
pub const BULLET_SPEED: f32 = 350.0;

// margen extra antes de descartar una bala que salió de pantalla
const OFFSCREEN_MARGIN: f32 = 50.0;

/// Proyectil en línea recta: conserva la rotación con la que se disparó.
pub struct Bullet {
    pub position: Vector2,
    pub rotation: f32,
    sprite_size: Vector2,
}

impl Bullet {
    /// `spawn` llega centrado sobre la boca del cañón; la posición guardada
    /// es la esquina superior izquierda del sprite.
    pub fn new(spawn: Vector2, rotation: f32, sprite_size: Vector2) -> Self {
        let position = Vector2::new(
            spawn.x - sprite_size.x / 2.0,
            spawn.y - sprite_size.y / 2.0,
        );
        Self { position, rotation, sprite_size }
    }

    pub fn update(&mut self, dt: f32) {
        self.position.x += self.rotation.sin() * BULLET_SPEED * dt;
        self.position.y += -self.rotation.cos() * BULLET_SPEED * dt;
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, sprites: &SpriteManager) {
        if let Some(tex) = sprites.texture(textures::LASER_KEY) {
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

    /// AABB al tamaño del sprite; la rotación no se refleja en el collider.
    pub fn collider(&self) -> Rectangle {
        Rectangle::new(
            self.position.x,
            self.position.y,
            self.sprite_size.x,
            self.sprite_size.y,
        )
    }

    /// ¿Sigue dentro de pantalla (con margen)? El juego descarta las que no.
    pub fn on_screen(&self) -> bool {
        let w = crate::SCREEN_WIDTH as f32;
        let h = crate::SCREEN_HEIGHT as f32;
        self.position.x > -OFFSCREEN_MARGIN
            && self.position.x < w + OFFSCREEN_MARGIN
            && self.position.y > -OFFSCREEN_MARGIN
            && self.position.y < h + OFFSCREEN_MARGIN
    }
}
