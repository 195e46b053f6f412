use rand::Rng;
use raylib::prelude::*;

use crate::textures::SpriteManager;

// anillo de aparición: medio ancho de pantalla más este extra (px)
const SPAWN_DISTANCE: f32 = 500.0;
// margen antes de descartar un meteoro que ya pasó de largo
const DESPAWN_MARGIN: f32 = 100.0;
// velocidad lineal (px/s) y de giro (rad/s)
const MIN_SPEED: f32 = 15.0;
const MAX_SPEED: f32 = 105.0;
const MAX_SPIN: f32 = 1.2;

/// Meteoro: aparece en un anillo fuera de la pantalla y vuela hacia el
/// centro con velocidad y giro aleatorios.
pub struct Meteor {
    pub position: Vector2,
    pub movement: Vector2,
    pub rotation: f32,
    rotation_speed: f32,
    sprite_key: char,
    sprite_size: Vector2,
}

impl Meteor {
    pub fn new(sprite_key: char, sprite_size: Vector2) -> Self {
        let mut rng = rand::thread_rng();

        let center = Vector2::new(
            crate::SCREEN_WIDTH as f32 / 2.0,
            crate::SCREEN_HEIGHT as f32 / 2.0,
        );
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let r = Self::spawn_radius();
        let position = Vector2::new(
            center.x + angle.cos() * r,
            center.y + angle.sin() * r,
        );

        // dirección normalizada hacia el centro, escalada por una velocidad al azar
        let speed = rng.gen_range(MIN_SPEED..MAX_SPEED);
        let dx = center.x - position.x;
        let dy = center.y - position.y;
        let len = (dx * dx + dy * dy).sqrt().max(1.0);
        let movement = Vector2::new(dx / len * speed, dy / len * speed);

        Self {
            position,
            movement,
            rotation: 0.0,
            rotation_speed: rng.gen_range(-MAX_SPIN..MAX_SPIN),
            sprite_key,
            sprite_size,
        }
    }

    #[inline]
    fn spawn_radius() -> f32 {
        crate::SCREEN_WIDTH as f32 / 2.0 + SPAWN_DISTANCE
    }

    pub fn update(&mut self, dt: f32) {
        self.position.x += self.movement.x * dt;
        self.position.y += self.movement.y * dt;
        self.rotation += self.rotation_speed * dt;
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, sprites: &SpriteManager) {
        if let Some(tex) = sprites.texture(self.sprite_key) {
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

    /// ¿Sigue dentro del anillo de juego? Falso cuando cruzó la pantalla
    /// entera y se alejó más allá del radio de aparición.
    pub fn in_range(&self) -> bool {
        let cx = crate::SCREEN_WIDTH as f32 / 2.0 - self.position.x;
        let cy = crate::SCREEN_HEIGHT as f32 / 2.0 - self.position.y;
        (cx * cx + cy * cy).sqrt() < Self::spawn_radius() + DESPAWN_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteor_size() -> Vector2 {
        Vector2::new(64.0, 64.0)
    }

    #[test]
    fn spawns_on_the_ring_outside_the_screen() {
        for _ in 0..20 {
            let m = Meteor::new('1', meteor_size());
            let cx = m.position.x - crate::SCREEN_WIDTH as f32 / 2.0;
            let cy = m.position.y - crate::SCREEN_HEIGHT as f32 / 2.0;
            let dist = (cx * cx + cy * cy).sqrt();
            assert!((dist - Meteor::spawn_radius()).abs() < 1.0);
            // fuera del rectángulo visible
            let on_screen = m.position.x >= 0.0
                && m.position.x <= crate::SCREEN_WIDTH as f32
                && m.position.y >= 0.0
                && m.position.y <= crate::SCREEN_HEIGHT as f32;
            assert!(!on_screen);
        }
    }

    #[test]
    fn movement_points_toward_screen_center() {
        for _ in 0..20 {
            let m = Meteor::new('1', meteor_size());
            let to_center_x = crate::SCREEN_WIDTH as f32 / 2.0 - m.position.x;
            let to_center_y = crate::SCREEN_HEIGHT as f32 / 2.0 - m.position.y;
            let dot = to_center_x * m.movement.x + to_center_y * m.movement.y;
            assert!(dot > 0.0);
            let speed = (m.movement.x * m.movement.x + m.movement.y * m.movement.y).sqrt();
            assert!((MIN_SPEED - 0.01..=MAX_SPEED + 0.01).contains(&speed));
        }
    }

    #[test]
    fn dropped_once_past_the_ring() {
        let mut m = Meteor::new('1', meteor_size());
        assert!(m.in_range());
        m.position = Vector2::new(
            crate::SCREEN_WIDTH as f32 / 2.0 + Meteor::spawn_radius() + DESPAWN_MARGIN + 1.0,
            crate::SCREEN_HEIGHT as f32 / 2.0,
        );
        assert!(!m.in_range());
    }

    #[test]
    fn update_integrates_position_and_rotation() {
        let mut m = Meteor::new('1', meteor_size());
        m.position = Vector2::new(100.0, 100.0);
        m.movement = Vector2::new(60.0, 0.0);
        m.update(0.5);
        assert!((m.position.x - 130.0).abs() < 1e-4);
        assert!((m.position.y - 100.0).abs() < 1e-4);
    }
}
