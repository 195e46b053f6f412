use rand::Rng;
use raylib::prelude::*;

use crate::bullet::Bullet;
use crate::meteor::Meteor;
use crate::player::Player;
use crate::process_events::FrameInput;
use crate::textures::{self, SpriteManager, SpriteSizes};
use crate::timer::Timer;

/// Segundos entre apariciones de meteoros.
pub const METEOR_SPAWN_TIME: f32 = 1.0;

/// Qué pasó en el frame, para que el loop principal dispare los sonidos
/// sin que el agregado conozca el dispositivo de audio.
#[derive(Default)]
pub struct GameEvents {
    pub fired: bool,
    pub destroyed: u32,
    pub crashed: bool,
}

/// El agregado: dueño del jugador, los meteoros, las balas y el puntaje.
pub struct Game {
    pub player: Player,
    pub meteors: Vec<Meteor>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    meteor_spawn_timer: Timer,
    sizes: SpriteSizes,
}

impl Game {
    pub fn new(sizes: SpriteSizes) -> Self {
        Self {
            player: Player::new(&sizes),
            meteors: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            meteor_spawn_timer: Timer::new(METEOR_SPAWN_TIME),
            sizes,
        }
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32) -> GameEvents {
        let mut events = GameEvents::default();

        if let Some(bullet) = self.player.update(input, dt) {
            self.bullets.push(bullet);
            events.fired = true;
        }

        // En modo freeze los meteoros ni se mueven ni aparecen;
        // balas, jugador y colisiones siguen vivos.
        if !self.player.freeze_meteors() {
            self.meteor_spawn_timer.update(dt);
            if self.meteor_spawn_timer.is_ready() {
                self.meteor_spawn_timer.reset();
                self.spawn_meteor();
            }
            for m in &mut self.meteors {
                m.update(dt);
            }
        }

        for b in &mut self.bullets {
            b.update(dt);
        }
        self.bullets.retain(|b| b.on_screen());
        self.meteors.retain(|m| m.in_range());

        // bala-meteoro: cada bala mata a lo sumo un meteoro por frame
        let mut i = 0;
        while i < self.meteors.len() {
            let mc = self.meteors[i].collider();
            let mut hit = false;
            let mut j = 0;
            while j < self.bullets.len() {
                if mc.check_collision_recs(&self.bullets[j].collider()) {
                    self.bullets.remove(j);
                    hit = true;
                    break;
                }
                j += 1;
            }
            if hit {
                self.meteors.remove(i);
                self.score += 1;
                events.destroyed += 1;
            } else {
                i += 1;
            }
        }

        // meteoro-jugador: choque = sesión nueva
        let pc = self.player.collider();
        let crashed = self.meteors.iter().any(|m| m.collider().check_collision_recs(&pc));
        if crashed {
            self.reset();
            events.crashed = true;
        }

        events
    }

    fn spawn_meteor(&mut self) {
        let mut rng = rand::thread_rng();
        let key = textures::METEOR_KEYS[rng.gen_range(0..textures::METEOR_KEYS.len())];
        self.meteors.push(Meteor::new(key, self.sizes.meteor));
    }

    /// Sesión desde cero: jugador centrado, listas vacías, puntaje en cero.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.sizes);
        self.meteors.clear();
        self.bullets.clear();
        self.score = 0;
        self.meteor_spawn_timer.reset();
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, sprites: &SpriteManager) {
        self.player.draw(d, sprites);
        for m in &self.meteors {
            m.draw(d, sprites);
        }
        for b in &self.bullets {
            b.draw(d, sprites);
        }
        d.draw_text(
            &format!("SCORE: {}", self.score),
            crate::SCREEN_WIDTH / 2 - 60,
            10,
            28,
            Color::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn new_game() -> Game {
        Game::new(SpriteSizes::default())
    }

    /// Meteoro quieto en una posición dada, lejos del anillo de spawn.
    fn parked_meteor(x: f32, y: f32) -> Meteor {
        let mut m = Meteor::new('1', SpriteSizes::default().meteor);
        m.position = Vector2::new(x, y);
        m.movement = Vector2::zero();
        m
    }

    #[test]
    fn bullet_destroys_meteor_and_scores() {
        let mut g = new_game();
        // esquina alejada del jugador (que está centrado)
        g.meteors.push(parked_meteor(40.0, 40.0));
        g.bullets.push(Bullet::new(
            Vector2::new(60.0, 80.0),
            0.0,
            SpriteSizes::default().laser,
        ));
        let ev = g.update(&FrameInput::default(), DT);
        assert_eq!(ev.destroyed, 1);
        assert_eq!(g.score, 1);
        assert!(g.meteors.is_empty());
        assert!(g.bullets.is_empty());
        assert!(!ev.crashed);
    }

    #[test]
    fn one_bullet_kills_at_most_one_meteor() {
        let mut g = new_game();
        g.meteors.push(parked_meteor(40.0, 40.0));
        g.meteors.push(parked_meteor(50.0, 50.0));
        g.bullets.push(Bullet::new(
            Vector2::new(60.0, 60.0),
            0.0,
            SpriteSizes::default().laser,
        ));
        let ev = g.update(&FrameInput::default(), DT);
        assert_eq!(ev.destroyed, 1);
        assert_eq!(g.meteors.len(), 1);
    }

    #[test]
    fn meteor_hitting_player_resets_the_session() {
        let mut g = new_game();
        g.score = 7;
        let px = g.player.position.x;
        let py = g.player.position.y;
        g.meteors.push(parked_meteor(px, py));
        let ev = g.update(&FrameInput::default(), DT);
        assert!(ev.crashed);
        assert_eq!(g.score, 0);
        assert!(g.meteors.is_empty());
        assert!(g.bullets.is_empty());
    }

    #[test]
    fn meteors_spawn_on_the_timer() {
        let mut g = new_game();
        let frames = (METEOR_SPAWN_TIME / DT).ceil() as u32 + 1;
        for _ in 0..frames {
            g.update(&FrameInput::default(), DT);
        }
        assert_eq!(g.meteors.len(), 1);
    }

    #[test]
    fn freeze_stops_meteor_motion_and_spawning() {
        let mut g = new_game();
        g.meteors.push({
            let mut m = parked_meteor(40.0, 40.0);
            m.movement = Vector2::new(60.0, 0.0);
            m
        });
        let toggle = FrameInput { toggle_freeze: true, ..Default::default() };
        g.update(&toggle, DT);
        let frozen_x = g.meteors[0].position.x;

        // muchos frames congelados: ni movimiento ni spawns
        let frames = (METEOR_SPAWN_TIME / DT).ceil() as u32 + 5;
        for _ in 0..frames {
            g.update(&FrameInput::default(), DT);
        }
        assert_eq!(g.meteors.len(), 1);
        assert_eq!(g.meteors[0].position.x, frozen_x);

        // al descongelar vuelve a moverse
        g.update(&toggle, DT);
        assert!(g.meteors[0].position.x > frozen_x);
    }

    #[test]
    fn bullets_still_fly_while_frozen() {
        let mut g = new_game();
        let toggle_fire = FrameInput {
            toggle_freeze: true,
            fire: true,
            ..Default::default()
        };
        g.update(&toggle_fire, DT);
        let fire = FrameInput { fire: true, ..Default::default() };
        let ev = g.update(&fire, DT);
        assert!(ev.fired);
        assert_eq!(g.bullets.len(), 1);
        let y0 = g.bullets[0].position.y;
        g.update(&FrameInput::default(), DT);
        assert!(g.bullets[0].position.y < y0);
    }
}
