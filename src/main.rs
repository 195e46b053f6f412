// main.rs
#![allow(dead_code)]

mod audio_manager;
mod bullet;
mod game;
mod meteor;
mod player;
mod process_events;
mod textures;
mod timer;

use raylib::prelude::*;
use std::thread;
use std::time::Duration;

use audio_manager::AudioManager;
use game::Game;
use process_events::read_input;
use textures::SpriteManager;

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

fn main() {
    env_logger::init();

    let (mut window, raylib_thread) = raylib::init()
        .size(SCREEN_WIDTH, SCREEN_HEIGHT)
        .title("Meteor Storm")
        .build();

    let sprites = SpriteManager::new(&mut window, &raylib_thread);

    let mut audio = AudioManager::new();
    match audio.as_mut() {
        Some(a) => {
            a.load_sfx_auto();
            a.play_music_loop_auto();
        }
        None => log::warn!("sin dispositivo de audio, el juego corre mudo"),
    }

    let mut game = Game::new(sprites.sizes());

    while !window.window_should_close() {
        let dt = window.get_frame_time();
        let input = read_input(&window);
        let events = game.update(&input, dt);

        if let Some(a) = audio.as_mut() {
            if events.fired {
                a.play_shoot();
            }
            for _ in 0..events.destroyed {
                a.play_explosion();
            }
            if events.crashed {
                a.play_crash();
            }
        }

        // Precapturamos lo que use `window` antes de mutarlo con begin_drawing
        let fps_now = window.get_fps();
        let freeze_on = game.player.freeze_meteors();

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);

            game.draw(&mut d, &sprites);

            d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::GRAY);
            if freeze_on {
                d.draw_text("FREEZE", 10, 40, 20, Color::SKYBLUE);
            }
        }

        // ~60 FPS (16 ms)
        thread::sleep(Duration::from_millis(16));
    }
}
