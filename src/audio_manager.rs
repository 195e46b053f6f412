use rodio::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::{fs::File, io::BufReader, io::Read, sync::Arc};

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

fn load_bytes_any(paths: &[&str]) -> Option<Vec<u8>> {
    for p in paths {
        if let Some(b) = load_bytes(p) {
            return Some(b);
        }
    }
    None
}

/// Sonido opcional: si no hay dispositivo de salida el juego sigue sin audio.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bg_sink: Option<Sink>,
    sfx_sink: Sink,
    shoot: Option<Arc<Vec<u8>>>,
    explosion: Option<Arc<Vec<u8>>>,
    crash: Option<Arc<Vec<u8>>>,
    shoot_volume: f32,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let sfx_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            bg_sink: None,
            sfx_sink,
            shoot: None,
            explosion: None,
            crash: None,
            shoot_volume: 0.5,
        })
    }

    pub fn load_sfx_auto(&mut self) {
        self.shoot = load_bytes_any(&[
            "assets/laser.wav",
            "assets/shoot.wav",
            "assets/sounds/laser.wav",
            "assets/sounds/shoot.wav",
        ])
        .map(Arc::new);
        self.explosion = load_bytes_any(&[
            "assets/explosion.wav",
            "assets/sounds/explosion.wav",
            "assets/sounds/boom.wav",
        ])
        .map(Arc::new);
        self.crash = load_bytes_any(&[
            "assets/crash.wav",
            "assets/sounds/crash.wav",
            "assets/sounds/game_over.wav",
        ])
        .map(Arc::new);
    }

    /// Disparo en su propio sink para que la ráfaga se solape sin cortarse.
    pub fn play_shoot(&self) {
        if let Some(d) = self.shoot.clone() {
            if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(d.as_ref().clone()))) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec.amplify(self.shoot_volume.clamp(0.0, 2.5)));
                    sink.detach();
                }
            }
        }
    }

    pub fn play_explosion(&self) {
        self.play_data(self.explosion.clone());
    }

    pub fn play_crash(&self) {
        self.play_data(self.crash.clone());
    }

    fn play_data(&self, data: Option<Arc<Vec<u8>>>) {
        if let Some(d) = data {
            if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(d.as_ref().clone()))) {
                self.sfx_sink.append(dec);
            }
        }
    }

    pub fn play_music_loop_auto(&mut self) {
        if self.bg_sink.is_some() {
            return;
        }
        let candidates = [
            "assets/music.wav",
            "assets/music_bg.wav",
            "assets/sounds/music.wav",
            "assets/sounds/loop.ogg",
        ];
        if let Some(bytes) = load_bytes_any(&candidates) {
            if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes)) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec);
                    sink.set_volume(0.35);
                    self.bg_sink = Some(sink);
                }
            }
        }
    }
}
