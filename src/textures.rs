use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use std::collections::HashMap;

pub const PLAYER_KEY: char = 'P';
pub const LASER_KEY: char = 'L';
pub const METEOR_KEYS: [char; 3] = ['1', '2', '3'];

/// Un pixmap (CPU) para generar sprites procedurales antes de subirlos a GPU.
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }
}

/// Tamaños en píxeles de los sprites, como datos planos: el juego y los tests
/// no necesitan tocar la GPU para conocerlos.
#[derive(Clone, Copy)]
pub struct SpriteSizes {
    pub player: Vector2,
    pub laser: Vector2,
    pub meteor: Vector2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        // dimensiones de los sprites procedurales
        Self {
            player: Vector2::new(48.0, 48.0),
            laser: Vector2::new(8.0, 24.0),
            meteor: Vector2::new(64.0, 64.0),
        }
    }
}

/// Sprites por clave-char. Intenta cargar PNGs de assets; lo que falte se
/// genera procedural, así el juego corre desde un checkout pelado.
pub struct SpriteManager {
    textures: HashMap<char, Texture2D>,
    sizes: HashMap<char, Vector2>,
}

impl SpriteManager {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread) -> Self {
        let mut sm = Self {
            textures: HashMap::new(),
            sizes: HashMap::new(),
        };

        // Candidatos de assets (si existe el archivo lo usamos; si no, fallback)
        let candidates: &[(&str, char)] = &[
            ("assets/player.png", 'P'),
            ("assets/ship.png", 'P'),
            ("assets/laser.png", 'L'),
            ("assets/bullet.png", 'L'),
            ("assets/meteor1.png", '1'),
            ("assets/meteor_big.png", '1'),
            ("assets/meteor2.png", '2'),
            ("assets/meteor_med.png", '2'),
            ("assets/meteor3.png", '3'),
            ("assets/meteor_small.png", '3'),
        ];

        for (path, key) in candidates {
            if sm.textures.contains_key(key) {
                continue;
            }
            if let Ok(img) = Image::load_image(path) {
                if let Ok(tex) = rl.load_texture_from_image(thread, &img) {
                    log::info!("sprite '{}' cargado de {}", key, path);
                    sm.sizes
                        .insert(*key, Vector2::new(img.width() as f32, img.height() as f32));
                    sm.textures.insert(*key, tex);
                }
            }
        }

        // Fallbacks procedurales para lo que falte
        let defaults = SpriteSizes::default();
        let fallbacks: &[char] = &['P', 'L', '1', '2', '3'];
        for &k in fallbacks {
            if sm.textures.contains_key(&k) {
                continue;
            }
            log::info!("sprite '{}' sin asset, usando arte procedural", k);
            let pm = match k {
                'P' => Self::make_ship_pixmap(defaults.player.x as u32, defaults.player.y as u32),
                'L' => Self::make_laser_pixmap(defaults.laser.x as u32, defaults.laser.y as u32),
                '1' => Self::make_meteor_pixmap(defaults.meteor.x as u32, Color::new(105, 98, 92, 255), 1.0),
                '2' => Self::make_meteor_pixmap(defaults.meteor.x as u32, Color::new(122, 101, 82, 255), 2.0),
                _ => Self::make_meteor_pixmap(defaults.meteor.x as u32, Color::new(96, 104, 118, 255), 3.0),
            };
            if let Some(tex) = Self::upload_pixmap(rl, thread, &pm) {
                sm.sizes.insert(k, Vector2::new(pm.w as f32, pm.h as f32));
                sm.textures.insert(k, tex);
            }
        }

        sm
    }

    /// Sube un pixmap a una textura nueva (RGBA8, &[Color] → &[u8] sin copiar).
    fn upload_pixmap(rl: &mut RaylibHandle, thread: &RaylibThread, pm: &Pixmap) -> Option<Texture2D> {
        let img = Image::gen_image_color(pm.w as i32, pm.h as i32, Color::BLANK);
        let mut tex = rl.load_texture_from_image(thread, &img).ok()?;
        let byte_len = pm.px.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] =
            unsafe { std::slice::from_raw_parts(pm.px.as_ptr() as *const u8, byte_len) };
        let _ = tex.update_texture(bytes);
        Some(tex)
    }

    /// Nave triangular mirando hacia arriba, con cabina y tobera.
    fn make_ship_pixmap(w: u32, h: u32) -> Pixmap {
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        let cx = w as f32 * 0.5;
        let hull = Color::new(198, 204, 216, 255);
        let edge = Color::new(92, 98, 112, 255);
        let cockpit = Color::new(90, 170, 255, 255);
        let flame = Color::new(255, 150, 60, 255);

        let tip_y = 2.0;
        let base_y = h as f32 - 5.0;
        for y in 0..h {
            let fy = y as f32;
            if fy < tip_y || fy > base_y {
                continue;
            }
            let t = (fy - tip_y) / (base_y - tip_y);
            let half = t * (w as f32 * 0.5 - 3.0);
            for x in 0..w {
                let dx = (x as f32 - cx).abs();
                if dx > half {
                    continue;
                }
                let i = (y * w + x) as usize;
                // borde oscuro, casco sombreado hacia la cola
                px[i] = if half - dx < 1.5 {
                    edge
                } else {
                    Self::mix(hull, edge, (t * 90.0) as u8)
                };
            }
        }

        // cabina: disco pequeño en el tercio superior
        let ccy = h as f32 * 0.38;
        let cr = w as f32 * 0.11;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - ccy;
                if dx * dx + dy * dy <= cr * cr {
                    px[(y * w + x) as usize] = cockpit;
                }
            }
        }

        // tobera: franja corta bajo la base
        for y in (h - 4)..h {
            for x in 0..w {
                let dx = (x as f32 - cx).abs();
                if dx < w as f32 * 0.12 {
                    px[(y * w + x) as usize] = flame;
                }
            }
        }

        Pixmap::new(w, h, px)
    }

    /// Bala láser: núcleo claro con halo.
    fn make_laser_pixmap(w: u32, h: u32) -> Pixmap {
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        let cx = w as f32 * 0.5 - 0.5;
        let core = Color::new(255, 250, 200, 255);
        let glow = Color::new(255, 120, 80, 255);
        for y in 0..h {
            for x in 0..w {
                let dx = (x as f32 - cx).abs();
                let i = (y * w + x) as usize;
                if dx < 1.2 {
                    px[i] = core;
                } else if dx < w as f32 * 0.5 {
                    let t = (dx - 1.2) / (w as f32 * 0.5 - 1.2);
                    let mut c = Self::mix(glow, Color::new(0, 0, 0, 0), (t * 200.0) as u8);
                    c.a = ((1.0 - t) * 230.0) as u8;
                    px[i] = c;
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    /// Disco rocoso con borde irregular y cráteres, tintado por variante.
    fn make_meteor_pixmap(size: u32, base: Color, seed: f32) -> Pixmap {
        let w = size;
        let h = size;
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        let cx = w as f32 * 0.5;
        let cy = h as f32 * 0.5;
        let r_base = w as f32 * 0.42;

        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let ang = dy.atan2(dx);
                // borde irregular: el radio ondula con el ángulo
                let r = r_base
                    + (ang * 3.0 + seed).sin() * 3.0
                    + (ang * 7.0 + seed * 2.0).sin() * 1.5;
                if d > r {
                    continue;
                }
                let i = (y * w + x) as usize;
                // textura granulada determinista
                let n = ((x.wrapping_mul(31) ^ y.wrapping_mul(17)) % 23) as u8;
                let mut c = Self::mix(base, Color::BLACK, n * 4);
                // sombreado hacia el borde
                c = Self::mix(c, Color::BLACK, ((d / r) * 70.0) as u8);
                px[i] = c;
            }
        }

        // un par de cráteres fijos
        let craters = [(0.34, 0.40, 0.10), (0.62, 0.58, 0.13), (0.48, 0.70, 0.07)];
        for (fx, fy, fr) in craters {
            let ccx = w as f32 * fx;
            let ccy = h as f32 * fy;
            let cr = w as f32 * fr;
            for y in 0..h {
                for x in 0..w {
                    let dx = x as f32 - ccx;
                    let dy = y as f32 - ccy;
                    if dx * dx + dy * dy <= cr * cr {
                        let i = (y * w + x) as usize;
                        if px[i].a > 0 {
                            px[i] = Self::mix(px[i], Color::BLACK, 60);
                        }
                    }
                }
            }
        }

        Pixmap::new(w, h, px)
    }

    #[inline]
    fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
    }

    pub fn texture(&self, key: char) -> Option<&Texture2D> {
        self.textures.get(&key)
    }

    /// Tamaños reales (los de los PNG cargados, o los procedurales).
    pub fn sizes(&self) -> SpriteSizes {
        let d = SpriteSizes::default();
        SpriteSizes {
            player: self.sizes.get(&PLAYER_KEY).copied().unwrap_or(d.player),
            laser: self.sizes.get(&LASER_KEY).copied().unwrap_or(d.laser),
            meteor: self.sizes.get(&METEOR_KEYS[0]).copied().unwrap_or(d.meteor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_pixmap_has_opaque_hull_and_transparent_corners() {
        let pm = SpriteManager::make_ship_pixmap(48, 48);
        assert_eq!(pm.w, 48);
        assert_eq!(pm.h, 48);
        assert_eq!(pm.px.len(), 48 * 48);
        // esquinas vacías
        assert_eq!(pm.px[0].a, 0);
        assert_eq!(pm.px[47].a, 0);
        // el centro del casco es opaco
        let center = (24 * 48 + 24) as usize;
        assert_eq!(pm.px[center].a, 255);
    }

    #[test]
    fn meteor_pixmap_is_roughly_a_disc() {
        let pm = SpriteManager::make_meteor_pixmap(64, Color::new(105, 98, 92, 255), 1.0);
        let center = (32 * 64 + 32) as usize;
        assert_eq!(pm.px[center].a, 255);
        assert_eq!(pm.px[0].a, 0);
        assert_eq!(pm.px[63].a, 0);
        assert_eq!(pm.px[64 * 64 - 1].a, 0);
    }

    #[test]
    fn laser_pixmap_core_is_opaque() {
        let pm = SpriteManager::make_laser_pixmap(8, 24);
        let mid = (12 * 8 + 4) as usize;
        assert_eq!(pm.px[mid].a, 255);
    }

    #[test]
    fn default_sizes_match_procedural_art() {
        let s = SpriteSizes::default();
        assert_eq!(s.player.x as u32, 48);
        assert_eq!(s.laser.y as u32, 24);
        assert_eq!(s.meteor.x as u32, 64);
    }
}
