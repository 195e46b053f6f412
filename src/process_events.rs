use raylib::prelude::*;

/// Snapshot del teclado para un frame. La simulación solo ve estos booleanos,
/// así que se puede testear sin ventana.
#[derive(Clone, Copy, Default)]
pub struct FrameInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    pub toggle_freeze: bool,
    pub fire: bool,
}

/// Lee el estado de las teclas una vez por frame.
/// Movimiento y disparo son por nivel (mantener = seguir aplicando);
/// el freeze usa el flanco de presión para que un toque cambie el modo una vez.
pub fn read_input(rl: &RaylibHandle) -> FrameInput {
    FrameInput {
        rotate_left: rl.is_key_down(KeyboardKey::KEY_LEFT),
        rotate_right: rl.is_key_down(KeyboardKey::KEY_RIGHT),
        thrust_forward: rl.is_key_down(KeyboardKey::KEY_W),
        thrust_backward: rl.is_key_down(KeyboardKey::KEY_S),
        toggle_freeze: rl.is_key_pressed(KeyboardKey::KEY_F),
        fire: rl.is_key_down(KeyboardKey::KEY_SPACE),
    }
}
