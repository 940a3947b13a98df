/// Braille spinner frames. Widgets pick a frame from a tick counter the
/// host advances; nothing here owns time.
const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_frame(tick: u64) -> char {
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}
