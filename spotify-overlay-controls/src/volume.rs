/// New volume after a signed step, clamped to the 0..=100 the api accepts.
pub fn apply_step(current: u8, step: i32) -> u8 {
    (i32::from(current) + step).clamp(0, 100) as u8
}
