mod command_input;
mod input;
mod key_input;
mod key_result;

pub use command_input::{CommandEvent, CommandInput};
pub use input::{InputResult, TextInput};
pub use key_input::{KeyInput, KeyPromptEvent};
pub use key_result::KeyResult;

/// Overlay width as `percent` of `available`, kept within 30..=`max` and the area
fn overlay_width(available: u16, percent: u32, max: u16) -> u16 {
  let scaled = u32::from(available) * percent / 100;
  (scaled.min(u32::from(max)) as u16).max(30).min(available)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_overlay_width_bounds() {
    assert_eq!(overlay_width(100, 60, 60), 60);
    assert_eq!(overlay_width(80, 60, 60), 48);
    assert_eq!(overlay_width(40, 60, 60), 30);
    assert_eq!(overlay_width(20, 60, 60), 20);
    assert_eq!(overlay_width(u16::MAX, 70, 80), 80);
  }
}
