//! Braille spinner shown in the title bar and body while a search is running.

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame for the given tick (wraps around).
pub fn frame_at(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wrapping() {
        assert_eq!(frame_at(0), "⠋");
        assert_eq!(frame_at(FRAMES.len()), "⠋");
        assert_eq!(frame_at(FRAMES.len() + 1), "⠙");
    }
}
