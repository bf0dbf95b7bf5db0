use crate::frame::FrameBuffer;

/// Something that can show a frame, e.g. a window.
pub trait Screen {
    fn render(&mut self, frame: &FrameBuffer);
}

/// Something that can play the Chip-8's single tone.
///
/// `set_tone` is called once per tick and must be cheap to repeat.
pub trait Speaker {
    fn set_tone(&mut self, on: bool);
}
