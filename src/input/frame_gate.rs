/// Lets the recognizer run only when the video has advanced to a new frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameGate {
    last: Option<f64>,
}

impl FrameGate {
    /// True (and remembers `frame_time`) when it differs from the last
    /// processed frame.
    pub fn admit(&mut self, frame_time: f64) -> bool {
        if self.last == Some(frame_time) {
            return false;
        }
        self.last = Some(frame_time);
        true
    }
}
