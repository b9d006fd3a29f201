use std::sync::Arc;

/// a sound that is currently playing, owned by the output callback
#[derive(Debug)]
pub struct LiveSound {
    audio: Arc<[f32]>,
    idx: usize,
    gain: f32,
}

impl LiveSound {
    pub fn new(audio: Arc<[f32]>, gain: f32) -> Self {
        Self {
            audio,
            idx: 0,
            gain,
        }
    }

    /// adds the next `buf.len()` interleaved samples onto `buf`
    pub fn fill_buf(&mut self, buf: &mut [f32]) {
        if let Some(rest) = self.audio.get(self.idx..) {
            rest.iter()
                .zip(buf.iter_mut())
                .for_each(|(s, buf)| *buf += s * self.gain);
        }

        self.idx += buf.len();
    }

    pub fn over(&self) -> bool {
        self.idx >= self.audio.len()
    }
}
