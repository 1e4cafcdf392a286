//! Frame assembly for capture callbacks
//!
//! Audio devices deliver buffers of whatever size they like. The detector
//! needs exactly one window of samples at a time, so incoming buffers are
//! collected into a fixed-capacity frame that is emitted once full and then
//! reused.

pub struct FrameAssembler<T> {
    buffer: Vec<T>,
    frame_len: usize,
    channels: usize,
}

impl<T: Copy> FrameAssembler<T> {
    /// `channels` is the interleaving of the incoming buffers. Only the first
    /// channel is kept; the others are dropped, not mixed in.
    pub fn new(frame_len: usize, channels: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(frame_len),
            frame_len,
            channels: channels.max(1),
        }
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Samples collected toward the next frame.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Appends an interleaved buffer, calling `on_frame` for every frame it completes.
    pub fn push<F>(&mut self, interleaved: &[T], mut on_frame: F)
    where
        F: FnMut(&[T]),
    {
        for chunk in interleaved.chunks(self.channels) {
            if let Some(&sample) = chunk.first() {
                self.buffer.push(sample);
            }
            if self.buffer.len() == self.frame_len {
                on_frame(&self.buffer);
                self.buffer.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_full_frames_only() {
        let mut assembler = FrameAssembler::new(4, 1);
        let mut frames: Vec<Vec<i16>> = Vec::new();

        assembler.push(&[1, 2, 3], |f| frames.push(f.to_vec()));
        assert!(frames.is_empty());
        assert_eq!(assembler.pending(), 3);

        assembler.push(&[4, 5, 6, 7, 8, 9], |f| frames.push(f.to_vec()));
        assert_eq!(frames, vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]);
        assert_eq!(assembler.pending(), 1);
    }

    #[test]
    fn test_keeps_first_channel() {
        let mut assembler = FrameAssembler::new(3, 2);
        let mut frames: Vec<Vec<f32>> = Vec::new();

        assembler.push(&[0.1, 9.0, 0.2, 9.0, 0.3, 9.0], |f| frames.push(f.to_vec()));
        assert_eq!(frames, vec![vec![0.1, 0.2, 0.3]]);
    }

    #[test]
    fn test_never_grows() {
        let mut assembler = FrameAssembler::new(8, 1);
        let capacity = assembler.buffer.capacity();
        for _ in 0..10 {
            assembler.push(&[0u8; 13], |_| {});
        }
        assert_eq!(assembler.buffer.capacity(), capacity);
    }
}
