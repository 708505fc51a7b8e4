use std::io::{self, Read};

/// A [`Read`] adapter reporting upload progress as an integer percentage.
///
/// The callback fires only when the percentage increases, so reported values
/// are strictly increasing and end at 100 once the whole stream is consumed.
pub struct ProgressReader<R, F> {
    inner: R,
    total: u64,
    read: u64,
    last_percent: u8,
    on_progress: F,
}

impl<R: Read, F: FnMut(u8)> ProgressReader<R, F> {
    pub fn new(inner: R, total: u64, on_progress: F) -> Self {
        Self {
            inner,
            total,
            read: 0,
            last_percent: 0,
            on_progress,
        }
    }

    fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.read * 100 / self.total).min(100)) as u8
    }
}

impl<R: Read, F: FnMut(u8)> Read for ProgressReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.read += n as u64;

        let percent = self.percent();
        if percent > self.last_percent {
            self.last_percent = percent;
            (self.on_progress)(percent);
        }

        Ok(n)
    }
}
