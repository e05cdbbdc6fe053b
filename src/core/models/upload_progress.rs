#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl UploadProgress {
    pub fn new(bytes_sent: u64, bytes_total: u64) -> Self {
        Self {
            bytes_sent,
            bytes_total,
        }
    }

    /// Rounded percentage, capped at 100. An empty body counts as complete.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }

        let ratio = self.bytes_sent as f64 * 100.0 / self.bytes_total as f64;
        ratio.round().min(100.0) as u8
    }
}
