use serde::Serialize;

/// Per-image progress within one conversion batch
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    /// Number of images encoded so far
    pub completed: usize,
    /// Total number of images in the batch
    pub total: usize,
    /// Progress percentage (0-100)
    pub percentage: usize,
    /// Name of the image that just finished
    pub file_name: String,
}

impl BatchProgress {
    pub fn new(completed: usize, total: usize, file_name: &str) -> Self {
        let percentage = if total > 0 {
            (completed * 100) / total
        } else {
            0
        };

        Self {
            completed,
            total,
            percentage,
            file_name: file_name.to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_down() {
        let p = BatchProgress::new(1, 3, "a.png");
        assert_eq!(p.percentage, 33);
        assert!(!p.is_complete());
        assert!(BatchProgress::new(3, 3, "c.png").is_complete());
        assert_eq!(BatchProgress::new(0, 0, "").percentage, 0);
    }
}
