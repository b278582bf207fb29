// Progress notifications for paginated downloads.

/// Snapshot taken after each successful page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Records accumulated so far.
    pub collected: usize,
    /// Total reported by the latest page.
    pub total_count: usize,
    /// Successful requests so far.
    pub requests: usize,
}

impl Progress {
    /// Completion percentage, rounded half up. An empty result counts as
    /// done.
    pub fn percent(&self) -> u8 {
        if self.total_count == 0 {
            return 100;
        }
        let done = self.collected.min(self.total_count);
        let pct = (done * 100 + self.total_count / 2) / self.total_count;
        u8::try_from(pct).unwrap_or(100)
    }
}

/// Receives a [`Progress`] after every successful page.
///
/// Purely observational: a sink cannot influence the download.
pub trait ProgressSink: Send {
    fn page_received(&mut self, progress: &Progress);
}

/// A sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn page_received(&mut self, _progress: &Progress) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress) + Send,
{
    fn page_received(&mut self, progress: &Progress) {
        self(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(collected: usize, total_count: usize) -> Progress {
        Progress {
            collected,
            total_count,
            requests: 1,
        }
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(at(0, 3).percent(), 0);
        assert_eq!(at(1, 3).percent(), 33);
        assert_eq!(at(2, 3).percent(), 67);
        assert_eq!(at(3, 3).percent(), 100);
        assert_eq!(at(1, 8).percent(), 13);
        assert_eq!(at(199, 200).percent(), 100);
    }

    #[test]
    fn percent_of_empty_result_is_complete() {
        assert_eq!(at(0, 0).percent(), 100);
    }

    #[test]
    fn percent_caps_overshoot() {
        assert_eq!(at(12, 10).percent(), 100);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: &Progress| seen.push(p.collected);
            sink.page_received(&at(5, 10));
            sink.page_received(&at(10, 10));
        }
        assert_eq!(seen, vec![5, 10]);
    }
}
