//! The job feed as shown on the dashboard: one page of matches, best first,
//! plus the currently selected match.

use crate::job_match::JobMatch;

#[derive(Debug, Clone, Default)]
pub struct JobFeed {
    jobs: Vec<JobMatch>,
    selected: Option<JobMatch>,
    /// Set once the user picks a job; auto-selection never overrides it.
    user_selected: bool,
}

impl JobFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches on the current page, highest `fit_score` first.
    #[must_use]
    pub fn jobs(&self) -> &[JobMatch] {
        &self.jobs
    }

    #[must_use]
    pub fn selected(&self) -> Option<&JobMatch> {
        self.selected.as_ref()
    }

    /// Installs a freshly loaded page.
    ///
    /// Ties keep the server's order. While the user has not picked a job, the
    /// top result becomes the selection.
    pub fn replace(&mut self, mut jobs: Vec<JobMatch>) {
        jobs.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
        self.jobs = jobs;
        if !self.user_selected {
            self.selected = self.jobs.first().cloned();
        }
    }

    /// Records an explicit user choice, which wins over auto-selection for
    /// this and every later page load.
    pub fn select(&mut self, job: JobMatch) {
        self.selected = Some(job);
        self.user_selected = true;
    }

    /// Drops the user's choice and falls back to the top result.
    pub fn clear_selection(&mut self) {
        self.user_selected = false;
        self.selected = self.jobs.first().cloned();
    }
}
