//! Paper collection for the active workspace

use quire_domain::Paper;

/// Immutable snapshot of the active workspace's papers, replaced wholesale
/// on every reload. Never patched incrementally; that keeps the
/// stale-response guard a single generation check.
#[derive(Debug, Clone, Default)]
pub struct PaperCollection {
    papers: Vec<Paper>,
    loading: bool,
    uploading: bool,
}

impl PaperCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn replace(&mut self, papers: Vec<Paper>) {
        self.papers = papers;
        self.loading = false;
    }

    /// A failed reload keeps the previous snapshot.
    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn begin_upload(&mut self) {
        self.uploading = true;
    }

    pub fn end_upload(&mut self) {
        self.uploading = false;
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn contains(&self, paper_id: i64) -> bool {
        self.papers.iter().any(|p| p.id == paper_id)
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }
}
