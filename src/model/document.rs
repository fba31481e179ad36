use std::ops::Range;

use super::Run;

/// One block of document content: an ordered sequence of runs.
///
/// The paragraph's text is never stored; [`Paragraph::text`] concatenates the
/// runs each time it is called so it always reflects the current runs.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    runs: Vec<Run>,
    /// Source byte ranges of runs removed since parsing.
    removed: Vec<Range<usize>>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            removed: Vec::new(),
        }
    }

    /// Concatenation of all run texts, in order.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn runs_mut(&mut self) -> &mut [Run] {
        &mut self.runs
    }

    pub fn first_run_mut(&mut self) -> Option<&mut Run> {
        self.runs.first_mut()
    }

    /// Remove the run at `index`, returning it.
    ///
    /// Returns `None` if the index is out of range.
    pub fn remove_run(&mut self, index: usize) -> Option<Run> {
        if index >= self.runs.len() {
            return None;
        }
        let run = self.runs.remove(index);
        if let Some(source) = run.source() {
            self.removed.push(source);
        }
        Some(run)
    }

    pub(crate) fn removed_sources(&self) -> &[Range<usize>] {
        &self.removed
    }
}

/// The ordered body paragraphs of a document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Build a document of single-run paragraphs from plain strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| Paragraph::new(vec![Run::new(t)]))
                .collect(),
        )
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Text of every paragraph, in document order.
    pub fn texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_recomputed() {
        let mut para = Paragraph::new(vec![Run::new("Managed "), Run::new("a team")]);
        assert_eq!(para.text(), "Managed a team");

        para.runs_mut()[1].set_text("five people");
        assert_eq!(para.text(), "Managed five people");

        para.remove_run(0);
        assert_eq!(para.text(), "five people");
    }

    #[test]
    fn test_remove_run_out_of_range() {
        let mut para = Paragraph::new(vec![Run::new("only")]);
        assert!(para.remove_run(3).is_none());
        assert_eq!(para.runs().len(), 1);
    }

    #[test]
    fn test_in_memory_removal_has_no_source() {
        let mut para = Paragraph::new(vec![Run::new("a"), Run::new("b")]);
        para.remove_run(1);
        assert!(para.removed_sources().is_empty());
    }

    #[test]
    fn test_from_texts() {
        let doc = Document::from_texts(["Managed a team", "Led development"]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.texts(), vec!["Managed a team", "Led development"]);
    }
}
