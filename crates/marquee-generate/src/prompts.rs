//! Prompt templates for the generative service.

/// Which document shape to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Free-form synopsis for direct display.
    Synopsis,
    /// Sectioned analysis consumed by the extractor.
    Analysis,
}

impl PromptTemplate {
    /// True when the response follows the sectioned layout.
    pub fn is_structured(self) -> bool {
        matches!(self, PromptTemplate::Analysis)
    }

    pub fn render(self, title: &str, overview: &str) -> String {
        match self {
            PromptTemplate::Synopsis => format!(
                "Write a detailed and engaging synopsis for the movie \"{title}\".\n\
                 Here's the basic overview: {overview}\n\n\
                 Please provide a comprehensive synopsis that includes:\n\
                 1. Main plot points\n\
                 2. Key themes and messages\n\
                 3. Character development\n\
                 4. Notable scenes or moments\n\
                 5. The movie's impact or significance\n\n\
                 Format the response in a clear, well-structured way."
            ),
            PromptTemplate::Analysis => format!(
                "Analyze the movie \"{title}\".\n\
                 Here's the basic overview: {overview}\n\n\
                 Answer in exactly this layout, in plain text without markdown. \
                 Keep every label on its own line followed by a blank line:\n\n\
                 {title}\n\
                 <release date>\n\n\
                 Synopsis\n\n\
                 <two or three paragraphs>\n\n\
                 Key Elements\n\n\
                 <one \"Label: value\" per line, e.g. Tone, Genre, Setting>\n\n\
                 Tropes & Tags\n\n\
                 <up to ten short tags, one per line>\n\n\
                 Where to Watch\n\n\
                 <one streaming or rental platform per line>\n\
                 ⚠️ Availability may vary by region."
            ),
        }
    }
}
