use serde::{Deserialize, Serialize};

/// Sections a grant snippet can be written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantSection {
    Introduction,
    SpecificAims,
    ResearchStrategy,
    Innovation,
    Significance,
    Abstract,
}

impl GrantSection {
    pub const ALL: [GrantSection; 6] = [
        GrantSection::Introduction,
        GrantSection::SpecificAims,
        GrantSection::ResearchStrategy,
        GrantSection::Innovation,
        GrantSection::Significance,
        GrantSection::Abstract,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GrantSection::Introduction => "Introduction",
            GrantSection::SpecificAims => "Specific Aims",
            GrantSection::ResearchStrategy => "Research Strategy",
            GrantSection::Innovation => "Innovation",
            GrantSection::Significance => "Significance",
            GrantSection::Abstract => "Abstract",
        }
    }
}

impl std::fmt::Display for GrantSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for GrantSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrantSection::ALL
            .into_iter()
            .find(|section| section.title().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown grant section \"{}\"", s))
    }
}

pub const GRANT_WRITER_INSTRUCTION: &str = "You are an expert academic grant writer. Your goal is to produce concise, impactful, and persuasive text for grant proposals. Focus on clarity, novelty, and potential impact. Avoid jargon where possible or explain it briefly. The tone should be formal and confident.";

pub fn idea_prompt(prompt: &str) -> String {
    format!(
        "Generate a novel research idea based on the following prompt. Be creative and suggest potential interdisciplinary connections or unique methodologies if applicable. Prompt: \"{}\"",
        prompt
    )
}

pub fn grant_prompt(topic: &str, section: GrantSection) -> String {
    format!(
        r#"Generate a concise and compelling paragraph (approximately 3-5 sentences) for a grant proposal.
Research Topic: "{}"
Proposal Section: "{}"

Please ensure the generated text is highly relevant to the specified section and topic."#,
        topic, section
    )
}

// ── Offline texts ───────────────────────────────────────────────────

pub fn mock_idea(prompt: &str) -> String {
    format!(
        "Mocked AI Response: Based on your prompt \"{}\", a fascinating research idea would be to explore the \"Synergistic Effects of Quantum Entanglement on Feline Napping Patterns\". This could involve observing cats in various states of quantum superposition and measuring their REM sleep cycles. Consider funding sources like the Institute for Whimsical Science. Furthermore, investigating the socio-economic impact of such research could yield interesting insights into public perception of advanced theoretical physics in everyday life.",
        prompt
    )
}

pub fn mock_grant(topic: &str, section: GrantSection) -> String {
    format!(
        "Mocked Grant Snippet for Topic: \"{}\" (Section: {}):\n\nThis research endeavors to address the critical knowledge gap in the domain of {} by employing a novel, multi-faceted methodological approach. The {} section will meticulously detail the specific aims, underscore the innovative aspects of this study, and project its significant contributions to advancing the field. Expected outcomes include not only a paradigm shift in our fundamental understanding but also tangible, practical applications designed to benefit society at large, fostering further research and development.",
        topic,
        section,
        topic.to_lowercase(),
        section.title().to_lowercase()
    )
}

pub fn idea_failure(details: &str) -> String {
    format!(
        "Sorry, I encountered an error while brainstorming research ideas. Please ensure your API key is correctly configured and try again. Details: {}",
        details
    )
}

pub fn grant_failure(details: &str) -> String {
    format!(
        "Apologies, an error occurred while drafting the grant snippet. Please check your API setup and try again. Details: {}",
        details
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_parses_display_names() {
        assert_eq!("Specific Aims".parse::<GrantSection>(), Ok(GrantSection::SpecificAims));
        assert_eq!(" abstract ".parse::<GrantSection>(), Ok(GrantSection::Abstract));
        assert!("Budget".parse::<GrantSection>().is_err());
    }

    #[test]
    fn mock_grant_is_deterministic() {
        let a = mock_grant("CRISPR Ethics", GrantSection::Innovation);
        let b = mock_grant("CRISPR Ethics", GrantSection::Innovation);
        assert_eq!(a, b);
        assert!(a.contains("domain of crispr ethics"));
        assert!(a.contains("The innovation section"));
    }
}
