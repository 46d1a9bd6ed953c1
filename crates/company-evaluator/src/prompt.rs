use crate::normalize::{CompanyTarget, SitePage};

pub const NO_CONTENT_INSTRUCTION: &str =
    "Could not fetch website content. Use your existing knowledge about this company.";

/// Extracted text for each fetched page; an empty string means the page was unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContents {
    pub homepage: String,
    pub about: String,
    pub careers: String,
}

impl PageContents {
    pub fn get(&self, page: SitePage) -> &str {
        match page {
            SitePage::Homepage => &self.homepage,
            SitePage::About => &self.about,
            SitePage::Careers => &self.careers,
        }
    }

    pub fn set(&mut self, page: SitePage, text: String) {
        match page {
            SitePage::Homepage => self.homepage = text,
            SitePage::About => self.about = text,
            SitePage::Careers => self.careers = text,
        }
    }

    pub fn fetched_count(&self) -> usize {
        SitePage::ALL
            .iter()
            .filter(|&&page| !self.get(page).is_empty())
            .count()
    }
}

/// Non-empty pages under their section headers, separated by blank lines.
pub fn combine_sections(pages: &PageContents) -> String {
    SitePage::ALL
        .iter()
        .filter_map(|&page| {
            let text = pages.get(page);
            (!text.is_empty()).then(|| format!("{}\n{}", page.section_header(), text))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(target: &CompanyTarget, pages: &PageContents) -> String {
    let combined = combine_sections(pages);
    let content = if combined.is_empty() {
        NO_CONTENT_INSTRUCTION
    } else {
        combined.as_str()
    };
    let domain = &target.domain;
    let url = &target.url;

    format!(
        r#"You are an expert career advisor and company analyst. A job seeker wants to know whether they should apply to work at this company.

Company domain: {domain}
Company URL: {url}

Content scraped from the company's website:
{content}

Using everything available to you (the website content above together with your own knowledge of this company, its founders, its industry, funding history, reputation, recent news and market position), give a thorough evaluation.

Respond with valid JSON in exactly this format:
{{
  "companyName": "The company's official name",
  "verdict": "worth_joining" | "proceed_with_caution" | "red_flags",
  "verdictLabel": "Worth Joining" | "Proceed with Caution" | "Red Flags Detected",
  "summary": "A 2-3 sentence overview of the company and your overall assessment.",
  "strengths": ["strength 1", "strength 2", "strength 3", "strength 4"],
  "concerns": ["concern 1", "concern 2", "concern 3"],
  "founderInsights": "What you know about the founders and leadership: track record, reputation, leadership style and notable history. If unknown, say so honestly.",
  "spaceOutlook": "The industry or market the company operates in: growth trajectory, competition, and whether the space is promising for career growth.",
  "advice": "Direct, honest career advice: would you recommend joining this company, under what conditions, and which roles would benefit most?"
}}

Guidelines:
- Be honest and balanced. Job seekers need real talk, not cheerleading.
- If you lack information, say so. Do not fabricate details.
- Consider company stage, funding, market position, team, culture signals and recent news.
- The strengths array should have 3-5 items and the concerns array 2-4 items.
- Respond ONLY with the JSON object and no other text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CompanyTarget {
        CompanyTarget::from_input("stripe.com")
    }

    #[test]
    fn combines_only_non_empty_pages_in_order() {
        let pages = PageContents {
            homepage: "Payments infrastructure".to_string(),
            about: String::new(),
            careers: "Open roles".to_string(),
        };
        assert_eq!(
            combine_sections(&pages),
            "=== HOMEPAGE ===\nPayments infrastructure\n\n=== CAREERS PAGE ===\nOpen roles"
        );
        assert_eq!(pages.fetched_count(), 2);
    }

    #[test]
    fn prompt_embeds_target_and_content() {
        let pages = PageContents {
            homepage: "Payments infrastructure".to_string(),
            about: "Founded in 2010".to_string(),
            careers: String::new(),
        };
        let prompt = build_prompt(&target(), &pages);
        assert!(prompt.contains("Company domain: stripe.com"));
        assert!(prompt.contains("Company URL: https://stripe.com"));
        assert!(prompt.contains("=== ABOUT PAGE ===\nFounded in 2010"));
        assert!(!prompt.contains(NO_CONTENT_INSTRUCTION));
        assert!(prompt.contains(r#""verdict": "worth_joining" | "proceed_with_caution" | "red_flags""#));
        assert!(prompt.contains("3-5 items"));
        assert!(prompt.contains("2-4 items"));
        assert!(prompt.contains("Respond ONLY with the JSON object"));
    }

    #[test]
    fn empty_pages_fall_back_to_model_knowledge() {
        let prompt = build_prompt(&target(), &PageContents::default());
        assert!(prompt.contains(NO_CONTENT_INSTRUCTION));
        assert!(!prompt.contains("=== HOMEPAGE ==="));
    }
}
