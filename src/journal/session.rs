use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::utils::prompt::Prompter;

/// What the user reports at the end of a work session. Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    title: String,
    completed: Vec<String>,
    technical: String,
    insight: String,
    issue: String,
    next_steps: Vec<String>,
    reflection: Option<String>,
}

impl SessionSummary {
    /// Text fields are trimmed, blank list items dropped and a blank reflection becomes `None`.
    /// An empty title is accepted as is.
    pub fn new(
        title: impl Into<String>,
        completed: Vec<String>,
        technical: impl Into<String>,
        insight: impl Into<String>,
        issue: impl Into<String>,
        next_steps: Vec<String>,
        reflection: Option<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            completed: clean_items(completed),
            technical: technical.into().trim().to_string(),
            insight: insight.into().trim().to_string(),
            issue: issue.into().trim().to_string(),
            next_steps: clean_items(next_steps),
            reflection: reflection
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn technical(&self) -> &str {
        &self.technical
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn next_steps(&self) -> &[String] {
        &self.next_steps
    }

    pub fn reflection(&self) -> Option<&str> {
        self.reflection.as_deref()
    }
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Asks the end-of-day questions one after another.
pub async fn collect_session_summary<R, W>(
    day: u32,
    prompter: &mut Prompter<R, W>,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompter.say("\nDaily Session Summary").await?;
    prompter.say(&"=".repeat(50)).await?;

    prompter.say(&format!("\nDay {day} Summary")).await?;
    let title = prompter.ask("One line summary of today's work: ").await?;

    prompter.say("\nWhat did you complete today?").await?;
    prompter
        .say("(Enter each item and press Enter. Empty line to finish)")
        .await?;
    let completed = prompter.ask_list("- ").await?;

    prompter.say("\nTechnical progress/discoveries:").await?;
    let technical = prompter.ask("> ").await?;

    prompter.say("\nResearch insights (for paper):").await?;
    let insight = prompter.ask("> ").await?;

    prompter.say("\nIssues or blockers:").await?;
    let issue = prompter.ask("> ").await?;

    prompter.say("\nTomorrow's plan:").await?;
    prompter
        .say("(Enter each item and press Enter. Empty line to finish)")
        .await?;
    let next_steps = prompter.ask_list("- ").await?;

    prompter.say("\nReflection (optional):").await?;
    let reflection = prompter.ask("> ").await?;

    Ok(SessionSummary::new(
        title,
        completed,
        technical,
        insight,
        issue,
        next_steps,
        Some(reflection),
    ))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::utils::prompt::Prompter;

    use super::{collect_session_summary, SessionSummary};

    #[tokio::test]
    async fn test_collects_every_answer() -> Result<()> {
        let input: &[u8] = b"Brush prototype\n\
            temporal brush\n\
            undo stack\n\
            \n\
            keyframes interpolate in local space\n\
            scrubbing feels natural\n\
            controller jitter\n\
            profile jitter\n\
            \n\
            good day\n";
        let mut prompter = Prompter::new(input, Vec::new());

        let summary = collect_session_summary(5, &mut prompter).await?;

        assert_eq!(
            summary,
            SessionSummary::new(
                "Brush prototype",
                vec!["temporal brush".into(), "undo stack".into()],
                "keyframes interpolate in local space",
                "scrubbing feels natural",
                "controller jitter",
                vec!["profile jitter".into()],
                Some("good day".into()),
            )
        );
        let transcript = String::from_utf8(prompter.into_output())?;
        assert!(transcript.contains("Day 5 Summary"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_session_is_accepted() -> Result<()> {
        let input: &[u8] = b"";
        let mut prompter = Prompter::new(input, Vec::new());

        let summary = collect_session_summary(1, &mut prompter).await?;

        assert_eq!(summary.title(), "");
        assert!(summary.completed().is_empty());
        assert!(summary.next_steps().is_empty());
        assert_eq!(summary.reflection(), None);
        Ok(())
    }

    #[test]
    fn test_constructor_normalizes_fields() {
        let summary = SessionSummary::new(
            "  title ",
            vec!["  a ".into(), "   ".into()],
            "",
            " idea ",
            "",
            vec![],
            Some("   ".into()),
        );
        assert_eq!(summary.title(), "title");
        assert_eq!(summary.completed(), ["a".to_string()]);
        assert_eq!(summary.insight(), "idea");
        assert_eq!(summary.reflection(), None);
    }
}
