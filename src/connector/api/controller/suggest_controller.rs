use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::Suggestion;

use super::super::Container;

pub struct SuggestController<'a> {
    container: &'a Container,
}

impl<'a> SuggestController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn suggest(&self, query: String, format: OutputFormat) -> Result<String> {
        let use_case = self.container.lookup_use_case()?;
        let hits = use_case.execute(&query).await;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&hits)?),
            OutputFormat::Text => Ok(self.format_suggestions(&hits)),
        }
    }

    fn format_suggestions(&self, hits: &[Suggestion]) -> String {
        if hits.is_empty() {
            return "No existing transformations found.".to_string();
        }

        let mut output = format!("Found {} transformations:\n\n", hits.len());

        for (i, hit) in hits.iter().enumerate() {
            output.push_str(&format!("{}. {} ({})\n", i + 1, hit.title(), hit.id()));

            let preview: String = hit
                .code()
                .lines()
                .take(10)
                .map(|l| format!("   | {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str(&preview);
            output.push_str("\n\n");
        }

        output
    }
}
