use anyhow::Result;

use super::super::Container;

pub struct CompleteController<'a> {
    container: &'a Container,
}

impl<'a> CompleteController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn complete(&self, prompt: String) -> Result<String> {
        let use_case = self.container.complete_use_case()?;
        Ok(use_case.execute(&prompt).await?)
    }
}
