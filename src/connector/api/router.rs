use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{CompleteController, SuggestController};

pub struct Router<'a> {
    suggest_controller: SuggestController<'a>,
    complete_controller: CompleteController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            suggest_controller: SuggestController::new(container),
            complete_controller: CompleteController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Suggest { query, format } => {
                self.suggest_controller.suggest(query, format).await
            }
            Commands::Complete { prompt } => self.complete_controller.complete(prompt).await,
            Commands::Serve { .. } | Commands::Chat { .. } => {
                unreachable!("long-running commands are handled separately in main")
            }
        }
    }
}
