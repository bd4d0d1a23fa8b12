pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CompletePromptUseCase, ConversationUseCase, LookupSequencer, LookupSuggestionsUseCase,
    SequencedSuggestions, SuggestionIndex, TextGenerator, TransformationGenerator,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    build_router, AlgoliaIndex, AppConfig, Container, GatewayClient, GatewayMode, GatewayState,
    InMemorySuggestionIndex, MockTextGenerator, OpenAiClient, Router, Service,
};

pub use domain::{
    evaluate_next_step, CompletionRequest, CompletionResponse, DomainError, ErrorResponse,
    GenerationRequest, Message, NextStep, Sender, SessionState, Suggestion, UserAction,
};
