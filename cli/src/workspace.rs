//! The idea workspace: one generation form and output per content type,
//! plus the saved-ideas history.

use chrono::{DateTime, Utc};
use lavender_core::GenerationOutcome;
use lavender_history::{export_document, HistoryError, HistoryStore, KeyValueStore};
use log::{debug, warn};

use crate::gateway_client::PromptSender;
use crate::prompt::{build_prompt, ContentType, IdeaForm};
use crate::sequence::RequestSequencer;

/// Shown when the gateway could not be reached or answered garbage
pub const TRANSPORT_FAILURE_CARD: &str =
    "⚠️ Failed to fetch suggestions. Make sure your backend server is running!";

/// Shown on the history page when nothing is saved
pub const EMPTY_HISTORY_NOTICE: &str =
    "You have no saved ideas yet. Save ideas from the YouTube or Instagram generators.";

/// Whether an idea card can still be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Unsaved,
    Saved,
}

/// One rendered block in an output container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Idea { text: String, save_state: SaveState },
    Notice { message: String },
}

impl Card {
    pub fn notice(message: impl Into<String>) -> Self {
        Card::Notice {
            message: message.into(),
        }
    }

    pub fn idea_text(&self) -> Option<&str> {
        match self {
            Card::Idea { text, .. } => Some(text),
            Card::Notice { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct OutputContainers {
    youtube: RequestSequencer,
    instagram: RequestSequencer,
    blog: RequestSequencer,
}

impl OutputContainers {
    fn sequencer(&self, content_type: ContentType) -> &RequestSequencer {
        match content_type {
            ContentType::Youtube => &self.youtube,
            ContentType::Instagram => &self.instagram,
            ContentType::Blog => &self.blog,
        }
    }
}

pub struct IdeaWorkspace<G, S> {
    generator: G,
    history: HistoryStore<S>,
    outputs: OutputContainers,
}

impl<G: PromptSender, S: KeyValueStore> IdeaWorkspace<G, S> {
    pub fn new(generator: G, history: HistoryStore<S>) -> Self {
        Self {
            generator,
            history,
            outputs: OutputContainers::default(),
        }
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Run one generation for `content_type` and return the cards to show.
    ///
    /// Returns `None` when a newer generation for the same content type was
    /// issued while this one was in flight; its output must be discarded.
    /// Every failure is turned into a single notice card.
    pub async fn generate(&self, content_type: ContentType, form: &IdeaForm) -> Option<Vec<Card>> {
        // The missing-topic warning takes a ticket too
        let sequencer = self.outputs.sequencer(content_type);
        let ticket = sequencer.issue();

        let prompt = match build_prompt(content_type, form) {
            Ok(prompt) => prompt,
            Err(e) => return Some(vec![Card::notice(e.to_string())]),
        };

        let outcome = match self.generator.send_prompt(&prompt).await {
            Ok(reply) => GenerationOutcome::from_reply(&reply),
            Err(e) => {
                warn!("Generation request failed: {:#}", e);
                return sequencer
                    .is_current(ticket)
                    .then(|| vec![Card::notice(TRANSPORT_FAILURE_CARD)]);
            }
        };

        if !sequencer.is_current(ticket) {
            debug!("Dropping stale {} response", content_type.label());
            return None;
        }

        Some(self.cards_for(outcome).await)
    }

    async fn cards_for(&self, outcome: GenerationOutcome) -> Vec<Card> {
        let ideas = match outcome {
            GenerationOutcome::Success { ideas } => ideas,
            other => {
                let message = other.failure_message().unwrap_or_default().to_string();
                return vec![Card::notice(message)];
            }
        };

        let mut cards = Vec::with_capacity(ideas.len());
        for text in ideas {
            cards.push(Card::Idea {
                save_state: self.save_state_of(&text).await,
                text,
            });
        }
        cards
    }

    /// Save state as recorded in the store
    async fn save_state_of(&self, text: &str) -> SaveState {
        match self.history.contains(text).await {
            Ok(true) => SaveState::Saved,
            Ok(false) => SaveState::Unsaved,
            Err(e) => {
                warn!("Could not read history, showing idea as unsaved: {}", e);
                SaveState::Unsaved
            }
        }
    }

    /// Save the idea on a card; the card moves to `Saved` either way.
    pub async fn save_card(&self, card: &mut Card) -> Result<(), HistoryError> {
        if let Card::Idea { text, save_state } = card {
            if *save_state == SaveState::Unsaved {
                self.history.save(text).await?;
                *save_state = SaveState::Saved;
            }
        }
        Ok(())
    }

    /// Saved ideas for the history page
    pub async fn saved_ideas(&self) -> Result<Vec<String>, HistoryError> {
        self.history.list().await
    }

    /// Remove the idea shown at a 1-based position on the history page
    pub async fn remove_at(&self, position: usize) -> Result<Option<String>, HistoryError> {
        let ideas = self.history.list().await?;
        let Some(text) = position.checked_sub(1).and_then(|i| ideas.get(i)).cloned() else {
            return Ok(None);
        };
        self.history.remove(&text).await?;
        Ok(Some(text))
    }

    /// Clear the history once the user has confirmed. Returns whether it ran.
    pub async fn clear_history(&self, confirmed: bool) -> Result<bool, HistoryError> {
        if !confirmed {
            return Ok(false);
        }
        self.history.clear().await?;
        Ok(true)
    }

    /// Export the saved ideas as a plain-text document
    pub async fn export_history(
        &self,
        category: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<String, HistoryError> {
        let ideas = self.history.list().await?;
        Ok(export_document(category, &ideas, timestamp))
    }
}

/// Export the ideas of one generated batch; notices are left out
pub fn export_cards(content_type: ContentType, cards: &[Card], timestamp: DateTime<Utc>) -> String {
    let ideas: Vec<String> = cards
        .iter()
        .filter_map(Card::idea_text)
        .map(str::to_string)
        .collect();
    export_document(content_type.label(), &ideas, timestamp)
}
