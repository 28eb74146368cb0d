// Staggered reveal of suggestion cards, guarded by a generation counter so a newer
// request supersedes reveals still pending from an older one.
use std::rc::Rc;
use yew::Reducible;

use crate::model::CommuteOption;

#[derive(Debug, Clone, PartialEq)]
pub struct RevealStep {
    pub generation: u64,
    pub index: usize,
    pub delay_ms: u32,
    pub option: CommuteOption,
}

#[derive(Debug, Clone, Default)]
pub struct RevealSchedule {
    generation: u64,
}

impl RevealSchedule {
    /// Starts a new request; every earlier generation becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Delays grow with the list index, so reveal order matches list order.
    pub fn plan(
        &self,
        generation: u64,
        options: Vec<CommuteOption>,
        stagger_ms: u32,
    ) -> Vec<RevealStep> {
        options
            .into_iter()
            .enumerate()
            .map(|(index, option)| RevealStep {
                generation,
                index,
                delay_ms: (index as u32).saturating_mul(stagger_ms),
                option,
            })
            .collect()
    }
}

/// Cards currently on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionFeed {
    pub generation: u64,
    pub loading: bool,
    pub cards: Vec<CommuteOption>,
    /// Set when suggestions cannot be produced (no location yet).
    pub unavailable: Option<String>,
}

#[derive(Debug, Clone)]
pub enum FeedAction {
    Begin { generation: u64 },
    Computed { generation: u64 },
    Reveal(RevealStep),
    Unavailable { generation: u64, reason: String },
}

impl Reducible for SuggestionFeed {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use FeedAction::*;
        match action {
            Begin { generation } => Rc::new(SuggestionFeed {
                generation,
                loading: true,
                cards: Vec::new(),
                unavailable: None,
            }),
            Computed { generation } => {
                if generation != self.generation {
                    return self;
                }
                let mut new = (*self).clone();
                new.loading = false;
                Rc::new(new)
            }
            Reveal(step) => {
                if step.generation != self.generation {
                    tracing::debug!(
                        stale = step.generation,
                        current = self.generation,
                        "dropping stale suggestion reveal"
                    );
                    return self;
                }
                let mut new = (*self).clone();
                new.cards.push(step.option);
                Rc::new(new)
            }
            Unavailable { generation, reason } => Rc::new(SuggestionFeed {
                generation,
                loading: false,
                cards: Vec::new(),
                unavailable: Some(reason),
            }),
        }
    }
}
