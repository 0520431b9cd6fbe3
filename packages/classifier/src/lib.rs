// ABOUTME: Stage classification for Leadstage
// ABOUTME: Resolves raw signals to intents and scores candidate stage transitions

pub mod evaluation;
pub mod matching;
pub mod signals;

pub use evaluation::{suggest_stage, ActivitySignals, SignalSource, StageEvaluator, StageSuggestion};
pub use matching::{
    evaluate_contextual_match, evaluate_contextual_match_named, MatchContext, MatchScore,
};
pub use signals::{resolve_signals_to_intent, SIGNAL_PRIORITY};
