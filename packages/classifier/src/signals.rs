// ABOUTME: Reduces a set of raw detection signals to one intent
// ABOUTME: Uses a fixed priority order so rejection always outranks engagement

use leadstage_core::{signal_intent, Intent, Signal};
use std::collections::HashSet;

/// Highest priority first. Negative sentiment beats positive regardless of arrival order.
pub const SIGNAL_PRIORITY: [Signal; 10] = [
    Signal::UserExcluded,
    Signal::ExplicitRejection,
    Signal::SentimentNegative,
    Signal::SentimentPositive,
    Signal::SentimentNeutral,
    Signal::ReplyReceived,
    Signal::ConversationStopped,
    Signal::NoReplyAfterNDays,
    Signal::OutreachSent,
    Signal::AutoReplyDetected,
];

/// Intent of the highest-priority signal present, `NoContact` when there are none
pub fn resolve_signals_to_intent(signals: &HashSet<Signal>) -> Intent {
    SIGNAL_PRIORITY
        .iter()
        .find(|signal| signals.contains(signal))
        .and_then(|signal| signal_intent(*signal))
        .unwrap_or(Intent::NoContact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(signals: &[Signal]) -> HashSet<Signal> {
        signals.iter().copied().collect()
    }

    #[test]
    fn test_empty_resolves_to_no_contact() {
        assert_eq!(resolve_signals_to_intent(&HashSet::new()), Intent::NoContact);
    }

    #[test]
    fn test_priority_list_covers_every_signal() {
        let listed: HashSet<Signal> = SIGNAL_PRIORITY.iter().copied().collect();
        assert_eq!(listed.len(), Signal::ALL.len());
    }

    #[rstest]
    #[case(&[Signal::SentimentNegative, Signal::SentimentPositive], Intent::NegativeEngagement)]
    #[case(&[Signal::SentimentPositive, Signal::SentimentNegative], Intent::NegativeEngagement)]
    #[case(&[Signal::ReplyReceived, Signal::ExplicitRejection], Intent::NegativeEngagement)]
    #[case(&[Signal::ExplicitRejection, Signal::UserExcluded], Intent::DoNotContact)]
    #[case(&[Signal::OutreachSent, Signal::ReplyReceived], Intent::PositiveEngagement)]
    #[case(&[Signal::SentimentNeutral], Intent::PositiveEngagement)]
    #[case(&[Signal::OutreachSent, Signal::NoReplyAfterNDays], Intent::NoResponseAfterEngagement)]
    #[case(&[Signal::ReplyReceived, Signal::ConversationStopped], Intent::PositiveEngagement)]
    #[case(&[Signal::AutoReplyDetected], Intent::OutreachSent)]
    #[case(&[Signal::OutreachSent], Intent::OutreachSent)]
    fn test_resolution_priority(#[case] signals: &[Signal], #[case] expected: Intent) {
        assert_eq!(resolve_signals_to_intent(&set(signals)), expected);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let signals = set(&[
            Signal::AutoReplyDetected,
            Signal::SentimentPositive,
            Signal::ConversationStopped,
        ]);
        let first = resolve_signals_to_intent(&signals);
        for _ in 0..10 {
            assert_eq!(resolve_signals_to_intent(&signals), first);
        }
        assert_eq!(first, Intent::PositiveEngagement);
    }
}
