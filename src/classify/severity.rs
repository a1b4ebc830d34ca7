//! Severity heuristics for decoded entries.
//!
//! Every function here is pure: an entry's severity depends only on its own
//! fields, never on other entries.

use crate::parser::schema::{BailoutType, CodeState, CodeUpdate, IcState, LogEvent, Severity};

/// Rank an IC transition by the state it lands in
///
/// Megamorphic and generic sites are the ones the optimizer gives up on;
/// polymorphic sites still inline a few shapes.
pub fn ic_severity(new_state: IcState) -> Severity {
    match new_state {
        IcState::Generic | IcState::Megamorphic | IcState::Megadom => Severity::High,
        IcState::Polymorphic => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Rank a deoptimization by its bailout type
pub fn deopt_severity(bailout_type: BailoutType) -> Severity {
    match bailout_type {
        BailoutType::Eager => Severity::High,
        BailoutType::Lazy => Severity::Medium,
        BailoutType::Soft => Severity::Low,
    }
}

/// Rank a function by its code history
///
/// * builtin-only history: `Low`
/// * never reached an optimizing tier: `High`
/// * deoptimized and not optimized again: `High`
/// * deoptimized, then optimized again: `Medium`
/// * optimized and stable: `Low`
pub fn code_severity(updates: &[CodeUpdate]) -> Severity {
    let mut only_builtin = true;
    let mut reached_optimized = false;
    let mut pending_deopt = false;
    let mut reoptimized = false;

    for update in updates {
        match update.state {
            CodeState::Builtin => continue,
            // A deopt means optimized code existed, even if its creation
            // line was not logged.
            CodeState::Deoptimized => {
                reached_optimized = true;
                pending_deopt = true;
            }
            state if state.is_optimized() => {
                if pending_deopt {
                    reoptimized = true;
                    pending_deopt = false;
                }
                reached_optimized = true;
            }
            _ => {}
        }
        only_builtin = false;
    }

    if only_builtin {
        Severity::Low
    } else if !reached_optimized || pending_deopt {
        Severity::High
    } else if reoptimized {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Assign the severity of an event from its own fields
pub fn classify(event: &mut LogEvent) {
    match event {
        LogEvent::Code(entry) => entry.severity = code_severity(&entry.updates),
        LogEvent::Deopt(entry) => entry.severity = deopt_severity(entry.bailout_type),
        LogEvent::Ic(entry) => entry.severity = ic_severity(entry.new_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(states: &[CodeState]) -> Vec<CodeUpdate> {
        states
            .iter()
            .enumerate()
            .map(|(i, state)| CodeUpdate {
                timestamp: i as u64,
                state: *state,
            })
            .collect()
    }

    #[test]
    fn test_ic_severity() {
        assert_eq!(ic_severity(IcState::Megamorphic), Severity::High);
        assert_eq!(ic_severity(IcState::Generic), Severity::High);
        assert_eq!(ic_severity(IcState::Polymorphic), Severity::Medium);
        assert_eq!(ic_severity(IcState::Monomorphic), Severity::Low);
        assert_eq!(ic_severity(IcState::Uninitialized), Severity::Low);
    }

    #[test]
    fn test_deopt_severity() {
        assert_eq!(deopt_severity(BailoutType::Eager), Severity::High);
        assert_eq!(deopt_severity(BailoutType::Lazy), Severity::Medium);
        assert_eq!(deopt_severity(BailoutType::Soft), Severity::Low);
    }

    #[test]
    fn test_code_never_optimized() {
        let updates = history(&[CodeState::Unoptimized, CodeState::Baseline]);
        assert_eq!(code_severity(&updates), Severity::High);
    }

    #[test]
    fn test_code_optimized_and_stable() {
        let updates = history(&[CodeState::Unoptimized, CodeState::Optimized]);
        assert_eq!(code_severity(&updates), Severity::Low);
    }

    #[test]
    fn test_code_deoptimized_for_good() {
        let updates = history(&[
            CodeState::Unoptimized,
            CodeState::Optimized,
            CodeState::Deoptimized,
        ]);
        assert_eq!(code_severity(&updates), Severity::High);
    }

    #[test]
    fn test_code_reoptimized() {
        let updates = history(&[
            CodeState::Unoptimized,
            CodeState::MidTier,
            CodeState::Deoptimized,
            CodeState::Optimized,
        ]);
        assert_eq!(code_severity(&updates), Severity::Medium);
    }

    #[test]
    fn test_code_builtin_only() {
        assert_eq!(code_severity(&history(&[CodeState::Builtin])), Severity::Low);
        assert_eq!(code_severity(&[]), Severity::Low);
    }
}
