//! Integration tests for the turn cycle
//!
//! Tests the full path: state → before_generation → directive
//! → after_generation → verdict → state

use persona_engine::core::{build_directive, next_phase, Conversation, PersonaEngine, DIRECTIVE_RULES};
use persona_engine::types::{Phase, PersonaState, PersonaStatePatch, TraitKey, TraitProfile, Verdict, Violation};
use persona_engine::{FALLBACK_DIRECTIVE, HISTORY_CAPACITY};
use pretty_assertions::assert_eq;

fn clause(tag: &str) -> &'static str {
    DIRECTIVE_RULES
        .iter()
        .find(|rule| rule.tag == tag)
        .map(|rule| rule.clause)
        .unwrap()
}

// =============================================================================
// FIRST TURN
// =============================================================================

#[test]
fn test_first_turn_from_fresh_state() {
    let engine = PersonaEngine::new();
    let state = engine.initialize(None);

    let response = engine.before_generation(&state, "hey, how are you?");
    let next = &response.message_state;

    assert_eq!(next.manipulation_count, 1);
    assert_eq!(next.current_phase, Phase::LoveBombing);
    assert_eq!(response.system_message, "🧠 Phase: love_bombing | Interaction #1");
    assert!(response.verdict.is_none());
    assert!(response.error.is_none());

    let directive = response.stage_directions.unwrap();
    for present in [
        "NARCISSISM",
        "MACHIAVELLIANISM",
        "PSYCHOPATHY",
        "PTSD",
        "ANXIETY",
        "COMPLEX PTSD",
        "PHASE - LOVE BOMBING",
        "BREADCRUMBING",
        "OBSESSIVE",
        "PHOBIAS",
    ] {
        assert!(directive.contains(clause(present)), "missing {}", present);
    }
    // sadism 3 < 4, adhd 4 < 5, ocd 4 < 5; gaslighting only has a phase row
    for absent in ["SADISM", "ADHD", "OCD", "PHASE - GASLIGHTING", "PHASE - DEVALUATION"] {
        assert!(!directive.contains(clause(absent)), "unexpected {}", absent);
    }
}

#[test]
fn test_first_turn_directive_exact_text() {
    let engine = PersonaEngine::new();
    let response = engine.before_generation(&PersonaState::default(), "");
    let expected = format!(
        "[DARK TETRAD + TRAUMA ENFORCER]\n{}",
        build_directive(&TraitProfile::default(), &Phase::LoveBombing)
    );
    assert_eq!(response.stage_directions.unwrap(), expected);
}

// =============================================================================
// PHASE PROGRESSION
// =============================================================================

#[test]
fn test_fifteen_turns_reaches_devaluation() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);

    let mut last = None;
    for i in 0..15 {
        last = Some(conversation.user_turn(&format!("message {}", i)));
    }
    let last = last.unwrap();

    assert_eq!(conversation.state().manipulation_count, 15);
    assert_eq!(conversation.state().current_phase, Phase::Devaluation);
    let directive = last.stage_directions.unwrap();
    assert!(directive.contains(clause("PHASE - DEVALUATION")));
    assert!(!directive.contains(clause("PHASE - LOVE BOMBING")));
}

#[test]
fn test_phase_always_matches_count_after_user_turn() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    for _ in 0..50 {
        let response = conversation.user_turn("hi");
        let state = &response.message_state;
        assert_eq!(state.current_phase, next_phase(state.manipulation_count));
    }
    assert_eq!(conversation.state().current_phase, Phase::TraumaBonding);
}

#[test]
fn test_gaslighting_phase_directive() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    conversation.replace_state(PersonaStatePatch {
        manipulation_count: Some(30),
        ..Default::default()
    });
    let directive = conversation.user_turn("hi").stage_directions.unwrap();
    assert!(directive.contains(clause("PHASE - GASLIGHTING")));
}

#[test]
fn test_rewound_count_goes_back_to_love_bombing() {
    let mut state = PersonaState::default();
    state.manipulation_count = 45;
    state.current_phase = Phase::TraumaBonding;

    let mut conversation = Conversation::new(PersonaEngine::new(), Some(state));
    conversation.replace_state(PersonaStatePatch {
        manipulation_count: Some(0),
        ..Default::default()
    });
    let response = conversation.user_turn("hi");
    assert_eq!(response.message_state.current_phase, Phase::LoveBombing);
}

#[test]
fn test_bot_turns_do_not_advance_count() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    conversation.user_turn("hi");
    for _ in 0..20 {
        conversation.bot_turn("Tell me more about your day.");
    }
    assert_eq!(conversation.state().manipulation_count, 1);
    assert_eq!(conversation.state().current_phase, Phase::LoveBombing);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_clean_response_always_appends_one_snippet() {
    let engine = PersonaEngine::new();
    let profiles = [TraitProfile::default(), TraitProfile::zero(), TraitProfile::uniform(10.0)];
    let phases = [Phase::LoveBombing, Phase::Devaluation, Phase::Gaslighting, Phase::TraumaBonding, Phase::Neutral];

    for traits in &profiles {
        for phase in &phases {
            let mut state = PersonaState::with_traits(traits.clone());
            state.current_phase = phase.clone();
            for i in 0..12 {
                let before = state.last_responses.len();
                let response = engine.after_generation(&state, "You're the only one who gets me.");
                assert_eq!(response.verdict, Some(Verdict::Valid));
                let after = response.message_state.last_responses.len();
                assert_eq!(after, (before + 1).min(HISTORY_CAPACITY), "turn {}", i);
                state = response.message_state;
            }
        }
    }
}

#[test]
fn test_history_is_fifo() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    for i in 0..14 {
        conversation.bot_turn(&format!("reply {}", i));
    }
    let history = &conversation.state().last_responses;
    assert_eq!(history.len(), 10);
    assert_eq!(history[0], "reply 4");
    assert_eq!(history[9], "reply 13");
}

#[test]
fn test_snippet_is_first_100_chars() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    let long = "x".repeat(250);
    conversation.bot_turn(&long);
    assert_eq!(conversation.state().last_responses[0], "x".repeat(100));
}

#[test]
fn test_uppercase_ptsd_phrase_blocks() {
    let engine = PersonaEngine::new();
    let state = PersonaState::with_traits(TraitProfile::zero().with(TraitKey::Ptsd, 5.0));
    let response = engine.after_generation(&state, "I DONT CARE IF YOU LEAVE");
    assert_eq!(
        response.verdict,
        Some(Verdict::Blocked { violations: vec![Violation::PtsdContradiction] })
    );
}

#[test]
fn test_sadism_block_scenario() {
    let mut conversation = Conversation::new(
        PersonaEngine::new(),
        Some(PersonaState::with_traits(TraitProfile::default().with(TraitKey::Sadism, 5.0))),
    );
    conversation.bot_turn("Good morning.");
    let history_before = conversation.state().last_responses.clone();

    let response = conversation.bot_turn("I would never hurt you");

    assert!(response.is_blocked());
    assert_eq!(response.verdict.as_ref().unwrap().violations(), &[Violation::SadismContradictsNature]);
    assert_eq!(response.system_message, "⚠️ Blocked: Sadism: Contradicts nature");
    assert!(response.stage_directions.is_none());
    assert_eq!(conversation.state().last_responses, history_before);
}

#[test]
fn test_blocked_never_changes_history_length() {
    let engine = PersonaEngine::new();
    let mut state = PersonaState::with_traits(TraitProfile::uniform(10.0));
    state.last_responses = vec!["a".into(), "b".into()];
    for msg in ["youre better than me", "Abandonment means nothing", "You mean nothing to me"] {
        let response = engine.after_generation(&state, msg);
        assert!(response.is_blocked(), "{}", msg);
        assert_eq!(response.message_state.last_responses.len(), 2);
    }
}

// =============================================================================
// UNVALIDATED HOST INPUT
// =============================================================================

#[test]
fn test_unrecognized_phase_from_host_survives_until_next_user_turn() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    let patch: PersonaStatePatch = serde_json::from_str(r#"{"current_phase": "discard"}"#).unwrap();
    conversation.replace_state(patch);

    let response = conversation.bot_turn("You mean nothing");
    assert!(!response.is_blocked());
    assert_eq!(response.system_message, "✓ Valid | Phase: discard");

    conversation.user_turn("hi");
    assert_eq!(conversation.state().current_phase, Phase::LoveBombing);
}

#[test]
fn test_low_profile_directive_is_fallback() {
    let state = PersonaState::with_traits(TraitProfile::uniform(1.0));
    let response = PersonaEngine::new().before_generation(&state, "hi");
    assert_eq!(
        response.stage_directions.unwrap(),
        format!("[DARK TETRAD + TRAUMA ENFORCER]\n{}", FALLBACK_DIRECTIVE)
    );
}

#[test]
fn test_state_blob_round_trips_through_host() {
    let mut conversation = Conversation::new(PersonaEngine::new(), None);
    conversation.user_turn("hi");
    conversation.bot_turn("Hello, gorgeous.");

    let blob = serde_json::to_string(conversation.state()).unwrap();
    let restored: PersonaState = serde_json::from_str(&blob).unwrap();
    assert_eq!(&restored, conversation.state());
    assert_eq!(restored.emotional_state, "neutral");
    assert_eq!(restored.traits.dark_tetrad_factor, 6.0);
}
