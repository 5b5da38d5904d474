//! Unit tests for seniority capacity, availability, and agent serde.

use chat_queue::models::agent::{Agent, AgentShift, Seniority};

#[test]
fn max_chats_is_ten_times_efficiency_rounded_down() {
    assert_eq!(Seniority::Junior.max_chats(), 4);
    assert_eq!(Seniority::MidLevel.max_chats(), 6);
    assert_eq!(Seniority::Senior.max_chats(), 8);
    assert_eq!(Seniority::TeamLead.max_chats(), 5);
}

#[test]
fn efficiency_tenths_match_level_constants() {
    assert_eq!(Seniority::Junior.efficiency_tenths(), 4);
    assert_eq!(Seniority::MidLevel.efficiency_tenths(), 6);
    assert_eq!(Seniority::Senior.efficiency_tenths(), 8);
    assert_eq!(Seniority::TeamLead.efficiency_tenths(), 5);
}

#[test]
fn seniority_orders_junior_first_team_lead_last() {
    let mut levels = vec![
        Seniority::TeamLead,
        Seniority::Senior,
        Seniority::Junior,
        Seniority::MidLevel,
    ];
    levels.sort();
    assert_eq!(
        levels,
        vec![
            Seniority::Junior,
            Seniority::MidLevel,
            Seniority::Senior,
            Seniority::TeamLead
        ]
    );
}

#[test]
fn agent_available_until_max_chats() {
    let mut agent = Agent::on_shift("a", Seniority::TeamLead, 0);
    for _ in 0..5 {
        assert!(agent.is_available());
        agent.active_chats += 1;
    }
    assert!(!agent.is_available(), "team lead is full at 5 chats");
}

#[test]
fn fixed_shift_covers_only_its_own_shift() {
    let shift = AgentShift::Fixed(1);
    assert!(shift.covers(1));
    assert!(!shift.covers(0));
    assert!(!shift.covers(2));
}

#[test]
fn floating_shift_covers_every_shift() {
    for current in [-1, 0, 1, 2, 99] {
        assert!(AgentShift::Floating.covers(current));
    }
}

#[test]
fn new_agents_start_idle() {
    assert_eq!(Agent::on_shift("a", Seniority::Senior, 2).active_chats, 0);
    assert_eq!(Agent::floating("b", Seniority::Junior).active_chats, 0);
}

#[test]
fn seniority_serializes_to_snake_case() {
    let json = serde_json::to_string(&Seniority::MidLevel).expect("serialize");
    assert_eq!(json, "\"mid_level\"");
    let parsed: Seniority = serde_json::from_str("\"team_lead\"").expect("deserialize");
    assert_eq!(parsed, Seniority::TeamLead);
}

#[test]
fn unknown_seniority_fails_deserialization() {
    let result: Result<Seniority, _> = serde_json::from_str("\"intern\"");
    assert!(result.is_err());
}
