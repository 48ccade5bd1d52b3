use qisst_ledger::{
    AutoConfirm, Committee, Confirm, ConfirmRequest, DrawOutcome, FixedDraw, LedgerConfig,
    RandomDraw,
};
use qisst_types::{CommitteeError, Frequency, MemberId, NewMember, Settings};

/// Confirms every request and keeps the prompts it was shown
#[derive(Default)]
struct RecordingConfirm {
    prompts: Vec<String>,
}

impl Confirm for RecordingConfirm {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        self.prompts.push(request.prompt());
        true
    }
}

fn daily_committee() -> Committee {
    let settings = Settings::default()
        .with_installment(100.0)
        .with_frequency(Frequency::Daily);
    Committee::new(settings, LedgerConfig::default())
}

fn add_abc(committee: &mut Committee) -> Vec<MemberId> {
    ["A", "B", "C"]
        .iter()
        .map(|name| committee.add_member(NewMember::new(*name)).unwrap())
        .collect()
}

#[test]
fn three_member_day_cycle() {
    let mut committee = daily_committee();
    let ids = add_abc(&mut committee);

    let cycle = committee.create_cycle();
    assert_eq!(committee.cycle(&cycle).unwrap().label, "Day 1");

    committee.toggle_payment(&ids[0], &cycle);
    committee.toggle_payment(&ids[1], &cycle);

    let projector = committee.projector();
    assert_eq!(committee.collected_count(&cycle), 2);
    assert_eq!(projector.collected_today(&cycle), 200.0);
    assert!((projector.collection_progress(&cycle) - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(projector.total_pot_value(), 3.0 * 100.0 * 30.0);

    let mut confirm = RecordingConfirm::default();
    let outcome = committee
        .draw_winner(&cycle, &mut RandomDraw::seeded(7), &mut confirm)
        .unwrap();

    let winner = outcome.winner().cloned().unwrap();
    assert!(ids.contains(&winner));

    let recipients: Vec<&MemberId> = committee
        .members()
        .members()
        .iter()
        .filter(|m| m.has_received_pot)
        .map(|m| &m.id)
        .collect();
    assert_eq!(recipients, vec![&winner]);

    let stored = committee.cycle(&cycle).unwrap();
    assert!(stored.is_completed);
    assert_eq!(stored.winner_id.as_ref(), Some(&winner));

    let winner_name = &committee.member(&winner).unwrap().name;
    assert_eq!(confirm.prompts.len(), 1);
    assert!(confirm.prompts[0].contains(winner_name.as_str()));
}

#[test]
fn unpaid_members_remain_eligible() {
    let mut committee = daily_committee();
    let ids = add_abc(&mut committee);
    let cycle = committee.create_cycle();
    committee.toggle_payment(&ids[0], &cycle);

    // C never paid and can still win
    let outcome = committee
        .draw_winner(&cycle, &mut FixedDraw(2), &mut AutoConfirm)
        .unwrap();
    assert_eq!(outcome.winner(), Some(&ids[2]));
}

#[test]
fn full_rotation_then_pool_exhausted() {
    let mut committee = daily_committee();
    let ids = add_abc(&mut committee);
    let mut source = RandomDraw::seeded(2024);
    let mut winners = Vec::new();

    for _ in 0..ids.len() {
        let cycle = committee.create_cycle();
        let outcome = committee
            .draw_winner(&cycle, &mut source, &mut AutoConfirm)
            .unwrap();
        winners.push(outcome.winner().cloned().unwrap());
    }

    winners.sort();
    let mut expected = ids.clone();
    expected.sort();
    assert_eq!(winners, expected);

    let last = committee.create_cycle();
    let before = committee.members().snapshot();
    let outcome = committee
        .draw_winner(&last, &mut source, &mut AutoConfirm)
        .unwrap();
    assert_eq!(outcome, DrawOutcome::PoolExhausted { cycle_id: last.clone() });
    assert_eq!(*committee.members().snapshot(), *before);
    assert!(!committee.cycle(&last).unwrap().is_completed);
}

#[test]
fn second_draw_keeps_first_winner() {
    let mut committee = daily_committee();
    add_abc(&mut committee);
    let cycle = committee.create_cycle();

    let first = committee
        .draw_winner(&cycle, &mut FixedDraw(0), &mut AutoConfirm)
        .unwrap();
    let second = committee.draw_winner(&cycle, &mut FixedDraw(1), &mut AutoConfirm);

    assert!(matches!(second, Err(CommitteeError::CycleAlreadyDrawn { .. })));
    assert_eq!(
        committee.cycle(&cycle).unwrap().winner_id.as_ref(),
        first.winner()
    );
    assert_eq!(committee.members().eligible().len(), 2);
}

#[test]
fn draw_is_roughly_uniform() {
    let trials = 3_000;
    let mut counts = [0usize; 3];
    let mut source = RandomDraw::seeded(99);

    for _ in 0..trials {
        let mut committee = daily_committee();
        let ids = add_abc(&mut committee);
        let cycle = committee.create_cycle();
        let outcome = committee
            .draw_winner(&cycle, &mut source, &mut AutoConfirm)
            .unwrap();
        let winner = outcome.winner().unwrap();
        let slot = ids.iter().position(|id| id == winner).unwrap();
        counts[slot] += 1;
    }

    for count in counts {
        assert!((800..=1200).contains(&count), "skewed draw: {:?}", counts);
    }
}
