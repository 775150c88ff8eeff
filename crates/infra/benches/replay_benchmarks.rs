use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use claimledger_claims::event::{CaseOpened, ClaimDrafted, ClaimEvent};
use claimledger_claims::{ClaimValue, Track};
use claimledger_core::{ActorId, ActorRole, CaseId, DurationDays, EventId, Money};
use claimledger_infra::{project_stream, StoredEvent, UncommittedEvent};

fn stored(case_id: CaseId, sequence: u64, event: &ClaimEvent) -> StoredEvent {
    let e = UncommittedEvent::from_typed(case_id, EventId::new(), event).unwrap();
    StoredEvent {
        event_id: e.event_id,
        case_id,
        sequence_number: sequence,
        event_type: e.event_type,
        event_version: e.event_version,
        occurred_at: e.occurred_at,
        payload: e.payload,
    }
}

/// A stream of one opening event followed by `n - 1` schedule redrafts.
fn stream_of(n: u64) -> (CaseId, Vec<StoredEvent>) {
    let case_id = CaseId::new();
    let claimant = ActorId::new();
    let opened = ClaimEvent::CaseOpened(CaseOpened {
        case_id,
        claimant_id: claimant,
        respondent_id: ActorId::new(),
        contract_ref: "NS-8405/9".to_string(),
        title: "Replay benchmark".to_string(),
        daily_penalty_rate: Money::from_minor_units(50_000),
        actor_id: claimant,
        actor_role: ActorRole::Claimant,
        occurred_at: Utc::now(),
    });

    let mut stream = vec![stored(case_id, 1, &opened)];
    for seq in 2..=n {
        let drafted = ClaimEvent::ClaimDrafted(ClaimDrafted {
            case_id,
            track: Track::Schedule,
            value: ClaimValue::Days {
                days: DurationDays::new((seq % 30) as u32 + 1),
            },
            amends: None,
            actor_id: claimant,
            actor_role: ActorRole::Claimant,
            occurred_at: Utc::now(),
        });
        stream.push(stored(case_id, seq, &drafted));
    }
    (case_id, stream)
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for n in [100u64, 1_000, 10_000] {
        let (case_id, stream) = stream_of(n);
        group.bench_with_input(BenchmarkId::new("project_stream", n), &stream, |b, s| {
            b.iter(|| project_stream(case_id, black_box(s)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
