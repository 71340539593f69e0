//! Property tests for the pipeline invariants.

use plotiq_core::analysis::chunker::CHUNKS_PER_CHAPTER;
use plotiq_core::analysis::traits::MAX_EVIDENCE;
use plotiq_core::analysis::{
    build_traits, compare_claims, count_unsupported, decide, split_into_chunks, word_count,
    ActionRecord, ChunkId, Claim, ComparisonResult, EmotionTag, Trait, TraitKind, TraitLevel,
    TraitRef, Verdict,
};
use plotiq_core::testing::assert_chunk_invariants;
use plotiq_core::{AnalysisConfig, Analyzer};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn level() -> impl Strategy<Value = TraitLevel> {
    prop::sample::select(TraitLevel::all())
}

fn kind() -> impl Strategy<Value = TraitKind> {
    prop::sample::select(TraitKind::all())
}

/// Words with occasional sentence-ending punctuation.
fn story() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{1,9}[.!?]?", 0..400).prop_map(|words| words.join(" "))
}

fn record(action: String) -> ActionRecord {
    ActionRecord {
        chunk_id: ChunkId::new(1, 1),
        action,
        decision: "Pending decision".to_string(),
        emotion: EmotionTag::Implied,
    }
}

fn comparison(supported: bool) -> ComparisonResult {
    ComparisonResult {
        claim_text: "claim".to_string(),
        trait_ref: TraitRef::Known(TraitKind::Risk),
        supported,
        contradiction_notes: Vec::new(),
    }
}

proptest! {
    #[test]
    fn chunks_respect_bounds_and_numbering(
        text in story(),
        min in 1usize..40,
        extra in 0usize..60,
        seed in any::<u64>(),
    ) {
        let max = min + extra;
        let chunks = split_into_chunks(&text, min, max, &mut StdRng::seed_from_u64(seed));

        assert_chunk_invariants(&chunks, max);
        let total: usize = chunks.iter().map(|c| c.word_count).sum();
        prop_assert_eq!(total, word_count(&text));
        prop_assert!(chunks.iter().all(|c| c.order <= CHUNKS_PER_CHAPTER));
    }

    #[test]
    fn chunks_are_non_empty_unless_text_is_blank(text in story(), seed in any::<u64>()) {
        let chunks = split_into_chunks(&text, 5, 20, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(chunks.is_empty(), text.trim().is_empty());
    }

    #[test]
    fn always_four_traits_in_fixed_order(actions in prop::collection::vec(".{0,60}", 0..30)) {
        let records: Vec<ActionRecord> = actions.into_iter().map(record).collect();
        let traits = build_traits(&records);

        let kinds: Vec<TraitKind> = traits.iter().map(|t| t.kind).collect();
        prop_assert_eq!(kinds, TraitKind::all().to_vec());
        prop_assert!(traits.iter().all(|t| t.evidence.len() <= MAX_EVIDENCE));
    }

    #[test]
    fn level_follows_keyword_count(kind in kind(), hits in 0usize..8, misses in 0usize..8) {
        let keyword = kind.keywords()[0];
        let mut records: Vec<ActionRecord> = (0..hits)
            .map(|i| record(format!("Step {i} was {keyword}")))
            .collect();
        records.extend((0..misses).map(|i| record(format!("Quiet moment {i}"))));

        let traits = build_traits(&records);
        let observed = traits.iter().find(|t| t.kind == kind).unwrap();

        let expected = match hits {
            0 | 1 => TraitLevel::Low,
            2 | 3 => TraitLevel::Medium,
            _ => TraitLevel::High,
        };
        prop_assert_eq!(observed.level, expected);
        prop_assert_eq!(observed.evidence.len(), hits.min(MAX_EVIDENCE));
    }

    #[test]
    fn supported_iff_gap_at_most_one(kind in kind(), expected in level(), actual in level()) {
        let traits: Vec<Trait> = TraitKind::all()
            .iter()
            .map(|&k| Trait { kind: k, level: actual, evidence: Vec::new() })
            .collect();
        let claims = [Claim::new("claim", kind, expected)];
        let results = compare_claims(&claims, &traits);

        let gap = expected.ordinal().abs_diff(actual.ordinal());
        prop_assert_eq!(results[0].supported, gap <= 1);
        prop_assert_eq!(results[0].contradiction_notes.is_empty(), results[0].supported);
    }

    #[test]
    fn verdict_is_contradictory_from_two_unsupported(flags in prop::collection::vec(any::<bool>(), 0..10)) {
        let results: Vec<ComparisonResult> = flags.iter().map(|&s| comparison(s)).collect();
        let unsupported = flags.iter().filter(|s| !**s).count();

        let verdict = decide(&results);
        prop_assert_eq!(verdict == Verdict::Contradictory, unsupported >= 2);
        prop_assert_eq!(count_unsupported(&results), unsupported);
    }

    #[test]
    fn contradiction_count_matches_comparisons(
        text in story(),
        claims in prop::collection::vec((kind(), level()), 0..6),
        seed in any::<u64>(),
    ) {
        let claims: Vec<Claim> = claims
            .into_iter()
            .map(|(k, l)| Claim::new(format!("{k} is {l}"), k, l))
            .collect();
        let analyzer = Analyzer::new(
            AnalysisConfig::new().with_min_words(10).with_max_words(40).with_seed(seed),
        ).unwrap();

        let result = analyzer.run(&text, "Subject", &claims);

        prop_assert_eq!(result.comparisons.len(), claims.len());
        prop_assert_eq!(result.contradiction_count, count_unsupported(&result.comparisons));
        prop_assert_eq!(result.final_decision, decide(&result.comparisons));
        prop_assert_eq!(result.traits.len(), 4);
    }
}
