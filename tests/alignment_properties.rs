use std::sync::Arc;

use pairalign::aligner::boundary::BoundaryPolicy;
use pairalign::{
    AlignmentResult, AlignmentType, Alphabet, EditCosts, GapCosts, PairwiseAligner, Sequence, SymbolSequence,
};
use proptest::prelude::*;

const ALL_TYPES: [AlignmentType; 4] = [
    AlignmentType::Global,
    AlignmentType::SemiGlobal,
    AlignmentType::FreeShift,
    AlignmentType::Local,
];

fn dna(text: &str) -> SymbolSequence {
    SymbolSequence::from_text(Arc::new(Alphabet::dna()), text).unwrap()
}

fn linear() -> EditCosts {
    EditCosts::new(0.0, 3.0, GapCosts::Linear { gap: 2.0 })
}

fn affine() -> EditCosts {
    EditCosts::new(0.0, 3.0, GapCosts::Affine { open: 4.0, elongate: 1.0 })
}

fn local(gaps: GapCosts) -> EditCosts {
    EditCosts::new(-1.0, 1.0, gaps)
}

/// Linear and affine costs suitable for the alignment type
fn costs_for(aln_type: AlignmentType) -> [EditCosts; 2] {
    if aln_type == AlignmentType::Local {
        [local(GapCosts::Linear { gap: 1.0 }), local(GapCosts::Affine { open: 2.0, elongate: 1.0 })]
    } else {
        [linear(), affine()]
    }
}

/// Recompute the cost of an alignment from its columns. Gaps along a free edge of the DP
/// matrix cost nothing.
fn path_cost(
    result: &AlignmentResult,
    seq1: &SymbolSequence,
    seq2: &SymbolSequence,
    costs: &EditCosts,
    aln_type: AlignmentType,
) -> f64 {
    let policy = BoundaryPolicy::new(aln_type);
    let (len1, len2) = (seq1.len(), seq2.len());
    let mut i = result.seq1_span().start;
    let mut j = result.seq2_span().start;

    let mut cost = 0.0;
    let mut prev_gap: Option<bool> = None;

    for pair in result.pairs() {
        match (pair.pos1, pair.pos2) {
            (Some(p1), Some(p2)) => {
                cost += if seq1.symbol(p1) == seq2.symbol(p2) { costs.match_cost } else { costs.mismatch_cost };
                prev_gap = None;
                i += 1;
                j += 1;
            },
            (Some(_), None) | (None, Some(_)) => {
                let in_seq1 = pair.pos1.is_none();
                let free = if in_seq1 {
                    (i == 0 && policy.free_leading_seq2) || (i == len1 && policy.free_trailing_seq2)
                } else {
                    (j == 0 && policy.free_leading_seq1) || (j == len2 && policy.free_trailing_seq1)
                };

                if !free {
                    cost += match costs.gaps {
                        GapCosts::Linear { gap } => gap,
                        GapCosts::Affine { open, elongate } => if prev_gap == Some(in_seq1) { elongate } else { open },
                    };
                }

                prev_gap = Some(in_seq1);
                if in_seq1 { j += 1 } else { i += 1 }
            },
            (None, None) => unreachable!(),
        }
    }

    cost
}

fn strip_gaps(aligned: &str) -> String {
    aligned.replace('-', "")
}

proptest! {
    #[test]
    fn global_cost_is_symmetric(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (seq1, seq2) = (dna(&a), dna(&b));

        for costs in [linear(), affine()] {
            let mut aligner = PairwiseAligner::new(costs);
            let forward = aligner.align(AlignmentType::Global, &seq1, &seq2).unwrap();
            let reverse = aligner.align(AlignmentType::Global, &seq2, &seq1).unwrap();

            prop_assert_eq!(forward.cost(), reverse.cost());
        }
    }

    #[test]
    fn self_alignment_is_free(a in "[ACGT]{0,16}") {
        let seq = dna(&a);

        for costs in [linear(), affine()] {
            let mut aligner = PairwiseAligner::new(costs);
            let result = aligner.align(AlignmentType::Global, &seq, &seq).unwrap();

            prop_assert_eq!(result.cost(), 0.0);
            prop_assert_eq!(result.matches(), seq.len());
            prop_assert!(result.pairs().iter().all(|p| p.is_aligned()));
        }
    }

    #[test]
    fn cost_matches_path(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (seq1, seq2) = (dna(&a), dna(&b));

        for aln_type in ALL_TYPES {
            for costs in costs_for(aln_type) {
                let mut aligner = PairwiseAligner::new(costs);
                let result = aligner.align(aln_type, &seq1, &seq2).unwrap();

                prop_assert_eq!(path_cost(&result, &seq1, &seq2, &costs, aln_type), result.cost());
                prop_assert_eq!(aligner.get_cost(seq1.len(), seq2.len()).unwrap(), result.cost());
            }
        }
    }

    #[test]
    fn removing_gaps_restores_sequences(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (seq1, seq2) = (dna(&a), dna(&b));

        for aln_type in ALL_TYPES {
            let costs = if aln_type == AlignmentType::Local { local(GapCosts::Affine { open: 2.0, elongate: 1.0 }) } else { affine() };
            let mut aligner = PairwiseAligner::new(costs);
            let result = aligner.align(aln_type, &seq1, &seq2).unwrap();

            prop_assert_eq!(result.aligned1().len(), result.aligned2().len());

            let span1 = result.seq1_span();
            let span2 = result.seq2_span();
            prop_assert_eq!(strip_gaps(result.aligned1()), &a[span1.clone()]);
            prop_assert_eq!(strip_gaps(result.aligned2()), &b[span2.clone()]);

            if aln_type != AlignmentType::Local {
                prop_assert_eq!(span1, 0..a.len());
                prop_assert_eq!(span2, 0..b.len());
            }
        }
    }

    #[test]
    fn local_cost_never_positive(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (seq1, seq2) = (dna(&a), dna(&b));

        for gaps in [GapCosts::Linear { gap: 1.0 }, GapCosts::Affine { open: 2.0, elongate: 1.0 }] {
            let mut aligner = PairwiseAligner::new(local(gaps));
            let result = aligner.align(AlignmentType::Local, &seq1, &seq2).unwrap();

            prop_assert!(result.cost() <= 0.0);
            prop_assert!(result.pairs().first().map_or(true, |p| p.is_aligned()));
            prop_assert!(result.pairs().last().map_or(true, |p| p.is_aligned()));
        }
    }

    #[test]
    fn wide_band_equals_full_matrix(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (seq1, seq2) = (dna(&a), dna(&b));
        let width = seq1.len().max(seq2.len());

        for aln_type in ALL_TYPES {
            for costs in costs_for(aln_type) {
                let mut full = PairwiseAligner::new(costs);
                let mut banded = PairwiseAligner::new(costs).with_off_diagonal(Some(width));

                let expected = full.align(aln_type, &seq1, &seq2).unwrap();
                let result = banded.align(aln_type, &seq1, &seq2).unwrap();
                prop_assert_eq!(result, expected);
            }
        }
    }

    #[test]
    fn narrow_band_never_improves_cost(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}", extra in 0usize..4) {
        let (seq1, seq2) = (dna(&a), dna(&b));
        let off_diagonal = seq1.len().abs_diff(seq2.len()) + extra;

        for aln_type in [AlignmentType::Global, AlignmentType::SemiGlobal, AlignmentType::FreeShift] {
            let mut full = PairwiseAligner::new(affine());
            let mut banded = PairwiseAligner::new(affine()).with_off_diagonal(Some(off_diagonal));

            let expected = full.align(aln_type, &seq1, &seq2).unwrap();
            let result = banded.align(aln_type, &seq1, &seq2).unwrap();

            prop_assert!(result.cost().is_finite());
            prop_assert!(result.cost() >= expected.cost());
            prop_assert_eq!(strip_gaps(result.aligned1()), a.as_str());
            prop_assert_eq!(strip_gaps(result.aligned2()), b.as_str());
        }
    }
}
