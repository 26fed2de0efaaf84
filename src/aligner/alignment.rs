use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use serde::Serialize;

use crate::aligner::scoring::Cost;
use crate::aligner::traceback::TracedPath;
use crate::sequence::Sequence;

/// Symbol used to render gap positions
pub const GAP: char = '-';

/// An aligned pair of positions. The first element is the position in sequence 1, the second
/// the position in sequence 2. In case of a gap, one of the elements is `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlignedPair {
    pub pos1: Option<usize>,
    pub pos2: Option<usize>,
}

impl AlignedPair {
    pub fn new(pos1: Option<usize>, pos2: Option<usize>) -> Self {
        Self { pos1, pos2 }
    }

    pub fn is_aligned(&self) -> bool {
        matches!((self.pos1, self.pos2), (Some(_), Some(_)))
    }

    pub fn is_indel(&self) -> bool {
        !self.is_aligned()
    }
}

/// An optimal alignment of two (sub-)sequences. Independent of the aligner's matrices, so it
/// stays valid when the aligner is reused.
///
/// `aligned1` and `aligned2` hold the tokens of each sequence joined by that sequence's
/// delimiter, with one gap token per indel column. The `Display` view additionally pads
/// each column to a common width so the three lines line up.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignmentResult {
    aligned1: String,
    aligned2: String,
    cost: Cost,
    start1: usize,
    end1: usize,
    start2: usize,
    end2: usize,
    matches: usize,
    pairs: Vec<AlignedPair>,

    #[serde(skip)]
    view: [String; 3],
}

impl AlignmentResult {
    pub(crate) fn new<S1, S2>(
        seq1: &S1,
        seq2: &S2,
        offsets: (usize, usize),
        path: TracedPath,
        cost: Cost,
    ) -> Self
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        let columns = path.pairs.len();
        let mut tokens1 = Vec::with_capacity(columns);
        let mut tokens2 = Vec::with_capacity(columns);
        let mut view1 = Vec::with_capacity(columns);
        let mut markers = Vec::with_capacity(columns);
        let mut view2 = Vec::with_capacity(columns);

        for pair in &path.pairs {
            let (token1, token2, marker) = match (pair.pos1, pair.pos2) {
                (Some(p1), Some(p2)) => {
                    let marker = if seq1.symbol(p1) == seq2.symbol(p2) { '|' } else { '*' };
                    (seq1.display(p1).to_string(), seq2.display(p2).to_string(), marker)
                },
                (Some(p1), None) => {
                    let t1 = seq1.display(p1);
                    (t1.to_string(), gap_token(token_width(t1)), ' ')
                },
                (None, Some(p2)) => {
                    let t2 = seq2.display(p2);
                    (gap_token(token_width(t2)), t2.to_string(), ' ')
                },
                (None, None) => continue,
            };

            let width = token_width(&token1).max(token_width(&token2));
            view1.push(pad(&token1, width));
            markers.push(marker_column(marker, width));
            view2.push(pad(&token2, width));

            tokens1.push(token1);
            tokens2.push(token2);
        }

        // All view lines use sequence 1's delimiter so columns line up
        let view_delim = seq1.alphabet().delimiter();
        let marker_delim = " ".repeat(token_width(view_delim));
        let (offset1, offset2) = offsets;

        Self {
            aligned1: tokens1.join(seq1.alphabet().delimiter()),
            aligned2: tokens2.join(seq2.alphabet().delimiter()),
            cost,
            start1: offset1 + path.start.0,
            end1: offset1 + path.end.0,
            start2: offset2 + path.start.1,
            end2: offset2 + path.end.1,
            matches: path.matches,
            pairs: path.pairs,
            view: [
                view1.join(view_delim),
                markers.join(marker_delim.as_str()),
                view2.join(view_delim),
            ],
        }
    }

    /// Sequence 1 with gaps inserted
    pub fn aligned1(&self) -> &str {
        &self.aligned1
    }

    /// Sequence 2 with gaps inserted
    pub fn aligned2(&self) -> &str {
        &self.aligned2
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Positions of sequence 1 covered by the alignment
    pub fn seq1_span(&self) -> Range<usize> {
        self.start1..self.end1
    }

    /// Positions of sequence 2 covered by the alignment
    pub fn seq2_span(&self) -> Range<usize> {
        self.start2..self.end2
    }

    /// Number of aligned pairs with identical symbols
    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn identity(&self) -> f64 {
        if self.pairs.is_empty() {
            0.0
        } else {
            self.matches as f64 / self.pairs.len() as f64
        }
    }
}

impl Display for AlignmentResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [line1, markers, line2] = &self.view;
        write!(f, "{line1}\n{markers}\n{line2}")
    }
}

#[inline]
fn token_width(token: &str) -> usize {
    token.chars().count()
}

fn pad(token: &str, width: usize) -> String {
    format!("{token:<width$}")
}

fn gap_token(width: usize) -> String {
    std::iter::repeat(GAP).take(width).collect()
}

fn marker_column(marker: char, width: usize) -> String {
    std::iter::repeat(marker).take(width).collect()
}
