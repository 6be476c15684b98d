use std::ops::RangeInclusive;

use super::play::{ContentBlock, Dialogue, Line};

/// Marker line inserted where a selection truncates a dialogue.
pub const ELLIPSIS: &str = "...";

impl Dialogue {
    /// The part of this dialogue that falls inside `range`.
    ///
    /// The k-th spoken line is taken to be line `start + k`. Stage directions
    /// between selected spoken lines are kept, as are leading and trailing
    /// directions when the selection reaches the start or end of the turn.
    /// Truncated ends are marked with an ellipsis line.
    pub fn selection(&self, range: &RangeInclusive<u32>) -> Option<Dialogue> {
        if self.start > *range.end() || self.end < *range.start() {
            return None;
        }
        let first = (*range.start()).max(self.start);
        let last = (*range.end()).min(self.end);

        let mut lo = None;
        let mut hi = None;
        // Widened so numbering past the last citation cannot overflow.
        let (first_n, last_n) = (u64::from(first), u64::from(last));
        let mut number = u64::from(self.start);
        for (index, line) in self.lines.iter().enumerate() {
            if !line.is_spoken() {
                continue;
            }
            if lo.is_none() && number >= first_n {
                lo = Some(index);
            }
            if number <= last_n {
                hi = Some(index);
            }
            number += 1;
        }
        let (mut lo, mut hi) = (lo?, hi?);
        if lo > hi {
            return None;
        }
        if first == self.start {
            lo = 0;
        }
        if last == self.end {
            hi = self.lines.len() - 1;
        }

        let mut lines = self.lines[lo..=hi].to_vec();
        if first > self.start {
            lines.insert(0, Line::SpokenText(ELLIPSIS.into()));
        }
        if last < self.end {
            lines.push(Line::SpokenText(ELLIPSIS.into()));
        }

        Some(Dialogue {
            character: self.character.clone(),
            act: self.act,
            scene: self.scene,
            start: first,
            end: last,
            lines,
        })
    }
}

impl ContentBlock {
    /// Headings never take part in a line selection.
    pub fn selection(&self, range: &RangeInclusive<u32>) -> Option<ContentBlock> {
        match self {
            ContentBlock::SceneHeading(_) => None,
            ContentBlock::Dialogue(d) => d.selection(range).map(ContentBlock::Dialogue),
        }
    }
}
