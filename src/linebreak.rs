//! Line Breaking - Width-Constrained Kinsoku Engine
//!
//! Splits text into lines that fit a pixel budget while keeping forbidden
//! characters off line edges. All indices are char positions, not bytes.

use log::debug;

use crate::kinsoku::{is_inseparable, is_line_end_forbidden, is_line_start_forbidden};

/// Measures the rendered width of a string in whole pixels.
///
/// Implementations must be deterministic. Widths are expected to grow
/// monotonically as characters are appended.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> u32;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str) -> u32 {
        (**self).measure(text)
    }
}

/// Whether `runes` may be cut so that `runes[idx]` opens the next line.
pub fn can_break_at(runes: &[char], idx: usize) -> bool {
    if idx == 0 || idx >= runes.len() {
        return false;
    }
    let prev = runes[idx - 1];
    let next = runes[idx];

    !is_line_start_forbidden(next) && !is_line_end_forbidden(prev) && !is_inseparable(prev, next)
}

/// Search backwards from `default_index` for a permitted cut.
///
/// Returns `None` when no index in `1..=default_index` is allowed.
pub fn find_break_index(runes: &[char], default_index: usize) -> Option<usize> {
    (1..=default_index.min(runes.len().saturating_sub(1)))
        .rev()
        .find(|&idx| can_break_at(runes, idx))
}

/// Resolve where an overflowing candidate should actually be cut.
///
/// Falls back to `default_index` when nothing earlier is permitted: the search
/// only ever moves the break towards the start of the line.
pub fn resolve_break_index(runes: &[char], default_index: usize) -> usize {
    find_break_index(runes, default_index).unwrap_or(default_index)
}

/// The ordered result of a breaking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    pub lines: Vec<String>,
    /// Ordinals `i` where the boundary between `lines[i]` and `lines[i + 1]`
    /// was taken by the fallback path.
    pub forced_breaks: Vec<usize>,
}

impl LineSequence {
    pub fn is_forced(&self, boundary: usize) -> bool {
        self.forced_breaks.contains(&boundary)
    }
}

/// Accumulate-and-split state machine.
pub struct LineBreaker<M> {
    measurer: M,
    width_budget: u32,
    accumulator: Vec<char>,
    output: LineSequence,
}

impl<M: TextMeasurer> LineBreaker<M> {
    pub fn new(measurer: M, width_budget: u32) -> Self {
        Self {
            measurer,
            width_budget,
            accumulator: Vec::new(),
            output: LineSequence::default(),
        }
    }

    /// Feed one character, emitting finished lines while the candidate overflows.
    pub fn push(&mut self, ch: char) {
        self.accumulator.push(ch);

        // A lone character cannot be split; it is emitted once the next
        // character arrives or at end of input.
        while self.accumulator.len() > 1 && self.overflows() {
            let default_index = self.accumulator.len() - 1;
            let split = match find_break_index(&self.accumulator, default_index) {
                Some(idx) => idx,
                None => {
                    debug!(
                        "no permitted break in {:?}, forcing cut at {}",
                        self.current(),
                        default_index
                    );
                    self.output.forced_breaks.push(self.output.lines.len());
                    default_index
                }
            };

            let remainder = self.accumulator.split_off(split);
            let line: String = std::mem::replace(&mut self.accumulator, remainder)
                .into_iter()
                .collect();
            debug!("line {}: {:?}", self.output.lines.len(), line);
            self.output.lines.push(line);
        }
    }

    pub fn extend<I: IntoIterator<Item = char>>(&mut self, chars: I) {
        for ch in chars {
            self.push(ch);
        }
    }

    /// Emit whatever remains and return the finished sequence.
    pub fn finish(mut self) -> LineSequence {
        if !self.accumulator.is_empty() {
            let line = self.current();
            debug!("line {}: {:?}", self.output.lines.len(), line);
            self.output.lines.push(line);
        }
        self.output
    }

    fn current(&self) -> String {
        self.accumulator.iter().collect()
    }

    fn overflows(&self) -> bool {
        self.measurer.measure(&self.current()) > self.width_budget
    }
}

/// Break `text` into lines no wider than `width_budget` pixels.
///
/// The budget must already exclude side margins. Empty text yields no lines.
pub fn break_lines<M: TextMeasurer + ?Sized>(
    measurer: &M,
    width_budget: u32,
    text: &str,
) -> Vec<String> {
    break_lines_detailed(measurer, width_budget, text).lines
}

/// Like [`break_lines`], but also reports which boundaries were forced.
pub fn break_lines_detailed<M: TextMeasurer + ?Sized>(
    measurer: &M,
    width_budget: u32,
    text: &str,
) -> LineSequence {
    let mut breaker = LineBreaker::new(measurer, width_budget);
    breaker.extend(text.chars());
    breaker.finish()
}
