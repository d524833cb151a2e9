// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Prefix-filtering selector with hit cycling, independent of any widget
/// toolkit. The rendering layer adapts keyboard events into these calls and
/// draws `text()` with `suggested_suffix()` highlighted so the next typed
/// character replaces the suggestion instead of appending to it.
///
/// `anchor` is the char offset splitting the user-typed prefix from the
/// auto-inserted suffix. Hit state resets whenever the prefix changes and
/// persists across cycling while the hit list is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completer {
    candidates: Vec<String>,
    hits: Vec<String>,
    hit_index: usize,
    anchor: usize,
    text: String,
}

impl Completer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut completer = Self::new();
        completer.set_candidates(candidates.into_iter().map(Into::into).collect());
        completer
    }

    /// Installs a candidate list, case-insensitive sorted (stable, so
    /// case-only duplicates keep their given order), and resets hit state.
    pub fn set_candidates(&mut self, mut candidates: Vec<String>) {
        candidates.sort_by_key(|candidate| candidate.to_lowercase());
        self.candidates = candidates;
        self.hits.clear();
        self.hit_index = 0;
        self.anchor = 0;
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The portion the user actually typed.
    pub fn typed_prefix(&self) -> &str {
        &self.text[..self.anchor_byte()]
    }

    /// The auto-inserted portion, presented as the highlighted region.
    pub fn suggested_suffix(&self) -> &str {
        &self.text[self.anchor_byte()..]
    }

    pub fn has_suggestion(&self) -> bool {
        self.anchor_byte() < self.text.len()
    }

    pub fn hits(&self) -> &[String] {
        &self.hits
    }

    pub fn hit_index(&self) -> usize {
        self.hit_index
    }

    /// A typed character replaces the highlighted suggestion, then the hit
    /// list is recomputed against the grown prefix.
    pub fn insert_char(&mut self, ch: char) {
        let anchor = self.anchor_byte();
        self.text.truncate(anchor);
        self.text.push(ch);
        self.autocomplete(0);
    }

    /// Backspace drops the highlighted region when one is shown, otherwise
    /// the last character. The anchor lands at the end of what remains; the
    /// hit list is left alone until the next autocomplete pass.
    pub fn backspace(&mut self) {
        let anchor = self.anchor_byte();
        if anchor < self.text.len() {
            self.text.truncate(anchor);
        } else {
            self.text.pop();
        }
        self.anchor = self.text.chars().count();
    }

    /// Left arrow: with a suggestion showing, collapse the field to the
    /// typed prefix; otherwise step the anchor back one and delete from
    /// there to the end.
    pub fn collapse_left(&mut self) {
        if !self.has_suggestion() {
            self.anchor = self.anchor.saturating_sub(1);
        }
        let anchor = self.anchor_byte();
        self.text.truncate(anchor);
    }

    /// Right arrow / keypad Enter: accept the suggestion as typed text.
    pub fn accept(&mut self) {
        self.anchor = self.text.chars().count();
    }

    pub fn cycle_next(&mut self) {
        self.autocomplete(1);
    }

    pub fn cycle_prev(&mut self) {
        self.autocomplete(-1);
    }

    /// Pointer-path selection. Downstream selection-changed handling is the
    /// caller's, same as for the keyboard path.
    pub fn select(&mut self, value: &str) {
        self.text = value.to_owned();
        self.anchor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.hits.clear();
        self.hit_index = 0;
        self.anchor = 0;
    }

    /// One recompute-and-render pass. `delta` of ±1 cycles through the
    /// current hits (wrapping both directions); 0 re-anchors after plain
    /// character input. A changed hit list resets the cursor to its head.
    fn autocomplete(&mut self, delta: isize) {
        if delta != 0 {
            let anchor = self.anchor_byte();
            self.text.truncate(anchor);
        } else {
            self.anchor = self.text.chars().count();
        }

        let prefix = self.text.to_lowercase();
        let hits: Vec<String> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        if hits != self.hits {
            self.hit_index = 0;
            self.hits = hits;
        }

        if !self.hits.is_empty() {
            let len = self.hits.len() as isize;
            self.hit_index = (self.hit_index as isize + delta).rem_euclid(len) as usize;
            self.text = self.hits[self.hit_index].clone();
        }
    }

    fn anchor_byte(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.anchor)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}
