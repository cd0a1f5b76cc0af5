//! Per-page boundary-seeking splitter.
//!
//! Offsets, `chunk_size`, and `overlap` count Unicode scalar values, so a
//! hard cut can never land inside a code point.

/// Split one page's text into ordered, trimmed, non-empty pieces.
///
/// While more than `chunk_size` characters remain, the window
/// `[start, start + chunk_size + overlap)` is searched for a split point in
/// preference order: last sentence end, first paragraph break, last word
/// boundary after `start`, and finally a hard cut at `start + chunk_size`.
/// Every candidate lies strictly after `start`, so the cursor always
/// advances and the loop terminates for any input.
pub(crate) fn split_page(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let text_len = chars.len();

    let mut pieces = Vec::new();
    let mut start = 0;

    while start < text_len {
        let end = start + chunk_size;

        if end >= text_len {
            push_trimmed(&chars[start..], &mut pieces);
            break;
        }

        let window_end = (end + overlap).min(text_len);
        let window = &chars[start..window_end];

        let split_pos = if let Some(pos) = last_sentence_end(window) {
            start + pos
        } else if let Some(pos) = first_paragraph_break(window) {
            start + pos
        } else if let Some(space) = last_space_in(&chars, start, window_end) {
            space + 1
        } else {
            end
        };

        push_trimmed(&chars[start..split_pos], &mut pieces);

        // The retreat is clamped so the cursor never moves backward past the
        // split point; with a non-negative overlap the clamp always wins and
        // the next window starts exactly at the split.
        // TODO: confirm whether the next window was ever meant to re-read
        // `overlap` characters of the previous chunk before changing this.
        start = split_pos.saturating_sub(overlap).max(split_pos);
    }

    pieces
}

fn push_trimmed(chars: &[char], out: &mut Vec<String>) {
    let piece: String = chars.iter().collect();
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// End position (exclusive) of the last sentence terminator in `window`:
/// `.`, `!`, or `?` followed by a whitespace run. The returned position is
/// just past the run, so the next piece starts at the following word.
fn last_sentence_end(window: &[char]) -> Option<usize> {
    let mut last = None;
    let mut i = 0;
    while i < window.len() {
        if matches!(window[i], '.' | '!' | '?')
            && window.get(i + 1).is_some_and(|c| c.is_whitespace())
        {
            let mut j = i + 2;
            while j < window.len() && window[j].is_whitespace() {
                j += 1;
            }
            last = Some(j);
            i = j;
        } else {
            i += 1;
        }
    }
    last
}

/// End position (exclusive) of the first blank line in `window`: a newline,
/// optionally more whitespace, then a final newline. The whitespace run is
/// consumed greedily, so the position lands after the run's last newline.
fn first_paragraph_break(window: &[char]) -> Option<usize> {
    let mut i = 0;
    while i < window.len() {
        if window[i] == '\n' {
            let mut j = i + 1;
            let mut last_newline = None;
            while j < window.len() && window[j].is_whitespace() {
                if window[j] == '\n' {
                    last_newline = Some(j);
                }
                j += 1;
            }
            if let Some(newline) = last_newline {
                return Some(newline + 1);
            }
            i = j;
        } else {
            i += 1;
        }
    }
    None
}

/// Index of the last literal space in `chars[start..end]`, provided it lies
/// strictly after `start` (a leading space would not let the cursor advance).
fn last_space_in(chars: &[char], start: usize, end: usize) -> Option<usize> {
    chars[start..end]
        .iter()
        .rposition(|&c| c == ' ')
        .map(|pos| start + pos)
        .filter(|&pos| pos > start)
}
