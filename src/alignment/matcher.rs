use std::collections::HashMap;
use std::hash::Hash;

// @module: Longest-common-subsequence style sequence matching

/// A maximal run of equal elements between the two sequences:
/// `a[a..a+size] == b[b..b+size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Start offset in the first sequence
    pub a: usize,
    /// Start offset in the second sequence
    pub b: usize,
    /// Number of matching elements
    pub size: usize,
}

/// Edit classification of an opcode span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `a[a1..a2] == b[b1..b2]`
    Equal,
    /// `a[a1..a2]` was replaced by `b[b1..b2]`
    Replace,
    /// `a[a1..a2]` was removed
    Delete,
    /// `b[b1..b2]` was inserted
    Insert,
}

/// One edit step describing how to turn a span of the first sequence
/// into a span of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: Tag,
    pub a1: usize,
    pub a2: usize,
    pub b1: usize,
    pub b2: usize,
}

/// Ratcliff/Obershelp matcher over two element sequences.
///
/// Finds the longest contiguous matching block, then recursively does the
/// same on the pieces to its left and right, yielding a set of
/// non-overlapping equal-content blocks in order. Worst case is roughly
/// quadratic in sequence length, which bounds practical document size;
/// alignment quality matters more than asymptotics here.
pub struct SequenceMatcher<'a, T: Eq + Hash> {
    a: &'a [T],
    b: &'a [T],
    /// Element -> ascending positions of that element in `b`
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Build a matcher for the pair of sequences
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, element) in b.iter().enumerate() {
            b2j.entry(element).or_default().push(j);
        }
        SequenceMatcher { a, b, b2j }
    }

    /// Find the longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Of all maximal matching blocks, returns the one starting earliest in
    /// `a`, and of those, the one starting earliest in `b`. A zero-size
    /// result means the slices share no elements.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best_i = alo;
        let mut best_j = blo;
        let mut best_size = 0;

        // j2len[j] = length of the longest match ending at a[i] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        // Positions are ascending, nothing further applies
                        break;
                    }
                    let k = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) + 1 } else { 1 };
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        Match { a: best_i, b: best_j, size: best_size }
    }

    /// All matching blocks, ordered by position, adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let la = self.a.len();
        let lb = self.b.len();

        let mut queue = vec![(0usize, la, 0usize, lb)];
        let mut raw: Vec<Match> = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size > 0 {
                if alo < m.a && blo < m.b {
                    queue.push((alo, m.a, blo, m.b));
                }
                if m.a + m.size < ahi && m.b + m.size < bhi {
                    queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
                }
                raw.push(m);
            }
        }

        raw.sort_by_key(|m| (m.a, m.b));

        // Collapse blocks that ended up adjacent in both sequences
        let mut merged: Vec<Match> = Vec::with_capacity(raw.len());
        for m in raw {
            match merged.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }

        merged
    }

    /// Edit opcodes describing how to turn `a` into `b`
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut result = Vec::new();
        let mut i = 0;
        let mut j = 0;

        let mut blocks = self.matching_blocks();
        // Length-zero sentinel so a trailing non-equal region is emitted
        blocks.push(Match { a: self.a.len(), b: self.b.len(), size: 0 });

        for m in blocks {
            let tag = match (i < m.a, j < m.b) {
                (true, true) => Some(Tag::Replace),
                (true, false) => Some(Tag::Delete),
                (false, true) => Some(Tag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                result.push(Opcode { tag, a1: i, a2: m.a, b1: j, b2: m.b });
            }
            i = m.a + m.size;
            j = m.b + m.size;
            if m.size > 0 {
                result.push(Opcode { tag: Tag::Equal, a1: m.a, a2: i, b1: m.b, b2: j });
            }
        }

        result
    }

    /// Opcodes grouped into hunks with up to `context` lines of equal
    /// material on each side, for unified-diff style output.
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            codes.push(Opcode { tag: Tag::Equal, a1: 0, a2: 1, b1: 0, b2: 1 });
        }

        // Clamp leading and trailing equal runs to the context size
        if let Some(first) = codes.first_mut() {
            if first.tag == Tag::Equal {
                first.a1 = first.a2.saturating_sub(context).max(first.a1);
                first.b1 = first.b2.saturating_sub(context).max(first.b1);
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == Tag::Equal {
                last.a2 = last.a2.min(last.a1 + context);
                last.b2 = last.b2.min(last.b1 + context);
            }
        }

        let mut groups: Vec<Vec<Opcode>> = Vec::new();
        let mut group: Vec<Opcode> = Vec::new();

        for code in codes {
            let mut code = code;
            // A large equal block splits the current group
            if code.tag == Tag::Equal && code.a2 - code.a1 > 2 * context {
                group.push(Opcode {
                    tag: Tag::Equal,
                    a1: code.a1,
                    a2: (code.a1 + context).min(code.a2),
                    b1: code.b1,
                    b2: (code.b1 + context).min(code.b2),
                });
                groups.push(std::mem::take(&mut group));
                code.a1 = code.a2.saturating_sub(context).max(code.a1);
                code.b1 = code.b2.saturating_sub(context).max(code.b1);
            }
            group.push(code);
        }

        if !group.is_empty() && !(group.len() == 1 && group[0].tag == Tag::Equal) {
            groups.push(group);
        }

        groups
    }
}
