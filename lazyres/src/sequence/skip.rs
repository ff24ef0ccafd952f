use std::ops::Range;

const WORD_BITS: usize = u64::BITS as usize;

/// The indices a search had to pass over because their slot was pending.
///
/// Indices must be inserted in ascending order. As long as they form one
/// contiguous run they're kept as a single interval; the first index that
/// leaves a gap starts a sparse bitmap anchored at that index.
#[derive(Debug, Default)]
pub(crate) struct SkipSet {
    run: Range<usize>,
    sparse: Option<Sparse>,
}

#[derive(Debug)]
struct Sparse {
    anchor: usize,
    words: Vec<u64>,
}

impl Sparse {
    fn new(anchor: usize) -> Self {
        Self {
            anchor,
            words: vec![1],
        }
    }

    fn insert(&mut self, index: usize) {
        let bit = index - self.anchor;
        let word = bit / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (bit % WORD_BITS);
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let anchor = self.anchor;
        self.words.iter().enumerate().flat_map(move |(word_index, &word)| {
            let base = anchor + word_index * WORD_BITS;
            BitIter { word }.map(move |bit| base + bit)
        })
    }

    fn len(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }
}

struct BitIter {
    word: u64,
}

impl Iterator for BitIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        // clear the lowest set bit
        self.word &= self.word - 1;
        Some(bit)
    }
}

impl SkipSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, index: usize) {
        if let Some(sparse) = &mut self.sparse {
            sparse.insert(index);
        } else if self.run.is_empty() {
            self.run = index..index + 1;
        } else if index == self.run.end {
            self.run.end += 1;
        } else {
            self.sparse = Some(Sparse::new(index));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.run.len() + self.sparse.as_ref().map_or(0, Sparse::len)
    }

    /// The skipped indices in ascending order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.run
            .clone()
            .chain(self.sparse.iter().flat_map(|sparse| sparse.iter()))
    }
}
