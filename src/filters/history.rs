//! Fixed-capacity recency buffer.
//!
//! `History<T, N>` is a shift register: [`push`](History::push) inserts at
//! the front and evicts the oldest element, and index 0 always addresses
//! the most recently inserted value.  Capacity is a const parameter, so the
//! buffer never allocates and its length never changes.
//!
//! ```text
//!  push(x) ──▶ [ x | h0 | h1 | … | hN-2 ] ──▶ hN-1 dropped
//!               0    1    2        N-1
//! ```

use core::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct History<T: Copy, const N: usize> {
    buf: [T; N],
    /// Physical slot holding logical index 0.
    head: usize,
}

impl<T: Copy, const N: usize> History<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "History capacity must be non-zero");

    /// Every slot starts at `initial`.
    pub const fn new(initial: T) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            buf: [initial; N],
            head: 0,
        }
    }

    /// Insert `value` as the newest element and drop the oldest.
    pub fn push(&mut self, value: T) {
        self.head = if self.head == 0 { N - 1 } else { self.head - 1 };
        self.buf[self.head] = value;
    }

    /// Element `age` steps back from the newest, or `None` past the end.
    pub fn get(&self, age: usize) -> Option<T> {
        (age < N).then(|| self.buf[(self.head + age) % N])
    }

    /// Most recently inserted value.
    pub fn newest(&self) -> T {
        self.buf[self.head]
    }

    /// Capacity (and length — a history is always full).
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..N).map(move |age| self.buf[(self.head + age) % N])
    }

    /// Overwrite every slot with `value`.
    pub fn fill(&mut self, value: T) {
        self.buf = [value; N];
        self.head = 0;
    }
}

impl<T: Copy, const N: usize> Index<usize> for History<T, N> {
    type Output = T;

    fn index(&self, age: usize) -> &T {
        assert!(age < N, "history index {age} out of range for capacity {N}");
        &self.buf[(self.head + age) % N]
    }
}
