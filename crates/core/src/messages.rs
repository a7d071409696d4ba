//! Static reminder message corpus with uniform random selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// Built-in reminder bodies. Edited at build time, never at runtime.
const MESSAGES: &[&str] = &[
    "Time for a quick problem. Your streak will thank you.",
    "Five minutes of practice beats zero minutes of planning.",
    "That problem you skipped yesterday? It's still waiting.",
    "Small reps, every day. Open the app and do one.",
    "Your future self is watching. Solve something.",
    "A short session now keeps the rust away.",
    "One problem. Right now. That's the whole ask.",
    "Consistency is the only trick there is. Go.",
    "You were going to do this later anyway. Later is now.",
    "Keep the chain going. Don't break it today.",
    "Ten focused minutes. Then you're free.",
    "The hardest part is opening the app. Do that part.",
];

/// Uniform random selection (with replacement) over a fixed corpus.
///
/// No ordering guarantee and no exclusion of recently shown messages.
/// Stateless after construction, so a single pool is safe to share
/// across concurrent callers.
#[derive(Debug, Clone)]
pub struct MessagePool {
    corpus: &'static [&'static str],
}

impl MessagePool {
    /// Wrap a corpus.
    ///
    /// # Panics
    ///
    /// Panics if `corpus` is empty. An empty corpus is a programming
    /// error caught at startup, not a runtime condition to recover from.
    pub fn new(corpus: &'static [&'static str]) -> Self {
        assert!(!corpus.is_empty(), "message corpus must not be empty");
        Self { corpus }
    }

    /// Draw one message using the supplied RNG.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        // Non-empty is guaranteed by the constructor.
        self.corpus.choose(rng).copied().unwrap_or(self.corpus[0])
    }

    /// Draw one message using the thread-local RNG.
    pub fn pick(&self) -> &'static str {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Whether `message` is one of the corpus entries.
    pub fn contains(&self, message: &str) -> bool {
        self.corpus.contains(&message)
    }

    /// Number of messages in the corpus.
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self::new(MESSAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    #[should_panic(expected = "message corpus must not be empty")]
    fn empty_corpus_is_fatal() {
        MessagePool::new(&[]);
    }

    #[test]
    fn pick_never_leaves_the_corpus() {
        let pool = MessagePool::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let msg = pool.pick_with(&mut rng);
            assert!(MESSAGES.contains(&msg));
        }
    }

    #[test]
    fn every_message_is_eventually_drawn() {
        // 10k draws over a 12-element corpus miss an element with
        // probability well below 1e-300; a miss here means the selection
        // is not uniform.
        let pool = MessagePool::default();
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<&str> = (0..10_000).map(|_| pool.pick_with(&mut rng)).collect();
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn single_message_corpus_always_returns_it() {
        const ONE: &[&str] = &["only"];
        let pool = MessagePool::new(ONE);
        assert_eq!(pool.pick(), "only");
    }
}
