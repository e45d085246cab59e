use std::fmt;

/// Which nesting construct is being entered or left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nesting {
    Call,
    At,
}

/// Tracks how deeply calls and at-expressions nest while a template is
/// read, and enforces the parser's nesting limit.
///
/// The limit bounds the combined depth, since both constructs share the
/// parse stack. High-water marks are kept per construct, so a template that
/// hits the limit can be attributed to runaway calls or runaway
/// at-expressions.
///
/// ```rust
/// use weft_parser::Parser;
///
/// let tree = Parser::new("$outer($inner(a @(k:$f(v))))")
///     .nesting_limit(10)
///     .parse();
/// assert!(tree.errors().is_empty());
///
/// let nesting = tree.nesting();
/// assert_eq!(nesting.call_high(), 3);
/// assert_eq!(nesting.at_high(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NestingTracker {
    calls: usize,
    ats: usize,
    call_high: usize,
    at_high: usize,
    limit: usize,
}

impl NestingTracker {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            calls: 0,
            ats: 0,
            call_high: 0,
            at_high: 0,
            limit,
        }
    }

    /// The configured depth limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Deepest simultaneous nesting of calls seen.
    pub fn call_high(&self) -> usize {
        self.call_high
    }

    /// Deepest simultaneous nesting of at-expressions seen.
    pub fn at_high(&self) -> usize {
        self.at_high
    }

    fn depth(&self) -> usize {
        self.calls + self.ats
    }

    /// Enter one level of `kind`. False when the combined depth has reached
    /// the limit, in which case nothing is recorded.
    pub(crate) fn try_enter(&mut self, kind: Nesting) -> bool {
        if self.depth() >= self.limit {
            return false;
        }
        match kind {
            Nesting::Call => {
                self.calls += 1;
                self.call_high = self.call_high.max(self.calls);
            }
            Nesting::At => {
                self.ats += 1;
                self.at_high = self.at_high.max(self.ats);
            }
        }
        true
    }

    /// Leave one level of `kind`.
    pub(crate) fn exit(&mut self, kind: Nesting) {
        match kind {
            Nesting::Call => self.calls = self.calls.saturating_sub(1),
            Nesting::At => self.ats = self.ats.saturating_sub(1),
        }
    }
}

impl fmt::Debug for NestingTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nesting limit: {}, calls high: {}, at-expressions high: {}",
            self.limit, self.call_high, self.at_high
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highs_are_tracked_per_construct() {
        let mut nesting = NestingTracker::new(3);
        assert!(nesting.try_enter(Nesting::Call));
        assert!(nesting.try_enter(Nesting::At));
        assert!(nesting.try_enter(Nesting::Call));
        // Combined depth is what the limit bounds.
        assert!(!nesting.try_enter(Nesting::At));
        nesting.exit(Nesting::Call);
        nesting.exit(Nesting::At);
        assert!(nesting.try_enter(Nesting::At));
        assert_eq!(nesting.call_high(), 2);
        assert_eq!(nesting.at_high(), 1);
        assert_eq!(nesting.limit(), 3);
    }
}
