use std::cell::Cell;
use std::rc::Rc;

/// Where an asynchronous operation (tween, delay, transition) stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompletionState {
    Pending,
    Done,
    /// The operation was superseded and will never finish.
    Abandoned,
}

#[derive(Debug, Clone)]
enum Inner {
    Ready,
    Signal(Rc<Cell<CompletionState>>),
    All(Rc<[Completion]>),
}

/// Read side of a one-shot completion signal.
///
/// Completions are polled, never awaited: continuations check `state()` from
/// the next update pass onward. Cloning shares the same signal.
#[derive(Debug, Clone)]
pub struct Completion(Inner);

impl Completion {
    /// A signal and the resolver that completes it.
    pub fn pending() -> (Completion, Resolver) {
        let cell = Rc::new(Cell::new(CompletionState::Pending));
        (Completion(Inner::Signal(cell.clone())), Resolver(cell))
    }

    /// An already finished completion.
    pub fn done() -> Completion {
        Completion(Inner::Ready)
    }

    /// Done once every part is done; abandoned as soon as any part is.
    pub fn all(parts: impl IntoIterator<Item = Completion>) -> Completion {
        let parts: Vec<Completion> = parts.into_iter().collect();
        if parts.is_empty() {
            return Completion::done();
        }
        Completion(Inner::All(parts.into()))
    }

    pub fn state(&self) -> CompletionState {
        match &self.0 {
            Inner::Ready => CompletionState::Done,
            Inner::Signal(cell) => cell.get(),
            Inner::All(parts) => {
                let mut state = CompletionState::Done;
                for part in parts.iter() {
                    match part.state() {
                        CompletionState::Abandoned => return CompletionState::Abandoned,
                        CompletionState::Pending => state = CompletionState::Pending,
                        CompletionState::Done => {}
                    }
                }
                state
            }
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state() == CompletionState::Done
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state() == CompletionState::Pending
    }

    #[inline]
    pub fn is_abandoned(&self) -> bool {
        self.state() == CompletionState::Abandoned
    }
}

/// Write side of a [`Completion`].
///
/// Dropping an unresolved resolver marks the signal abandoned.
#[derive(Debug)]
pub struct Resolver(Rc<Cell<CompletionState>>);

impl Resolver {
    pub fn resolve(self) {
        self.0.set(CompletionState::Done);
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if self.0.get() == CompletionState::Pending {
            self.0.set(CompletionState::Abandoned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_marks_done() {
        let (c, r) = Completion::pending();
        assert!(c.is_pending());
        r.resolve();
        assert!(c.is_done());
    }

    #[test]
    fn dropped_resolver_abandons() {
        let (c, r) = Completion::pending();
        drop(r);
        assert_eq!(c.state(), CompletionState::Abandoned);
    }

    #[test]
    fn all_waits_for_every_part() {
        let (a, ra) = Completion::pending();
        let (b, rb) = Completion::pending();
        let both = Completion::all([a, b, Completion::done()]);
        ra.resolve();
        assert!(both.is_pending());
        rb.resolve();
        assert!(both.is_done());
    }

    #[test]
    fn all_is_abandoned_by_any_part() {
        let (a, _ra) = Completion::pending();
        let (b, rb) = Completion::pending();
        let both = Completion::all([a, b]);
        drop(rb);
        assert!(both.is_abandoned());
    }

    #[test]
    fn empty_all_is_done() {
        assert!(Completion::all(Vec::new()).is_done());
    }
}
