use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs the callback only for the last call made within a quiet period.
///
/// Each `call` supersedes the ones still waiting; the surviving call runs
/// the callback with its own arguments.
pub struct Debounce<A> {
    quiet: Duration,
    generation: Rc<Cell<u64>>,
    callback: Rc<dyn Fn(A)>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            quiet: self.quiet,
            generation: self.generation.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<A> Debounce<A> {
    pub fn new(quiet: Duration, callback: impl Fn(A) + 'static) -> Self {
        Self {
            quiet,
            generation: Rc::new(Cell::new(0)),
            callback: Rc::new(callback),
        }
    }

    pub async fn call(&self, args: A) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        tokio::time::sleep(self.quiet).await;
        if self.generation.get() == generation {
            (self.callback)(args);
        }
    }
}
