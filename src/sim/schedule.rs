//! Cooperative task scheduling on the simulation clock
//!
//! A queue of (fire_at_tick, task) pairs drained once per tick. The
//! simulation and the audio pacing share this one clock, so nothing in
//! the game depends on wall-clock timers.

/// A tick-driven task queue
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    tasks: Vec<(u64, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Queue `task` to fire at (or after) `fire_at`
    pub fn schedule(&mut self, fire_at: u64, task: T) {
        self.tasks.push((fire_at, task));
    }

    /// Remove and return every task due at `now`, preserving insertion
    /// order among due tasks
    pub fn fire(&mut self, now: u64) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].0 <= now {
                due.push(self.tasks.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Earliest pending fire tick, if any
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|(at, _)| *at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_or_after_deadline() {
        let mut s = Scheduler::new();
        s.schedule(10, "a");
        assert!(s.fire(9).is_empty());
        assert_eq!(s.fire(10), vec!["a"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_late_fire_still_delivers() {
        let mut s = Scheduler::new();
        s.schedule(10, "a");
        assert_eq!(s.fire(100), vec!["a"]);
    }

    #[test]
    fn test_due_tasks_keep_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(5, "first");
        s.schedule(3, "second");
        s.schedule(20, "later");
        assert_eq!(s.fire(10), vec!["first", "second"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_due(), Some(20));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(1, ());
        s.schedule(2, ());
        s.clear();
        assert!(s.fire(100).is_empty());
        assert_eq!(s.next_due(), None);
    }
}
