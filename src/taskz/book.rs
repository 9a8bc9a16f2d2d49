//! The task store & renderer.
//!
//! [`TaskBook`] owns the ordered task collection and the id counter, keeps
//! the collection durable through a [`StringStore`], and keeps a
//! [`DisplaySurface`] in sync with it. Every mutation runs the same
//! sequence: mutate → persist → repaint. All three happen inside one call,
//! so no caller ever observes a half-applied operation.
//!
//! Ids are assigned monotonically and never reused, deletion included. The
//! collection stays in insertion order. Corrupt or absent persisted data
//! opens as an empty book; it is never an error.

use crate::display::DisplaySurface;
use crate::error::Result;
use crate::model::{Priority, Task};
use crate::store::StringStore;

/// The fixed key the task collection is persisted under.
pub const STORE_KEY: &str = "tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub struct TaskBook<S: StringStore, D: DisplaySurface> {
    tasks: Vec<Task>,
    next_id: u64,
    store: S,
    display: D,
}

impl<S: StringStore, D: DisplaySurface> TaskBook<S, D> {
    /// Opens the book: loads the persisted collection and paints it.
    ///
    /// Never fails. Absent, corrupt, or mis-shapen persisted data is
    /// treated as "no tasks"; the next mutation overwrites it.
    pub fn open(store: S, display: D) -> Self {
        let mut book = Self::open_quiet(store, display);
        book.render();
        book
    }

    /// Like [`open`](Self::open) but without the initial paint.
    ///
    /// For embedders (the CLI) whose invocation mutates immediately: the
    /// mutation repaints, so painting the pre-mutation state first would
    /// show the listing twice.
    pub fn open_quiet(store: S, display: D) -> Self {
        let mut book = Self {
            tasks: Vec::new(),
            next_id: 1,
            store,
            display,
        };
        book.load();
        book
    }

    /// Adds a task with the default priority.
    ///
    /// `text` is trimmed first; blank input is a silent no-op returning
    /// `Ok(None)`. Otherwise returns the assigned id.
    pub fn add(&mut self, text: &str) -> Result<Option<u64>> {
        self.add_with_priority(text, Priority::default())
    }

    /// Adds a task with an explicit priority.
    pub fn add_with_priority(&mut self, text: &str, priority: Priority) -> Result<Option<u64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task::new(id, text.to_string(), priority));
        self.persist()?;
        self.render();
        Ok(Some(id))
    }

    /// Flips the completion flag of the task with `id`.
    ///
    /// Returns `false` without persisting or repainting when no task
    /// matches; an unknown id is not an error.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        self.persist()?;
        self.render();
        Ok(true)
    }

    /// Removes the task with `id`, preserving the order of the rest.
    ///
    /// Persists and repaints whether or not a match existed; returns
    /// whether one did.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        self.persist()?;
        self.render();
        Ok(removed)
    }

    /// Removes every completed task and returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        self.persist()?;
        self.render();
        Ok(removed)
    }

    pub fn stats(&self) -> TaskStats {
        let mut stats = TaskStats {
            total: self.tasks.len(),
            ..TaskStats::default()
        };
        for task in &self.tasks {
            if task.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            match task.priority {
                Priority::High => stats.high += 1,
                Priority::Medium => stats.medium += 1,
                Priority::Low => stats.low += 1,
            }
        }
        stats
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Repaints the current collection on demand.
    pub fn refresh(&mut self) {
        self.render();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Tears the book down, handing the collaborators back.
    pub fn into_parts(self) -> (S, D) {
        (self.store, self.display)
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.tasks)?;
        self.store.write(STORE_KEY, &payload)
    }

    fn load(&mut self) {
        let raw = match self.store.read(STORE_KEY) {
            Ok(Some(raw)) => raw,
            // Unreadable is the same as absent here; the book must open.
            Ok(None) | Err(_) => return,
        };
        let tasks: Vec<Task> = match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(_) => return,
        };
        // Counter moves only when there is something to move past; an
        // explicit empty array leaves it at its default, same as no key.
        if let Some(max_id) = tasks.iter().map(|t| t.id).max() {
            self.next_id = max_id + 1;
        }
        self.tasks = tasks;
    }

    fn render(&mut self) {
        if self.tasks.is_empty() {
            self.display.show_empty();
        } else {
            self.display.show_tasks(&self.tasks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fixtures::{Painted, RecordingDisplay};
    use crate::store::memory::fixtures::{store_with, FailingStore};
    use crate::store::memory::InMemoryStore;

    fn book() -> TaskBook<InMemoryStore, RecordingDisplay> {
        TaskBook::open_quiet(InMemoryStore::new(), RecordingDisplay::new())
    }

    fn persisted(book: &TaskBook<InMemoryStore, RecordingDisplay>) -> Vec<Task> {
        let raw = book.store().read(STORE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn adds_assign_strictly_increasing_ids() {
        let mut book = book();
        let a = book.add("one").unwrap().unwrap();
        let b = book.add("two").unwrap().unwrap();
        let c = book.add("three").unwrap().unwrap();

        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(book.tasks().len(), 3);
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let mut book = book();
        book.add("  Buy milk  ").unwrap();

        assert_eq!(book.tasks()[0].text, "Buy milk");
    }

    #[test]
    fn blank_add_changes_nothing() {
        let mut book = book();
        assert_eq!(book.add("").unwrap(), None);
        assert_eq!(book.add("   ").unwrap(), None);

        assert!(book.tasks().is_empty());
        // Nothing was painted or persisted either
        assert!(book.display().paints.is_empty());
        assert_eq!(book.store().read(STORE_KEY).unwrap(), None);
        // And the counter did not advance
        assert_eq!(book.add("real").unwrap(), Some(1));
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut book = book();
        book.add("one").unwrap();
        book.add("two").unwrap();

        assert!(book.toggle(1).unwrap());

        let tasks = book.tasks();
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert_eq!(tasks[0].text, "one");
        assert_eq!(tasks[1].text, "two");
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut book = book();
        book.add("one").unwrap();
        let before = book.tasks().to_vec();

        book.toggle(1).unwrap();
        book.toggle(1).unwrap();

        assert_eq!(book.tasks(), &before[..]);
    }

    #[test]
    fn toggle_unknown_id_is_silent() {
        let mut book = book();
        book.add("one").unwrap();
        let paints_before = book.display().paints.len();

        assert!(!book.toggle(99).unwrap());

        assert!(!book.tasks()[0].completed);
        assert_eq!(book.display().paints.len(), paints_before);
    }

    #[test]
    fn delete_preserves_relative_order() {
        let mut book = book();
        book.add("one").unwrap();
        book.add("two").unwrap();
        book.add("three").unwrap();

        assert!(book.delete(2).unwrap());

        let texts: Vec<_> = book.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["one", "three"]);
        let ids: Vec<_> = book.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn delete_unknown_id_still_persists_and_repaints() {
        let mut book = book();
        book.add("one").unwrap();
        let paints_before = book.display().paints.len();

        assert!(!book.delete(99).unwrap());

        assert_eq!(book.tasks().len(), 1);
        assert_eq!(book.display().paints.len(), paints_before + 1);
        assert_eq!(persisted(&book).len(), 1);
    }

    #[test]
    fn ids_are_never_reused_after_deletion() {
        let mut book = book();
        book.add("one").unwrap();
        book.add("two").unwrap();
        book.delete(2).unwrap();

        assert_eq!(book.add("three").unwrap(), Some(3));
    }

    #[test]
    fn store_matches_memory_after_every_mutation() {
        let mut book = book();

        book.add("one").unwrap();
        assert_eq!(persisted(&book), book.tasks());

        book.add("two").unwrap();
        assert_eq!(persisted(&book), book.tasks());

        book.toggle(1).unwrap();
        assert_eq!(persisted(&book), book.tasks());

        book.delete(1).unwrap();
        assert_eq!(persisted(&book), book.tasks());

        book.clear_completed().unwrap();
        assert_eq!(persisted(&book), book.tasks());
    }

    #[test]
    fn clear_completed_removes_exactly_the_completed() {
        let mut book = book();
        book.add("one").unwrap();
        book.add("two").unwrap();
        book.add("three").unwrap();
        book.toggle(1).unwrap();
        book.toggle(3).unwrap();

        assert_eq!(book.clear_completed().unwrap(), 2);

        let texts: Vec<_> = book.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["two"]);
    }

    #[test]
    fn open_paints_the_loaded_collection() {
        let mut seed = book();
        seed.add("one").unwrap();
        let (store, _) = seed.into_parts();

        let book = TaskBook::open(store, RecordingDisplay::new());

        assert_eq!(book.display().paints.len(), 1);
        match book.display().last().unwrap() {
            Painted::Tasks(tasks) => assert_eq!(tasks[0].text, "one"),
            Painted::Empty => panic!("expected a task row paint"),
        }
    }

    #[test]
    fn open_on_empty_store_paints_the_placeholder() {
        let book = TaskBook::open(InMemoryStore::new(), RecordingDisplay::new());

        assert_eq!(book.display().paints, vec![Painted::Empty]);
    }

    #[test]
    fn open_quiet_paints_nothing() {
        let book = book();
        assert!(book.display().paints.is_empty());
    }

    #[test]
    fn restart_reproduces_the_collection_and_counter() {
        // The full lifecycle from the component contract
        let mut book = book();
        book.add("Buy milk").unwrap();
        book.add("Walk dog").unwrap();
        book.toggle(1).unwrap();
        book.delete(1).unwrap();

        let before_restart = book.tasks().to_vec();
        assert_eq!(before_restart.len(), 1);
        assert_eq!(before_restart[0].id, 2);
        assert_eq!(before_restart[0].text, "Walk dog");
        assert!(!before_restart[0].completed);

        let (store, _) = book.into_parts();
        let mut reopened = TaskBook::open_quiet(store, RecordingDisplay::new());

        assert_eq!(reopened.tasks(), &before_restart[..]);
        assert_eq!(reopened.add("Water plants").unwrap(), Some(3));
    }

    #[test]
    fn reload_sets_counter_past_the_largest_id() {
        let mut book = book();
        book.add("one").unwrap();
        book.add("two").unwrap();
        book.add("three").unwrap();
        book.delete(1).unwrap();
        let (store, _) = book.into_parts();

        let mut reopened = TaskBook::open_quiet(store, RecordingDisplay::new());
        assert_eq!(reopened.add("four").unwrap(), Some(4));
    }

    #[test]
    fn empty_array_and_absent_key_both_leave_counter_at_default() {
        let mut absent = TaskBook::open_quiet(InMemoryStore::new(), RecordingDisplay::new());
        assert_eq!(absent.add("first").unwrap(), Some(1));

        let mut explicit =
            TaskBook::open_quiet(store_with(STORE_KEY, "[]"), RecordingDisplay::new());
        assert_eq!(explicit.add("first").unwrap(), Some(1));
    }

    #[test]
    fn corrupt_payload_opens_as_empty() {
        let store = store_with(STORE_KEY, "{not json");
        let book = TaskBook::open(store, RecordingDisplay::new());

        assert!(book.tasks().is_empty());
        assert_eq!(book.display().paints, vec![Painted::Empty]);
    }

    #[test]
    fn wrong_shape_opens_as_empty() {
        let store = store_with(STORE_KEY, r#"{"id":1,"text":"not an array"}"#);
        let book = TaskBook::open(store, RecordingDisplay::new());

        assert!(book.tasks().is_empty());
    }

    #[test]
    fn failed_write_surfaces_the_error() {
        let mut book = TaskBook::open_quiet(FailingStore, RecordingDisplay::new());

        assert!(book.add("one").is_err());
    }

    #[test]
    fn stats_counts_by_state_and_priority() {
        let mut book = book();
        book.add_with_priority("one", Priority::High).unwrap();
        book.add_with_priority("two", Priority::Low).unwrap();
        book.add("three").unwrap();
        book.toggle(2).unwrap();

        let stats = book.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
    }

    #[test]
    fn refresh_repaints_without_mutating() {
        let mut book = book();
        book.add("one").unwrap();
        let tasks_before = book.tasks().to_vec();
        let paints_before = book.display().paints.len();

        book.refresh();

        assert_eq!(book.tasks(), &tasks_before[..]);
        assert_eq!(book.display().paints.len(), paints_before + 1);
    }
}
