//! Persisted task list operations.

use tracing::{debug, info};

use super::task::Task;
use crate::core::Clock;
use crate::error::StudyNestError;
use crate::storage::{load_json, save_json, KeyValueStore, TASKS_KEY};

/// The task list, written back to the store after every change.
pub struct TaskList<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    clock: &'a dyn Clock,
    tasks: Vec<Task>,
}

impl<'a, S: KeyValueStore + ?Sized> TaskList<'a, S> {
    /// Load tasks from the store, or start empty.
    pub fn load(store: &'a S, clock: &'a dyn Clock) -> Self {
        let tasks = load_json(store, TASKS_KEY, Vec::new());
        Self {
            store,
            clock,
            tasks,
        }
    }

    /// All tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The first unfinished task.
    #[must_use]
    pub fn current(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| !task.completed)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Total number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a task at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, no id is left above the
    /// highest existing one, or the list cannot be saved.
    pub fn add(&mut self, text: &str) -> Result<&Task, StudyNestError> {
        let text = non_blank(text)?;
        let now = self.clock.now();

        let mut id = now.timestamp_millis();
        if let Some(max) = self.tasks.iter().map(|task| task.id).max() {
            if id <= max {
                id = max.checked_add(1).ok_or_else(|| {
                    StudyNestError::InvalidInput(format!("No task id left after {max}"))
                })?;
            }
        }

        let mut next = self.tasks.clone();
        next.insert(0, Task::new(id, text, now));
        self.commit(next)?;

        info!(id, "task added");
        Ok(&self.tasks[0])
    }

    /// Flip a task between open and completed.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has this id or the list cannot be saved.
    pub fn toggle(&mut self, id: i64) -> Result<&Task, StudyNestError> {
        let index = self.index_of(id)?;
        let mut next = self.tasks.clone();
        next[index].completed = !next[index].completed;
        self.commit(next)?;

        debug!(id, completed = self.tasks[index].completed, "task toggled");
        Ok(&self.tasks[index])
    }

    /// Replace a task's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, no task has this id, or the
    /// list cannot be saved.
    pub fn update(&mut self, id: i64, text: &str) -> Result<&Task, StudyNestError> {
        let text = non_blank(text)?;
        let index = self.index_of(id)?;
        let mut next = self.tasks.clone();
        next[index].text = text;
        self.commit(next)?;

        debug!(id, "task updated");
        Ok(&self.tasks[index])
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has this id or the list cannot be saved.
    pub fn delete(&mut self, id: i64) -> Result<Task, StudyNestError> {
        let index = self.index_of(id)?;
        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(id, "task deleted");
        Ok(removed)
    }

    /// Remove every completed task, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn clear_completed(&mut self) -> Result<usize, StudyNestError> {
        let before = self.tasks.len();
        let next: Vec<Task> = self.tasks.iter().filter(|t| !t.completed).cloned().collect();
        let removed = before - next.len();
        if removed > 0 {
            self.commit(next)?;
        }

        info!(removed, "completed tasks cleared");
        Ok(removed)
    }

    fn index_of(&self, id: i64) -> Result<usize, StudyNestError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| StudyNestError::NotFound(format!("Task {id}")))
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), StudyNestError> {
        save_json(self.store, TASKS_KEY, &next)?;
        self.tasks = next;
        Ok(())
    }
}

fn non_blank(text: &str) -> Result<String, StudyNestError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StudyNestError::InvalidInput(
            "Task text cannot be empty".to_string(),
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::backup::import;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);

        list.add("First").unwrap();
        list.add("  Second  ").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].text, "Second");
        assert_eq!(list.tasks()[1].text, "First");

        let reloaded = TaskList::load(&store, &clock);
        assert_eq!(reloaded.tasks(), list.tasks());
    }

    #[test]
    fn test_ids_are_unique_at_same_instant() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);

        let a = list.add("a").unwrap().id;
        let b = list.add("b").unwrap().id;
        let c = list.add("c").unwrap().id;

        assert_eq!(a, clock.now().timestamp_millis());
        assert_eq!(b, a + 1);
        assert_eq!(c, a + 2);
    }

    #[test]
    fn test_add_after_imported_max_id_is_rejected() {
        let store = MemoryStore::new();
        let clock = clock();
        let backup = r#"{
            "version": "1.0",
            "tasks": [
                {"id": 9223372036854775807, "text": "Last", "completed": false,
                 "createdAt": "2024-05-01T08:00:00Z"}
            ]
        }"#;
        import(&store, backup).unwrap();

        let mut list = TaskList::load(&store, &clock);
        assert!(matches!(list.add("next"), Err(StudyNestError::InvalidInput(_))));
        assert_eq!(list.len(), 1);
        assert_eq!(TaskList::load(&store, &clock).len(), 1);
    }

    #[test]
    fn test_blank_text_rejected() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);

        assert!(matches!(list.add("   "), Err(StudyNestError::InvalidInput(_))));
        assert!(list.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_and_current() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);

        let older = list.add("older").unwrap().id;
        let newer = list.add("newer").unwrap().id;
        assert_eq!(list.current().unwrap().id, newer);

        assert!(list.toggle(newer).unwrap().completed);
        assert_eq!(list.current().unwrap().id, older);
        assert_eq!(list.completed_count(), 1);

        assert!(!list.toggle(newer).unwrap().completed);
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_update() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);
        let id = list.add("draft").unwrap().id;

        assert_eq!(list.update(id, " final ").unwrap().text, "final");
        assert!(matches!(list.update(id, ""), Err(StudyNestError::InvalidInput(_))));
        assert_eq!(list.get(id).unwrap().text, "final");
    }

    #[test]
    fn test_unknown_id() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);

        assert!(matches!(list.toggle(7), Err(StudyNestError::NotFound(_))));
        assert!(matches!(list.delete(7), Err(StudyNestError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);
        let id = list.add("gone soon").unwrap().id;

        let removed = list.delete(id).unwrap();
        assert_eq!(removed.text, "gone soon");
        assert!(TaskList::load(&store, &clock).is_empty());
    }

    #[test]
    fn test_clear_completed() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut list = TaskList::load(&store, &clock);
        let a = list.add("a").unwrap().id;
        list.add("b").unwrap();
        let c = list.add("c").unwrap().id;
        list.toggle(a).unwrap();
        list.toggle(c).unwrap();

        assert_eq!(list.clear_completed().unwrap(), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].text, "b");
        assert_eq!(list.clear_completed().unwrap(), 0);
    }

    #[test]
    fn test_malformed_tasks_fall_back_to_empty() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, "not json").unwrap();
        let clock = clock();

        assert!(TaskList::load(&store, &clock).is_empty());
    }
}
