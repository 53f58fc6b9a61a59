//! Trace of the rewrites performed during a simplification

use crate::Expr;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A single successful rewrite step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleApplication {
    /// Position of this step in the log, starting at 1
    pub order: usize,
    /// Name of the rule (or of the simplifier for pass-level entries)
    pub rule: &'static str,
    pub description: String,
    pub before: String,
    pub after: String,
}

/// Shared list of rule applications.
///
/// The log can be read from other threads while a simplification is running: every
/// access goes through a read/write lock.
#[derive(Default, Debug)]
pub struct ApplicationLog {
    entries: RwLock<Vec<RuleApplication>>,
}

impl ApplicationLog {
    fn read(&self) -> RwLockReadGuard<'_, Vec<RuleApplication>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<RuleApplication>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a rewrite step
    pub fn record(
        &self,
        rule: &'static str,
        description: impl Into<String>,
        before: &Expr,
        after: &Expr,
    ) {
        let mut entries = self.write();
        let order = entries.len() + 1;
        entries.push(RuleApplication {
            order,
            rule,
            description: description.into(),
            before: before.to_string(),
            after: after.to_string(),
        });
    }

    /// Move the steps of another log after the existing ones, renumbering them
    pub fn append(&self, other: &ApplicationLog) {
        let moved = std::mem::take(&mut *other.write());
        let mut entries = self.write();
        for mut app in moved {
            app.order = entries.len() + 1;
            entries.push(app);
        }
    }

    /// Copy of all recorded steps, in order
    pub fn applications(&self) -> Vec<RuleApplication> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}

impl fmt::Display for RuleApplication {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {} ({}): {} => {}",
            self.order, self.rule, self.description, self.before, self.after
        )
    }
}

impl fmt::Display for ApplicationLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for app in self.read().iter() {
            writeln!(f, "{}", app)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::trace::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn record_and_clear() {
        let log = ApplicationLog::default();
        assert!(log.is_empty());

        let a = Expr::variable("a");
        let e = &a & &a;
        log.record("Idempotency", "A ∧ A = A", &e, &a);
        log.record("Identity", "A ∧ 1 = A", &a, &a);

        let apps = log.applications();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].order, 1);
        assert_eq!(apps[1].order, 2);
        assert_eq!(apps[0].before, "a ∧ a");
        assert_eq!(apps[0].after, "a");
        assert_eq!(apps[0].to_string(), "1. Idempotency (A ∧ A = A): a ∧ a => a");

        log.clear();
        assert!(log.is_empty());
        log.record("Identity", "A ∧ 1 = A", &a, &a);
        assert_eq!(log.applications()[0].order, 1);
    }

    #[test]
    fn append_renumbers() {
        let a = Expr::variable("a");
        let log = ApplicationLog::default();
        log.record("Identity", "A ∧ 1 = A", &a, &a);

        let other = ApplicationLog::default();
        other.record("Idempotency", "A ∧ A = A", &(&a & &a), &a);
        other.record("Complement", "A ∧ !A = 0", &(&a & !&a), &Expr::from(false));
        log.append(&other);

        assert!(other.is_empty());
        let apps = log.applications();
        let orders: Vec<usize> = apps.iter().map(|app| app.order).collect();
        assert_eq!(orders, [1, 2, 3]);
        assert_eq!(apps[1].rule, "Idempotency");
        assert_eq!(apps[2].after, "0");

        // Appending a log to itself leaves it unchanged
        log.append(&log);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn shared_between_threads() {
        let log = Arc::new(ApplicationLog::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    let a = Expr::variable("a");
                    for _ in 0..10 {
                        log.record("Identity", "A ∧ 1 = A", &a, &a);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let apps = log.applications();
        assert_eq!(apps.len(), 40);
        for (i, app) in apps.iter().enumerate() {
            assert_eq!(app.order, i + 1);
        }
        assert_eq!(log.to_string().lines().count(), 40);
    }
}
