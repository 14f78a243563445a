//! Scoped release of host resources
//!
//! A [`Teardown`] owns the action that frees one resource (cancel a timer,
//! remove a listener) and runs it exactly once, either when asked or when
//! dropped. Mounting collects guards into a [`TeardownStack`], so bailing out
//! of a half-finished mount with `?` still frees whatever was acquired.

/// Releases one resource exactly once
#[must_use = "dropping a Teardown releases its resource immediately"]
pub struct Teardown {
    label: &'static str,
    release: Option<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn new(label: &'static str, release: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Release now instead of at drop
    pub fn cancel(&mut self) {
        if let Some(release) = self.release.take() {
            log::debug!("Releasing {}", self.label);
            release();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("label", &self.label)
            .field("released", &self.is_released())
            .finish()
    }
}

/// Guards released in reverse acquisition order
#[derive(Debug, Default)]
#[must_use = "dropping a TeardownStack releases everything it holds"]
pub struct TeardownStack {
    guards: Vec<Teardown>,
}

impl TeardownStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, guard: Teardown) {
        self.guards.push(guard);
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Release everything now, newest first
    pub fn release_all(&mut self) {
        while let Some(mut guard) = self.guards.pop() {
            guard.cancel();
        }
    }
}

impl Drop for TeardownStack {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Teardown) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |label: &'static str| {
                let log = log.clone();
                Teardown::new(label, move || log.borrow_mut().push(label))
            }
        };
        (log, make)
    }

    #[test]
    fn test_drop_releases_once() {
        let (log, make) = recorder();
        {
            let _guard = make("timer");
        }
        assert_eq!(*log.borrow(), vec!["timer"]);
    }

    #[test]
    fn test_cancel_then_drop_does_not_double_release() {
        let (log, make) = recorder();
        let mut guard = make("timer");
        guard.cancel();
        assert!(guard.is_released());
        guard.cancel();
        drop(guard);
        assert_eq!(*log.borrow(), vec!["timer"]);
    }

    #[test]
    fn test_stack_releases_in_reverse() {
        let (log, make) = recorder();
        let mut stack = TeardownStack::new();
        stack.push(make("timer"));
        stack.push(make("pointerdown"));
        stack.push(make("resize"));
        assert_eq!(stack.len(), 3);
        drop(stack);
        assert_eq!(*log.borrow(), vec!["resize", "pointerdown", "timer"]);
    }

    #[test]
    fn test_failed_mount_releases_acquired() {
        let (log, make) = recorder();

        let mount = |fail_at: usize| -> Result<TeardownStack, String> {
            let mut stack = TeardownStack::new();
            for (i, label) in ["timer", "pointerdown", "resize"].into_iter().enumerate() {
                if i == fail_at {
                    return Err(format!("{} failed", label));
                }
                stack.push(make(label));
            }
            Ok(stack)
        };

        assert!(mount(2).is_err());
        assert_eq!(*log.borrow(), vec!["pointerdown", "timer"]);

        log.borrow_mut().clear();
        let stack = mount(usize::MAX).unwrap();
        assert!(log.borrow().is_empty());
        drop(stack);
        assert_eq!(log.borrow().len(), 3);
    }
}
