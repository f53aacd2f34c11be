/// Something that can stop the page behind an overlay from scrolling.
pub trait ScrollLock {
    fn set_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The hamburger button.
    Toggle,
    /// A nav item was picked; the caller scrolls to it.
    Navigate,
    /// Pointer-down somewhere on the page.
    PointerDown(PointerTarget),
    /// The explicit close control inside the overlay.
    Close,
}

/// Where a pointer-down landed relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerTarget {
    pub in_menu: bool,
    pub in_toggle: bool,
}

impl PointerTarget {
    /// Presses on the toggle button are left to its own click handler, otherwise
    /// the overlay would close on pointer-down and reopen on click.
    pub fn is_outside(&self) -> bool {
        !self.in_menu && !self.in_toggle
    }
}

/// Mobile navigation overlay. The page scroll lock is held exactly while the
/// menu is open and released when the menu is dropped.
#[derive(Debug)]
pub struct MobileMenu<L: ScrollLock> {
    state: MenuState,
    lock: L,
}

impl<L: ScrollLock> MobileMenu<L> {
    pub fn new(lock: L) -> Self {
        Self {
            state: MenuState::Closed,
            lock,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Applies an event and returns the resulting state.
    pub fn handle(&mut self, event: MenuEvent) -> MenuState {
        let next = match (self.state, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (MenuState::Open, MenuEvent::Toggle)
            | (MenuState::Open, MenuEvent::Navigate)
            | (MenuState::Open, MenuEvent::Close) => MenuState::Closed,
            (MenuState::Open, MenuEvent::PointerDown(target)) if target.is_outside() => {
                MenuState::Closed
            }
            (state, _) => state,
        };
        if next != self.state {
            log::debug!("mobile menu {:?} -> {:?} on {:?}", self.state, next, event);
            self.state = next;
            self.lock.set_locked(next == MenuState::Open);
        }
        next
    }

    /// Closes the menu, releasing the lock if it was held.
    pub fn release(&mut self) {
        if self.is_open() {
            self.state = MenuState::Closed;
            self.lock.set_locked(false);
        }
    }
}

impl<L: ScrollLock> Drop for MobileMenu<L> {
    fn drop(&mut self) {
        if self.is_open() {
            self.lock.set_locked(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeLock(Arc<Mutex<Vec<bool>>>);

    impl FakeLock {
        fn locked(&self) -> bool {
            self.0.lock().unwrap().last().copied().unwrap_or(false)
        }

        fn writes(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    impl ScrollLock for FakeLock {
        fn set_locked(&mut self, locked: bool) {
            self.0.lock().unwrap().push(locked);
        }
    }

    fn outside() -> MenuEvent {
        MenuEvent::PointerDown(PointerTarget::default())
    }

    #[test]
    fn test_toggle_locks_and_unlocks() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        assert_eq!(menu.state(), MenuState::Closed);

        assert_eq!(menu.handle(MenuEvent::Toggle), MenuState::Open);
        assert!(lock.locked());
        assert_eq!(menu.handle(MenuEvent::Toggle), MenuState::Closed);
        assert!(!lock.locked());
    }

    #[test]
    fn test_every_close_trigger_restores_scroll() {
        for close in [MenuEvent::Toggle, MenuEvent::Navigate, outside(), MenuEvent::Close] {
            let lock = FakeLock::default();
            let mut menu = MobileMenu::new(lock.clone());
            menu.handle(MenuEvent::Toggle);
            assert!(lock.locked());
            assert_eq!(menu.handle(close), MenuState::Closed, "{close:?}");
            assert!(!lock.locked(), "{close:?} left scroll locked");
        }
    }

    #[test]
    fn test_open_navigate_closed() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        menu.handle(MenuEvent::Toggle);
        menu.handle(MenuEvent::Navigate);
        assert!(!menu.is_open());
        assert!(!lock.locked());
        // navigating again while closed is a no-op
        menu.handle(MenuEvent::Navigate);
        assert_eq!(lock.writes(), 2);
    }

    #[test]
    fn test_pointer_inside_keeps_menu_open() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        menu.handle(MenuEvent::Toggle);
        let inside = PointerTarget {
            in_menu: true,
            in_toggle: false,
        };
        let on_toggle = PointerTarget {
            in_menu: false,
            in_toggle: true,
        };
        assert_eq!(menu.handle(MenuEvent::PointerDown(inside)), MenuState::Open);
        assert_eq!(menu.handle(MenuEvent::PointerDown(on_toggle)), MenuState::Open);
        assert!(lock.locked());
    }

    #[test]
    fn test_closed_menu_ignores_close_events() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        for event in [MenuEvent::Navigate, outside(), MenuEvent::Close] {
            assert_eq!(menu.handle(event), MenuState::Closed);
        }
        assert_eq!(lock.writes(), 0);
    }

    #[test]
    fn test_drop_while_open_releases_lock() {
        let lock = FakeLock::default();
        {
            let mut menu = MobileMenu::new(lock.clone());
            menu.handle(MenuEvent::Toggle);
            assert!(lock.locked());
        }
        assert!(!lock.locked());
    }

    #[test]
    fn test_release() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        menu.handle(MenuEvent::Toggle);
        menu.release();
        assert!(!menu.is_open());
        assert!(!lock.locked());
        // a second release has nothing to undo
        menu.release();
        assert_eq!(lock.writes(), 2);
    }

    #[test]
    fn test_release_never_opened_touches_nothing() {
        let lock = FakeLock::default();
        let mut menu = MobileMenu::new(lock.clone());
        menu.release();
        drop(menu);
        assert_eq!(lock.writes(), 0);
    }
}
