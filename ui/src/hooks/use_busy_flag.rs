use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

/// A guard against starting the same request twice. State from `use_state`
/// only changes on the next render, so two clicks in one tick would both see
/// "idle"; this flag flips immediately.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    /// Marks the flag busy, or returns `None` if it already is. The flag is
    /// released when the returned guard drops.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(BusyGuard(self.0.clone()))
    }

    pub fn is_busy(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct BusyGuard(Rc<Cell<bool>>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[hook]
pub fn use_busy_flag() -> BusyFlag {
    (*use_memo((), |_| BusyFlag::default())).clone()
}
