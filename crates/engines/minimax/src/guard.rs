//! Scoped apply/undo.

use std::ops::{Deref, DerefMut};

use crate::rules::GameRules;

/// A move applied to a position for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so the parent position is restored on
/// every exit from a child's exploration, including a cut-off `break` or an
/// unwinding panic. While the guard lives it is the only handle to the
/// position, which keeps sibling branches strictly nested.
pub struct Applied<'a, P: GameRules> {
    pos: &'a mut P,
    mv: P::Move,
    undo: Option<P::Undo>,
}

impl<'a, P: GameRules> Applied<'a, P> {
    pub fn new(pos: &'a mut P, mv: P::Move) -> Self {
        let undo = pos.apply(mv);
        Self {
            pos,
            mv,
            undo: Some(undo),
        }
    }
}

impl<P: GameRules> Deref for Applied<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        &*self.pos
    }
}

impl<P: GameRules> DerefMut for Applied<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut *self.pos
    }
}

impl<P: GameRules> Drop for Applied<'_, P> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.undo(self.mv, undo);
        }
    }
}
