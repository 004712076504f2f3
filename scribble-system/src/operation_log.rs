use crate::message::Operation;

/// The authoritative canvas history.
///
/// `history` holds every currently-applied operation in commit order and
/// `redo` holds operations that were undone but not yet reapplied. Undo and
/// redo are global: they always move the newest operation, no matter who
/// authored it. Taken together the two stacks hold every committed
/// operation exactly once.
pub struct OperationLog {
    history: Vec<Operation>,
    redo: Vec<Operation>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Appends a committed operation. Any commit invalidates the redo
    /// stack, including redoable operations of other users.
    pub fn commit(&mut self, operation: Operation) {
        self.history.push(operation);
        self.redo.clear();
    }

    /// Moves the newest applied operation onto the redo stack and returns
    /// it. `None` means the history was empty and nothing changed.
    pub fn undo(&mut self) -> Option<&Operation> {
        let operation = self.history.pop()?;
        self.redo.push(operation);
        self.redo.last()
    }

    /// Moves the most recently undone operation back into the history and
    /// returns it. `None` means the redo stack was empty and nothing
    /// changed.
    pub fn redo(&mut self) -> Option<&Operation> {
        let operation = self.redo.pop()?;
        self.history.push(operation);
        self.history.last()
    }

    /// The applied history in commit order, oldest first. This is the exact
    /// sequence a client replays to rebuild the canvas.
    pub fn snapshot(&self) -> Vec<Operation> {
        self.history.clone()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
