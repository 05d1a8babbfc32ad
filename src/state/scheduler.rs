//! Cancellable delayed work for the engine.
//!
//! Everything that used to be a fire-and-forget timeout (next piece after a
//! snap, warning dismissal, obstacle spawns, the overlay between rounds) is a
//! [`Task`] queued here. The engine drains due tasks in deadline order and
//! clears the queue whenever a round or session is torn down, so a stale task
//! can never touch a round that no longer exists.

#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    SelectNextPiece,
    ClearWrongCellGuard,
    DismissWarning,
    SpawnTransient,
    ExpireObstacle(u32),
    DisplayTick,
    EndInterlude,
    ForcedRestart,
}

#[derive(Clone, Debug, PartialEq)]
struct Pending {
    due: f64,
    seq: u64,
    task: Task,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn schedule(&mut self, due: f64, task: Task) {
        self.pending.push(Pending { due, seq: self.next_seq, task });
        self.next_seq += 1;
    }

    /// Cancel every queued instance of `task`.
    pub fn cancel_task(&mut self, task: &Task) {
        self.pending.retain(|p| &p.task != task);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline; ties go to the task scheduled first.
    pub fn next_due(&self) -> Option<f64> {
        self.earliest().map(|i| self.pending[i].due)
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, Task)> {
        let i = self.earliest()?;
        if self.pending[i].due > now {
            return None;
        }
        let p = self.pending.remove(i);
        Some((p.due, p.task))
    }

    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)
    }
}
