//! Deferred callbacks keyed by game time.
//!
//! Attacks, revives and corpse removal all happen "some time after" the
//! decision that started them. Instead of timers on every entity, a single
//! `Scheduler` resource holds fire-and-forget callbacks. There is no way to
//! cancel one: whoever handles a `DeferredCallback` must check that the
//! entity still exists and is still in the life the callback was created for.

use bevy::prelude::*;

/// What a deferred callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Single-target damage at the end of an attack windup.
    Strike,
    /// Area damage at the end of the player's swing windup.
    Sweep,
    /// Attack recovery is over; the actor may attack again once cooled down.
    Recover,
    /// The fake death has played out; start getting back up.
    BeginRise,
    /// Back on its feet with restored health.
    FinishRise,
    /// Corpse grace period is over; despawn.
    Remove,
    /// The player has been dead long enough; restart the level.
    Restart,
}

/// Callback payload delivered through `Events<DeferredCallback>` when due.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredCallback {
    pub entity: Entity,
    /// `Incarnation` of the entity when the callback was scheduled.
    pub incarnation: u32,
    pub action: DeferredAction,
}

impl DeferredCallback {
    pub fn new(entity: Entity, incarnation: u32, action: DeferredAction) -> Self {
        Self {
            entity,
            incarnation,
            action,
        }
    }

    /// True if the callback was scheduled during the entity's current life.
    pub fn is_current(&self, incarnation: &Incarnation) -> bool {
        self.incarnation == incarnation.0
    }
}

/// Counts lives. Bumped on every death, fake death and revive so callbacks
/// scheduled in an earlier life can recognise themselves as stale.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Incarnation(pub u32);

impl Incarnation {
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fire_at: f32,
    sequence: u64,
    callback: DeferredCallback,
}

/// Pending deferred callbacks ordered by fire time.
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_sequence: u64,
}

impl Scheduler {
    /// Queue `callback` to fire `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f32, delay: f32, callback: DeferredCallback) {
        self.pending.push(Pending {
            fire_at: now + delay.max(0.0),
            sequence: self.next_sequence,
            callback,
        });
        self.next_sequence += 1;
    }

    /// Remove and return every callback due at `now`, earliest first.
    /// Callbacks due at the same instant keep their scheduling order.
    pub fn drain_due(&mut self, now: f32) -> Vec<DeferredCallback> {
        let mut due = Vec::new();
        self.pending.retain(|pending| {
            if pending.fire_at <= now {
                due.push(*pending);
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.fire_at
                .total_cmp(&b.fire_at)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|pending| pending.callback).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything, used when the level is torn down.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Move due callbacks from the scheduler into the event queue.
pub fn fire_due_callbacks(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut callbacks: EventWriter<DeferredCallback>,
) {
    if scheduler.is_empty() {
        return;
    }

    for callback in scheduler.drain_due(time.elapsed_secs()) {
        callbacks.send(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callback(index: u32, action: DeferredAction) -> DeferredCallback {
        DeferredCallback::new(Entity::from_raw(index), 0, action)
    }

    #[test]
    fn nothing_fires_before_its_time() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(1.0, 0.5, callback(1, DeferredAction::Strike));

        assert!(scheduler.drain_due(1.4).is_empty());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.drain_due(1.5).len(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn fires_in_time_order_then_insertion_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(0.0, 1.0, callback(1, DeferredAction::Recover));
        scheduler.schedule(0.0, 0.3, callback(2, DeferredAction::Strike));
        scheduler.schedule(0.0, 1.0, callback(3, DeferredAction::Remove));

        let fired: Vec<_> = scheduler
            .drain_due(2.0)
            .into_iter()
            .map(|c| c.entity.index())
            .collect();
        assert_eq!(fired, vec![2, 1, 3]);
    }

    #[test]
    fn negative_delay_fires_immediately() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(3.0, -1.0, callback(1, DeferredAction::Sweep));
        assert_eq!(scheduler.drain_due(3.0).len(), 1);
    }

    #[test]
    fn stale_incarnation_is_detected() {
        let mut life = Incarnation::default();
        let pending = DeferredCallback::new(Entity::from_raw(7), life.0, DeferredAction::Strike);
        assert!(pending.is_current(&life));

        life.bump();
        assert!(!pending.is_current(&life));
    }
}
