//! Pending-event queue with sequence-based ordering
//!
//! A plain FIFO of undelivered notification events. The queue itself is
//! not synchronised; the delivery proxy owns it behind a single mutex that
//! also covers the endpoint and mode fields, so every queue operation runs
//! as one atomic critical section.

use std::collections::VecDeque;
use std::mem;
use std::time::SystemTime;

use crate::notifications::event::NotificationEvent;
use crate::notifications::traits::ConsumerEndpoint;

/// One accepted-but-undelivered notification event
///
/// Immutable once created. The sequence number records acceptance order
/// and is never reassigned; a redelivery attempt replays the same entry
/// rather than producing a new one.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    sequence: u64,
    enqueued_at: SystemTime,
    event: NotificationEvent,
}

impl PendingEntry {
    /// Monotonic acceptance order, starting from 1
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// When the event was accepted
    pub fn enqueued_at(&self) -> SystemTime {
        self.enqueued_at
    }

    /// The retained event payload
    pub fn event(&self) -> &NotificationEvent {
        &self.event
    }
}

/// Ordered collection of not-yet-confirmed notification events
///
/// Invariant: the queue contains exactly the accepted events that have not
/// yet been delivered to some endpoint, in acceptance order. An entry
/// leaves only when a drain reports it delivered.
#[derive(Debug)]
pub struct PendingQueue {
    next_sequence: u64,
    entries: VecDeque<PendingEntry>,
}

impl Default for PendingQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingQueue {
    pub fn new() -> Self {
        Self {
            next_sequence: 1,
            entries: VecDeque::new(),
        }
    }

    /// Append `event` at the tail, assigning the next sequence number
    ///
    /// Always succeeds; queue length increases by one.
    pub fn enqueue(&mut self, event: NotificationEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries.push_back(PendingEntry {
            sequence,
            enqueued_at: SystemTime::now(),
            event,
        });

        sequence
    }

    /// Number of currently retained (undelivered) entries
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// The sequence number the next accepted event will receive
    pub fn head_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Iterate the retained entries in acceptance order
    pub fn entries(&self) -> impl Iterator<Item = &PendingEntry> {
        self.entries.iter()
    }

    /// Attempt delivery of every currently queued entry to `endpoint`
    ///
    /// Works on the snapshot of entries present at call start, in order.
    /// Each entry is replayed once: success discards it, failure retains
    /// it. The retained failures are then re-merged in front of anything
    /// that reached the queue after the snapshot was taken, so late
    /// arrivals are never lost and relative order is preserved. Failure is
    /// per-entry; the drain itself has no error outcome.
    pub fn drain(&mut self, endpoint: &dyn ConsumerEndpoint) {
        if self.entries.is_empty() {
            return;
        }

        let snapshot = mem::take(&mut self.entries);
        let attempted = snapshot.len();
        let mut retained: VecDeque<PendingEntry> = VecDeque::new();

        for entry in snapshot {
            match entry.event.replay(endpoint) {
                Ok(()) => {
                    log::trace!(
                        "Delivered {} (request {}, seq {})",
                        entry.event.kind(),
                        entry.event.request_id(),
                        entry.sequence
                    );
                }
                Err(err) => {
                    log::debug!(
                        "Retaining {} (request {}, seq {}): {}",
                        entry.event.kind(),
                        entry.event.request_id(),
                        entry.sequence,
                        err
                    );
                    retained.push_back(entry);
                }
            }
        }

        // Anything enqueued after the snapshot was taken stays behind the
        // retained failures, keeping global acceptance order intact.
        retained.append(&mut self.entries);
        self.entries = retained;

        log::debug!(
            "Drain attempted {} entries, {} retained",
            attempted,
            self.entries.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::tests::harness::RecordingEndpoint;

    fn heartbeat(request_id: u32) -> NotificationEvent {
        NotificationEvent::HeartbeatSucceeded { request_id }
    }

    #[test]
    fn test_enqueue_assigns_monotonic_sequences() {
        let mut queue = PendingQueue::new();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.head_sequence(), 1);

        let seq1 = queue.enqueue(heartbeat(10));
        let seq2 = queue.enqueue(heartbeat(11));

        assert_eq!(seq1, 1);
        assert_eq!(seq2, 2);
        assert_eq!(queue.size(), 2);
        assert_eq!(queue.head_sequence(), 3);
    }

    #[test]
    fn test_drain_discards_delivered_entries() {
        let mut queue = PendingQueue::new();
        queue.enqueue(heartbeat(1));
        queue.enqueue(heartbeat(2));

        let endpoint = RecordingEndpoint::healthy(1);
        queue.drain(&endpoint);

        assert_eq!(queue.size(), 0);
        assert_eq!(endpoint.accepted().len(), 2);
    }

    #[test]
    fn test_drain_retains_failures_in_original_order() {
        let mut queue = PendingQueue::new();
        for request_id in 1..=4 {
            queue.enqueue(heartbeat(request_id));
        }

        let endpoint = RecordingEndpoint::failing(1);
        queue.drain(&endpoint);

        assert_eq!(queue.size(), 4);
        let retained: Vec<u32> = queue.entries().map(|e| e.event().request_id()).collect();
        assert_eq!(retained, vec![1, 2, 3, 4]);

        // Sequence numbers survive the failed pass unchanged
        let sequences: Vec<u64> = queue.entries().map(|e| e.sequence()).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_drain_retains_only_rejected_entries() {
        let mut queue = PendingQueue::new();
        queue.enqueue(heartbeat(1));
        queue.enqueue(heartbeat(2));
        queue.enqueue(heartbeat(3));

        let endpoint = RecordingEndpoint::healthy(1);
        endpoint.reject_request(2);
        queue.drain(&endpoint);

        assert_eq!(queue.size(), 1);
        assert_eq!(queue.entries().next().unwrap().event().request_id(), 2);
    }

    #[test]
    fn test_drain_on_empty_queue_is_a_no_op() {
        let mut queue = PendingQueue::new();
        let endpoint = RecordingEndpoint::healthy(1);

        queue.drain(&endpoint);

        assert_eq!(queue.size(), 0);
        assert_eq!(endpoint.attempt_count(), 0);
    }

    #[test]
    fn test_failed_entries_precede_later_arrivals() {
        let mut queue = PendingQueue::new();
        queue.enqueue(heartbeat(1));

        let endpoint = RecordingEndpoint::failing(1);
        queue.drain(&endpoint);
        queue.enqueue(heartbeat(2));

        let order: Vec<u32> = queue.entries().map(|e| e.event().request_id()).collect();
        assert_eq!(order, vec![1, 2]);
    }
}
