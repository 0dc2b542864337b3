//! # Bounded Mailbox
//!
//! A fixed-capacity FIFO queue with blocking `enqueue` and `dequeue`. It is
//! the only place actor threads suspend: senders wait while the queue is
//! full (backpressure), the owning reactor waits while it is empty.
//!
//! There is no timeout. A blocked call returns once the condition it waits
//! for holds, or once the mailbox is closed: closing discards pending
//! messages, hands later messages back to their senders and wakes every
//! waiter.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

/// Fixed-capacity, thread-safe FIFO channel feeding a single reactor.
///
/// The capacity is a [`NonZeroUsize`], so an unusable zero-capacity mailbox
/// cannot be constructed. Builders validate the user-facing `usize` before
/// they get here.
///
/// ```
/// use actor_runtime::Mailbox;
/// use std::num::NonZeroUsize;
///
/// let mailbox = Mailbox::new(NonZeroUsize::new(2).unwrap());
/// mailbox.enqueue("a").unwrap();
/// mailbox.enqueue("b").unwrap();
/// assert_eq!(mailbox.len(), 2);
/// assert_eq!(mailbox.dequeue(), Some("a"));
///
/// mailbox.close();
/// assert_eq!(mailbox.enqueue("c"), Err("c"));
/// assert_eq!(mailbox.dequeue(), None);
/// ```
pub struct Mailbox<T> {
    queue: Mutex<Queue<T>>,
    capacity: NonZeroUsize,
    not_empty: Condvar,
    not_full: Condvar,
}

struct Queue<T> {
    messages: VecDeque<T>,
    closed: bool,
}

impl<T> Mailbox<T> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Mutex::new(Queue {
                messages: VecDeque::with_capacity(capacity.get().min(1024)),
                closed: false,
            }),
            capacity,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Appends `message` at the tail, blocking while the mailbox is full.
    ///
    /// Returns the message back if the mailbox is, or becomes, closed.
    pub fn enqueue(&self, message: T) -> Result<(), T> {
        {
            let mut queue = self.queue.lock();
            while !queue.closed && queue.messages.len() >= self.capacity.get() {
                self.not_full.wait(&mut queue);
            }
            if queue.closed {
                return Err(message);
            }
            queue.messages.push_back(message);
            debug_assert!(queue.messages.len() <= self.capacity.get());
        }
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes and returns the oldest message, blocking while the mailbox is
    /// empty. Returns `None` once the mailbox is closed.
    pub fn dequeue(&self) -> Option<T> {
        let message = {
            let mut queue = self.queue.lock();
            loop {
                if let Some(message) = queue.messages.pop_front() {
                    break message;
                }
                if queue.closed {
                    return None;
                }
                self.not_empty.wait(&mut queue);
            }
        };
        self.not_full.notify_one();
        Some(message)
    }

    /// Rejects further messages, drops pending ones and wakes all waiters.
    ///
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let discarded = {
            let mut queue = self.queue.lock();
            queue.closed = true;
            std::mem::take(&mut queue.messages)
        };
        self.not_full.notify_all();
        self.not_empty.notify_all();
        drop(discarded);
    }

    pub fn is_closed(&self) -> bool {
        self.queue.lock().closed
    }

    /// Number of pending messages. Always within `0..=capacity`.
    pub fn len(&self) -> usize {
        self.queue.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl<T> fmt::Debug for Mailbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn mailbox<T>(capacity: usize) -> Mailbox<T> {
        Mailbox::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn dequeues_in_fifo_order() {
        let mailbox = mailbox(4);
        for i in 0..4 {
            mailbox.enqueue(i).unwrap();
        }
        let drained: Vec<i32> = (0..4).map(|_| mailbox.dequeue().unwrap()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn enqueue_blocks_while_full() {
        let mailbox = Arc::new(mailbox(2));
        mailbox.enqueue(1).unwrap();
        mailbox.enqueue(2).unwrap();

        let delivered = Arc::new(AtomicBool::new(false));
        let sender = {
            let mailbox = Arc::clone(&mailbox);
            let delivered = Arc::clone(&delivered);
            thread::spawn(move || {
                mailbox.enqueue(3).unwrap();
                delivered.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!delivered.load(Ordering::SeqCst), "third enqueue must wait for space");
        assert_eq!(mailbox.len(), 2);

        assert_eq!(mailbox.dequeue(), Some(1));
        sender.join().unwrap();
        assert!(delivered.load(Ordering::SeqCst));
        assert_eq!(mailbox.len(), 2);
        assert_eq!(mailbox.dequeue(), Some(2));
        assert_eq!(mailbox.dequeue(), Some(3));
    }

    #[test]
    fn dequeue_blocks_while_empty() {
        let mailbox = Arc::new(mailbox::<&str>(1));
        let receiver = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || mailbox.dequeue())
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!receiver.is_finished());

        mailbox.enqueue("wake").unwrap();
        assert_eq!(receiver.join().unwrap(), Some("wake"));
    }

    #[test]
    fn many_senders_keep_per_sender_order() {
        let mailbox = Arc::new(mailbox::<(usize, usize)>(3));
        let senders: Vec<_> = (0..4)
            .map(|sender| {
                let mailbox = Arc::clone(&mailbox);
                thread::spawn(move || {
                    for seq in 0..200 {
                        mailbox.enqueue((sender, seq)).unwrap();
                    }
                })
            })
            .collect();

        let mut next = [0usize; 4];
        for _ in 0..800 {
            let (sender, seq) = mailbox.dequeue().unwrap();
            assert_eq!(seq, next[sender]);
            next[sender] += 1;
            assert!(mailbox.len() <= mailbox.capacity());
        }
        for handle in senders {
            handle.join().unwrap();
        }
        assert_eq!(next, [200; 4]);
    }

    #[test]
    fn close_releases_blocked_sender_and_receiver() {
        let full = Arc::new(mailbox::<u8>(1));
        full.enqueue(1).unwrap();
        let sender = {
            let mailbox = Arc::clone(&full);
            thread::spawn(move || mailbox.enqueue(2))
        };

        let empty = Arc::new(mailbox::<u8>(1));
        let receiver = {
            let mailbox = Arc::clone(&empty);
            thread::spawn(move || mailbox.dequeue())
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!sender.is_finished());
        assert!(!receiver.is_finished());

        full.close();
        empty.close();
        assert_eq!(sender.join().unwrap(), Err(2));
        assert_eq!(receiver.join().unwrap(), None);

        // Pending messages are discarded and later ones handed back
        assert!(full.is_closed());
        assert!(full.is_empty());
        assert_eq!(full.enqueue(3), Err(3));
        assert_eq!(full.dequeue(), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn concurrent_sender_preserves_order_and_bound(
            capacity in 1usize..8,
            messages in proptest::collection::vec(any::<u32>(), 0..200),
        ) {
            let mailbox = Arc::new(mailbox::<u32>(capacity));
            let expected = messages.clone();
            let sender = {
                let mailbox = Arc::clone(&mailbox);
                thread::spawn(move || {
                    for message in messages {
                        mailbox.enqueue(message).unwrap();
                    }
                })
            };

            let mut received = Vec::with_capacity(expected.len());
            for _ in 0..expected.len() {
                prop_assert!(mailbox.len() <= capacity);
                received.push(mailbox.dequeue().unwrap());
            }
            sender.join().unwrap();
            prop_assert_eq!(received, expected);
            prop_assert!(mailbox.is_empty());
        }
    }
}
