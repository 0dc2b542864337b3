//! # Sample Pipelines
//!
//! Each pipeline builds its own [`ActorSystem`], wires producers to
//! reactors, and runs the system to completion. Producers stop the reactors
//! they feed once they are done, so [`ActorSystem::start`] returns.
//!
//! The returned [`PipelineReport`] is collected through a side channel that
//! the consumers update, so callers can check that nothing was lost.

use crate::config::DemoConfig;
use actor_runtime::prelude::*;
use actor_runtime::Result;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Heap payload used by the boxed, shared and group pipelines.
#[derive(Debug)]
pub struct Message {
    pub data: i64,
}

impl Message {
    pub fn new(data: i64) -> Self {
        Self { data }
    }
}

/// What the consumers of one pipeline saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub name: &'static str,
    pub received: u64,
    pub checksum: i64,
}

/// State of the stateful consumer.
#[derive(Debug, Default)]
pub struct Accumulator {
    pub counter: i64,
    pub received: u64,
}

#[derive(Default)]
struct Tally {
    received: AtomicU64,
    checksum: AtomicI64,
}

impl Tally {
    fn record(&self, value: i64) {
        self.received.fetch_add(1, Ordering::Relaxed);
        self.checksum.fetch_add(value, Ordering::Relaxed);
    }

    fn report(&self, name: &'static str) -> PipelineReport {
        PipelineReport {
            name,
            received: self.received.load(Ordering::SeqCst),
            checksum: self.checksum.load(Ordering::SeqCst),
        }
    }
}

/// Plain integers through one mailbox.
pub fn long(config: &DemoConfig) -> Result<PipelineReport> {
    let system = ActorSystem::new();
    let tally = Arc::new(Tally::default());

    let sink = Arc::clone(&tally);
    let consumer = system
        .reactor::<i64>()
        .name("long-consumer")
        .mailbox_size(config.queue_size)
        .on_receive(move |value| sink.record(value))
        .create()?;

    let total = config.total_elements;
    system
        .producer()
        .name("long-producer")
        .on_run(move || {
            for i in 0..total {
                consumer.send(i + 2);
            }
            consumer.stop();
        })
        .create()?;

    system.start()?;
    Ok(tally.report("long"))
}

/// Uniquely owned heap messages; ownership moves into the consumer.
pub fn boxed(config: &DemoConfig) -> Result<PipelineReport> {
    let system = ActorSystem::new();
    let tally = Arc::new(Tally::default());

    let sink = Arc::clone(&tally);
    let consumer = system
        .reactor::<Box<Message>>()
        .name("boxed-consumer")
        .mailbox_size(config.queue_size)
        .on_receive(move |message| sink.record(message.data))
        .create()?;

    let total = config.total_elements;
    system
        .producer()
        .name("boxed-producer")
        .on_run(move || {
            for i in 0..total {
                consumer.send(Box::new(Message::new(i + 2)));
            }
            consumer.stop();
        })
        .create()?;

    system.start()?;
    Ok(tally.report("boxed"))
}

/// Reference-counted messages.
pub fn shared(config: &DemoConfig) -> Result<PipelineReport> {
    let system = ActorSystem::new();
    let tally = Arc::new(Tally::default());

    let sink = Arc::clone(&tally);
    let consumer = system
        .reactor::<Arc<Message>>()
        .name("shared-consumer")
        .mailbox_size(config.queue_size)
        .on_receive(move |message| sink.record(message.data))
        .create()?;

    let total = config.total_elements;
    system
        .producer()
        .name("shared-producer")
        .on_run(move || {
            for i in 0..total {
                consumer.send(Arc::new(Message::new(i + 2)));
            }
            consumer.stop();
        })
        .create()?;

    system.start()?;
    Ok(tally.report("shared"))
}

/// A stateful consumer folds every message into an [`Accumulator`]; a
/// stateful producer counts what it sent.
pub fn stateful(config: &DemoConfig) -> Result<PipelineReport> {
    let system = ActorSystem::new();
    let tally = Arc::new(Tally::default());

    let report_every = config.report_every;
    let sink = Arc::clone(&tally);
    let consumer = system
        .stateful_reactor::<Box<Message>, Accumulator>()
        .name("stateful-consumer")
        .mailbox_size(config.queue_size)
        .on_receive(move |message, state| {
            state.counter += message.data;
            state.received += 1;
            if report_every > 0 && state.counter % report_every == 0 {
                info!(counter = state.counter, "Running total");
            }
        })
        .on_shutdown(move |state| {
            sink.received.store(state.received, Ordering::SeqCst);
            sink.checksum.store(state.counter, Ordering::SeqCst);
        })
        .create()?;

    let total = config.total_elements;
    system
        .stateful_producer::<u64>()
        .name("stateful-producer")
        .on_run(move |sent| {
            for i in 0..total {
                consumer.send(Box::new(Message::new(i)));
                *sent += 1;
            }
            consumer.stop();
        })
        .on_shutdown_with_context(|sent, identity| {
            info!(actor = %identity, sent = *sent, "Producer finished");
        })
        .create()?;

    system.start()?;
    Ok(tally.report("stateful"))
}

/// A group of producers spreads messages round-robin over a group of
/// consumers. The last producer to finish stops every consumer.
pub fn group(config: &DemoConfig) -> Result<PipelineReport> {
    let system = ActorSystem::new();
    let tally = Arc::new(Tally::default());

    let sink = Arc::clone(&tally);
    let consumers = system
        .reactor::<Box<Message>>()
        .name("consumer")
        .mailbox_size(config.group_queue_size)
        .on_receive_with_context(move |message, identity| {
            debug!(consumer = identity.id(), data = message.data, "Group message");
            sink.record(message.data);
        })
        .create_group(config.group_consumers)?;

    let targets = consumers.clone();
    let producer_count = config.group_producers;
    let messages = config.group_messages;
    let finished = Arc::new(AtomicUsize::new(0));
    let producers = system
        .producer()
        .name("producer")
        .on_run(move || {
            for (consumer, i) in targets.iter().cycle().zip(0..messages) {
                consumer.send(Box::new(Message::new(i)));
            }
            if finished.fetch_add(1, Ordering::SeqCst) + 1 == producer_count {
                for consumer in &targets {
                    consumer.stop();
                }
            }
        })
        .create_group(producer_count)?;

    info!(
        consumers = consumers.size(),
        producers = producers.size(),
        last = producers.get(producers.size() - 1)?.name(),
        "Group pipeline wired"
    );

    system.start()?;
    Ok(tally.report("group"))
}

/// Runs every pipeline in turn, stopping at the first failure.
pub fn run_all(config: &DemoConfig) -> Result<Vec<PipelineReport>> {
    let pipelines: [fn(&DemoConfig) -> Result<PipelineReport>; 5] =
        [long, boxed, shared, stateful, group];
    pipelines.iter().map(|pipeline| pipeline(config)).collect()
}
