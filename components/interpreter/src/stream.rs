//! Result delivery
//!
//! Every successful step hands its result to the [`Sink`] of the stream it
//! ran on. A sink answers each callback with a [`SinkStatus`]; anything but
//! [`SinkStatus::ACCEPT`] faults the step.

use core_types::{AttributeId, AttributeValue, NodeId, StreamId};
use tracing::trace;

use crate::fault::Fault;
use crate::result::StepResult;

/// Status returned by a sink callback. Zero accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SinkStatus(pub u8);

impl SinkStatus {
    /// Delivery accepted
    pub const ACCEPT: SinkStatus = SinkStatus(0);

    /// Whether delivery was accepted
    pub fn is_accepted(self) -> bool {
        self == Self::ACCEPT
    }
}

/// Callbacks that observe step results.
///
/// Each method defaults to accepting, so a sink implements only the
/// callbacks it cares about.
pub trait Sink {
    /// A node id was produced
    fn on_node(&mut self, stream: StreamId, node: NodeId) -> SinkStatus {
        let _ = (stream, node);
        SinkStatus::ACCEPT
    }

    /// An attribute id was produced
    fn on_attribute(&mut self, stream: StreamId, attribute: AttributeId) -> SinkStatus {
        let _ = (stream, attribute);
        SinkStatus::ACCEPT
    }

    /// A text value was produced
    fn on_string(&mut self, stream: StreamId, text: &str) -> SinkStatus {
        let _ = (stream, text);
        SinkStatus::ACCEPT
    }

    /// An integer, count or type tag was produced
    fn on_integer(&mut self, stream: StreamId, value: i64) -> SinkStatus {
        let _ = (stream, value);
        SinkStatus::ACCEPT
    }

    /// A boolean was produced
    fn on_boolean(&mut self, stream: StreamId, value: bool) -> SinkStatus {
        let _ = (stream, value);
        SinkStatus::ACCEPT
    }

    /// A real was produced
    fn on_real(&mut self, stream: StreamId, value: f64) -> SinkStatus {
        let _ = (stream, value);
        SinkStatus::ACCEPT
    }
}

/// Accepts everything
impl Sink for () {}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn on_node(&mut self, stream: StreamId, node: NodeId) -> SinkStatus {
        (**self).on_node(stream, node)
    }

    fn on_attribute(&mut self, stream: StreamId, attribute: AttributeId) -> SinkStatus {
        (**self).on_attribute(stream, attribute)
    }

    fn on_string(&mut self, stream: StreamId, text: &str) -> SinkStatus {
        (**self).on_string(stream, text)
    }

    fn on_integer(&mut self, stream: StreamId, value: i64) -> SinkStatus {
        (**self).on_integer(stream, value)
    }

    fn on_boolean(&mut self, stream: StreamId, value: bool) -> SinkStatus {
        (**self).on_boolean(stream, value)
    }

    fn on_real(&mut self, stream: StreamId, value: f64) -> SinkStatus {
        (**self).on_real(stream, value)
    }
}

/// A stream id bound to the sink that observes it
#[derive(Debug)]
pub struct Stream<S> {
    id: StreamId,
    sink: S,
}

impl<S: Sink> Stream<S> {
    /// Bind `sink` to `id`
    pub fn new(id: StreamId, sink: S) -> Self {
        Self { id, sink }
    }

    /// Stream identifier
    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Bound sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Bound sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Unbind and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Deliver a step result.
    ///
    /// Value results deliver the attribute id first, then the typed value.
    /// Void and absent results deliver nothing.
    pub fn deliver(&mut self, result: &StepResult) -> Result<(), Fault> {
        let id = self.id;
        let status = match result {
            StepResult::Void | StepResult::Node(None) | StepResult::Attribute(None) => {
                return Ok(())
            }
            StepResult::Node(Some(node)) => self.sink.on_node(id, *node),
            StepResult::Attribute(Some(attribute)) => self.sink.on_attribute(id, *attribute),
            StepResult::Boolean(b) => self.sink.on_boolean(id, *b),
            StepResult::Integer(n) => self.sink.on_integer(id, *n),
            StepResult::Real(n) => self.sink.on_real(id, *n),
            StepResult::Text(s) => self.sink.on_string(id, s),
            StepResult::Value { attribute, value } => {
                check(id, self.sink.on_attribute(id, *attribute))?;
                match value {
                    AttributeValue::Boolean(b) => self.sink.on_boolean(id, *b),
                    AttributeValue::Integer(n) => self.sink.on_integer(id, *n),
                    AttributeValue::Real(n) => self.sink.on_real(id, *n),
                    AttributeValue::Text(s) => self.sink.on_string(id, s),
                }
            }
        };
        check(id, status)
    }
}

fn check(stream: StreamId, status: SinkStatus) -> Result<(), Fault> {
    if status.is_accepted() {
        Ok(())
    } else {
        trace!(stream = stream.0, status = status.0, "sink rejected delivery");
        Err(Fault::SinkRejected {
            stream,
            status: status.0,
        })
    }
}

/// One recorded callback
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `on_node`
    Node(StreamId, NodeId),
    /// `on_attribute`
    Attribute(StreamId, AttributeId),
    /// `on_string`
    Text(StreamId, String),
    /// `on_integer`
    Integer(StreamId, i64),
    /// `on_boolean`
    Boolean(StreamId, bool),
    /// `on_real`
    Real(StreamId, f64),
}

/// Sink that records every callback in arrival order.
///
/// Optionally rejects once a number of events have been accepted.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
    reject_after: Option<(usize, SinkStatus)>,
}

impl RecordingSink {
    /// Create a sink that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that accepts `accepted` events, then answers `status`
    pub fn rejecting_after(accepted: usize, status: SinkStatus) -> Self {
        Self {
            events: Vec::new(),
            reject_after: Some((accepted, status)),
        }
    }

    /// Recorded events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drop recorded events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: Event) -> SinkStatus {
        if let Some((limit, status)) = self.reject_after {
            if self.events.len() >= limit {
                return status;
            }
        }
        self.events.push(event);
        SinkStatus::ACCEPT
    }
}

impl Sink for RecordingSink {
    fn on_node(&mut self, stream: StreamId, node: NodeId) -> SinkStatus {
        self.record(Event::Node(stream, node))
    }

    fn on_attribute(&mut self, stream: StreamId, attribute: AttributeId) -> SinkStatus {
        self.record(Event::Attribute(stream, attribute))
    }

    fn on_string(&mut self, stream: StreamId, text: &str) -> SinkStatus {
        self.record(Event::Text(stream, text.to_string()))
    }

    fn on_integer(&mut self, stream: StreamId, value: i64) -> SinkStatus {
        self.record(Event::Integer(stream, value))
    }

    fn on_boolean(&mut self, stream: StreamId, value: bool) -> SinkStatus {
        self.record(Event::Boolean(stream, value))
    }

    fn on_real(&mut self, stream: StreamId, value: f64) -> SinkStatus {
        self.record(Event::Real(stream, value))
    }
}
