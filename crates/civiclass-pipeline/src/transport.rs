//! Broker transport seam
//!
//! The pipeline talks to the broker through this trait so the consume loop
//! can be exercised against an in-memory implementation in tests. The real
//! implementation is [`crate::amqp::AmqpTransport`].

use async_trait::async_trait;
use civiclass_core::{ComplaintClassifiedEvent, Result};

/// Queue the complaint service publishes new complaints to
pub const CREATED_QUEUE: &str = "complaint.created";

/// Queue holding classified complaints for downstream routing
pub const CLASSIFIED_QUEUE: &str = "complaint.classified";

/// Exchange all complaint lifecycle events flow through
pub const COMPLAINTS_EXCHANGE: &str = "complaints";

/// Routing key for classified-complaint publications
pub const CLASSIFIED_ROUTING_KEY: &str = "complaint.classified";

/// A single inbound delivery awaiting acknowledgment
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Broker-assigned delivery tag, passed back on ack/reject
    pub delivery_tag: u64,

    /// True when the broker has delivered this message before
    pub redelivered: bool,

    /// Raw message body
    pub body: Vec<u8>,
}

/// Broker operations the event pipeline needs
///
/// The implementation owns the broker connection and channel exclusively;
/// the pipeline worker is the only caller.
#[async_trait]
pub trait Transport: Send {
    /// Wait for the next delivery; `None` when the consumer stream ends
    async fn receive(&mut self) -> Result<Option<InboundMessage>>;

    /// Publish a classified event with durability matching the inbound queue
    async fn publish(&mut self, event: &ComplaintClassifiedEvent) -> Result<()>;

    /// Acknowledge a delivery
    async fn ack(&mut self, delivery_tag: u64) -> Result<()>;

    /// Negatively acknowledge a delivery, optionally requeueing it
    async fn reject(&mut self, delivery_tag: u64, requeue: bool) -> Result<()>;
}
