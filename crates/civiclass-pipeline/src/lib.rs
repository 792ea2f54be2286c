//! Civiclass Pipeline
//!
//! Asynchronous bridge between the message broker and the classification
//! engine: consumes `complaint.created` events from a durable queue,
//! classifies them, and publishes `complaint.classified` events, with
//! at-least-once acknowledgment semantics (prefetch = 1, requeue on
//! failure).

pub mod amqp;
pub mod consumer;
pub mod transport;

pub use amqp::AmqpTransport;
pub use consumer::EventPipeline;
pub use transport::{
    InboundMessage, Transport, CLASSIFIED_QUEUE, CLASSIFIED_ROUTING_KEY, COMPLAINTS_EXCHANGE,
    CREATED_QUEUE,
};
